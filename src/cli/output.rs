//! Report formatting for decoded events.
//!
//! The text report lists the capture summary followed by one section per
//! event kind. The JSON format writes one object per event, section by
//! section, for consumption by other tools.

use std::io::Write;

use clap::ValueEnum;
use serde_json::{json, Value};

use crate::event::{
    AdvertisementReport, ConnectionEvent, DisconnectionEvent, EventStore, GattOperation,
};
use crate::format::format_duration;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report (default)
    Text,
    /// JSON Lines (one JSON object per event)
    Json,
}

const RULE_WIDTH: usize = 70;

/// Formats an [`EventStore`] for output.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a new formatter with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format all events and write to the given writer.
    pub fn write<W: Write>(&self, store: &EventStore, writer: &mut W) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Text => self.write_report(store, writer),
            OutputFormat::Json => self.write_json(store, writer),
        }
    }

    fn write_report<W: Write>(&self, store: &EventStore, writer: &mut W) -> std::io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(writer, "{rule}")?;
        writeln!(writer, "BTSNOOP HCI LOG PARSER RESULTS")?;
        writeln!(writer, "{rule}")?;
        writeln!(writer)?;
        writeln!(writer, "Total packets parsed: {}", store.record_count())?;

        if let (Some(first), Some(last)) = (store.first_timestamp(), store.last_timestamp()) {
            writeln!(writer, "Capture period: {first} to {last}")?;
            writeln!(writer, "Duration: {}", format_duration(last.micros_since(first)))?;
        }
        for warning in store.warnings() {
            writeln!(writer, "Warning: {warning}")?;
        }

        writeln!(writer)?;
        section(writer, &rule, "CONNECTION REQUESTS", store.connections().len())?;
        for conn in store.connections() {
            writeln!(
                writer,
                "  [{}] {}",
                conn.timestamp,
                conn.direction.as_str().to_uppercase()
            )?;
            writeln!(writer, "    BD_ADDR: {}", conn.address)?;
            writeln!(
                writer,
                "    Type: {} | Event: {}",
                conn.link_description(),
                conn.lifecycle
            )?;
            writeln!(writer)?;
        }

        section(writer, &rule, "DISCONNECTION EVENTS", store.disconnections().len())?;
        for disc in store.disconnections() {
            writeln!(writer, "  [{}]", disc.timestamp)?;
            writeln!(writer, "    Handle: 0x{:04X}", disc.handle)?;
            writeln!(writer, "    Reason: {}", disc.reason_text())?;
            writeln!(writer)?;
        }

        section(writer, &rule, "ADVERTISEMENT PACKETS", store.advertisements().len())?;
        for adv in store.advertisements() {
            writeln!(writer, "  [{}]", adv.timestamp)?;
            writeln!(writer, "    BD_ADDR: {} ({})", adv.address, adv.address_kind)?;
            writeln!(writer, "    Type: {} | RSSI: {} dBm", adv.kind, adv.rssi)?;
            if !adv.data.is_empty() {
                writeln!(writer, "    Data: {}", hex::encode(&adv.data))?;
            }
            writeln!(writer)?;
        }

        section(writer, &rule, "GATT OPERATIONS", store.gatt_operations().len())?;
        for op in store.gatt_operations() {
            writeln!(
                writer,
                "  [{}] {}",
                op.timestamp,
                op.direction.as_str().to_uppercase()
            )?;
            writeln!(writer, "    Operation: {}", op.operation())?;
            if let Some(handle) = op.handle {
                writeln!(writer, "    Handle: 0x{handle:04X}")?;
            }
            if !op.data.is_empty() {
                writeln!(writer, "    Data: {}", hex::encode(&op.data))?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    fn write_json<W: Write>(&self, store: &EventStore, writer: &mut W) -> std::io::Result<()> {
        let objects = store
            .connections()
            .iter()
            .map(connection_json)
            .chain(store.disconnections().iter().map(disconnection_json))
            .chain(store.advertisements().iter().map(advertisement_json))
            .chain(store.gatt_operations().iter().map(gatt_json));

        for obj in objects {
            serde_json::to_writer(&mut *writer, &obj)?;
            writeln!(writer)?;
        }
        Ok(())
    }
}

fn section<W: Write>(writer: &mut W, rule: &str, title: &str, count: usize) -> std::io::Result<()> {
    writeln!(writer, "{rule}")?;
    writeln!(writer, "{title} ({count})")?;
    writeln!(writer, "{rule}")
}

fn connection_json(conn: &ConnectionEvent) -> Value {
    json!({
        "kind": "connection",
        "timestamp": conn.timestamp.to_string(),
        "timestamp_us": conn.timestamp.as_micros(),
        "direction": conn.direction.as_str(),
        "bd_addr": conn.address.to_string(),
        "link_type": conn.link_description(),
        "event": conn.lifecycle.to_string(),
    })
}

fn disconnection_json(disc: &DisconnectionEvent) -> Value {
    json!({
        "kind": "disconnection",
        "timestamp": disc.timestamp.to_string(),
        "timestamp_us": disc.timestamp.as_micros(),
        "handle": disc.handle,
        "reason": disc.reason,
        "reason_str": disc.reason_text(),
    })
}

fn advertisement_json(adv: &AdvertisementReport) -> Value {
    json!({
        "kind": "advertisement",
        "timestamp": adv.timestamp.to_string(),
        "timestamp_us": adv.timestamp.as_micros(),
        "event_type": adv.kind.to_string(),
        "event_type_code": adv.kind.code(),
        "addr_type": adv.address_kind.to_string(),
        "bd_addr": adv.address.to_string(),
        "rssi": adv.rssi,
        "data": hex::encode(&adv.data),
    })
}

fn gatt_json(op: &GattOperation) -> Value {
    json!({
        "kind": "gatt",
        "timestamp": op.timestamp.to_string(),
        "timestamp_us": op.timestamp.as_micros(),
        "direction": op.direction.as_str(),
        "operation": op.operation(),
        "opcode": op.opcode.code(),
        "handle": op.handle,
        "data": hex::encode(&op.data),
    })
}
