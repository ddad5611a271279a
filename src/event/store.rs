//! Append-only accumulation of decoded events.

use super::{AdvertisementReport, ConnectionEvent, DisconnectionEvent, GattOperation};
use crate::capture::Timestamp;
use crate::error::FormatWarning;

/// Events from one decode pass, in capture file order.
///
/// Only the decoder appends; everything else reads.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    connections: Vec<ConnectionEvent>,
    disconnections: Vec<DisconnectionEvent>,
    advertisements: Vec<AdvertisementReport>,
    gatt_operations: Vec<GattOperation>,
    record_count: u64,
    first_timestamp: Option<Timestamp>,
    last_timestamp: Option<Timestamp>,
    warnings: Vec<FormatWarning>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connections(&self) -> &[ConnectionEvent] {
        &self.connections
    }

    pub fn disconnections(&self) -> &[DisconnectionEvent] {
        &self.disconnections
    }

    pub fn advertisements(&self) -> &[AdvertisementReport] {
        &self.advertisements
    }

    pub fn gatt_operations(&self) -> &[GattOperation] {
        &self.gatt_operations
    }

    /// Records with a non-empty payload.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Timestamp of the first record in file order.
    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.first_timestamp
    }

    /// Timestamp of the last record in file order.
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.last_timestamp
    }

    /// Signed microseconds between the first and last record.
    pub fn duration_micros(&self) -> Option<i64> {
        Some(self.last_timestamp?.micros_since(self.first_timestamp?))
    }

    /// Header warnings raised when the capture was opened.
    pub fn warnings(&self) -> &[FormatWarning] {
        &self.warnings
    }

    /// Total number of events across all four lists.
    pub fn event_count(&self) -> usize {
        self.connections.len()
            + self.disconnections.len()
            + self.advertisements.len()
            + self.gatt_operations.len()
    }

    pub(crate) fn set_warnings(&mut self, warnings: Vec<FormatWarning>) {
        self.warnings = warnings;
    }

    pub(crate) fn note_record(&mut self, timestamp: Timestamp) {
        self.record_count += 1;
        self.first_timestamp.get_or_insert(timestamp);
        self.last_timestamp = Some(timestamp);
    }

    pub(crate) fn push_connection(&mut self, event: ConnectionEvent) {
        self.connections.push(event);
    }

    pub(crate) fn push_disconnection(&mut self, event: DisconnectionEvent) {
        self.disconnections.push(event);
    }

    pub(crate) fn push_advertisement(&mut self, report: AdvertisementReport) {
        self.advertisements.push(report);
    }

    pub(crate) fn push_gatt_operation(&mut self, operation: GattOperation) {
        self.gatt_operations.push(operation);
    }
}
