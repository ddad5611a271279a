//! Attribute Protocol decoder.

use tracing::trace;

use super::{read_u16_le, AttOpcode, Decoder, RecordContext};
use crate::event::{EventStore, GattOperation};

/// Decoder for ATT PDUs; emits read/write operations only.
#[derive(Debug, Clone, Copy)]
pub struct AttDecoder;

impl Decoder for AttDecoder {
    fn name(&self) -> &'static str {
        "att"
    }

    fn decode(&self, data: &[u8], context: &RecordContext, store: &mut EventStore) {
        let Some((&code, rest)) = data.split_first() else {
            return;
        };
        let Some(opcode) = AttOpcode::from_u8(code) else {
            trace!(decoder = self.name(), code, "ATT opcode not tracked");
            return;
        };

        let handle = if opcode.carries_handle() {
            read_u16_le(data, 1)
        } else {
            None
        };

        store.push_gatt_operation(GattOperation {
            timestamp: context.timestamp,
            direction: context.direction,
            opcode,
            handle,
            data: rest.to_vec(),
        });
    }
}
