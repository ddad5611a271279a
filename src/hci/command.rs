//! HCI command decoder.

use tracing::trace;

use super::codes::opcode;
use super::{clipped, read_handle, Decoder, RecordContext};
use crate::event::{
    BdAddr, ConnectionEvent, DisconnectOrigin, DisconnectionEvent, EventStore, Lifecycle,
    LinkKind,
};

const CREATE_CONNECTION_LEN: usize = 6;
const LE_CREATE_CONNECTION_LEN: usize = 8;
const DISCONNECT_LEN: usize = 3;

/// Decoder for host-to-controller command packets.
///
/// Layout: opcode (2, little-endian), parameter length (1), parameters.
#[derive(Debug, Clone, Copy)]
pub struct CommandDecoder;

impl Decoder for CommandDecoder {
    fn name(&self) -> &'static str {
        "hci_command"
    }

    fn decode(&self, data: &[u8], context: &RecordContext, store: &mut EventStore) {
        let [lo, hi, param_len, ..] = *data else {
            return;
        };
        let params = clipped(data, 3, usize::from(param_len));

        match u16::from_le_bytes([lo, hi]) {
            opcode::CREATE_CONNECTION => {
                // BD_ADDR leads the parameters
                if params.len() < CREATE_CONNECTION_LEN {
                    trace!(decoder = self.name(), "short Create Connection dropped");
                    return;
                }
                if let Some(address) = BdAddr::from_slice(params) {
                    store.push_connection(ConnectionEvent {
                        timestamp: context.timestamp,
                        direction: context.direction,
                        address,
                        link: LinkKind::Acl,
                        role: None,
                        address_kind: None,
                        lifecycle: Lifecycle::CreateConnectionCommand,
                    });
                }
            }
            opcode::LE_CREATE_CONNECTION => {
                // Address is taken from parameter bytes 2..8
                if params.len() < LE_CREATE_CONNECTION_LEN {
                    trace!(decoder = self.name(), "short LE Create Connection dropped");
                    return;
                }
                if let Some(address) = BdAddr::from_slice(&params[2..]) {
                    store.push_connection(ConnectionEvent {
                        timestamp: context.timestamp,
                        direction: context.direction,
                        address,
                        link: LinkKind::Le,
                        role: None,
                        address_kind: None,
                        lifecycle: Lifecycle::LeCreateCommand,
                    });
                }
            }
            opcode::DISCONNECT => {
                if params.len() < DISCONNECT_LEN {
                    trace!(decoder = self.name(), "short Disconnect dropped");
                    return;
                }
                if let Some(handle) = read_handle(params, 0) {
                    store.push_disconnection(DisconnectionEvent {
                        timestamp: context.timestamp,
                        handle,
                        reason: params[2],
                        origin: DisconnectOrigin::Command,
                    });
                }
            }
            _ => {}
        }
    }
}
