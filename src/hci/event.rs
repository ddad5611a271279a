//! HCI event decoder.

use tracing::trace;

use super::codes::event_code;
use super::{clipped, read_handle, Decoder, MetaEventDecoder, RecordContext};
use crate::event::{
    BdAddr, ConnectionEvent, DisconnectOrigin, DisconnectionEvent, EventStore, Lifecycle,
    LinkKind,
};

/// Minimum parameter lengths for each handled event.
const CONNECTION_REQUEST_LEN: usize = 10;
const CONNECTION_COMPLETE_LEN: usize = 11;
const DISCONNECTION_COMPLETE_LEN: usize = 4;

/// Decoder for controller-to-host event packets.
///
/// Layout: event code (1), parameter length (1), parameters.
#[derive(Debug, Clone, Copy)]
pub struct EventDecoder;

impl Decoder for EventDecoder {
    fn name(&self) -> &'static str {
        "hci_event"
    }

    fn decode(&self, data: &[u8], context: &RecordContext, store: &mut EventStore) {
        let [code, param_len, ..] = *data else {
            return;
        };
        let params = clipped(data, 2, usize::from(param_len));

        match code {
            event_code::CONNECTION_REQUEST => connection_request(params, context, store),
            event_code::CONNECTION_COMPLETE => connection_complete(params, context, store),
            event_code::DISCONNECTION_COMPLETE => {
                disconnection_complete(params, context, store)
            }
            event_code::LE_META => MetaEventDecoder.decode(params, context, store),
            _ => {}
        }
    }
}

/// BD_ADDR (6), class of device (3), link type (1).
fn connection_request(params: &[u8], context: &RecordContext, store: &mut EventStore) {
    if params.len() < CONNECTION_REQUEST_LEN {
        trace!(have = params.len(), "short Connection Request dropped");
        return;
    }
    let Some(address) = BdAddr::from_slice(&params[0..6]) else {
        return;
    };

    store.push_connection(ConnectionEvent {
        timestamp: context.timestamp,
        direction: context.direction,
        address,
        link: LinkKind::from_link_type(params[9]),
        role: None,
        address_kind: None,
        lifecycle: Lifecycle::Request,
    });
}

/// Status (1), handle (2), BD_ADDR (6), link type (1), encryption (1).
fn connection_complete(params: &[u8], context: &RecordContext, store: &mut EventStore) {
    if params.len() < CONNECTION_COMPLETE_LEN {
        trace!(have = params.len(), "short Connection Complete dropped");
        return;
    }
    let Some(address) = BdAddr::from_slice(&params[3..9]) else {
        return;
    };

    store.push_connection(ConnectionEvent {
        timestamp: context.timestamp,
        direction: context.direction,
        address,
        link: LinkKind::from_link_type(params[9]),
        role: None,
        address_kind: None,
        lifecycle: Lifecycle::Complete { status: params[0] },
    });
}

/// Status (1), handle (2), reason (1).
fn disconnection_complete(params: &[u8], context: &RecordContext, store: &mut EventStore) {
    if params.len() < DISCONNECTION_COMPLETE_LEN {
        trace!(have = params.len(), "short Disconnection Complete dropped");
        return;
    }
    let Some(handle) = read_handle(params, 1) else {
        return;
    };

    store.push_disconnection(DisconnectionEvent {
        timestamp: context.timestamp,
        handle,
        reason: params[3],
        origin: DisconnectOrigin::Event,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{Direction, Timestamp};

    fn context() -> RecordContext {
        RecordContext::new(Timestamp::from_micros(1_000), Direction::Received)
    }

    fn decode(data: &[u8]) -> EventStore {
        let mut store = EventStore::new();
        EventDecoder.decode(data, &context(), &mut store);
        store
    }

    #[test]
    fn test_connection_request() {
        let data = [
            0x04, 0x0a, // Connection Request, 10 parameter bytes
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, // BD_ADDR
            0x0c, 0x02, 0x5a, // Class of device
            0x01, // Link type: ACL
        ];

        let store = decode(&data);

        assert_eq!(store.connections().len(), 1);
        let conn = &store.connections()[0];
        assert_eq!(conn.address.to_string(), "06:05:04:03:02:01");
        assert_eq!(conn.link, LinkKind::Acl);
        assert_eq!(conn.lifecycle, Lifecycle::Request);
        assert_eq!(conn.direction, Direction::Received);
        assert_eq!(conn.timestamp.as_micros(), 1_000);
    }

    #[test]
    fn test_connection_request_sco() {
        let data = [
            0x04, 0x0a, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x00, 0x00, 0x00,
            0x00, // Link type: SCO
        ];

        let store = decode(&data);
        assert_eq!(store.connections()[0].link, LinkKind::Sco);
    }

    #[test]
    fn test_connection_complete() {
        let data = [
            0x03, 0x0b, // Connection Complete, 11 parameter bytes
            0x00, // Status
            0x0b, 0x00, // Handle
            0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, // BD_ADDR
            0x01, // Link type: ACL
            0x00, // Encryption disabled
        ];

        let store = decode(&data);

        let conn = &store.connections()[0];
        assert_eq!(conn.address.to_string(), "FF:EE:DD:CC:BB:AA");
        assert_eq!(conn.lifecycle, Lifecycle::Complete { status: 0 });
        assert_eq!(conn.lifecycle.to_string(), "complete (status=0)");
    }

    #[test]
    fn test_disconnection_complete_masks_handle() {
        let data = [
            0x05, 0x04, // Disconnection Complete
            0x00, // Status
            0x34, 0x12, // Handle 0x1234 with flag bits
            0x42, // Unknown reason
        ];

        let store = decode(&data);

        let disc = &store.disconnections()[0];
        assert_eq!(disc.handle, 0x0234);
        assert_eq!(disc.reason, 0x42);
        assert_eq!(disc.reason_text(), "Unknown(0x42)");
    }

    #[test]
    fn test_short_parameters_are_dropped() {
        // Declared 10 bytes, only 9 present
        let data = [0x04, 0x0a, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x0c, 0x02, 0x5a];
        assert_eq!(decode(&data).event_count(), 0);

        // Declared length shorter than the minimum even though bytes follow
        let data = [0x05, 0x03, 0x00, 0x07, 0x00, 0x13];
        assert_eq!(decode(&data).event_count(), 0);
    }

    #[test]
    fn test_too_short_for_header() {
        assert_eq!(decode(&[]).event_count(), 0);
        assert_eq!(decode(&[0x05]).event_count(), 0);
    }

    #[test]
    fn test_unknown_event_code_ignored() {
        // Command Complete
        let data = [0x0e, 0x04, 0x01, 0x03, 0x0c, 0x00];
        assert_eq!(decode(&data).event_count(), 0);
    }

    #[test]
    fn test_parameters_limited_to_declared_length() {
        // Declares 4 bytes; trailing bytes are not parameters
        let data = [0x05, 0x04, 0x00, 0x07, 0x00, 0x13, 0xff, 0xff];
        let store = decode(&data);

        assert_eq!(store.disconnections().len(), 1);
        assert_eq!(store.disconnections()[0].handle, 7);
    }
}
