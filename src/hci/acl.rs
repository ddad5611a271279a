//! ACL data decoder with L2CAP unwrapping.

use super::{clipped, read_u16_le, AttDecoder, Decoder, RecordContext, L2CAP_CID_ATT};
use crate::event::EventStore;

/// ACL header: handle + flags (2), data length (2).
const ACL_HEADER_LEN: usize = 4;

/// L2CAP basic header: payload length (2), channel id (2).
const L2CAP_HEADER_LEN: usize = 4;

/// Decoder for ACL data packets.
///
/// Only the ATT fixed channel is followed. Fragmented L2CAP frames are not
/// reassembled; each ACL packet is decoded on its own.
#[derive(Debug, Clone, Copy)]
pub struct AclDecoder;

impl Decoder for AclDecoder {
    fn name(&self) -> &'static str {
        "acl"
    }

    fn decode(&self, data: &[u8], context: &RecordContext, store: &mut EventStore) {
        let Some(acl_len) = read_u16_le(data, 2) else {
            return;
        };
        let acl = clipped(data, ACL_HEADER_LEN, usize::from(acl_len));

        let (Some(l2cap_len), Some(cid)) = (read_u16_le(acl, 0), read_u16_le(acl, 2)) else {
            return;
        };
        let payload = clipped(acl, L2CAP_HEADER_LEN, usize::from(l2cap_len));

        if cid == L2CAP_CID_ATT && !payload.is_empty() {
            AttDecoder.decode(payload, context, store);
        }
    }
}
