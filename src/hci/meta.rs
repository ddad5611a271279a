//! LE meta event decoder.

use tracing::trace;

use super::codes::subevent_code;
use super::{read_handle, AddressKind, Decoder, RecordContext, ReportKind};
use crate::event::{
    AdvertisementReport, BdAddr, ConnectionEvent, EventStore, Lifecycle, LinkKind, Role,
};

/// Minimum parameter lengths, subevent code included.
const LE_CONNECTION_COMPLETE_LEN: usize = 19;
const LE_ENHANCED_CONNECTION_COMPLETE_LEN: usize = 31;

/// Fixed part of each advertising report: event type (1), address
/// type (1), address (6), data length (1).
const REPORT_PREFIX_LEN: usize = 9;

/// Decoder for LE Meta event parameters.
///
/// Layout: subevent code (1), subevent parameters.
#[derive(Debug, Clone, Copy)]
pub struct MetaEventDecoder;

impl Decoder for MetaEventDecoder {
    fn name(&self) -> &'static str {
        "le_meta"
    }

    fn decode(&self, data: &[u8], context: &RecordContext, store: &mut EventStore) {
        let Some(&subevent) = data.first() else {
            return;
        };

        match subevent {
            subevent_code::LE_CONNECTION_COMPLETE => {
                if data.len() >= LE_CONNECTION_COMPLETE_LEN {
                    le_connection_complete(data, LinkKind::Le, context, store);
                }
            }
            subevent_code::LE_ENHANCED_CONNECTION_COMPLETE => {
                if data.len() >= LE_ENHANCED_CONNECTION_COMPLETE_LEN {
                    le_connection_complete(data, LinkKind::LeEnhanced, context, store);
                }
            }
            subevent_code::LE_ADVERTISING_REPORT => advertising_report(data, context, store),
            _ => {}
        }
    }
}

/// Subevent (1), status (1), handle (2), role (1), peer address type (1),
/// peer address (6), then timing fields this decoder does not model. The
/// enhanced variant shares the same leading layout.
fn le_connection_complete(
    data: &[u8],
    link: LinkKind,
    context: &RecordContext,
    store: &mut EventStore,
) {
    let (Some(handle), Some(address)) = (read_handle(data, 2), BdAddr::from_slice(&data[6..]))
    else {
        return;
    };
    let status = data[1];
    let lifecycle = match link {
        LinkKind::LeEnhanced => Lifecycle::LeEnhancedConnectionComplete { status, handle },
        _ => Lifecycle::LeConnectionComplete { status, handle },
    };

    store.push_connection(ConnectionEvent {
        timestamp: context.timestamp,
        direction: context.direction,
        address,
        link,
        role: Some(Role::from_u8(data[4])),
        address_kind: Some(AddressKind::from_u8(data[5])),
        lifecycle,
    });
}

/// Subevent (1), report count (1), then that many reports of
/// [prefix (9) | data (data length) | rssi (1)].
///
/// A report that does not fit stops the walk; reports already decoded are
/// kept. A missing trailing RSSI byte reads as 0.
fn advertising_report(data: &[u8], context: &RecordContext, store: &mut EventStore) {
    let Some(&num_reports) = data.get(1) else {
        return;
    };
    let mut offset = 2;

    for index in 0..num_reports {
        let Some(prefix) = data.get(offset..offset + REPORT_PREFIX_LEN) else {
            trace!(index, num_reports, "advertising report prefix truncated");
            break;
        };
        let Some(address) = BdAddr::from_slice(&prefix[2..8]) else {
            break;
        };
        let kind = ReportKind::from_u8(prefix[0]);
        let address_kind = AddressKind::from_u8(prefix[1]);
        let data_len = usize::from(prefix[8]);
        offset += REPORT_PREFIX_LEN;

        let Some(adv_data) = data.get(offset..offset + data_len) else {
            trace!(index, data_len, "advertising data truncated");
            break;
        };
        offset += data_len;

        let rssi = data.get(offset).map_or(0, |&byte| byte as i8);
        offset += 1;

        store.push_advertisement(AdvertisementReport {
            timestamp: context.timestamp,
            kind,
            address_kind,
            address,
            rssi,
            data: adv_data.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{Direction, Timestamp};

    fn decode(data: &[u8]) -> EventStore {
        let mut store = EventStore::new();
        let context = RecordContext::new(Timestamp::from_micros(5), Direction::Received);
        MetaEventDecoder.decode(data, &context, &mut store);
        store
    }

    /// One advertising report with the given data and RSSI byte.
    fn report(kind: u8, addr_type: u8, addr: [u8; 6], adv: &[u8], rssi: u8) -> Vec<u8> {
        let mut bytes = vec![kind, addr_type];
        bytes.extend_from_slice(&addr);
        bytes.push(adv.len() as u8);
        bytes.extend_from_slice(adv);
        bytes.push(rssi);
        bytes
    }

    fn le_connection_complete_params(subevent: u8, total_len: usize) -> Vec<u8> {
        let mut data = vec![
            subevent, 0x00, // Status
            0x40, 0x20, // Handle 0x0040 with flag bits
            0x01, // Role: peripheral
            0x01, // Peer address type: random
            0x11, 0x22, 0x33, 0x44, 0x55, 0x66, // Peer address
        ];
        data.resize(total_len, 0x00);
        data
    }

    #[test]
    fn test_le_connection_complete() {
        let store = decode(&le_connection_complete_params(0x01, 19));

        let conn = &store.connections()[0];
        assert_eq!(conn.link, LinkKind::Le);
        assert_eq!(conn.role, Some(Role::Slave));
        assert_eq!(conn.address_kind, Some(AddressKind::Random));
        assert_eq!(conn.address.to_string(), "66:55:44:33:22:11");
        assert_eq!(
            conn.lifecycle,
            Lifecycle::LeConnectionComplete {
                status: 0,
                handle: 0x0040
            }
        );
        assert_eq!(conn.link_description(), "LE (Slave, Random)");
    }

    #[test]
    fn test_le_enhanced_connection_complete() {
        let store = decode(&le_connection_complete_params(0x0A, 31));

        let conn = &store.connections()[0];
        assert_eq!(conn.link, LinkKind::LeEnhanced);
        assert_eq!(
            conn.lifecycle.to_string(),
            "le_enhanced_connection_complete (status=0, handle=0x0040)"
        );
        assert_eq!(conn.link_description(), "LE Enhanced (Slave, Random)");
    }

    #[test]
    fn test_short_le_connection_complete_dropped() {
        assert_eq!(decode(&le_connection_complete_params(0x01, 18)).event_count(), 0);
        assert_eq!(decode(&le_connection_complete_params(0x0A, 30)).event_count(), 0);
    }

    #[test]
    fn test_advertising_reports() {
        let mut data = vec![0x02, 0x02]; // Advertising report, 2 reports
        data.extend(report(0x00, 0x00, [1, 2, 3, 4, 5, 6], &[0x02, 0x01, 0x06], 0xc4));
        data.extend(report(0x04, 0x01, [6, 5, 4, 3, 2, 1], &[], 0x40));

        let store = decode(&data);

        let reports = store.advertisements();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].kind, ReportKind::AdvInd);
        assert_eq!(reports[0].address.to_string(), "06:05:04:03:02:01");
        assert_eq!(reports[0].data, vec![0x02, 0x01, 0x06]);
        assert_eq!(reports[0].rssi, -60);
        assert_eq!(reports[1].kind, ReportKind::ScanRsp);
        assert_eq!(reports[1].address_kind, AddressKind::Random);
        assert_eq!(reports[1].rssi, 64);
        assert!(reports[1].data.is_empty());
    }

    #[test]
    fn test_rssi_sign() {
        let mut data = vec![0x02, 0x01];
        data.extend(report(0x00, 0x00, [0; 6], &[], 0xff));
        assert_eq!(decode(&data).advertisements()[0].rssi, -1);
    }

    #[test]
    fn test_fewer_reports_than_declared() {
        let mut data = vec![0x02, 0x02]; // Declares 2 reports
        data.extend(report(0x00, 0x00, [1, 2, 3, 4, 5, 6], &[0xaa], 0xd0));
        data.extend_from_slice(&[0x00, 0x00, 0x01]); // Partial second prefix

        let store = decode(&data);
        assert_eq!(store.advertisements().len(), 1);
    }

    #[test]
    fn test_data_length_past_end_stops_walk() {
        let mut data = vec![0x02, 0x02];
        data.extend(report(0x03, 0x00, [1, 2, 3, 4, 5, 6], &[], 0xd0));
        // Prefix claims 200 data bytes, only 2 follow
        data.extend_from_slice(&[0x00, 0x00, 1, 2, 3, 4, 5, 6, 200, 0xaa, 0xbb]);

        let store = decode(&data);
        assert_eq!(store.advertisements().len(), 1);
        assert_eq!(store.advertisements()[0].kind, ReportKind::AdvNonconnInd);
    }

    #[test]
    fn test_missing_rssi_defaults_to_zero() {
        let mut data = vec![0x02, 0x01];
        let mut single = report(0x00, 0x00, [1, 2, 3, 4, 5, 6], &[0x01, 0x02], 0xc0);
        single.pop(); // Drop RSSI byte
        data.extend(single);

        let store = decode(&data);
        assert_eq!(store.advertisements().len(), 1);
        assert_eq!(store.advertisements()[0].rssi, 0);
    }

    #[test]
    fn test_adversarial_counts_never_overrun() {
        // 255 reports declared with every length field maxed out
        let mut data = vec![0x02, 0xff];
        data.extend_from_slice(&[0xff; 40]);
        assert_eq!(decode(&data).advertisements().len(), 0);

        // Each prefix followed directly by the next with no RSSI room
        for len in 0..32 {
            let mut data = vec![0x02, 0xff];
            data.extend(std::iter::repeat(0x00).take(len));
            let _ = decode(&data);
        }
    }

    #[test]
    fn test_empty_and_unknown_subevents() {
        assert_eq!(decode(&[]).event_count(), 0);
        assert_eq!(decode(&[0x02]).event_count(), 0);
        // Connection Update Complete is not decoded
        assert_eq!(decode(&[0x03, 0x00, 0x40, 0x00]).event_count(), 0);
    }
}
