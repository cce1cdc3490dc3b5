//! GTPv2-C PDU codec (3GPP TS 29.274)
//!
//! The v2 header is 8 or 12 bytes: flags, message type, a 16-bit length
//! counting everything after the length field, an optional TEID (T flag),
//! and a 32-bit word whose upper 24 bits are the sequence number. The low
//! byte of that word is spare, except that its upper nibble carries the
//! message priority when the MP flag is set.
//!
//! One datagram may carry two PDUs: when the piggyback flag (P) is set on
//! the first, a second PDU with P clear follows immediately. Chains longer
//! than two are invalid. A non-piggybacked PDU must consume the stream
//! exactly; trailing bytes are rejected.

use bytes::BytesMut;
use gtplink_common::{OctetView, OctetWriter};

use crate::error::CodecError;
use crate::ie::V2Ie;

/// Piggybacked PDU follows this one.
pub const V2_F_PIGGYBACK: u8 = 0x10;
/// TEID field present.
pub const V2_F_TEID: u8 = 0x08;
/// Message priority present in the spare byte.
pub const V2_F_PRIORITY: u8 = 0x04;

/// Sequence numbers are 24 bits wide.
pub const V2_SEQUENCE_MASK: u32 = 0x00FF_FFFF;

/// A GTPv2-C PDU.
///
/// `sequence` holds a 24-bit value; `priority` a 4-bit one. The length
/// field is computed at encode time, so a decoded and rebuilt PDU always
/// re-encodes to the original bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V2Pdu {
    /// Message type
    pub msg_type: u8,
    /// Tunnel endpoint identifier, when the T flag is set
    pub teid: Option<u32>,
    /// Sequence number (24 bits)
    pub sequence: u32,
    /// Message priority (4 bits), when the MP flag is set
    pub priority: Option<u8>,
    /// Ordered IE list
    pub ies: Vec<V2Ie>,
    /// Piggybacked PDU, when the P flag is set
    pub piggyback: Option<Box<V2Pdu>>,
}

impl V2Pdu {
    /// Creates a PDU without TEID or priority.
    pub fn new(msg_type: u8, sequence: u32, ies: Vec<V2Ie>) -> Self {
        Self {
            msg_type,
            teid: None,
            sequence: sequence & V2_SEQUENCE_MASK,
            priority: None,
            ies,
            piggyback: None,
        }
    }

    /// Sets the TEID field.
    pub fn with_teid(mut self, teid: u32) -> Self {
        self.teid = Some(teid);
        self
    }

    /// Sets the message priority (low 4 bits kept).
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority & 0x0F);
        self
    }

    /// Attaches a piggybacked PDU.
    ///
    /// # Errors
    ///
    /// `NestedPiggyback` when `pdu` itself carries a piggybacked PDU.
    pub fn with_piggyback(mut self, pdu: V2Pdu) -> Result<Self, CodecError> {
        if pdu.piggyback.is_some() {
            return Err(CodecError::NestedPiggyback);
        }
        self.piggyback = Some(Box::new(pdu));
        Ok(self)
    }

    fn header_len(&self) -> usize {
        if self.teid.is_some() {
            12
        } else {
            8
        }
    }

    /// Wire length of this PDU alone: header plus IEs, excluding any
    /// piggybacked PDU.
    pub fn total_len(&self) -> usize {
        self.header_len() + self.ies.iter().map(V2Ie::total_len).sum::<usize>()
    }

    /// Decodes a stream containing exactly one PDU, or exactly two when
    /// the first carries the piggyback flag.
    pub fn decode(stream: &[u8]) -> Result<Self, CodecError> {
        if stream.len() < 8 {
            return Err(CodecError::Truncated {
                needed: 8,
                available: stream.len(),
            });
        }

        let flags = stream[0];
        let version = flags >> 5;
        if version != 2 {
            return Err(CodecError::WrongVersion(version));
        }
        let has_piggyback = flags & V2_F_PIGGYBACK != 0;
        let has_teid = flags & V2_F_TEID != 0;
        let has_priority = flags & V2_F_PRIORITY != 0;

        let msg_length = u16::from_be_bytes([stream[2], stream[3]]) as usize;
        let total = msg_length + 4;
        if stream.len() < total {
            return Err(CodecError::Truncated {
                needed: total,
                available: stream.len(),
            });
        }

        // Strict framing: without a piggyback the PDU owns the whole
        // stream; with one, the second PDU (its own flag clear) must
        // account for every remaining byte.
        let piggyback = if has_piggyback {
            let rest = &stream[total..];
            if rest.is_empty() {
                return Err(CodecError::Truncated {
                    needed: 8,
                    available: 0,
                });
            }
            if rest[0] & V2_F_PIGGYBACK != 0 {
                return Err(CodecError::NestedPiggyback);
            }
            Some(Box::new(V2Pdu::decode(rest)?))
        } else {
            if stream.len() != total {
                return Err(CodecError::ExtraBytes {
                    expected: total,
                    actual: stream.len(),
                });
            }
            None
        };

        let mut view = OctetView::new(&stream[4..total]);
        let teid = if has_teid { Some(view.read_u32()?) } else { None };
        let sequence = view.read_u24()?;
        let spare = view.read_u8()?;
        let priority = if has_priority {
            Some(spare >> 4)
        } else {
            None
        };

        let mut ie_view = OctetView::new(view.remaining_data());
        let ies = V2Ie::decode_all(&mut ie_view)?;

        Ok(Self {
            msg_type: stream[1],
            teid,
            sequence,
            priority,
            ies,
            piggyback,
        })
    }

    /// Encodes the PDU, followed by its piggybacked PDU when present.
    ///
    /// # Errors
    ///
    /// `IeLengthOverflow` when the body exceeds the 16-bit length field,
    /// `NestedPiggyback` when the piggybacked PDU has its own piggyback.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut body = BytesMut::new();
        for ie in &self.ies {
            ie.encode_to(&mut body)?;
        }

        let msg_length = self.header_len() - 4 + body.len();
        if msg_length > u16::MAX as usize {
            return Err(CodecError::IeLengthOverflow(msg_length));
        }

        let mut flags = 0x40;
        if self.piggyback.is_some() {
            flags |= V2_F_PIGGYBACK;
        }
        if self.teid.is_some() {
            flags |= V2_F_TEID;
        }
        if self.priority.is_some() {
            flags |= V2_F_PRIORITY;
        }

        let mut buf = OctetWriter::with_capacity(4 + msg_length);
        buf.put_u8(flags);
        buf.put_u8(self.msg_type);
        buf.put_u16(msg_length as u16);
        if let Some(teid) = self.teid {
            buf.put_u32(teid);
        }
        buf.put_u24(self.sequence & V2_SEQUENCE_MASK);
        buf.put_u8(self.priority.map_or(0, |p| p << 4));
        buf.put_slice(&body);

        let mut out = buf.into_vec();
        if let Some(piggyback) = &self.piggyback {
            if piggyback.piggyback.is_some() {
                return Err(CodecError::NestedPiggyback);
            }
            out.extend_from_slice(&piggyback.encode()?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{v2_ie, v2_msg};

    // Modify Bearer Response from a capture: TEID 0x39f00005, seq 0x1acc,
    // 4 IEs (Cause, BearerContext, Recovery unordered per the trace).
    const MBR_RESPONSE_VECTOR: [u8; 87] = [
        0x48, 0x23, 0x00, 0x53, 0x39, 0xf0, 0x00, 0x05, 0x00, 0x1a, 0xcc, 0x00, 0x02, 0x00, 0x02,
        0x00, 0x10, 0x00, 0x5d, 0x00, 0x30, 0x00, 0x49, 0x00, 0x01, 0x00, 0x05, 0x02, 0x00, 0x02,
        0x00, 0x10, 0x00, 0x57, 0x00, 0x19, 0x00, 0xc1, 0x05, 0x40, 0x3b, 0x30, 0x9b, 0xa5, 0x26,
        0x65, 0x26, 0x06, 0xae, 0x00, 0x20, 0x01, 0x0b, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x06, 0x5e, 0x00, 0x04, 0x00, 0x05, 0x00, 0x00, 0x0c, 0x03, 0x00, 0x01, 0x00, 0x38,
        0x48, 0x00, 0x08, 0x00, 0x00, 0x00, 0x61, 0xa8, 0x00, 0x01, 0x11, 0x70,
    ];

    // Modify Bearer Request from a capture (ULI, RAT Type, Delay Value,
    // Bearer Context, Recovery).
    const MBR_REQUEST_VECTOR: [u8; 66] = [
        0x48, 0x22, 0x00, 0x3e, 0x05, 0x40, 0x3b, 0x2e, 0x00, 0x1a, 0xcc, 0x00, 0x56, 0x00, 0x0d,
        0x00, 0x18, 0x00, 0x11, 0x00, 0xff, 0x00, 0x00, 0x11, 0x00, 0x0f, 0x42, 0x4d, 0x00, 0x52,
        0x00, 0x01, 0x00, 0x06, 0x5c, 0x00, 0x01, 0x00, 0x00, 0x5d, 0x00, 0x12, 0x00, 0x49, 0x00,
        0x01, 0x00, 0x05, 0x57, 0x00, 0x09, 0x00, 0x80, 0xe4, 0x03, 0xfb, 0x94, 0xac, 0x13, 0x01,
        0xb2, 0x03, 0x00, 0x01, 0x00, 0x95,
    ];

    #[test]
    fn test_decode_mbr_response() {
        let pdu = V2Pdu::decode(&MBR_RESPONSE_VECTOR).unwrap();
        assert_eq!(pdu.msg_type, v2_msg::MODIFY_BEARER_RESPONSE);
        assert_eq!(pdu.teid, Some(0x39f0_0005));
        assert_eq!(pdu.sequence, 0x1acc);
        assert_eq!(pdu.priority, None);
        assert!(pdu.piggyback.is_none());
        assert_eq!(pdu.ies.len(), 4);
        assert_eq!(pdu.total_len(), 87);
    }

    #[test]
    fn test_mbr_response_round_trip() {
        let pdu = V2Pdu::decode(&MBR_RESPONSE_VECTOR).unwrap();
        assert_eq!(pdu.encode().unwrap(), &MBR_RESPONSE_VECTOR[..]);
    }

    #[test]
    fn test_decode_mbr_request_ies() {
        let pdu = V2Pdu::decode(&MBR_REQUEST_VECTOR).unwrap();
        assert_eq!(pdu.msg_type, v2_msg::MODIFY_BEARER_REQUEST);
        assert_eq!(pdu.teid, Some(0x0540_3b2e));
        assert_eq!(pdu.sequence, 0x1acc);
        assert_eq!(pdu.ies.len(), 5);

        let types: Vec<u8> = pdu.ies.iter().map(|ie| ie.type_id).collect();
        assert_eq!(
            types,
            [
                v2_ie::ULI,
                v2_ie::RAT_TYPE,
                v2_ie::DELAY_VALUE,
                v2_ie::BEARER_CONTEXT,
                v2_ie::RECOVERY
            ]
        );

        // the bearer context nests an EBI and an F-TEID
        let children = pdu.ies[3].parse_children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].type_id, v2_ie::EBI);
        assert_eq!(children[1].type_id, v2_ie::FTEID);
    }

    #[test]
    fn test_mbr_request_round_trip() {
        let pdu = V2Pdu::decode(&MBR_REQUEST_VECTOR).unwrap();
        assert_eq!(pdu.encode().unwrap(), &MBR_REQUEST_VECTOR[..]);
    }

    #[test]
    fn test_too_short_stream() {
        let raw = [0x48, 0x01, 0x00, 0x04, 0x00, 0x00, 0x01];
        assert!(matches!(
            V2Pdu::decode(&raw),
            Err(CodecError::Truncated {
                needed: 8,
                available: 7
            })
        ));
    }

    #[test]
    fn test_wrong_version() {
        let raw = [0x32, 0x01, 0x00, 0x04, 0x00, 0x00, 0x01, 0x00];
        assert!(matches!(
            V2Pdu::decode(&raw),
            Err(CodecError::WrongVersion(1))
        ));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let mut raw = MBR_RESPONSE_VECTOR.to_vec();
        raw.push(0x00);
        assert!(matches!(
            V2Pdu::decode(&raw),
            Err(CodecError::ExtraBytes {
                expected: 87,
                actual: 88
            })
        ));
    }

    #[test]
    fn test_piggyback_round_trip() {
        let first = V2Pdu::decode(&MBR_REQUEST_VECTOR).unwrap();
        let second = V2Pdu::new(
            v2_msg::MODIFY_BEARER_REQUEST,
            0x1acd,
            vec![
                V2Ie::with_raw_data(v2_ie::RAT_TYPE, vec![0x06]),
                V2Ie::with_raw_data(v2_ie::RECOVERY, vec![0x95]),
            ],
        )
        .with_teid(0x0540_3b2f);

        let combined = first.with_piggyback(second.clone()).unwrap();
        let encoded = combined.encode().unwrap();
        assert_eq!(encoded[0] & V2_F_PIGGYBACK, V2_F_PIGGYBACK);

        let decoded = V2Pdu::decode(&encoded).unwrap();
        let piggyback = decoded.piggyback.as_deref().unwrap();
        assert_eq!(*piggyback, second);
        assert_eq!(decoded.sequence, 0x1acc);
        assert_eq!(decoded.encode().unwrap(), encoded);
    }

    #[test]
    fn test_nested_piggyback_rejected() {
        let first = V2Pdu::decode(&MBR_REQUEST_VECTOR).unwrap();
        let second = V2Pdu::new(v2_msg::ECHO_REQUEST, 1, vec![]);
        let mut encoded = first.with_piggyback(second).unwrap().encode().unwrap();
        // forge the piggyback flag onto the second PDU
        encoded[66] |= V2_F_PIGGYBACK;
        assert!(matches!(
            V2Pdu::decode(&encoded),
            Err(CodecError::NestedPiggyback)
        ));
    }

    #[test]
    fn test_piggyback_builder_rejects_chain_of_three() {
        let inner = V2Pdu::new(v2_msg::ECHO_REQUEST, 1, vec![]);
        let middle = V2Pdu::new(v2_msg::ECHO_REQUEST, 2, vec![])
            .with_piggyback(inner)
            .unwrap();
        let err = V2Pdu::new(v2_msg::ECHO_REQUEST, 3, vec![])
            .with_piggyback(middle)
            .unwrap_err();
        assert!(matches!(err, CodecError::NestedPiggyback));
    }

    #[test]
    fn test_priority_nibble() {
        let pdu = V2Pdu::new(v2_msg::CREATE_SESSION_REQUEST, 0x123456, vec![])
            .with_teid(0xDEADBEEF)
            .with_priority(0x9);
        let encoded = pdu.encode().unwrap();
        assert_eq!(encoded[0] & V2_F_PRIORITY, V2_F_PRIORITY);
        assert_eq!(encoded[11], 0x90);

        let decoded = V2Pdu::decode(&encoded).unwrap();
        assert_eq!(decoded.priority, Some(0x9));
        assert_eq!(decoded.sequence, 0x123456);
    }

    #[test]
    fn test_no_teid_header_is_8_bytes() {
        let pdu = V2Pdu::new(v2_msg::ECHO_REQUEST, 0x42, vec![]);
        let encoded = pdu.encode().unwrap();
        assert_eq!(encoded.len(), 8);
        assert_eq!(encoded[0], 0x40);
        assert_eq!(&encoded[4..8], &[0x00, 0x00, 0x42, 0x00]);

        let decoded = V2Pdu::decode(&encoded).unwrap();
        assert_eq!(decoded.teid, None);
        assert_eq!(decoded.sequence, 0x42);
    }

    #[test]
    fn test_sequence_masked_to_24_bits() {
        let pdu = V2Pdu::new(v2_msg::ECHO_REQUEST, 0xFF123456, vec![]);
        assert_eq!(pdu.sequence, 0x123456);
    }
}
