//! GTPv1 PDU codec (3GPP TS 29.060)
//!
//! The v1 header is 8 bytes: flags, message type, a 16-bit length counting
//! everything after the TEID field, and the TEID. When any of the
//! extension-header/sequence/N-PDU flags is set, a 4-byte optional group
//! follows: sequence in the high 16 bits, N-PDU number in bits 15..8 and
//! the next-extension-header type in the low 8 bits.
//!
//! A G-PDU (type 0xFF) carries an opaque tunnelled packet; every other
//! type carries an ordered IE list.

use bytes::{BufMut, Bytes, BytesMut};
use gtplink_common::{OctetView, OctetWriter};

use crate::error::CodecError;
use crate::ie::V1Ie;

/// Message type carrying an opaque tunnelled packet.
pub const V1_TUNNEL_MSG_TYPE: u8 = 0xFF;

/// Protocol type flag: GTP (set) vs GTP' (clear).
pub const V1_F_PROTOCOL_TYPE: u8 = 0x10;
/// Next-extension-header present flag.
pub const V1_F_EXT_HEADER: u8 = 0x04;
/// Sequence number present flag.
pub const V1_F_SEQ: u8 = 0x02;
/// N-PDU number present flag.
pub const V1_F_NPDU: u8 = 0x01;

/// Payload of a v1 PDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum V1Payload {
    /// Opaque tunnelled packet (G-PDU)
    Tunnel(Bytes),
    /// Ordered IE list (signalling messages)
    Ies(Vec<V1Ie>),
}

/// A GTPv1 (or GTPv0-framed) PDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V1Pdu {
    /// Version bits from the flag octet (0 or 1)
    pub version: u8,
    /// Protocol type: true for GTP, false for GTP'
    pub protocol_type: bool,
    /// Message type
    pub msg_type: u8,
    /// Tunnel endpoint identifier
    pub teid: u32,
    /// Sequence number, when the S flag is set
    pub sequence: Option<u16>,
    /// N-PDU number, when the PN flag is set
    pub n_pdu_number: Option<u8>,
    /// Next extension header type, when the E flag is set
    pub next_ext_header: Option<u8>,
    /// Message payload
    pub payload: V1Payload,
}

impl V1Pdu {
    /// Creates a signalling PDU carrying IEs, sequence unset.
    pub fn new(msg_type: u8, teid: u32, ies: Vec<V1Ie>) -> Self {
        Self {
            version: 1,
            protocol_type: true,
            msg_type,
            teid,
            sequence: None,
            n_pdu_number: None,
            next_ext_header: None,
            payload: V1Payload::Ies(ies),
        }
    }

    /// Creates a G-PDU carrying a tunnelled packet.
    pub fn g_pdu(teid: u32, data: impl Into<Bytes>) -> Self {
        Self {
            version: 1,
            protocol_type: true,
            msg_type: V1_TUNNEL_MSG_TYPE,
            teid,
            sequence: None,
            n_pdu_number: None,
            next_ext_header: None,
            payload: V1Payload::Tunnel(data.into()),
        }
    }

    /// Sets the sequence number.
    pub fn with_sequence(mut self, seq: u16) -> Self {
        self.sequence = Some(seq);
        self
    }

    /// Sets the N-PDU number.
    pub fn with_n_pdu_number(mut self, n_pdu: u8) -> Self {
        self.n_pdu_number = Some(n_pdu);
        self
    }

    /// The IE list, empty for tunnel payloads.
    pub fn ies(&self) -> &[V1Ie] {
        match &self.payload {
            V1Payload::Ies(ies) => ies,
            V1Payload::Tunnel(_) => &[],
        }
    }

    fn has_optional_group(&self) -> bool {
        self.sequence.is_some() || self.n_pdu_number.is_some() || self.next_ext_header.is_some()
    }

    /// Decodes a v1 PDU from a byte stream.
    pub fn decode(stream: &[u8]) -> Result<Self, CodecError> {
        let mut view = OctetView::new(stream);
        let flags = view.read_u8()?;
        let version = flags >> 5;
        if version > 1 {
            return Err(CodecError::WrongVersion(version));
        }
        let protocol_type = flags & V1_F_PROTOCOL_TYPE != 0;
        let has_ext = flags & V1_F_EXT_HEADER != 0;
        let has_seq = flags & V1_F_SEQ != 0;
        let has_n_pdu = flags & V1_F_NPDU != 0;

        let msg_type = view.read_u8()?;
        let msg_length = view.read_u16()? as usize;
        let teid = view.read_u32()?;

        let mut sequence = None;
        let mut n_pdu_number = None;
        let mut next_ext_header = None;
        let mut data_length = msg_length;
        if has_ext || has_seq || has_n_pdu {
            if msg_length < 4 {
                return Err(CodecError::Truncated {
                    needed: 4,
                    available: msg_length,
                });
            }
            let group = view.read_u32()?;
            data_length -= 4;
            if has_seq {
                sequence = Some((group >> 16) as u16);
            }
            if has_n_pdu {
                n_pdu_number = Some((group >> 8) as u8);
            }
            if has_ext {
                next_ext_header = Some(group as u8);
            }
        }

        let data = view.read_bytes(data_length)?;
        let payload = if msg_type == V1_TUNNEL_MSG_TYPE {
            V1Payload::Tunnel(Bytes::copy_from_slice(data))
        } else if data.is_empty() {
            V1Payload::Ies(Vec::new())
        } else {
            let mut ie_view = OctetView::new(data);
            V1Payload::Ies(V1Ie::decode_all(&mut ie_view)?)
        };

        Ok(Self {
            version,
            protocol_type,
            msg_type,
            teid,
            sequence,
            n_pdu_number,
            next_ext_header,
            payload,
        })
    }

    /// Encodes the PDU.
    ///
    /// # Errors
    ///
    /// `IeLengthOverflow` when the body exceeds the 16-bit length field.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut body = BytesMut::new();
        match &self.payload {
            V1Payload::Tunnel(data) => body.put_slice(data),
            V1Payload::Ies(ies) => {
                for ie in ies {
                    ie.encode_to(&mut body)?;
                }
            }
        }

        let optional = self.has_optional_group();
        let msg_length = body.len() + if optional { 4 } else { 0 };
        if msg_length > u16::MAX as usize {
            return Err(CodecError::IeLengthOverflow(msg_length));
        }

        let mut flags = (self.version << 5)
            | if self.protocol_type { V1_F_PROTOCOL_TYPE } else { 0 };
        if self.next_ext_header.is_some() {
            flags |= V1_F_EXT_HEADER;
        }
        if self.sequence.is_some() {
            flags |= V1_F_SEQ;
        }
        if self.n_pdu_number.is_some() {
            flags |= V1_F_NPDU;
        }

        let mut buf = OctetWriter::with_capacity(8 + msg_length);
        buf.put_u8(flags);
        buf.put_u8(self.msg_type);
        buf.put_u16(msg_length as u16);
        buf.put_u32(self.teid);
        if optional {
            let group = (u32::from(self.sequence.unwrap_or(0)) << 16)
                | (u32::from(self.n_pdu_number.unwrap_or(0)) << 8)
                | u32::from(self.next_ext_header.unwrap_or(0));
            buf.put_u32(group);
        }
        buf.put_slice(&body);
        Ok(buf.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{v1_ie, v1_msg};

    // G-PDU from a capture: TEID 1, sequence 0x28db, 84 tunnelled bytes.
    const G_PDU_VECTOR: [u8; 96] = [
        0x32, 0xff, 0x00, 0x58, 0x00, 0x00, 0x00, 0x01, 0x28, 0xdb, 0x00, 0x00, 0x45, 0x00, 0x00,
        0x54, 0x00, 0x00, 0x40, 0x00, 0x40, 0x01, 0x5e, 0xa5, 0xca, 0x0b, 0x28, 0x9e, 0xc0, 0xa8,
        0x28, 0xb2, 0x08, 0x00, 0xbe, 0xe7, 0x00, 0x00, 0x28, 0x7b, 0x04, 0x11, 0x20, 0x4b, 0xf4,
        0x3d, 0x0d, 0x00, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13,
        0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, 0x20, 0x21, 0x22,
        0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2a, 0x2b, 0x2c, 0x2d, 0x2e, 0x2f, 0x30, 0x31,
        0x32, 0x33, 0x34, 0x35, 0x36, 0x37,
    ];

    // Error Indication with a TV IE (TEID Data I) and a TLV IE (GSN Address).
    const ERROR_INDICATION_VECTOR: [u8; 24] = [
        0x32, 0x1a, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0xe4, 0x03,
        0xfb, 0x94, 0x85, 0x00, 0x04, 0xac, 0x13, 0x01, 0xc6,
    ];

    #[test]
    fn test_decode_g_pdu() {
        let pdu = V1Pdu::decode(&G_PDU_VECTOR).unwrap();
        assert_eq!(pdu.version, 1);
        assert!(pdu.protocol_type);
        assert_eq!(pdu.msg_type, V1_TUNNEL_MSG_TYPE);
        assert_eq!(pdu.teid, 1);
        assert_eq!(pdu.sequence, Some(0x28db));
        assert_eq!(pdu.n_pdu_number, None);
        assert_eq!(pdu.next_ext_header, None);
        match &pdu.payload {
            V1Payload::Tunnel(data) => assert_eq!(data.len(), 84),
            V1Payload::Ies(_) => panic!("tunnel payload expected"),
        }
    }

    #[test]
    fn test_g_pdu_round_trip() {
        let pdu = V1Pdu::decode(&G_PDU_VECTOR).unwrap();
        assert_eq!(pdu.encode().unwrap(), &G_PDU_VECTOR[..]);
    }

    #[test]
    fn test_decode_error_indication_ies() {
        let pdu = V1Pdu::decode(&ERROR_INDICATION_VECTOR).unwrap();
        assert_eq!(pdu.msg_type, v1_msg::ERROR_INDICATION);
        assert_eq!(pdu.teid, 0);
        assert_eq!(pdu.sequence, Some(0));

        let ies = pdu.ies();
        assert_eq!(ies.len(), 2);
        assert_eq!(ies[0].type_id, v1_ie::TEID_DATA_I);
        assert_eq!(&ies[0].data[..], &[0xe4, 0x03, 0xfb, 0x94]);
        assert_eq!(ies[1].type_id, v1_ie::GSN_ADDRESS);
        assert_eq!(&ies[1].data[..], &[0xac, 0x13, 0x01, 0xc6]);
    }

    #[test]
    fn test_error_indication_round_trip() {
        let pdu = V1Pdu::decode(&ERROR_INDICATION_VECTOR).unwrap();
        assert_eq!(pdu.encode().unwrap(), &ERROR_INDICATION_VECTOR[..]);
    }

    #[test]
    fn test_builder_round_trip() {
        let pdu = V1Pdu::new(
            v1_msg::ECHO_RESPONSE,
            0x11223344,
            vec![V1Ie::new(v1_ie::RECOVERY, vec![0x07])],
        )
        .with_sequence(0xBEEF);

        let encoded = pdu.encode().unwrap();
        let decoded = V1Pdu::decode(&encoded).unwrap();
        assert_eq!(decoded, pdu);
    }

    #[test]
    fn test_g_pdu_payload_is_never_ie_parsed() {
        // tunnel bytes that would be garbage as IEs
        let pdu = V1Pdu::g_pdu(7, vec![0x42, 0x00, 0x00]);
        let encoded = pdu.encode().unwrap();
        let decoded = V1Pdu::decode(&encoded).unwrap();
        assert!(matches!(decoded.payload, V1Payload::Tunnel(ref d) if d.len() == 3));
    }

    #[test]
    fn test_n_pdu_flag_reads_its_own_bit() {
        // PN set without E: the optional group carries only the N-PDU number
        let pdu = V1Pdu::g_pdu(1, vec![0xAA]).with_n_pdu_number(0x5C);
        let encoded = pdu.encode().unwrap();
        assert_eq!(encoded[0] & (V1_F_NPDU | V1_F_EXT_HEADER | V1_F_SEQ), V1_F_NPDU);

        let decoded = V1Pdu::decode(&encoded).unwrap();
        assert_eq!(decoded.n_pdu_number, Some(0x5C));
        assert_eq!(decoded.sequence, None);
        assert_eq!(decoded.next_ext_header, None);
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            V1Pdu::decode(&[0x32, 0xff, 0x00]),
            Err(CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn test_truncated_body() {
        // length field claims 16 bytes, none present
        let raw = [0x30, 0x01, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(
            V1Pdu::decode(&raw),
            Err(CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn test_version_2_rejected() {
        let mut raw = G_PDU_VECTOR;
        raw[0] = 0x48;
        assert!(matches!(
            V1Pdu::decode(&raw),
            Err(CodecError::WrongVersion(2))
        ));
    }
}
