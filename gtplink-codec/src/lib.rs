//! GTPv1/GTPv2 codec library
//!
//! Bit-exact decoding and encoding of GTP (GPRS Tunnelling Protocol) PDUs
//! and their Information Elements, per 3GPP TS 29.060 (v1) and TS 29.274
//! (v2), plus a read-only catalog of message and IE descriptors keyed by
//! the 3GPP identifiers.
//!
//! The two wire formats share nothing beyond the version bits in the
//! first octet, so they live in separate modules and meet in the [`Pdu`]
//! tagged variant, which dispatches on those bits.
//!
//! # Example
//!
//! ```
//! use gtplink_codec::{catalog, Pdu, PduIes};
//! use gtplink_codec::ie::V2Ie;
//!
//! // Build an Echo Response through the catalog
//! let desc = catalog::message_by_name("Echo Response").unwrap();
//! let ies = vec![V2Ie::with_raw_data(catalog::v2_ie::RECOVERY, vec![0x07])];
//! let pdu = desc.to_pdu(0x1acc, 0, PduIes::V2(ies)).unwrap();
//!
//! // Encode and decode round-trip
//! let bytes = pdu.encode().unwrap();
//! let decoded = Pdu::decode(&bytes).unwrap();
//! assert_eq!(decoded.sequence(), 0x1acc);
//! assert_eq!(decoded.msg_type(), catalog::v2_msg::ECHO_RESPONSE);
//! ```

pub mod catalog;
pub mod error;
pub mod ie;
pub mod typed;
pub mod v1;
pub mod v2;

pub use error::CodecError;
pub use ie::{V1Ie, V2Ie};
pub use v1::{V1Payload, V1Pdu};
pub use v2::V2Pdu;

use catalog::MessageDescriptor;

/// GTP protocol versions.
///
/// GTPv0 shares the v1 frame layout here; only the version bits differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GtpVersion {
    /// GTPv0 (legacy, v1 framing)
    V0,
    /// GTPv1 (TS 29.060)
    V1,
    /// GTPv2-C (TS 29.274)
    V2,
}

impl GtpVersion {
    /// Derives the version from a PDU's first octet.
    pub fn from_flags(flags: u8) -> Result<Self, CodecError> {
        match flags >> 5 {
            0 => Ok(GtpVersion::V0),
            1 => Ok(GtpVersion::V1),
            2 => Ok(GtpVersion::V2),
            v => Err(CodecError::WrongVersion(v)),
        }
    }
}

/// IEs for building a PDU through a [`MessageDescriptor`].
///
/// The variant has to match the descriptor's version; `None` works with
/// either.
#[derive(Debug, Clone, Default)]
pub enum PduIes {
    /// No IEs
    #[default]
    None,
    /// GTPv1 IE list
    V1(Vec<V1Ie>),
    /// GTPv2 IE list
    V2(Vec<V2Ie>),
}

/// A decoded GTP PDU of either version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pdu {
    /// GTPv0/GTPv1 PDU
    V1(V1Pdu),
    /// GTPv2-C PDU
    V2(V2Pdu),
}

impl Pdu {
    /// Decodes a PDU, dispatching on the version bits of the first octet.
    pub fn decode(stream: &[u8]) -> Result<Self, CodecError> {
        let flags = *stream.first().ok_or(CodecError::Truncated {
            needed: 1,
            available: 0,
        })?;
        match GtpVersion::from_flags(flags)? {
            GtpVersion::V0 | GtpVersion::V1 => Ok(Pdu::V1(V1Pdu::decode(stream)?)),
            GtpVersion::V2 => Ok(Pdu::V2(V2Pdu::decode(stream)?)),
        }
    }

    /// Encodes the PDU.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            Pdu::V1(pdu) => pdu.encode(),
            Pdu::V2(pdu) => pdu.encode(),
        }
    }

    /// Protocol version of the PDU.
    pub fn version(&self) -> GtpVersion {
        match self {
            Pdu::V1(pdu) if pdu.version == 0 => GtpVersion::V0,
            Pdu::V1(_) => GtpVersion::V1,
            Pdu::V2(_) => GtpVersion::V2,
        }
    }

    /// Message type octet.
    pub fn msg_type(&self) -> u8 {
        match self {
            Pdu::V1(pdu) => pdu.msg_type,
            Pdu::V2(pdu) => pdu.msg_type,
        }
    }

    /// Sequence number widened to 32 bits; 0 when absent.
    ///
    /// Sequence numbers are 16 bits in v1 and 24 bits in v2.
    pub fn sequence(&self) -> u32 {
        match self {
            Pdu::V1(pdu) => u32::from(pdu.sequence.unwrap_or(0)),
            Pdu::V2(pdu) => pdu.sequence,
        }
    }

    /// TEID; 0 when the v2 TEID field is absent.
    pub fn teid(&self) -> u32 {
        match self {
            Pdu::V1(pdu) => pdu.teid,
            Pdu::V2(pdu) => pdu.teid.unwrap_or(0),
        }
    }

    /// Catalog descriptor for the message type, if registered.
    pub fn descriptor(&self) -> Option<&'static MessageDescriptor> {
        catalog::message(self.version(), self.msg_type())
    }
}

impl MessageDescriptor {
    /// Builds a PDU of this message type.
    ///
    /// The sequence number is masked to the version's width (16 bits for
    /// v1, 24 for v2). A zero TEID leaves the v2 TEID field absent; v1
    /// always carries its TEID field.
    ///
    /// # Errors
    ///
    /// [`CodecError::WrongVersion`] when the IE list variant does not
    /// match the descriptor's version.
    pub fn to_pdu(&self, sequence: u32, teid: u32, ies: PduIes) -> Result<Pdu, CodecError> {
        match self.version {
            GtpVersion::V0 | GtpVersion::V1 => {
                let ies = match ies {
                    PduIes::None => Vec::new(),
                    PduIes::V1(ies) => ies,
                    PduIes::V2(_) => return Err(CodecError::WrongVersion(2)),
                };
                Ok(Pdu::V1(
                    V1Pdu::new(self.id, teid, ies).with_sequence(sequence as u16),
                ))
            }
            GtpVersion::V2 => {
                let ies = match ies {
                    PduIes::None => Vec::new(),
                    PduIes::V2(ies) => ies,
                    PduIes::V1(_) => return Err(CodecError::WrongVersion(1)),
                };
                let mut pdu = V2Pdu::new(self.id, sequence, ies);
                if teid != 0 {
                    pdu = pdu.with_teid(teid);
                }
                Ok(Pdu::V2(pdu))
            }
        }
    }

    /// Builds and encodes a PDU of this message type in one step.
    pub fn encode(&self, sequence: u32, teid: u32, ies: PduIes) -> Result<Vec<u8>, CodecError> {
        self.to_pdu(sequence, teid, ies)?.encode()
    }
}
