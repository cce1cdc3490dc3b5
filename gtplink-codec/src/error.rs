//! GTP codec errors

use gtplink_common::TruncatedError;
use thiserror::Error;

/// GTP codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input ended before the structure was complete
    #[error("truncated input: need {needed} more bytes, have {available}")]
    Truncated {
        /// Number of bytes needed
        needed: usize,
        /// Number of bytes available
        available: usize,
    },
    /// Version bits do not match any decodable GTP version
    #[error("wrong GTP version: {0}")]
    WrongVersion(u8),
    /// Stream carries bytes past the end of a non-piggybacked PDU
    #[error("stream has {actual} bytes but the PDU ends at {expected}")]
    ExtraBytes {
        /// Offset where the PDU ends
        expected: usize,
        /// Total stream length
        actual: usize,
    },
    /// Message name not present in the catalog
    #[error("unknown message [{name}]")]
    UnknownMessage {
        /// The requested name
        name: String,
    },
    /// GTPv1 TV-format IE whose fixed size the catalog does not know
    #[error("unknown GTPv1 IE type {0}")]
    UnknownV1Ie(u8),
    /// IMSI digit string or BCD encoding is malformed
    #[error("invalid IMSI: {0}")]
    InvalidImsi(String),
    /// F-TEID flag bits disagree with the data length
    #[error("invalid F-TEID: {0}")]
    InvalidFteid(String),
    /// An IE value or PDU body exceeds the 16-bit length field
    #[error("encoded length {0} exceeds the 16-bit length field")]
    IeLengthOverflow(usize),
    /// A piggybacked PDU itself carries the piggyback flag
    #[error("piggybacked PDU has its own piggyback flag set")]
    NestedPiggyback,
}

impl From<TruncatedError> for CodecError {
    fn from(err: TruncatedError) -> Self {
        CodecError::Truncated {
            needed: err.needed,
            available: err.available,
        }
    }
}
