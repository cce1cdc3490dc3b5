//! Typed Information Element adapters
//!
//! Bidirectional mappings between raw IE value bytes and structured
//! forms. Only a handful of the 255 GTPv2 IE types get a typed adapter;
//! everything else travels as raw [`V2Ie`] bytes.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use bytes::{BufMut, Bytes, BytesMut};

use crate::catalog::v2_ie;
use crate::error::CodecError;
use crate::ie::V2Ie;

/// Maximum number of IMSI digits (TS 23.003).
pub const IMSI_MAX_DIGITS: usize = 15;

/// An International Mobile Subscriber Identity.
///
/// A string of 1-15 decimal digits. On the wire the digits are
/// nibble-swapped BCD, low nibble first, with an 0xF filler in the high
/// nibble of the last byte for odd digit counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Imsi {
    digits: String,
}

impl Imsi {
    /// Creates an IMSI from a digit string.
    ///
    /// # Errors
    ///
    /// `InvalidImsi` when the string is empty, longer than 15 digits, or
    /// contains a non-digit.
    pub fn new(digits: &str) -> Result<Self, CodecError> {
        if digits.is_empty() || digits.len() > IMSI_MAX_DIGITS {
            return Err(CodecError::InvalidImsi(format!(
                "expected 1-{IMSI_MAX_DIGITS} digits, got {}",
                digits.len()
            )));
        }
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(CodecError::InvalidImsi(format!("non-digit character {c:?}")));
        }
        Ok(Self {
            digits: digits.to_string(),
        })
    }

    /// The digit string.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Encodes the digits as nibble-swapped BCD.
    pub fn encode(&self) -> Bytes {
        let digits = self.digits.as_bytes();
        let mut buf = BytesMut::with_capacity(digits.len().div_ceil(2));
        for pair in digits.chunks(2) {
            let low = pair[0] - b'0';
            let high = if pair.len() == 2 { pair[1] - b'0' } else { 0x0F };
            buf.put_u8((high << 4) | low);
        }
        buf.freeze()
    }

    /// Decodes nibble-swapped BCD into a digit string.
    ///
    /// # Errors
    ///
    /// `InvalidImsi` on empty data, more than 15 digits, or any non-digit
    /// nibble other than a trailing 0xF filler.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        if data.is_empty() {
            return Err(CodecError::InvalidImsi("empty value".into()));
        }
        let mut digits = String::with_capacity(data.len() * 2);
        for (i, byte) in data.iter().enumerate() {
            let low = byte & 0x0F;
            let high = byte >> 4;
            if low > 9 {
                return Err(CodecError::InvalidImsi(format!(
                    "non-digit nibble {low:#x} in byte {i}"
                )));
            }
            digits.push((b'0' + low) as char);
            if high > 9 {
                if high == 0x0F && i == data.len() - 1 {
                    break;
                }
                return Err(CodecError::InvalidImsi(format!(
                    "non-digit nibble {high:#x} in byte {i}"
                )));
            }
            digits.push((b'0' + high) as char);
        }
        Self::new(&digits)
    }

    /// Wraps the encoded digits in an IMSI IE.
    pub fn to_ie(&self) -> V2Ie {
        V2Ie::with_raw_data(v2_ie::IMSI, self.encode())
    }

    /// Extracts an IMSI from an IE's value bytes.
    pub fn from_ie(ie: &V2Ie) -> Result<Self, CodecError> {
        Self::decode(&ie.data)
    }
}

impl fmt::Display for Imsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits)
    }
}

/// A Fully Qualified Tunnel Endpoint Identifier.
///
/// The first value byte carries the IPv4/IPv6 presence bits (7 and 6) and
/// a 6-bit interface type; then the 32-bit TEID/GRE key, then the
/// addresses that are present, IPv4 before IPv6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fteid {
    /// Interface type (6 bits, TS 29.274 §8.22)
    pub interface_type: u8,
    /// TEID or GRE key
    pub key: u32,
    /// IPv4 address, if present
    pub ipv4: Option<Ipv4Addr>,
    /// IPv6 address, if present
    pub ipv6: Option<Ipv6Addr>,
}

impl Fteid {
    const V4_FLAG: u8 = 0x80;
    const V6_FLAG: u8 = 0x40;

    /// Creates an F-TEID with no addresses.
    pub fn new(interface_type: u8, key: u32) -> Self {
        Self {
            interface_type: interface_type & 0x3F,
            key,
            ipv4: None,
            ipv6: None,
        }
    }

    /// Sets the IPv4 address.
    pub fn with_ipv4(mut self, addr: Ipv4Addr) -> Self {
        self.ipv4 = Some(addr);
        self
    }

    /// Sets the IPv6 address.
    pub fn with_ipv6(mut self, addr: Ipv6Addr) -> Self {
        self.ipv6 = Some(addr);
        self
    }

    /// Encodes the F-TEID value bytes.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(25);
        let mut flags = self.interface_type & 0x3F;
        if self.ipv4.is_some() {
            flags |= Self::V4_FLAG;
        }
        if self.ipv6.is_some() {
            flags |= Self::V6_FLAG;
        }
        buf.put_u8(flags);
        buf.put_u32(self.key);
        if let Some(addr) = self.ipv4 {
            buf.put_slice(&addr.octets());
        }
        if let Some(addr) = self.ipv6 {
            buf.put_slice(&addr.octets());
        }
        buf.freeze()
    }

    /// Decodes F-TEID value bytes.
    ///
    /// # Errors
    ///
    /// `InvalidFteid` when the data length does not match the presence
    /// bits exactly.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        if data.len() < 5 {
            return Err(CodecError::InvalidFteid(format!(
                "value is {} bytes, need at least 5",
                data.len()
            )));
        }
        let flags = data[0];
        let has_v4 = flags & Self::V4_FLAG != 0;
        let has_v6 = flags & Self::V6_FLAG != 0;
        let expected = 5 + if has_v4 { 4 } else { 0 } + if has_v6 { 16 } else { 0 };
        if data.len() != expected {
            return Err(CodecError::InvalidFteid(format!(
                "flags {flags:#04x} require {expected} bytes, value is {}",
                data.len()
            )));
        }

        let key = u32::from_be_bytes([data[1], data[2], data[3], data[4]]);
        let mut offset = 5;
        let ipv4 = if has_v4 {
            let mut octets = [0u8; 4];
            octets.copy_from_slice(&data[offset..offset + 4]);
            offset += 4;
            Some(Ipv4Addr::from(octets))
        } else {
            None
        };
        let ipv6 = if has_v6 {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&data[offset..offset + 16]);
            Some(Ipv6Addr::from(octets))
        } else {
            None
        };

        Ok(Self {
            interface_type: flags & 0x3F,
            key,
            ipv4,
            ipv6,
        })
    }

    /// Wraps the encoded value in an F-TEID IE.
    pub fn to_ie(&self) -> V2Ie {
        V2Ie::with_raw_data(v2_ie::FTEID, self.encode())
    }

    /// Wraps the encoded value in an F-TEID IE with an instance number.
    pub fn to_ie_with_instance(&self, instance: u8) -> V2Ie {
        V2Ie::new(v2_ie::FTEID, instance, self.encode())
    }

    /// Extracts an F-TEID from an IE's value bytes.
    pub fn from_ie(ie: &V2Ie) -> Result<Self, CodecError> {
        Self::decode(&ie.data)
    }
}

/// Builds a BearerContext grouped IE from child IEs.
///
/// # Errors
///
/// `IeLengthOverflow` when the children exceed the 16-bit length field.
pub fn bearer_context(children: &[V2Ie]) -> Result<V2Ie, CodecError> {
    V2Ie::grouped(v2_ie::BEARER_CONTEXT, children)
}
