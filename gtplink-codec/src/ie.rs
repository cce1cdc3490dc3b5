//! Information Element codecs
//!
//! GTPv1 IEs come in two encodings selected by the high bit of the type
//! octet: TV (fixed-size value, size known only from the catalog) and TLV
//! (explicit 16-bit length). GTPv2 IEs are uniformly TLIV: type, data-only
//! length, a spare/instance octet whose low nibble is the instance number,
//! then the value.
//!
//! Grouped GTPv2 IEs (BearerContext and friends) keep their value as raw
//! bytes; the decoder validates them recursively against the catalog's
//! grouped set, [`V2Ie::parse_children`] recurses into them and
//! [`V2Ie::grouped`] builds them from child IEs.

use bytes::{BufMut, Bytes, BytesMut};
use gtplink_common::OctetView;

use crate::catalog;
use crate::error::CodecError;

/// Size of the GTPv2 IE header: type, length, spare/instance.
pub const V2_IE_HEADER_LEN: usize = 4;

/// High bit of the GTPv1 IE type octet; set means TLV.
pub const V1_IE_TLV_FLAG: u8 = 0x80;

/// A GTPv1 Information Element.
///
/// The value is kept as raw bytes; whether the type encodes as TV or TLV
/// follows from the type id alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V1Ie {
    /// IE type id
    pub type_id: u8,
    /// Value bytes
    pub data: Bytes,
}

impl V1Ie {
    /// Creates an IE from a type id and value bytes.
    pub fn new(type_id: u8, data: impl Into<Bytes>) -> Self {
        Self {
            type_id,
            data: data.into(),
        }
    }

    /// True when the type encodes as TLV (high bit set).
    pub fn is_tlv(&self) -> bool {
        self.type_id & V1_IE_TLV_FLAG != 0
    }

    /// Encoded size on the wire.
    pub fn encoded_len(&self) -> usize {
        if self.is_tlv() {
            3 + self.data.len()
        } else {
            1 + self.data.len()
        }
    }

    /// Decodes one IE from the cursor.
    ///
    /// # Errors
    ///
    /// `UnknownV1Ie` for a TV type the catalog has no size for,
    /// `Truncated` when the value overruns the input.
    pub fn decode(view: &mut OctetView<'_>) -> Result<Self, CodecError> {
        let type_id = view.read_u8()?;
        let length = if type_id & V1_IE_TLV_FLAG == 0 {
            let desc =
                catalog::v1_ie_descriptor(type_id).ok_or(CodecError::UnknownV1Ie(type_id))?;
            desc.tv_size as usize
        } else {
            view.read_u16()? as usize
        };
        let data = view.read_bytes(length)?;
        Ok(Self {
            type_id,
            data: Bytes::copy_from_slice(data),
        })
    }

    /// Decodes IEs from the cursor until it is exhausted.
    pub fn decode_all(view: &mut OctetView<'_>) -> Result<Vec<Self>, CodecError> {
        let mut ies = Vec::new();
        while view.has_next() {
            ies.push(Self::decode(view)?);
        }
        Ok(ies)
    }

    /// Encodes the IE into `buf`.
    ///
    /// # Errors
    ///
    /// `IeLengthOverflow` when a TLV value exceeds 65535 bytes.
    pub fn encode_to(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u8(self.type_id);
        if self.is_tlv() {
            if self.data.len() > u16::MAX as usize {
                return Err(CodecError::IeLengthOverflow(self.data.len()));
            }
            buf.put_u16(self.data.len() as u16);
        }
        buf.put_slice(&self.data);
        Ok(())
    }
}

/// A GTPv2 Information Element.
///
/// `instance` distinguishes repeated IEs of the same type within one
/// message and occupies only the low 4 bits on the wire; the high nibble
/// is spare and ignored on decode. The value length is recomputed from
/// `data` at encode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V2Ie {
    /// IE type id
    pub type_id: u8,
    /// Instance number (4 bits)
    pub instance: u8,
    /// Value bytes
    pub data: Bytes,
}

impl V2Ie {
    /// Creates an IE with an explicit instance number.
    pub fn new(type_id: u8, instance: u8, data: impl Into<Bytes>) -> Self {
        Self {
            type_id,
            instance: instance & 0x0F,
            data: data.into(),
        }
    }

    /// Creates an instance-0 IE from raw value bytes.
    pub fn with_raw_data(type_id: u8, data: impl Into<Bytes>) -> Self {
        Self::new(type_id, 0, data)
    }

    /// Builds a grouped IE whose value is the concatenation of the
    /// children's encodings, in order.
    ///
    /// # Errors
    ///
    /// `IeLengthOverflow` when the summed child encodings exceed 65535
    /// bytes.
    pub fn grouped(type_id: u8, children: &[V2Ie]) -> Result<Self, CodecError> {
        let total: usize = children.iter().map(V2Ie::total_len).sum();
        if total > u16::MAX as usize {
            return Err(CodecError::IeLengthOverflow(total));
        }
        let mut buf = BytesMut::with_capacity(total);
        for child in children {
            child.encode_to(&mut buf)?;
        }
        Ok(Self::with_raw_data(type_id, buf.freeze()))
    }

    /// Total wire length: value length plus the 4-byte header.
    pub fn total_len(&self) -> usize {
        self.data.len() + V2_IE_HEADER_LEN
    }

    /// Decodes one IE from the cursor.
    ///
    /// For types the catalog marks as grouped, the value is additionally
    /// required to parse as a well-formed sequence of nested IEs; a child
    /// overrunning the parent's length fails with `Truncated`.
    pub fn decode(view: &mut OctetView<'_>) -> Result<Self, CodecError> {
        if view.remaining() < V2_IE_HEADER_LEN {
            return Err(CodecError::Truncated {
                needed: V2_IE_HEADER_LEN,
                available: view.remaining(),
            });
        }
        let type_id = view.read_u8()?;
        let length = view.read_u16()? as usize;
        let instance = view.read_u8()? & 0x0F;
        let data = view.read_bytes(length)?;
        let ie = Self {
            type_id,
            instance,
            data: Bytes::copy_from_slice(data),
        };
        if catalog::is_grouped_v2_ie(ie.type_id) {
            ie.parse_children()?;
        }
        Ok(ie)
    }

    /// Decodes IEs from the cursor until it is exhausted.
    pub fn decode_all(view: &mut OctetView<'_>) -> Result<Vec<Self>, CodecError> {
        let mut ies = Vec::new();
        while view.has_next() {
            ies.push(Self::decode(view)?);
        }
        Ok(ies)
    }

    /// Encodes the IE into `buf`.
    ///
    /// # Errors
    ///
    /// `IeLengthOverflow` when the value exceeds 65535 bytes.
    pub fn encode_to(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        if self.data.len() > u16::MAX as usize {
            return Err(CodecError::IeLengthOverflow(self.data.len()));
        }
        buf.put_u8(self.type_id);
        buf.put_u16(self.data.len() as u16);
        buf.put_u8(self.instance & 0x0F);
        buf.put_slice(&self.data);
        Ok(())
    }

    /// Parses the value of a grouped IE into its nested IEs.
    ///
    /// # Errors
    ///
    /// `Truncated` when a child overruns the parent's value.
    pub fn parse_children(&self) -> Result<Vec<V2Ie>, CodecError> {
        let mut view = OctetView::new(&self.data);
        Self::decode_all(&mut view)
    }

    /// Catalog name of the IE type.
    pub fn type_name(&self) -> &'static str {
        catalog::v2_ie_name(self.type_id)
    }
}
