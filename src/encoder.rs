//! Append-only MessagePack encoder
//!
//! Every `put_*` call appends exactly one value (or, for arrays and maps, one
//! length header) using the smallest encoding the format allows. Nothing is
//! appended when a call fails.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::marker::Marker;
use crate::value::{Integer, Repr};

/// Encoder that accumulates MessagePack bytes in an owned buffer
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

/// Length as a wire-sized u32, or `Overflow`
#[inline]
fn wire_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        tracing::debug!(len, "length does not fit a 32-bit length field");
        Error::Overflow
    })
}

impl Encoder {
    /// Create an empty encoder
    #[inline]
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Create an encoder with room for `capacity` bytes
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    fn put_marker(&mut self, marker: Marker) {
        self.buf.push(marker.to_u8());
    }

    #[inline]
    fn put_be<const N: usize>(&mut self, marker: Marker, bytes: [u8; N]) {
        self.buf.reserve(1 + N);
        self.put_marker(marker);
        self.buf.extend_from_slice(&bytes);
    }

    /// Header for a payload length using the 8/16/32-bit tag triple
    #[inline]
    fn put_len_header(&mut self, len: u32, tags: [Marker; 3]) {
        if len <= u8::MAX as u32 {
            self.put_be(tags[0], [len as u8]);
        } else if len <= u16::MAX as u32 {
            self.put_be(tags[1], (len as u16).to_be_bytes());
        } else {
            self.put_be(tags[2], len.to_be_bytes());
        }
    }

    /// Write a nil
    #[inline]
    pub fn put_nil(&mut self) {
        self.put_marker(Marker::Nil);
    }

    /// Write a boolean
    #[inline]
    pub fn put_bool(&mut self, value: bool) {
        self.put_marker(if value { Marker::True } else { Marker::False });
    }

    /// Write a non-negative integer in its smallest encoding
    pub fn put_uint(&mut self, value: u64) {
        if value <= Marker::FIXINT_MAX as u64 {
            self.put_marker(Marker::FixPos(value as u8));
        } else if value <= u8::MAX as u64 {
            self.put_be(Marker::U8, [value as u8]);
        } else if value <= u16::MAX as u64 {
            self.put_be(Marker::U16, (value as u16).to_be_bytes());
        } else if value <= u32::MAX as u64 {
            self.put_be(Marker::U32, (value as u32).to_be_bytes());
        } else {
            self.put_be(Marker::U64, value.to_be_bytes());
        }
    }

    /// Write a signed integer in its smallest encoding
    ///
    /// Non-negative values use the unsigned families, like [`put_uint`](Self::put_uint).
    pub fn put_int(&mut self, value: i64) {
        if value >= 0 {
            self.put_uint(value as u64);
        } else if value >= Marker::FIXNEG_MIN as i64 {
            self.put_marker(Marker::FixNeg(value as i8));
        } else if value >= i8::MIN as i64 {
            self.put_be(Marker::I8, (value as i8).to_be_bytes());
        } else if value >= i16::MIN as i64 {
            self.put_be(Marker::I16, (value as i16).to_be_bytes());
        } else if value >= i32::MIN as i64 {
            self.put_be(Marker::I32, (value as i32).to_be_bytes());
        } else {
            self.put_be(Marker::I64, value.to_be_bytes());
        }
    }

    /// Write any [`Integer`]
    #[inline]
    pub fn put_integer(&mut self, value: Integer) {
        match value.0 {
            Repr::PosInt(n) => self.put_uint(n),
            Repr::NegInt(n) => self.put_int(n),
        }
    }

    /// Write a float 32
    #[inline]
    pub fn put_f32(&mut self, value: f32) {
        self.put_be(Marker::F32, value.to_be_bytes());
    }

    /// Write a float 64
    #[inline]
    pub fn put_f64(&mut self, value: f64) {
        self.put_be(Marker::F64, value.to_be_bytes());
    }

    /// Write a UTF-8 string
    pub fn put_str(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        let len = wire_len(bytes.len())?;

        self.buf.reserve(5 + bytes.len());
        if bytes.len() <= Marker::FIXSTR_MAX {
            self.put_marker(Marker::FixStr(len as u8));
        } else {
            self.put_len_header(len, [Marker::Str8, Marker::Str16, Marker::Str32]);
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Write a binary blob (bin has no inline-length form)
    pub fn put_bin(&mut self, value: &[u8]) -> Result<()> {
        let len = wire_len(value.len())?;

        self.buf.reserve(5 + value.len());
        self.put_len_header(len, [Marker::Bin8, Marker::Bin16, Marker::Bin32]);
        self.buf.extend_from_slice(value);
        Ok(())
    }

    /// Write an array header for `len` elements
    ///
    /// The elements themselves are written by the caller's next `put_*` calls.
    pub fn put_array_len(&mut self, len: usize) -> Result<()> {
        let len = wire_len(len)?;
        if len as usize <= Marker::FIXCOLLECTION_MAX {
            self.put_marker(Marker::FixArray(len as u8));
        } else if len <= u16::MAX as u32 {
            self.put_be(Marker::Array16, (len as u16).to_be_bytes());
        } else {
            self.put_be(Marker::Array32, len.to_be_bytes());
        }
        Ok(())
    }

    /// Write a map header for `len` key-value pairs
    pub fn put_map_len(&mut self, len: usize) -> Result<()> {
        let len = wire_len(len)?;
        if len as usize <= Marker::FIXCOLLECTION_MAX {
            self.put_marker(Marker::FixMap(len as u8));
        } else if len <= u16::MAX as u32 {
            self.put_be(Marker::Map16, (len as u16).to_be_bytes());
        } else {
            self.put_be(Marker::Map32, len.to_be_bytes());
        }
        Ok(())
    }

    /// Write an extension value
    ///
    /// Payloads of 1, 2, 4, 8 or 16 bytes use the fixext tags. Empty payloads
    /// are rejected with [`Error::InvalidExtensionLength`].
    pub fn put_ext(&mut self, type_id: i8, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            tracing::debug!(type_id, "rejecting empty extension payload");
            return Err(Error::InvalidExtensionLength);
        }
        let len = wire_len(data.len())?;

        self.buf.reserve(6 + data.len());
        match Marker::fixext_for_len(data.len()) {
            Some(marker) => self.put_marker(marker),
            None => self.put_len_header(len, [Marker::Ext8, Marker::Ext16, Marker::Ext32]),
        }
        self.buf.extend_from_slice(&type_id.to_be_bytes());
        self.buf.extend_from_slice(data);
        Ok(())
    }

    /// Get current encoded length
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Get a slice of the encoded data
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Reset encoder for reuse, keeping the allocation
    #[inline]
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Snapshot of the encoded bytes, with `rest` appended if given
    ///
    /// `rest` is typically [`Decoder::get_rest`](crate::Decoder::get_rest)
    /// from a session whose tail is forwarded untouched.
    pub fn dump(&self, rest: Option<&[u8]>) -> Vec<u8> {
        let rest = rest.unwrap_or_default();
        let mut out = Vec::with_capacity(self.buf.len() + rest.len());
        out.extend_from_slice(&self.buf);
        out.extend_from_slice(rest);
        out
    }

    /// Consume the encoder and return its buffer
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

impl AsRef<[u8]> for Encoder {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl From<Encoder> for Vec<u8> {
    fn from(encoder: Encoder) -> Self {
        encoder.buf
    }
}
