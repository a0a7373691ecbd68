//! Caller-driven MessagePack decoder
//!
//! The decoder never guesses what comes next. The caller asks for a specific
//! kind with one of the `expect_*` methods; the decoder reads one tag byte and
//! either decodes the value or restores the cursor to that tag byte and fails
//! with [`Error::BadType`]. Strings, binaries and extension payloads are
//! returned as slices borrowing the input.

use crate::cursor::{ByteCursor, Width};
use crate::error::{Error, Result};
use crate::marker::Marker;
use crate::value::{Extension, Integer, Number, ValueKind};

/// Zero-copy MessagePack decoder over a borrowed buffer
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    cursor: ByteCursor<'a>,
}

/// Where a payload length comes from
#[derive(Debug, Clone, Copy)]
enum Len {
    /// Carried by the tag itself (fixstr, fixext)
    Implied(usize),
    /// Big-endian field of this width after the tag
    Prefixed(Width),
}

impl Len {
    #[inline]
    fn read(self, cursor: &mut ByteCursor<'_>) -> Result<usize> {
        match self {
            Len::Implied(len) => Ok(len),
            Len::Prefixed(width) => read_len(cursor, width),
        }
    }
}

/// Wire width of an explicit-width integer tag, and whether it is signed
#[inline]
const fn int_width(marker: Marker) -> Option<(Width, bool)> {
    match marker {
        Marker::U8 => Some((Width::W8, false)),
        Marker::U16 => Some((Width::W16, false)),
        Marker::U32 => Some((Width::W32, false)),
        Marker::U64 => Some((Width::W64, false)),
        Marker::I8 => Some((Width::W8, true)),
        Marker::I16 => Some((Width::W16, true)),
        Marker::I32 => Some((Width::W32, true)),
        Marker::I64 => Some((Width::W64, true)),
        _ => None,
    }
}

#[inline]
fn read_len(cursor: &mut ByteCursor<'_>, width: Width) -> Result<usize> {
    let len = cursor.get_uint(width)?;
    usize::try_from(len).map_err(|_| Error::Overflow)
}

#[inline]
fn read_int(cursor: &mut ByteCursor<'_>, width: Width, signed: bool) -> Result<Integer> {
    if signed {
        cursor.get_int(width).map(Integer::from)
    } else {
        cursor.get_uint(width).map(Integer::from)
    }
}

impl<'a> Decoder<'a> {
    /// Create new decoder for the given buffer
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(buf),
        }
    }

    /// Current read position
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Number of unread bytes
    #[inline]
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    /// Whether every byte has been consumed
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Unread bytes, for forwarding data outside the decode protocol
    #[inline]
    pub fn get_rest(&self) -> &'a [u8] {
        self.cursor.get_rest()
    }

    #[inline]
    fn read_marker(&mut self) -> Result<Marker> {
        self.cursor.get_u8().map(Marker::from_u8)
    }

    // Only valid directly after `read_marker`: the tag read is the history.
    fn mismatch<T>(&mut self, expected: ValueKind, marker: Marker) -> Result<T> {
        self.cursor.rollback()?;
        tracing::trace!(
            expected = %expected,
            tag = marker.to_u8(),
            position = self.cursor.position(),
            "tag mismatch, rolled back"
        );
        Err(Error::BadType(expected))
    }

    // Runs the payload read for an accepted tag. On failure the cursor goes
    // back to the tag byte at `start`.
    #[inline]
    fn payload<T>(
        &mut self,
        start: usize,
        read: impl FnOnce(&mut ByteCursor<'a>) -> Result<T>,
    ) -> Result<T> {
        match read(&mut self.cursor) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.cursor.rewind_to(start);
                tracing::trace!(error = %err, position = start, "payload read failed, rewound");
                Err(err)
            }
        }
    }

    /// Consume a nil if one is next
    ///
    /// Returns false, consuming nothing, for any other tag or at end of input.
    pub fn check_nil(&mut self) -> bool {
        match self.read_marker() {
            Ok(Marker::Nil) => true,
            Ok(_) => {
                // a tag was just read, so history is present
                let _ = self.cursor.rollback();
                false
            }
            Err(_) => false,
        }
    }

    /// Read a nil
    pub fn expect_nil(&mut self) -> Result<()> {
        match self.read_marker()? {
            Marker::Nil => Ok(()),
            other => self.mismatch(ValueKind::Nil, other),
        }
    }

    /// Read a boolean
    pub fn expect_bool(&mut self) -> Result<bool> {
        match self.read_marker()? {
            Marker::False => Ok(false),
            Marker::True => Ok(true),
            other => self.mismatch(ValueKind::Bool, other),
        }
    }

    /// Read a bin 8/16/32 payload without copying
    pub fn expect_bin(&mut self) -> Result<&'a [u8]> {
        let start = self.position();
        let width = match self.read_marker()? {
            Marker::Bin8 => Width::W8,
            Marker::Bin16 => Width::W16,
            Marker::Bin32 => Width::W32,
            other => return self.mismatch(ValueKind::Binary, other),
        };
        self.payload(start, |c| {
            let len = read_len(c, width)?;
            c.get_bytes(len)
        })
    }

    /// Read an extension value; `data` borrows the input
    pub fn expect_ext(&mut self) -> Result<Extension<'a>> {
        let start = self.position();
        let len = match self.read_marker()? {
            Marker::FixExt1 => Len::Implied(1),
            Marker::FixExt2 => Len::Implied(2),
            Marker::FixExt4 => Len::Implied(4),
            Marker::FixExt8 => Len::Implied(8),
            Marker::FixExt16 => Len::Implied(16),
            Marker::Ext8 => Len::Prefixed(Width::W8),
            Marker::Ext16 => Len::Prefixed(Width::W16),
            Marker::Ext32 => Len::Prefixed(Width::W32),
            other => return self.mismatch(ValueKind::Extension, other),
        };
        self.payload(start, |c| {
            let len = len.read(c)?;
            let type_id = c.get_int(Width::W8)? as i8;
            let data = c.get_bytes(len)?;
            Ok(Extension { type_id, data })
        })
    }

    /// Read any integer encoding
    pub fn expect_integer(&mut self) -> Result<Integer> {
        let start = self.position();
        match self.read_marker()? {
            Marker::FixPos(n) => Ok(Integer::from(n)),
            Marker::FixNeg(n) => Ok(Integer::from(n)),
            other => match int_width(other) {
                Some((width, signed)) => self.payload(start, |c| read_int(c, width, signed)),
                None => self.mismatch(ValueKind::Integer, other),
            },
        }
    }

    /// Read any integer or float encoding
    pub fn expect_number(&mut self) -> Result<Number> {
        let start = self.position();
        match self.read_marker()? {
            Marker::FixPos(n) => Ok(Number::Integer(Integer::from(n))),
            Marker::FixNeg(n) => Ok(Number::Integer(Integer::from(n))),
            Marker::F32 => self.payload(start, |c| c.get_f32().map(Number::Float32)),
            Marker::F64 => self.payload(start, |c| c.get_f64().map(Number::Float64)),
            other => match int_width(other) {
                Some((width, signed)) => {
                    self.payload(start, |c| read_int(c, width, signed).map(Number::Integer))
                }
                None => self.mismatch(ValueKind::Number, other),
            },
        }
    }

    /// Read a UTF-8 string without copying
    ///
    /// Malformed UTF-8 fails with [`Error::InvalidUtf8`] and leaves the cursor
    /// on the string's tag byte.
    pub fn expect_str(&mut self) -> Result<&'a str> {
        let start = self.position();
        let len = match self.read_marker()? {
            Marker::FixStr(len) => Len::Implied(len as usize),
            Marker::Str8 => Len::Prefixed(Width::W8),
            Marker::Str16 => Len::Prefixed(Width::W16),
            Marker::Str32 => Len::Prefixed(Width::W32),
            other => return self.mismatch(ValueKind::String, other),
        };
        self.payload(start, |c| {
            let len = len.read(c)?;
            let bytes = c.get_bytes(len)?;
            core::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
        })
    }

    /// Read an array header and return its element count
    ///
    /// The elements follow and are read with further `expect_*` calls.
    pub fn expect_array(&mut self) -> Result<usize> {
        let start = self.position();
        match self.read_marker()? {
            Marker::FixArray(len) => Ok(len as usize),
            Marker::Array16 => self.payload(start, |c| read_len(c, Width::W16)),
            Marker::Array32 => self.payload(start, |c| read_len(c, Width::W32)),
            other => self.mismatch(ValueKind::Array, other),
        }
    }

    /// Read a map header and return its key-value pair count
    pub fn expect_map(&mut self) -> Result<usize> {
        let start = self.position();
        match self.read_marker()? {
            Marker::FixMap(len) => Ok(len as usize),
            Marker::Map16 => self.payload(start, |c| read_len(c, Width::W16)),
            Marker::Map32 => self.payload(start, |c| read_len(c, Width::W32)),
            other => self.mismatch(ValueKind::Map, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn decoder(bytes: &[u8]) -> Decoder<'_> {
        Decoder::new(bytes)
    }

    #[test]
    fn test_decoder_nil_and_bool() {
        let data = [0xC0, 0xC2, 0xC3];
        let mut dec = decoder(&data);

        assert!(dec.check_nil());
        assert!(!dec.expect_bool().unwrap());
        assert!(dec.expect_bool().unwrap());
        assert!(dec.is_at_end());
        assert!(!dec.check_nil());
    }

    #[test]
    fn test_check_nil_does_not_consume() {
        let data = [0xC3];
        let mut dec = decoder(&data);

        assert!(!dec.check_nil());
        assert_eq!(dec.position(), 0);
        assert!(dec.expect_bool().unwrap());
    }

    #[test]
    fn test_decoder_fixints() {
        let data = [0x00, 0x7F, 0xFB, 0xE0];
        let mut dec = decoder(&data);

        assert_eq!(dec.expect_integer().unwrap(), Integer::from(0u8));
        assert_eq!(dec.expect_integer().unwrap(), Integer::from(127u8));
        assert_eq!(dec.expect_integer().unwrap(), Integer::from(-5i8));
        assert_eq!(dec.expect_integer().unwrap(), Integer::from(-32i8));
    }

    #[test]
    fn test_decoder_explicit_width_integers() {
        let cases: &[(&[u8], i64)] = &[
            (&[0xCC, 0x80], 128),
            (&[0xCD, 0x01, 0x00], 256),
            (&[0xCE, 0x80, 0x00, 0x00, 0x00], 2_147_483_648),
            (&[0xD0, 0xDF], -33),
            (&[0xD1, 0xFF, 0x00], -256),
            (&[0xD2, 0xFF, 0xFF, 0x00, 0x00], -65_536),
            (&[0xD3, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE], -2),
        ];

        for (bytes, expected) in cases {
            let mut dec = decoder(bytes);
            assert_eq!(dec.expect_integer().unwrap().as_i64(), Some(*expected));
            assert!(dec.is_at_end());
        }

        let data = [0xCF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(
            decoder(&data).expect_integer().unwrap().as_u64(),
            Some(u64::MAX)
        );
    }

    #[test]
    fn test_decoder_number_accepts_floats() {
        let mut data = Vec::new();
        data.push(0xCA);
        data.extend_from_slice(&0.5f32.to_be_bytes());
        data.push(0xCB);
        data.extend_from_slice(&(-0.5f64).to_be_bytes());
        data.push(0x05);

        let mut dec = decoder(&data);
        assert_eq!(dec.expect_number().unwrap(), Number::Float32(0.5));
        assert_eq!(dec.expect_number().unwrap(), Number::Float64(-0.5));
        assert_eq!(
            dec.expect_number().unwrap(),
            Number::Integer(Integer::from(5u8))
        );
    }

    #[test]
    fn test_integer_rejects_float() {
        let data = [0xCA, 0x3F, 0x00, 0x00, 0x00];
        let mut dec = decoder(&data);

        assert_eq!(
            dec.expect_integer(),
            Err(Error::BadType(ValueKind::Integer))
        );
        assert_eq!(dec.position(), 0);
        assert_eq!(dec.expect_number().unwrap(), Number::Float32(0.5));
    }

    #[test]
    fn test_decoder_strings() {
        let data = [0xA1, b'a', 0xD9, 0x02, b'h', b'i', 0xA0];
        let mut dec = decoder(&data);

        assert_eq!(dec.expect_str().unwrap(), "a");
        assert_eq!(dec.expect_str().unwrap(), "hi");
        assert_eq!(dec.expect_str().unwrap(), "");
        assert!(dec.is_at_end());
    }

    #[test]
    fn test_invalid_utf8_restores_position() {
        let data = [0xA2, 0xC3, 0x28];
        let mut dec = decoder(&data);

        assert_eq!(dec.expect_str(), Err(Error::InvalidUtf8));
        assert_eq!(dec.position(), 0);
        // retrying sees the same tag again
        assert_eq!(dec.expect_str(), Err(Error::InvalidUtf8));
        assert_eq!(dec.position(), 0);
    }

    #[test]
    fn test_truncated_payload_restores_position() {
        let data = [0x01, 0xC4, 0x05, 0xAA];
        let mut dec = decoder(&data);

        dec.expect_integer().unwrap();
        assert_eq!(dec.expect_bin(), Err(Error::UnexpectedEof));
        assert_eq!(dec.position(), 1);
        assert_eq!(dec.get_rest(), &[0xC4, 0x05, 0xAA]);
    }

    #[test]
    fn test_decoder_binary() {
        let data = [0xC4, 0x03, 0x01, 0x02, 0x03, 0xC5, 0x00, 0x00];
        let mut dec = decoder(&data);

        let bin = dec.expect_bin().unwrap();
        assert_eq!(bin, &[1, 2, 3]);
        assert!(core::ptr::eq(bin.as_ptr(), data[2..].as_ptr()));
        assert_eq!(dec.expect_bin().unwrap(), &[] as &[u8]);
    }

    #[test]
    fn test_decoder_extensions() {
        let data = [
            0xD4, 0x01, 0xAA, // fixext 1
            0xC7, 0x03, 0xFE, 0x01, 0x02, 0x03, // ext 8, type -2
        ];
        let mut dec = decoder(&data);

        let ext = dec.expect_ext().unwrap();
        assert_eq!(ext.type_id, 1);
        assert_eq!(ext.data, &[0xAA]);

        let ext = dec.expect_ext().unwrap();
        assert_eq!(ext.type_id, -2);
        assert_eq!(ext.data, &[1, 2, 3]);
    }

    #[test]
    fn test_decoder_collections() {
        let data = [0x93, 0xDC, 0x00, 0x10, 0x80, 0xDF, 0x00, 0x01, 0x00, 0x00];
        let mut dec = decoder(&data);

        assert_eq!(dec.expect_array().unwrap(), 3);
        assert_eq!(dec.expect_array().unwrap(), 16);
        assert_eq!(dec.expect_map().unwrap(), 0);
        assert_eq!(dec.expect_map().unwrap(), 65_536);
    }

    #[test]
    fn test_bad_type_reports_requested_kind() {
        let data = [0x90];
        let mut dec = decoder(&data);

        assert_eq!(dec.expect_map(), Err(Error::BadType(ValueKind::Map)));
        assert_eq!(dec.expect_str(), Err(Error::BadType(ValueKind::String)));
        assert_eq!(dec.expect_bin(), Err(Error::BadType(ValueKind::Binary)));
        assert_eq!(dec.expect_ext(), Err(Error::BadType(ValueKind::Extension)));
        assert_eq!(dec.expect_nil(), Err(Error::BadType(ValueKind::Nil)));
        assert_eq!(dec.position(), 0);
        assert_eq!(dec.expect_array().unwrap(), 0);
    }

    #[test]
    fn test_empty_input() {
        let mut dec = decoder(&[]);
        assert_eq!(dec.expect_bool(), Err(Error::UnexpectedEof));
        assert_eq!(dec.get_rest(), &[] as &[u8]);
    }
}
