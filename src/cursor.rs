//! Read cursor with single-step rollback
//!
//! The cursor walks a borrowed byte slice, reading big-endian fixed-width
//! values and zero-copy byte runs. It remembers where the most recent read
//! started so that exactly one read can be undone.

use crate::error::{Error, Result};

/// Bit width of a fixed-width integer read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// 1 byte
    W8,
    /// 2 bytes
    W16,
    /// 4 bytes
    W32,
    /// 8 bytes
    W64,
}

impl Width {
    /// Number of bytes occupied on the wire
    #[inline]
    pub const fn bytes(&self) -> usize {
        match self {
            Width::W8 => 1,
            Width::W16 => 2,
            Width::W32 => 4,
            Width::W64 => 8,
        }
    }

    /// Number of bits
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.bytes() as u32 * 8
    }
}

/// Cursor over an input buffer with one level of undo
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    last: Option<usize>,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at the start of `buf`
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            last: None,
        }
    }

    /// Current read position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get remaining bytes in cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check if cursor is at end
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Whether a read is available to roll back
    #[inline]
    pub fn can_rollback(&self) -> bool {
        self.last.is_some()
    }

    // Bounds failures leave both `pos` and `last` untouched.
    #[inline]
    fn advance(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::UnexpectedEof)?;
        let bytes = self.buf.get(self.pos..end).ok_or(Error::UnexpectedEof)?;
        self.last = Some(self.pos);
        self.pos = end;
        Ok(bytes)
    }

    #[inline]
    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.advance(N)?;
        <[u8; N]>::try_from(bytes).map_err(|_| Error::UnexpectedEof)
    }

    /// Read a u8 value
    #[inline]
    pub fn get_u8(&mut self) -> Result<u8> {
        let [byte] = self.take::<1>()?;
        Ok(byte)
    }

    /// Read a u16 value (big-endian)
    #[inline]
    pub fn get_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.take()?))
    }

    /// Read a u32 value (big-endian)
    #[inline]
    pub fn get_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take()?))
    }

    /// Read a u64 value (big-endian)
    #[inline]
    pub fn get_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.take()?))
    }

    /// Read an unsigned big-endian value of the given width
    #[inline]
    pub fn get_uint(&mut self, width: Width) -> Result<u64> {
        match width {
            Width::W8 => self.get_u8().map(u64::from),
            Width::W16 => self.get_u16().map(u64::from),
            Width::W32 => self.get_u32().map(u64::from),
            Width::W64 => self.get_u64(),
        }
    }

    /// Read a signed big-endian value of the given width
    #[inline]
    pub fn get_int(&mut self, width: Width) -> Result<i64> {
        match width {
            Width::W8 => Ok(i8::from_be_bytes(self.take()?) as i64),
            Width::W16 => Ok(i16::from_be_bytes(self.take()?) as i64),
            Width::W32 => Ok(i32::from_be_bytes(self.take()?) as i64),
            Width::W64 => Ok(i64::from_be_bytes(self.take()?)),
        }
    }

    /// Read an IEEE-754 single (big-endian)
    #[inline]
    pub fn get_f32(&mut self) -> Result<f32> {
        Ok(f32::from_be_bytes(self.take()?))
    }

    /// Read an IEEE-754 double (big-endian)
    #[inline]
    pub fn get_f64(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.take()?))
    }

    /// Read a float, 8 bytes if `is64` else 4 bytes widened to `f64`
    #[inline]
    pub fn get_float(&mut self, is64: bool) -> Result<f64> {
        if is64 {
            self.get_f64()
        } else {
            self.get_f32().map(f64::from)
        }
    }

    /// Read raw bytes without copying
    ///
    /// Returns a zero-copy slice into the original buffer
    #[inline]
    pub fn get_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.advance(len)
    }

    /// Undo the most recent read
    ///
    /// Only one level is kept: a second rollback without a read in between
    /// fails with [`Error::NoHistory`].
    #[inline]
    pub fn rollback(&mut self) -> Result<()> {
        let last = self.last.take().ok_or(Error::NoHistory)?;
        self.pos = last;
        Ok(())
    }

    /// Move back to an earlier position, discarding rollback history
    #[inline]
    pub(crate) fn rewind_to(&mut self, pos: usize) {
        debug_assert!(pos <= self.pos);
        self.pos = pos;
        self.last = None;
    }

    /// All unread bytes; does not advance or touch rollback history
    #[inline]
    pub fn get_rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}
