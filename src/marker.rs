//! MessagePack tag table
//!
//! Every byte value maps to exactly one [`Marker`]. The compact families
//! (fixint, fixmap, fixarray, fixstr, negative fixint) carry their value or
//! length in the low bits; every other tag is a single fixed byte.

/// Decoded form of a MessagePack tag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// 0x00..=0x7F, the tag is the value
    FixPos(u8),
    /// 0x80..=0x8F, low 4 bits are the pair count
    FixMap(u8),
    /// 0x90..=0x9F, low 4 bits are the element count
    FixArray(u8),
    /// 0xA0..=0xBF, low 5 bits are the byte length
    FixStr(u8),
    /// 0xC0
    Nil,
    /// 0xC1, never used
    Reserved,
    /// 0xC2
    False,
    /// 0xC3
    True,
    /// 0xC4, 1-byte length
    Bin8,
    /// 0xC5, 2-byte length
    Bin16,
    /// 0xC6, 4-byte length
    Bin32,
    /// 0xC7, 1-byte length + type id
    Ext8,
    /// 0xC8, 2-byte length + type id
    Ext16,
    /// 0xC9, 4-byte length + type id
    Ext32,
    /// 0xCA
    F32,
    /// 0xCB
    F64,
    /// 0xCC
    U8,
    /// 0xCD
    U16,
    /// 0xCE
    U32,
    /// 0xCF
    U64,
    /// 0xD0
    I8,
    /// 0xD1
    I16,
    /// 0xD2
    I32,
    /// 0xD3
    I64,
    /// 0xD4, 1 data byte
    FixExt1,
    /// 0xD5, 2 data bytes
    FixExt2,
    /// 0xD6, 4 data bytes
    FixExt4,
    /// 0xD7, 8 data bytes
    FixExt8,
    /// 0xD8, 16 data bytes
    FixExt16,
    /// 0xD9, 1-byte length
    Str8,
    /// 0xDA, 2-byte length
    Str16,
    /// 0xDB, 4-byte length
    Str32,
    /// 0xDC, 2-byte count
    Array16,
    /// 0xDD, 4-byte count
    Array32,
    /// 0xDE, 2-byte count
    Map16,
    /// 0xDF, 4-byte count
    Map32,
    /// 0xE0..=0xFF, the tag is the two's-complement value
    FixNeg(i8),
}

impl Marker {
    /// Upper bound (inclusive) of the positive fixint range
    pub const FIXINT_MAX: u8 = 0x7F;
    /// Smallest value a negative fixint can hold
    pub const FIXNEG_MIN: i8 = -0x20;
    /// Largest count carried inline by fixarray / fixmap
    pub const FIXCOLLECTION_MAX: usize = 0x0F;
    /// Largest byte length carried inline by fixstr
    pub const FIXSTR_MAX: usize = 0x1F;

    /// Classify a tag byte
    #[inline]
    pub const fn from_u8(byte: u8) -> Marker {
        match byte {
            0x00..=0x7F => Marker::FixPos(byte),
            0x80..=0x8F => Marker::FixMap(byte & 0x0F),
            0x90..=0x9F => Marker::FixArray(byte & 0x0F),
            0xA0..=0xBF => Marker::FixStr(byte & 0x1F),
            0xC0 => Marker::Nil,
            0xC1 => Marker::Reserved,
            0xC2 => Marker::False,
            0xC3 => Marker::True,
            0xC4 => Marker::Bin8,
            0xC5 => Marker::Bin16,
            0xC6 => Marker::Bin32,
            0xC7 => Marker::Ext8,
            0xC8 => Marker::Ext16,
            0xC9 => Marker::Ext32,
            0xCA => Marker::F32,
            0xCB => Marker::F64,
            0xCC => Marker::U8,
            0xCD => Marker::U16,
            0xCE => Marker::U32,
            0xCF => Marker::U64,
            0xD0 => Marker::I8,
            0xD1 => Marker::I16,
            0xD2 => Marker::I32,
            0xD3 => Marker::I64,
            0xD4 => Marker::FixExt1,
            0xD5 => Marker::FixExt2,
            0xD6 => Marker::FixExt4,
            0xD7 => Marker::FixExt8,
            0xD8 => Marker::FixExt16,
            0xD9 => Marker::Str8,
            0xDA => Marker::Str16,
            0xDB => Marker::Str32,
            0xDC => Marker::Array16,
            0xDD => Marker::Array32,
            0xDE => Marker::Map16,
            0xDF => Marker::Map32,
            0xE0..=0xFF => Marker::FixNeg(byte as i8),
        }
    }

    /// Tag byte for this marker
    ///
    /// Payloads of the compact families are masked to their field width.
    #[inline]
    pub const fn to_u8(&self) -> u8 {
        match *self {
            Marker::FixPos(n) => n & 0x7F,
            Marker::FixMap(n) => 0x80 | (n & 0x0F),
            Marker::FixArray(n) => 0x90 | (n & 0x0F),
            Marker::FixStr(n) => 0xA0 | (n & 0x1F),
            Marker::Nil => 0xC0,
            Marker::Reserved => 0xC1,
            Marker::False => 0xC2,
            Marker::True => 0xC3,
            Marker::Bin8 => 0xC4,
            Marker::Bin16 => 0xC5,
            Marker::Bin32 => 0xC6,
            Marker::Ext8 => 0xC7,
            Marker::Ext16 => 0xC8,
            Marker::Ext32 => 0xC9,
            Marker::F32 => 0xCA,
            Marker::F64 => 0xCB,
            Marker::U8 => 0xCC,
            Marker::U16 => 0xCD,
            Marker::U32 => 0xCE,
            Marker::U64 => 0xCF,
            Marker::I8 => 0xD0,
            Marker::I16 => 0xD1,
            Marker::I32 => 0xD2,
            Marker::I64 => 0xD3,
            Marker::FixExt1 => 0xD4,
            Marker::FixExt2 => 0xD5,
            Marker::FixExt4 => 0xD6,
            Marker::FixExt8 => 0xD7,
            Marker::FixExt16 => 0xD8,
            Marker::Str8 => 0xD9,
            Marker::Str16 => 0xDA,
            Marker::Str32 => 0xDB,
            Marker::Array16 => 0xDC,
            Marker::Array32 => 0xDD,
            Marker::Map16 => 0xDE,
            Marker::Map32 => 0xDF,
            Marker::FixNeg(n) => (n as u8) | 0xE0,
        }
    }

    /// Fixed-length extension tag for a payload of `len` bytes, if one exists
    #[inline]
    pub const fn fixext_for_len(len: usize) -> Option<Marker> {
        match len {
            1 => Some(Marker::FixExt1),
            2 => Some(Marker::FixExt2),
            4 => Some(Marker::FixExt4),
            8 => Some(Marker::FixExt8),
            16 => Some(Marker::FixExt16),
            _ => None,
        }
    }
}

impl From<u8> for Marker {
    #[inline]
    fn from(byte: u8) -> Self {
        Marker::from_u8(byte)
    }
}

impl From<Marker> for u8 {
    #[inline]
    fn from(marker: Marker) -> Self {
        marker.to_u8()
    }
}
