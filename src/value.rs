//! Value types produced by the decoder
//!
//! MessagePack has no single sum type in this crate: each category is read by
//! its own `expect_*` call. These are the small carriers those calls return.

use core::fmt;

/// Categories a caller can ask the decoder for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// nil
    Nil,
    /// true / false
    Bool,
    /// fixint, uint 8..64, int 8..64
    Integer,
    /// any integer or float 32/64
    Number,
    /// fixstr, str 8/16/32
    String,
    /// bin 8/16/32
    Binary,
    /// fixarray, array 16/32
    Array,
    /// fixmap, map 16/32
    Map,
    /// fixext 1..16, ext 8/16/32
    Extension,
}

impl ValueKind {
    /// Lowercase name used in error messages
    pub const fn name(&self) -> &'static str {
        match self {
            ValueKind::Nil => "nil",
            ValueKind::Bool => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Binary => "binary",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
            ValueKind::Extension => "extension",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any MessagePack integer, from `i64::MIN` up to `u64::MAX`
///
/// Non-negative values are always held as unsigned, so equality does not
/// depend on which wire width the value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Integer(pub(crate) Repr);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Repr {
    PosInt(u64),
    // always < 0
    NegInt(i64),
}

impl Integer {
    /// Returns the value as `u64` if it is non-negative
    #[inline]
    pub const fn as_u64(&self) -> Option<u64> {
        match self.0 {
            Repr::PosInt(n) => Some(n),
            Repr::NegInt(_) => None,
        }
    }

    /// Returns the value as `i64` if it fits
    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self.0 {
            Repr::PosInt(n) if n <= i64::MAX as u64 => Some(n as i64),
            Repr::PosInt(_) => None,
            Repr::NegInt(n) => Some(n),
        }
    }

    /// Returns the value as `f64`, rounding above 2^53
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match self.0 {
            Repr::PosInt(n) => n as f64,
            Repr::NegInt(n) => n as f64,
        }
    }

    /// Whether the value is below zero
    #[inline]
    pub const fn is_negative(&self) -> bool {
        matches!(self.0, Repr::NegInt(_))
    }
}

impl From<u64> for Integer {
    #[inline]
    fn from(n: u64) -> Self {
        Integer(Repr::PosInt(n))
    }
}

impl From<i64> for Integer {
    #[inline]
    fn from(n: i64) -> Self {
        if n < 0 {
            Integer(Repr::NegInt(n))
        } else {
            Integer(Repr::PosInt(n as u64))
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Integer {
            #[inline]
            fn from(n: $ty) -> Self {
                Integer::from(n as u64)
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Integer {
            #[inline]
            fn from(n: $ty) -> Self {
                Integer::from(n as i64)
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, usize);
impl_from_signed!(i8, i16, i32, isize);

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::PosInt(n) => write!(f, "{}", n),
            Repr::NegInt(n) => write!(f, "{}", n),
        }
    }
}

/// Result of [`Decoder::expect_number`](crate::Decoder::expect_number)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Any integer encoding
    Integer(Integer),
    /// float 32
    Float32(f32),
    /// float 64
    Float64(f64),
}

impl Number {
    /// Widen to `f64`
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(n) => n.as_f64(),
            Number::Float32(x) => *x as f64,
            Number::Float64(x) => *x,
        }
    }

    /// The integer value, if this was not a float
    #[inline]
    pub const fn as_integer(&self) -> Option<Integer> {
        match self {
            Number::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<Integer> for Number {
    fn from(n: Integer) -> Self {
        Number::Integer(n)
    }
}

/// Application-defined extension value; `data` borrows the input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extension<'a> {
    /// Signed type id
    pub type_id: i8,
    /// Opaque payload
    pub data: &'a [u8],
}
