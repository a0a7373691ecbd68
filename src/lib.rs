//! MiniPack: caller-driven MessagePack codec
//!
//! This crate encodes primitive values into the MessagePack wire format and
//! decodes them back under caller-declared expectations. There is no value
//! tree and no recursion: the caller drives both sides by calling the matching
//! `put_*` / `expect_*` method in order. Arrays and maps only carry a length
//! header; their elements are the caller's next calls.
//!
//! # Wire Format
//!
//! ```text
//! 0x00-0x7f  positive fixint      0xc4-0xc6  bin 8/16/32
//! 0x80-0x8f  fixmap               0xc7-0xc9  ext 8/16/32
//! 0x90-0x9f  fixarray             0xca-0xcb  float 32/64
//! 0xa0-0xbf  fixstr               0xcc-0xcf  uint 8/16/32/64
//! 0xc0       nil                  0xd0-0xd3  int 8/16/32/64
//! 0xc1       (never used)         0xd4-0xd8  fixext 1/2/4/8/16
//! 0xc2-0xc3  false / true         0xd9-0xdb  str 8/16/32
//!                                 0xdc-0xdd  array 16/32
//!                                 0xde-0xdf  map 16/32
//! 0xe0-0xff  negative fixint
//! ```
//!
//! # Features
//!
//! - Smallest-size-class encoding for every value
//! - Zero-copy decoding of strings, binaries and extension payloads
//! - Speculative decoding: a mismatched `expect_*` leaves the input untouched
//! - `no_std` support with `alloc`
//!
//! # Example
//!
//! ```rust
//! use minipack::*;
//!
//! let mut encoder = Encoder::new();
//! encoder.put_array_len(1)?;
//! encoder.put_str("a")?;
//! let bytes = encoder.dump(None);
//! assert_eq!(bytes, [0x91, 0xA1, 0x61]);
//!
//! let mut decoder = Decoder::new(&bytes);
//! assert!(!decoder.check_nil());
//! assert_eq!(decoder.expect_array()?, 1);
//! assert_eq!(decoder.expect_str()?, "a");
//! assert!(decoder.is_at_end());
//! # Ok::<(), minipack::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod marker;
pub mod value;

// Re-export main types
pub use cursor::{ByteCursor, Width};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::Error;
pub use marker::Marker;
pub use value::{Extension, Integer, Number, ValueKind};
