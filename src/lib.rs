//! A compact, fixed-capacity bitmap backed by a plain byte buffer.
//!
//! [`BitMap`] is the main struct in this library. Its [features](#features)
//! are listed below.
//!
//! # Examples
//! ```
//! use byte_bitmap::BitMap;
//!
//! let mut bitmap = BitMap::new(16);
//! bitmap.set(0)?;
//! bitmap.set(15)?;
//! assert_eq!(bitmap.to_bytes(), [0x01, 0x80]);
//! assert_eq!(bitmap.count(), 2);
//! assert_eq!(bitmap.to_hex_string(), "8001");
//!
//! let decoded = BitMap::from_hex_string(&bitmap.to_hex_string())?;
//! assert_eq!(decoded.to_bytes(), bitmap.to_bytes());
//! # Ok::<(), byte_bitmap::Error>(())
//! ```
//!
//! # Layout
//!
//! Bit `p` is stored in byte `p / 8` under the mask `1 << (p % 8)`. The buffer
//! holds `ceil(bit_capacity / 8)` bytes, so up to seven padding bits may
//! follow the requested capacity. Those padding bits are addressable: bit
//! access, counting, iteration and the encodings all operate on
//! [`BitMap::size`] bits, while range operations are bounded by
//! [`BitMap::bit_capacity`].
//!
//! # Features
//!
//! - Bounds-checked single-bit operations returning [`Result`]:
//!   `set`, `unset`/`reset`, `flip`, `test`, `assign`
//! - Range operations: `set_range`, `unset_range`, stepped variants and the
//!   `get_range`/`assign_range` accessors
//! - Aggregate queries: `count` (table-driven popcount), `any`, `none`, `all`
//! - Iteration over all bits, set positions or unset positions:
//!   - `iter()` (all bits as bools)
//!   - `nonzero_positions()` (indices of set bits)
//!   - `zero_positions()` (indices of unset bits)
//! - Encodings: raw bytes, binary strings, hex strings and raw files

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod bitmap;
mod error;

pub use bitmap::{BitMap, BitMapIter, IterOnes, IterZeros, byte_count};
pub use error::{Error, Format, Result};
