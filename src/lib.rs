#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]
//! A compact, bit-level codec for sequences of positive integers.
//!
//! Every value is written as a unary preamble (selecting one of up to eight
//! buckets) followed by a fixed-width payload, with the payload width per
//! bucket governed by a pluggable [`Scheme`]. Runs of repeated values can
//! optionally be elided with a run-length marker when doing so is cheaper
//! than writing them out naively.
//!
//! ```
//! use spacker::{encode, decode, Doubling};
//!
//! let values: Vec<u16> = vec![1, 3, 4, 22];
//! let bytes = encode(&values, Doubling::new(1), false).unwrap();
//! let decoded: Vec<u16> = decode(&bytes, values.len(), Doubling::new(1)).unwrap();
//! assert_eq!(values, decoded);
//! ```

mod codebook;
mod integer;
mod pack_error;
mod packer;
mod scheme;
mod unpack_error;
mod unpacker;

pub use integer::Unsigned;
pub use pack_error::PackError;
pub use packer::encode;
pub use scheme::{Doubling, Multiplier, Scheme};
pub use unpack_error::UnpackError;
pub use unpacker::decode;
