//! # Stash Serde
//! Bit-level reader/writer and the `Serde` trait used to put inventory sync
//! messages on the wire.

#![deny(trivial_casts, trivial_numeric_casts, unstable_features, unused_import_braces)]

mod bit_reader;
mod bit_writer;
mod error;
mod impls;
mod integer;
mod serde;

pub use bit_reader::BitReader;
pub use bit_writer::{BitWrite, BitWriter};
pub use error::SerdeErr;
pub use integer::{SerdeIntegerConversion, UnsignedInteger};
pub use serde::{ConstBitLength, Serde};
