//! # Tether Serde
//! Byte-level serialization used by the tether control messages.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod byte_reader;
mod byte_writer;
mod error;
mod number;
mod serde;

pub use byte_reader::ByteReader;
pub use byte_writer::ByteWriter;
pub use error::SerdeErr;
pub use number::{MAX_BYTES_LENGTH, MAX_STRING_LENGTH};
pub use serde::Serde;
