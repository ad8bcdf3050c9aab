use crate::{ByteReader, ByteWriter, SerdeErr};

/// A type that can be written to and read from a byte stream
pub trait Serde: Sized {
    /// Writes the value into the given writer
    fn ser(&self, writer: &mut ByteWriter);
    /// Reads a value from the given reader
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;
    /// Number of bytes `ser` will write
    fn byte_length(&self) -> usize;
}
