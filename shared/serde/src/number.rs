use crate::{ByteReader, ByteWriter, Serde, SerdeErr};

/// Longest string, in bytes, that fits behind the u16 length prefix
pub const MAX_STRING_LENGTH: usize = u16::MAX as usize;
/// Longest byte blob that fits behind the u32 length prefix
pub const MAX_BYTES_LENGTH: usize = u32::MAX as usize;

// Integers are written little-endian with their full width.
macro_rules! impl_serde_for_integer {
    ($($ty:ty),*) => {
        $(
            impl Serde for $ty {
                fn ser(&self, writer: &mut ByteWriter) {
                    writer.write_bytes(&self.to_le_bytes());
                }

                fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
                    const WIDTH: usize = std::mem::size_of::<$ty>();
                    let bytes = reader.read_bytes(WIDTH)?;
                    let mut array = [0u8; WIDTH];
                    array.copy_from_slice(bytes);
                    Ok(<$ty>::from_le_bytes(array))
                }

                fn byte_length(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }
            }
        )*
    };
}

impl_serde_for_integer!(u8, u16, u32, u64);

impl Serde for String {
    fn ser(&self, writer: &mut ByteWriter) {
        let text = truncate_to_boundary(self, MAX_STRING_LENGTH);
        // length fits: truncated above
        (text.len() as u16).ser(writer);
        writer.write_bytes(text.as_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let length = u16::de(reader)? as usize;
        let bytes = reader.read_bytes(length)?;
        let text = std::str::from_utf8(bytes).map_err(|_| SerdeErr)?;
        Ok(text.to_string())
    }

    fn byte_length(&self) -> usize {
        2 + truncate_to_boundary(self, MAX_STRING_LENGTH).len()
    }
}

impl Serde for Vec<u8> {
    fn ser(&self, writer: &mut ByteWriter) {
        let length = self.len().min(MAX_BYTES_LENGTH);
        (length as u32).ser(writer);
        writer.write_bytes(&self[..length]);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let length = u32::de(reader)? as usize;
        Ok(reader.read_bytes(length)?.to_vec())
    }

    fn byte_length(&self) -> usize {
        4 + self.len().min(MAX_BYTES_LENGTH)
    }
}

fn truncate_to_boundary(text: &str, max_length: usize) -> &str {
    if text.len() <= max_length {
        return text;
    }
    let mut end = max_length;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
