use crate::SerdeErr;

/// Reads values out of a borrowed byte slice, front to back.
pub struct ByteReader<'b> {
    buffer: &'b [u8],
    position: usize,
}

impl<'b> ByteReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let byte = *self.buffer.get(self.position).ok_or(SerdeErr)?;
        self.position += 1;
        Ok(byte)
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'b [u8], SerdeErr> {
        let end = self.position.checked_add(length).ok_or(SerdeErr)?;
        let slice = self.buffer.get(self.position..end).ok_or(SerdeErr)?;
        self.position = end;
        Ok(slice)
    }

    pub fn bytes_remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.bytes_remaining() == 0
    }
}
