use crate::error::SerdeErr;

#[derive(Clone, Copy, Default)]
struct BitReaderState {
    scratch: u8,
    scratch_index: u8,
    buffer_index: usize,
}

/// Reads bits, least significant first, out of a borrowed byte buffer
pub struct BitReader<'b> {
    state: BitReaderState,
    buffer: &'b [u8],
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            state: BitReaderState::default(),
            buffer,
        }
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        if self.state.scratch_index == 0 {
            let Some(byte) = self.buffer.get(self.state.buffer_index) else {
                return Err(SerdeErr);
            };
            self.state.scratch = *byte;
            self.state.buffer_index += 1;
        }

        let value = self.state.scratch & 1;
        self.state.scratch >>= 1;
        self.state.scratch_index = (self.state.scratch_index + 1) % 8;

        Ok(value != 0)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let mut output = 0;
        for index in 0..8 {
            if self.read_bit()? {
                output |= 1 << index;
            }
        }
        Ok(output)
    }

    /// Number of unread bits left in the buffer
    pub fn bits_remaining(&self) -> usize {
        let unread_bytes = self.buffer.len() - self.state.buffer_index;
        let scratch_bits = if self.state.scratch_index == 0 {
            0
        } else {
            8 - self.state.scratch_index as usize
        };
        unread_bytes * 8 + scratch_bits
    }
}
