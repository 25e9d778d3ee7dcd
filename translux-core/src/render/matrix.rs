//! Packed output matrix

/// Pixel rows per glyph line
pub const PIXEL_ROWS: usize = 7;

/// Packed bytes per pixel row and channel
pub const MATRIX_BYTES: usize = 20;

/// Parallel row streams, one per logical text row
pub const CHANNELS: usize = 4;

/// Bit matrix shaped `[pixel row][byte][channel]`
///
/// Within one pixel row and channel the dots of the sign run left to right
/// starting at bit 0 of byte 0, eight dots per byte. All four channels share
/// the same byte and bit position for a given dot column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitMatrix {
    bits: [[[u8; CHANNELS]; MATRIX_BYTES]; PIXEL_ROWS],
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl BitMatrix {
    /// Dots per channel and pixel row
    pub const DOTS: usize = MATRIX_BYTES * 8;

    /// Create an all-dark matrix
    pub const fn new() -> Self {
        Self {
            bits: [[[0; CHANNELS]; MATRIX_BYTES]; PIXEL_ROWS],
        }
    }

    /// Turn every dot off
    pub fn clear(&mut self) {
        for pixel_row in 0..PIXEL_ROWS {
            self.clear_row(pixel_row);
        }
    }

    /// Packed byte, 0 outside the matrix
    pub fn get(&self, pixel_row: usize, byte: usize, channel: usize) -> u8 {
        self.bits
            .get(pixel_row)
            .and_then(|row| row.get(byte))
            .and_then(|bytes| bytes.get(channel))
            .copied()
            .unwrap_or(0)
    }

    /// All packed bytes of one channel on one pixel row
    pub fn channel_bytes(&self, pixel_row: usize, channel: usize) -> [u8; MATRIX_BYTES] {
        core::array::from_fn(|byte| self.get(pixel_row, byte, channel))
    }

    /// Whether dot `x` (counted from the left) of a channel is lit
    pub fn pixel(&self, pixel_row: usize, channel: usize, x: usize) -> bool {
        (self.get(pixel_row, x / 8, channel) >> (x % 8)) & 1 != 0
    }

    /// Raw matrix for the row drivers
    pub fn as_array(&self) -> &[[[u8; CHANNELS]; MATRIX_BYTES]; PIXEL_ROWS] {
        &self.bits
    }

    pub(crate) fn clear_row(&mut self, pixel_row: usize) {
        for bytes in self.bits[pixel_row].iter_mut() {
            *bytes = [0; CHANNELS];
        }
    }

    pub(crate) fn set_bit(&mut self, pixel_row: usize, byte: usize, channel: usize, bit: usize) {
        self.bits[pixel_row][byte][channel] |= 1 << bit;
    }
}
