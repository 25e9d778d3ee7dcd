//! Renderer
//!
//! Turns the message buffer into the packed bit matrix driven onto the LED
//! rows. For every pixel row the renderer walks 32 character columns. At
//! each column it looks up one glyph row per channel and interleaves the
//! five dots of all four channels into the shared output stream, so the
//! channels stay byte-aligned with each other.

mod matrix;

pub use matrix::{BitMatrix, CHANNELS, MATRIX_BYTES, PIXEL_ROWS};

use crate::message::{MessageBuffer, BLANK, ROW_COUNT};
use crate::traits::font::GLYPH_WIDTH;
use crate::traits::FontProvider;

/// Character columns rendered per row
pub const COLUMNS: usize = 32;

const _: () = assert!(COLUMNS * GLYPH_WIDTH as usize == MATRIX_BYTES * 8);
const _: () = assert!(CHANNELS == ROW_COUNT);

impl<F: FontProvider + ?Sized> MessageBuffer<'_, F> {
    /// Render the current text into a fresh matrix
    pub fn render(&self) -> BitMatrix {
        let mut matrix = BitMatrix::new();
        self.render_into(&mut matrix);
        matrix
    }

    /// Render the current text into `matrix`
    ///
    /// Every pixel row is cleared before it is drawn; nothing from a
    /// previous render survives.
    pub fn render_into(&self, matrix: &mut BitMatrix) {
        for pixel_row in 0..PIXEL_ROWS {
            matrix.clear_row(pixel_row);

            let mut out_byte = 0;
            let mut out_bit = 0;

            for column in 0..COLUMNS {
                let dots = self.column_dots(pixel_row as u8, column);

                for src_bit in 0..GLYPH_WIDTH {
                    for (channel, &row_dots) in dots.iter().enumerate() {
                        if (row_dots >> src_bit) & 1 != 0 {
                            matrix.set_bit(pixel_row, out_byte, channel, out_bit);
                        }
                    }
                    out_bit += 1;
                    if out_bit == 8 {
                        out_bit = 0;
                        out_byte += 1;
                    }
                }
            }
        }
    }

    /// Glyph row of every channel at one character column
    ///
    /// A channel is padded with blanks only once `column` is past its
    /// length; the column equal to the length still reads the buffer.
    fn column_dots(&self, pixel_row: u8, column: usize) -> [u8; CHANNELS] {
        let mut dots = [0; CHANNELS];
        let mut offset = 0;

        for (channel, slot) in dots.iter_mut().enumerate() {
            let length = self.row_length(channel);
            let character = if length < column {
                BLANK
            } else {
                self.char_at(offset + column).unwrap_or(BLANK)
            };
            *slot = self.font().row_dots(pixel_row, character);
            offset += length;
        }

        dots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::BUFFER_CAPACITY;
    use crate::testing::TestFont;

    /// Dots of one character column, read back out of the packed stream
    fn column_dots(matrix: &BitMatrix, pixel_row: usize, channel: usize, column: usize) -> u8 {
        (0..GLYPH_WIDTH as usize).fold(0, |acc, bit| {
            acc | (u8::from(matrix.pixel(pixel_row, channel, column * 5 + bit)) << bit)
        })
    }

    #[test]
    fn test_blank_buffer_renders_dark() {
        let font = TestFont::new();
        let message = MessageBuffer::new(&font);
        assert_eq!(message.render(), BitMatrix::new());
    }

    #[test]
    fn test_render_is_deterministic() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(b"DETERMINISTIC", 0);
        message.load_row(b"OUTPUT", 2);

        assert_eq!(message.render(), message.render());
    }

    #[test]
    fn test_render_into_discards_previous_contents() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(b"OLD FRAME", 1);
        let mut matrix = message.render();

        message.init();
        message.load_row(b"N", 0);
        message.render_into(&mut matrix);

        assert_eq!(matrix, message.render());
    }

    #[test]
    fn test_single_glyph_packing() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(b"A", 0);
        let matrix = message.render();

        // 'A' is 0x41: row patterns 0x01, 0x02 .. 0x07
        assert_eq!(matrix.get(0, 0, 0), 0x01);
        assert_eq!(matrix.get(1, 0, 0), 0x02);
        assert_eq!(matrix.get(6, 0, 0), 0x07);
        for byte in 1..MATRIX_BYTES {
            assert_eq!(matrix.get(6, byte, 0), 0);
        }
        for channel in 1..CHANNELS {
            assert_eq!(matrix.channel_bytes(6, channel), [0; MATRIX_BYTES]);
        }
    }

    #[test]
    fn test_glyph_straddles_byte_boundary() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(b" O", 3);
        let matrix = message.render();

        // 'O' row 0 is 0x0F, placed at dots 5..10
        assert_eq!(matrix.get(0, 0, 3), 0xE0);
        assert_eq!(matrix.get(0, 1, 3), 0x01);
        for channel in 0..3 {
            assert_eq!(matrix.channel_bytes(0, channel), [0; MATRIX_BYTES]);
        }
    }

    #[test]
    fn test_channels_share_cursor() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_rows([
            b"A".as_slice(),
            b"A".as_slice(),
            b"A".as_slice(),
            b"A".as_slice(),
        ]);
        let matrix = message.render();

        // Every channel's first glyph occupies dots 0..5 of the same byte
        for channel in 0..CHANNELS {
            assert_eq!(column_dots(&matrix, 0, channel, 0), 0x01);
            assert_eq!(matrix.get(0, 0, channel) & 0x1F, 0x01);
        }
    }

    #[test]
    fn test_boundary_column_samples_buffer() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_rows([
            b"AB".as_slice(),
            b"CDE".as_slice(),
            b"FG".as_slice(),
            b"".as_slice(),
        ]);
        let matrix = message.render();

        // Channel 0 has length 2: column 2 still reads 'C' (0x43)
        assert_eq!(column_dots(&matrix, 0, 0, 0), 0x41 & 0x1F);
        assert_eq!(column_dots(&matrix, 0, 0, 1), 0x42 & 0x1F);
        assert_eq!(column_dots(&matrix, 0, 0, 2), 0x43 & 0x1F);
        assert_eq!(column_dots(&matrix, 0, 0, 3), 0);

        // Channel 1 has length 3: column 3 reads 'F' (0x46), column 4 is blank
        assert_eq!(column_dots(&matrix, 0, 1, 3), 0x46 & 0x1F);
        assert_eq!(column_dots(&matrix, 0, 1, 4), 0);
    }

    #[test]
    fn test_full_buffer_reads_stay_in_bounds() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(&[b'A'; BUFFER_CAPACITY], 0);
        let matrix = message.render();

        // Channels 1..3 start at the end of the buffer and render blank
        for channel in 1..CHANNELS {
            assert_eq!(matrix.channel_bytes(0, channel), [0; MATRIX_BYTES]);
        }
        for column in 0..COLUMNS {
            assert_eq!(column_dots(&matrix, 0, 0, column), 0x01);
        }
    }

    #[test]
    fn test_block_text_renders_on_channel_zero() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(b"AAA", -1);
        let matrix = message.render();

        for column in 0..3 {
            assert_eq!(column_dots(&matrix, 0, 0, column), 0x01);
        }
        assert_eq!(column_dots(&matrix, 0, 0, 3), 0);
    }
}
