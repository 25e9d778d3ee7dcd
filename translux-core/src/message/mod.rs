//! Message buffer
//!
//! Up to four logical rows of text share one fixed-size character buffer.
//! Rows are stored back to back in row order: row `r` starts at the sum of
//! the lengths of rows `0..r`. Alternatively the whole buffer can hold one
//! unsegmented block of text, in which case row 0's length slot records the
//! block length.

mod loader;

pub use loader::LoadTarget;

use crate::traits::FontProvider;

/// Capacity of the shared character buffer
pub const BUFFER_CAPACITY: usize = 256;

/// Number of logical rows
pub const ROW_COUNT: usize = 4;

/// Character used to blank the buffer and pad short rows
pub const BLANK: u8 = b' ';

/// Message buffer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// Row index is neither a valid row nor the block selector
    InvalidRow(i32),
}

/// Text buffer for the sign
///
/// Borrows its font for its whole lifetime; the font is shared with
/// whatever else needs it and is never mutated here.
pub struct MessageBuffer<'f, F: FontProvider + ?Sized> {
    font: &'f F,
    buffer: [u8; BUFFER_CAPACITY],
    /// Characters occupied by each row
    row_lengths: [u16; ROW_COUNT],
    /// Scroll cursor per row, owned by the scrolling driver
    row_scroll_offsets: [u8; ROW_COUNT],
    row_mode: bool,
}

impl<'f, F: FontProvider + ?Sized> MessageBuffer<'f, F> {
    /// Create an initialized, blank message buffer
    pub fn new(font: &'f F) -> Self {
        let mut message = Self {
            font,
            buffer: [BLANK; BUFFER_CAPACITY],
            row_lengths: [0; ROW_COUNT],
            row_scroll_offsets: [0; ROW_COUNT],
            row_mode: true,
        };
        message.init();
        message
    }

    /// Reset to the empty state
    ///
    /// Re-initializes the font, blanks every character, zeroes all row
    /// lengths and scroll offsets and returns to row mode.
    pub fn init(&mut self) {
        self.font.init();
        self.buffer.fill(BLANK);
        self.row_lengths.fill(0);
        self.row_scroll_offsets.fill(0);
        self.row_mode = true;
    }

    /// The font used for rendering
    pub fn font(&self) -> &'f F {
        self.font
    }

    /// Raw character buffer
    pub fn as_bytes(&self) -> &[u8; BUFFER_CAPACITY] {
        &self.buffer
    }

    /// Stored length of every row
    pub fn row_lengths(&self) -> [u16; ROW_COUNT] {
        self.row_lengths
    }

    /// Stored length of one row, 0 for rows out of range
    pub fn row_length(&self, row: usize) -> usize {
        self.row_lengths.get(row).map_or(0, |&len| len as usize)
    }

    /// Offset of `row` within the buffer
    ///
    /// Sum of the current lengths of all lower rows.
    pub fn row_offset(&self, row: usize) -> usize {
        self.row_lengths[..row.min(ROW_COUNT)]
            .iter()
            .map(|&len| len as usize)
            .sum()
    }

    /// Text of one row, clamped to the buffer
    pub fn row_text(&self, row: usize) -> &[u8] {
        if row >= ROW_COUNT {
            return &[];
        }
        let start = self.row_offset(row).min(BUFFER_CAPACITY);
        let end = (start + self.row_length(row)).min(BUFFER_CAPACITY);
        &self.buffer[start..end]
    }

    /// Text loaded through the block path
    ///
    /// Only meaningful when not in row mode.
    pub fn block_text(&self) -> &[u8] {
        &self.buffer[..self.row_length(0).min(BUFFER_CAPACITY)]
    }

    /// Whether the buffer is segmented into rows
    pub fn is_row_mode(&self) -> bool {
        self.row_mode
    }

    /// Scroll cursor of one row
    pub fn scroll_offset(&self, row: usize) -> u8 {
        self.row_scroll_offsets.get(row).copied().unwrap_or(0)
    }

    /// Move the scroll cursor of one row
    ///
    /// Out-of-range rows are ignored.
    pub fn set_scroll_offset(&mut self, row: usize, offset: u8) {
        if let Some(slot) = self.row_scroll_offsets.get_mut(row) {
            *slot = offset;
        }
    }

    /// Character at `index`, or `None` past the end of the buffer
    pub(crate) fn char_at(&self, index: usize) -> Option<u8> {
        self.buffer.get(index).copied()
    }
}

impl<F: FontProvider + ?Sized> core::fmt::Debug for MessageBuffer<'_, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MessageBuffer")
            .field("row_lengths", &self.row_lengths)
            .field("row_scroll_offsets", &self.row_scroll_offsets)
            .field("row_mode", &self.row_mode)
            .finish_non_exhaustive()
    }
}
