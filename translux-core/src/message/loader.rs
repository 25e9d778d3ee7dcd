//! Row loader
//!
//! Copies a line of text into one row's slot, or replaces the whole buffer
//! with a single block. A line ends at the first CR, LF or NUL byte, or at
//! the end of the slice. Copies stop at the buffer capacity.

use super::{MessageBuffer, MessageError, BUFFER_CAPACITY, ROW_COUNT};
use crate::traits::FontProvider;

/// Row index selecting the block path in [`MessageBuffer::load_row`]
pub const BLOCK_ROW: i32 = -1;

/// Where a line of text is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadTarget {
    /// One logical row, `0..ROW_COUNT`
    Row(usize),
    /// The whole buffer as one unsegmented block
    Block,
}

impl LoadTarget {
    /// Map a signed row index to a target
    ///
    /// `-1` selects the block path, `0..4` a row; anything else is invalid.
    pub fn from_index(row: i32) -> Option<Self> {
        match row {
            BLOCK_ROW => Some(LoadTarget::Block),
            0..=3 => Some(LoadTarget::Row(row as usize)),
            _ => None,
        }
    }
}

impl<F: FontProvider + ?Sized> MessageBuffer<'_, F> {
    /// Load `text` into `row`, or into the whole buffer for `row == -1`
    ///
    /// Invalid rows are silently ignored. Rows are placed after the current
    /// contents of all lower rows, so within one update rows should be
    /// loaded in ascending order; [`load_rows`](Self::load_rows) does that
    /// for you.
    pub fn load_row(&mut self, text: &[u8], row: i32) {
        let _ = self.try_load_row(text, row);
    }

    /// Like [`load_row`](Self::load_row), reporting invalid rows
    ///
    /// Returns the number of characters stored.
    pub fn try_load_row(&mut self, text: &[u8], row: i32) -> Result<usize, MessageError> {
        let target = LoadTarget::from_index(row).ok_or(MessageError::InvalidRow(row))?;
        self.load(text, target)
    }

    /// Load `text` into `target`
    ///
    /// Returns the number of characters stored.
    pub fn load(&mut self, text: &[u8], target: LoadTarget) -> Result<usize, MessageError> {
        match target {
            LoadTarget::Row(row) if row < ROW_COUNT => {
                let start = self.row_offset(row);
                let copied = self.copy_line(start, text);
                self.row_lengths[row] = copied as u16;
                self.row_mode = true;
                Ok(copied)
            }
            LoadTarget::Row(row) => Err(MessageError::InvalidRow(row as i32)),
            LoadTarget::Block => {
                let copied = self.copy_line(0, text);
                self.row_lengths[0] = copied as u16;
                self.row_mode = false;
                Ok(copied)
            }
        }
    }

    /// Replace all four rows at once
    ///
    /// Row lengths are cleared first and the rows are loaded in ascending
    /// order, so the result does not depend on what was loaded before.
    /// Returns the number of characters stored per row.
    pub fn load_rows(&mut self, rows: [&[u8]; ROW_COUNT]) -> [usize; ROW_COUNT] {
        self.row_lengths.fill(0);
        let mut copied = [0; ROW_COUNT];
        for (row, text) in rows.iter().enumerate() {
            let start = self.row_offset(row);
            copied[row] = self.copy_line(start, text);
            self.row_lengths[row] = copied[row] as u16;
        }
        self.row_mode = true;
        copied
    }

    /// Copy one line of `text` to `start`, returning the count written
    fn copy_line(&mut self, start: usize, text: &[u8]) -> usize {
        let line = text
            .iter()
            .position(|&c| matches!(c, b'\n' | b'\r' | 0))
            .map_or(text, |end| &text[..end]);

        let start = start.min(BUFFER_CAPACITY);
        let count = line.len().min(BUFFER_CAPACITY - start);
        self.buffer[start..start + count].copy_from_slice(&line[..count]);

        #[cfg(feature = "defmt")]
        if count < line.len() {
            defmt::warn!(
                "Text truncated at buffer capacity: kept {} of {} chars",
                count,
                line.len()
            );
        }

        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestFont;
    use proptest::prelude::*;

    #[test]
    fn test_load_row_records_length_and_text() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);

        message.load_row(b"HELLO", 0);
        message.load_row(b"THERE", 1);

        assert_eq!(message.row_lengths(), [5, 5, 0, 0]);
        assert_eq!(&message.as_bytes()[..10], b"HELLOTHERE");
        assert_eq!(message.row_text(0), b"HELLO");
        assert_eq!(message.row_text(1), b"THERE");
    }

    #[test]
    fn test_newline_ends_line() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);

        message.load_row(b"Thu 14\nignored", 2);
        assert_eq!(message.row_length(2), 6);
        assert_eq!(&message.as_bytes()[..7], b"Thu 14 ");

        message.load_row(b"AB\r\n", 0);
        assert_eq!(message.row_length(0), 2);
    }

    #[test]
    fn test_nul_ends_line() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);

        message.load_row(b"HI\0GARBAGE", 0);
        assert_eq!(message.row_text(0), b"HI");
    }

    #[test]
    fn test_long_text_truncates_at_capacity() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(&[b'A'; 200], 0);

        let long = [b'B'; 300];
        let copied = message.try_load_row(&long, 1).unwrap();

        assert_eq!(copied, BUFFER_CAPACITY - 200);
        assert_eq!(message.row_length(1), 56);
        assert!(message.as_bytes()[200..].iter().all(|&c| c == b'B'));
    }

    #[test]
    fn test_row_after_full_buffer_is_empty() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(&[b'A'; BUFFER_CAPACITY], 0);
        message.load_row(b"NO ROOM", 1);

        assert_eq!(message.row_lengths(), [256, 0, 0, 0]);
        assert_eq!(message.row_text(1), b"");
    }

    #[test]
    fn test_block_path_writes_at_offset_zero() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(b"ROW0", 0);
        message.load_row(b"ROW1", 1);

        message.load_row(b"WHOLE MESSAGE\r\n", BLOCK_ROW);

        assert_eq!(message.row_length(0), 13);
        assert_eq!(message.block_text(), b"WHOLE MESSAGE");
        assert!(!message.is_row_mode());
        // Row 1's length slot is left alone
        assert_eq!(message.row_length(1), 4);
    }

    #[test]
    fn test_block_path_regardless_of_mode() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(b"FIRST", BLOCK_ROW);
        message.load_row(b"2ND", BLOCK_ROW);

        assert_eq!(message.row_length(0), 3);
        assert_eq!(&message.as_bytes()[..5], b"2NDST");
    }

    #[test]
    fn test_block_truncates_at_capacity() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        let copied = message.try_load_row(&[b'Z'; 400], BLOCK_ROW).unwrap();
        assert_eq!(copied, BUFFER_CAPACITY);
        assert_eq!(message.row_length(0), BUFFER_CAPACITY);
    }

    #[test]
    fn test_out_of_range_rows_are_ignored() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(b"KEEP", 0);
        let before = *message.as_bytes();
        let lengths = message.row_lengths();

        for row in [4, 5, -2, i32::MIN, i32::MAX] {
            message.load_row(b"CLOBBER", row);
            assert_eq!(message.as_bytes(), &before);
            assert_eq!(message.row_lengths(), lengths);
        }

        assert_eq!(
            message.try_load_row(b"X", 5),
            Err(MessageError::InvalidRow(5))
        );
        assert_eq!(
            message.load(b"X", LoadTarget::Row(4)),
            Err(MessageError::InvalidRow(4))
        );
    }

    #[test]
    fn test_out_of_order_load_overlaps() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(b"AAAA", 0);
        message.load_row(b"BBBB", 1);

        // Growing row 0 runs into row 1's data
        message.load_row(b"CCCCCC", 0);

        assert_eq!(&message.as_bytes()[..8], b"CCCCCCBB");
        assert_eq!(message.row_text(1), b"BB  ");
    }

    #[test]
    fn test_load_rows_is_order_independent() {
        let font = TestFont::new();
        let mut message = MessageBuffer::new(&font);
        message.load_row(b"PREVIOUS LONG FIRST ROW", 0);
        message.load_row(b"X", -1);

        let copied = message.load_rows([
            b"ONE".as_slice(),
            b"TWO\r\n".as_slice(),
            b"".as_slice(),
            b"FOUR".as_slice(),
        ]);

        assert_eq!(copied, [3, 3, 0, 4]);
        assert_eq!(message.row_lengths(), [3, 3, 0, 4]);
        assert_eq!(&message.as_bytes()[..10], b"ONETWOFOUR");
        assert!(message.is_row_mode());
    }

    #[test]
    fn test_from_index() {
        assert_eq!(LoadTarget::from_index(-1), Some(LoadTarget::Block));
        assert_eq!(LoadTarget::from_index(0), Some(LoadTarget::Row(0)));
        assert_eq!(LoadTarget::from_index(3), Some(LoadTarget::Row(3)));
        assert_eq!(LoadTarget::from_index(4), None);
        assert_eq!(LoadTarget::from_index(-2), None);
    }

    proptest! {
        #[test]
        fn prop_ascending_loads_stay_within_capacity(
            rows in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..120), 4)
        ) {
            let font = TestFont::new();
            let mut message = MessageBuffer::new(&font);
            for (row, text) in rows.iter().enumerate() {
                message.load_row(text, row as i32);
            }
            let total: usize = message.row_lengths().iter().map(|&l| l as usize).sum();
            prop_assert!(total <= BUFFER_CAPACITY);
        }

        #[test]
        fn prop_row_length_is_line_prefix(text in proptest::collection::vec(any::<u8>(), 0..64), row in 0i32..4) {
            let font = TestFont::new();
            let mut message = MessageBuffer::new(&font);
            message.load_row(&text, row);

            let expected = text
                .iter()
                .position(|&c| c == b'\n' || c == b'\r' || c == 0)
                .unwrap_or(text.len());
            prop_assert_eq!(message.row_length(row as usize), expected);
            prop_assert_eq!(message.row_text(row as usize), &text[..expected]);
        }

        #[test]
        fn prop_any_row_index_never_panics(text in proptest::collection::vec(any::<u8>(), 0..300), row in any::<i32>()) {
            let font = TestFont::new();
            let mut message = MessageBuffer::new(&font);
            message.load_row(&text, row);
            let _ = message.render();
        }
    }
}
