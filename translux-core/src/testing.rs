//! Test doubles shared by the unit tests

use core::cell::Cell;

use crate::render::BitMatrix;
use crate::traits::{FontProvider, MatrixSink, SinkError};

/// Font whose row pattern is derived from the character code
///
/// Space is blank, every other character gets `(character + pixel_row)`
/// masked to five dots. Counts `init` calls.
pub struct TestFont {
    init_calls: Cell<u32>,
}

impl TestFont {
    pub fn new() -> Self {
        Self {
            init_calls: Cell::new(0),
        }
    }

    pub fn init_calls(&self) -> u32 {
        self.init_calls.get()
    }
}

impl FontProvider for TestFont {
    fn init(&self) {
        self.init_calls.set(self.init_calls.get() + 1);
    }

    fn row_dots(&self, pixel_row: u8, character: u8) -> u8 {
        if character == b' ' {
            0
        } else {
            character.wrapping_add(pixel_row) & 0x1F
        }
    }
}

/// Sink that remembers the last frame it was given
#[derive(Default)]
pub struct RecordingSink {
    pub frames: u32,
    pub last: Option<BitMatrix>,
    pub fail: bool,
}

impl MatrixSink for RecordingSink {
    fn present(&mut self, matrix: &BitMatrix) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::Communication);
        }
        self.frames += 1;
        self.last = Some(matrix.clone());
        Ok(())
    }
}
