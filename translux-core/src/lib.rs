//! Board-agnostic core logic for the Translux message sign
//!
//! This crate contains everything between "a line of text arrived" and
//! "here are the bits for the LED rows", without touching hardware:
//!
//! - Font and output traits (glyph lookup, matrix sink)
//! - Message buffer with four logical rows sharing one character buffer
//! - Row loader and initializer
//! - Renderer producing the packed 7×20×4 bit matrix
//! - Sign configuration stored as postcard binary data
//! - Command console tying the serial protocol to the buffer

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod message;
pub mod render;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use message::{LoadTarget, MessageBuffer, MessageError, BUFFER_CAPACITY, ROW_COUNT};
pub use render::{BitMatrix, CHANNELS, MATRIX_BYTES, PIXEL_ROWS};
pub use traits::{FontProvider, MatrixSink, SinkError};
