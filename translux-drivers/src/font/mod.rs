//! Glyph tables

mod ascii5x7;

pub use ascii5x7::Ascii5x7;
