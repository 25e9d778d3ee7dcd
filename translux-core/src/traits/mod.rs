//! Traits for the sign's external collaborators
//!
//! These traits allow the core logic to work with any glyph table
//! and any display driver implementation.

pub mod display;
pub mod font;

pub use display::*;
pub use font::*;
