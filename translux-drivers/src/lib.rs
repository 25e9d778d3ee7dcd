//! Concrete implementations for the Translux sign
//!
//! This crate provides implementations of the traits defined in
//! translux-core:
//!
//! - Fonts (5×7 ASCII glyph table)

#![no_std]
#![deny(unsafe_code)]

pub mod font;

pub use font::Ascii5x7;
