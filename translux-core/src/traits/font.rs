//! Font provider trait

/// Height of a glyph in pixel rows
pub const GLYPH_HEIGHT: u8 = 7;

/// Width of a glyph in dots
///
/// Only bits `0..GLYPH_WIDTH` of a row pattern are rendered.
pub const GLYPH_WIDTH: u8 = 5;

/// Glyph lookup for the renderer
///
/// A provider maps a pixel row and an 8-bit character code to the row's dot
/// pattern. Bit 0 is the leftmost dot. Pixel rows are counted from the top,
/// `0..GLYPH_HEIGHT`.
///
/// The space character must map to an all-blank pattern for every row; the
/// renderer uses it to pad short rows.
pub trait FontProvider {
    /// Reset or load the glyph table
    ///
    /// Called whenever a message buffer is initialized. ROM tables have
    /// nothing to do here.
    fn init(&self) {}

    /// Dot pattern of `character` on `pixel_row`
    fn row_dots(&self, pixel_row: u8, character: u8) -> u8;
}
