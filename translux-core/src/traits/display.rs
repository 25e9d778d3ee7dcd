//! Output trait for rendered matrices

use crate::render::BitMatrix;

/// Errors reported by a matrix sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// Communication error with the row drivers
    Communication,
    /// Sink is not ready to accept a frame
    Busy,
}

/// Consumer of rendered bit matrices
///
/// Implementations shift the packed bytes out to the physical LED rows.
/// How that happens is up to the driver; the core only guarantees the shape
/// and packing order of [`BitMatrix`].
pub trait MatrixSink {
    /// Show a freshly rendered matrix
    fn present(&mut self, matrix: &BitMatrix) -> Result<(), SinkError>;
}
