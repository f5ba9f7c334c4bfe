//! Construction errors.

use crate::element::ElementType;
use crate::limits::LimitExceeded;
use crate::tag::ChannelTag;

/// Errors from building a view out of caller-supplied data.
///
/// Slicing never returns these: slice failures come from the array engine
/// and are surfaced unchanged as panics.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ImageError {
    /// The array engine rejected the shape for the supplied data.
    #[error("cannot build array: {0}")]
    Shape(#[from] ndarray::ShapeError),
    /// Raw bytes were declared with a different element type than requested.
    #[error("element type mismatch, expected {expected}, got {actual}")]
    ElementTypeMismatch {
        /// Element type of the view being built.
        expected: ElementType,
        /// Element type the bytes were declared as.
        actual: ElementType,
    },
    /// Raw byte length does not match the shape and element size.
    #[error("byte length mismatch, expected {expected}, got {actual}")]
    ByteLength {
        /// Bytes required by the shape.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
    /// A construction limit was exceeded.
    #[error(transparent)]
    Limit(#[from] LimitExceeded),
    /// The view's tag does not match the requested pixel type.
    #[error("tag mismatch, expected {expected}, got {actual}")]
    TagMismatch {
        /// Tag implied by the pixel type.
        expected: ChannelTag,
        /// Tag of the view.
        actual: ChannelTag,
    },
    /// The view's shape cannot be laid out as `(height, width[, channels])` pixels.
    #[error("shape {shape:?} does not fit a {channels}-channel pixel layout")]
    PixelLayout {
        /// Shape of the view.
        shape: Vec<usize>,
        /// Channels per pixel of the requested pixel type.
        channels: usize,
    },
}
