//! Construction limits for untrusted input.
//!
//! [`ViewLimits`] caps the size of buffers built from raw bytes.
//! [`LimitExceeded`] is returned when a check fails, before any allocation.

use crate::element::ElementType;

/// Limits applied when wrapping raw bytes as a view.
///
/// All fields are optional; `None` means no limit for that resource.
///
/// # Example
///
/// ```
/// use imgview::ViewLimits;
///
/// let limits = ViewLimits::none()
///     .with_max_elements(100_000_000)
///     .with_max_ndim(4);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ViewLimits {
    /// Maximum total element count (product of the shape).
    pub max_elements: Option<u64>,
    /// Maximum number of dimensions.
    pub max_ndim: Option<usize>,
    /// Maximum buffer size in bytes.
    pub max_bytes: Option<u64>,
}

impl ViewLimits {
    /// No limits (all fields `None`).
    pub fn none() -> Self {
        Self::default()
    }

    /// Set maximum total element count.
    pub fn with_max_elements(mut self, max: u64) -> Self {
        self.max_elements = Some(max);
        self
    }

    /// Set maximum number of dimensions.
    pub fn with_max_ndim(mut self, max: usize) -> Self {
        self.max_ndim = Some(max);
        self
    }

    /// Set maximum buffer size in bytes.
    pub fn with_max_bytes(mut self, max: u64) -> Self {
        self.max_bytes = Some(max);
        self
    }

    /// Whether any limits are set.
    pub fn has_any(&self) -> bool {
        self.max_elements.is_some() || self.max_ndim.is_some() || self.max_bytes.is_some()
    }

    /// Check a shape and element type against all limits.
    ///
    /// Checks `max_ndim`, then `max_elements`, then `max_bytes`. An element
    /// count that overflows `u64` is reported as exceeding any element limit.
    pub fn check_shape(
        &self,
        shape: &[usize],
        element_type: ElementType,
    ) -> Result<(), LimitExceeded> {
        if let Some(max) = self.max_ndim
            && shape.len() > max
        {
            return Err(LimitExceeded::Ndim {
                actual: shape.len(),
                max,
            });
        }
        let elements = shape
            .iter()
            .try_fold(1u64, |acc, &d| acc.checked_mul(d as u64))
            .unwrap_or(u64::MAX);
        if let Some(max) = self.max_elements
            && elements > max
        {
            return Err(LimitExceeded::Elements {
                actual: elements,
                max,
            });
        }
        if let Some(max) = self.max_bytes {
            let bytes = elements.saturating_mul(element_type.byte_size() as u64);
            if bytes > max {
                return Err(LimitExceeded::Bytes { actual: bytes, max });
            }
        }
        Ok(())
    }
}

/// A construction limit was exceeded.
///
/// Each variant carries the actual value and the limit that was exceeded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LimitExceeded {
    /// Dimension count exceeded `max_ndim`.
    #[error("dimension count {actual} exceeds limit {max}")]
    Ndim {
        /// Actual dimension count.
        actual: usize,
        /// Maximum allowed.
        max: usize,
    },
    /// Element count exceeded `max_elements`.
    #[error("element count {actual} exceeds limit {max}")]
    Elements {
        /// Actual element count.
        actual: u64,
        /// Maximum allowed.
        max: u64,
    },
    /// Buffer size exceeded `max_bytes`.
    #[error("buffer size {actual} bytes exceeds limit {max}")]
    Bytes {
        /// Actual size in bytes.
        actual: u64,
        /// Maximum allowed.
        max: u64,
    },
}
