//! Channel-tagged image views over shared buffers.

use std::fmt;

use ndarray::{ArcArray, Array, Array1, ArrayView, ArrayViewD, Dimension, IxDyn, SliceInfoElem};

use crate::dispatch;
use crate::element::{Element, ElementType};
use crate::error::ImageError;
use crate::limits::ViewLimits;
use crate::provenance::Provenance;
use crate::tag::ChannelTag;

/// Full range along one axis.
const FULL: SliceInfoElem = SliceInfoElem::Slice {
    start: 0,
    end: None,
    step: 1,
};

/// Data that can be wrapped as a view's buffer.
///
/// Owned and shared arrays are wrapped without copying; borrowed views are
/// copied into fresh storage. `None` becomes an empty buffer of shape `[0]`.
pub trait IntoBuffer<A> {
    /// Convert into the shared dynamic-dimension buffer held by a view.
    fn into_buffer(self) -> ArcArray<A, IxDyn>;
}

impl<A: Clone, D: Dimension> IntoBuffer<A> for Array<A, D> {
    fn into_buffer(self) -> ArcArray<A, IxDyn> {
        self.into_dyn().into_shared()
    }
}

impl<A, D: Dimension> IntoBuffer<A> for ArcArray<A, D> {
    fn into_buffer(self) -> ArcArray<A, IxDyn> {
        self.into_dyn()
    }
}

impl<A: Clone, D: Dimension> IntoBuffer<A> for ArrayView<'_, A, D> {
    fn into_buffer(self) -> ArcArray<A, IxDyn> {
        self.to_owned().into_dyn().into_shared()
    }
}

impl<A: Clone> IntoBuffer<A> for Vec<A> {
    fn into_buffer(self) -> ArcArray<A, IxDyn> {
        Array1::from_vec(self).into_buffer()
    }
}

impl<A> IntoBuffer<A> for ImageView<A> {
    fn into_buffer(self) -> ArcArray<A, IxDyn> {
        self.data
    }
}

impl<A: Clone, T: IntoBuffer<A>> IntoBuffer<A> for Option<T> {
    fn into_buffer(self) -> ArcArray<A, IxDyn> {
        match self {
            Some(data) => data.into_buffer(),
            None => {
                log::debug!("absent input, wrapping an empty buffer");
                Array1::from_vec(Vec::new()).into_buffer()
            }
        }
    }
}

/// An image: a shared n-dimensional buffer with a channel tag and provenance.
///
/// Views are immutable handles. Indexing produces new views that alias the
/// parent's storage and carry the parent's provenance; the tag of the result
/// is chosen by [`resolve_tag`](crate::resolve_tag).
///
/// Cloning is cheap: the buffer and provenance are reference counted.
pub struct ImageView<A> {
    data: ArcArray<A, IxDyn>,
    tag: ChannelTag,
    provenance: Provenance,
}

impl<A> ImageView<A> {
    pub(crate) fn from_parts(
        tag: ChannelTag,
        data: ArcArray<A, IxDyn>,
        provenance: Provenance,
    ) -> Self {
        Self {
            data,
            tag,
            provenance,
        }
    }

    // Construction ------------------------------------------------------------

    /// Wrap `data` under `tag`.
    ///
    /// Never fails: absent data (`None`) yields an empty view of shape `[0]`.
    pub fn with_tag(
        tag: ChannelTag,
        data: impl IntoBuffer<A>,
        provenance: impl Into<Provenance>,
    ) -> Self {
        Self::from_parts(tag, data.into_buffer(), provenance.into())
    }

    /// Generic image with no channel interpretation.
    pub fn image(data: impl IntoBuffer<A>, provenance: impl Into<Provenance>) -> Self {
        Self::with_tag(ChannelTag::Image, data, provenance)
    }

    /// BGR image, channels along the last axis.
    pub fn bgr(data: impl IntoBuffer<A>, provenance: impl Into<Provenance>) -> Self {
        Self::with_tag(ChannelTag::Bgr, data, provenance)
    }

    /// RGB image, channels along the last axis.
    pub fn rgb(data: impl IntoBuffer<A>, provenance: impl Into<Provenance>) -> Self {
        Self::with_tag(ChannelTag::Rgb, data, provenance)
    }

    /// Grayscale image.
    pub fn gray(data: impl IntoBuffer<A>, provenance: impl Into<Provenance>) -> Self {
        Self::with_tag(ChannelTag::Gray, data, provenance)
    }

    /// Empty view of shape `[0]`, as built from absent input.
    pub fn empty(tag: ChannelTag, provenance: impl Into<Provenance>) -> Self
    where
        A: Clone,
    {
        Self::with_tag(tag, None::<Vec<A>>, provenance)
    }

    /// Build from a flat row-major vector and a shape.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Shape`] if `data.len()` does not match `shape`.
    pub fn from_shape_vec(
        tag: ChannelTag,
        shape: &[usize],
        data: Vec<A>,
        provenance: impl Into<Provenance>,
    ) -> Result<Self, ImageError> {
        let data = ArcArray::from_shape_vec(IxDyn(shape), data)?;
        Ok(Self::from_parts(tag, data, provenance.into()))
    }

    // Attributes --------------------------------------------------------------

    /// Channel tag.
    #[inline]
    pub fn tag(&self) -> ChannelTag {
        self.tag
    }

    /// Origin of the data.
    #[inline]
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Dimension sizes.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Total element count.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the view holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The shared buffer.
    #[inline]
    pub fn data(&self) -> &ArcArray<A, IxDyn> {
        &self.data
    }

    /// Borrow the buffer as a plain array view.
    #[inline]
    pub fn as_array(&self) -> ArrayViewD<'_, A> {
        self.data.view()
    }

    /// Consume the view and return its buffer.
    pub fn into_data(self) -> ArcArray<A, IxDyn> {
        self.data
    }

    // Derived views -----------------------------------------------------------

    /// Slice the view.
    ///
    /// The result aliases this view's storage and carries its provenance. A
    /// BGR or RGB view sliced down to exactly two dimensions yields a GRAY
    /// view; every other result keeps this view's tag.
    ///
    /// `spec` is anything that exposes `[SliceInfoElem]`: a slice, an array,
    /// a `Vec`, or the output of [`ndarray::s!`].
    ///
    /// # Panics
    ///
    /// Panics if the array engine rejects `spec`: an element count other than
    /// [`ndim`](Self::ndim), an index or range out of bounds, or a zero step.
    pub fn index(&self, spec: impl AsRef<[SliceInfoElem]>) -> Self {
        dispatch::dispatch(self.tag, &self.provenance, &self.data, spec.as_ref())
    }

    /// Select channel `c` along the last axis.
    ///
    /// Equivalent to indexing with `[.., .., c]` on a three-dimensional view,
    /// so a `(h, w, 3)` BGR or RGB view yields a `(h, w)` GRAY view.
    ///
    /// # Panics
    ///
    /// Panics if the view has no axes or `c` is out of bounds.
    pub fn channel(&self, c: usize) -> Self {
        let Ok(index) = isize::try_from(c) else {
            panic!("channel {c} out of bounds for shape {:?}", self.shape());
        };
        let mut spec = vec![FULL; self.ndim().saturating_sub(1)];
        spec.push(SliceInfoElem::Index(index));
        self.index(spec)
    }

    /// Zero-copy crop of the two leading axes.
    ///
    /// Trailing axes are kept whole, so a `(h, w, 3)` BGR view stays BGR.
    ///
    /// # Panics
    ///
    /// Panics if the view has fewer than two axes or the region is out of bounds.
    pub fn crop(&self, y: usize, x: usize, h: usize, w: usize) -> Self {
        let (Some(rows), Some(cols)) = (span(y, h), span(x, w)) else {
            panic!(
                "crop ({y}, {x}) + ({h}, {w}) out of bounds for shape {:?}",
                self.shape()
            );
        };
        let mut spec = vec![rows, cols];
        spec.resize(self.ndim().max(2), FULL);
        self.index(spec)
    }

    /// Same storage and provenance under another tag.
    pub fn retag(&self, tag: ChannelTag) -> Self {
        Self::from_parts(tag, self.data.clone(), self.provenance.clone())
    }

    /// Same storage and tag with another provenance.
    pub fn with_provenance(&self, provenance: impl Into<Provenance>) -> Self {
        Self::from_parts(self.tag, self.data.clone(), provenance.into())
    }

    /// Whether the elements of `self` and `other` occupy overlapping memory.
    ///
    /// This compares element address ranges, not allocations: two disjoint
    /// slices of one buffer do not share memory, while a slice and its parent
    /// do. Empty views never overlap anything.
    pub fn shares_memory<B>(&self, other: &ImageView<B>) -> bool {
        match (byte_span(&self.data), byte_span(&other.data)) {
            (Some((a0, a1)), Some((b0, b1))) => a0 < b1 && b0 < a1,
            _ => false,
        }
    }
}

impl<A: Clone> ImageView<A> {
    /// Element-wise derived view in fresh storage.
    ///
    /// Shape, tag and provenance are copied from `self`.
    pub fn mapv<B, F>(&self, f: F) -> ImageView<B>
    where
        B: Clone,
        F: FnMut(A) -> B,
    {
        ImageView::from_parts(
            self.tag,
            self.data.mapv(f).into_shared(),
            self.provenance.clone(),
        )
    }

    /// Deep copy into fresh storage with the same tag and provenance.
    pub fn to_owned_view(&self) -> Self {
        Self::from_parts(
            self.tag,
            self.data.to_owned().into_shared(),
            self.provenance.clone(),
        )
    }
}

impl<A: Element> ImageView<A> {
    /// Element type of the buffer.
    #[inline]
    pub fn element_type(&self) -> ElementType {
        A::ELEMENT_TYPE
    }

    /// Build from raw native-endian bytes declared as `element_type`.
    ///
    /// Limits are checked before any allocation. Bytes need not be aligned.
    ///
    /// # Errors
    ///
    /// - [`ImageError::ElementTypeMismatch`] if `element_type` is not `A`'s type.
    /// - [`ImageError::Limit`] if `limits` rejects the shape.
    /// - [`ImageError::ByteLength`] if `bytes` does not hold exactly the shape's elements.
    pub fn from_bytes(
        tag: ChannelTag,
        shape: &[usize],
        bytes: &[u8],
        element_type: ElementType,
        provenance: impl Into<Provenance>,
        limits: &ViewLimits,
    ) -> Result<Self, ImageError> {
        if element_type != A::ELEMENT_TYPE {
            return Err(ImageError::ElementTypeMismatch {
                expected: A::ELEMENT_TYPE,
                actual: element_type,
            });
        }
        limits.check_shape(shape, element_type)?;
        let size = core::mem::size_of::<A>();
        let expected = shape
            .iter()
            .try_fold(size, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| ndarray::ShapeError::from_kind(ndarray::ErrorKind::Overflow))?;
        if bytes.len() != expected {
            return Err(ImageError::ByteLength {
                expected,
                actual: bytes.len(),
            });
        }
        let elements = bytes
            .chunks_exact(size)
            .map(bytemuck::pod_read_unaligned::<A>)
            .collect();
        Self::from_shape_vec(tag, shape, elements, provenance)
    }
}

impl<A> Clone for ImageView<A> {
    fn clone(&self) -> Self {
        Self::from_parts(self.tag, self.data.clone(), self.provenance.clone())
    }
}

impl<A: Element> fmt::Debug for ImageView<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ImageView::{}({:?} {}, {:?})",
            self.tag,
            self.shape(),
            self.element_type(),
            self.provenance
        )
    }
}

impl<A: Element> fmt::Display for ImageView<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {} from {}",
            self.tag,
            self.shape(),
            self.element_type(),
            self.provenance
        )
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Slice of `len` elements starting at `start`, `None` past `isize::MAX`.
fn span(start: usize, len: usize) -> Option<SliceInfoElem> {
    let end = start.checked_add(len)?;
    Some(SliceInfoElem::Slice {
        start: isize::try_from(start).ok()?,
        end: Some(isize::try_from(end).ok()?),
        step: 1,
    })
}

/// Half-open byte address range covered by the elements of `data`.
fn byte_span<A>(data: &ArcArray<A, IxDyn>) -> Option<(usize, usize)> {
    if data.is_empty() {
        return None;
    }
    let size = core::mem::size_of::<A>().max(1) as isize;
    let base = data.as_ptr() as isize;
    let (mut lo, mut hi) = (base, base);
    for (&dim, &stride) in data.shape().iter().zip(data.strides()) {
        let reach = (dim as isize - 1) * stride * size;
        if reach < 0 {
            lo += reach;
        } else {
            hi += reach;
        }
    }
    Some((lo as usize, hi as usize + size as usize))
}
