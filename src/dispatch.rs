//! Slice dispatch: decides the tag of every view produced by indexing.
//!
//! The decision looks only at the acting tag and the dimensionality of the
//! raw slice. Element types and values are never inspected.

use ndarray::{ArcArray, IxDyn, SliceInfoElem};

use crate::provenance::Provenance;
use crate::tag::ChannelTag;
use crate::view::ImageView;

/// Tag of a slice result with `ndim` dimensions taken from a `tag` view.
///
/// BGR and RGB results with exactly two dimensions become GRAY. Every other
/// combination keeps `tag`, including channel-bearing results with fewer
/// than two dimensions.
#[inline]
pub const fn resolve_tag(tag: ChannelTag, ndim: usize) -> ChannelTag {
    match tag {
        ChannelTag::Bgr | ChannelTag::Rgb if ndim == 2 => ChannelTag::Gray,
        other => other,
    }
}

/// Slice `data` with `spec` and wrap the result under the resolved tag.
///
/// # Panics
///
/// Panics if the array engine rejects `spec` (wrong number of axes, index
/// or range out of bounds, zero step).
pub(crate) fn dispatch<A>(
    tag: ChannelTag,
    provenance: &Provenance,
    data: &ArcArray<A, IxDyn>,
    spec: &[SliceInfoElem],
) -> ImageView<A> {
    // Cloning an ArcArray only bumps the storage refcount.
    let raw = data.clone().slice_move(spec);
    wrap(tag, provenance, raw)
}

/// Wrap an already-sliced buffer under the tag resolved from its shape.
pub(crate) fn wrap<A>(
    tag: ChannelTag,
    provenance: &Provenance,
    raw: ArcArray<A, IxDyn>,
) -> ImageView<A> {
    let resolved = resolve_tag(tag, raw.ndim());
    if resolved != tag {
        log::debug!(
            "{tag} slice of {provenance} downgraded to {resolved}, shape {:?}",
            raw.shape()
        );
    } else {
        log::trace!("{tag} slice of {provenance} kept, shape {:?}", raw.shape());
    }
    ImageView::from_parts(resolved, raw, provenance.clone())
}
