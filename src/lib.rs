//! Channel-tagged image views over shared n-dimensional pixel buffers.
//!
//! An [`ImageView`] pairs an `ndarray` buffer with a [`ChannelTag`] and a
//! [`Provenance`] naming where the pixels came from:
//!
//! - Construction never fails on absent input or absent provenance.
//! - [`ImageView::index`] slices without copying and threads the parent's
//!   provenance into the child.
//! - A BGR or RGB view sliced down to two dimensions becomes GRAY
//!   ([`resolve_tag`]); every other slice keeps the parent's tag.
//!
//! ```
//! use imgview::{ChannelTag, ImageView};
//! use ndarray::{Array3, s};
//!
//! let bgr = ImageView::bgr(Array3::<u8>::zeros((10, 10, 3)), "bgr.png");
//! let blue = bgr.index(s![.., .., 0]);
//! assert_eq!(blue.tag(), ChannelTag::Gray);
//! assert_eq!(blue.shape(), &[10, 10]);
//! assert_eq!(blue.provenance().as_str(), Some("bgr.png"));
//! ```
//!
//! Pixel values are never converted between color spaces; tags are metadata.

#![deny(unsafe_code)]

mod dispatch;
mod element;
mod error;
mod limits;
mod pixel;
mod provenance;
mod tag;
mod view;

pub use dispatch::resolve_tag;
pub use element::{Element, ElementType};
pub use error::ImageError;
pub use limits::{LimitExceeded, ViewLimits};
pub use pixel::Pixel;
pub use provenance::Provenance;
pub use tag::ChannelTag;
pub use view::{ImageView, IntoBuffer};

// Re-exports for callers building inputs and slice specs.
pub use imgref::{ImgRef, ImgVec};
pub use ndarray;
pub use rgb;
