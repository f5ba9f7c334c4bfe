//! Interop with `imgref` images of `rgb` pixels.
//!
//! Pixel types fix the channel tag: `Rgb<T>` maps to RGB `(h, w, 3)`,
//! `BGR<T>` to BGR `(h, w, 3)` and `Gray<T>` to GRAY `(h, w)`. Components are
//! copied in memory order; channels are never reordered.

use imgref::{ImgRef, ImgVec};
use ndarray::{ArcArray, IxDyn};
use rgb::alt::BGR;
use rgb::{Gray, Rgb};

use crate::element::Element;
use crate::error::ImageError;
use crate::provenance::Provenance;
use crate::tag::ChannelTag;
use crate::view::ImageView;

/// A pixel type with a fixed channel layout.
pub trait Pixel: Copy {
    /// Element type of each channel.
    type Component: Element;
    /// Tag of views holding this pixel type.
    const TAG: ChannelTag;
    /// Channels per pixel.
    const CHANNELS: usize;

    /// Append the channel values in memory order.
    fn push_components(self, out: &mut Vec<Self::Component>);

    /// Build a pixel from exactly [`CHANNELS`](Self::CHANNELS) values.
    fn from_components(c: &[Self::Component]) -> Self;
}

impl<T: Element> Pixel for Rgb<T> {
    type Component = T;
    const TAG: ChannelTag = ChannelTag::Rgb;
    const CHANNELS: usize = 3;

    fn push_components(self, out: &mut Vec<T>) {
        out.extend([self.r, self.g, self.b]);
    }

    fn from_components(c: &[T]) -> Self {
        Rgb {
            r: c[0],
            g: c[1],
            b: c[2],
        }
    }
}

impl<T: Element> Pixel for BGR<T> {
    type Component = T;
    const TAG: ChannelTag = ChannelTag::Bgr;
    const CHANNELS: usize = 3;

    fn push_components(self, out: &mut Vec<T>) {
        out.extend([self.b, self.g, self.r]);
    }

    fn from_components(c: &[T]) -> Self {
        BGR {
            b: c[0],
            g: c[1],
            r: c[2],
        }
    }
}

impl<T: Element> Pixel for Gray<T> {
    type Component = T;
    const TAG: ChannelTag = ChannelTag::Gray;
    const CHANNELS: usize = 1;

    fn push_components(self, out: &mut Vec<T>) {
        out.push(self.value());
    }

    fn from_components(c: &[T]) -> Self {
        Gray::new(c[0])
    }
}

/// Array shape of an `height × width` image of `P` pixels.
fn pixel_shape<P: Pixel>(height: usize, width: usize) -> Vec<usize> {
    if P::CHANNELS == 1 {
        vec![height, width]
    } else {
        vec![height, width, P::CHANNELS]
    }
}

impl<A: Element> ImageView<A> {
    /// Copy an image of pixels into a view tagged by the pixel type.
    ///
    /// Padding between rows (stride) is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Shape`] if the array engine cannot hold the
    /// image's dimensions.
    pub fn from_img<P>(
        img: ImgRef<'_, P>,
        provenance: impl Into<Provenance>,
    ) -> Result<Self, ImageError>
    where
        P: Pixel<Component = A>,
    {
        let (buf, width, height) = img.to_contiguous_buf();
        let mut components = Vec::with_capacity(buf.len() * P::CHANNELS);
        for &px in buf.iter() {
            px.push_components(&mut components);
        }
        let shape = pixel_shape::<P>(height, width);
        let data = ArcArray::from_shape_vec(IxDyn(&shape), components)?;
        Ok(Self::from_parts(P::TAG, data, provenance.into()))
    }

    /// Copy the view out as an image of pixels.
    ///
    /// # Errors
    ///
    /// - [`ImageError::TagMismatch`] if the view's tag is not the pixel type's tag.
    /// - [`ImageError::PixelLayout`] if the shape is not `(h, w)` for gray
    ///   pixels or `(h, w, channels)` for color pixels.
    pub fn to_img<P>(&self) -> Result<ImgVec<P>, ImageError>
    where
        P: Pixel<Component = A>,
    {
        if self.tag() != P::TAG {
            return Err(ImageError::TagMismatch {
                expected: P::TAG,
                actual: self.tag(),
            });
        }
        let shape = self.shape();
        let fits = match shape {
            [_, _] => P::CHANNELS == 1,
            [_, _, c] => P::CHANNELS > 1 && *c == P::CHANNELS,
            _ => false,
        };
        if !fits {
            return Err(ImageError::PixelLayout {
                shape: shape.to_vec(),
                channels: P::CHANNELS,
            });
        }
        let (height, width) = (shape[0], shape[1]);
        let components: Vec<A> = self.data().iter().copied().collect();
        let pixels = components
            .chunks_exact(P::CHANNELS)
            .map(P::from_components)
            .collect();
        Ok(ImgVec::new(pixels, width, height))
    }
}
