//! Channel-layout tags.

use core::fmt;

/// Channel layout classification of a view.
///
/// The tag is metadata: it never changes the underlying buffer. Slicing a
/// [`Bgr`](ChannelTag::Bgr) or [`Rgb`](ChannelTag::Rgb) view down to two
/// dimensions yields a [`Gray`](ChannelTag::Gray) view; see
/// [`ImageView::index`](crate::ImageView::index).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ChannelTag {
    /// Generic image with no channel interpretation.
    #[default]
    Image,
    /// Blue, green, red along the last axis.
    Bgr,
    /// Red, green, blue along the last axis.
    Rgb,
    /// Single luminance plane.
    Gray,
}

impl ChannelTag {
    /// Whether this tag describes interleaved color channels (BGR or RGB).
    ///
    /// Only channel-bearing tags are subject to downgrade on slicing.
    #[inline]
    pub const fn is_channel_bearing(self) -> bool {
        matches!(self, Self::Bgr | Self::Rgb)
    }

    /// Number of channels along the last axis implied by the tag, if any.
    #[inline]
    pub const fn channels(self) -> Option<usize> {
        match self {
            Self::Image => None,
            Self::Bgr | Self::Rgb => Some(3),
            Self::Gray => Some(1),
        }
    }

    /// Short uppercase name, e.g. `"BGR"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Bgr => "BGR",
            Self::Rgb => "RGB",
            Self::Gray => "GRAY",
        }
    }
}

impl fmt::Display for ChannelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_bearing() {
        assert!(ChannelTag::Bgr.is_channel_bearing());
        assert!(ChannelTag::Rgb.is_channel_bearing());
        assert!(!ChannelTag::Gray.is_channel_bearing());
        assert!(!ChannelTag::Image.is_channel_bearing());
    }

    #[test]
    fn channels() {
        assert_eq!(ChannelTag::Image.channels(), None);
        assert_eq!(ChannelTag::Bgr.channels(), Some(3));
        assert_eq!(ChannelTag::Rgb.channels(), Some(3));
        assert_eq!(ChannelTag::Gray.channels(), Some(1));
    }

    #[test]
    fn default_is_generic() {
        assert_eq!(ChannelTag::default(), ChannelTag::Image);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", ChannelTag::Bgr), "BGR");
        assert_eq!(format!("{}", ChannelTag::Gray), "GRAY");
        assert_eq!(format!("{}", ChannelTag::Image), "Image");
    }
}
