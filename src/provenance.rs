//! Origin metadata carried by every view.

use std::fmt;
use std::sync::Arc;

/// Where a view's data came from, usually a file path or URI.
///
/// Absent provenance is a valid value, not an error. Cloning is cheap: the
/// string is shared, so every derived view points at the same text.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Provenance(Option<Arc<str>>);

impl Provenance {
    /// Provenance for data of unknown origin.
    pub const fn none() -> Self {
        Self(None)
    }

    /// Provenance naming `origin`.
    pub fn new(origin: impl Into<Arc<str>>) -> Self {
        Self(Some(origin.into()))
    }

    /// The origin string, if known.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether the origin is known.
    #[inline]
    pub fn is_known(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Debug for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(origin) => write!(f, "{origin:?}"),
            None => f.write_str("<unknown>"),
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("<unknown>"))
    }
}

impl From<&str> for Provenance {
    fn from(origin: &str) -> Self {
        Self::new(origin)
    }
}

impl From<String> for Provenance {
    fn from(origin: String) -> Self {
        Self::new(origin)
    }
}

impl From<Arc<str>> for Provenance {
    fn from(origin: Arc<str>) -> Self {
        Self(Some(origin))
    }
}

/// Lossy: non-UTF-8 sequences in the path become U+FFFD. Callers that must
/// keep such paths byte-exact should pick their own text form.
impl From<&std::path::Path> for Provenance {
    fn from(path: &std::path::Path) -> Self {
        Self::new(path.to_string_lossy().into_owned())
    }
}

impl<T: Into<Provenance>> From<Option<T>> for Provenance {
    fn from(origin: Option<T>) -> Self {
        origin.map(Into::into).unwrap_or_default()
    }
}

impl From<&Provenance> for Provenance {
    fn from(origin: &Provenance) -> Self {
        origin.clone()
    }
}
