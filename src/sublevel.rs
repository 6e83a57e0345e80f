//! Sublevel addressing
//!
//! Maps a sublevel address (root, a single name, or an ordered path of
//! names) to the flat bucket key used by the snapshot. Addressing is a
//! pure, total function: every address maps to exactly one bucket key,
//! and buckets are created lazily on first write.

use tracing::warn;

/// Separator joining path segments into a bucket key.
///
/// Must not appear inside a segment, or two distinct addresses collide
/// on the same bucket.
pub(crate) const GLUE: &str = "$$";

/// Reserved bucket key for the root (unnamed) sublevel.
///
/// Distinct from any user identifier so root data cannot collide with a
/// named sublevel.
pub(crate) const NULL_SUBLEVEL: &str = "__null__";

/// A sublevel address
///
/// Order matters for paths: `["pages", "en"]` and `["en", "pages"]`
/// address different buckets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sublevel {
    /// The unnamed root sublevel
    Root,
    /// A single named sublevel
    Name(String),
    /// A nested sublevel path
    Path(Vec<String>),
}

impl Sublevel {
    /// Resolve this address to its bucket key.
    ///
    /// `Root` and an empty `Path` both normalize to the reserved
    /// sentinel, so the two spellings of "no sublevel" share a bucket.
    pub(crate) fn bucket_key(&self) -> String {
        match self {
            Sublevel::Root => NULL_SUBLEVEL.to_string(),
            Sublevel::Name(name) => {
                check_segment(name);
                name.clone()
            }
            Sublevel::Path(segments) if segments.is_empty() => NULL_SUBLEVEL.to_string(),
            Sublevel::Path(segments) => {
                for segment in segments {
                    check_segment(segment);
                }
                segments.join(GLUE)
            }
        }
    }
}

/// A segment containing the separator collides with a genuine path.
/// Addressing stays total, so this is logged rather than rejected.
fn check_segment(segment: &str) {
    if segment.contains(GLUE) {
        warn!(segment, "sublevel segment contains the path separator, addressing may collide");
    }
}

// =============================================================================
// Conversions for call-site ergonomics
// =============================================================================

impl From<&str> for Sublevel {
    fn from(name: &str) -> Self {
        Sublevel::Name(name.to_string())
    }
}

impl From<String> for Sublevel {
    fn from(name: String) -> Self {
        Sublevel::Name(name)
    }
}

/// `None` is the root sublevel
impl From<Option<&str>> for Sublevel {
    fn from(name: Option<&str>) -> Self {
        match name {
            Some(name) => Sublevel::Name(name.to_string()),
            None => Sublevel::Root,
        }
    }
}

impl From<Vec<String>> for Sublevel {
    fn from(segments: Vec<String>) -> Self {
        Sublevel::Path(segments)
    }
}

impl From<&[&str]> for Sublevel {
    fn from(segments: &[&str]) -> Self {
        Sublevel::Path(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Sublevel {
    fn from(segments: [&str; N]) -> Self {
        Sublevel::from(&segments[..])
    }
}
