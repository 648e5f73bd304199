//! # Object Paths
//!
//! Validated hierarchical object paths and the pure path utilities used on
//! raw path strings.
//!
//! An object path is a `/`-separated sequence of segments that always begins
//! with `/`. Only the root path `/` may end with a slash, and no segment may
//! be empty.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PathError;

/// A validated object path.
///
/// Ordering is plain lexicographic ordering of the underlying string, which
/// is the order the association resolver publishes its results in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Validate and wrap a path string.
    pub fn new(path: impl Into<String>) -> Result<Self, PathError> {
        let path = path.into();
        validate(&path)?;
        Ok(Self(path))
    }

    /// The root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Iterate the non-empty segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    /// The last segment, or `None` for the root.
    #[must_use]
    pub fn leaf(&self) -> Option<&str> {
        self.segments().last()
    }

    /// The parent path, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// Append one segment.
    pub fn join(&self, segment: &str) -> Result<Self, PathError> {
        if segment.is_empty() || segment.contains('/') {
            return Err(PathError::InvalidSegment {
                segment: segment.to_string(),
            });
        }
        if self.is_root() {
            Ok(Self(format!("/{}", segment)))
        } else {
            Ok(Self(format!("{}/{}", self.0, segment)))
        }
    }

    /// True when `self` lies strictly below `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, ancestor: &ObjectPath) -> bool {
        if ancestor.is_root() {
            return !self.is_root();
        }
        self.0.len() > ancestor.0.len()
            && self.0.starts_with(&ancestor.0)
            && self.0.as_bytes()[ancestor.0.len()] == b'/'
    }

    /// Number of segment levels `self` lies below `ancestor`.
    ///
    /// Returns `None` when `self` is not a descendant.
    #[must_use]
    pub fn levels_below(&self, ancestor: &ObjectPath) -> Option<usize> {
        if !self.is_descendant_of(ancestor) {
            return None;
        }
        Some(self.segments().count() - ancestor.segments().count())
    }
}

fn validate(path: &str) -> Result<(), PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    if !path.starts_with('/') {
        return Err(PathError::NotAbsolute {
            path: path.to_string(),
        });
    }
    if path.len() > 1 && path.ends_with('/') {
        return Err(PathError::TrailingSlash {
            path: path.to_string(),
        });
    }
    if path.len() > 1 && path[1..].split('/').any(str::is_empty) {
        return Err(PathError::EmptySegment {
            path: path.to_string(),
        });
    }
    Ok(())
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ObjectPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::str::FromStr for ObjectPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<ObjectPath> for String {
    fn from(path: ObjectPath) -> Self {
        path.0
    }
}

/// Replace every byte outside `[A-Za-z0-9_/]` with `_`.
///
/// Works byte by byte: a multi-byte character becomes one `_` per byte, so
/// the output always has the same `len()` as the input.
#[must_use]
pub fn escape_for_bus(input: &str) -> String {
    input
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'/' {
                char::from(b)
            } else {
                '_'
            }
        })
        .collect()
}

/// Return the `index`-th non-empty segment of `path`, stem-stripped.
///
/// Segments are counted from zero: for `/0th/1st/2nd` index 1 is `1st`.
/// A segment that looks like a file name with an extension loses the
/// extension (`host0.conf` becomes `host0`), matching filesystem stem
/// semantics.
pub fn nth_path_segment(path: &str, index: i64) -> Result<String, PathError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let count = segments.len();
    let position = usize::try_from(index)
        .ok()
        .filter(|&i| i < count)
        .ok_or(PathError::SegmentNotFound { index, count })?;
    Ok(stem(segments[position]).to_string())
}

fn stem(segment: &str) -> &str {
    if segment == "." || segment == ".." {
        return segment;
    }
    match segment.rfind('.') {
        Some(0) | None => segment,
        Some(dot) => &segment[..dot],
    }
}
