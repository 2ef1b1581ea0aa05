//! Field paths locating a value inside nested input.
//!
//! A [`FieldPath`] is threaded through every schema node while validating so
//! that each [`ValidationFailure`](crate::ValidationFailure) knows both its
//! own key name and where it sits relative to the validation root.

use std::fmt::{self, Display};

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object field or map key (e.g. `members`, `name`)
    Field(String),
    /// Array element (e.g. `[0]`)
    Index(usize),
}

/// A path from the validation root to a nested value, e.g. `team.members[2].name`.
///
/// Paths are immutable: [`child`](FieldPath::child) and
/// [`element`](FieldPath::element) return extended copies.
///
/// # Example
///
/// ```rust
/// use sortie::FieldPath;
///
/// let path = FieldPath::named("team").child("members").element(2);
///
/// assert_eq!(path.to_string(), "team.members[2]");
/// assert_eq!(path.key_name(), "members[2]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The root path (no segments, empty key name).
    pub fn root() -> Self {
        Self::default()
    }

    /// A single-field path. An empty name yields the root path, mirroring the
    /// `validate(raw, "")` calling convention for top-level input.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Self::root()
        } else {
            Self {
                segments: vec![PathSegment::Field(name)],
            }
        }
    }

    /// Returns this path extended by an object field or map key.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns this path extended by an array index.
    pub fn element(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns `true` for the empty path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` when there are no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segments from outermost to innermost.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the innermost segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The name reported as `key_name` on failures at this path.
    ///
    /// This is the last field name, followed by any trailing indices:
    /// `roster[1][0]` for `team.roster[1][0]`, and `""` for the root.
    pub fn key_name(&self) -> String {
        let start = self
            .segments
            .iter()
            .rposition(|s| matches!(s, PathSegment::Field(_)))
            .unwrap_or(0);

        let mut name = String::new();
        for segment in &self.segments[start..] {
            match segment {
                PathSegment::Field(field) => name.push_str(field),
                PathSegment::Index(idx) => name.push_str(&format!("[{}]", idx)),
            }
        }
        name
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i > 0 => write!(f, ".{}", name)?,
                PathSegment::Field(name) => write!(f, "{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_root() {
        let path = FieldPath::named("");
        assert!(path.is_root());
        assert_eq!(path.key_name(), "");
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_nested_display() {
        let path = FieldPath::named("body").child("members").element(3).child("rank");
        assert_eq!(path.to_string(), "body.members[3].rank");
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_key_name_is_last_field() {
        let path = FieldPath::named("body").child("rank");
        assert_eq!(path.key_name(), "rank");
    }

    #[test]
    fn test_key_name_keeps_trailing_indices() {
        let path = FieldPath::named("roster").element(1).element(0);
        assert_eq!(path.key_name(), "roster[1][0]");

        let bare = FieldPath::root().element(4);
        assert_eq!(bare.key_name(), "[4]");
    }

    #[test]
    fn test_extension_does_not_mutate() {
        let base = FieldPath::named("tasks");
        let first = base.element(0);
        let second = base.element(1);

        assert_eq!(base.to_string(), "tasks");
        assert_eq!(first.to_string(), "tasks[0]");
        assert_eq!(second.to_string(), "tasks[1]");
        assert_eq!(first.last(), Some(&PathSegment::Index(0)));
    }
}
