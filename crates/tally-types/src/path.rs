use serde::{Deserialize, Serialize};
use std::fmt;

/// A `.`-separated name such as `foo.bar`.
///
/// Variables are resolved segment by segment; function names are looked up
/// by their joined form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DottedIdentifier {
    segments: Vec<String>,
}

impl DottedIdentifier {
    /// Create an identifier from its segments. Returns `None` if empty.
    pub fn new(segments: Vec<String>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    /// A single-segment identifier.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The root segment, looked up in the environment.
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// Append a member segment.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// The segments joined with `.`.
    pub fn joined(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for DottedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_rejected() {
        assert!(DottedIdentifier::new(vec![]).is_none());
    }

    #[test]
    fn test_push_and_display() {
        let mut id = DottedIdentifier::single("foo");
        id.push("bar");
        assert_eq!(id.root(), "foo");
        assert_eq!(id.segments().len(), 2);
        assert_eq!(id.to_string(), "foo.bar");
        assert_eq!(id.joined(), "foo.bar");
    }
}
