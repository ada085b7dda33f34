//! Locations of nodes inside a typed XML document.

use std::fmt;

/// One step from a container to its child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// The child stored under `key` in an object.
    Key(String),
    /// The child at a position in a list (or, before the container shape is
    /// known, the n-th child element).
    Index(usize),
}

/// Path from the document root to a node, rendered JSON-pointer style:
/// `/` for the root, `/users/0/name` below it. `~` and `/` inside keys are
/// escaped as `~0` and `~1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<Segment>,
}

impl NodePath {
    /// The path of the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// This path extended by an object key.
    pub fn key(&self, key: &str) -> Self {
        self.child(Segment::Key(key.to_string()))
    }

    /// This path extended by a list index.
    pub fn index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of steps below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            f.write_str("/")?;
            match segment {
                Segment::Key(key) => f.write_str(&key.replace('~', "~0").replace('/', "~1"))?,
                Segment::Index(i) => write!(f, "{}", i)?,
            }
        }
        Ok(())
    }
}
