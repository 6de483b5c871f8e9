//! Purpose: Locate a value inside a decoded document.
//! Exports: `DecodePath`, `PathSegment`.
//! Role: Attached to taxonomy errors so failures name the key/index that broke.
//! Invariants: Paths are built by appending; the root renders as `$`.
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DecodePath {
    segments: Vec<PathSegment>,
}

impl DecodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: impl Into<String>) -> Self {
        self.child(PathSegment::Key(key.into()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Index of the first array element on the path, if any.
    pub fn first_index(&self) -> Option<usize> {
        self.segments.iter().find_map(|segment| match segment {
            PathSegment::Index(index) => Some(*index),
            PathSegment::Key(_) => None,
        })
    }

    fn child(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for DecodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
