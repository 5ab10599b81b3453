use std::fmt;

/// Location of a property inside the tree being transformed, used in
/// errors and log fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Property(String),
    Index(usize),
}

impl PropertyPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn property(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Property(name.into()));
        Self { segments }
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Property(name) if position == 0 => f.write_str(name)?,
                PathSegment::Property(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_dotted_path_with_indices() {
        let path = PropertyPath::root()
            .property("songs")
            .index(1)
            .property("artist");
        assert_eq!(path.to_string(), "songs[1].artist");
        assert_eq!(PropertyPath::root().to_string(), "<root>");
        assert_eq!(PropertyPath::root().index(0).to_string(), "[0]");
    }
}
