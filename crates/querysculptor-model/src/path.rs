/// A dotted selection-key path, addressing a field from the root of a
/// [`QueryStructure`](crate::QueryStructure) down to a nested [`FieldNode`](crate::FieldNode).
///
/// The empty string denotes the root selection set. Each non-empty segment
/// is a child's selection key (its alias, or its field name when no alias
/// was given).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(String);

impl Path {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segments in root-to-leaf order. Empty for the root path.
    pub fn segments(&self) -> Vec<&str> {
        if self.is_root() {
            Vec::new()
        } else {
            self.0.split('.').collect()
        }
    }

    /// This path extended by one more segment.
    pub fn child(&self, segment: &str) -> Path {
        if self.is_root() {
            Path(segment.to_string())
        } else {
            Path(format!("{}.{}", self.0, segment))
        }
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::new(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::new(s)
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_has_no_segments() {
        assert!(Path::new("").segments().is_empty());
    }

    #[test]
    fn nested_path_splits_on_dot() {
        let p = Path::new("pokemons.moves");
        assert_eq!(p.segments(), vec!["pokemons", "moves"]);
    }

    #[test]
    fn child_extends_root_without_leading_dot() {
        let p = Path::new("");
        assert_eq!(p.child("pokemons").as_str(), "pokemons");
    }

    #[test]
    fn child_extends_nested_path_with_dot() {
        let p = Path::new("pokemons");
        assert_eq!(p.child("name").as_str(), "pokemons.name");
    }
}
