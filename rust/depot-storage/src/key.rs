use std::fmt::{Display, Formatter};

/// Path separator shared by request paths and keys.
pub const SEPARATOR: char = '/';

/// A storage location derived from a request path.
///
/// The string form of a key never starts with [SEPARATOR]. No other
/// canonicalization happens: case is preserved and `.`/`..` segments are kept
/// verbatim. Backends that map keys onto a hierarchy are responsible for
/// rejecting segments they cannot contain.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(String);

impl Key {
    /// Normalizes a request path into a [Key] by stripping every leading
    /// separator. The rest of the path is kept unmodified.
    pub fn from_path(path: &str) -> Self {
        Self(path.trim_start_matches(SEPARATOR).to_owned())
    }

    /// The string form of this key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty `/`-delimited segments of this key.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|part| !part.is_empty())
    }

    /// True when every segment of `prefix` matches the leading segments of
    /// this key. The empty key is a prefix of every key.
    pub fn starts_with(&self, prefix: &Key) -> bool {
        let mut parts = self.parts();
        prefix.parts().all(|expected| parts.next() == Some(expected))
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(path: &str) -> Self {
        Self::from_path(path)
    }
}

impl From<String> for Key {
    fn from(path: String) -> Self {
        if path.starts_with(SEPARATOR) {
            Self::from_path(&path)
        } else {
            Self(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Key;

    #[test]
    fn it_removes_leading_slashes() {
        assert_eq!(Key::from_path("/foo/bar").as_str(), "foo/bar");
        assert_eq!(Key::from_path("///foo/bar").as_str(), "foo/bar");
    }

    #[test]
    fn it_keeps_relative_paths() {
        assert_eq!(Key::from_path("one/two").as_str(), "one/two");
    }

    #[test]
    fn it_normalizes_equivalent_paths_to_equal_keys() {
        assert_eq!(Key::from_path("/foo/bar"), Key::from_path("foo/bar"));
        assert_eq!(Key::from("/foo/bar"), Key::from(String::from("foo/bar")));
    }

    #[test]
    fn it_does_no_other_canonicalization() {
        assert_eq!(Key::from_path("/Foo/../Bar/").as_str(), "Foo/../Bar/");
        assert_eq!(Key::from_path("/").as_str(), "");
    }

    #[test]
    fn it_matches_prefixes_by_segment() {
        let key = Key::from_path("pkg/1.0/a.jar");

        assert!(key.starts_with(&Key::from_path("pkg")));
        assert!(key.starts_with(&Key::from_path("/pkg/1.0")));
        assert!(key.starts_with(&Key::default()));
        assert!(!key.starts_with(&Key::from_path("pk")));
        assert!(!key.starts_with(&Key::from_path("pkg/1.0/a.jar/b")));
    }
}
