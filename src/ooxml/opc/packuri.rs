/// Part names inside the container.
///
/// A [`PackURI`] is the absolute, slash-rooted name of a part
/// (`/word/document.xml`). The archive member name is the same string
/// without the leading slash.
use crate::ooxml::opc::error::{OpcError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackURI {
    /// The full pack URI string (e.g., "/word/document.xml")
    uri: String,
}

impl PackURI {
    /// Create a new PackURI. The string must begin with a forward slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(OpcError::InvalidPartName(format!(
                "PackURI must begin with slash, got '{}'",
                uri
            )));
        }
        Ok(PackURI { uri })
    }

    /// Build a PackURI from an archive member name (`word/document.xml`).
    ///
    /// Backslash separators written by some producers are normalized.
    pub fn from_membername(member: &str) -> Self {
        let cleaned = member.replace('\\', "/");
        PackURI {
            uri: Self::normalize_path(&format!("/{}", cleaned.trim_start_matches('/'))),
        }
    }

    /// Resolve a relationship target against the directory of its source part.
    ///
    /// `("/word", "media/image1.png")` gives `/word/media/image1.png`,
    /// `("/word", "../customXml/item1.xml")` gives `/customXml/item1.xml`.
    /// Absolute targets are taken as-is.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self> {
        let relative_ref = relative_ref.replace('\\', "/");
        let joined = if relative_ref.starts_with('/') {
            relative_ref
        } else if base_uri.ends_with('/') {
            format!("{}{}", base_uri, relative_ref)
        } else {
            format!("{}/{}", base_uri, relative_ref)
        };
        Self::new(Self::normalize_path(&joined))
    }

    /// Directory portion, e.g. `/word` for `/word/document.xml`.
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// File name portion, e.g. `document.xml`.
    pub fn filename(&self) -> &str {
        match self.uri.rfind('/') {
            Some(pos) => &self.uri[pos + 1..],
            None => "",
        }
    }

    /// Extension without the leading period.
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        match filename.rfind('.') {
            Some(pos) => &filename[pos + 1..],
            None => "",
        }
    }

    /// File name without extension, e.g. `header2` for `/word/header2.xml`.
    pub fn stem(&self) -> &str {
        let filename = self.filename();
        match filename.rfind('.') {
            Some(pos) => &filename[..pos],
            None => filename,
        }
    }

    /// Numeric suffix of the file stem, e.g. 2 for `/word/header2.xml`.
    pub fn idx(&self) -> Option<u32> {
        let stem = self.stem();
        let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 || digits == stem.len() {
            return None;
        }
        stem[stem.len() - digits..].parse::<u32>().ok()
    }

    /// Archive member name (URI without the leading slash).
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// The relationship part that belongs to this part,
    /// e.g. `/word/_rels/document.xml.rels`.
    pub fn rels_uri(&self) -> PackURI {
        let base = self.base_uri();
        let uri = if base == "/" {
            format!("/_rels/{}.rels", self.filename())
        } else {
            format!("{}/_rels/{}.rels", base, self.filename())
        };
        PackURI { uri }
    }

    /// Get the full URI string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// Resolve `.` and `..` segments and collapse repeated slashes.
    fn normalize_path(path: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for part in path.split('/') {
            match part {
                "" | "." => {},
                ".." => {
                    parts.pop();
                },
                _ => parts.push(part),
            }
        }
        format!("/{}", parts.join("/"))
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packuri_new() {
        assert!(PackURI::new("/word/document.xml").is_ok());
        assert!(PackURI::new("word/document.xml").is_err());
    }

    #[test]
    fn test_components() {
        let uri = PackURI::new("/word/header12.xml").unwrap();
        assert_eq!(uri.base_uri(), "/word");
        assert_eq!(uri.filename(), "header12.xml");
        assert_eq!(uri.ext(), "xml");
        assert_eq!(uri.stem(), "header12");
        assert_eq!(uri.idx(), Some(12));
        assert_eq!(uri.membername(), "word/header12.xml");

        let root = PackURI::new("/").unwrap();
        assert_eq!(root.base_uri(), "/");
        assert_eq!(root.filename(), "");
    }

    #[test]
    fn test_idx_requires_prefix() {
        assert_eq!(PackURI::new("/word/document.xml").unwrap().idx(), None);
        assert_eq!(PackURI::new("/word/media/123.png").unwrap().idx(), None);
    }

    #[test]
    fn test_from_rel_ref() {
        assert_eq!(
            PackURI::from_rel_ref("/word", "media/image1.png").unwrap().as_str(),
            "/word/media/image1.png"
        );
        assert_eq!(
            PackURI::from_rel_ref("/word", "../customXml/item1.xml").unwrap().as_str(),
            "/customXml/item1.xml"
        );
        assert_eq!(
            PackURI::from_rel_ref("/", "word/document.xml").unwrap().as_str(),
            "/word/document.xml"
        );
        assert_eq!(
            PackURI::from_rel_ref("/word", "/word/media/a.png").unwrap().as_str(),
            "/word/media/a.png"
        );
    }

    #[test]
    fn test_from_membername() {
        assert_eq!(PackURI::from_membername("word\\document.xml").as_str(), "/word/document.xml");
        assert_eq!(PackURI::from_membername("/docProps/core.xml").as_str(), "/docProps/core.xml");
    }

    #[test]
    fn test_rels_uri() {
        let uri = PackURI::new("/word/document.xml").unwrap();
        assert_eq!(uri.rels_uri().as_str(), "/word/_rels/document.xml.rels");
        let root = PackURI::new(PACKAGE_URI).unwrap();
        assert_eq!(root.rels_uri().as_str(), "/_rels/.rels");
    }
}
