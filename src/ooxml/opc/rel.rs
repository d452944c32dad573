/// Relationship-related objects for package parts.
///
/// Every part may own a relationship part (`_rels/<name>.rels`) mapping short
/// ids (`rId3`) to a target. Internal targets are part names relative to the
/// owning part's directory; external targets are URLs.
use crate::common::xml::XmlElement;
use crate::ooxml::opc::constants::{reltype_matches, target_mode};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use serde::Serialize;
use std::collections::HashMap;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference as stored, either a relative part name or an external URL
    target_ref: String,

    /// Directory of the source part, used to resolve internal targets
    base_uri: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    pub fn new(
        r_id: String,
        reltype: String,
        target_ref: String,
        base_uri: String,
        is_external: bool,
    ) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            base_uri,
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Target reference exactly as stored in the relationship part.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Whether this relationship has the given type.
    #[inline]
    pub fn is_type(&self, reltype: &str) -> bool {
        reltype_matches(&self.reltype, reltype)
    }

    /// Absolute part name for internal relationships.
    ///
    /// Returns an error if this is an external relationship.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::ExternalTarget(self.r_id.clone()));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref)
    }

    /// Resolved target: the URL for external relationships, otherwise the
    /// absolute part name.
    pub fn target(&self) -> String {
        if self.is_external {
            return self.target_ref.clone();
        }
        match self.target_partname() {
            Ok(uri) => uri.as_str().to_string(),
            Err(_) => self.target_ref.clone(),
        }
    }
}

/// Relationships owned by one source part, keyed by id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Relationships {
    /// Directory of the source part
    base_uri: String,

    /// Map of relationship ID to Relationship
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    /// Create an empty collection for a source part in `base_uri`.
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            rels: HashMap::new(),
        }
    }

    /// Parse a relationship part.
    ///
    /// Entries missing an `Id` or `Target` are skipped.
    pub fn from_xml(base_uri: impl Into<String>, root: &XmlElement) -> Self {
        let mut rels = Self::new(base_uri);
        for entry in root.children_named("Relationship") {
            let (Some(r_id), Some(target)) = (entry.attr("Id"), entry.attr("Target")) else {
                tracing::debug!("skipping relationship without Id or Target");
                continue;
            };
            let reltype = entry.attr("Type").unwrap_or_default();
            let is_external = entry.attr("TargetMode") == Some(target_mode::EXTERNAL);
            rels.add_relationship(reltype.to_string(), target.to_string(), r_id.to_string(), is_external);
        }
        rels
    }

    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) {
        let rel = Relationship::new(
            r_id.clone(),
            reltype,
            target_ref,
            self.base_uri.clone(),
            is_external,
        );
        self.rels.insert(r_id, rel);
    }

    /// Get a relationship by its ID.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Resolved target of a relationship id.
    pub fn target(&self, r_id: &str) -> Option<String> {
        self.get(r_id).map(Relationship::target)
    }

    /// First relationship of the given type.
    pub fn by_type(&self, reltype: &str) -> Option<&Relationship> {
        let mut matches: Vec<&Relationship> = self.all_of_type(reltype).collect();
        matches.sort_by(|a, b| a.r_id.cmp(&b.r_id));
        matches.into_iter().next()
    }

    /// All relationships of the given type, unordered.
    pub fn all_of_type<'a, 'b>(&'a self, reltype: &'b str) -> impl Iterator<Item = &'a Relationship> + use<'a, 'b> {
        self.rels.values().filter(move |r| r.is_type(reltype))
    }

    /// Relationships sorted by id.
    pub fn sorted(&self) -> Vec<&Relationship> {
        let mut all: Vec<&Relationship> = self.rels.values().collect();
        all.sort_by(|a, b| a.r_id.cmp(&b.r_id));
        all
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    #[inline]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    const RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
  <Relationship Type="broken"/>
</Relationships>"#;

    #[test]
    fn test_from_xml() {
        let root = XmlElement::parse(RELS).unwrap();
        let rels = Relationships::from_xml("/word", &root);
        assert_eq!(rels.len(), 3);

        let image = rels.get("rId2").unwrap();
        assert!(image.is_type(rt::IMAGE));
        assert!(!image.is_external());
        assert_eq!(image.target(), "/word/media/image1.png");

        let link = rels.get("rId3").unwrap();
        assert!(link.is_external());
        assert_eq!(link.target(), "https://example.com/?a=1&b=2");
        assert!(link.target_partname().is_err());
    }

    #[test]
    fn test_by_type() {
        let root = XmlElement::parse(RELS).unwrap();
        let rels = Relationships::from_xml("/word", &root);
        assert_eq!(rels.by_type(rt::STYLES).map(|r| r.r_id()), Some("rId1"));
        assert!(rels.by_type(rt::NUMBERING).is_none());
        assert_eq!(rels.sorted().len(), 3);
        assert_eq!(rels.target("missing"), None);

        // the lookup key only needs to live for the call
        let styles = {
            let reltype = rt::STYLES.to_string();
            rels.by_type(&reltype)
        };
        assert_eq!(styles.map(|r| r.r_id()), Some("rId1"));
    }
}
