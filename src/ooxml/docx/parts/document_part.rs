/// DocumentPart - the main document part of a Word package, plus loading of
/// the optional parts it relates to.
use crate::common::error::{DiagnosticKind, Diagnostics, Error, Result};
use crate::common::xml::XmlElement;
use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::parts::DocumentBuilder;
use crate::ooxml::opc::constants::part_name;
use crate::ooxml::opc::{OpcPackage, PackURI, Relationships};

/// The main document part (normally `/word/document.xml`).
///
/// Loading fails only when the part is absent or is not well-formed XML.
/// Its relationships are degraded to an empty set when unreadable.
#[derive(Debug)]
pub struct DocumentPart {
    uri: PackURI,
    rels: Relationships,
    root: XmlElement,
}

impl DocumentPart {
    /// Locate and parse the main document part of `pkg`.
    pub fn load(pkg: &OpcPackage, diagnostics: &Diagnostics) -> Result<Self> {
        let uri = pkg.main_document_uri();
        let root = match pkg.xml_part(&uri) {
            Ok(Some(root)) => root,
            Ok(None) => return Err(Error::MissingMainDocument(uri.as_str().to_string())),
            Err(e) => {
                return Err(Error::MalformedMainDocument {
                    part: uri.as_str().to_string(),
                    message: e.to_string(),
                });
            },
        };
        let rels = part_relationships(pkg, &uri, diagnostics);
        tracing::debug!(part = uri.as_str(), relationships = rels.len(), "loaded main document part");
        Ok(Self { uri, rels, root })
    }

    #[inline]
    pub fn uri(&self) -> &PackURI {
        &self.uri
    }

    #[inline]
    pub fn relationships(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Build the document tree.
    pub fn build(&self, diagnostics: &Diagnostics) -> Result<Document> {
        DocumentBuilder::new(self.uri.as_str(), &self.rels, diagnostics).build_document(&self.root)
    }

    /// Part name of a related part, found by relationship type with
    /// `fallback` as the conventional location.
    pub fn related_uri(&self, reltype: &str, fallback: &str) -> Option<PackURI> {
        self.rels
            .by_type(reltype)
            .filter(|rel| !rel.is_external())
            .and_then(|rel| rel.target_partname().ok())
            .or_else(|| PackURI::new(fallback).ok())
    }
}

/// Relationships of `uri`; an unreadable relationship part is recorded and
/// replaced by an empty set.
pub(crate) fn part_relationships(pkg: &OpcPackage, uri: &PackURI, diagnostics: &Diagnostics) -> Relationships {
    match pkg.relationships(uri) {
        Ok(rels) => rels,
        Err(e) => {
            diagnostics.record(
                uri.rels_uri().as_str(),
                DiagnosticKind::MalformedPart,
                e.to_string(),
            );
            Relationships::new(uri.base_uri())
        },
    }
}

/// Parse an optional part. Absence and malformed XML are recorded as
/// diagnostics and yield `None`.
pub(crate) fn optional_part(pkg: &OpcPackage, uri: &PackURI, diagnostics: &Diagnostics) -> Option<XmlElement> {
    match pkg.xml_part(uri) {
        Ok(Some(root)) => {
            tracing::debug!(part = uri.as_str(), "loaded part");
            Some(root)
        },
        Ok(None) => {
            diagnostics.record(uri.as_str(), DiagnosticKind::MissingPart, "part not found");
            None
        },
        Err(e) => {
            diagnostics.record(uri.as_str(), DiagnosticKind::MalformedPart, e.to_string());
            None
        },
    }
}

/// Conventional location of the core-properties part.
pub(crate) fn core_properties_uri(pkg: &OpcPackage) -> Option<PackURI> {
    pkg.package_relationships()
        .ok()
        .and_then(|rels| {
            rels.by_type(crate::ooxml::opc::constants::relationship_type::CORE_PROPERTIES)
                .and_then(|rel| rel.target_partname().ok())
        })
        .or_else(|| PackURI::new(part_name::CORE_PROPERTIES).ok())
}
