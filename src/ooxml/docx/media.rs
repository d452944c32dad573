/// Media parts (images) referenced by the document.
///
/// Every internal image relationship of the main document, header and
/// footer parts is resolved to its part and kept as a shared byte payload.
/// The HTML renderer looks drawings up by part name to embed them.
use crate::common::error::{DiagnosticKind, Diagnostics};
use crate::ooxml::opc::constants::{content_type, relationship_type};
use crate::ooxml::opc::{OpcPackage, PackURI, Relationships};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// One decoded media part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaPart {
    /// File name, e.g. `image1.png`
    name: String,
    /// Absolute part name, e.g. `/word/media/image1.png`
    part_name: String,
    content_type: &'static str,
    data: Bytes,
}

impl MediaPart {
    pub fn new(part_name: &PackURI, data: Bytes) -> Self {
        Self {
            name: part_name.filename().to_string(),
            part_name: part_name.as_str().to_string(),
            content_type: content_type::from_extension(part_name.ext()),
            data,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn part_name(&self) -> &str {
        &self.part_name
    }

    #[inline]
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    #[inline]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// `data:` URL with the payload base64-encoded.
    pub fn data_url(&self) -> String {
        let mut url = String::with_capacity(self.data.len() * 4 / 3 + self.content_type.len() + 16);
        url.push_str("data:");
        url.push_str(self.content_type);
        url.push_str(";base64,");
        STANDARD.encode_string(&self.data, &mut url);
        url
    }
}

/// Media parts keyed by part name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Media {
    parts: BTreeMap<String, MediaPart>,
}

impl Media {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every image referenced from `sources`.
    ///
    /// A relationship whose target part is absent is recorded as a
    /// diagnostic. External images are left to the renderer.
    pub fn load(pkg: &OpcPackage, sources: &[&Relationships], diagnostics: &Diagnostics) -> Self {
        let mut targets: Vec<PackURI> = sources
            .iter()
            .flat_map(|rels| rels.all_of_type(relationship_type::IMAGE))
            .filter(|rel| !rel.is_external())
            .filter_map(|rel| rel.target_partname().ok())
            .collect();
        targets.sort();
        targets.dedup();

        let loaded: Vec<Result<MediaPart, PackURI>> = targets
            .into_par_iter()
            .map(|uri| match pkg.blob(&uri) {
                Some(data) => Ok(MediaPart::new(&uri, data.clone())),
                None => Err(uri),
            })
            .collect();

        let mut media = Self::new();
        for item in loaded {
            match item {
                Ok(part) => media.insert(part),
                Err(uri) => diagnostics.record(
                    uri.as_str(),
                    DiagnosticKind::MissingPart,
                    "referenced image part is missing",
                ),
            }
        }
        tracing::debug!(count = media.len(), "loaded media parts");
        media
    }

    pub fn insert(&mut self, part: MediaPart) {
        self.parts.insert(part.part_name.clone(), part);
    }

    /// Look up a media part by absolute part name.
    pub fn get(&self, part_name: &str) -> Option<&MediaPart> {
        self.parts.get(part_name)
    }

    /// Media parts sorted by part name.
    pub fn iter(&self) -> impl Iterator<Item = &MediaPart> {
        self.parts.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
