//! Constant values used by WordprocessingML packages.

/// Open XML relationship target modes
pub mod target_mode {
    /// Internal relationship target mode (default)
    pub const INTERNAL: &str = "Internal";

    /// External relationship target mode (e.g., hyperlinks to external URLs)
    pub const EXTERNAL: &str = "External";
}

/// Relationship type URIs used in WordprocessingML packages.
///
/// Strict-conformance packages use a different namespace prefix for the same
/// types; compare with [`reltype_matches`] rather than by equality.
pub mod relationship_type {
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

    pub const COMMENTS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments";
    pub const ENDNOTES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/endnotes";
    pub const FONT_TABLE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/fontTable";
    pub const FOOTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
    pub const FOOTNOTES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footnotes";
    pub const HEADER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
    pub const NUMBERING: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    pub const CHART: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart";
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
}

/// Conventional part names, used when a relationship is missing.
pub mod part_name {
    pub const DOCUMENT: &str = "/word/document.xml";
    pub const STYLES: &str = "/word/styles.xml";
    pub const NUMBERING: &str = "/word/numbering.xml";
    pub const FONT_TABLE: &str = "/word/fontTable.xml";
    pub const COMMENTS: &str = "/word/comments.xml";
    pub const FOOTNOTES: &str = "/word/footnotes.xml";
    pub const ENDNOTES: &str = "/word/endnotes.xml";
    pub const THEME: &str = "/word/theme/theme1.xml";
    pub const CORE_PROPERTIES: &str = "/docProps/core.xml";
    pub const PACKAGE_RELS: &str = "/_rels/.rels";
}

/// Media content types by file extension.
pub mod content_type {
    pub const BMP: &str = "image/bmp";
    pub const GIF: &str = "image/gif";
    pub const JPEG: &str = "image/jpeg";
    pub const PNG: &str = "image/png";
    pub const SVG: &str = "image/svg+xml";
    pub const TIFF: &str = "image/tiff";
    pub const WEBP: &str = "image/webp";
    pub const X_EMF: &str = "image/x-emf";
    pub const X_WMF: &str = "image/x-wmf";
    pub const OCTET_STREAM: &str = "application/octet-stream";

    /// Content type for a media file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> &'static str {
        match ext.to_ascii_lowercase().as_str() {
            "bmp" => BMP,
            "gif" => GIF,
            "jpg" | "jpeg" | "jpe" => JPEG,
            "png" => PNG,
            "svg" => SVG,
            "tif" | "tiff" => TIFF,
            "webp" => WEBP,
            "emf" => X_EMF,
            "wmf" => X_WMF,
            _ => OCTET_STREAM,
        }
    }
}

/// Whether `reltype` is the relationship type `expected`, accepting both the
/// transitional and strict namespaces.
pub fn reltype_matches(reltype: &str, expected: &str) -> bool {
    if reltype == expected {
        return true;
    }
    fn tail(s: &str) -> &str {
        s.rsplit('/').next().unwrap_or(s)
    }
    tail(reltype) == tail(expected) && reltype.contains("relationships")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type::from_extension("JPG"), "image/jpeg");
        assert_eq!(content_type::from_extension("png"), "image/png");
        assert_eq!(content_type::from_extension("emf"), "image/x-emf");
        assert_eq!(content_type::from_extension("bin"), "application/octet-stream");
    }

    #[test]
    fn test_reltype_matches_strict() {
        assert!(reltype_matches(
            "http://purl.oclc.org/ooxml/officeDocument/relationships/image",
            relationship_type::IMAGE
        ));
        assert!(!reltype_matches(relationship_type::HEADER, relationship_type::FOOTER));
    }
}
