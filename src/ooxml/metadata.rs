/// OOXML core properties (`docProps/core.xml`).
///
/// Core properties follow Dublin Core plus OPC extensions and hold standard
/// metadata like title, author and creation date.
use crate::common::Metadata;
use crate::common::xml::XmlElement;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a `cp:coreProperties` root. Elements are matched by local name so
/// both `dc:` and `cp:` spellings are accepted.
pub fn parse_core_properties(root: &XmlElement) -> Metadata {
    let mut metadata = Metadata::default();
    for el in root.elements() {
        let text = el.text();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        let value = Some(text.to_string());
        match el.local_name() {
            "title" => metadata.title = value,
            "subject" => metadata.subject = value,
            "creator" | "author" => metadata.creator = value,
            "keywords" => metadata.keywords = value,
            "description" | "comment" => metadata.description = value,
            "lastModifiedBy" => metadata.last_modified_by = value,
            "revision" => metadata.revision = value,
            "category" => metadata.category = value,
            "contentStatus" => metadata.content_status = value,
            "created" => metadata.created = parse_datetime(text),
            "modified" => metadata.modified = parse_datetime(text),
            other => tracing::debug!(element = other, "skipping core property"),
        }
    }
    metadata
}

/// Parse an ISO 8601 timestamp into UTC.
///
/// Supports formats like:
/// - 2023-10-10T14:30:00Z
/// - 2023-10-10T14:30:00.1234567Z
/// - 2023-10-10T14:30:00+02:00
/// - 2023-10-10T14:30:00 (taken as UTC)
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%M:%S%.f"]
        .into_iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
