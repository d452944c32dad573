/// Document metadata from the core-properties part.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard document properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document author/creator
    pub creator: Option<String>,
    /// Keywords associated with the document
    pub keywords: Option<String>,
    /// Document description/comments
    pub description: Option<String>,
    /// Last person to modify the document
    pub last_modified_by: Option<String>,
    /// Revision number
    pub revision: Option<String>,
    /// Creation date
    pub created: Option<DateTime<Utc>>,
    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
    /// Document category
    pub category: Option<String>,
    /// Content status (draft, final, etc.)
    pub content_status: Option<String>,
}

impl Metadata {
    /// Check if the metadata contains any actual data.
    pub fn has_data(&self) -> bool {
        self.title.is_some()
            || self.subject.is_some()
            || self.creator.is_some()
            || self.keywords.is_some()
            || self.description.is_some()
            || self.last_modified_by.is_some()
            || self.revision.is_some()
            || self.created.is_some()
            || self.modified.is_some()
            || self.category.is_some()
            || self.content_status.is_some()
    }

    /// Flatten into `(key, value)` pairs with timestamps in RFC 3339.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let text_fields = [
            ("title", &self.title),
            ("subject", &self.subject),
            ("creator", &self.creator),
            ("keywords", &self.keywords),
            ("description", &self.description),
            ("lastModifiedBy", &self.last_modified_by),
            ("revision", &self.revision),
            ("category", &self.category),
            ("contentStatus", &self.content_status),
        ];
        for (key, value) in text_fields {
            if let Some(v) = value {
                pairs.push((key, v.clone()));
            }
        }
        if let Some(created) = self.created {
            pairs.push(("created", created.to_rfc3339()));
        }
        if let Some(modified) = self.modified {
            pairs.push(("modified", modified.to_rfc3339()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_has_data() {
        let mut meta = Metadata::default();
        assert!(!meta.has_data());
        meta.title = Some("Report".to_string());
        assert!(meta.has_data());
    }

    #[test]
    fn test_to_pairs() {
        let meta = Metadata {
            creator: Some("Ada".to_string()),
            created: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single(),
            ..Default::default()
        };
        let pairs = meta.to_pairs();
        assert_eq!(pairs[0], ("creator", "Ada".to_string()));
        assert_eq!(pairs[1], ("created", "2024-01-02T03:04:05+00:00".to_string()));
    }
}
