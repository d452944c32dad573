/// Comment support for Word documents.
///
/// Comments carry author information, an optional timestamp and rich
/// block content.
use crate::common::xml::XmlElement;
use crate::ooxml::docx::document::{Block, blocks_text};
use crate::ooxml::docx::parts::DocumentBuilder;
use crate::ooxml::metadata::parse_datetime;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// A comment in a Word document.
///
/// Represents a `<w:comment>` element.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::ooxml::docx::Package;
///
/// let parsed = Package::open("document.docx")?.parse()?;
/// for comment in parsed.comments().iter() {
///     println!("Comment by {}: {}", comment.author(), comment.text());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    id: String,
    author: String,
    initials: Option<String>,
    date: Option<DateTime<Utc>>,
    content: Vec<Block>,
}

impl Comment {
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        initials: Option<String>,
        date: Option<DateTime<Utc>>,
        content: Vec<Block>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            initials,
            date,
            content,
        }
    }

    /// Build a comment from a `w:comment` element. `None` without an id.
    pub fn from_xml(el: &XmlElement, builder: &mut DocumentBuilder<'_>) -> Option<Self> {
        let id = el.attr("id")?;
        Some(Self::new(
            id,
            el.attr("author").unwrap_or_default(),
            el.attr("initials").map(str::to_string),
            el.attr("date").and_then(parse_datetime),
            builder.build_blocks(el),
        ))
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[inline]
    pub fn initials(&self) -> Option<&str> {
        self.initials.as_deref()
    }

    #[inline]
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    #[inline]
    pub fn content(&self) -> &[Block] {
        &self.content
    }

    pub fn text(&self) -> String {
        blocks_text(&self.content)
    }
}

/// All comments of the comments part, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comments {
    comments: Vec<Comment>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Comments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the comments of a `w:comments` root.
    pub fn from_xml(root: &XmlElement, builder: &mut DocumentBuilder<'_>) -> Self {
        let mut comments = Self::new();
        for el in root.children_named("comment") {
            match Comment::from_xml(el, builder) {
                Some(comment) => comments.insert(comment),
                None => tracing::debug!("comment without an id"),
            }
        }
        comments
    }

    /// Add a comment. A comment with an existing id replaces the old one.
    pub fn insert(&mut self, comment: Comment) {
        match self.index.get(comment.id()) {
            Some(&i) => self.comments[i] = comment,
            None => {
                self.index.insert(comment.id.clone(), self.comments.len());
                self.comments.push(comment);
            },
        }
    }

    pub fn get(&self, id: &str) -> Option<&Comment> {
        self.index.get(id).map(|&i| &self.comments[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
