/// Styles - the named-style registry and its inheritance resolver.
use crate::common::xml::XmlElement;
use crate::ooxml::docx::enums::WdStyleType;
use crate::ooxml::docx::format::{ParagraphProperties, RunProperties};
use crate::ooxml::docx::table::TableProperties;
use parking_lot::RwLock;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Longest `basedOn` chain that is followed before resolution stops.
pub const MAX_STYLE_DEPTH: usize = 32;

/// A style definition (`w:style`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    id: String,
    name: Option<String>,
    kind: WdStyleType,
    based_on: Option<String>,
    is_default: bool,
    linked: Option<String>,
    next: Option<String>,
    paragraph: ParagraphProperties,
    run: RunProperties,
    table: Option<TableProperties>,
}

impl Style {
    /// Create a style with no formatting.
    pub fn new(id: impl Into<String>, kind: WdStyleType) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind,
            based_on: None,
            is_default: false,
            linked: None,
            next: None,
            paragraph: ParagraphProperties::default(),
            run: RunProperties::default(),
            table: None,
        }
    }

    /// Parse one `w:style` element. Returns `None` without a `w:styleId`.
    pub fn from_xml(el: &XmlElement) -> Option<Self> {
        let id = el.attr("styleId")?;
        let kind = el
            .attr("type")
            .and_then(WdStyleType::from_xml)
            .unwrap_or_default();
        Some(Self {
            id: id.to_string(),
            name: el.child_val("name").map(str::to_string),
            kind,
            based_on: el.child_val("basedOn").map(str::to_string),
            is_default: matches!(el.attr("default"), Some("1" | "true" | "on")),
            linked: el.child_val("link").map(str::to_string),
            next: el.child_val("next").map(str::to_string),
            paragraph: el.child("pPr").map(ParagraphProperties::from_xml).unwrap_or_default(),
            run: el.child("rPr").map(RunProperties::from_xml).unwrap_or_default(),
            table: el.child("tblPr").map(TableProperties::from_xml),
        })
    }

    pub fn with_based_on(mut self, parent: impl Into<String>) -> Self {
        self.based_on = Some(parent.into());
        self
    }

    pub fn with_paragraph(mut self, paragraph: ParagraphProperties) -> Self {
        self.paragraph = paragraph;
        self
    }

    pub fn with_run(mut self, run: RunProperties) -> Self {
        self.run = run;
        self
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn kind(&self) -> WdStyleType {
        self.kind
    }

    #[inline]
    pub fn based_on(&self) -> Option<&str> {
        self.based_on.as_deref()
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    #[inline]
    pub fn linked(&self) -> Option<&str> {
        self.linked.as_deref()
    }

    #[inline]
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    #[inline]
    pub fn paragraph(&self) -> &ParagraphProperties {
        &self.paragraph
    }

    #[inline]
    pub fn run(&self) -> &RunProperties {
        &self.run
    }

    #[inline]
    pub fn table(&self) -> Option<&TableProperties> {
        self.table.as_ref()
    }
}

/// A style flattened over its `basedOn` chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStyle {
    pub id: String,
    pub kind: WdStyleType,
    pub paragraph: ParagraphProperties,
    pub run: RunProperties,
    pub table: Option<TableProperties>,
    /// Style ids visited, starting with `id`
    pub chain: SmallVec<[String; 4]>,
}

/// Formatting from `w:docDefaults`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentDefaults {
    pub paragraph: ParagraphProperties,
    pub run: RunProperties,
}

/// The named-style registry.
///
/// Resolution results are cached for the lifetime of the registry, which is
/// the lifetime of one parsed document.
///
/// # Examples
///
/// ```rust
/// use longan::ooxml::docx::enums::WdStyleType;
/// use longan::ooxml::docx::styles::{Style, StyleRegistry};
///
/// let mut styles = StyleRegistry::new();
/// styles.insert(Style::new("Normal", WdStyleType::Paragraph));
/// styles.insert(Style::new("Heading1", WdStyleType::Paragraph).with_based_on("Normal"));
///
/// let resolved = styles.resolve("Heading1").unwrap();
/// assert_eq!(resolved.chain.as_slice(), ["Heading1", "Normal"]);
/// ```
#[derive(Debug, Default)]
pub struct StyleRegistry {
    styles: HashMap<String, Style>,
    order: Vec<String>,
    defaults: DocumentDefaults,
    cache: RwLock<HashMap<String, Arc<ResolvedStyle>>>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from a styles part root (`w:styles`).
    pub fn from_xml(root: &XmlElement) -> Self {
        let mut registry = Self::new();

        if let Some(doc_defaults) = root.child("docDefaults") {
            registry.defaults = DocumentDefaults {
                paragraph: doc_defaults
                    .child("pPrDefault")
                    .and_then(|d| d.child("pPr"))
                    .map(ParagraphProperties::from_xml)
                    .unwrap_or_default(),
                run: doc_defaults
                    .child("rPrDefault")
                    .and_then(|d| d.child("rPr"))
                    .map(RunProperties::from_xml)
                    .unwrap_or_default(),
            };
        }

        for el in root.children_named("style") {
            match Style::from_xml(el) {
                Some(style) => registry.insert(style),
                None => tracing::debug!("skipping style without styleId"),
            }
        }
        registry
    }

    /// Add or replace a style. Invalidates resolved results.
    pub fn insert(&mut self, style: Style) {
        let id = style.id.clone();
        if self.styles.insert(id.clone(), style).is_none() {
            self.order.push(id);
        }
        self.cache.get_mut().clear();
    }

    pub fn set_defaults(&mut self, defaults: DocumentDefaults) {
        self.defaults = defaults;
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.get(id)
    }

    /// Styles in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.order.iter().filter_map(|id| self.styles.get(id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    #[inline]
    pub fn defaults(&self) -> &DocumentDefaults {
        &self.defaults
    }

    /// The style marked default for `kind`.
    pub fn default_style(&self, kind: WdStyleType) -> Option<&Style> {
        self.iter().find(|s| s.is_default && s.kind == kind)
    }

    /// Flatten a style over its `basedOn` chain.
    ///
    /// Properties closer to `id` win; unset ones come from the nearest
    /// ancestor that sets them. The walk stops at a cycle, a missing parent,
    /// a parent of another kind, or after [`MAX_STYLE_DEPTH`] links, keeping
    /// whatever was resolved up to that point. Returns `None` only when `id`
    /// itself is unknown.
    pub fn resolve(&self, id: &str) -> Option<Arc<ResolvedStyle>> {
        if let Some(hit) = self.cache.read().get(id) {
            return Some(Arc::clone(hit));
        }

        let style = self.styles.get(id)?;
        let mut resolved = ResolvedStyle {
            id: style.id.clone(),
            kind: style.kind,
            paragraph: style.paragraph.clone(),
            run: style.run.clone(),
            table: style.table.clone(),
            chain: SmallVec::from_iter([style.id.clone()]),
        };

        let mut current = style;
        while let Some(parent_id) = current.based_on.as_deref() {
            if resolved.chain.iter().any(|seen| seen == parent_id) {
                tracing::debug!(style = id, parent = parent_id, "cycle in basedOn chain");
                break;
            }
            if resolved.chain.len() >= MAX_STYLE_DEPTH {
                tracing::debug!(style = id, "basedOn chain too deep");
                break;
            }
            let Some(parent) = self.styles.get(parent_id) else {
                tracing::debug!(style = id, parent = parent_id, "basedOn refers to a missing style");
                break;
            };
            if parent.kind != style.kind {
                break;
            }

            resolved.paragraph.inherit_from(&parent.paragraph);
            resolved.run.inherit_from(&parent.run);
            match (&mut resolved.table, &parent.table) {
                (Some(own), Some(theirs)) => {
                    own.borders.inherit_from(&theirs.borders);
                    if own.width.is_none() {
                        own.width = theirs.width;
                    }
                },
                (None, Some(theirs)) => resolved.table = Some(theirs.clone()),
                _ => {},
            }
            resolved.chain.push(parent.id.clone());
            current = parent;
        }

        let resolved = Arc::new(resolved);
        self.cache
            .write()
            .insert(id.to_string(), Arc::clone(&resolved));
        Some(resolved)
    }

    /// Drop all cached resolutions.
    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::enums::Justification;
    use crate::ooxml::docx::format::RunToggles;
    use proptest::prelude::*;

    const STYLES: &str = r#"<w:styles xmlns:w="w">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:sz w:val="22"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="160"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/>
    <w:pPr><w:jc w:val="left"/></w:pPr><w:rPr><w:color w:val="111111"/></w:rPr></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/><w:link w:val="Heading1Char"/>
    <w:pPr><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style>
  <w:style w:type="paragraph" w:styleId="Title"><w:basedOn w:val="Heading1"/><w:pPr><w:jc w:val="center"/></w:pPr></w:style>
  <w:style w:type="character" w:styleId="Heading1Char"><w:basedOn w:val="Normal"/><w:rPr><w:i/></w:rPr></w:style>
  <w:style w:type="table" w:styleId="TableGrid"><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4"/></w:tblBorders></w:tblPr></w:style>
  <w:style w:type="paragraph"><w:name w:val="no id"/></w:style>
</w:styles>"#;

    fn registry() -> StyleRegistry {
        StyleRegistry::from_xml(&XmlElement::parse(STYLES.as_bytes()).unwrap())
    }

    #[test]
    fn test_from_xml() {
        let styles = registry();
        assert_eq!(styles.len(), 5);
        let heading = styles.get("Heading1").unwrap();
        assert_eq!(heading.name(), Some("heading 1"));
        assert_eq!(heading.based_on(), Some("Normal"));
        assert_eq!(heading.next(), Some("Normal"));
        assert_eq!(heading.linked(), Some("Heading1Char"));
        assert_eq!(styles.default_style(WdStyleType::Paragraph).map(Style::id), Some("Normal"));
        assert_eq!(styles.defaults().run.size, Some(22));
        assert_eq!(styles.defaults().paragraph.spacing.after, Some(160));
        assert!(styles.get("TableGrid").and_then(Style::table).is_some());
    }

    #[test]
    fn test_resolve_chain() {
        let styles = registry();
        let title = styles.resolve("Title").unwrap();
        assert_eq!(title.chain.as_slice(), ["Title", "Heading1", "Normal"]);
        // own value wins
        assert_eq!(title.paragraph.justification, Some(Justification::Center));
        // nearest ancestor value
        assert_eq!(title.run.size, Some(32));
        assert!(title.run.bold());
        assert_eq!(title.paragraph.outline_level, Some(0));
        // root value
        assert_eq!(title.run.color.as_deref(), Some("111111"));
    }

    #[test]
    fn test_no_cross_kind_merge() {
        let styles = registry();
        let resolved = styles.resolve("Heading1Char").unwrap();
        assert_eq!(resolved.chain.len(), 1);
        assert_eq!(resolved.run.color, None);
        assert_eq!(resolved.run.toggle(RunToggles::ITALIC), Some(true));
    }

    #[test]
    fn test_cycle_and_missing_parent() {
        let mut styles = StyleRegistry::new();
        styles.insert(Style::new("A", WdStyleType::Paragraph).with_based_on("B"));
        styles.insert(Style::new("B", WdStyleType::Paragraph).with_based_on("A"));
        styles.insert(Style::new("C", WdStyleType::Paragraph).with_based_on("Missing"));

        assert_eq!(styles.resolve("A").unwrap().chain.as_slice(), ["A", "B"]);
        assert_eq!(styles.resolve("C").unwrap().chain.as_slice(), ["C"]);
        assert!(styles.resolve("Missing").is_none());
    }

    #[test]
    fn test_cache_is_invalidated_on_insert() {
        let mut styles = StyleRegistry::new();
        styles.insert(Style::new("A", WdStyleType::Paragraph).with_based_on("B"));
        assert_eq!(styles.resolve("A").unwrap().chain.len(), 1);
        styles.insert(Style::new("B", WdStyleType::Paragraph));
        assert_eq!(styles.resolve("A").unwrap().chain.len(), 2);
        let first = styles.resolve("A").unwrap();
        let second = styles.resolve("A").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    proptest! {
        #[test]
        fn prop_chain_resolution_takes_nearest_value(
            sizes in proptest::collection::vec(proptest::option::of(1u32..100), 1..40)
        ) {
            // style i is based on style i + 1
            let mut styles = StyleRegistry::new();
            for (i, size) in sizes.iter().enumerate() {
                let mut style = Style::new(format!("S{i}"), WdStyleType::Paragraph)
                    .with_run(RunProperties { size: *size, ..Default::default() });
                if i + 1 < sizes.len() {
                    style = style.with_based_on(format!("S{}", i + 1));
                }
                styles.insert(style);
            }

            let resolved = styles.resolve("S0").unwrap();
            let walked = resolved.chain.len();
            prop_assert!(walked <= MAX_STYLE_DEPTH);
            let expected = sizes.iter().take(walked).find_map(|s| *s);
            prop_assert_eq!(resolved.run.size, expected);
        }

        #[test]
        fn prop_cyclic_chains_terminate(len in 1usize..20) {
            let mut styles = StyleRegistry::new();
            for i in 0..len {
                styles.insert(
                    Style::new(format!("S{i}"), WdStyleType::Paragraph)
                        .with_based_on(format!("S{}", (i + 1) % len)),
                );
            }
            let resolved = styles.resolve("S0").unwrap();
            prop_assert_eq!(resolved.chain.len(), len);
        }
    }
}
