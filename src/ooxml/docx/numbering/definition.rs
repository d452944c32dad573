/// Numbering definitions parsed from `word/numbering.xml`.
///
/// An abstract definition (`w:abstractNum`) describes up to ten levels. A
/// numbering instance (`w:num`) points at one abstract definition and may
/// override individual levels. Paragraphs reference instances.
use crate::common::xml::XmlElement;
use crate::ooxml::docx::enums::Justification;
use crate::ooxml::docx::format::{ParagraphProperties, RunProperties};
use crate::ooxml::docx::numbering::format::NumberFormat;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// Number of levels a definition can carry.
pub const MAX_LEVELS: usize = 10;

/// What follows the label (`w:suff`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LevelSuffix {
    #[default]
    Tab,
    Space,
    Nothing,
}

impl LevelSuffix {
    pub fn from_xml(s: &str) -> Self {
        match s {
            "space" => Self::Space,
            "nothing" => Self::Nothing,
            _ => Self::Tab,
        }
    }
}

/// One level of a list definition (`w:lvl`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberingLevel {
    pub level: u8,
    pub start: u32,
    pub format: NumberFormat,
    /// Level-text pattern such as `%1.%2.`
    pub text: String,
    pub suffix: LevelSuffix,
    pub justification: Option<Justification>,
    /// Paragraph style linked to this level
    pub paragraph_style: Option<String>,
    pub paragraph: Option<ParagraphProperties>,
    pub run: Option<RunProperties>,
}

impl NumberingLevel {
    pub fn new(level: u8, format: NumberFormat) -> Self {
        Self {
            level,
            start: 1,
            format,
            text: format!("%{}.", level + 1),
            suffix: LevelSuffix::Tab,
            justification: None,
            paragraph_style: None,
            paragraph: None,
            run: None,
        }
    }

    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Parse a `w:lvl`. Returns `None` when `w:ilvl` is missing or out of range.
    pub fn from_xml(lvl: &XmlElement) -> Option<Self> {
        let level = lvl
            .attr_i64("ilvl")
            .and_then(|v| u8::try_from(v).ok())
            .filter(|v| (*v as usize) < MAX_LEVELS)?;
        let format = lvl
            .child_val("numFmt")
            .map(NumberFormat::from_xml)
            .unwrap_or_default();

        Some(Self {
            level,
            start: lvl
                .child_val_i64("start")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(1),
            format,
            text: lvl
                .child_val("lvlText")
                .map(str::to_string)
                .unwrap_or_else(|| format!("%{}.", level + 1)),
            suffix: lvl
                .child_val("suff")
                .map(LevelSuffix::from_xml)
                .unwrap_or_default(),
            justification: lvl.child_val("lvlJc").and_then(Justification::from_xml),
            paragraph_style: lvl.child_val("pStyle").map(str::to_string),
            paragraph: lvl.child("pPr").map(ParagraphProperties::from_xml),
            run: lvl.child("rPr").map(RunProperties::from_xml),
        })
    }
}

/// A `w:abstractNum`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AbstractNumbering {
    pub id: String,
    /// `singleLevel`, `multilevel` or `hybridMultilevel`
    pub multi_level_type: Option<String>,
    pub levels: BTreeMap<u8, NumberingLevel>,
}

impl AbstractNumbering {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_level(mut self, level: NumberingLevel) -> Self {
        self.levels.insert(level.level, level);
        self
    }

    pub fn from_xml(el: &XmlElement) -> Option<Self> {
        let id = el.attr("abstractNumId")?;
        let levels = el
            .children_named("lvl")
            .filter_map(NumberingLevel::from_xml)
            .map(|lvl| (lvl.level, lvl))
            .collect();
        Some(Self {
            id: id.to_string(),
            multi_level_type: el.child_val("multiLevelType").map(str::to_string),
            levels,
        })
    }
}

/// A per-level override inside a `w:num` (`w:lvlOverride`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelOverride {
    pub level: u8,
    pub start: Option<u32>,
    pub definition: Option<NumberingLevel>,
}

/// A `w:num`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NumberingInstance {
    pub id: String,
    pub abstract_id: String,
    pub overrides: Vec<LevelOverride>,
}

impl NumberingInstance {
    pub fn new(id: impl Into<String>, abstract_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            abstract_id: abstract_id.into(),
            overrides: Vec::new(),
        }
    }

    pub fn from_xml(el: &XmlElement) -> Option<Self> {
        let id = el.attr("numId")?;
        // a w:num without abstractNumId points at the abstract of the same id
        let abstract_id = el.child_val("abstractNumId").unwrap_or(id);
        let overrides = el
            .children_named("lvlOverride")
            .filter_map(|o| {
                let level = o
                    .attr_i64("ilvl")
                    .and_then(|v| u8::try_from(v).ok())
                    .filter(|v| (*v as usize) < MAX_LEVELS)?;
                Some(LevelOverride {
                    level,
                    start: o
                        .child_val_i64("startOverride")
                        .and_then(|v| u32::try_from(v).ok()),
                    definition: o.child("lvl").and_then(NumberingLevel::from_xml),
                })
            })
            .collect();
        Some(Self {
            id: id.to_string(),
            abstract_id: abstract_id.to_string(),
            overrides,
        })
    }

    fn override_for(&self, level: u8) -> Option<&LevelOverride> {
        self.overrides.iter().find(|o| o.level == level)
    }
}

/// All numbering definitions of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Numbering {
    abstracts: HashMap<String, AbstractNumbering>,
    instances: HashMap<String, NumberingInstance>,
}

impl Numbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `w:numbering` root.
    ///
    /// Abstract definitions without levels and instances whose abstract
    /// definition is unknown are dropped.
    pub fn from_xml(root: &XmlElement) -> Self {
        let mut numbering = Self::new();
        for abstract_num in root
            .children_named("abstractNum")
            .filter_map(AbstractNumbering::from_xml)
        {
            if abstract_num.levels.is_empty() {
                tracing::debug!(id = %abstract_num.id, "abstract numbering without levels");
                continue;
            }
            numbering.abstracts.insert(abstract_num.id.clone(), abstract_num);
        }
        for instance in root.children_named("num").filter_map(NumberingInstance::from_xml) {
            if !numbering.abstracts.contains_key(&instance.abstract_id) {
                tracing::debug!(
                    num_id = %instance.id,
                    abstract_id = %instance.abstract_id,
                    "numbering instance refers to a missing abstract definition"
                );
                continue;
            }
            numbering.instances.insert(instance.id.clone(), instance);
        }
        numbering
    }

    /// Register an abstract definition together with the instances using it.
    pub fn define(
        &mut self,
        abstract_num: AbstractNumbering,
        instances: impl IntoIterator<Item = NumberingInstance>,
    ) {
        for instance in instances {
            self.instances.insert(instance.id.clone(), instance);
        }
        self.abstracts.insert(abstract_num.id.clone(), abstract_num);
    }

    #[inline]
    pub fn instance(&self, num_id: &str) -> Option<&NumberingInstance> {
        self.instances.get(num_id)
    }

    #[inline]
    pub fn abstract_numbering(&self, abstract_id: &str) -> Option<&AbstractNumbering> {
        self.abstracts.get(abstract_id)
    }

    /// Effective definition of `level` for instance `num_id`, with the
    /// instance's overrides applied.
    pub fn level(&self, num_id: &str, level: u8) -> Option<Cow<'_, NumberingLevel>> {
        let instance = self.instances.get(num_id)?;
        let overridden = instance.override_for(level);

        let base = match overridden.and_then(|o| o.definition.as_ref()) {
            Some(def) => Cow::Borrowed(def),
            None => Cow::Borrowed(
                self.abstracts
                    .get(&instance.abstract_id)?
                    .levels
                    .get(&level)?,
            ),
        };

        match overridden.and_then(|o| o.start) {
            Some(start) if start != base.start => {
                let mut owned = base.into_owned();
                owned.start = start;
                Some(Cow::Owned(owned))
            },
            _ => Some(base),
        }
    }

    /// Start value of a level, 1 when undefined.
    pub fn start(&self, num_id: &str, level: u8) -> u32 {
        self.level(num_id, level).map_or(1, |l| l.start)
    }

    #[inline]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn abstract_count(&self) -> usize {
        self.abstracts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMBERING: &str = r#"<w:numbering xmlns:w="w">
  <w:abstractNum w:abstractNumId="0">
    <w:multiLevelType w:val="hybridMultilevel"/>
    <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/><w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl>
    <w:lvl w:ilvl="1"><w:start w:val="1"/><w:numFmt w:val="lowerLetter"/><w:lvlText w:val="%2)"/><w:suff w:val="space"/></w:lvl>
  </w:abstractNum>
  <w:abstractNum w:abstractNumId="1"><w:multiLevelType w:val="singleLevel"/></w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
  <w:num w:numId="2"><w:abstractNumId w:val="0"/>
    <w:lvlOverride w:ilvl="0"><w:startOverride w:val="5"/></w:lvlOverride>
    <w:lvlOverride w:ilvl="1"><w:lvl w:ilvl="1"><w:numFmt w:val="upperRoman"/></w:lvl></w:lvlOverride>
  </w:num>
  <w:num w:numId="3"><w:abstractNumId w:val="1"/></w:num>
  <w:num w:numId="4"><w:abstractNumId w:val="9"/></w:num>
</w:numbering>"#;

    fn numbering() -> Numbering {
        Numbering::from_xml(&XmlElement::parse(NUMBERING.as_bytes()).unwrap())
    }

    #[test]
    fn test_from_xml() {
        let numbering = numbering();
        assert_eq!(numbering.abstract_count(), 1);
        assert_eq!(numbering.instance_count(), 2);
        assert!(numbering.instance("3").is_none());
        assert!(numbering.instance("4").is_none());

        let level0 = numbering.level("1", 0).unwrap();
        assert_eq!(level0.format, NumberFormat::Decimal);
        assert_eq!(level0.text, "%1.");
        assert_eq!(
            level0.paragraph.as_ref().and_then(|p| p.indentation.left),
            Some(720)
        );
        let level1 = numbering.level("1", 1).unwrap();
        assert_eq!(level1.format, NumberFormat::LowerLetter);
        assert_eq!(level1.suffix, LevelSuffix::Space);
        assert!(numbering.level("1", 2).is_none());
    }

    #[test]
    fn test_overrides() {
        let numbering = numbering();
        assert_eq!(numbering.start("2", 0), 5);
        assert_eq!(numbering.start("1", 0), 1);
        assert_eq!(
            numbering.level("2", 1).map(|l| l.format),
            Some(NumberFormat::UpperRoman)
        );
        // the shared abstract definition is untouched
        assert_eq!(
            numbering.level("1", 1).map(|l| l.format),
            Some(NumberFormat::LowerLetter)
        );
    }

    #[test]
    fn test_define() {
        let mut numbering = Numbering::new();
        numbering.define(
            AbstractNumbering::new("7").with_level(NumberingLevel::new(0, NumberFormat::UpperLetter)),
            [NumberingInstance::new("3", "7")],
        );
        assert_eq!(
            numbering.level("3", 0).map(|l| l.format),
            Some(NumberFormat::UpperLetter)
        );
    }
}
