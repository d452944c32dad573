//! Generic attributed element tree for one XML part.
//!
//! Every part of the container is parsed once into an [`XmlElement`] tree
//! with quick-xml and then only borrowed by the builders. Names keep their
//! namespace prefix (`w:p`); lookups go through the local name so that a
//! producer using a different prefix still matches.
use crate::ooxml::opc::error::{OpcError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

/// Deepest element nesting accepted in one part.
pub const MAX_DEPTH: usize = 1024;

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    name: String,
    attributes: SmallVec<[(String, String); 4]>,
    children: Vec<XmlNode>,
}

#[inline]
fn local_part(name: &str) -> &str {
    match name.rfind(':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

impl XmlElement {
    /// Create an empty element with the given qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a complete part into its root element.
    ///
    /// Whitespace inside text is kept as-is so that `xml:space="preserve"`
    /// content survives. Unclosed or mismatched elements are an error, as is
    /// nesting deeper than [`MAX_DEPTH`].
    pub fn parse(xml: &[u8]) -> Result<XmlElement> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::with_capacity(1024);
        let mut stack: Vec<XmlElement> = Vec::with_capacity(16);
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if stack.len() >= MAX_DEPTH {
                        return Err(OpcError::Xml(format!(
                            "elements nested deeper than {MAX_DEPTH} levels at byte {}",
                            reader.buffer_position()
                        )));
                    }
                    stack.push(Self::from_start(&e));
                },
                Ok(Event::Empty(e)) => {
                    let element = Self::from_start(&e);
                    Self::attach(&mut stack, &mut root, element);
                },
                Ok(Event::End(_)) => {
                    if let Some(element) = stack.pop() {
                        Self::attach(&mut stack, &mut root, element);
                    }
                },
                Ok(Event::Text(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(&String::from_utf8_lossy(e.as_ref()));
                    }
                },
                Ok(Event::CData(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(&String::from_utf8_lossy(e.as_ref()));
                    }
                },
                Ok(Event::GeneralRef(e)) => {
                    if let Some(parent) = stack.last_mut() {
                        let name = String::from_utf8_lossy(e.as_ref());
                        match resolve_reference(&name) {
                            Some(ch) => parent.push_text(ch.encode_utf8(&mut [0u8; 4])),
                            None => parent.push_text(&format!("&{};", name)),
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::Xml(format!(
                        "{} at byte {}",
                        e,
                        reader.buffer_position()
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(OpcError::Xml(
                "unexpected end of part inside an open element".to_string(),
            ));
        }
        root.ok_or_else(|| OpcError::Xml("part has no root element".to_string()))
    }

    fn from_start(e: &BytesStart<'_>) -> Self {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut attributes = SmallVec::new();
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = match attr.unescape_value() {
                Ok(v) => v.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            attributes.push((key, value));
        }
        Self {
            name,
            attributes,
            children: Vec::new(),
        }
    }

    fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(XmlNode::Element(element)),
            None => {
                if root.is_none() {
                    *root = Some(element);
                }
            },
        }
    }

    /// Append text, merging with a preceding text node.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Set an attribute, replacing an existing one with the same name.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Qualified name, e.g. `w:p`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without namespace prefix, e.g. `p`.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Whether the local name equals `local`.
    #[inline]
    pub fn is(&self, local: &str) -> bool {
        self.local_name() == local
    }

    /// Attribute value by local name.
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| local_part(k) == local)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute value by exact qualified name, e.g. `r:id`.
    pub fn attr_qualified(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute parsed as an integer.
    pub fn attr_i64(&self, local: &str) -> Option<i64> {
        self.attr(local).and_then(parse_i64)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given local name.
    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.is(local))
    }

    /// All child elements with the given local name.
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |e| e.is(local))
    }

    /// First descendant (depth-first, pre-order) with the given local name.
    pub fn descendant(&self, local: &str) -> Option<&XmlElement> {
        for child in self.elements() {
            if child.is(local) {
                return Some(child);
            }
            if let Some(found) = child.descendant(local) {
                return Some(found);
            }
        }
        None
    }

    /// `val` attribute of the first child with the given local name.
    ///
    /// This is the shape of most WordprocessingML properties,
    /// e.g. `<w:jc w:val="center"/>`.
    pub fn child_val(&self, local: &str) -> Option<&str> {
        self.child(local).and_then(|c| c.attr("val"))
    }

    /// Integer `val` of a child property.
    pub fn child_val_i64(&self, local: &str) -> Option<i64> {
        self.child_val(local).and_then(parse_i64)
    }

    /// On/off property of a child: `None` when absent, otherwise the toggle
    /// value (`<w:b/>` and `<w:b w:val="true"/>` are on; `0`, `false`, `off`
    /// and `none` are off).
    pub fn child_toggle(&self, local: &str) -> Option<bool> {
        self.child(local).map(|c| is_on(c.attr("val")))
    }

    /// Concatenated text of this element and all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Text of direct text children only.
    pub fn own_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }
}

/// Interpret an OOXML on/off value.
#[inline]
pub fn is_on(value: Option<&str>) -> bool {
    !matches!(value, Some("0" | "false" | "off" | "none"))
}

/// Parse a decimal integer attribute, tolerating surrounding whitespace.
#[inline]
pub fn parse_i64(value: &str) -> Option<i64> {
    atoi_simd::parse::<i64, false, false>(value.trim().as_bytes()).ok()
}

fn resolve_reference(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested() {
        let xml = br#"<?xml version="1.0"?>
<w:document xmlns:w="urn:w"><w:body><w:p><w:r><w:t xml:space="preserve"> Hi  there </w:t></w:r></w:p></w:body></w:document>"#;
        let root = XmlElement::parse(xml).unwrap();
        assert_eq!(root.name(), "w:document");
        assert_eq!(root.local_name(), "document");

        let t = root.descendant("t").unwrap();
        assert_eq!(t.text(), " Hi  there ");
        assert_eq!(t.attr("space"), Some("preserve"));
        assert_eq!(t.attr_qualified("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_entities_are_resolved() {
        let root = XmlElement::parse(br#"<a v="x &amp; y">1 &lt; 2 &#x41;&#66; &amp;amp;</a>"#).unwrap();
        assert_eq!(root.attr("v"), Some("x & y"));
        assert_eq!(root.text(), "1 < 2 AB &amp;");
        // text around references is merged into one node
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_child_helpers() {
        let root = XmlElement::parse(
            br#"<w:rPr xmlns:w="urn:w"><w:b/><w:i w:val="0"/><w:sz w:val="24"/><w:caps w:val="true"/></w:rPr>"#,
        )
        .unwrap();
        assert_eq!(root.child_toggle("b"), Some(true));
        assert_eq!(root.child_toggle("i"), Some(false));
        assert_eq!(root.child_toggle("caps"), Some(true));
        assert_eq!(root.child_toggle("strike"), None);
        assert_eq!(root.child_val_i64("sz"), Some(24));
        assert_eq!(root.elements().count(), 4);
    }

    #[test]
    fn test_malformed_is_error() {
        assert!(XmlElement::parse(b"<a><b></a>").is_err());
        assert!(XmlElement::parse(b"<a><b>").is_err());
        assert!(XmlElement::parse(b"").is_err());
    }

    #[test]
    fn test_nesting_depth_is_bounded() {
        let nested = |depth: usize| {
            let mut xml = "<x>".repeat(depth);
            xml.push_str(&"</x>".repeat(depth));
            xml
        };
        assert!(XmlElement::parse(nested(MAX_DEPTH).as_bytes()).is_ok());

        let err = XmlElement::parse(nested(200_000).as_bytes()).unwrap_err();
        assert!(matches!(err, OpcError::Xml(msg) if msg.contains("nested deeper")));
    }

    #[test]
    fn test_set_attr_and_children() {
        let mut el = XmlElement::new("w:p");
        el.set_attr("w:id", "1");
        el.set_attr("w:id", "2");
        el.push_child(XmlElement::new("w:r"));
        el.push_text("a");
        el.push_text("b");
        assert_eq!(el.attr("id"), Some("2"));
        assert_eq!(el.children().len(), 2);
        assert_eq!(el.own_text(), "ab");
        assert!(el.child("r").is_some());
    }
}
