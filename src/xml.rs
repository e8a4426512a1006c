//! Minimal XML primitives on top of `quick-xml`: an owned element tree for reading
//! responses and a thin event writer for building request documents.

use std::fmt;

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::{Result, malformed, xml};

/// An owned XML element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// Parses a document into its root element.
    ///
    /// Leaf text is kept exactly as written. Whitespace between child elements is dropped.
    pub fn parse(input: &str) -> Result<Self> {
        let mut reader = Reader::from_str(input);

        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event().map_err(xml)? {
                Event::Start(start) => stack.push(Self::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text.unescape().map_err(xml)?);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(std::str::from_utf8(&data).map_err(xml)?);
                    }
                }
                Event::End(_) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| malformed("unbalanced closing tag"))?;
                    if !element.children.is_empty() && element.text.trim().is_empty() {
                        element.text.clear();
                    }
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(malformed("unexpected end of document"));
        }
        root.ok_or_else(|| malformed("document has no root element"))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(xml)?
            .to_string();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(xml)?;
            let key = std::str::from_utf8(attribute.key.as_ref())
                .map_err(xml)?
                .to_string();
            let value = attribute.unescape_value().map_err(xml)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(element);
        } else if root.is_none() {
            *root = Some(element);
        } else {
            return Err(malformed("multiple root elements"));
        }
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element name without its namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Text of the named child, or `None` when the child is absent or empty.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child_value(name).filter(|text| !text.is_empty())
    }

    /// Exact text of the named child. An empty child yields `Some("")`.
    #[must_use]
    pub fn child_value(&self, name: &str) -> Option<&str> {
        self.child(name).map(Element::text)
    }

    /// Depth-first search (including `self`) by local name.
    #[must_use]
    pub fn find(&self, local_name: &str) -> Option<&Element> {
        if self.local_name() == local_name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(local_name))
    }

    /// Visits `self` and every descendant, depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Event writer used by the request documents.
pub(crate) struct XmlWriter {
    writer: Writer<Vec<u8>>,
}

impl XmlWriter {
    pub(crate) fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    pub(crate) fn declaration(&mut self) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(xml)
    }

    pub(crate) fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for attribute in attributes {
            start.push_attribute(*attribute);
        }
        self.writer.write_event(Event::Start(start)).map_err(xml)
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml)
    }

    /// Writes `<name>value</name>`.
    pub(crate) fn element(&mut self, name: &str, value: impl fmt::Display) -> Result<()> {
        let value = value.to_string();
        self.start(name, &[])?;
        self.writer
            .write_event(Event::Text(BytesText::new(&value)))
            .map_err(xml)?;
        self.end(name)
    }

    /// Writes `<name>value</name>` when a value is present, nothing otherwise.
    pub(crate) fn optional<V: fmt::Display>(&mut self, name: &str, value: Option<V>) -> Result<()> {
        match value {
            Some(value) => self.element(name, value),
            None => Ok(()),
        }
    }

    pub(crate) fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner()).map_err(xml)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use crate::error::{Error, XmlError};

    #[test]
    fn parses_nested_elements_with_attributes() {
        let root = Element::parse(
            r#"<salesinvoice result="1">
                <header><office name="Demo">NL001</office><customer/></header>
                <lines><line id="1"/><line id="2"/></lines>
            </salesinvoice>"#,
        )
        .expect("document should parse");

        assert_eq!(root.name(), "salesinvoice");
        assert_eq!(root.attribute("result"), Some("1"));
        let header = root.child("header").expect("header expected");
        assert_eq!(header.child_text("office"), Some("NL001"));
        assert_eq!(header.child("office").and_then(|o| o.attribute("name")), Some("Demo"));
        assert_eq!(header.child_text("customer"), None);
        let ids: Vec<_> = root
            .child("lines")
            .expect("lines expected")
            .children_named("line")
            .filter_map(|line| line.attribute("id"))
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn unescapes_text_and_keeps_cdata() {
        let root = Element::parse("<a><b>Fish &amp; chips</b><c><![CDATA[<raw>]]></c></a>")
            .expect("document should parse");
        assert_eq!(root.child_text("b"), Some("Fish & chips"));
        assert_eq!(root.child_text("c"), Some("<raw>"));
    }

    #[test]
    fn keeps_leaf_text_verbatim() {
        let root = Element::parse(
            "<line>\n    <description>  Consultancy </description>\n    <dim1></dim1>\n</line>",
        )
        .expect("document should parse");
        assert_eq!(root.text(), "");
        assert_eq!(root.child_value("description"), Some("  Consultancy "));
        assert_eq!(root.child_value("dim1"), Some(""));
        assert_eq!(root.child_text("dim1"), None);
        assert_eq!(root.child_value("dim2"), None);
    }

    #[test]
    fn find_matches_local_names() {
        let root = Element::parse(
            r#"<soap:Envelope xmlns:soap="x"><soap:Body><Result>ok</Result></soap:Body></soap:Envelope>"#,
        )
        .expect("document should parse");
        assert_eq!(root.local_name(), "Envelope");
        assert_eq!(root.find("Result").map(Element::text), Some("ok"));
        assert!(root.find("Missing").is_none());
    }

    #[test]
    fn rejects_empty_and_truncated_documents() {
        assert!(matches!(
            Element::parse(""),
            Err(Error::Xml(XmlError::Structure(_)))
        ));
        assert!(Element::parse("<a><b></b>").is_err());
    }

    #[test]
    fn parser_errors_keep_their_source() {
        let err = Element::parse("<a><b></c></a>").unwrap_err();
        assert!(matches!(err, Error::Xml(XmlError::Syntax(_))));
        assert!(err.source().is_some());
    }

    #[test]
    fn writer_escapes_text_and_skips_missing_values() {
        let mut writer = XmlWriter::new();
        writer.start("line", &[("id", "1")]).unwrap();
        writer.element("description", "A < B").unwrap();
        writer.optional::<&str>("vatcode", None).unwrap();
        writer.end("line").unwrap();
        let out = writer.finish().unwrap();
        assert_eq!(out, r#"<line id="1"><description>A &lt; B</description></line>"#);
    }
}
