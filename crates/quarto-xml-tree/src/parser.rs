//! XML parser that builds a [`Document`] arena.

use crate::{Document, Error, NodeId, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parse XML from a string into a [`Document`].
///
/// Elements become element nodes under the document node. An element's value
/// is its unescaped direct text (CDATA included); whitespace-only text is
/// dropped from elements that also contain child elements. Comments,
/// processing instructions, declarations and DOCTYPE are skipped.
///
/// # Example
///
/// ```rust
/// use quarto_xml_tree::parse;
///
/// let doc = parse("<root><child>hi</child></root>").unwrap();
/// let root = doc.root_element().unwrap();
/// assert_eq!(root.name(), "root");
/// assert_eq!(root.first_child().unwrap().value(), "hi");
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed, empty, or has several roots.
pub fn parse(content: &str) -> Result<Document> {
    let mut parser = XmlParser::new(content);
    let doc = parser.parse()?;
    tracing::debug!(
        nodes = doc.node_count(),
        attributes = doc.attribute_count(),
        "Parsed XML document"
    );
    Ok(doc)
}

/// Internal parser state.
struct XmlParser<'a> {
    reader: Reader<&'a [u8]>,

    doc: Document,

    /// Stack of open elements.
    stack: Vec<OpenElement>,

    /// The root element, once seen.
    root: Option<NodeId>,
}

/// An element whose end tag has not been seen yet.
struct OpenElement {
    id: NodeId,

    /// Full tag name (with prefix) for end tag matching.
    tag: String,

    /// Direct text accumulated so far.
    text: String,

    has_children: bool,
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            reader,
            doc: Document::new(),
            stack: Vec::new(),
            root: None,
        }
    }

    fn parse(&mut self) -> Result<Document> {
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let id = self.handle_start(&e)?;
                    self.stack.push(OpenElement {
                        id,
                        tag: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        text: String::new(),
                        has_children: false,
                    });
                }
                Ok(Event::End(e)) => {
                    let end_name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    self.handle_end(&end_name)?;
                }
                Ok(Event::Empty(e)) => {
                    self.handle_start(&e)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|err| Error::XmlSyntax {
                        message: format!("Invalid text content: {}", err),
                        position: Some(self.reader.buffer_position()),
                    })?;
                    self.push_text(&text);
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    self.push_text(&text);
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlSyntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position()),
                    });
                }
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", open.tag),
            });
        }
        if self.root.is_none() {
            return Err(Error::EmptyDocument);
        }

        Ok(std::mem::take(&mut self.doc))
    }

    /// Creates the element for a start or empty tag and links it into the tree.
    fn handle_start(&mut self, e: &BytesStart<'_>) -> Result<NodeId> {
        let (name, prefix) = split_name(&String::from_utf8_lossy(e.name().as_ref()));

        let parent = match self.stack.last_mut() {
            Some(open) => {
                open.has_children = true;
                open.id
            }
            None => {
                if self.root.is_some() {
                    return Err(Error::MultipleRoots { name });
                }
                self.doc.root_id()
            }
        };

        let id = self.doc.append_element(parent, name);
        self.doc.set_prefix(id, prefix);
        if parent == self.doc.root_id() {
            self.root = Some(id);
        }

        for attr_result in e.attributes() {
            let attr = attr_result?;
            let (attr_name, attr_prefix) = split_name(&String::from_utf8_lossy(attr.key.as_ref()));
            let value = attr.unescape_value().map_err(|err| Error::XmlSyntax {
                message: format!("Invalid attribute value: {}", err),
                position: Some(self.reader.buffer_position()),
            })?;
            self.doc
                .append_prefixed_attribute(id, attr_prefix, attr_name, value.into_owned());
        }

        Ok(id)
    }

    fn handle_end(&mut self, end_name: &str) -> Result<()> {
        let open = self.stack.pop().ok_or_else(|| Error::InvalidStructure {
            message: format!("Unexpected closing tag </{}>", end_name),
        })?;

        if open.tag != end_name {
            return Err(Error::MismatchedEndTag {
                expected: open.tag,
                found: end_name.to_string(),
            });
        }

        // Indentation between child elements is not part of the value
        if !(open.has_children && open.text.trim().is_empty()) {
            self.doc.set_value(open.id, open.text);
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        // Text outside the root element is ignored
        if let Some(open) = self.stack.last_mut() {
            open.text.push_str(text);
        }
    }
}

/// Splits `prefix:local` into the local name and the optional prefix.
fn split_name(full_name: &str) -> (String, Option<String>) {
    match full_name.split_once(':') {
        Some((prefix, local)) => (local.to_string(), Some(prefix.to_string())),
        None => (full_name.to_string(), None),
    }
}
