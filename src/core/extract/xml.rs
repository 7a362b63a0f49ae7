//! Namespace-aware scan of the embedded descriptive-metadata document
//!
//! The document is parsed once into a flat list of descendant elements; each
//! entry keeps the resolved namespace, the local name and the leading text
//! (the text before the element's first child). Selectors then filter this
//! list instead of re-parsing.

use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

/// One descendant element of the document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Resolved namespace URI, empty when the name has no prefix and no
    /// default namespace applies
    pub namespace: String,
    /// Local element name
    pub local_name: String,
    /// Leading text, untrimmed
    pub text: String,
}

/// Parsed descendant elements in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlIndex {
    elements: Vec<XmlElement>,
}

struct Frame {
    /// Index into `elements`; `None` for the root
    slot: Option<usize>,
    /// Still before the first child
    leading: bool,
}

impl XmlIndex {
    /// Parses a document
    ///
    /// Returns an empty index when the document is not well-formed; the
    /// caller sees "no values", never an error.
    pub fn parse(document: &str) -> Self {
        match scan(document) {
            Ok(elements) => Self { elements },
            Err(reason) => {
                tracing::debug!(error = %reason, "Embedded metadata is not well-formed XML");
                Self::default()
            }
        }
    }

    /// Whether the document yielded no descendant elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Trimmed, non-empty leading texts of every `{namespace}local_name`
    /// descendant, in document order
    pub fn find(&self, namespace: &str, local_name: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.namespace == namespace && e.local_name == local_name)
            .map(|e| e.text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn resolved_namespace(resolve: &ResolveResult<'_>) -> String {
    match resolve {
        ResolveResult::Bound(ns) => String::from_utf8_lossy(ns.as_ref()).into_owned(),
        _ => String::new(),
    }
}

fn scan(document: &str) -> Result<Vec<XmlElement>, String> {
    let mut reader = NsReader::from_str(document);
    let mut elements: Vec<XmlElement> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root_seen = false;

    loop {
        let (resolve, event) = reader.read_resolved_event().map_err(|e| e.to_string())?;

        match event {
            Event::Start(ref start) | Event::Empty(ref start) => {
                let is_empty = matches!(event, Event::Empty(_));
                if let ResolveResult::Unknown(prefix) = &resolve {
                    return Err(format!(
                        "unbound prefix '{}'",
                        String::from_utf8_lossy(prefix)
                    ));
                }

                if stack.is_empty() {
                    if root_seen {
                        return Err("content after document element".to_string());
                    }
                    root_seen = true;
                    if !is_empty {
                        stack.push(Frame {
                            slot: None,
                            leading: true,
                        });
                    }
                    continue;
                }

                if let Some(parent) = stack.last_mut() {
                    parent.leading = false;
                }

                elements.push(XmlElement {
                    namespace: resolved_namespace(&resolve),
                    local_name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
                    text: String::new(),
                });

                if !is_empty {
                    stack.push(Frame {
                        slot: Some(elements.len() - 1),
                        leading: true,
                    });
                }
            }
            Event::End(_) => {
                if stack.pop().is_none() {
                    return Err("unexpected closing tag".to_string());
                }
            }
            Event::Text(text) => {
                let unescaped = text.unescape().map_err(|e| e.to_string())?;
                match stack.last() {
                    Some(frame) => append_leading(&mut elements, frame, &unescaped),
                    None if !unescaped.trim().is_empty() => {
                        return Err("text outside document element".to_string());
                    }
                    None => {}
                }
            }
            Event::CData(cdata) => {
                if let Some(frame) = stack.last() {
                    append_leading(&mut elements, frame, &String::from_utf8_lossy(&cdata));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err("document has no root element".to_string());
    }
    if !stack.is_empty() {
        return Err("unexpected end of document".to_string());
    }

    Ok(elements)
}

fn append_leading(elements: &mut [XmlElement], frame: &Frame, text: &str) {
    if !frame.leading {
        return;
    }
    if let Some(element) = frame.slot.and_then(|slot| elements.get_mut(slot)) {
        element.text.push_str(text);
    }
}
