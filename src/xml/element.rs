//! Minimaler, besitzender XML-Elementbaum auf Basis von quick-xml.
//!
//! Ersetzt das DOM der Host-Anwendung: Elemente werden frei erzeugt und erst
//! durch den Aufrufer in einen Baum eingehängt.

use anyhow::{bail, Context, Result};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesEnd, BytesRef, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Kind-Knoten eines Elements
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// Verschachteltes Element
    Element(XmlElement),
    /// Text-Inhalt; Entity- und Zeichen-Referenzen sind bereits aufgelöst
    Text(String),
    /// Kommentar
    Comment(String),
}

/// Ein XML-Element mit Attributen in Original-Reihenfolge
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Tag-Name
    pub name: String,
    /// Attribute als (Name, Wert)-Paare
    pub attributes: Vec<(String, String)>,
    /// Kinder in Dokument-Reihenfolge
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Erstellt ein leeres Element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: setzt ein Attribut
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Setzt ein Attribut (überschreibt einen vorhandenen Wert)
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Liest einen Attributwert
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Hängt ein Kind-Element an
    pub fn append_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Alle Kind-Elemente (ohne Text und Kommentare)
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Erstes Kind-Element mit dem angegebenen Namen
    pub fn find_child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|element| element.name == name)
    }

    /// Parst ein XML-Dokument und gibt das Wurzel-Element zurück
    pub fn parse_str(xml_content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml_content);

        let mut buffer = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event_into(&mut buffer) {
                Ok(Event::Start(ref e)) => {
                    stack.push(element_from_start(&reader, e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(&reader, e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let mut element = stack.pop().context("End-Tag ohne oeffnendes Element")?;
                    element.children.retain(
                        |child| !matches!(child, XmlNode::Text(text) if text.trim().is_empty()),
                    );
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e.xml_content()?;
                    if let Some(parent) = stack.last_mut() {
                        push_text(parent, &text);
                    }
                }
                Ok(Event::GeneralRef(e)) => {
                    let resolved = resolve_reference(&e)?;
                    if let Some(parent) = stack.last_mut() {
                        push_text(parent, &resolved);
                    }
                }
                Ok(Event::Comment(e)) => {
                    let comment = reader.decoder().decode(&e)?.into_owned();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Comment(comment));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("XML-Fehler an Position {}", reader.buffer_position())
                    });
                }
                _ => {}
            }
            buffer.clear();
        }

        if let Some(open) = stack.last() {
            bail!("Unvollstaendiges XML: <{}> wird nicht geschlossen", open.name);
        }

        root.context("XML enthaelt kein Wurzel-Element")
    }

    /// Schreibt das Element als XML-Text (`indent_width == 0` = einzeilig)
    pub fn to_xml_string(&self, indent_width: usize) -> Result<String> {
        let mut writer = if indent_width > 0 {
            Writer::new_with_indent(Vec::new(), b' ', indent_width)
        } else {
            Writer::new(Vec::new())
        };
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner()).context("XML-Ausgabe ist kein gueltiges UTF-8")
    }

    fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.write_to(writer)?,
                XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
                XmlNode::Comment(comment) => {
                    // "--" ist in Kommentaren verboten, ein "-" am Ende ergäbe "--->"
                    if comment.contains("--") || comment.ends_with('-') {
                        bail!("Kommentar in <{}> enthaelt '--' oder endet mit '-'", self.name);
                    }
                    writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?
                }
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

fn element_from_start(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = start.name();
    let mut element = XmlElement::new(reader.decoder().decode(name.as_ref())?.into_owned());

    for attr in start.attributes() {
        let attr = attr.with_context(|| format!("Ungueltiges Attribut an <{}>", element.name))?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

/// Hängt Text an; direkt aufeinander folgende Stücke (z.B. um eine Referenz
/// herum) werden zu einem Knoten zusammengeführt
fn push_text(parent: &mut XmlElement, text: &str) {
    match parent.children.last_mut() {
        Some(XmlNode::Text(existing)) => existing.push_str(text),
        _ => parent.children.push(XmlNode::Text(text.to_string())),
    }
}

/// Löst `&#..;` und die vordefinierten Entities (`&amp;`, `&lt;`, ...) auf
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String> {
    if let Some(ch) = reference.resolve_char_ref()? {
        return Ok(ch.to_string());
    }

    let name = reference.decode()?;
    match resolve_predefined_entity(&name) {
        Some(value) => Ok(value.to_string()),
        None => bail!("Unbekannte Entity '&{};'", name),
    }
}

/// Hängt ein fertiges Element an das offene Eltern-Element oder setzt es als Wurzel
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.append_child(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        bail!("Mehrere Wurzel-Elemente: <{}>", element.name);
    }
    Ok(())
}
