//! Pull-parser that builds a [`SourceDocument`] from XML text

use crate::document::{Section, Setting, SettingOrigin, SourceDocument};
use crate::error::{ParseError, ParseResult};
use crate::parser::namespace::{decode_local_name, is_namespace_declaration};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashSet;

/// Name of the single root element
pub const ROOT_ELEMENT: &str = "config";

/// Parse XML text into a two-level source document
///
/// Character data of a setting is concatenated across text, CDATA and
/// comment boundaries and trimmed once when the element closes.
pub fn parse_document(input: &str) -> ParseResult<SourceDocument> {
    let mut reader = Reader::from_str(input);
    let mut builder = DocumentBuilder::new(input);

    loop {
        let offset = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| {
            ParseError::at_offset(
                format!("Malformed XML: {}", e),
                input,
                reader.buffer_position() as usize,
            )
        })?;

        match event {
            Event::Start(e) => builder.open_element(&e, false, offset)?,
            Event::Empty(e) => builder.open_element(&e, true, offset)?,
            Event::End(_) => builder.close_element(),
            Event::Text(e) => {
                let text = e.unescape().map_err(|err| {
                    builder.error(format!("Invalid character data: {}", err), offset)
                })?;
                builder.text(&text, offset)?;
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                let text = std::str::from_utf8(&raw).map_err(|err| {
                    builder.error(format!("Invalid UTF-8 in CDATA: {}", err), offset)
                })?;
                builder.text(text, offset)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    builder.finish()
}

struct PendingSetting {
    name: String,
    value: String,
}

struct DocumentBuilder<'a> {
    input: &'a str,
    sections: Vec<Section>,
    section_names: HashSet<String>,
    section: Option<Section>,
    /// Setting names of the open section, attribute and element forms alike
    setting_names: HashSet<String>,
    setting: Option<PendingSetting>,
    root_seen: bool,
    root_closed: bool,
}

impl<'a> DocumentBuilder<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            sections: Vec::new(),
            section_names: HashSet::new(),
            section: None,
            setting_names: HashSet::new(),
            setting: None,
            root_seen: false,
            root_closed: false,
        }
    }

    fn error(&self, message: String, offset: usize) -> ParseError {
        ParseError::at_offset(message, self.input, offset)
    }

    fn element_name(&self, element: &BytesStart<'_>, offset: usize) -> ParseResult<String> {
        decode_local_name(element.name().as_ref())
            .map_err(|e| self.error(format!("Element name is not valid UTF-8: {}", e), offset))
    }

    /// Non-namespace attributes as (local name, unescaped value)
    fn attributes(
        &self,
        element: &BytesStart<'_>,
        offset: usize,
    ) -> ParseResult<Vec<(String, String)>> {
        let mut attributes = Vec::new();
        for attr in element.attributes() {
            let attr =
                attr.map_err(|e| self.error(format!("Malformed attribute: {}", e), offset))?;
            let raw_name = std::str::from_utf8(attr.key.as_ref()).map_err(|e| {
                self.error(format!("Attribute name is not valid UTF-8: {}", e), offset)
            })?;
            if is_namespace_declaration(raw_name) {
                continue;
            }
            let name = decode_local_name(attr.key.as_ref())
                .map_err(|e| self.error(e.to_string(), offset))?;
            let value = attr.unescape_value().map_err(|e| {
                self.error(format!("Invalid value for attribute '{}': {}", name, e), offset)
            })?;
            attributes.push((name, value.into_owned()));
        }
        Ok(attributes)
    }

    fn open_element(
        &mut self,
        element: &BytesStart<'_>,
        empty: bool,
        offset: usize,
    ) -> ParseResult<()> {
        let name = self.element_name(element, offset)?;

        if !self.root_seen {
            return self.open_root(element, name, empty, offset);
        }
        if self.root_closed {
            return Err(self.error(
                format!("Unexpected element <{}> after the <{}> root", name, ROOT_ELEMENT),
                offset,
            ));
        }
        if let Some(setting) = &self.setting {
            let section = self.section.as_ref().map_or("", |s| s.name.as_str());
            return Err(self.error(
                format!(
                    "Setting '{}' in section '{}' contains element <{}>; \
                     only sections and settings are supported",
                    setting.name, section, name
                ),
                offset,
            ));
        }
        if self.section.is_some() {
            self.open_setting(element, name, empty, offset)
        } else {
            self.open_section(element, name, empty, offset)
        }
    }

    fn open_root(
        &mut self,
        element: &BytesStart<'_>,
        name: String,
        empty: bool,
        offset: usize,
    ) -> ParseResult<()> {
        if name != ROOT_ELEMENT {
            return Err(self.error(
                format!("Expected root element <{}>, found <{}>", ROOT_ELEMENT, name),
                offset,
            ));
        }
        for (attr, _) in self.attributes(element, offset)? {
            tracing::warn!(attribute = %attr, "ignoring attribute on <{}> root", ROOT_ELEMENT);
        }
        self.root_seen = true;
        self.root_closed = empty;
        Ok(())
    }

    fn open_section(
        &mut self,
        element: &BytesStart<'_>,
        name: String,
        empty: bool,
        offset: usize,
    ) -> ParseResult<()> {
        if self.section_names.contains(&name) {
            return Err(self.error(format!("Duplicate section '{}'", name), offset));
        }

        let attributes = self.attributes(element, offset)?;
        self.setting_names.clear();
        let mut section = Section::new(name);
        for (attr, value) in attributes {
            if !self.setting_names.insert(attr.clone()) {
                return Err(self.error(
                    format!("Duplicate setting '{}' in section '{}'", attr, section.name),
                    offset,
                ));
            }
            section.settings.push(Setting {
                name: attr,
                value,
                origin: SettingOrigin::Attribute,
            });
        }

        self.section_names.insert(section.name.clone());
        if empty {
            self.sections.push(section);
        } else {
            self.section = Some(section);
        }
        Ok(())
    }

    fn open_setting(
        &mut self,
        element: &BytesStart<'_>,
        name: String,
        empty: bool,
        offset: usize,
    ) -> ParseResult<()> {
        let attributes = self.attributes(element, offset)?;
        let section_name = match &self.section {
            Some(section) => section.name.clone(),
            None => return Ok(()),
        };

        if let Some((attr, _)) = attributes.first() {
            return Err(self.error(
                format!(
                    "Setting '{}' in section '{}' has attribute '{}'; \
                     only sections and settings are supported",
                    name, section_name, attr
                ),
                offset,
            ));
        }
        if !self.setting_names.insert(name.clone()) {
            return Err(self.error(
                format!("Duplicate setting '{}' in section '{}'", name, section_name),
                offset,
            ));
        }

        let pending = PendingSetting {
            name,
            value: String::new(),
        };
        if empty {
            self.push_setting(pending);
        } else {
            self.setting = Some(pending);
        }
        Ok(())
    }

    fn push_setting(&mut self, pending: PendingSetting) {
        if let Some(section) = &mut self.section {
            section.settings.push(Setting {
                name: pending.name,
                value: pending.value.trim().to_string(),
                origin: SettingOrigin::Element,
            });
        }
    }

    fn close_element(&mut self) {
        if let Some(pending) = self.setting.take() {
            self.push_setting(pending);
        } else if let Some(section) = self.section.take() {
            tracing::debug!(
                section = %section.name,
                settings = section.settings.len(),
                "parsed section"
            );
            self.sections.push(section);
        } else if self.root_seen {
            self.root_closed = true;
        }
    }

    fn text(&mut self, text: &str, offset: usize) -> ParseResult<()> {
        if let Some(setting) = &mut self.setting {
            setting.value.push_str(text);
            return Ok(());
        }
        if text.trim().is_empty() {
            return Ok(());
        }

        let message = if !self.root_seen || self.root_closed {
            format!("Text outside the <{}> root element", ROOT_ELEMENT)
        } else if let Some(section) = &self.section {
            format!(
                "Section '{}' contains text; settings must be attributes or child elements",
                section.name
            )
        } else {
            format!("Text directly inside <{}>; expected section elements", ROOT_ELEMENT)
        };
        Err(self.error(message, offset))
    }

    fn finish(self) -> ParseResult<SourceDocument> {
        if !self.root_seen {
            return Err(ParseError::new(
                format!("Missing <{}> root element", ROOT_ELEMENT),
                None,
            ));
        }
        if !self.root_closed {
            return Err(self.error(
                format!("Unexpected end of document: <{}> is not closed", ROOT_ELEMENT),
                self.input.len(),
            ));
        }
        Ok(SourceDocument {
            sections: self.sections,
        })
    }
}
