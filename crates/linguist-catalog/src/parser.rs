//! Qt Linguist TS document parsing
//!
//! Reads the `TS` → `context` → `message` structure into a [`Catalog`].
//! Structural problems (bad XML, wrong root, a context without `<name>`, a
//! message without `<source>`) fail with [`CatalogError::MalformedCatalog`].
//! Anything else the format may grow is kept in [`TranslationUnit::extras`]
//! or skipped.

use crate::catalog::{Catalog, CatalogMetadata};
use crate::error::{CatalogError, CatalogResult};
use crate::language::LanguageTag;
use crate::unit::{Location, TranslationStatus, TranslationUnit};
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use tracing::{debug, warn};
use xml::reader::{EventReader, ParserConfig, XmlEvent};
use xmltree::{Element, XMLNode};

const ROOT: &str = "TS";
const CONTEXT: &str = "context";
const NAME: &str = "name";
const MESSAGE: &str = "message";
const SOURCE: &str = "source";
const COMMENT: &str = "comment";
const TRANSLATION: &str = "translation";
const LOCATION: &str = "location";
const NUMERUS_FORM: &str = "numerusform";
const LENGTH_VARIANT: &str = "lengthvariant";

/// Parses TS documents into catalogs
#[derive(Debug, Clone)]
pub struct CatalogParser {
    origin: String,
    language_hint: Option<LanguageTag>,
}

impl CatalogParser {
    /// A parser reporting errors against `origin` (usually the file path)
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            language_hint: None,
        }
    }

    /// Language to use when the root element has no usable `language` attribute
    pub fn with_language_hint(mut self, language: LanguageTag) -> Self {
        self.language_hint = Some(language);
        self
    }

    /// Parse a document held in memory
    pub fn parse_str(&self, document: &str) -> CatalogResult<Catalog> {
        self.parse_reader(document.as_bytes())
    }

    /// Parse a document from a reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> CatalogResult<Catalog> {
        let root = read_tree(reader).map_err(|reason| self.malformed(reason))?;

        if root.name != ROOT {
            return Err(self.malformed(format!("root element is <{}>, expected <{ROOT}>", root.name)));
        }

        let language = self.language_of(&root)?;
        let mut metadata = CatalogMetadata {
            version: root.attributes.get("version").cloned(),
            source_language: root.attributes.get("sourcelanguage").cloned(),
            contexts: Vec::new(),
        };

        let mut units = Vec::new();
        let mut locations = LocationTracker::default();

        for element in child_elements(&root) {
            if element.name != CONTEXT {
                debug!("{}: skipping <{}> at document level", self.origin, element.name);
                continue;
            }
            let name = self.parse_context(element, &mut locations, &mut units)?;
            if !metadata.contexts.contains(&name) {
                metadata.contexts.push(name);
            }
        }

        debug!(
            "{}: parsed {} units in {} contexts for {}",
            self.origin,
            units.len(),
            metadata.contexts.len(),
            language
        );

        Ok(Catalog::with_metadata(language, metadata, units))
    }

    fn language_of(&self, root: &Element) -> CatalogResult<LanguageTag> {
        match (root.attributes.get("language"), &self.language_hint) {
            (Some(code), hint) => match LanguageTag::parse(code) {
                Ok(tag) => {
                    if let Some(hint) = hint.as_ref().filter(|hint| **hint != tag) {
                        debug!("{}: language attribute {} overrides hint {}", self.origin, tag, hint);
                    }
                    Ok(tag)
                }
                Err(_) => match hint {
                    Some(hint) => {
                        warn!(
                            "{}: unusable language attribute '{}', using {}",
                            self.origin, code, hint
                        );
                        Ok(hint.clone())
                    }
                    None => Err(self.malformed(format!("invalid language attribute '{code}'"))),
                },
            },
            (None, Some(hint)) => Ok(hint.clone()),
            (None, None) => Err(self.malformed("root element has no language attribute")),
        }
    }

    fn parse_context(
        &self,
        context: &Element,
        locations: &mut LocationTracker,
        units: &mut Vec<TranslationUnit>,
    ) -> CatalogResult<String> {
        let name = context
            .get_child(NAME)
            .map(text_of)
            .ok_or_else(|| self.malformed("<context> without <name>"))?;

        for message in child_elements(context).filter(|e| e.name == MESSAGE) {
            units.push(self.parse_message(&name, message, locations)?);
        }

        Ok(name)
    }

    fn parse_message(
        &self,
        context: &str,
        message: &Element,
        locations: &mut LocationTracker,
    ) -> CatalogResult<TranslationUnit> {
        let source = message
            .get_child(SOURCE)
            .map(text_of)
            .ok_or_else(|| self.malformed(format!("<message> in context '{context}' without <source>")))?;

        let disambiguation = message
            .get_child(COMMENT)
            .map(text_of)
            .filter(|comment| !comment.is_empty());

        let numerus = message.attributes.get("numerus").is_some_and(|v| v == "yes");
        let mut unit = TranslationUnit::new(context, source, String::new());
        unit.disambiguation = disambiguation;
        unit.numerus = numerus;
        unit.id = message.attributes.get("id").cloned();

        match message.get_child(TRANSLATION) {
            Some(translation) => {
                let type_attr = translation.attributes.get("type").map(String::as_str);
                unit.status = TranslationStatus::from_type_attr(type_attr).unwrap_or_else(|| {
                    warn!(
                        "{}: unknown translation type '{}' for {}, treating as unfinished",
                        self.origin,
                        type_attr.unwrap_or_default(),
                        unit.key()
                    );
                    TranslationStatus::Unfinished
                });

                if numerus {
                    unit.numerus_forms = child_elements(translation)
                        .filter(|e| e.name == NUMERUS_FORM)
                        .map(text_of)
                        .collect();
                    unit.translation = unit.numerus_forms.first().cloned().unwrap_or_default();
                } else {
                    unit.translation = match translation.get_child(LENGTH_VARIANT) {
                        Some(variant) => text_of(variant),
                        None => text_of(translation),
                    };
                }
            }
            None => unit.status = TranslationStatus::Unfinished,
        }

        let mut extras = BTreeMap::new();
        for child in child_elements(message) {
            match child.name.as_str() {
                SOURCE | COMMENT | TRANSLATION => {}
                LOCATION => unit.locations.push(locations.resolve(child)),
                other => {
                    extras.insert(other.to_string(), text_of(child));
                }
            }
        }
        for (name, value) in &message.attributes {
            if name != "numerus" && name != "id" {
                extras.insert(format!("@{name}"), value.clone());
            }
        }
        unit.extras = extras;

        Ok(unit)
    }

    fn malformed(&self, reason: impl Into<String>) -> CatalogError {
        CatalogError::malformed(self.origin.clone(), reason)
    }
}

/// Parse an in-memory TS document whose root names its language
pub fn parse_catalog(document: &str) -> CatalogResult<Catalog> {
    CatalogParser::new("<memory>").parse_str(document)
}

/// Build the element tree, keeping whitespace-only text
///
/// `Element::parse` drops whitespace events, which would turn a translation
/// of `" "` into a blank one.
fn read_tree<R: Read>(reader: R) -> Result<Element, String> {
    let config = ParserConfig::new()
        .whitespace_to_characters(true)
        .cdata_to_characters(true)
        .ignore_comments(true);

    let mut open: Vec<Element> = Vec::new();
    for event in EventReader::new_with_config(reader, config) {
        match event.map_err(|e| e.to_string())? {
            XmlEvent::StartElement { name, attributes, .. } => {
                let mut element = Element::new(&name.local_name);
                for attribute in attributes {
                    element
                        .attributes
                        .insert(attribute.name.local_name, attribute.value);
                }
                open.push(element);
            }
            XmlEvent::EndElement { .. } => {
                let element = open.pop().ok_or("unbalanced end tag")?;
                match open.last_mut() {
                    Some(parent) => parent.children.push(XMLNode::Element(element)),
                    None => return Ok(element),
                }
            }
            XmlEvent::Characters(text) | XmlEvent::Whitespace(text) | XmlEvent::CData(text) => {
                if let Some(parent) = open.last_mut() {
                    parent.children.push(XMLNode::Text(text));
                }
            }
            _ => {}
        }
    }

    Err("document has no root element".to_string())
}

fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(XMLNode::as_element)
}

fn text_of(element: &Element) -> String {
    element.get_text().map(|text| text.into_owned()).unwrap_or_default()
}

/// Resolves `<location>` elements, which may omit the file name (same file
/// as the previous location) or give a line relative to the previous
/// location in that file (`line="+3"`).
#[derive(Debug, Default)]
struct LocationTracker {
    last_file: Option<String>,
    last_line: HashMap<String, u32>,
}

impl LocationTracker {
    fn resolve(&mut self, element: &Element) -> Location {
        let file = element
            .attributes
            .get("filename")
            .cloned()
            .or_else(|| self.last_file.clone())
            .unwrap_or_default();

        let line = element.attributes.get("line").and_then(|raw| {
            let raw = raw.trim();
            if raw.starts_with(['+', '-']) {
                let delta: i64 = raw.parse().ok()?;
                let base = i64::from(self.last_line.get(&file).copied().unwrap_or(0));
                u32::try_from(base + delta).ok()
            } else {
                raw.parse().ok()
            }
        });

        if let Some(line) = line {
            self.last_line.insert(file.clone(), line);
        }
        self.last_file = Some(file.clone());

        Location { file, line }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.0" language="cs_CZ">
<context>
    <name>LogWidget</name>
    <message>
        <location filename="../logwidget.cpp" line="30"/>
        <source>&amp;Clear</source>
        <translation>&amp;Smazat</translation>
    </message>
    <message>
        <location filename="../logwidget.cpp" line="42"/>
        <source>MIDI Clock, tick</source>
        <translation type="unfinished"></translation>
    </message>
</context>
<context>
    <name>MainWindow</name>
    <message>
        <location filename="../mainwindow.cpp" line="150"/>
        <source>Ctrl+Q</source>
        <comment>File|Quit</comment>
        <translation>Ctrl+Q</translation>
    </message>
    <message>
        <source>Arp through chord</source>
        <translation type="obsolete">Arpeggio bei Akkord</translation>
    </message>
</context>
</TS>
"#;

    #[test]
    fn test_parse_sample() {
        let catalog = parse_catalog(SAMPLE).unwrap();

        assert_eq!(catalog.language().as_str(), "cs_CZ");
        assert_eq!(catalog.metadata().version.as_deref(), Some("2.0"));
        assert_eq!(catalog.contexts().collect::<Vec<_>>(), vec!["LogWidget", "MainWindow"]);
        assert_eq!(catalog.len(), 4);

        let clear = &catalog.units()[0];
        assert_eq!(clear.source, "&Clear");
        assert_eq!(clear.translation, "&Smazat");
        assert_eq!(clear.status, TranslationStatus::Finished);
        assert_eq!(clear.locations, vec![Location::new("../logwidget.cpp", Some(30))]);

        let tick = &catalog.units()[1];
        assert_eq!(tick.status, TranslationStatus::Unfinished);
        assert!(tick.translation.is_empty());

        let quit = &catalog.units()[2];
        assert_eq!(quit.disambiguation.as_deref(), Some("File|Quit"));

        let chord = &catalog.units()[3];
        assert_eq!(chord.status, TranslationStatus::Obsolete);
        assert!(chord.locations.is_empty());
    }

    #[test]
    fn test_malformed_documents() {
        let unclosed = "<TS version=\"2.0\" language=\"de\"><context><name>X</name>";
        assert!(parse_catalog(unclosed).unwrap_err().is_malformed());

        let wrong_root = "<catalog language=\"de\"></catalog>";
        assert!(parse_catalog(wrong_root).unwrap_err().is_malformed());

        let no_source = r#"<TS language="de"><context><name>X</name>
            <message><translation>Y</translation></message></context></TS>"#;
        let error = parse_catalog(no_source).unwrap_err();
        assert!(error.to_string().contains("without <source>"));

        let no_name = r#"<TS language="de"><context><message><source>a</source></message></context></TS>"#;
        assert!(parse_catalog(no_name).unwrap_err().is_malformed());
    }

    #[test]
    fn test_language_hint() {
        let document = r#"<TS version="2.0"><context><name>X</name></context></TS>"#;
        assert!(parse_catalog(document).unwrap_err().is_malformed());

        let catalog = CatalogParser::new("qmidiarp_fr.ts")
            .with_language_hint(LanguageTag::parse("fr").unwrap())
            .parse_str(document)
            .unwrap();
        assert_eq!(catalog.language().as_str(), "fr");
        assert_eq!(catalog.contexts().collect::<Vec<_>>(), vec!["X"]);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_unknown_metadata_is_preserved() {
        let document = r#"<TS version="2.1" language="es" sourcelanguage="en">
<defaultcodec>UTF-8</defaultcodec>
<context>
    <name>SeqWidget</name>
    <message id="seq.loop" priority="low">
        <source>&amp;Loop</source>
        <oldsource>Loop</oldsource>
        <translatorcomment>check with upstream</translatorcomment>
        <translation type="reviewed">&amp;Bucle</translation>
    </message>
</context>
</TS>"#;
        let catalog = parse_catalog(document).unwrap();
        assert_eq!(catalog.metadata().source_language.as_deref(), Some("en"));

        let unit = &catalog.units()[0];
        assert_eq!(unit.id.as_deref(), Some("seq.loop"));
        assert_eq!(unit.extras.get("oldsource").map(String::as_str), Some("Loop"));
        assert_eq!(
            unit.extras.get("translatorcomment").map(String::as_str),
            Some("check with upstream")
        );
        assert_eq!(unit.extras.get("@priority").map(String::as_str), Some("low"));
        // Unknown translation type is not vouched for.
        assert_eq!(unit.status, TranslationStatus::Unfinished);
        assert_eq!(unit.translation, "&Bucle");
    }

    #[test]
    fn test_numerus_and_missing_translation() {
        let document = r#"<TS version="2.1" language="cs">
<context>
    <name>MainWindow</name>
    <message numerus="yes">
        <source>%n module(s)</source>
        <translation>
            <numerusform>%n modul</numerusform>
            <numerusform>%n moduly</numerusform>
            <numerusform>%n modulů</numerusform>
        </translation>
    </message>
    <message>
        <source>Groove</source>
    </message>
</context>
</TS>"#;
        let catalog = parse_catalog(document).unwrap();

        let plural = &catalog.units()[0];
        assert!(plural.numerus);
        assert_eq!(plural.numerus_forms.len(), 3);
        assert_eq!(plural.translation, "%n modul");
        assert_eq!(plural.status, TranslationStatus::Finished);

        let missing = &catalog.units()[1];
        assert_eq!(missing.status, TranslationStatus::Unfinished);
        assert!(missing.translation.is_empty());
    }

    #[test]
    fn test_whitespace_translations_are_kept() {
        let document = r#"<TS version="2.1" language="de">
<context>
    <name>LogWidget</name>
    <message>
        <source>Separator</source>
        <translation> </translation>
    </message>
    <message>
        <source>Padded</source>
        <translation> a </translation>
    </message>
    <message>
        <source>Blank</source>
        <translation></translation>
    </message>
    <message>
        <source>&amp;Loop</source>
        <translation>
            <lengthvariant>&amp;Schleife</lengthvariant>
            <lengthvariant>&amp;S</lengthvariant>
        </translation>
    </message>
</context>
</TS>"#;
        let catalog = parse_catalog(document).unwrap();

        let separator = catalog.resolve("LogWidget", "Separator", None);
        assert_eq!(separator.text, " ");
        assert!(!catalog.units()[0].is_blank_finished());

        assert_eq!(catalog.units()[1].translation, " a ");
        assert!(catalog.units()[2].is_blank_finished());
        assert_eq!(catalog.units()[3].translation, "&Schleife");
        assert_eq!(catalog.contexts().collect::<Vec<_>>(), vec!["LogWidget"]);
    }

    #[test]
    fn test_relative_locations() {
        let document = r#"<TS version="2.1" language="de">
<context>
    <name>ArpWidget</name>
    <message>
        <location filename="../arpwidget.cpp" line="88"/>
        <location line="+9"/>
        <source>Input</source>
        <translation>Eingang</translation>
    </message>
    <message>
        <location line="-20"/>
        <location filename="../other.cpp" line="oops"/>
        <source>Output</source>
        <translation>Ausgang</translation>
    </message>
</context>
</TS>"#;
        let catalog = parse_catalog(document).unwrap();

        assert_eq!(
            catalog.units()[0].locations,
            vec![
                Location::new("../arpwidget.cpp", Some(88)),
                Location::new("../arpwidget.cpp", Some(97)),
            ]
        );
        assert_eq!(
            catalog.units()[1].locations,
            vec![
                Location::new("../arpwidget.cpp", Some(77)),
                Location::new("../other.cpp", None),
            ]
        );
    }
}
