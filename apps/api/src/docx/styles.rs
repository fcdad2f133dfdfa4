use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::DocxError;

/// Maps paragraph style ids to their display names, read from `word/styles.xml`.
///
/// Word stores built-in names in English lower case (`heading 1`) while the id
/// depends on the authoring locale (`Heading1`, `Ttulo1`, ...), so both sides
/// are needed to recognise a style.
#[derive(Debug, Clone, Default)]
pub struct StyleCatalog {
    names_by_id: HashMap<String, String>,
}

impl StyleCatalog {
    pub fn parse(xml: &str) -> Result<Self, DocxError> {
        let mut reader = Reader::from_str(xml);
        let mut names_by_id = HashMap::new();
        let mut current_id: Option<String> = None;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) if e.local_name().as_ref() == b"style" => {
                    current_id = attribute(e, b"styleId");
                }
                Event::Empty(ref e) if e.local_name().as_ref() == b"name" => {
                    if let (Some(id), Some(name)) = (current_id.as_ref(), attribute(e, b"val")) {
                        names_by_id.insert(id.clone(), name);
                    }
                }
                Event::End(ref e) if e.local_name().as_ref() == b"style" => {
                    current_id = None;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Self { names_by_id })
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.names_by_id.get(id).map(String::as_str)
    }

    /// Resolves a style given by display name (or by id) to the id that
    /// `w:pStyle` must reference. Unknown names fall back to the name with
    /// whitespace removed, which is how Word derives ids for built-in styles.
    pub fn resolve_id(&self, name: &str) -> String {
        if self.names_by_id.contains_key(name) {
            return name.to_string();
        }
        self.names_by_id
            .iter()
            .filter(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
            .min()
            .cloned()
            .unwrap_or_else(|| name.split_whitespace().collect())
    }
}

/// Reads an attribute by local name, ignoring the namespace prefix.
pub(crate) fn attribute(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}
