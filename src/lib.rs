use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod codec;
pub mod error;
pub mod loader;
pub mod parser;
pub mod scanner;

pub use error::{MalformedLine, PoError, Result};
pub use loader::{load_all_dictionaries_from_dir, parse_po_file};
pub use parser::{ParseMode, ParseReport, Parser};
pub use scanner::{Keyword, Line, classify};

/// Message catalog keyed by the original string (msgid), holding the
/// translated string (msgstr).
///
/// Keys are unique; adding an existing key replaces its value.
/// ```
/// let mut dict = pofile::Dictionary::new();
/// dict.add_message("Hello", "Bonjour");
/// assert_eq!(dict.get_message("Hello"), Some("Bonjour"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(HashMap<String, String>);

impl Dictionary {
    pub fn new() -> Self {
        Dictionary(HashMap::new())
    }

    pub fn add_message(&mut self, msg_id: impl Into<String>, msg_str: impl Into<String>) {
        self.0.insert(msg_id.into(), msg_str.into());
    }

    pub fn has_message(&self, msg_id: &str) -> bool {
        self.0.contains_key(msg_id)
    }

    pub fn get_message(&self, msg_id: &str) -> Option<&str> {
        self.0.get(msg_id).map(String::as_str)
    }

    /// Removes a message, returning its translation if it was present.
    pub fn remove_message(&mut self, msg_id: &str) -> Option<String> {
        self.0.remove(msg_id)
    }

    /// Copies every entry of `other` into this dictionary; on overlapping
    /// keys the value from `other` wins.
    pub fn merge(&mut self, other: &Dictionary) {
        for (msg_id, msg_str) in &other.0 {
            self.0.insert(msg_id.clone(), msg_str.clone());
        }
    }

    /// Parse PO text into this dictionary with the default (legacy) parser.
    pub fn parse_and_load(&mut self, content: &str) -> ParseReport {
        Parser::new().parse(content, self)
    }

    pub fn parse_and_load_with(&mut self, parser: &Parser, content: &str) -> ParseReport {
        parser.parse(content, self)
    }

    /// Parse PO text into a fresh dictionary, then merge it over this one.
    pub fn merge_parsed_text(&mut self, content: &str) -> ParseReport {
        let mut parsed = Dictionary::new();
        let report = parsed.parse_and_load(content);
        self.merge(&parsed);
        report
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn messages(&self) -> &HashMap<String, String> {
        &self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        dict.extend(iter);
        dict
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Dictionary {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (msg_id, msg_str) in iter {
            self.add_message(msg_id, msg_str);
        }
    }
}

impl IntoIterator for Dictionary {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Renders the pretty-printed JSON encoding.
impl fmt::Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json_string().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
