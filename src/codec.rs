//! CSV and JSON interchange for [`Dictionary`].
//!
//! CSV layout:
//! ```text
//! MessageID,MessageString
//! Hello,Bonjour
//! "Hello, world!","Bonjour, le monde !"
//! ```
//!
//! JSON layout is a flat object:
//! ```json
//! {
//!   "Hello": "Bonjour"
//! }
//! ```
//!
//! Encoders write entries sorted by message id. Decoders read the whole input
//! before touching the dictionary, so a failed decode leaves it unchanged.

use std::collections::{BTreeMap, HashMap};
use std::io;

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::debug;

use crate::Dictionary;
use crate::error::{PoError, Result};

/// Header row written first by the CSV encoder
pub const CSV_HEADER: [&str; 2] = ["MessageID", "MessageString"];

impl Dictionary {
    fn sorted(&self) -> BTreeMap<&str, &str> {
        self.iter().collect()
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADER)?;
        for (msg_id, msg_str) in self.sorted() {
            writer.write_record([msg_id, msg_str])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| PoError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| PoError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Pretty-printed with two-space indentation.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.sorted())?)
    }

    /// Load CSV rows into this dictionary.
    ///
    /// The first record is always treated as the header and discarded without
    /// looking at it, so a CSV blob that starts directly with data loses its
    /// first entry.
    pub fn load_csv(&mut self, bytes: &[u8]) -> Result<()> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes);

        let mut record = StringRecord::new();
        if !reader.read_record(&mut record)? {
            return Err(PoError::MissingCsvHeader);
        }

        let mut rows = Vec::new();
        let mut number = 1;
        while reader.read_record(&mut record)? {
            number += 1;
            match (record.get(0), record.get(1)) {
                (Some(msg_id), Some(msg_str)) => {
                    rows.push((msg_id.to_string(), msg_str.to_string()));
                }
                _ => {
                    return Err(PoError::ShortCsvRow {
                        record: number,
                        fields: record.len(),
                    });
                }
            }
        }

        debug!(rows = rows.len(), "Decoded CSV messages");
        self.extend(rows);
        Ok(())
    }

    pub fn load_csv_str(&mut self, content: &str) -> Result<()> {
        self.load_csv(content.as_bytes())
    }

    /// Load a flat JSON object of string values, overwriting existing keys.
    pub fn load_json(&mut self, bytes: &[u8]) -> Result<()> {
        let messages: HashMap<String, String> = serde_json::from_slice(bytes)?;
        debug!(messages = messages.len(), "Decoded JSON messages");
        self.extend(messages);
        Ok(())
    }

    pub fn load_json_str(&mut self, content: &str) -> Result<()> {
        self.load_json(content.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        [
            ("Hello", "Bonjour"),
            ("Hello, world!", "Bonjour, le monde !"),
            ("Say \"cheese\"", "Dites \"fromage\""),
            ("two\nlines", "deux\nlignes"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_csv_encoding() {
        let dict: Dictionary = [("b", "2"), ("a", "x,y")].into_iter().collect();
        assert_eq!(
            dict.to_csv_string().unwrap(),
            "MessageID,MessageString\na,\"x,y\"\nb,2\n"
        );
    }

    #[test]
    fn test_csv_quotes_are_doubled() {
        let dict: Dictionary = [("Say \"hi\"", "ok")].into_iter().collect();
        assert_eq!(
            dict.to_csv_string().unwrap(),
            "MessageID,MessageString\n\"Say \"\"hi\"\"\",ok\n"
        );
    }

    #[test]
    fn test_csv_round_trip() {
        let dict = sample();
        let mut decoded = Dictionary::new();
        decoded.load_csv_str(&dict.to_csv_string().unwrap()).unwrap();
        assert_eq!(decoded, dict);
    }

    #[test]
    fn test_csv_header_is_stripped() {
        let mut dict = Dictionary::new();
        dict.load_csv_str("MessageID,MessageString\na,b\n").unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get_message("a"), Some("b"));
    }

    #[test]
    fn test_csv_header_only() {
        let mut dict = Dictionary::new();
        dict.load_csv_str("MessageID,MessageString\n").unwrap();
        assert!(dict.is_empty());
    }

    #[test]
    fn test_csv_first_data_row_is_lost_without_header() {
        let mut dict = Dictionary::new();
        dict.load_csv_str("a,b\nc,d\n").unwrap();
        assert_eq!(dict.len(), 1);
        assert!(!dict.has_message("a"));
        assert_eq!(dict.get_message("c"), Some("d"));
    }

    #[test]
    fn test_csv_empty_input() {
        let mut dict = Dictionary::new();
        assert!(matches!(
            dict.load_csv_str(""),
            Err(PoError::MissingCsvHeader)
        ));
    }

    #[test]
    fn test_csv_short_row() {
        let mut dict = Dictionary::new();
        let err = dict.load_csv_str("MessageID\nonly-one\n").unwrap_err();
        assert!(matches!(
            err,
            PoError::ShortCsvRow {
                record: 2,
                fields: 1
            }
        ));
    }

    #[test]
    fn test_csv_ragged_rows_fail_without_partial_load() {
        let mut dict = Dictionary::new();
        dict.add_message("keep", "me");
        let result = dict.load_csv_str("MessageID,MessageString\na,b\nc\n");
        assert!(matches!(result, Err(PoError::Csv(_))));
        assert_eq!(dict.len(), 1);
        assert!(!dict.has_message("a"));
    }

    #[test]
    fn test_json_encoding() {
        let dict: Dictionary = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(
            dict.to_json_string().unwrap(),
            "{\n  \"a\": \"1\",\n  \"b\": \"2\"\n}"
        );
        assert_eq!(Dictionary::new().to_json_string().unwrap(), "{}");
    }

    #[test]
    fn test_json_round_trip() {
        let dict = sample();
        let mut decoded = Dictionary::new();
        decoded.load_json_str(&dict.to_json_string().unwrap()).unwrap();
        assert_eq!(decoded, dict);
    }

    #[test]
    fn test_json_decode_merges_into_existing() {
        let mut dict = Dictionary::new();
        dict.add_message("a", "old");
        dict.add_message("keep", "me");
        dict.load_json_str(r#"{"a": "new", "b": "2"}"#).unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.get_message("a"), Some("new"));
        assert_eq!(dict.get_message("keep"), Some("me"));
    }

    #[test]
    fn test_json_rejects_non_string_values() {
        let mut dict = Dictionary::new();
        let result = dict.load_json_str(r#"{"a": "1", "b": 2}"#);
        assert!(matches!(result, Err(PoError::Json(_))));
        assert!(dict.is_empty());
    }

    #[test]
    fn test_json_rejects_invalid_input() {
        let mut dict = Dictionary::new();
        assert!(dict.load_json_str("not json").is_err());
        assert!(dict.load_json_str(r#"["a", "b"]"#).is_err());
    }
}
