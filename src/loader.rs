use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::Dictionary;
use crate::error::{PoError, Result};
use crate::parser::ParseReport;

/// Parse a single PO file into a new dictionary
///
/// # Errors
/// - File not found or unreadable
/// - File is not valid UTF-8
pub fn parse_po_file(path: &Path) -> Result<Dictionary> {
    let mut dictionary = Dictionary::new();
    dictionary.parse_and_load_from_file(path)?;
    Ok(dictionary)
}

/// Parse every `*.po` file of a directory
///
/// The filename (without extension) is used as the map key.
/// For example: `fr.po` -> `"fr"`, `pt_BR.po` -> `"pt_BR"`
///
/// # Errors
/// - Path is not a directory
/// - Directory or file read errors
pub fn load_all_dictionaries_from_dir(dir: &Path) -> Result<HashMap<String, Dictionary>> {
    if !dir.is_dir() {
        return Err(PoError::NotADirectory(dir.to_path_buf()));
    }

    let mut dictionaries = HashMap::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("po") {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            warn!("Skipping PO file with a non UTF-8 name: {}", path.display());
            continue;
        };

        dictionaries.insert(stem.to_string(), parse_po_file(&path)?);
    }

    if dictionaries.is_empty() {
        warn!("No PO files found in directory {}", dir.display());
    }

    Ok(dictionaries)
}

impl Dictionary {
    /// Parse a PO file and load its messages into this dictionary.
    pub fn parse_and_load_from_file(&mut self, path: &Path) -> Result<ParseReport> {
        let content = fs::read_to_string(path)?;
        debug!("Read PO file {}", path.display());
        Ok(self.parse_and_load(&content))
    }

    /// Parse a PO file on its own, then merge it over this dictionary.
    pub fn merge_file(&mut self, path: &Path) -> Result<ParseReport> {
        let mut parsed = Dictionary::new();
        let report = parsed.parse_and_load_from_file(path)?;
        self.merge(&parsed);
        Ok(report)
    }

    pub fn load_json_file(&mut self, path: &Path) -> Result<()> {
        let bytes = fs::read(path)?;
        self.load_json(&bytes)
    }

    pub fn load_csv_file(&mut self, path: &Path) -> Result<()> {
        let bytes = fs::read(path)?;
        self.load_csv(&bytes)
    }

    pub fn write_json_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_string()?)?;
        debug!(messages = self.len(), "Wrote JSON file {}", path.display());
        Ok(())
    }

    pub fn write_csv_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_csv_string()?)?;
        debug!(messages = self.len(), "Wrote CSV file {}", path.display());
        Ok(())
    }
}
