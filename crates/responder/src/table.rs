use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use crate::Error;
use crate::preset::{BUILTIN_ENTRIES, DEFAULT, PresetEntry, PresetTable};

static BUILTIN_TABLE: LazyLock<KeywordTable> = LazyLock::new(|| {
    let mut builder = KeywordTableBuilder::with_default(DEFAULT);
    for (keyword, response) in BUILTIN_ENTRIES {
        builder = builder.with_entry(keyword, response);
    }
    // The built-in keywords are all non-empty.
    match builder.build() {
        Ok(table) => table,
        Err(err) => unreachable!("built-in table is invalid: {err}"),
    }
});

/// A type that produces a canned reply for the user input.
///
/// Implementations must be pure: the same input always yields the same
/// reply, and producing a reply never fails.
pub trait Responder: Send + Sync {
    /// Returns the reply for `input`.
    fn respond(&self, input: &str) -> String;
}

#[derive(Debug)]
struct Entry {
    keyword: String,
    response: String,
}

#[derive(Debug)]
struct Inner {
    entries: Vec<Entry>,
    default: String,
}

/// An ordered mapping from lowercase keywords to canned responses, plus
/// a default response.
///
/// The table is immutable once built and cheap to clone.
#[derive(Clone, Debug)]
pub struct KeywordTable(Arc<Inner>);

impl KeywordTable {
    /// Returns the built-in table.
    #[inline]
    pub fn builtin() -> Self {
        BUILTIN_TABLE.clone()
    }

    /// Builds a table from its serialized form.
    pub fn from_preset(preset: PresetTable) -> Result<Self, Error> {
        let mut builder = KeywordTableBuilder::with_default(preset.default);
        for PresetEntry { keyword, response } in preset.entries {
            builder = builder.with_entry(keyword, response);
        }
        builder.build()
    }

    /// Parses a table from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let preset: PresetTable = serde_json::from_str(json)?;
        Self::from_preset(preset)
    }

    /// Loads a table from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        debug!("loading keyword table from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Returns the response for `input`.
    ///
    /// The input is lowercased and the entries are scanned in table
    /// order. The response of the first entry whose keyword occurs in
    /// the input wins; the default response is returned when nothing
    /// matches.
    pub fn resolve(&self, input: &str) -> &str {
        let normalized = input.to_lowercase();
        let matched = self
            .0
            .entries
            .iter()
            .find(|entry| normalized.contains(entry.keyword.as_str()));
        match matched {
            Some(entry) => {
                trace!("matched keyword {:?}", entry.keyword);
                &entry.response
            }
            None => &self.0.default,
        }
    }

    /// Returns the default response.
    #[inline]
    pub fn default_response(&self) -> &str {
        &self.0.default
    }

    /// Returns the keywords in matching order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.0.entries.iter().map(|entry| entry.keyword.as_str())
    }

    /// Returns the number of keyword entries, not counting the default.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.entries.len()
    }

    /// Returns `true` if the table has no keyword entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.entries.is_empty()
    }

    /// Converts the table back to its serialized form.
    pub fn to_preset(&self) -> PresetTable {
        PresetTable {
            entries: self
                .0
                .entries
                .iter()
                .map(|entry| PresetEntry {
                    keyword: entry.keyword.clone(),
                    response: entry.response.clone(),
                })
                .collect(),
            default: self.0.default.clone(),
        }
    }
}

impl Default for KeywordTable {
    #[inline]
    fn default() -> Self {
        Self::builtin()
    }
}

impl Responder for KeywordTable {
    #[inline]
    fn respond(&self, input: &str) -> String {
        self.resolve(input).to_owned()
    }
}

/// Builder for [`KeywordTable`].
#[derive(Clone, Debug)]
pub struct KeywordTableBuilder {
    entries: Vec<(String, String)>,
    default: String,
}

impl KeywordTableBuilder {
    /// Creates a builder with the response used when nothing matches.
    #[inline]
    pub fn with_default<S: Into<String>>(default: S) -> Self {
        Self {
            entries: vec![],
            default: default.into(),
        }
    }

    /// Appends an entry. Entries are matched in insertion order.
    #[inline]
    pub fn with_entry<K: Into<String>, R: Into<String>>(
        mut self,
        keyword: K,
        response: R,
    ) -> Self {
        self.entries.push((keyword.into(), response.into()));
        self
    }

    /// Builds the table.
    ///
    /// Keywords are lowercased here so that matching only needs to
    /// normalize the input.
    pub fn build(self) -> Result<KeywordTable, Error> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for (index, (keyword, response)) in self.entries.into_iter().enumerate()
        {
            if keyword.trim().is_empty() {
                return Err(Error::EmptyKeyword { index });
            }
            entries.push(Entry {
                keyword: keyword.to_lowercase(),
                response,
            });
        }
        Ok(KeywordTable(Arc::new(Inner {
            entries,
            default: self.default,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{DATA, MACHINE_LEARNING, PYTHON, QUANTUM, TRIP};

    #[test]
    fn test_builtin_matches() {
        let table = KeywordTable::builtin();
        assert_eq!(table.resolve("Tell me about quantum computing"), QUANTUM);
        assert_eq!(
            table.resolve("What is MACHINE LEARNING anyway?"),
            MACHINE_LEARNING
        );
        assert_eq!(table.resolve("write some Python"), PYTHON);
        assert_eq!(table.resolve("Plan a trip to Japan"), TRIP);
        assert_eq!(table.resolve("Analyze my data"), DATA);
    }

    #[test]
    fn test_default_fallback() {
        let table = KeywordTable::builtin();
        assert_eq!(table.resolve("Hello there"), DEFAULT);
        assert_eq!(table.resolve(""), DEFAULT);
        assert_eq!(table.default_response(), DEFAULT);
    }

    #[test]
    fn test_first_match_wins() {
        let table = KeywordTable::builtin();
        // Both "quantum" and "data" occur, "quantum" comes first.
        assert_eq!(table.resolve("quantum data sets"), QUANTUM);
        assert_eq!(table.resolve("data about a python trip"), PYTHON);
    }

    #[test]
    fn test_substring_match() {
        let table = KeywordTable::builtin();
        // "database" contains "data", "trips" contains "trip".
        assert_eq!(table.resolve("Design a database"), DATA);
        assert_eq!(table.resolve("road trips"), TRIP);
    }

    #[test]
    fn test_builtin_order() {
        let table = KeywordTable::builtin();
        let keywords: Vec<_> = table.keywords().collect();
        assert_eq!(
            keywords,
            ["quantum", "machine learning", "python", "trip", "data"]
        );
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_custom_table() {
        let table = KeywordTableBuilder::with_default("fallback")
            .with_entry("Rust", "crab")
            .with_entry("rustacean", "never reached")
            .build()
            .unwrap();
        assert_eq!(table.resolve("I am a RUSTACEAN"), "crab");
        assert_eq!(table.respond("go"), "fallback");
        assert_eq!(table.keywords().next(), Some("rust"));
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let err = KeywordTableBuilder::with_default("fallback")
            .with_entry("ok", "fine")
            .with_entry("  ", "matches everything")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::EmptyKeyword { index: 1 }));
    }

    #[test]
    fn test_json_table() {
        let table = KeywordTable::from_json(
            r#"{
                "entries": [
                    { "keyword": "Weather", "response": "Sunny." },
                    { "keyword": "rain", "response": "Bring an umbrella." }
                ],
                "default": "No idea."
            }"#,
        )
        .unwrap();
        assert_eq!(table.resolve("how is the weather and rain"), "Sunny.");
        assert_eq!(table.resolve("rain?"), "Bring an umbrella.");
        assert_eq!(table.resolve("snow?"), "No idea.");

        let preset = table.to_preset();
        assert_eq!(preset.entries[0].keyword, "weather");
        assert_eq!(preset.default, "No idea.");
    }

    #[test]
    fn test_invalid_json() {
        let err = KeywordTable::from_json("{ \"entries\": 1 }").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = KeywordTable::load("/nonexistent/keywords.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
