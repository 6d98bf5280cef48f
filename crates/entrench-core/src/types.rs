//! Domain types shared by the assembler, the lemmatizer and the store.

use serde::{Deserialize, Serialize};

/// Column names of the corpus table, in order.
pub const CORPUS_COLUMNS: [&str; 3] = ["country", "year", "text"];

/// One constitution text plus the metadata parsed from its file name.
///
/// `country` and `year` come from the `<Country>_<Year>` naming convention and
/// are not validated against anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub country: String,
    pub year: String,
    pub text: String,
}

/// Ordered table of records, one row per input file.
///
/// Row order is input order; duplicates of `(country, year)` are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    records: Vec<CorpusRecord>,
}

impl Corpus {
    pub fn new(records: Vec<CorpusRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CorpusRecord] {
        &self.records
    }

    pub fn get(&self, row: usize) -> Option<&CorpusRecord> {
        self.records.get(row)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CorpusRecord> {
        self.records.iter()
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.country.as_str())
    }

    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.year.as_str())
    }

    /// The raw-text column, the usual input of the lemmatizer.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.text.as_str())
    }

    pub fn into_records(self) -> Vec<CorpusRecord> {
        self.records
    }
}

impl From<Vec<CorpusRecord>> for Corpus {
    fn from(records: Vec<CorpusRecord>) -> Self {
        Self::new(records)
    }
}

impl IntoIterator for Corpus {
    type Item = CorpusRecord;
    type IntoIter = std::vec::IntoIter<CorpusRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a CorpusRecord;
    type IntoIter = std::slice::Iter<'a, CorpusRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Lowercase lemmas of one document, punctuation removed, in token order.
pub type TokenDocument = Vec<String>;
