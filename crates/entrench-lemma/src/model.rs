use entrench_core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::tokenize::{is_punct, split_words};

pub const META_FILE: &str = "meta.json";
pub const LOOKUP_FILE: &str = "lemma_lookup.json";

/// One token as produced by a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub is_punct: bool,
}

/// Tokenizer + lemmatizer used by the pipeline. Only tokenization and lemma
/// lookup are required; no parsing or entity stages.
pub trait LanguageModel: Send + Sync {
    fn id(&self) -> &str;
    fn analyze_batch(&self, texts: &[&str]) -> Result<Vec<Vec<Token>>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMeta {
    pub name: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default)]
    pub version: String,
}

fn default_lang() -> String {
    "en".to_string()
}

/// Table-driven lemmatizer: surface form -> lemma, falling back to the
/// lowercased form and then to the surface form itself.
#[derive(Debug, Clone)]
pub struct LookupModel {
    meta: ModelMeta,
    lookup: HashMap<String, String>,
}

impl LookupModel {
    pub fn new(meta: ModelMeta, lookup: HashMap<String, String>) -> Self {
        Self { meta, lookup }
    }

    /// Tokenization only; every lemma is its surface form.
    pub fn blank(name: &str) -> Self {
        Self::new(
            ModelMeta { name: name.to_string(), lang: default_lang(), version: String::new() },
            HashMap::new(),
        )
    }

    /// Load `meta.json` and `lemma_lookup.json` from a model directory.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let meta: ModelMeta = read_json(&dir.join(META_FILE))?;
        let lookup: HashMap<String, String> = read_json(&dir.join(LOOKUP_FILE))?;
        info!(model = %meta.name, version = %meta.version, entries = lookup.len(), "loaded lemma tables");
        Ok(Self::new(meta, lookup))
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    pub fn lemma_of(&self, word: &str) -> String {
        if let Some(lemma) = self.lookup.get(word) {
            return lemma.clone();
        }
        let lower = word.to_lowercase();
        match self.lookup.get(&lower) {
            Some(lemma) => lemma.clone(),
            None => word.to_string(),
        }
    }

    fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        Ok(split_words(text)?
            .into_iter()
            .map(|word| {
                let is_punct = is_punct(&word);
                let lemma = if is_punct { word.clone() } else { self.lemma_of(&word) };
                Token { text: word, lemma, is_punct }
            })
            .collect())
    }
}

impl LanguageModel for LookupModel {
    fn id(&self) -> &str {
        &self.meta.name
    }

    fn analyze_batch(&self, texts: &[&str]) -> Result<Vec<Vec<Token>>> {
        texts.iter().map(|t| self.analyze(t)).collect()
    }
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LookupModel {
        let lookup = [("amendments", "amendment"), ("were", "be"), ("Rights", "right")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LookupModel::new(ModelMeta { name: "test".into(), lang: "en".into(), version: "1".into() }, lookup)
    }

    #[test]
    fn exact_form_wins_over_lowercase() {
        let m = model();
        assert_eq!(m.lemma_of("Rights"), "right");
        assert_eq!(m.lemma_of("Amendments"), "amendment");
        assert_eq!(m.lemma_of("Parliament"), "Parliament");
    }

    #[test]
    fn analyze_flags_punctuation() {
        let docs = model().analyze_batch(&["Amendments were made."]).unwrap();
        let tokens = &docs[0];
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1], Token { text: "were".into(), lemma: "be".into(), is_punct: false });
        assert!(tokens[3].is_punct);
    }
}
