use entrench_core::config::PipelineConfig;
use entrench_core::error::{Error, Result};
use entrench_core::types::TokenDocument;
use tracing::{debug, info};

use crate::model::LanguageModel;
use crate::registry::ModelRegistry;

/// Batched lemmatization over a loaded model.
///
/// Output has one [`TokenDocument`] per input text, in input order; punctuation
/// is dropped and lemmas are lowercased. Batch size only affects throughput.
pub struct LemmatizationPipeline {
    model: Box<dyn LanguageModel>,
    batch_size: usize,
}

impl LemmatizationPipeline {
    pub fn new(model: Box<dyn LanguageModel>, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::InvalidArgument("batch size must be at least 1".into()));
        }
        Ok(Self { model, batch_size })
    }

    /// Resolve and load `lemmatize.model` from `paths.model_dir`.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let registry = ModelRegistry::from_config(config);
        let model = registry.load(&config.lemmatize.model)?;
        Self::new(model, config.lemmatize.batch_size)
    }

    pub fn model_id(&self) -> &str {
        self.model.id()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn lemmatize<I, S>(&self, texts: I) -> Result<Vec<TokenDocument>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lemmatize_with_progress(texts, |_| {})
    }

    /// Like [`lemmatize`](Self::lemmatize), calling `on_batch` with the number
    /// of documents finished so far after every batch.
    pub fn lemmatize_with_progress<I, S, F>(&self, texts: I, mut on_batch: F) -> Result<Vec<TokenDocument>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(usize),
    {
        let mut out: Vec<TokenDocument> = Vec::new();
        let mut batch: Vec<S> = Vec::with_capacity(self.batch_size);
        for text in texts {
            batch.push(text);
            if batch.len() == self.batch_size {
                out.extend(self.run_batch(&batch)?);
                batch.clear();
                on_batch(out.len());
            }
        }
        if !batch.is_empty() {
            out.extend(self.run_batch(&batch)?);
            on_batch(out.len());
        }
        info!(model = self.model.id(), documents = out.len(), "lemmatized corpus");
        Ok(out)
    }

    fn run_batch<S: AsRef<str>>(&self, batch: &[S]) -> Result<Vec<TokenDocument>> {
        let texts: Vec<&str> = batch.iter().map(|s| s.as_ref()).collect();
        let analyzed = self.model.analyze_batch(&texts)?;
        if analyzed.len() != texts.len() {
            return Err(Error::Operation(format!(
                "model '{}' returned {} documents for a batch of {}",
                self.model.id(),
                analyzed.len(),
                texts.len()
            )));
        }
        debug!(size = texts.len(), "processed batch");
        Ok(analyzed
            .into_iter()
            .map(|tokens| {
                tokens
                    .into_iter()
                    .filter(|t| !t.is_punct)
                    .map(|t| t.lemma.to_lowercase())
                    .collect()
            })
            .collect())
    }
}

/// Load `model_id` from `registry`, then lemmatize every text.
///
/// A model that cannot be resolved fails here, before any text is read.
pub fn lemmatize<I, S>(texts: I, model_id: &str, registry: &ModelRegistry, batch_size: usize) -> Result<Vec<TokenDocument>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let model = registry.load(model_id)?;
    LemmatizationPipeline::new(model, batch_size)?.lemmatize(texts)
}
