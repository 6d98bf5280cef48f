//! entrench-lemma
//!
//! Lemmatization of constitution texts: a [`ModelRegistry`] resolves a model
//! identifier to lemma tables, and [`LemmatizationPipeline`] runs the model
//! over documents in batches.

pub mod model;
pub mod pipeline;
pub mod registry;
pub mod tokenize;

pub use model::{LanguageModel, LookupModel, ModelMeta, Token};
pub use pipeline::{lemmatize, LemmatizationPipeline};
pub use registry::{ModelRegistry, BLANK_MODEL};
