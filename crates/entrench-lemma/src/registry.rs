//! Named-model lookup: identifier -> `<root>/<id>/` holding the lemma tables.

use entrench_core::config::PipelineConfig;
use entrench_core::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::model::{read_json, LanguageModel, LookupModel, ModelMeta, LOOKUP_FILE, META_FILE};

/// Identifier of the built-in tokenizer-only model.
pub const BLANK_MODEL: &str = "blank_en";

#[derive(Debug, Clone)]
pub struct ModelRegistry {
    root: PathBuf,
}

impl ModelRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.paths.model_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of `id`, checked to contain every required file.
    pub fn resolve(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(Error::InvalidArgument(format!("invalid model identifier '{}'", id)));
        }
        let dir = self.root.join(id);
        for file in [META_FILE, LOOKUP_FILE] {
            if !dir.join(file).is_file() {
                return Err(Error::DependencyMissing {
                    what: format!("model '{}' ({} not found in {})", id, file, dir.display()),
                    remedy: remedy(id, &dir),
                });
            }
        }
        debug!(model = id, dir = %dir.display(), "resolved model");
        Ok(dir)
    }

    pub fn meta(&self, id: &str) -> Result<ModelMeta> {
        if id == BLANK_MODEL {
            return Ok(LookupModel::blank(BLANK_MODEL).meta().clone());
        }
        read_json(&self.resolve(id)?.join(META_FILE))
    }

    /// Load `id`, or fail before any text is touched.
    pub fn load(&self, id: &str) -> Result<Box<dyn LanguageModel>> {
        if id == BLANK_MODEL {
            return Ok(Box::new(LookupModel::blank(BLANK_MODEL)));
        }
        let dir = self.resolve(id)?;
        Ok(Box::new(LookupModel::from_dir(&dir)?))
    }
}

fn remedy(id: &str, dir: &Path) -> String {
    format!(
        "Install the '{id}' lemma tables with:\n  \
         mkdir -p {dir}\n  \
         cp <meta.json> {dir}/{META_FILE}\n  \
         cp <en_lemma_lookup.json from spacy-lookups-data> {dir}/{LOOKUP_FILE}\n\
         or point paths.model_dir (APP_PATHS__MODEL_DIR) at an existing model root.",
        dir = dir.display(),
    )
}
