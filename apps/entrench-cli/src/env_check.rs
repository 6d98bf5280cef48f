//! Environment verification and project directory bootstrap.

use std::fs;
use std::path::PathBuf;

use entrench_core::config::{PathsConfig, PipelineConfig};
use entrench_core::error::{Error, Result};
use entrench_lemma::{ModelMeta, ModelRegistry};
use tracing::{debug, error, info, warn};

/// Check that the configured model is installed. A version different from
/// `lemmatize.expected_model_version` is only warned about.
pub fn verify_environment(config: &PipelineConfig) -> Result<ModelMeta> {
    info!("Verifying project environment...");
    let registry = ModelRegistry::from_config(config);
    let model = &config.lemmatize.model;
    let meta = registry.meta(model).inspect_err(|e| {
        error!(model = %model, root = %registry.root().display(), "Missing model: {e}");
    })?;

    if let Some(expected) = &config.lemmatize.expected_model_version {
        if &meta.version != expected {
            warn!(
                model = %model,
                installed = %meta.version,
                required = %expected,
                "Version mismatch"
            );
        }
    }
    info!(model = %meta.name, version = %meta.version, "Environment validation passed");
    Ok(meta)
}

/// Create the data, raw-text and processed directories if missing.
pub fn setup_project_dirs(paths: &PathsConfig) -> Result<Vec<PathBuf>> {
    let directories = vec![paths.data_dir(), paths.raw_text_dir(), paths.processed_dir()];
    for directory in &directories {
        fs::create_dir_all(directory).map_err(|e| Error::io(directory, e))?;
        debug!(dir = %directory.display(), "Verified directory");
    }
    Ok(directories)
}
