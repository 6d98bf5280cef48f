use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::types::{Corpus, CorpusRecord};

/// What to do with bytes that are not valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Fail the read with [`Error::Decode`].
    Strict,
    /// Silently drop undecodable sequences and keep the rest of the text.
    #[default]
    Lossy,
}

/// Builds a [`Corpus`] from constitution files named `<Country>_<Year>.txt`.
#[derive(Debug, Clone, Default)]
pub struct CorpusAssembler {
    decode: DecodePolicy,
}

impl CorpusAssembler {
    pub fn new(decode: DecodePolicy) -> Self {
        Self { decode }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.corpus.decode)
    }

    pub fn decode_policy(&self) -> DecodePolicy {
        self.decode
    }

    /// One record per path, in input order. Any unreadable file fails the
    /// whole call so rows never drift out of alignment with `paths`.
    pub fn assemble<I, P>(&self, paths: I) -> Result<Corpus>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut records = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let (country, year) = parse_file_name(path);
            let text = self.read_text(path)?;
            debug!(path = %path.display(), %country, %year, bytes = text.len(), "read constitution");
            records.push(CorpusRecord { country, year, text });
        }
        info!(rows = records.len(), "assembled corpus");
        Ok(Corpus::new(records))
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound(format!("constitution file {}", path.display())),
            _ => Error::io(path, e),
        })?;
        decode_utf8(bytes, self.decode, path)
    }
}

/// Split a file stem into `(country, year)`.
///
/// The last `_` segment is the year; the rest are joined with spaces. A stem
/// without `_` yields an empty country and the whole stem as the year.
pub fn parse_stem(stem: &str) -> (String, String) {
    let mut parts: Vec<&str> = stem.split('_').collect();
    let year = parts.pop().unwrap_or_default().to_string();
    (parts.join(" "), year)
}

/// [`parse_stem`] applied to the path's file stem.
pub fn parse_file_name(path: &Path) -> (String, String) {
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    parse_stem(&stem)
}

fn decode_utf8(bytes: Vec<u8>, policy: DecodePolicy, path: &Path) -> Result<String> {
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => match policy {
            DecodePolicy::Strict => Err(Error::Decode {
                path: path.to_path_buf(),
                offset: err.utf8_error().valid_up_to(),
            }),
            DecodePolicy::Lossy => {
                let bytes = err.into_bytes();
                let mut text = String::with_capacity(bytes.len());
                for chunk in bytes.utf8_chunks() {
                    text.push_str(chunk.valid());
                }
                Ok(text)
            }
        },
    }
}

/// All `.txt` files under `root`, recursively, in sorted order.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::NotFound(format!("corpus directory {}", root.display())));
    }
    let mut txt_files = Vec::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry.map_err(|e| Error::Operation(format!("walking {}: {}", root.display(), e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            txt_files.push(path.to_path_buf());
        }
    }
    txt_files.sort();
    debug!(dir = %root.display(), files = txt_files.len(), "discovered corpus files");
    Ok(txt_files)
}
