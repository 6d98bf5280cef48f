use arrow_array::RecordBatch;
use arrow_schema::ArrowError;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use tracing::info;

use entrench_core::error::{Error, Result};
use entrench_core::types::{Corpus, TokenDocument};

use crate::batch::{corpus_to_record_batch, format_err, lemmas_to_record_batch, record_batch_to_corpus, record_batch_to_lemmas, LemmaRecord};

pub const PARQUET_EXTENSION: &str = "parquet";

/// Write `batch` as a Snappy-compressed Parquet file.
///
/// `path` must end in `.parquet`; anything else is rejected before the file
/// is created.
pub fn save_parquet(batch: &RecordBatch, path: &Path) -> Result<()> {
    if path.extension().and_then(|e| e.to_str()) != Some(PARQUET_EXTENSION) {
        return Err(Error::InvalidArgument(format!(
            "Output path must end with .{PARQUET_EXTENSION} extension: {}",
            path.display()
        )));
    }
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let props = WriterProperties::builder().set_compression(Compression::SNAPPY).build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props)).map_err(format_err)?;
    writer.write(batch).map_err(format_err)?;
    writer.close().map_err(format_err)?;
    info!(path = %path.display(), rows = batch.num_rows(), "Saved Parquet file");
    Ok(())
}

/// Read a whole Parquet file back into one record batch.
pub fn load_parquet(path: &Path) -> Result<RecordBatch> {
    if !path.exists() {
        return Err(Error::NotFound(format!("Parquet file not found: {}", path.display())));
    }
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(format_err)?;
    let schema = builder.schema().clone();
    let reader = builder.build().map_err(format_err)?;
    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>().map_err(format_err)?;
    let batch = arrow_select::concat::concat_batches(&schema, &batches).map_err(format_err)?;
    info!(path = %path.display(), rows = batch.num_rows(), "Loaded Parquet file");
    Ok(batch)
}

pub fn save_corpus(corpus: &Corpus, path: &Path) -> Result<()> {
    save_parquet(&corpus_to_record_batch(corpus)?, path)
}

pub fn load_corpus(path: &Path) -> Result<Corpus> {
    record_batch_to_corpus(&load_parquet(path)?)
}

pub fn save_lemmas(corpus: &Corpus, docs: &[TokenDocument], path: &Path) -> Result<()> {
    save_parquet(&lemmas_to_record_batch(corpus, docs)?, path)
}

pub fn load_lemmas(path: &Path) -> Result<Vec<LemmaRecord>> {
    record_batch_to_lemmas(&load_parquet(path)?)
}
