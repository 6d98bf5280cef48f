//! Parquet persistence for corpus and lemma tables.
//!
//! Tables are Arrow record batches (see `schema`); `persist` writes and reads
//! them as Snappy-compressed Parquet files.

pub mod batch;
pub mod persist;
pub mod schema;

pub use batch::{corpus_to_record_batch, lemmas_to_record_batch, record_batch_to_corpus, record_batch_to_lemmas, LemmaRecord};
pub use persist::{load_corpus, load_lemmas, load_parquet, save_corpus, save_lemmas, save_parquet};
