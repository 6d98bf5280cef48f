//! Conversions between domain rows and Arrow record batches.

use arrow_array::builder::{ListBuilder, StringBuilder};
use arrow_array::{Array, ListArray, RecordBatch, StringArray};
use std::sync::Arc;

use entrench_core::error::{Error, Result};
use entrench_core::types::{Corpus, CorpusRecord, TokenDocument};

use crate::schema::{build_corpus_schema, build_lemmas_schema, COUNTRY, LEMMAS, TEXT, YEAR};

/// A corpus row after lemmatization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LemmaRecord {
	pub country: String,
	pub year: String,
	pub lemmas: TokenDocument,
}

pub fn corpus_to_record_batch(corpus: &Corpus) -> Result<RecordBatch> {
	let countries: Vec<&str> = corpus.countries().collect();
	let years: Vec<&str> = corpus.years().collect();
	let texts: Vec<&str> = corpus.texts().collect();
	RecordBatch::try_new(build_corpus_schema(), vec![
		Arc::new(StringArray::from(countries)),
		Arc::new(StringArray::from(years)),
		Arc::new(StringArray::from(texts)),
	])
	.map_err(format_err)
}

pub fn record_batch_to_corpus(batch: &RecordBatch) -> Result<Corpus> {
	let country_col = string_column(batch, COUNTRY)?;
	let year_col = string_column(batch, YEAR)?;
	let text_col = string_column(batch, TEXT)?;
	let records = (0..batch.num_rows())
		.map(|i| CorpusRecord {
			country: country_col.value(i).to_string(),
			year: year_col.value(i).to_string(),
			text: text_col.value(i).to_string(),
		})
		.collect::<Vec<_>>();
	Ok(Corpus::new(records))
}

/// Pair each corpus row with its token document; lengths must match.
pub fn lemmas_to_record_batch(corpus: &Corpus, docs: &[TokenDocument]) -> Result<RecordBatch> {
	if corpus.len() != docs.len() {
		return Err(Error::InvalidArgument(format!(
			"{} corpus rows but {} token documents",
			corpus.len(),
			docs.len()
		)));
	}
	let countries: Vec<&str> = corpus.countries().collect();
	let years: Vec<&str> = corpus.years().collect();
	let mut lemmas = ListBuilder::new(StringBuilder::new());
	for doc in docs {
		for lemma in doc {
			lemmas.values().append_value(lemma);
		}
		lemmas.append(true);
	}
	RecordBatch::try_new(build_lemmas_schema(), vec![
		Arc::new(StringArray::from(countries)),
		Arc::new(StringArray::from(years)),
		Arc::new(lemmas.finish()),
	])
	.map_err(format_err)
}

pub fn record_batch_to_lemmas(batch: &RecordBatch) -> Result<Vec<LemmaRecord>> {
	let country_col = string_column(batch, COUNTRY)?;
	let year_col = string_column(batch, YEAR)?;
	let lemma_col = batch
		.column_by_name(LEMMAS)
		.ok_or_else(|| Error::Format(format!("{LEMMAS} column missing")))?
		.as_any()
		.downcast_ref::<ListArray>()
		.ok_or_else(|| Error::Format(format!("{LEMMAS} column is not a list")))?;
	let mut out = Vec::with_capacity(batch.num_rows());
	for i in 0..batch.num_rows() {
		let values = lemma_col.value(i);
		let values = values
			.as_any()
			.downcast_ref::<StringArray>()
			.ok_or_else(|| Error::Format(format!("{LEMMAS} items are not strings")))?;
		out.push(LemmaRecord {
			country: country_col.value(i).to_string(),
			year: year_col.value(i).to_string(),
			lemmas: values.iter().map(|v| v.unwrap_or_default().to_string()).collect(),
		});
	}
	Ok(out)
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
	let col = batch
		.column_by_name(name)
		.ok_or_else(|| Error::Format(format!("{name} column missing")))?
		.as_any()
		.downcast_ref::<StringArray>()
		.ok_or_else(|| Error::Format(format!("{name} column is not Utf8")))?;
	if col.null_count() > 0 {
		return Err(Error::Format(format!("{name} column contains nulls")));
	}
	Ok(col)
}

pub(crate) fn format_err(e: impl std::fmt::Display) -> Error {
	Error::Format(e.to_string())
}
