use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

pub const COUNTRY: &str = "country";
pub const YEAR: &str = "year";
pub const TEXT: &str = "text";
pub const LEMMAS: &str = "lemmas";

pub fn build_corpus_schema() -> Arc<Schema> {
	Arc::new(Schema::new(vec![
		Field::new(COUNTRY, DataType::Utf8, false),
		Field::new(YEAR, DataType::Utf8, false),
		Field::new(TEXT, DataType::Utf8, false),
	]))
}

/// Item field matches what `ListBuilder<StringBuilder>` produces.
pub fn build_lemmas_schema() -> Arc<Schema> {
	Arc::new(Schema::new(vec![
		Field::new(COUNTRY, DataType::Utf8, false),
		Field::new(YEAR, DataType::Utf8, false),
		Field::new(LEMMAS, DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))), false),
	]))
}
