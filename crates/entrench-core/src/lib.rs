#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod types;

pub use corpus::{CorpusAssembler, DecodePolicy};
pub use error::{Error, Result};
pub use types::{Corpus, CorpusRecord, TokenDocument};
