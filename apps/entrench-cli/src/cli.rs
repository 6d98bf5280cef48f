//! Command definitions and the runners behind them.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

use entrench_core::config::PipelineConfig;
use entrench_core::corpus::{discover, CorpusAssembler};
use entrench_lemma::LemmatizationPipeline;
use entrench_store::{load_corpus, save_corpus, save_lemmas};

pub const CORPUS_FILE: &str = "corpus.parquet";
pub const LEMMAS_FILE: &str = "lemmas.parquet";

/// Prepare constitution corpora for textual entrenchment analysis.
#[derive(Debug, Parser)]
#[command(name = "entrench", version)]
pub struct Cli {
    /// Configuration environment (dev, prod, test); defaults to RUST_ENV
    #[arg(long, global = true)]
    pub env: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify the environment and create the project directories
    Verify,

    /// Read constitution files into a corpus table
    Assemble(AssembleArgs),

    /// Lemmatize the text column of a corpus table
    Lemmatize(LemmatizeArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct AssembleArgs {
    /// Directory of `<Country>_<Year>.txt` files [default: paths.raw_text_dir]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output Parquet file [default: <paths.processed_dir>/corpus.parquet]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct LemmatizeArgs {
    /// Corpus Parquet file [default: <paths.processed_dir>/corpus.parquet]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output Parquet file [default: <paths.processed_dir>/lemmas.parquet]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Model identifier [default: lemmatize.model]
    #[arg(short, long)]
    pub model: Option<String>,

    /// Documents per batch [default: lemmatize.batch_size]
    #[arg(long)]
    pub batch_size: Option<usize>,
}

pub fn run_assemble(config: &PipelineConfig, args: &AssembleArgs) -> anyhow::Result<PathBuf> {
    let input = args.input.clone().unwrap_or_else(|| config.paths.raw_text_dir());
    let output = args.output.clone().unwrap_or_else(|| config.paths.processed_dir().join(CORPUS_FILE));

    info!(dir = %input.display(), "Assembling corpus");
    let files = discover(&input)?;
    let corpus = CorpusAssembler::from_config(config)
        .assemble(&files)
        .with_context(|| format!("assembling corpus from {}", input.display()))?;
    save_corpus(&corpus, &output)?;
    Ok(output)
}

pub fn run_lemmatize(config: &PipelineConfig, args: &LemmatizeArgs) -> anyhow::Result<PathBuf> {
    let mut config = config.clone();
    if let Some(model) = &args.model {
        config.lemmatize.model = model.clone();
    }
    if let Some(batch_size) = args.batch_size {
        config.lemmatize.batch_size = batch_size;
    }
    config.validate()?;
    let input = args.input.clone().unwrap_or_else(|| config.paths.processed_dir().join(CORPUS_FILE));
    let output = args.output.clone().unwrap_or_else(|| config.paths.processed_dir().join(LEMMAS_FILE));

    let pipeline = LemmatizationPipeline::from_config(&config)
        .with_context(|| format!("loading model '{}'", config.lemmatize.model))?;
    let corpus = load_corpus(&input)?;
    info!(rows = corpus.len(), model = pipeline.model_id(), batch_size = pipeline.batch_size(), "Lemmatizing corpus");

    let pb = ProgressBar::new(corpus.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%)")?
            .progress_chars("#>-"),
    );
    let docs = pipeline.lemmatize_with_progress(corpus.texts(), |done| pb.set_position(done as u64))?;
    pb.finish_and_clear();

    save_lemmas(&corpus, &docs, &output)?;
    Ok(output)
}
