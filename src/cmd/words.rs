use crate::reports;
use clap::Args;
use lexiscan::cancel::CancellationToken;
use lexiscan::config::Config;
use lexiscan::engine::ranking;
use lexiscan::error::LsResult;
use lexiscan::extractor::ChunkedWordExtractor;
use lexiscan::types::{ExtractionStatus, WordBatch};
use std::path::PathBuf;
use tracing::error;

#[derive(Args, Debug, Clone)]
pub struct WordsArgs {
    /// Text file to read
    pub file: PathBuf,

    #[command(flatten)]
    pub config: Config,

    /// Number of words to list
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}

pub fn run(args: &WordsArgs, config: Config) -> LsResult<ExtractionStatus> {
    let mut totals = WordBatch::default();
    let mut extractor = ChunkedWordExtractor::new(config.extractor);
    let status = extractor.run_path(
        &args.file,
        &CancellationToken::new(),
        &mut |batch: WordBatch| {
            for (word, count) in batch {
                *totals.entry(word).or_default() += count;
            }
        },
    );

    if status == ExtractionStatus::OpenError {
        error!("❌ File not found or unreadable: {}", args.file.display());
        return Ok(status);
    }

    let total: u64 = totals.values().sum();
    let top = ranking::top_k(totals.iter().map(|(w, &c)| (w.as_str(), c)), args.limit);
    reports::print_words(&top, totals.len(), total);

    Ok(status)
}
