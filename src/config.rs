use crate::consts::{
    DEFAULT_LINES_PER_BATCH, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_MIN_SUBSTRING_LEN, DEFAULT_TOP_K,
};
use crate::error::{LexiscanError, LsResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub extractor: ExtractorParams,
    #[command(flatten)]
    pub engine: EngineParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractorParams {
    /// Maximum characters taken from a line in one read
    #[arg(long, default_value_t = DEFAULT_MAX_CHUNK_CHARS)]
    pub max_chunk_chars: usize,

    /// Lines processed between two word batches
    #[arg(long, default_value_t = DEFAULT_LINES_PER_BATCH)]
    pub lines_per_batch: usize,
}

impl Default for ExtractorParams {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            lines_per_batch: DEFAULT_LINES_PER_BATCH,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineParams {
    /// Shortest letter combination that is counted
    #[arg(long, default_value_t = DEFAULT_MIN_SUBSTRING_LEN)]
    pub min_substring_len: usize,

    /// Number of letter combinations in the ranking
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            min_substring_len: DEFAULT_MIN_SUBSTRING_LEN,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LsResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Overlays only the values that were typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field;
                }
            };
        }

        update_if_present!(extractor.max_chunk_chars);
        update_if_present!(extractor.lines_per_batch);
        update_if_present!(engine.min_substring_len);
        update_if_present!(engine.top_k);
    }

    pub fn validate(&self) -> LsResult<()> {
        let checks = [
            ("max_chunk_chars", self.extractor.max_chunk_chars),
            ("lines_per_batch", self.extractor.lines_per_batch),
            ("min_substring_len", self.engine.min_substring_len),
            ("top_k", self.engine.top_k),
        ];
        for (name, value) in checks {
            if value == 0 {
                return Err(LexiscanError::Config(format!(
                    "'{}' must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }
}
