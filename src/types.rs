use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Word -> occurrences within one processed unit of input.
pub type WordBatch = FnvHashMap<String, u64>;

/// Terminal status of one extractor run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionStatus {
    OpenError,
    Finished,
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSubstring {
    pub text: String,
    pub count: u64,
}

impl RankedSubstring {
    pub fn new(text: impl Into<String>, count: u64) -> Self {
        Self {
            text: text.into(),
            count,
        }
    }

    /// Share of all counted letter combinations, in percent.
    pub fn percentage(&self, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.count as f64 * 100.0 / total as f64
        }
    }
}

/// Counters that only grow during a run and are cleared on reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningAggregates {
    pub total_substrings: u64,
    pub words_processed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UpdatePhase {
    Interim,
    Final,
}

/// What the engine publishes after a batch changed the ranking, or on finalize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingUpdate {
    pub aggregates: RunningAggregates,
    /// Empty on a final update when the ranking did not change.
    pub ranking: Vec<RankedSubstring>,
    pub phase: UpdatePhase,
}

impl RankingUpdate {
    pub fn is_final(&self) -> bool {
        self.phase == UpdatePhase::Final
    }
}
