pub mod ranking;
pub mod substrings;

use crate::config::EngineParams;
use crate::types::{RankedSubstring, RankingUpdate, RunningAggregates, UpdatePhase, WordBatch};
use self::substrings::{fast_hash, word_substrings};
use fnv::FnvHashMap;
use tracing::debug;

/// A letter combination and its weighted count across the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringRecord {
    pub text: String,
    pub count: u64,
}

/// Accumulates letter combinations from word batches and keeps a live top-K.
///
/// Batches must be fed one at a time, in the order they were produced.
pub struct SubstringFrequencyEngine {
    params: EngineParams,
    // Keyed by the hash of the literal text.
    dictionary: FnvHashMap<u64, SubstringRecord>,
    // Word hash -> (substring hash, occurrences within the word).
    word_cache: FnvHashMap<u64, Vec<(u64, u64)>>,
    top: Vec<RankedSubstring>,
    top_min_count: u64,
    aggregates: RunningAggregates,
}

impl SubstringFrequencyEngine {
    pub fn new(params: EngineParams) -> Self {
        Self {
            params,
            dictionary: FnvHashMap::default(),
            word_cache: FnvHashMap::default(),
            top: Vec::new(),
            top_min_count: 0,
            aggregates: RunningAggregates::default(),
        }
    }

    pub fn aggregates(&self) -> RunningAggregates {
        self.aggregates
    }

    pub fn top_k(&self) -> &[RankedSubstring] {
        &self.top
    }

    pub fn distinct_substrings(&self) -> usize {
        self.dictionary.len()
    }

    pub fn cached_words(&self) -> usize {
        self.word_cache.len()
    }

    pub fn count_of(&self, text: &str) -> Option<u64> {
        self.dictionary.get(&fast_hash(text)).map(|r| r.count)
    }

    /// Folds one batch into the dictionary.
    ///
    /// Returns an interim update only when the top-K actually changed.
    pub fn process_batch(&mut self, batch: &WordBatch) -> Option<RankingUpdate> {
        let mut may_affect_top = false;
        for (word, &count) in batch {
            if word.is_empty() {
                continue;
            }
            may_affect_top |= self.add_word(word, count);
        }

        if !may_affect_top {
            return None;
        }
        self.rerank(UpdatePhase::Interim)
    }

    /// Forces a final ranking pass. Always reports the current totals; the
    /// ranking is empty when it did not change since the last update.
    pub fn finalize(&mut self) -> RankingUpdate {
        self.rerank(UpdatePhase::Final).unwrap_or(RankingUpdate {
            aggregates: self.aggregates,
            ranking: Vec::new(),
            phase: UpdatePhase::Final,
        })
    }

    /// Drops all accumulated state, ready for a new run.
    pub fn reset(&mut self) {
        debug!(
            "Resetting engine ({} substrings, {} cached words)",
            self.dictionary.len(),
            self.word_cache.len()
        );
        self.dictionary = FnvHashMap::default();
        self.word_cache = FnvHashMap::default();
        self.top = Vec::new();
        self.top_min_count = 0;
        self.aggregates = RunningAggregates::default();
    }

    /// Returns true if some count now exceeds the current top-K minimum.
    fn add_word(&mut self, word: &str, count: u64) -> bool {
        self.aggregates.words_processed += count;
        if word.chars().count() < self.params.min_substring_len {
            return false;
        }

        let threshold = self.top_min_count;
        let mut exceeded = false;
        let word_hash = fast_hash(word);

        if let Some(spans) = self.word_cache.get(&word_hash) {
            for &(hash, local) in spans {
                let weighted = local * count;
                if let Some(record) = self.dictionary.get_mut(&hash) {
                    record.count += weighted;
                    exceeded |= record.count > threshold;
                }
                self.aggregates.total_substrings += weighted;
            }
            return exceeded;
        }

        let found = word_substrings(word, self.params.min_substring_len);
        let mut spans = Vec::with_capacity(found.len());
        for sub in found {
            let weighted = sub.count * count;
            spans.push((sub.hash, sub.count));
            let record = self
                .dictionary
                .entry(sub.hash)
                .or_insert_with(|| SubstringRecord {
                    text: sub.text,
                    count: 0,
                });
            record.count += weighted;
            exceeded |= record.count > threshold;
            self.aggregates.total_substrings += weighted;
        }
        self.word_cache.insert(word_hash, spans);
        exceeded
    }

    fn rerank(&mut self, phase: UpdatePhase) -> Option<RankingUpdate> {
        let ranking = ranking::top_k(
            self.dictionary
                .values()
                .map(|r| (r.text.as_str(), r.count)),
            self.params.top_k,
        );

        if ranking == self.top {
            return None;
        }

        self.top_min_count = ranking::min_count(&ranking);
        self.top = ranking.clone();
        debug!(
            "Top-{} changed ({}), threshold now {}",
            self.params.top_k, phase, self.top_min_count
        );

        Some(RankingUpdate {
            aggregates: self.aggregates,
            ranking,
            phase,
        })
    }
}
