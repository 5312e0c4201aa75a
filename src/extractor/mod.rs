pub mod source;
pub mod tokenizer;

use crate::cancel::CancellationToken;
use crate::config::ExtractorParams;
use crate::types::{ExtractionStatus, WordBatch};
use self::source::{BoundedLineReader, Chunk, TextSource};
use self::tokenizer::tokenize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Receives word batches as the extractor produces them.
pub trait BatchSink {
    fn on_batch(&mut self, batch: WordBatch);
}

impl<F: FnMut(WordBatch)> BatchSink for F {
    fn on_batch(&mut self, batch: WordBatch) {
        self(batch)
    }
}

/// Turns a text source into word batches, reassembling words cut by read limits.
pub struct ChunkedWordExtractor {
    params: ExtractorParams,
    words: WordBatch,
    remainder: String,
}

impl ChunkedWordExtractor {
    pub fn new(params: ExtractorParams) -> Self {
        Self {
            params,
            words: WordBatch::default(),
            remainder: String::new(),
        }
    }

    /// Word counts accumulated since the last emitted batch.
    pub fn pending_words(&self) -> &WordBatch {
        &self.words
    }

    /// Unresolved word head left by the last chunk.
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    /// Opens `path` and runs the extractor over it.
    pub fn run_path<P: AsRef<Path>, S: BatchSink>(
        &mut self,
        path: P,
        cancel: &CancellationToken,
        sink: &mut S,
    ) -> ExtractionStatus {
        match BoundedLineReader::open(path) {
            Ok(mut source) => self.run(&mut source, cancel, sink),
            Err(e) => {
                warn!("{}", e);
                ExtractionStatus::OpenError
            }
        }
    }

    /// Reads `source` to exhaustion or until `cancel` is observed.
    ///
    /// Nothing is sent to `sink` once cancellation has been seen.
    pub fn run<T: TextSource, S: BatchSink>(
        &mut self,
        source: &mut T,
        cancel: &CancellationToken,
        sink: &mut S,
    ) -> ExtractionStatus {
        self.words.clear();
        self.remainder.clear();

        let max_chars = self.params.max_chunk_chars;
        let lines_per_batch = self.params.lines_per_batch.max(1);
        let mut line_counter = 0usize;
        let mut batches = 0usize;

        info!(
            "Extracting words (chunk limit {}, batch every {} lines)",
            max_chars, lines_per_batch
        );

        loop {
            if cancel.is_cancelled() {
                info!("Extraction interrupted after {} batches", batches);
                return ExtractionStatus::Interrupted;
            }

            let chunk = match source.read_chunk(max_chars) {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    warn!("Read failed, stopping extraction: {}", e);
                    return ExtractionStatus::Interrupted;
                }
            };

            self.process_chunk(&chunk);
            line_counter += 1;

            if line_counter == lines_per_batch {
                line_counter = 0;
                if self.emit(sink) {
                    batches += 1;
                }
            }
        }

        if self.emit(sink) {
            batches += 1;
        }
        if !self.remainder.is_empty() {
            let mut last = WordBatch::default();
            last.insert(std::mem::take(&mut self.remainder), 1);
            sink.on_batch(last);
            batches += 1;
        }

        info!("Extraction finished: {} batches", batches);
        ExtractionStatus::Finished
    }

    fn emit<S: BatchSink>(&mut self, sink: &mut S) -> bool {
        if self.words.is_empty() {
            return false;
        }
        let batch = std::mem::take(&mut self.words);
        debug!("Emitting batch of {} distinct words", batch.len());
        sink.on_batch(batch);
        true
    }

    /// Counts the words of one chunk and settles the word cut at its boundaries.
    pub fn process_chunk(&mut self, chunk: &Chunk) {
        let at_limit = chunk.at_limit;
        let chunk = chunk.text.as_str();
        let tokens = tokenize(chunk);
        for token in &tokens {
            add_word(&mut self.words, &token.word);
        }

        let first = tokens.first();
        // Only meaningful with two or more words; a lone word is handled as `first`.
        let last = if tokens.len() > 1 { tokens.last() } else { None };
        let first_ends_chunk = first.is_some_and(|t| t.end == chunk.len());
        let mut remainder_filled = false;

        // Head: a chunk that opens with a word continues the pending remainder.
        match first {
            Some(first) if first.start == 0 && !self.remainder.is_empty() => {
                remove_word(&mut self.words, &first.word);
                let mut merged = std::mem::take(&mut self.remainder);
                merged.push_str(&first.word);

                let resolved = tokens.len() > 1 || !first_ends_chunk || !at_limit;
                if resolved {
                    add_word(&mut self.words, &merged);
                } else {
                    self.remainder = merged;
                    remainder_filled = true;
                }
            }
            _ => {
                if !self.remainder.is_empty() {
                    let pending = std::mem::take(&mut self.remainder);
                    add_word(&mut self.words, &pending);
                }
            }
        }

        if !at_limit {
            return;
        }

        // Tail: a word touching the end of a cut chunk continues in the next one.
        if let Some(last) = last {
            if last.end == chunk.len() {
                remove_word(&mut self.words, &last.word);
                self.remainder = last.word.clone();
            }
        } else if let Some(first) = first {
            if !remainder_filled && first_ends_chunk {
                remove_word(&mut self.words, &first.word);
                self.remainder = first.word.clone();
            }
        }
    }
}

fn add_word(words: &mut WordBatch, word: &str) {
    if word.is_empty() {
        return;
    }
    *words.entry(word.to_string()).or_default() += 1;
}

fn remove_word(words: &mut WordBatch, word: &str) {
    if let Some(count) = words.get_mut(word) {
        *count -= 1;
        if *count == 0 {
            words.remove(word);
        }
    }
}

/// Tokenizes `text` in one pass, with no chunk limits.
pub fn count_words(text: &str) -> WordBatch {
    let mut counts = WordBatch::default();
    for word in tokenizer::words(text) {
        add_word(&mut counts, &word);
    }
    counts
}
