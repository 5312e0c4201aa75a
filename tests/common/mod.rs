#![allow(dead_code)]

use lexiscan::cancel::CancellationToken;
use lexiscan::config::ExtractorParams;
use lexiscan::extractor::source::{Chunk, TextSource};
use lexiscan::extractor::ChunkedWordExtractor;
use lexiscan::types::{ExtractionStatus, WordBatch};
use std::collections::VecDeque;
use std::io;

/// Hands out prepared chunks verbatim. A chunk as long as the requested
/// limit counts as cut, like a bounded read that stopped mid-line.
pub struct VecSource {
    chunks: VecDeque<String>,
}

impl VecSource {
    pub fn new(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TextSource for VecSource {
    fn read_chunk(&mut self, max_chars: usize) -> io::Result<Option<Chunk>> {
        Ok(self
            .chunks
            .pop_front()
            .map(|text| Chunk::measured(text, max_chars)))
    }
}

/// Never runs dry; every read returns the same line.
pub struct EndlessSource;

impl TextSource for EndlessSource {
    fn read_chunk(&mut self, _max_chars: usize) -> io::Result<Option<Chunk>> {
        Ok(Some(Chunk::new(
            "the quick brown fox jumps over the lazy dog",
            false,
        )))
    }
}

pub fn params(max_chunk_chars: usize, lines_per_batch: usize) -> ExtractorParams {
    ExtractorParams {
        max_chunk_chars,
        lines_per_batch,
    }
}

/// Runs the extractor and returns its status plus every emitted batch.
pub fn extract<T: TextSource>(
    source: &mut T,
    params: ExtractorParams,
) -> (ExtractionStatus, Vec<WordBatch>) {
    let mut batches = Vec::new();
    let mut extractor = ChunkedWordExtractor::new(params);
    let status = extractor.run(source, &CancellationToken::new(), &mut |b: WordBatch| {
        batches.push(b)
    });
    (status, batches)
}

pub fn merge(batches: &[WordBatch]) -> WordBatch {
    let mut total = WordBatch::default();
    for batch in batches {
        for (word, count) in batch {
            *total.entry(word.clone()).or_default() += count;
        }
    }
    total
}

pub fn batch(pairs: &[(&str, u64)]) -> WordBatch {
    pairs.iter().map(|&(w, c)| (w.to_string(), c)).collect()
}
