mod common;

use common::{batch, extract, merge, params, VecSource};
use lexiscan::cancel::CancellationToken;
use lexiscan::extractor::source::{BoundedLineReader, Chunk, TextSource};
use lexiscan::extractor::{count_words, ChunkedWordExtractor};
use lexiscan::types::{ExtractionStatus, WordBatch};
use rstest::rstest;
use std::io::{self, Cursor, Write};
use tempfile::NamedTempFile;

/// Cancels its token right after handing out the `cancel_after`-th chunk.
struct CancellingSource {
    token: CancellationToken,
    reads: usize,
    cancel_after: usize,
}

impl TextSource for CancellingSource {
    fn read_chunk(&mut self, _max_chars: usize) -> io::Result<Option<Chunk>> {
        self.reads += 1;
        if self.reads == self.cancel_after {
            self.token.cancel();
        }
        Ok(Some(Chunk::new("alpha beta", false)))
    }
}

#[test]
fn test_word_split_across_chunks_is_rebuilt_once() {
    let mut source = VecSource::new(&["hel", "lo world"]);
    let (status, batches) = extract(&mut source, params(3, 100));

    assert_eq!(status, ExtractionStatus::Finished);
    assert_eq!(merge(&batches), batch(&[("hello", 1), ("world", 1)]));
}

#[test]
fn test_words_are_lowercased_and_split_on_punctuation() {
    let mut source = VecSource::new(&["Hello, HELLO! hello?", "it's--done"]);
    let (_, batches) = extract(&mut source, params(4096, 100));
    assert_eq!(
        merge(&batches),
        batch(&[("hello", 3), ("it", 1), ("s", 1), ("done", 1)])
    );
}

#[test]
fn test_batches_follow_line_count() {
    let lines = ["a b"; 5];
    let mut source = VecSource::new(&lines);
    let (_, batches) = extract(&mut source, params(100, 2));

    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0], batch(&[("a", 2), ("b", 2)]));
    assert_eq!(batches[1], batch(&[("a", 2), ("b", 2)]));
    assert_eq!(batches[2], batch(&[("a", 1), ("b", 1)]));
}

#[test]
fn test_pending_remainder_is_the_last_batch() {
    let mut source = VecSource::new(&["ab cd"]);
    let (status, batches) = extract(&mut source, params(5, 100));

    assert_eq!(status, ExtractionStatus::Finished);
    assert_eq!(batches, vec![batch(&[("ab", 1)]), batch(&[("cd", 1)])]);
}

#[test]
fn test_cancelled_before_start_emits_nothing() {
    let token = CancellationToken::new();
    token.cancel();

    let mut emitted = Vec::new();
    let mut extractor = ChunkedWordExtractor::new(params(10, 1));
    let status = extractor.run(
        &mut VecSource::new(&["one two three"]),
        &token,
        &mut |b: WordBatch| emitted.push(b),
    );

    assert_eq!(status, ExtractionStatus::Interrupted);
    assert!(emitted.is_empty());
}

#[test]
fn test_cancellation_is_observed_before_the_next_read() {
    let token = CancellationToken::new();
    let mut source = CancellingSource {
        token: token.clone(),
        reads: 0,
        cancel_after: 3,
    };

    let mut emitted = Vec::new();
    let mut extractor = ChunkedWordExtractor::new(params(4096, 1));
    let status = extractor.run(&mut source, &token, &mut |b: WordBatch| emitted.push(b));

    assert_eq!(status, ExtractionStatus::Interrupted);
    assert_eq!(source.reads, 3);
    assert_eq!(emitted.len(), 3);
}

#[test]
fn test_missing_file_reports_open_error() {
    let mut emitted = 0usize;
    let mut extractor = ChunkedWordExtractor::new(params(4096, 100));
    let status = extractor.run_path(
        "/definitely/not/here.txt",
        &CancellationToken::new(),
        &mut |_b: WordBatch| emitted += 1,
    );

    assert_eq!(status, ExtractionStatus::OpenError);
    assert_eq!(emitted, 0);
}

#[rstest]
#[case(1)] // inside "hello"
#[case(3)] // inside "hello"
#[case(5)] // right after "hello"
#[case(6)] // right after the space
#[case(9)] // inside "world"
#[case(11)] // right before the comma
#[case(12)] // right after the comma
#[case(18)] // end of text
fn test_two_chunk_split_matches_whole_text(#[case] split: usize) {
    let text = "hello world, again";
    let (head, tail) = text.split_at(split);
    let mut source = VecSource::new(&[head, tail]);
    let (_, batches) = extract(&mut source, params(split, 100));

    assert_eq!(merge(&batches), count_words(text), "split at {}", split);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(7)]
#[case(4096)]
fn test_file_source_matches_whole_text(#[case] max_chunk_chars: usize) {
    let text = "The wind was a torrent of darkness among the gusty trees.\n\
                The moon was a ghostly galleon, tossed upon cloudy seas;\n\
                \n\
                Supercalifragilisticexpialidocious!\n";
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", text).unwrap();

    let mut source = BoundedLineReader::open(file.path()).unwrap();
    let (status, batches) = extract(&mut source, params(max_chunk_chars, 3));

    assert_eq!(status, ExtractionStatus::Finished);
    assert_eq!(merge(&batches), count_words(text));
}

#[test]
fn test_line_exactly_at_limit_is_not_glued_to_next_line() {
    let text = "abcd\nefgh\n";
    let mut source = BoundedLineReader::new(Cursor::new(text.as_bytes().to_vec()));
    let (_, batches) = extract(&mut source, params(4, 100));
    assert_eq!(merge(&batches), batch(&[("abcd", 1), ("efgh", 1)]));
}

#[rstest]
#[case::lone_cr(b"a\rbcdefg\n".as_slice(), &[("a", 1), ("bcdefg", 1)])]
#[case::invalid_utf8(b"\x80bcdefg\n".as_slice(), &[("bcdefg", 1)])]
#[case::crlf_at_limit(b"abcd\r\nefgh\r\n".as_slice(), &[("abcd", 1), ("efgh", 1)])]
#[case::multibyte(b"\xc3\xa9t\xc3\xa9 caf\xc3\xa9s\n".as_slice(), &[("\u{e9}t\u{e9}", 1), ("caf\u{e9}s", 1)])]
fn test_cut_word_survives_odd_bytes(#[case] input: &[u8], #[case] expected: &[(&str, u64)]) {
    let mut source = BoundedLineReader::new(Cursor::new(input.to_vec()));
    let (_, batches) = extract(&mut source, params(4, 100));
    assert_eq!(merge(&batches), batch(expected));
}
