use fnv::{FnvHashMap, FnvHasher};
use std::hash::{Hash, Hasher};

/// FNV-1a hash used to key words and letter combinations.
///
/// Distinct strings are assumed never to collide.
pub fn fast_hash(text: &str) -> u64 {
    let mut hasher = FnvHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}

/// One distinct letter combination of a word and how often it occurs in that word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSubstring {
    pub hash: u64,
    pub text: String,
    pub count: u64,
}

/// Every contiguous span of `word` with at least `min_len` characters,
/// grouped by text.
pub fn word_substrings(word: &str, min_len: usize) -> Vec<LocalSubstring> {
    // Byte offset of every char, plus the end of the word.
    let bounds: Vec<usize> = word
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(word.len()))
        .collect();
    let char_len = bounds.len() - 1;
    let min_len = min_len.max(1);

    if char_len < min_len {
        return Vec::new();
    }

    let mut found: FnvHashMap<u64, LocalSubstring> = FnvHashMap::default();
    for start in 0..char_len {
        for len in min_len..=(char_len - start) {
            let text = &word[bounds[start]..bounds[start + len]];
            let hash = fast_hash(text);
            found
                .entry(hash)
                .and_modify(|s| s.count += 1)
                .or_insert_with(|| LocalSubstring {
                    hash,
                    text: text.to_string(),
                    count: 1,
                });
        }
    }

    found.into_values().collect()
}

/// Number of spans of length `min_len..=len` in a word of `len` characters.
pub fn span_count(len: usize, min_len: usize) -> u64 {
    if len < min_len {
        return 0;
    }
    let n = (len - min_len + 1) as u64;
    n * (n + 1) / 2
}
