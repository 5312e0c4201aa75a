use regex::Regex;
use std::sync::OnceLock;

/// Runs of Unicode whitespace, punctuation and symbols separate words.
const DELIMITER_PATTERN: &str = r"[\s\p{P}\p{S}]+";

fn delimiters() -> &'static Regex {
    static DELIMITERS: OnceLock<Regex> = OnceLock::new();
    DELIMITERS.get_or_init(|| Regex::new(DELIMITER_PATTERN).expect("delimiter pattern is valid"))
}

/// A word found in a chunk. `start`/`end` are byte offsets into the chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub start: usize,
    pub end: usize,
}

/// Splits a chunk into lowercase words, keeping where each one sat.
pub fn tokenize(chunk: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    let mut push = |start: usize, end: usize| {
        if start < end {
            tokens.push(Token {
                word: chunk[start..end].to_lowercase(),
                start,
                end,
            });
        }
    };

    for m in delimiters().find_iter(chunk) {
        push(cursor, m.start());
        cursor = m.end();
    }
    push(cursor, chunk.len());

    tokens
}

/// Lowercase words of `text`, in order.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    delimiters()
        .split(text)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_point_into_the_chunk() {
        let tokens = tokenize("  Hello, WORLD!");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].word, "hello");
        assert_eq!((tokens[0].start, tokens[0].end), (2, 7));
        assert_eq!(tokens[1].word, "world");
        assert_eq!(tokens[1].end, 14);
    }

    #[test]
    fn unicode_punctuation_and_spaces_split() {
        let found: Vec<String> = words("«Straße»\u{00A0}naïve—café").collect();
        assert_eq!(found, vec!["straße", "naïve", "café"]);
    }

    #[test]
    fn delimiter_only_chunk_has_no_words() {
        assert!(tokenize(" ,.;  ").is_empty());
        assert!(tokenize("").is_empty());
    }
}
