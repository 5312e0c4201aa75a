use crate::error::{LexiscanError, LsResult};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// One bounded piece of a line, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    /// The read stopped at the limit and the line goes on in the next chunk.
    pub at_limit: bool,
}

impl Chunk {
    pub fn new(text: impl Into<String>, at_limit: bool) -> Self {
        Self {
            text: text.into(),
            at_limit,
        }
    }

    /// A chunk counted as cut whenever it fills the whole limit.
    pub fn measured(text: impl Into<String>, max_chars: usize) -> Self {
        let text = text.into();
        let at_limit = text.chars().count() == max_chars;
        Self { text, at_limit }
    }
}

/// Sequential, bounded line reads until exhaustion.
pub trait TextSource {
    /// Returns the next piece of the current line, at most `max_chars` long.
    /// `Ok(None)` means the source is exhausted.
    fn read_chunk(&mut self, max_chars: usize) -> io::Result<Option<Chunk>>;
}

/// Reads lines from any `BufRead`, never buffering more than one chunk.
///
/// A line longer than the limit is handed out over several calls. `\n` and
/// `\r\n` end a line; a lone `\r` is an ordinary character.
pub struct BoundedLineReader<R> {
    inner: R,
    // A lone '\r' already taken from `inner` that still belongs to the text.
    carried_cr: bool,
}

impl<R: BufRead> BoundedLineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            carried_cr: false,
        }
    }

    /// Consumes a line terminator at the read position, if there is one.
    fn eat_terminator(&mut self) -> io::Result<bool> {
        let (first, second) = {
            let buf = self.inner.fill_buf()?;
            (buf.first().copied(), buf.get(1).copied())
        };

        match (first, second) {
            (Some(b'\n'), _) => {
                self.inner.consume(1);
                Ok(true)
            }
            (Some(b'\r'), Some(b'\n')) => {
                self.inner.consume(2);
                Ok(true)
            }
            (Some(b'\r'), None) => {
                // The pair may straddle the buffer edge.
                self.inner.consume(1);
                if self.inner.fill_buf()?.first() == Some(&b'\n') {
                    self.inner.consume(1);
                    Ok(true)
                } else {
                    self.carried_cr = true;
                    Ok(false)
                }
            }
            _ => Ok(false),
        }
    }
}

impl BoundedLineReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> LsResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LexiscanError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

fn is_char_start(byte: u8) -> bool {
    byte & 0xC0 != 0x80
}

impl<R: BufRead> TextSource for BoundedLineReader<R> {
    fn read_chunk(&mut self, max_chars: usize) -> io::Result<Option<Chunk>> {
        let max_chars = max_chars.max(1);
        let mut bytes = Vec::new();
        let mut chars = 0usize;
        let mut at_limit = false;
        let mut line_ended = false;

        loop {
            if !self.carried_cr && self.eat_terminator()? {
                line_ended = true;
                break;
            }

            let carried = std::mem::take(&mut self.carried_cr);
            let byte = if carried {
                b'\r'
            } else {
                match self.inner.fill_buf()?.first() {
                    Some(&b) => b,
                    None => break,
                }
            };

            // Continuation bytes stay with their char, so a cut never splits one.
            let starts_char = is_char_start(byte);
            if starts_char && chars == max_chars {
                self.carried_cr = carried;
                at_limit = true;
                break;
            }

            if !carried {
                self.inner.consume(1);
            }
            if starts_char {
                chars += 1;
            }
            bytes.push(byte);
        }

        if bytes.is_empty() && !line_ended {
            return Ok(None);
        }

        Ok(Some(Chunk {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            at_limit,
        }))
    }
}
