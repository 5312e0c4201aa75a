/// Upper bound on the characters returned by a single line read.
/// A read of exactly this length may have cut its trailing word.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 4096;

/// Number of processed lines between two emitted word batches.
pub const DEFAULT_LINES_PER_BATCH: usize = 100;

/// Shortest letter combination that is counted.
pub const DEFAULT_MIN_SUBSTRING_LEN: usize = 4;

/// Size of the published ranking.
pub const DEFAULT_TOP_K: usize = 10;
