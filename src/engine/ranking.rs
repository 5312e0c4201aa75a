use crate::types::RankedSubstring;
use std::cmp::Ordering;

/// Count descending, then text ascending.
fn rank_order(a_text: &str, a_count: u64, b_text: &str, b_count: u64) -> Ordering {
    b_count.cmp(&a_count).then_with(|| a_text.cmp(b_text))
}

fn by_rank(a: &(&str, u64), b: &(&str, u64)) -> Ordering {
    rank_order(a.0, a.1, b.0, b.1)
}

/// The `k` best entries in rank order.
///
/// Texts are unique, so the order is total and partitioning before sorting
/// gives the same head as sorting the whole snapshot.
pub fn top_k<'a, I>(entries: I, k: usize) -> Vec<RankedSubstring>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut snapshot: Vec<(&str, u64)> = entries.into_iter().collect();
    if k == 0 || snapshot.is_empty() {
        return Vec::new();
    }

    if snapshot.len() > k {
        snapshot.select_nth_unstable_by(k - 1, by_rank);
        snapshot.truncate(k);
    }
    snapshot.sort_by(by_rank);

    snapshot
        .into_iter()
        .map(|(text, count)| RankedSubstring::new(text, count))
        .collect()
}

/// Smallest count in a ranking, 0 when empty.
pub fn min_count(ranking: &[RankedSubstring]) -> u64 {
    ranking.iter().map(|r| r.count).min().unwrap_or(0)
}
