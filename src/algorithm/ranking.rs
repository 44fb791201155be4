//! Top-k ranking of grouped counts

use rustc_hash::FxHashMap;
use serde::Serialize;

/// A named count in a ranked chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub count: u64,
}

impl RankedEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Group `(key, count)` pairs and keep the `limit` largest totals
///
/// Keys are summed in first-seen order and ranked by a stable descending
/// sort. The kept entries are then stably re-sorted ascending by count, so
/// the top entry comes last, ready for a horizontal bar chart. Tied keys
/// keep first-seen order throughout.
#[must_use]
pub fn rank_top<K, I>(pairs: I, limit: usize) -> Vec<RankedEntry>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, u64)>,
{
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut totals: Vec<RankedEntry> = Vec::new();

    for (key, count) in pairs {
        let key = key.as_ref();
        if let Some(&i) = index.get(key) {
            totals[i].count = totals[i].count.saturating_add(count);
        } else {
            index.insert(key.to_string(), totals.len());
            totals.push(RankedEntry::new(key, count));
        }
    }

    totals.sort_by(|a, b| b.count.cmp(&a.count));
    totals.truncate(limit);
    totals.sort_by_key(|e| e.count);
    totals
}
