use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::types::LanguageHistogram;

/// Label for the bucket holding every language outside the top N
pub const OTHER_LANGUAGE: &str = "Other";

/// Count commits per calendar month, keyed `YYYY-MM` in ascending order.
///
/// Input order does not matter.
pub fn monthly_commit_counts(dates: &[DateTime<Utc>]) -> BTreeMap<String, usize> {
    let mut monthly = BTreeMap::new();
    for date in dates {
        *monthly.entry(date.format("%Y-%m").to_string()).or_insert(0) += 1;
    }
    monthly
}

/// Sort languages by size descending and keep the first `limit`, folding the
/// rest into a trailing [`OTHER_LANGUAGE`] entry.
pub fn top_languages(languages: &LanguageHistogram, limit: usize) -> Vec<(String, u64)> {
    let mut items: Vec<(String, u64)> = languages
        .iter()
        .map(|(name, size)| (name.clone(), *size))
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));

    if items.len() <= limit {
        return items;
    }

    let other: u64 = items[limit..].iter().map(|(_, size)| size).sum();
    items.truncate(limit);
    items.push((OTHER_LANGUAGE.to_string(), other));
    items
}
