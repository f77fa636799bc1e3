use std::collections::BTreeMap;

use serde::Serialize;

use dreamdiary_core::model::DreamEntry;

/// A tag and the number of dreams carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Tags of one entry with repeats removed, in entry order.
pub(crate) fn distinct_tags(entry: &DreamEntry) -> impl Iterator<Item = &str> {
    entry
        .tags
        .iter()
        .enumerate()
        .filter(|(i, tag)| !entry.tags[..*i].contains(*tag))
        .map(|(_, tag)| tag.as_str())
}

/// Every distinct tag in the collection, sorted lexicographically.
pub fn tag_catalog(entries: &[DreamEntry]) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        for tag in distinct_tags(entry) {
            *counts.entry(tag).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect()
}
