use serde::Serialize;

use dreamdiary_core::model::{DreamEntry, Mood};

use crate::catalog::{distinct_tags, TagCount};

/// Length of the "most used tags" ranking.
pub const TOP_TAGS_LIMIT: usize = 10;
/// Number of tags shown in the tag cloud.
pub const TAG_CLOUD_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodShare {
    pub mood: Mood,
    pub count: usize,
    pub percentage: u32,
}

/// A ranked tag. `percentage` is its share of all tag usages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRank {
    pub tag: String,
    pub count: usize,
    pub percentage: u32,
}

/// Summary of the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DreamStats {
    pub total_count: usize,
    pub lucid_count: usize,
    pub lucid_percentage: u32,
    pub normal_count: usize,
    pub normal_percentage: u32,
    /// Moods present, in order of first appearance.
    pub mood_distribution: Vec<MoodShare>,
    pub most_common_mood: Option<Mood>,
    /// Tags present, in order of first appearance.
    pub tag_frequency: Vec<TagCount>,
    pub top_tags: Vec<TagRank>,
    pub unique_tag_count: usize,
    pub average_dreams_per_week: usize,
}

impl DreamStats {
    pub fn compute(entries: &[DreamEntry]) -> Self {
        let total_count = entries.len();
        let lucid_count = entries.iter().filter(|e| e.is_lucid).count();
        let lucid_percentage = percentage(lucid_count, total_count);
        let normal_percentage = if total_count == 0 {
            0
        } else {
            100 - lucid_percentage
        };

        let mood_distribution = mood_counts(entries)
            .into_iter()
            .map(|(mood, count)| MoodShare {
                mood,
                count,
                percentage: percentage(count, total_count),
            })
            .collect();

        let tag_frequency = tag_frequency(entries);
        let tag_usages: usize = tag_frequency.iter().map(|t| t.count).sum();
        let top_tags = rank_by_count(tag_frequency.clone(), TOP_TAGS_LIMIT)
            .into_iter()
            .map(|t| TagRank {
                percentage: percentage(t.count, tag_usages),
                tag: t.tag,
                count: t.count,
            })
            .collect();

        Self {
            total_count,
            lucid_count,
            lucid_percentage,
            normal_count: total_count - lucid_count,
            normal_percentage,
            mood_distribution,
            most_common_mood: most_common_mood(entries),
            unique_tag_count: tag_frequency.len(),
            tag_frequency,
            top_tags,
            average_dreams_per_week: average_dreams_per_week(total_count),
        }
    }

    /// Mood distribution ordered by count, highest first. Ties keep
    /// first-appearance order.
    pub fn moods_by_count(&self) -> Vec<MoodShare> {
        let mut moods = self.mood_distribution.clone();
        moods.sort_by(|a, b| b.count.cmp(&a.count));
        moods
    }
}

/// `round(part / whole * 100)`, or 0 for an empty whole.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Count of each mood present, in order of first appearance.
pub fn mood_counts(entries: &[DreamEntry]) -> Vec<(Mood, usize)> {
    let mut counts: Vec<(Mood, usize)> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|(mood, _)| *mood == entry.mood) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.mood, 1)),
        }
    }
    counts
}

/// The mood with the highest count. On a tie, the mood that appeared first
/// in the collection wins.
pub fn most_common_mood(entries: &[DreamEntry]) -> Option<Mood> {
    mood_counts(entries)
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .map(|(mood, _)| mood)
}

/// Number of dreams using each tag, in order of first appearance.
pub fn tag_frequency(entries: &[DreamEntry]) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    for entry in entries {
        for tag in distinct_tags(entry) {
            match counts.iter_mut().find(|t| t.tag == tag) {
                Some(t) => t.count += 1,
                None => counts.push(TagCount {
                    tag: tag.to_string(),
                    count: 1,
                }),
            }
        }
    }
    counts
}

/// The `limit` most used tags, highest count first; ties keep
/// first-appearance order.
pub fn top_tags(entries: &[DreamEntry], limit: usize) -> Vec<TagCount> {
    rank_by_count(tag_frequency(entries), limit)
}

fn rank_by_count(mut tags: Vec<TagCount>, limit: usize) -> Vec<TagCount> {
    tags.sort_by(|a, b| b.count.cmp(&a.count));
    tags.truncate(limit);
    tags
}

/// Rough weekly rate: the dream count spread over `ceil(n / 7)` weeks.
/// Not based on actual dates.
pub fn average_dreams_per_week(total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let weeks = total.div_ceil(7).max(1);
    (total as f64 / weeks as f64).round() as usize
}
