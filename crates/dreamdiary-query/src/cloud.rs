use serde::Serialize;

use dreamdiary_core::model::DreamEntry;

use crate::stats::{top_tags, TAG_CLOUD_LIMIT};

/// Display weight of a tag in the cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudTier {
    Smallest,
    Small,
    Medium,
    Large,
    Largest,
    /// Every tag has the same frequency.
    Uniform,
}

impl CloudTier {
    /// Bucket `frequency` by its position between `min` and `max`.
    pub fn for_frequency(frequency: usize, min: usize, max: usize) -> Self {
        if max == min {
            return CloudTier::Uniform;
        }
        let normalized = (frequency as f64 - min as f64) / (max as f64 - min as f64);
        if normalized > 0.8 {
            CloudTier::Largest
        } else if normalized > 0.6 {
            CloudTier::Large
        } else if normalized > 0.4 {
            CloudTier::Medium
        } else if normalized > 0.2 {
            CloudTier::Small
        } else {
            CloudTier::Smallest
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloudTag {
    pub tag: String,
    pub count: usize,
    pub tier: CloudTier,
}

/// The most used tags with their display tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCloud {
    pub tags: Vec<CloudTag>,
    pub min_frequency: usize,
    pub max_frequency: usize,
}

impl TagCloud {
    pub fn build(entries: &[DreamEntry]) -> Self {
        let ranked = top_tags(entries, TAG_CLOUD_LIMIT);
        let max_frequency = ranked.iter().map(|t| t.count).max().unwrap_or(0);
        let min_frequency = ranked.iter().map(|t| t.count).min().unwrap_or(0);

        let tags = ranked
            .into_iter()
            .map(|t| CloudTag {
                tier: CloudTier::for_frequency(t.count, min_frequency, max_frequency),
                tag: t.tag,
                count: t.count,
            })
            .collect();

        Self {
            tags,
            min_frequency,
            max_frequency,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::dream;
    use dreamdiary_core::model::Mood;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(CloudTier::for_frequency(10, 0, 10), CloudTier::Largest);
        assert_eq!(CloudTier::for_frequency(8, 0, 10), CloudTier::Large);
        assert_eq!(CloudTier::for_frequency(7, 0, 10), CloudTier::Large);
        assert_eq!(CloudTier::for_frequency(5, 0, 10), CloudTier::Medium);
        assert_eq!(CloudTier::for_frequency(3, 0, 10), CloudTier::Small);
        assert_eq!(CloudTier::for_frequency(2, 0, 10), CloudTier::Smallest);
        assert_eq!(CloudTier::for_frequency(0, 0, 10), CloudTier::Smallest);
    }

    #[test]
    fn test_uniform_when_all_equal() {
        let entries = vec![
            dream(1, "x", Mood::Happy, false, &["a", "b"]),
            dream(2, "x", Mood::Happy, false, &["c"]),
        ];
        let cloud = TagCloud::build(&entries);
        assert_eq!(cloud.tags.len(), 3);
        assert!(cloud.tags.iter().all(|t| t.tier == CloudTier::Uniform));
        assert_eq!((cloud.min_frequency, cloud.max_frequency), (1, 1));
    }

    #[test]
    fn test_cloud_ranks_and_weights() {
        let entries = vec![
            dream(1, "x", Mood::Happy, false, &["rare"]),
            dream(2, "x", Mood::Happy, false, &["common", "mid"]),
            dream(3, "x", Mood::Happy, false, &["common", "mid"]),
            dream(4, "x", Mood::Happy, false, &["common"]),
        ];
        let cloud = TagCloud::build(&entries);
        let view: Vec<(&str, usize, CloudTier)> = cloud
            .tags
            .iter()
            .map(|t| (t.tag.as_str(), t.count, t.tier))
            .collect();
        assert_eq!(
            view,
            vec![
                ("common", 3, CloudTier::Largest),
                ("mid", 2, CloudTier::Medium),
                ("rare", 1, CloudTier::Smallest),
            ]
        );
    }

    #[test]
    fn test_cloud_caps_at_twenty_tags() {
        let names: Vec<String> = (0..30).map(|i| format!("tag{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let entries = vec![dream(1, "x", Mood::Happy, false, &refs)];
        assert_eq!(TagCloud::build(&entries).tags.len(), TAG_CLOUD_LIMIT);
    }

    #[test]
    fn test_empty_cloud() {
        let cloud = TagCloud::build(&[]);
        assert!(cloud.is_empty());
        assert_eq!(cloud.max_frequency, 0);
    }
}
