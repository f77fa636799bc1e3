use chrono::{Duration, NaiveDate, TimeZone, Utc};
use dreamdiary_core::model::{DreamEntry, DreamId, Mood};

/// Build an entry with a fixed date; `n` keeps ids and timestamps distinct.
pub fn dream(n: u32, content: &str, mood: Mood, is_lucid: bool, tags: &[&str]) -> DreamEntry {
    DreamEntry {
        id: DreamId::from(format!("dream-{n}")),
        title: None,
        content: content.to_string(),
        is_lucid,
        mood,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::seconds(n.into()),
    }
}

pub fn with_moods(moods: &[Mood]) -> Vec<DreamEntry> {
    moods
        .iter()
        .enumerate()
        .map(|(i, mood)| dream(i as u32, "a dream", *mood, false, &[]))
        .collect()
}
