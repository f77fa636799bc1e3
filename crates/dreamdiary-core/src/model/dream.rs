use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// A unique identifier for a dream entry.
/// Generated as UUID v4 hex (no dashes). Ids written by older clients
/// (millisecond timestamps) are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DreamId(pub String);

impl DreamId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().as_simple().to_string())
    }

    /// First 8 characters, for compact listings.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DreamId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DreamId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DreamId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How the dreamer felt about the dream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    #[default]
    Neutral,
    Sad,
    Excited,
    Scared,
    Confused,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Neutral,
        Mood::Sad,
        Mood::Excited,
        Mood::Scared,
        Mood::Confused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Scared => "scared",
            Mood::Confused => "confused",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("unknown mood '{s}'")))
    }
}

/// One recorded dream. Serialized with the camelCase field names of the
/// `dreamDiary` snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DreamEntry {
    pub id: DreamId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub is_lucid: bool,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl DreamEntry {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// User input for a new entry. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DreamDraft {
    pub title: Option<String>,
    pub content: String,
    pub is_lucid: bool,
    pub mood: Mood,
    pub tags: Vec<String>,
    pub date: Option<NaiveDate>,
}

impl DreamDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn lucid(mut self, is_lucid: bool) -> Self {
        self.is_lucid = is_lucid;
        self
    }

    pub fn mood(mut self, mood: Mood) -> Self {
        self.mood = mood;
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Reject drafts whose content is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.content.trim().is_empty() {
            return Err(CoreError::Validation("dream content must not be empty".into()));
        }
        Ok(())
    }

    /// Turn the draft into an entry. Callers must `validate` first.
    pub(crate) fn into_entry(self, id: DreamId, created_at: DateTime<Utc>) -> DreamEntry {
        DreamEntry {
            id,
            title: self.title,
            content: self.content,
            is_lucid: self.is_lucid,
            mood: self.mood,
            tags: self.tags,
            date: self.date.unwrap_or_else(|| created_at.date_naive()),
            created_at,
        }
    }
}

/// Partial update. Only `Some` fields are merged; `id` and `created_at`
/// are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DreamPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_lucid: Option<bool>,
    pub mood: Option<Mood>,
    pub tags: Option<Vec<String>>,
    pub date: Option<NaiveDate>,
}

impl DreamPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, entry: &mut DreamEntry) {
        if let Some(title) = &self.title {
            entry.title = Some(title.clone());
        }
        if let Some(content) = &self.content {
            entry.content = content.clone();
        }
        if let Some(is_lucid) = self.is_lucid {
            entry.is_lucid = is_lucid;
        }
        if let Some(mood) = self.mood {
            entry.mood = mood;
        }
        if let Some(tags) = &self.tags {
            entry.tags = tags.clone();
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
    }
}

/// Split comma-separated tag input: trim pieces, drop empties, and keep the
/// first occurrence of each tag.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
