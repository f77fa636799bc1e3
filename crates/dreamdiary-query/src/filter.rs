use serde::{Deserialize, Serialize};

use dreamdiary_core::model::DreamEntry;

use crate::error::QueryError;

/// Which kind of dream to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Lucid,
    Normal,
}

impl TypeFilter {
    pub fn matches(&self, entry: &DreamEntry) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Lucid => entry.is_lucid,
            TypeFilter::Normal => !entry.is_lucid,
        }
    }
}

impl std::str::FromStr for TypeFilter {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "lucid" => Ok(TypeFilter::Lucid),
            "normal" => Ok(TypeFilter::Normal),
            other => Err(QueryError::InvalidFilter(format!(
                "unknown dream type '{other}' (expected all, lucid or normal)"
            ))),
        }
    }
}

/// Transient list-view criteria. All three must hold for an entry to match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DreamFilter {
    /// Case-insensitive substring over content, title and tags. Empty matches all.
    pub search: String,
    pub kind: TypeFilter,
    /// Every selected tag must be present on the entry. Empty matches all.
    pub tags: Vec<String>,
}

impl DreamFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn kind(mut self, kind: TypeFilter) -> Self {
        self.kind = kind;
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

    /// Select `tag` if it is not selected, otherwise deselect it.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    pub fn clear_tags(&mut self) {
        self.tags.clear();
    }

    /// True when any criterion narrows the result.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.kind != TypeFilter::All || !self.tags.is_empty()
    }

    pub fn matches(&self, entry: &DreamEntry) -> bool {
        self.matches_with(entry, &self.search.to_lowercase())
    }

    /// Matching entries in collection order.
    pub fn apply<'a>(&self, entries: &'a [DreamEntry]) -> Vec<&'a DreamEntry> {
        let needle = self.search.to_lowercase();
        let result: Vec<&DreamEntry> = entries
            .iter()
            .filter(|e| self.matches_with(e, &needle))
            .collect();
        tracing::debug!("Filter kept {} of {} dreams", result.len(), entries.len());
        result
    }

    fn matches_with(&self, entry: &DreamEntry, needle: &str) -> bool {
        matches_search(entry, needle)
            && self.kind.matches(entry)
            && self.tags.iter().all(|t| entry.has_tag(t))
    }
}

fn matches_search(entry: &DreamEntry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(needle);
    hit(entry.content.as_str())
        || entry.title.as_deref().is_some_and(hit)
        || entry.tags.iter().any(|t| hit(t.as_str()))
}

/// Filter `entries` by search text, dream type and selected tags.
pub fn filter_dreams<'a>(
    entries: &'a [DreamEntry],
    search: &str,
    kind: TypeFilter,
    selected_tags: &[String],
) -> Vec<&'a DreamEntry> {
    DreamFilter {
        search: search.to_string(),
        kind,
        tags: selected_tags.to_vec(),
    }
    .apply(entries)
}
