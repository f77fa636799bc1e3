use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::storage::snapshot::LANGUAGE_KEY;
use crate::storage::KeyValueStore;

/// UI language. Stored as a bare two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            other => Err(CoreError::Config(format!(
                "unsupported language '{other}' (expected 'es' or 'en')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiaryConfig {
    pub language: Language,
}

impl DiaryConfig {
    /// Read settings from the diary's key-value store. Missing or unreadable
    /// values fall back to defaults.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, CoreError> {
        let language = match store.get(LANGUAGE_KEY)? {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored language: {e}");
                Language::default()
            }),
            None => Language::default(),
        };
        Ok(Self { language })
    }

    /// Write settings back to the diary's key-value store.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), CoreError> {
        store.set(LANGUAGE_KEY, self.language.code())
    }
}
