use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::model::DreamEntry;

/// Key holding the full entry collection as a JSON array.
pub const DREAMS_KEY: &str = "dreamDiary";
/// Key holding the two-letter UI language code.
pub const LANGUAGE_KEY: &str = "dreamDiary_language";

/// Serialize the collection in store order.
pub fn encode(entries: &[DreamEntry]) -> Result<String, CoreError> {
    Ok(serde_json::to_string(entries)?)
}

/// Parse a stored collection, keeping its order.
pub fn decode(raw: &str) -> Result<Vec<DreamEntry>, CoreError> {
    Ok(serde_json::from_str(raw)?)
}

/// SHA-256 (hex) of the encoded collection.
pub fn content_hash(entries: &[DreamEntry]) -> Result<String, CoreError> {
    let encoded = encode(entries)?;
    Ok(format!("{:x}", Sha256::digest(encoded.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DreamId, Mood};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn entries() -> Vec<DreamEntry> {
        vec![
            DreamEntry {
                id: DreamId::new(),
                title: Some("Second".into()),
                content: "Falling through clouds".into(),
                is_lucid: false,
                mood: Mood::Scared,
                tags: vec!["falling".into()],
                date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                created_at: Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap(),
            },
            DreamEntry {
                id: DreamId::from("1714550400000"),
                title: None,
                content: "Talking cat".into(),
                is_lucid: true,
                mood: Mood::Happy,
                tags: vec![],
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            },
        ]
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_order() {
        let original = entries();
        let raw = encode(&original).unwrap();
        let loaded = decode(&raw).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_empty_snapshot() {
        assert_eq!(encode(&[]).unwrap(), "[]");
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode("{not json"), Err(CoreError::Serde(_))));
    }

    #[test]
    fn test_content_hash_tracks_changes() {
        let mut list = entries();
        let before = content_hash(&list).unwrap();
        assert_eq!(before, content_hash(&list).unwrap());
        assert_eq!(before.len(), 64);

        list[0].mood = Mood::Happy;
        assert_ne!(before, content_hash(&list).unwrap());
    }
}
