//! Domain models for the song catalog
//!
//! This module contains the song model with validation and database mapping.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog song: metadata plus full lyrics text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Song {
    /// Unique, stable identifier
    pub id: String,
    /// Performing group (non-blank)
    pub group_name: String,
    /// Song title (non-blank)
    pub song_name: String,
    #[serde(with = "release_date")]
    pub release_date: NaiveDate,
    /// Lyrics; verses are separated by a blank line
    #[serde(default)]
    pub text: String,
    /// External link
    #[serde(default)]
    pub link: String,
}

impl Song {
    /// Create a new song with a freshly generated ID
    pub fn new(
        group_name: impl Into<String>,
        song_name: impl Into<String>,
        release_date: NaiveDate,
        text: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            id: Self::generate_id(),
            group_name: group_name.into(),
            song_name: song_name.into(),
            release_date,
            text: text.into(),
            link: link.into(),
        }
    }

    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Validate song data
    pub fn validate(&self) -> Result<(), String> {
        if self.group_name.trim().is_empty() {
            return Err("Group name cannot be empty".to_string());
        }

        if self.song_name.trim().is_empty() {
            return Err("Song name cannot be empty".to_string());
        }

        Ok(())
    }

    /// Normalize a string for substring matching (lowercase, trimmed)
    pub fn normalize(s: &str) -> String {
        s.trim().to_lowercase()
    }
}

/// Parses a release date written either as `YYYY-MM-DD` or `DD.MM.YYYY`.
pub fn parse_release_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d.%m.%Y"))
        .map_err(|_| format!("release date '{}' is not YYYY-MM-DD or DD.MM.YYYY", raw))
}

/// Serde adapter: writes ISO dates, reads both accepted formats.
pub mod release_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_release_date(&raw).map_err(serde::de::Error::custom)
    }
}
