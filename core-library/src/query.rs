//! # Song Query Builder
//!
//! Translates a [`SongFilter`] plus a [`PageRequest`] into parameterized SQL
//! for the `songs` table, and segments lyrics into verses.
//!
//! ## Filters
//!
//! The recognised criteria form the closed set [`FilterKey`]. Each active key
//! contributes exactly one predicate fragment and one bound value. Fragments
//! name their placeholder by explicit index (`?1`, `?2`, ...), assigned in the
//! fixed order group, song, text, then `LIMIT` and `OFFSET`, so a fragment can
//! never drift out of step with its argument. User input only ever travels as
//! a bound value.
//!
//! | key     | predicate                                  |
//! |---------|--------------------------------------------|
//! | `group` | case-insensitive substring of `group_name` |
//! | `song`  | case-insensitive substring of `song_name`  |
//! | `text`  | FTS5 match of every term against lyrics    |
//!
//! Text that is not blank but has no letter or digit becomes the constant
//! predicate `0` and binds nothing.

use crate::models::Song;
use crate::repositories::{Page, PageRequest};
use std::collections::HashMap;
use std::fmt;

const SONG_COLUMNS: &str = "id, group_name, song_name, release_date, text, link";

/// Recognised filter criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Group,
    Song,
    Text,
}

impl FilterKey {
    /// All keys in placeholder order
    pub const ALL: [FilterKey; 3] = [FilterKey::Group, FilterKey::Song, FilterKey::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Group => "group",
            FilterKey::Song => "song",
            FilterKey::Text => "text",
        }
    }

    /// Returns `None` for unrecognised names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "group" => Some(FilterKey::Group),
            "song" => Some(FilterKey::Song),
            "text" => Some(FilterKey::Text),
            _ => None,
        }
    }

    fn predicate(&self, index: usize) -> String {
        match self {
            FilterKey::Group => format!("instr(normalized_group, ?{}) > 0", index),
            FilterKey::Song => format!("instr(normalized_song, ?{}) > 0", index),
            FilterKey::Text => format!(
                "id IN (SELECT song_id FROM songs_fts WHERE songs_fts MATCH ?{})",
                index
            ),
        }
    }

    /// How `raw` constrains the query, or `None` when it imposes no constraint.
    ///
    /// Text that is not blank but holds no searchable term matches nothing.
    fn constraint(&self, raw: &str) -> Option<Constraint> {
        if raw.trim().is_empty() {
            return None;
        }
        match self {
            FilterKey::Group | FilterKey::Song => {
                let normalized = Song::normalize(raw);
                (!normalized.is_empty()).then_some(Constraint::Bound(normalized))
            }
            FilterKey::Text => Some(
                fts_query(raw).map_or(Constraint::Unsatisfiable, Constraint::Bound),
            ),
        }
    }
}

/// What one active criterion contributes to the WHERE clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// The key's predicate over this bound value
    Bound(String),
    /// No row can match
    Unsatisfiable,
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter criteria for song queries
///
/// Blank values impose no constraint. Active criteria are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: Option<String>,
    pub song: Option<String>,
    pub text: Option<String>,
}

impl SongFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`; a blank value clears it.
    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        let value = value.into();
        let slot = match key {
            FilterKey::Group => &mut self.group,
            FilterKey::Song => &mut self.song,
            FilterKey::Text => &mut self.text,
        };
        *slot = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        self
    }

    /// Builds a filter from name/value pairs, ignoring unknown names.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        pairs.into_iter().fold(Self::new(), |filter, (name, value)| {
            match FilterKey::parse(name.as_ref()) {
                Some(key) => filter.with(key, value),
                None => filter,
            }
        })
    }

    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self::from_pairs(map.iter().map(|(k, v)| (k.as_str(), v.clone())))
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        match key {
            FilterKey::Group => self.group.as_deref(),
            FilterKey::Song => self.song.as_deref(),
            FilterKey::Text => self.text.as_deref(),
        }
    }

    /// Active criteria with their constraints, in placeholder order.
    pub fn active(&self) -> Vec<(FilterKey, Constraint)> {
        FilterKey::ALL
            .iter()
            .filter_map(|key| {
                self.get(*key)
                    .and_then(|raw| key.constraint(raw))
                    .map(|constraint| (*key, constraint))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }
}

/// A value bound to a numbered placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    I64(i64),
}

/// SQL for one filtered page plus the matching count query
///
/// `binds[n - 1]` is the value for placeholder `?n`. `count_sql` uses only the
/// first `count_binds` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQueryPlan {
    pub select_sql: String,
    pub count_sql: String,
    pub binds: Vec<BindValue>,
    pub count_binds: usize,
}

/// Builds the page and count queries for `filter`.
///
/// Results are ordered by release date descending, ties broken by ID.
pub fn build_song_query_plan(filter: &SongFilter, page: PageRequest) -> SongQueryPlan {
    let mut conditions = Vec::new();
    let mut binds = Vec::new();

    for (key, constraint) in filter.active() {
        match constraint {
            Constraint::Bound(value) => {
                binds.push(BindValue::Text(value));
                conditions.push(key.predicate(binds.len()));
            }
            Constraint::Unsatisfiable => conditions.push("0".to_string()),
        }
    }

    let mut where_sql = String::new();
    if !conditions.is_empty() {
        where_sql.push_str(" WHERE ");
        where_sql.push_str(&conditions.join(" AND "));
    }

    let count_binds = binds.len();
    let count_sql = format!("SELECT COUNT(*) FROM songs{}", where_sql);

    let limit_index = binds.len() + 1;
    let offset_index = binds.len() + 2;
    binds.push(BindValue::I64(i64::from(page.limit())));
    binds.push(BindValue::I64(i64::try_from(page.offset()).unwrap_or(i64::MAX)));

    let select_sql = format!(
        "SELECT {} FROM songs{} ORDER BY release_date DESC, id ASC LIMIT ?{} OFFSET ?{}",
        SONG_COLUMNS, where_sql, limit_index, offset_index
    );

    SongQueryPlan {
        select_sql,
        count_sql,
        binds,
        count_binds,
    }
}

/// Turns free text into an FTS5 query of quoted terms (implicit AND).
///
/// Double quotes are stripped from each term, so the input cannot introduce
/// FTS5 operators or column filters. Terms without any letter or digit are
/// dropped. Returns `None` when no term remains.
pub fn fts_query(raw: &str) -> Option<String> {
    let terms: Vec<String> = raw
        .split_whitespace()
        .map(|term| term.replace('"', ""))
        .filter(|term| term.chars().any(char::is_alphanumeric))
        .map(|term| format!("\"{}\"", term))
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}

/// Splits lyrics into verses on blank lines.
///
/// `\r\n` is treated as `\n`. Empty text has no verses.
pub fn split_verses(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    if normalized.is_empty() {
        return Vec::new();
    }
    normalized.split("\n\n").map(str::to_string).collect()
}

/// Returns the verses in `[offset, offset + page_size)` as a page.
pub fn paginate_verses(text: &str, request: PageRequest) -> Page<String> {
    let verses = split_verses(text);
    let total = verses.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let items = verses
        .into_iter()
        .skip(offset)
        .take(request.limit() as usize)
        .collect();

    Page::new(items, total, request)
}
