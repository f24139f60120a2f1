//! Normalized record and page structs.

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identity of a record in the remote collection.
pub type RecordId = u64;

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// One row of the remote collection.
///
/// Missing, null, or blank display fields are normalized while
/// deserializing, so nothing past the source boundary sees an absent title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    #[serde(default = "default_title", deserialize_with = "title_or_default")]
    pub title: String,
    #[serde(
        default = "default_artist",
        deserialize_with = "artist_or_default"
    )]
    pub artist_display: String,
}

impl Record {
    pub fn new(id: RecordId, title: impl Into<String>, artist_display: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist_display: artist_display.into(),
        }
    }
}

fn default_title() -> String {
    UNTITLED.to_string()
}

fn default_artist() -> String {
    UNKNOWN_ARTIST.to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn title_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(non_blank(value).unwrap_or_else(default_title))
}

fn artist_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(non_blank(value).unwrap_or_else(default_artist))
}

/// One bounded page of the collection, as delivered by a source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number this page was fetched for.
    pub page_index: u32,
    pub records: Vec<Record>,
    /// Server-side estimate of the whole collection size.
    pub total_estimate: u64,
}

impl Page {
    /// Record ids in display order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of pages the estimate implies for `page_size`, at least 1.
    pub fn page_count(&self, page_size: u32) -> u32 {
        let size = u64::from(page_size.max(1));
        let pages = self.total_estimate.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}
