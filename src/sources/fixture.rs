//! JSON fixture source: a file holding an array of records, paged locally.

use std::path::{Path, PathBuf};

use tracing::warn;

use super::{CollectionSource, SourceError, slice_page};
use crate::model::{Page, Record};

pub struct FixtureSource {
    path: PathBuf,
    records: Vec<Record>,
    page_size: u32,
}

impl FixtureSource {
    pub fn load(path: &Path, page_size: u32) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|source| SourceError::Fixture {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<Record> =
            serde_json::from_str(&content).map_err(|e| SourceError::Decode(e.to_string()))?;
        let source = Self {
            path: path.to_path_buf(),
            records,
            page_size,
        };
        if source.is_empty() {
            warn!(path = %path.display(), "fixture holds no records");
        }
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CollectionSource for FixtureSource {
    fn fetch_page(&self, page_index: u32) -> Result<Page, SourceError> {
        slice_page(&self.records, page_index, self.page_size)
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn describe(&self) -> String {
        format!("fixture:{}", self.path.display())
    }
}
