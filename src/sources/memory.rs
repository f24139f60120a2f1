use std::collections::HashSet;
use std::time::Duration;

use super::{CollectionSource, SourceError, slice_page};
use crate::model::{Page, Record, RecordId};

/// In-process source. Pages listed in `failing` report
/// [`SourceError::Unavailable`]; pages listed in `delays` sleep first so tests
/// can force responses to resolve out of order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<Record>,
    page_size: u32,
    failing: HashSet<u32>,
    delays: Vec<(u32, Duration)>,
}

impl MemorySource {
    pub fn new(records: Vec<Record>, page_size: u32) -> Self {
        Self {
            records,
            page_size,
            ..Self::default()
        }
    }

    /// Records `1..=count` with generated titles.
    pub fn numbered(count: RecordId, page_size: u32) -> Self {
        let records = (1..=count)
            .map(|id| Record::new(id, format!("Record {id}"), format!("Artist {}", id % 7)))
            .collect();
        Self::new(records, page_size)
    }

    pub fn with_failing_page(mut self, page_index: u32) -> Self {
        self.failing.insert(page_index);
        self
    }

    pub fn with_delay(mut self, page_index: u32, delay: Duration) -> Self {
        self.delays.push((page_index, delay));
        self
    }
}

impl CollectionSource for MemorySource {
    fn fetch_page(&self, page_index: u32) -> Result<Page, SourceError> {
        if let Some((_, delay)) = self.delays.iter().find(|(p, _)| *p == page_index) {
            std::thread::sleep(*delay);
        }
        if self.failing.contains(&page_index) {
            return Err(SourceError::Unavailable(page_index));
        }
        slice_page(&self.records, page_index, self.page_size)
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn describe(&self) -> String {
        format!("memory:{} records", self.records.len())
    }
}
