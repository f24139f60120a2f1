//! Remote collection sources.
//!
//! A source hands out one bounded page of records at a time, in a stable
//! order, together with an estimate of the collection size. Fetches block the
//! calling thread; the event loop runs them on worker threads.
//!
//! # Architecture
//!
//! - **config**: where pages come from (TOML + env overrides)
//! - **http**: paged JSON API over HTTP
//! - **fixture**: a local JSON array served page by page
//! - **memory**: in-process records, with injectable failures for tests

pub mod config;
pub mod fixture;
pub mod http;
pub mod memory;

use std::sync::Arc;

use thiserror::Error;

use crate::model::{Page, Record};

pub use config::{ConfigError, SourceConfig};
pub use fixture::FixtureSource;
pub use http::HttpSource;
pub use memory::MemorySource;

/// Why a page could not be delivered. Every variant surfaces to the user as
/// "page unavailable"; none of them touch the selection.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("page numbers start at 1, got {0}")]
    InvalidPage(u32),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("could not decode page: {0}")]
    Decode(String),

    #[error("failed to read fixture `{path}`: {source}")]
    Fixture {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("page {0} unavailable")]
    Unavailable(u32),
}

/// A collection that can be read one page at a time.
pub trait CollectionSource: Send + Sync {
    /// Fetch the 1-based page `page_index`.
    fn fetch_page(&self, page_index: u32) -> Result<Page, SourceError>;

    /// Records per page this source serves.
    fn page_size(&self) -> u32;

    /// Short label for logs and status lines.
    fn describe(&self) -> String;
}

/// Build the source selected by `config`.
pub fn open_source(config: &SourceConfig) -> Result<Arc<dyn CollectionSource>, SourceError> {
    if let Some(path) = &config.fixture {
        let source = FixtureSource::load(path, config.page_size)?;
        return Ok(Arc::new(source));
    }
    Ok(Arc::new(HttpSource::new(config)?))
}

/// Cut page `page_index` out of an in-memory record list.
pub(crate) fn slice_page(
    records: &[Record],
    page_index: u32,
    page_size: u32,
) -> Result<Page, SourceError> {
    if page_index == 0 {
        return Err(SourceError::InvalidPage(page_index));
    }
    let size = page_size.max(1) as usize;
    let start = (page_index as usize - 1).saturating_mul(size);
    let page_records = records.iter().skip(start).take(size).cloned().collect();
    Ok(Page {
        page_index,
        records: page_records,
        total_estimate: records.len() as u64,
    })
}
