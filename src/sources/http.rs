//! Paged JSON API over HTTP.
//!
//! Requests `GET {base_url}/artworks?page={n}&limit={page_size}&fields=id,title,artist_display`
//! and expects `{"data": [...], "pagination": {"total": n}}`.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::config::SourceConfig;
use super::{CollectionSource, SourceError};
use crate::model::{Page, Record};

const FIELDS: &str = "id,title,artist_display";

#[derive(Debug, Deserialize)]
struct PageBody {
    #[serde(default)]
    data: Vec<Record>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(default)]
    total: u64,
}

pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
    page_size: u32,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(concat!("gsel/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Transport(format!("building http client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    fn page_url(&self) -> String {
        format!("{}/artworks", self.base_url)
    }
}

impl CollectionSource for HttpSource {
    fn fetch_page(&self, page_index: u32) -> Result<Page, SourceError> {
        if page_index == 0 {
            return Err(SourceError::InvalidPage(page_index));
        }

        let url = self.page_url();
        debug!(%url, page_index, limit = self.page_size, "fetching page");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("page", page_index.to_string()),
                ("limit", self.page_size.to_string()),
                ("fields", FIELDS.to_string()),
            ])
            .header("Accept", "application/json")
            .send()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let body: PageBody = response
            .json()
            .map_err(|e| SourceError::Decode(e.to_string()))?;
        Ok(into_page(page_index, body))
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

fn into_page(page_index: u32, body: PageBody) -> Page {
    let total_estimate = body
        .pagination
        .map_or(body.data.len() as u64, |p| p.total);
    Page {
        page_index,
        records: body.data,
        total_estimate,
    }
}
