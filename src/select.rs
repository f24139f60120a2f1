//! Non-interactive "select the first N records" run.
//!
//! Sets the target, then walks pages from the first one through the event loop
//! until auto-fill reports the target met, the collection runs out, or the
//! page budget is spent.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::app::{PickerApp, PickerMsg};
use crate::model::RecordId;
use crate::runtime::EventLoop;

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SelectReport {
    pub target: usize,
    pub selected: Vec<RecordId>,
    pub pages_fetched: u32,
    pub satisfied: bool,
    /// Set when a page could not be fetched; the selection up to that page is kept.
    pub error: Option<String>,
}

pub fn select_first(
    event_loop: &EventLoop,
    app: &mut PickerApp,
    target: usize,
    max_pages: Option<u32>,
) -> SelectReport {
    event_loop.dispatch(app, PickerMsg::TargetSet(target));

    let mut pages_fetched = 0;
    let mut error = None;
    let mut next_page = 1;

    while app.selection.needs_fill() {
        if max_pages.is_some_and(|max| next_page > max) {
            break;
        }
        if app.page_count().is_some_and(|count| next_page > count) {
            break;
        }

        event_loop.dispatch(app, PickerMsg::PageRequested(next_page));
        event_loop.settle(app, FETCH_TIMEOUT);

        if app.is_loading() {
            error = Some(format!("page {next_page} timed out"));
            break;
        }
        if let Some(err) = app.last_error() {
            error = Some(err.to_string());
            break;
        }
        pages_fetched += 1;
        if app.visible_page().is_none_or(|p| p.is_empty()) {
            break;
        }
        info!(
            page = next_page,
            selected = app.selection.count(),
            target,
            "select progress"
        );
        next_page += 1;
    }

    SelectReport {
        target,
        selected: app.selection.included_ids(),
        pages_fetched,
        satisfied: target > 0 && !app.selection.needs_fill(),
        error,
    }
}
