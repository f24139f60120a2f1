//! Picker state machine.
//!
//! [`PickerApp`] owns the selection and the currently visible page. Every user
//! action and every fetch completion arrives as one [`PickerMsg`]; `update()`
//! applies it to completion and returns a [`Cmd`] describing the side effect
//! (if any) the event loop must run. After every message that can change the
//! visible page, the target, or either id set, auto-fill is re-run against the
//! visible page.
//!
//! Page requests are tagged with a monotonically increasing [`RequestSeq`].
//! Fetches are never cancelled; a completion is applied only when its sequence
//! is the last one issued, so a slow response for an abandoned page can never
//! replace the page the user asked for most recently.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::model::{Page, RecordId};
use crate::selection::{
    AutoFillEngine, FillOutcome, HeaderState, Membership, PageView, SelectionModel,
    VisibilityProjector, on_header_toggle,
};

/// Sequence number attached to each page request.
pub type RequestSeq = u64;

// =========================================================================
// PickerMsg: every event the picker can process
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerMsg {
    // -- Paging -----------------------------------------------------------
    /// Request a specific 1-based page.
    PageRequested(u32),
    /// Request the page after the last requested one.
    NextPage,
    /// Request the page before the last requested one.
    PrevPage,
    /// A fetch finished successfully.
    PageLoaded { seq: RequestSeq, page: Page },
    /// A fetch failed.
    PageFailed {
        seq: RequestSeq,
        page_index: u32,
        error: String,
    },

    // -- Selection --------------------------------------------------------
    /// Row checkbox set to an explicit value.
    RowToggled { id: RecordId, selected: bool },
    /// Row checkbox clicked: flips the displayed state.
    RowFlipped(RecordId),
    /// Page header checkbox clicked.
    HeaderToggled(bool),
    /// Whole-page edit (e.g. a drag selection): exactly these visible ids.
    PageSelectionSet(HashSet<RecordId>),
    /// Bulk "select first N".
    TargetSet(usize),
    /// Drop every decision and the target.
    SelectionCleared,
}

/// Side effect requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    None,
    Fetch { seq: RequestSeq, page_index: u32 },
}

/// One-line summary for status bars and robot output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StatusLine {
    pub page_index: u32,
    pub page_count: Option<u32>,
    pub selected: usize,
    pub target: usize,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct PickerApp {
    /// Authoritative cross-page selection.
    pub selection: SelectionModel,
    engine: AutoFillEngine,
    /// Page currently shown, if any has loaded.
    visible: Option<Page>,
    /// Records per page, used to derive the page count from the estimate.
    page_size: u32,
    /// Page most recently requested (1-based).
    requested_page: u32,
    /// Sequence of the most recent request.
    last_issued: RequestSeq,
    /// Sequence of the most recent response that was applied or failed.
    last_settled: RequestSeq,
    /// Error from the most recent settled request.
    last_error: Option<String>,
    /// Responses discarded because a newer request had been issued.
    pub stale_discarded: u64,
    /// Outcome of the most recent auto-fill pass that claimed ids.
    pub last_fill: FillOutcome,
}

impl PickerApp {
    pub fn new(page_size: u32) -> Self {
        Self {
            selection: SelectionModel::new(),
            engine: AutoFillEngine,
            visible: None,
            page_size: page_size.max(1),
            requested_page: 0,
            last_issued: 0,
            last_settled: 0,
            last_error: None,
            stale_discarded: 0,
            last_fill: FillOutcome::default(),
        }
    }

    pub fn visible_page(&self) -> Option<&Page> {
        self.visible.as_ref()
    }

    /// Ids of the visible page in display order (empty before the first load).
    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.visible.as_ref().map(Page::ids).unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.last_settled < self.last_issued
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn requested_page(&self) -> u32 {
        self.requested_page
    }

    /// Page count implied by the last estimate, once a page has loaded.
    pub fn page_count(&self) -> Option<u32> {
        self.visible.as_ref().map(|p| p.page_count(self.page_size))
    }

    pub fn header_state(&self) -> HeaderState {
        VisibilityProjector::new(&self.selection).header_state(&self.visible_ids())
    }

    pub fn page_view(&self) -> Option<PageView> {
        self.visible
            .as_ref()
            .map(|page| VisibilityProjector::new(&self.selection).page_view(page))
    }

    pub fn status(&self) -> StatusLine {
        StatusLine {
            page_index: self.visible.as_ref().map_or(0, |p| p.page_index),
            page_count: self.page_count(),
            selected: self.selection.count(),
            target: self.selection.target(),
            loading: self.is_loading(),
            error: self.last_error.clone(),
        }
    }

    pub fn update(&mut self, msg: PickerMsg) -> Cmd {
        match msg {
            PickerMsg::PageRequested(page_index) => self.request_page(page_index),
            PickerMsg::NextPage => {
                let mut next = self.requested_page.saturating_add(1).max(1);
                if let Some(count) = self.page_count() {
                    next = next.min(count);
                }
                self.request_page(next)
            }
            PickerMsg::PrevPage => {
                let prev = self.requested_page.saturating_sub(1).max(1);
                self.request_page(prev)
            }
            PickerMsg::PageLoaded { seq, page } => {
                if seq != self.last_issued {
                    self.discard_stale(seq, page.page_index);
                    return Cmd::None;
                }
                info!(
                    seq,
                    page_index = page.page_index,
                    rows = page.records.len(),
                    total_estimate = page.total_estimate,
                    "page applied"
                );
                self.last_settled = seq;
                self.last_error = None;
                self.visible = Some(page);
                self.reconcile();
                Cmd::None
            }
            PickerMsg::PageFailed {
                seq,
                page_index,
                error,
            } => {
                if seq != self.last_issued {
                    self.discard_stale(seq, page_index);
                    return Cmd::None;
                }
                warn!(seq, page_index, %error, "page unavailable");
                self.last_settled = seq;
                self.last_error = Some(format!("page {page_index} unavailable: {error}"));
                Cmd::None
            }
            PickerMsg::RowToggled { id, selected } => {
                self.selection.toggle(id, selected);
                self.reconcile();
                Cmd::None
            }
            PickerMsg::RowFlipped(id) => {
                let selected = self.selection.membership(id) != Membership::Selected;
                self.selection.toggle(id, selected);
                self.reconcile();
                Cmd::None
            }
            PickerMsg::HeaderToggled(checked) => {
                let visible = self.visible_ids();
                on_header_toggle(&mut self.selection, checked, &visible);
                self.reconcile();
                Cmd::None
            }
            PickerMsg::PageSelectionSet(ids) => {
                let visible = self.visible_ids();
                self.selection.set_visible_page_selection(&visible, &ids);
                self.reconcile();
                Cmd::None
            }
            PickerMsg::TargetSet(n) => {
                self.selection.set_target(n);
                self.reconcile();
                Cmd::None
            }
            PickerMsg::SelectionCleared => {
                self.selection.reset();
                self.last_fill = FillOutcome::default();
                Cmd::None
            }
        }
    }

    fn request_page(&mut self, page_index: u32) -> Cmd {
        let page_index = page_index.max(1);
        self.last_issued += 1;
        self.requested_page = page_index;
        debug!(seq = self.last_issued, page_index, "page requested");
        Cmd::Fetch {
            seq: self.last_issued,
            page_index,
        }
    }

    fn discard_stale(&mut self, seq: RequestSeq, page_index: u32) {
        self.stale_discarded += 1;
        debug!(
            seq,
            latest = self.last_issued,
            page_index,
            "discarding stale page response"
        );
    }

    /// Re-run auto-fill against the visible page. Cheap no-op once the target
    /// is met.
    fn reconcile(&mut self) {
        if !self.selection.needs_fill() {
            return;
        }
        let visible = self.visible_ids();
        let outcome = self.engine.fill(&mut self.selection, &visible);
        if !outcome.added.is_empty() {
            self.last_fill = outcome;
        }
    }
}
