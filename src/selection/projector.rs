//! Read-side projection of the selection onto the visible page.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{Page, Record, RecordId};
use crate::selection::model::{Membership, SelectionModel};

/// Tri-state of the page-level "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderState {
    All,
    None,
    Partial,
}

impl HeaderState {
    pub fn marker(self) -> &'static str {
        match self {
            HeaderState::All => "[x]",
            HeaderState::None => "[ ]",
            HeaderState::Partial => "[~]",
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    #[serde(flatten)]
    pub record: Record,
    pub selected: bool,
    pub membership: Membership,
}

/// Everything a renderer needs to draw the current page.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub page_index: u32,
    pub header: HeaderState,
    pub rows: Vec<RowView>,
}

/// Stateless view over a [`SelectionModel`]; build one per render.
pub struct VisibilityProjector<'a> {
    model: &'a SelectionModel,
}

impl<'a> VisibilityProjector<'a> {
    pub fn new(model: &'a SelectionModel) -> Self {
        Self { model }
    }

    pub fn effective_selection(&self, visible_ids: &[RecordId]) -> HashSet<RecordId> {
        visible_ids
            .iter()
            .copied()
            .filter(|&id| self.model.is_selected(id))
            .collect()
    }

    pub fn header_state(&self, visible_ids: &[RecordId]) -> HeaderState {
        let selected = visible_ids
            .iter()
            .filter(|&&id| self.model.is_selected(id))
            .count();
        if selected == 0 {
            HeaderState::None
        } else if selected == visible_ids.len() {
            HeaderState::All
        } else {
            HeaderState::Partial
        }
    }

    pub fn page_view(&self, page: &Page) -> PageView {
        let ids = page.ids();
        let rows = page
            .records
            .iter()
            .map(|record| RowView {
                record: record.clone(),
                selected: self.model.is_selected(record.id),
                membership: self.model.membership(record.id),
            })
            .collect();
        PageView {
            page_index: page.page_index,
            header: self.header_state(&ids),
            rows,
        }
    }
}

/// Header checkbox edit: select or reject every visible id.
pub fn on_header_toggle(model: &mut SelectionModel, checked: bool, visible_ids: &[RecordId]) {
    let selected: HashSet<RecordId> = if checked {
        visible_ids.iter().copied().collect()
    } else {
        HashSet::new()
    };
    model.set_visible_page_selection(visible_ids, &selected);
}
