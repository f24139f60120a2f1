//! Authoritative cross-page selection state.
//!
//! Selection is tracked as two disjoint id sets rather than a flag per row:
//! `included` holds ids that are selected (by the user or by auto-fill) and
//! `excluded` holds ids the user explicitly rejected. An id in neither set is
//! undecided: it renders as unselected but auto-fill may still claim it when a
//! "select first N" target is outstanding. Ids need not belong to any page
//! seen so far; they only affect rendering once a page containing them shows up.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::RecordId;

/// Three-valued membership of a record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    Selected,
    Excluded,
    Undecided,
}

impl Membership {
    /// Row marker used by the text renderer.
    pub fn marker(self) -> &'static str {
        match self {
            Membership::Selected => "[x]",
            Membership::Excluded => "[-]",
            Membership::Undecided => "[ ]",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    included: HashSet<RecordId>,
    excluded: HashSet<RecordId>,
    target: usize,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a bulk "select first `n`" request. Drops every prior decision.
    pub fn set_target(&mut self, n: usize) {
        self.included.clear();
        self.excluded.clear();
        self.target = n;
    }

    /// Mark `id` selected or rejected. Never touches the target.
    pub fn toggle(&mut self, id: RecordId, want_selected: bool) {
        if want_selected {
            self.excluded.remove(&id);
            self.included.insert(id);
        } else {
            self.included.remove(&id);
            self.excluded.insert(id);
        }
    }

    /// Apply a whole-page edit: every visible id ends up either selected (if
    /// it is in `selected_ids`) or rejected.
    pub fn set_visible_page_selection(
        &mut self,
        visible_ids: &[RecordId],
        selected_ids: &HashSet<RecordId>,
    ) {
        for &id in visible_ids {
            self.toggle(id, selected_ids.contains(&id));
        }
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.included.contains(&id)
    }

    pub fn membership(&self, id: RecordId) -> Membership {
        if self.included.contains(&id) {
            Membership::Selected
        } else if self.excluded.contains(&id) {
            Membership::Excluded
        } else {
            Membership::Undecided
        }
    }

    pub fn count(&self) -> usize {
        self.included.len()
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// True while a bulk target is outstanding and not yet reached.
    pub fn needs_fill(&self) -> bool {
        self.target > 0 && self.count() < self.target
    }

    /// Back to the freshly created state.
    pub fn reset(&mut self) {
        self.set_target(0);
    }

    /// Selected ids in ascending order.
    pub fn included_ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = self.included.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Rejected ids in ascending order.
    pub fn excluded_ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = self.excluded.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[cfg(test)]
    pub(crate) fn is_disjoint(&self) -> bool {
        self.included.is_disjoint(&self.excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_model_is_empty() {
        let model = SelectionModel::new();
        assert_eq!(model.count(), 0);
        assert_eq!(model.target(), 0);
        assert!(!model.needs_fill());
        assert_eq!(model.membership(1), Membership::Undecided);
    }

    #[test]
    fn toggle_is_idempotent() {
        let mut once = SelectionModel::new();
        once.toggle(4, true);

        let mut twice = SelectionModel::new();
        twice.toggle(4, true);
        twice.toggle(4, true);

        assert_eq!(once, twice);
        assert_eq!(twice.count(), 1);
    }

    #[test]
    fn toggle_off_moves_id_to_excluded() {
        let mut model = SelectionModel::new();
        model.toggle(4, true);
        model.toggle(4, false);
        assert!(!model.is_selected(4));
        assert_eq!(model.membership(4), Membership::Excluded);
        assert_eq!(model.excluded_ids(), vec![4]);
        assert!(model.is_disjoint());
    }

    #[test]
    fn toggle_keeps_target() {
        let mut model = SelectionModel::new();
        model.set_target(10);
        model.toggle(1, true);
        model.toggle(2, false);
        assert_eq!(model.target(), 10);
    }

    #[test]
    fn unseen_ids_are_accepted() {
        let mut model = SelectionModel::new();
        model.toggle(999_999, true);
        assert!(model.is_selected(999_999));
    }

    #[test]
    fn set_target_clears_prior_decisions() {
        let mut model = SelectionModel::new();
        model.toggle(1, true);
        model.toggle(2, false);
        model.set_target(3);
        assert_eq!(model.count(), 0);
        assert_eq!(model.membership(2), Membership::Undecided);
        assert!(model.needs_fill());
    }

    #[test]
    fn page_selection_marks_every_visible_id() {
        let mut model = SelectionModel::new();
        model.toggle(9, true);
        let visible = [1, 2, 3];
        let chosen: HashSet<RecordId> = [2].into_iter().collect();
        model.set_visible_page_selection(&visible, &chosen);

        assert_eq!(model.membership(1), Membership::Excluded);
        assert_eq!(model.membership(2), Membership::Selected);
        assert_eq!(model.membership(3), Membership::Excluded);
        // Off-page decisions survive.
        assert!(model.is_selected(9));
        assert!(model.is_disjoint());
    }

    #[test]
    fn reset_matches_fresh_model() {
        let mut model = SelectionModel::new();
        model.set_target(5);
        model.toggle(1, true);
        model.toggle(2, false);
        model.reset();
        assert_eq!(model, SelectionModel::new());

        model.set_target(2);
        let mut fresh = SelectionModel::new();
        fresh.set_target(2);
        assert_eq!(model, fresh);
    }

    #[test]
    fn included_ids_are_sorted() {
        let mut model = SelectionModel::new();
        for id in [5, 1, 3] {
            model.toggle(id, true);
        }
        assert_eq!(model.included_ids(), vec![1, 3, 5]);
    }
}
