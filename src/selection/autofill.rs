//! Progressive satisfaction of a "select first N" target.
//!
//! The engine only ever looks at the ids that are visible right now. Reaching a
//! target larger than one page therefore takes several page loads, each one
//! contributing whatever undecided ids it shows. Explicitly rejected ids are
//! never claimed, and nothing is ever removed from the selection.

use tracing::debug;

use crate::model::RecordId;
use crate::selection::model::{Membership, SelectionModel};

/// What a single fill pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillOutcome {
    /// Ids claimed by this pass, in visible order.
    pub added: Vec<RecordId>,
    /// Whether the target is met after the pass (false when no target is set).
    pub satisfied: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AutoFillEngine;

impl AutoFillEngine {
    /// Claim undecided visible ids, in order, until the target is reached or
    /// the visible sequence runs out. A no-op once the target is met, so it is
    /// safe to call after every mutation.
    pub fn fill(&self, model: &mut SelectionModel, visible_ids: &[RecordId]) -> FillOutcome {
        if !model.needs_fill() {
            return FillOutcome {
                added: Vec::new(),
                satisfied: model.target() > 0,
            };
        }

        let mut added = Vec::new();
        for &id in visible_ids {
            if !model.needs_fill() {
                break;
            }
            if model.membership(id) == Membership::Undecided {
                model.toggle(id, true);
                added.push(id);
            }
        }

        let satisfied = !model.needs_fill();
        debug!(
            added = added.len(),
            count = model.count(),
            target = model.target(),
            satisfied,
            "auto-fill pass"
        );
        FillOutcome { added, satisfied }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::RangeInclusive<RecordId>) -> Vec<RecordId> {
        range.collect()
    }

    #[test]
    fn no_target_means_no_fill() {
        let mut model = SelectionModel::new();
        let outcome = AutoFillEngine.fill(&mut model, &ids(1..=12));
        assert!(outcome.added.is_empty());
        assert!(!outcome.satisfied);
        assert_eq!(model.count(), 0);
    }

    #[test]
    fn fill_saturates_within_one_page() {
        let mut model = SelectionModel::new();
        model.set_target(5);
        let page = ids(1..=12);

        let outcome = AutoFillEngine.fill(&mut model, &page);
        assert_eq!(outcome.added, vec![1, 2, 3, 4, 5]);
        assert!(outcome.satisfied);
        assert_eq!(model.included_ids(), vec![1, 2, 3, 4, 5]);

        let before = model.clone();
        let again = AutoFillEngine.fill(&mut model, &page);
        assert!(again.added.is_empty());
        assert!(again.satisfied);
        assert_eq!(model, before);
    }

    #[test]
    fn fill_spans_pages() {
        let mut model = SelectionModel::new();
        model.set_target(15);

        let first = AutoFillEngine.fill(&mut model, &ids(1..=12));
        assert_eq!(first.added.len(), 12);
        assert!(!first.satisfied);

        let second = AutoFillEngine.fill(&mut model, &ids(13..=24));
        assert_eq!(second.added, vec![13, 14, 15]);
        assert!(second.satisfied);
        assert_eq!(model.included_ids(), ids(1..=15));
        assert_eq!(model.count(), 15);
    }

    #[test]
    fn fill_skips_rejected_ids() {
        let mut model = SelectionModel::new();
        model.set_target(3);
        model.toggle(2, false);

        let outcome = AutoFillEngine.fill(&mut model, &ids(1..=5));
        assert_eq!(outcome.added, vec![1, 3, 4]);
        assert_eq!(model.membership(2), Membership::Excluded);
    }

    #[test]
    fn fill_counts_manual_selections_toward_target() {
        let mut model = SelectionModel::new();
        model.set_target(3);
        model.toggle(40, true);

        let outcome = AutoFillEngine.fill(&mut model, &ids(1..=5));
        assert_eq!(outcome.added, vec![1, 2]);
        assert_eq!(model.count(), 3);
    }

    #[test]
    fn deselect_at_target_refills_from_same_page() {
        let mut model = SelectionModel::new();
        model.set_target(3);
        let page = ids(1..=6);
        AutoFillEngine.fill(&mut model, &page);
        assert_eq!(model.included_ids(), vec![1, 2, 3]);

        model.toggle(2, false);
        let outcome = AutoFillEngine.fill(&mut model, &page);
        assert_eq!(outcome.added, vec![4]);
        assert_eq!(model.included_ids(), vec![1, 3, 4]);
    }

    #[test]
    fn oversized_target_stays_unsatisfied() {
        let mut model = SelectionModel::new();
        model.set_target(100);
        let outcome = AutoFillEngine.fill(&mut model, &ids(1..=4));
        assert_eq!(outcome.added.len(), 4);
        assert!(!outcome.satisfied);
        assert!(model.needs_fill());
    }
}
