//! Property tests for the selection core over arbitrary operation sequences.

use std::collections::HashSet;

use gallery_select::model::RecordId;
use gallery_select::selection::{
    AutoFillEngine, HeaderState, Membership, SelectionModel, VisibilityProjector,
    on_header_toggle,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Toggle(RecordId, bool),
    SetTarget(usize),
    PageEdit(Vec<RecordId>, Vec<RecordId>),
    Header(bool, Vec<RecordId>),
    Fill(Vec<RecordId>),
    Reset,
}

fn ids() -> impl Strategy<Value = Vec<RecordId>> {
    prop::collection::vec(0u64..40, 0..12)
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u64..40, any::<bool>()).prop_map(|(id, on)| Op::Toggle(id, on)),
        1 => (0usize..30).prop_map(Op::SetTarget),
        1 => (ids(), ids()).prop_map(|(v, s)| Op::PageEdit(v, s)),
        1 => (any::<bool>(), ids()).prop_map(|(c, v)| Op::Header(c, v)),
        2 => ids().prop_map(Op::Fill),
        1 => Just(Op::Reset),
    ]
}

fn apply(model: &mut SelectionModel, op: &Op) {
    match op {
        Op::Toggle(id, on) => model.toggle(*id, *on),
        Op::SetTarget(n) => model.set_target(*n),
        Op::PageEdit(visible, selected) => {
            let selected: HashSet<RecordId> = selected.iter().copied().collect();
            model.set_visible_page_selection(visible, &selected);
        }
        Op::Header(checked, visible) => on_header_toggle(model, *checked, visible),
        Op::Fill(visible) => {
            AutoFillEngine.fill(model, visible);
        }
        Op::Reset => model.reset(),
    }
}

fn disjoint(model: &SelectionModel) -> bool {
    let included: HashSet<RecordId> = model.included_ids().into_iter().collect();
    model
        .excluded_ids()
        .iter()
        .all(|id| !included.contains(id))
}

proptest! {
    #[test]
    fn sets_stay_disjoint(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut model = SelectionModel::new();
        for op in &ops {
            apply(&mut model, op);
            prop_assert!(disjoint(&model), "overlap after {:?}", op);
        }
    }

    #[test]
    fn fill_never_removes_or_overrides(
        ops in prop::collection::vec(op_strategy(), 0..30),
        visible in ids(),
    ) {
        let mut model = SelectionModel::new();
        for op in &ops {
            apply(&mut model, op);
        }
        let before_included = model.included_ids();
        let before_excluded = model.excluded_ids();

        let outcome = AutoFillEngine.fill(&mut model, &visible);

        for id in &before_included {
            prop_assert!(model.is_selected(*id));
        }
        prop_assert_eq!(model.excluded_ids(), before_excluded);
        for id in &outcome.added {
            prop_assert!(visible.contains(id));
        }
        if model.target() > 0 {
            prop_assert!(model.count() <= model.target().max(before_included.len()));
        }
    }

    #[test]
    fn fill_is_idempotent_on_same_page(target in 0usize..30, visible in ids()) {
        let mut model = SelectionModel::new();
        model.set_target(target);
        AutoFillEngine.fill(&mut model, &visible);
        let settled = model.clone();
        let again = AutoFillEngine.fill(&mut model, &visible);
        prop_assert!(again.added.is_empty());
        prop_assert_eq!(model, settled);
    }

    #[test]
    fn toggle_twice_equals_once(id in 0u64..40, on in any::<bool>(), ops in prop::collection::vec(op_strategy(), 0..20)) {
        let mut model = SelectionModel::new();
        for op in &ops {
            apply(&mut model, op);
        }
        let mut once = model.clone();
        once.toggle(id, on);
        let mut twice = model;
        twice.toggle(id, on);
        twice.toggle(id, on);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn header_state_matches_definition(
        ops in prop::collection::vec(op_strategy(), 0..30),
        visible in ids(),
    ) {
        let mut model = SelectionModel::new();
        for op in &ops {
            apply(&mut model, op);
        }
        let projector = VisibilityProjector::new(&model);
        let effective = projector.effective_selection(&visible);
        let all = !visible.is_empty() && visible.iter().all(|id| effective.contains(id));
        let expected = if all {
            HeaderState::All
        } else if effective.is_empty() {
            HeaderState::None
        } else {
            HeaderState::Partial
        };
        prop_assert_eq!(projector.header_state(&visible), expected);
        for id in &visible {
            prop_assert_eq!(
                effective.contains(id),
                model.membership(*id) == Membership::Selected
            );
        }
    }
}
