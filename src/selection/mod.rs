//! Cross-page selection core: state, auto-fill, and visible-page projection.

pub mod autofill;
pub mod model;
pub mod projector;

pub use autofill::{AutoFillEngine, FillOutcome};
pub use model::{Membership, SelectionModel};
pub use projector::{HeaderState, PageView, RowView, VisibilityProjector, on_header_toggle};
