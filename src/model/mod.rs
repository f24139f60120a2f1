pub mod types;

pub use types::{Page, Record, RecordId};
