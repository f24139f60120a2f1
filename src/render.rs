//! Plain-text and JSON rendering of the picker state.

use std::fmt::Write as _;

use serde::Serialize;

use crate::app::{PickerApp, StatusLine};
use crate::selection::PageView;

/// Robot-mode snapshot of the picker.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub status: StatusLine,
    pub page: Option<PageView>,
}

pub fn snapshot(app: &PickerApp) -> Snapshot {
    Snapshot {
        status: app.status(),
        page: app.page_view(),
    }
}

pub fn status_text(status: &StatusLine) -> String {
    let mut out = String::new();
    let pages = status
        .page_count
        .map_or_else(|| "?".to_string(), |n| n.to_string());
    let _ = write!(out, "page {}/{}", status.page_index, pages);
    let _ = write!(out, " \u{2022} {} selected", status.selected);
    if status.target > 0 {
        let _ = write!(out, " (target {})", status.target);
    }
    if status.loading {
        out.push_str(" \u{2022} loading\u{2026}");
    }
    if let Some(err) = &status.error {
        let _ = write!(out, " \u{2022} {err}");
    }
    out
}

pub fn page_text(app: &PickerApp) -> String {
    let mut out = String::new();
    match app.page_view() {
        None => out.push_str("(no page loaded)\n"),
        Some(view) => {
            let _ = writeln!(out, "{} {:>8}  title / artist", view.header.marker(), "id");
            for row in &view.rows {
                let _ = writeln!(
                    out,
                    "{} {:>8}  {} \u{2014} {}",
                    row.membership.marker(),
                    row.record.id,
                    row.record.title,
                    first_line(&row.record.artist_display)
                );
            }
        }
    }
    out.push_str(&status_text(&app.status()));
    out.push('\n');
    out
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or(s)
}
