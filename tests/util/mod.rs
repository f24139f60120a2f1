use gallery_select::model::{Page, Record, RecordId};
use std::path::{Path, PathBuf};

/// Captures tracing output for tests.
#[allow(dead_code)]
pub struct TestTracing {
    buffer: std::sync::Arc<std::sync::Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl TestTracing {
    pub fn new() -> Self {
        Self {
            buffer: std::sync::Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.buffer.clone();
        let make_writer = move || TestWriter(writer.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(make_writer)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn output(&self) -> String {
        let buf = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Assert that the captured log output contains the provided substring.
    pub fn assert_contains(&self, needle: &str) {
        let out = self.output();
        assert!(
            out.contains(needle),
            "expected logs to contain `{needle}`, got:\n{out}"
        );
    }
}

#[allow(dead_code)]
struct TestWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut guard = self.0.lock().unwrap();
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Records `first..=last` with stable titles.
#[allow(dead_code)]
pub fn records(first: RecordId, last: RecordId) -> Vec<Record> {
    (first..=last)
        .map(|id| Record::new(id, format!("Work {id}"), format!("Artist {id}")))
        .collect()
}

/// A page holding ids `first..=last`.
#[allow(dead_code)]
pub fn page(page_index: u32, first: RecordId, last: RecordId, total_estimate: u64) -> Page {
    Page {
        page_index,
        records: records(first, last),
        total_estimate,
    }
}

/// Write a JSON fixture of `count` records into `dir`, in API shape with a few
/// rows missing their display fields.
#[allow(dead_code)]
pub fn write_fixture(dir: &Path, count: RecordId) -> PathBuf {
    let rows: Vec<serde_json::Value> = (1..=count)
        .map(|id| {
            if id % 5 == 0 {
                serde_json::json!({ "id": id, "title": null })
            } else {
                serde_json::json!({
                    "id": id,
                    "title": format!("Work {id}"),
                    "artist_display": format!("Artist {id}"),
                })
            }
        })
        .collect();
    let path = dir.join("records.json");
    std::fs::write(&path, serde_json::to_string_pretty(&rows).unwrap()).unwrap();
    path
}
