//! Single-threaded event loop around [`PickerApp`].
//!
//! All mutation happens on the thread that calls [`EventLoop::dispatch`].
//! Page fetches run on short-lived worker threads and post their completion
//! back into the loop's channel as an ordinary message, so a completion is
//! processed between user events, never in the middle of one.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use tracing::debug;

use crate::app::{Cmd, PickerApp, PickerMsg};
use crate::sources::CollectionSource;

/// Anything the loop can wake up for.
#[derive(Debug)]
pub enum LoopEvent {
    /// Message for the picker (fetch completions arrive this way).
    Msg(PickerMsg),
    /// A raw line of user input.
    Input(String),
    /// The input stream ended.
    InputClosed,
}

pub struct EventLoop {
    source: Arc<dyn CollectionSource>,
    tx: Sender<LoopEvent>,
    rx: Receiver<LoopEvent>,
}

impl EventLoop {
    pub fn new(source: Arc<dyn CollectionSource>) -> Self {
        let (tx, rx) = unbounded();
        Self { source, tx, rx }
    }

    /// A fresh picker paged the same way as the source.
    pub fn picker(&self) -> PickerApp {
        PickerApp::new(self.source.page_size())
    }

    /// Handle for producers (input readers) that feed the loop.
    pub fn sender(&self) -> Sender<LoopEvent> {
        self.tx.clone()
    }

    /// Run one message through the picker and start whatever it asks for.
    pub fn dispatch(&self, app: &mut PickerApp, msg: PickerMsg) {
        let cmd = app.update(msg);
        self.execute(cmd);
    }

    fn execute(&self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Fetch { seq, page_index } => {
                let source = Arc::clone(&self.source);
                let tx = self.tx.clone();
                std::thread::spawn(move || {
                    let msg = match source.fetch_page(page_index) {
                        Ok(page) => PickerMsg::PageLoaded { seq, page },
                        Err(e) => PickerMsg::PageFailed {
                            seq,
                            page_index,
                            error: e.to_string(),
                        },
                    };
                    // The loop may already be gone; nothing to report to.
                    let _ = tx.send(LoopEvent::Msg(msg));
                });
            }
        }
    }

    /// Block for the next event. `None` once every sender is gone.
    pub fn next_event(&self) -> Option<LoopEvent> {
        self.rx.recv().ok()
    }

    /// Like [`next_event`](Self::next_event) but gives up after `timeout`.
    pub fn next_event_timeout(&self, timeout: Duration) -> Option<LoopEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => {
                debug!(?timeout, "event loop idle");
                None
            }
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Process events until no fetch is outstanding. Input events that arrive
    /// meanwhile are returned in order so the caller can replay them.
    pub fn settle(&self, app: &mut PickerApp, timeout: Duration) -> VecDeque<LoopEvent> {
        let mut deferred = VecDeque::new();
        while app.is_loading() {
            match self.next_event_timeout(timeout) {
                Some(LoopEvent::Msg(msg)) => self.dispatch(app, msg),
                Some(other) => deferred.push_back(other),
                None => break,
            }
        }
        deferred
    }
}
