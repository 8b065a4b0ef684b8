use crate::models::state::AppState;
use crate::store::remote::DocumentStore;
use chrono::{DateTime, Local};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

/// Push the whole snapshot once. Any completed transport counts as success.
pub fn push(store: &dyn DocumentStore, state: &AppState) -> bool {
    tracing::info!(links = state.links.len(), "pushing hub document");
    match store.save(state) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "remote write failed");
            false
        }
    }
}

/// Outcome of one background push.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub ok: bool,
    pub at: DateTime<Local>,
}

/// Fire-and-forget pusher: each push runs on its own detached thread and
/// reports back over a channel. Pushes are not ordered against each other.
pub struct Synchronizer {
    store:     Arc<dyn DocumentStore>,
    tx:        mpsc::Sender<SyncReport>,
    rx:        mpsc::Receiver<SyncReport>,
    in_flight: usize,
}

impl Synchronizer {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { store, tx, rx, in_flight: 0 }
    }

    pub fn spawn_push(&mut self, state: AppState) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        self.in_flight += 1;
        std::thread::spawn(move || {
            let ok = push(store.as_ref(), &state);
            let _ = tx.send(SyncReport { ok, at: Local::now() });
        });
    }

    /// Collect finished pushes without blocking.
    pub fn drain(&mut self) -> Vec<SyncReport> {
        let reports: Vec<SyncReport> = self.rx.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(reports.len());
        reports
    }

    /// Block until the next push finishes or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Option<SyncReport> {
        let report = self.rx.recv_timeout(timeout).ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(report)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.store)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::state::Defaults;
    use crate::store::remote::RemoteError;
    use serde_json::Value;
    use std::sync::Mutex;

    /// In-memory store that records every save.
    #[derive(Default)]
    pub struct RecordingStore {
        pub saved: Mutex<Vec<AppState>>,
        pub fail:  bool,
    }

    impl DocumentStore for RecordingStore {
        fn fetch(&self) -> Result<Value, RemoteError> {
            Err(RemoteError::Status(503))
        }
        fn save(&self, state: &AppState) -> Result<(), RemoteError> {
            if self.fail {
                return Err(RemoteError::Status(500));
            }
            self.saved.lock().unwrap().push(state.clone());
            Ok(())
        }
    }

    #[test]
    fn push_reports_transport_outcome() {
        let state = Defaults::new("https://store.test/exec", "pw").state();
        let ok = RecordingStore::default();
        assert!(push(&ok, &state));
        assert_eq!(ok.saved.lock().unwrap().len(), 1);

        let bad = RecordingStore { fail: true, ..RecordingStore::default() };
        assert!(!push(&bad, &state));
    }

    #[test]
    fn background_push_reports_back() {
        let store = Arc::new(RecordingStore::default());
        let mut sync = Synchronizer::new(store.clone());
        let state = Defaults::new("https://store.test/exec", "pw").state();

        sync.spawn_push(state.clone());
        assert_eq!(sync.in_flight(), 1);
        let report = sync.wait(Duration::from_secs(5)).expect("push finished");
        assert!(report.ok);
        assert_eq!(sync.in_flight(), 0);
        assert_eq!(store.saved.lock().unwrap()[0], state);
        assert!(sync.drain().is_empty());
    }
}
