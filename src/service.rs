use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::StoreError;
use crate::state::{CounterStore, policy};
use crate::topics::{CounterChanged, NoopRefresh, WidgetRefresh};

/// The app's only way to the counter.
///
/// Build one at startup and hand it (usually as `Arc<CounterService>`) to
/// whatever needs it. File access runs on tokio's blocking pool, so calls
/// from one task complete in the order they are awaited; nothing orders
/// them against widget processes.
pub struct CounterService {
    store: CounterStore,
    refresh: Arc<dyn WidgetRefresh>,
}

impl CounterService {
    pub fn new(documents_dir: impl AsRef<Path>, refresh: Arc<dyn WidgetRefresh>) -> Self {
        Self { store: CounterStore::new(documents_dir), refresh }
    }

    /// Service for a host without widgets.
    pub fn without_widgets(documents_dir: impl AsRef<Path>) -> Self {
        Self::new(documents_dir, Arc::new(NoopRefresh))
    }

    pub fn store(&self) -> &CounterStore {
        &self.store
    }

    /// Fail-soft read; errors only if the read task itself could not run.
    pub async fn load_counter_value(&self) -> Result<i64, StoreError> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.read_value())
            .await
            .map_err(|e| StoreError::Task(e.to_string()))
    }

    pub async fn get_counter_value(&self) -> i64 {
        policy::read_or_zero(self.load_counter_value().await)
    }

    /// Overwrite the stored value and, if that worked, ask the widgets to
    /// redraw. Failures are logged and dropped.
    pub async fn save_counter_value(&self, value: i64) {
        let store = self.store.clone();
        let written = tokio::task::spawn_blocking(move || store.write_value(value))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))
            .and_then(|r| r);

        match written {
            Ok(()) => {
                info!(value, "counter saved");
                self.notify_widgets(value);
            }
            Err(e) => policy::discard_write(Err(e)),
        }
    }

    fn notify_widgets(&self, value: i64) {
        debug!(value, "requesting widget reload");
        self.refresh.reload_all(CounterChanged { value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<i64>>);

    impl WidgetRefresh for Recorder {
        fn reload_all(&self, change: CounterChanged) {
            self.0.lock().unwrap().push(change.value);
        }
    }

    #[tokio::test]
    async fn fresh_storage_reads_zero() {
        let tmp = TempDir::new().unwrap();
        let svc = CounterService::without_widgets(tmp.path());

        assert_eq!(svc.get_counter_value().await, 0);
        assert!(svc.store().dir().is_dir());
    }

    #[tokio::test]
    async fn save_then_get_round_trips_and_notifies() {
        let tmp = TempDir::new().unwrap();
        let rec = Arc::new(Recorder::default());
        let svc = CounterService::new(tmp.path(), rec.clone());

        svc.save_counter_value(5).await;
        svc.save_counter_value(7).await;

        assert_eq!(svc.get_counter_value().await, 7);
        assert_eq!(*rec.0.lock().unwrap(), vec![5, 7]);
    }

    #[tokio::test]
    async fn failed_save_is_silent_and_skips_notify() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let rec = Arc::new(Recorder::default());
        let svc = CounterService::new(&blocker, rec.clone());

        svc.save_counter_value(3).await;

        assert!(rec.0.lock().unwrap().is_empty());
        assert_eq!(svc.get_counter_value().await, 0);
    }
}
