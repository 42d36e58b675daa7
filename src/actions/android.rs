use std::path::Path;

use tracing::{debug, info};

use super::{Direction, ids};
use crate::state::CounterStore;
use crate::topics::{CounterChanged, WidgetRefresh};

pub const LAYOUT: &str = "counter_widget";

/// The widget host side of the launcher: which widget ids exist, and how
/// to push new views to one of them.
pub trait AppWidgetManager: Send + Sync {
    fn app_widget_ids(&self) -> Vec<i32>;
    fn update_app_widget(&self, widget_id: i32, views: RemoteViews);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewId {
    CounterText,
    IncrementButton,
    DecrementButton,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// Broadcast back to this provider with the given intent action.
    Broadcast(&'static str),
    LaunchApp,
}

/// Views pushed to one widget instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteViews {
    pub layout: &'static str,
    pub counter_text: String,
    pub clicks: Vec<(ViewId, ClickTarget)>,
}

impl RemoteViews {
    pub fn for_value(value: i64) -> Self {
        Self {
            layout: LAYOUT,
            counter_text: value.to_string(),
            clicks: vec![
                (ViewId::IncrementButton, ClickTarget::Broadcast(ids::ACTION_INCREMENT)),
                (ViewId::DecrementButton, ClickTarget::Broadcast(ids::ACTION_DECREMENT)),
                (ViewId::CounterText, ClickTarget::LaunchApp),
            ],
        }
    }

    pub fn click(&self, view: ViewId) -> Option<&ClickTarget> {
        self.clicks.iter().find(|(v, _)| *v == view).map(|(_, t)| t)
    }
}

/// Home-screen widget provider. Runs inside whatever process the launcher
/// wakes up; shares nothing with the app but the counter file.
pub struct CounterWidgetProvider<M> {
    store: CounterStore,
    manager: M,
}

impl<M: AppWidgetManager> CounterWidgetProvider<M> {
    /// `files_dir` is the app's private files directory.
    pub fn new(files_dir: impl AsRef<Path>, manager: M) -> Self {
        Self { store: CounterStore::new(files_dir), manager }
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn read_value(&self) -> i64 {
        self.store.read_value()
    }

    /// Read, step, overwrite, then redraw every instance. Not atomic with
    /// respect to other processes: a concurrent write between the read and
    /// the overwrite is lost.
    pub fn apply_delta(&self, direction: Direction) -> i64 {
        let current = self.read_value();
        let next = direction.apply(current);
        self.store.save_value(next);
        info!(?direction, current, next, "android widget changed counter");
        self.reload_all(CounterChanged { value: next });
        next
    }

    /// Periodic / OS-requested update of the given instances.
    pub fn on_update(&self, widget_ids: &[i32]) {
        let value = self.read_value();
        self.push(widget_ids, value);
    }

    /// Broadcast receiver. Unknown actions are ignored.
    pub fn on_receive(&self, action: &str) -> Option<i64> {
        let direction = match action {
            ids::ACTION_INCREMENT => Direction::Increment,
            ids::ACTION_DECREMENT => Direction::Decrement,
            other => {
                debug!(action = other, "ignoring broadcast");
                return None;
            }
        };
        Some(self.apply_delta(direction))
    }

    fn push(&self, widget_ids: &[i32], value: i64) {
        for &id in widget_ids {
            self.manager.update_app_widget(id, RemoteViews::for_value(value));
        }
        debug!(count = widget_ids.len(), value, "android widgets updated");
    }
}

impl<M: AppWidgetManager> WidgetRefresh for CounterWidgetProvider<M> {
    fn reload_all(&self, change: CounterChanged) {
        let ids = self.manager.app_widget_ids();
        self.push(&ids, change.value);
    }
}
