use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{debug, info};

use super::Direction;
use crate::render::{WidgetFamily, WidgetView, render_number};
use crate::state::CounterStore;
use crate::topics::{CounterChanged, WidgetRefresh};

pub const DEFAULT_REFRESH: Duration = Duration::from_secs(5 * 60);

/// System service that owns every widget timeline of the app.
pub trait WidgetCenter: Send + Sync {
    fn reload_all_timelines(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterEntry {
    pub date: SystemTime,
    pub count: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReloadPolicy {
    After(SystemTime),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timeline {
    pub entries: Vec<CounterEntry>,
    pub policy: ReloadPolicy,
}

/// Intents the widget's buttons run in the extension process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterIntent {
    Increment,
    Decrement,
}

impl CounterIntent {
    pub fn title(self) -> &'static str {
        match self {
            CounterIntent::Increment => "Increment Counter",
            CounterIntent::Decrement => "Decrement Counter",
        }
    }

    fn direction(self) -> Direction {
        match self {
            CounterIntent::Increment => Direction::Increment,
            CounterIntent::Decrement => Direction::Decrement,
        }
    }
}

/// Timeline provider for the widget extension. Shares only the counter
/// file (through the app group's documents directory) with the app.
pub struct CounterTimelineProvider<C> {
    store: CounterStore,
    center: C,
    refresh: Duration,
    interactive: bool,
}

impl<C: WidgetCenter> CounterTimelineProvider<C> {
    pub fn new(documents_dir: impl AsRef<Path>, center: C) -> Self {
        Self {
            store: CounterStore::new(documents_dir),
            center,
            refresh: DEFAULT_REFRESH,
            interactive: true,
        }
    }

    /// How long a timeline stays valid before the system asks again.
    pub fn with_refresh_interval(mut self, refresh: Duration) -> Self {
        self.refresh = refresh;
        self
    }

    /// Whether the OS can run intents from widget buttons.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn center(&self) -> &C {
        &self.center
    }

    pub fn read_value(&self) -> i64 {
        self.store.read_value()
    }

    /// Shown while the widget gallery has nothing yet; never touches disk.
    pub fn placeholder(&self) -> CounterEntry {
        CounterEntry { date: SystemTime::now(), count: 0 }
    }

    pub fn snapshot(&self) -> CounterEntry {
        CounterEntry { date: SystemTime::now(), count: self.read_value() }
    }

    /// One entry for `now`, valid until `now + refresh` (or the default
    /// interval when that lands past what the clock can represent).
    pub fn timeline(&self, now: SystemTime) -> Timeline {
        let entry = CounterEntry { date: now, count: self.read_value() };
        debug!(count = entry.count, "timeline built");
        Timeline {
            entries: vec![entry],
            policy: ReloadPolicy::After(
                now.checked_add(self.refresh).unwrap_or(now + DEFAULT_REFRESH),
            ),
        }
    }

    pub fn render(&self, entry: &CounterEntry, family: WidgetFamily) -> WidgetView {
        render_number(entry.count, family, self.interactive)
    }

    /// Read, step, overwrite, then reload every timeline. The read and the
    /// overwrite are not atomic against the app.
    pub fn apply_delta(&self, direction: Direction) -> i64 {
        let current = self.read_value();
        let next = direction.apply(current);
        self.store.save_value(next);
        info!(?direction, current, next, "ios widget changed counter");
        self.reload_all(CounterChanged { value: next });
        next
    }

    pub fn perform(&self, intent: CounterIntent) -> i64 {
        debug!(intent = intent.title(), "performing intent");
        self.apply_delta(intent.direction())
    }
}

impl<C: WidgetCenter> WidgetRefresh for CounterTimelineProvider<C> {
    fn reload_all(&self, _change: CounterChanged) {
        self.center.reload_all_timelines();
    }
}
