use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use widget_counter::actions::android::{AppWidgetManager, CounterWidgetProvider, RemoteViews};
use widget_counter::actions::ios::{CounterIntent, CounterTimelineProvider, WidgetCenter};
use widget_counter::actions::screen::{CounterScreen, Phase};
use widget_counter::{CounterService, Direction};

struct NoWidgets;

impl AppWidgetManager for NoWidgets {
    fn app_widget_ids(&self) -> Vec<i32> {
        Vec::new()
    }

    fn update_app_widget(&self, _widget_id: i32, _views: RemoteViews) {}
}

#[derive(Default)]
struct Reloads(AtomicUsize);

impl WidgetCenter for Reloads {
    fn reload_all_timelines(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn app_and_android_widget_see_each_other() {
    let tmp = TempDir::new().unwrap();
    let app = CounterService::without_widgets(tmp.path());
    // built separately, as the widget process would
    let widget = CounterWidgetProvider::new(tmp.path(), NoWidgets);

    app.save_counter_value(3).await;
    assert_eq!(widget.read_value(), 3);

    assert_eq!(widget.apply_delta(Direction::Increment), 4);
    assert_eq!(app.get_counter_value().await, 4);
}

#[tokio::test]
async fn app_and_ios_widget_see_each_other() {
    let tmp = TempDir::new().unwrap();
    let app = CounterService::without_widgets(tmp.path());
    let widget = CounterTimelineProvider::new(tmp.path(), Reloads::default());

    app.save_counter_value(3).await;
    assert_eq!(widget.snapshot().count, 3);

    assert_eq!(widget.perform(CounterIntent::Increment), 4);
    assert_eq!(app.get_counter_value().await, 4);
    assert_eq!(widget.center().0.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn screen_picks_up_widget_changes_on_load() {
    let tmp = TempDir::new().unwrap();
    let android = CounterWidgetProvider::new(tmp.path(), NoWidgets);
    let ios = CounterTimelineProvider::new(tmp.path(), Reloads::default());

    android.apply_delta(Direction::Increment);
    ios.perform(CounterIntent::Increment);
    android.apply_delta(Direction::Increment);

    let mut screen = CounterScreen::new(Arc::new(CounterService::without_widgets(tmp.path())));
    screen.load_initial().await;
    assert_eq!(screen.phase(), Phase::Ready);
    assert_eq!(screen.count(), 3);

    screen.decrement().await;
    assert_eq!(ios.read_value(), 2);
}

#[test]
fn widget_decrement_never_goes_negative() {
    let tmp = TempDir::new().unwrap();
    let android = CounterWidgetProvider::new(tmp.path(), NoWidgets);
    let ios = CounterTimelineProvider::new(tmp.path(), Reloads::default());

    for _ in 0..3 {
        assert_eq!(android.apply_delta(Direction::Decrement), 0);
        assert_eq!(ios.perform(CounterIntent::Decrement), 0);
    }
}

#[test]
fn corrupt_file_renders_zero_and_recovers_on_next_write() {
    let tmp = TempDir::new().unwrap();
    let android = CounterWidgetProvider::new(tmp.path(), NoWidgets);
    let shared = tmp.path().join("shared");
    std::fs::create_dir_all(&shared).unwrap();
    std::fs::write(shared.join("counter.json"), br#"{"value": "abc"}"#).unwrap();

    assert_eq!(android.read_value(), 0);
    assert_eq!(android.apply_delta(Direction::Increment), 1);
    assert_eq!(android.read_value(), 1);
}

#[test]
fn interleaved_widgets_last_writer_wins() {
    let tmp = TempDir::new().unwrap();
    let android = CounterWidgetProvider::new(tmp.path(), NoWidgets);
    let ios = CounterTimelineProvider::new(tmp.path(), Reloads::default());

    // both read 0 before either writes: one increment is lost
    let seen_by_android = android.read_value();
    let seen_by_ios = ios.read_value();
    let store = widget_counter::CounterStore::new(tmp.path());
    store.write_value(Direction::Increment.apply(seen_by_android)).unwrap();
    store.write_value(Direction::Increment.apply(seen_by_ios)).unwrap();

    assert_eq!(android.read_value(), 1);
}
