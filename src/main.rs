use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use widget_counter::actions::android::{AppWidgetManager, CounterWidgetProvider, RemoteViews};
use widget_counter::actions::ios::{CounterIntent, CounterTimelineProvider, WidgetCenter};
use widget_counter::actions::screen::CounterScreen;
use widget_counter::actions::{Direction, ids};
use widget_counter::config::Config;
use widget_counter::render::{DESCRIPTION, DISPLAY_NAME, WidgetFamily};
use widget_counter::{CounterChanged, CounterService, WidgetRefresh, logging};

/// Drive the shared counter the way the app or a widget process would.
#[derive(Parser, Debug)]
#[command(name = "counter", version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Documents directory holding `shared/counter.json`
    #[arg(long)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stored value
    Show,
    /// Act as the app's counter screen
    App {
        #[arg(value_enum)]
        action: AppAction,
    },
    /// Act as a widget extension
    Widget {
        #[arg(value_enum)]
        platform: Platform,
        #[arg(value_enum)]
        action: WidgetAction,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AppAction {
    Increment,
    Decrement,
    Reset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Platform {
    Android,
    Ios,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WidgetAction {
    Increment,
    Decrement,
    Render,
}

/// Launcher with a single placed widget; updates only go to the log.
struct HostLauncher;

impl AppWidgetManager for HostLauncher {
    fn app_widget_ids(&self) -> Vec<i32> {
        vec![1]
    }

    fn update_app_widget(&self, widget_id: i32, views: RemoteViews) {
        info!(provider = ids::ANDROID_PROVIDER, widget_id, text = %views.counter_text, "widget updated");
    }
}

struct HostWidgetCenter;

impl WidgetCenter for HostWidgetCenter {
    fn reload_all_timelines(&self) {
        info!(kind = ids::IOS_WIDGET_KIND, "timelines reloaded");
    }
}

/// Fans one refresh request out to every platform's widgets.
struct AllWidgets(Vec<Arc<dyn WidgetRefresh>>);

impl WidgetRefresh for AllWidgets {
    fn reload_all(&self, change: CounterChanged) {
        for w in &self.0 {
            w.reload_all(change);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    logging::init(&config.log.filter);

    let root = match cli.root {
        Some(root) => root,
        None => config.storage_root()?,
    };
    info!(root = %root.display(), "using storage root");

    let android = Arc::new(CounterWidgetProvider::new(&root, HostLauncher));
    let ios = Arc::new(
        CounterTimelineProvider::new(&root, HostWidgetCenter)
            .with_refresh_interval(config.widget.refresh_interval())
            .with_interactive(config.widget.interactive),
    );

    match cli.command {
        Command::Show => {
            let service = CounterService::without_widgets(&root);
            match service.store().read_record() {
                Ok(Some(record)) => info!(last_updated = record.last_updated, "stored record"),
                Ok(None) => info!("nothing stored yet"),
                Err(e) => warn!(error = %e, "stored record is unreadable"),
            }
            println!("{}", service.get_counter_value().await);
        }
        Command::App { action } => {
            let android_refresh: Arc<dyn WidgetRefresh> = android.clone();
            let ios_refresh: Arc<dyn WidgetRefresh> = ios.clone();
            let widgets = AllWidgets(vec![android_refresh, ios_refresh]);
            let service = Arc::new(CounterService::new(&root, Arc::new(widgets)));
            let mut screen = CounterScreen::new(service);

            screen.load_initial().await;
            if let Some(alert) = screen.take_alert() {
                eprintln!("{}: {}", alert.title, alert.message);
            }
            match action {
                AppAction::Increment => screen.increment().await,
                AppAction::Decrement => screen.decrement().await,
                AppAction::Reset => match screen.request_reset() {
                    Some(prompt) => screen.confirm_reset(prompt).await,
                    None => None,
                },
            };
            println!("{}", screen.count());
        }
        Command::Widget { platform, action } => {
            let value = match (platform, action) {
                (Platform::Android, WidgetAction::Increment) => android.apply_delta(Direction::Increment),
                (Platform::Android, WidgetAction::Decrement) => android.apply_delta(Direction::Decrement),
                (Platform::Android, WidgetAction::Render) => {
                    android.on_update(&android.manager().app_widget_ids());
                    android.read_value()
                }
                (Platform::Ios, WidgetAction::Increment) => ios.perform(CounterIntent::Increment),
                (Platform::Ios, WidgetAction::Decrement) => ios.perform(CounterIntent::Decrement),
                (Platform::Ios, WidgetAction::Render) => {
                    let timeline = ios.timeline(SystemTime::now());
                    let entry = timeline.entries.first().copied().unwrap_or_else(|| ios.placeholder());
                    let view = ios.render(&entry, WidgetFamily::Small);
                    info!(
                        widget = DISPLAY_NAME,
                        description = DESCRIPTION,
                        title = view.title,
                        size = view.font_size,
                        "widget rendered"
                    );
                    entry.count
                }
            };
            println!("{value}");
        }
    }

    Ok(())
}
