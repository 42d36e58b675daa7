//! A counter shared between an app and its home-screen widgets.
//!
//! There is no channel between the processes: each one reads and
//! overwrites `<documents>/shared/counter.json` and then asks the OS to
//! redraw the widgets. Concurrent writers lose updates (last writer wins);
//! nothing crashes and the file is never left half-merged.

pub mod actions;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod service;
pub mod state;
pub mod topics;

pub const APP_ID: &str = "com.counterwidgetapp";

pub use actions::Direction;
pub use error::StoreError;
pub use service::CounterService;
pub use state::CounterStore;
pub use topics::{CounterChanged, NoopRefresh, WidgetRefresh};
