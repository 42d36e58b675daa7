use std::sync::Arc;

use tracing::{info, warn};

use crate::service::CounterService;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Before the first read completes. Controls are disabled.
    Loading,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: &'static str,
}

pub const LOAD_FAILED: Alert = Alert { title: "Error", message: "Failed to load counter value" };

pub const RESET_PROMPT: Alert = Alert {
    title: "Reset Counter",
    message: "Are you sure you want to reset the counter to 0?",
};

/// Handed out by [`CounterScreen::request_reset`]; spend it on
/// [`CounterScreen::confirm_reset`] or drop it to cancel.
#[derive(Debug)]
#[must_use = "dropping the prompt cancels the reset"]
pub struct ResetPrompt {
    _private: (),
}

impl ResetPrompt {
    pub fn alert(&self) -> Alert {
        RESET_PROMPT
    }
}

/// In-app counter screen state.
///
/// Keeps its own copy of the count and updates it before the save lands;
/// a save that fails leaves the screen ahead of the file until the next
/// successful write.
pub struct CounterScreen {
    service: Arc<CounterService>,
    phase: Phase,
    count: i64,
    alert: Option<Alert>,
}

impl CounterScreen {
    pub fn new(service: Arc<CounterService>) -> Self {
        Self { service, phase: Phase::Loading, count: 0, alert: None }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    /// Pending alert, cleared once taken.
    pub fn take_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    /// First read. Moves to `Ready` whatever happens; runs only once.
    pub async fn load_initial(&mut self) {
        if self.phase != Phase::Loading {
            return;
        }
        match self.service.load_counter_value().await {
            Ok(v) => self.count = v,
            Err(e) => {
                warn!(error = %e, "initial counter load failed");
                self.alert = Some(LOAD_FAILED);
            }
        }
        self.phase = Phase::Ready;
        info!(count = self.count, "counter screen ready");
    }

    pub async fn increment(&mut self) -> Option<i64> {
        let next = self.count.saturating_add(1);
        self.commit(next).await
    }

    pub async fn decrement(&mut self) -> Option<i64> {
        // same floor as the widgets' Direction::Decrement
        let next = (self.count.saturating_sub(1)).max(0);
        self.commit(next).await
    }

    pub fn request_reset(&self) -> Option<ResetPrompt> {
        (self.phase == Phase::Ready).then_some(ResetPrompt { _private: () })
    }

    pub async fn confirm_reset(&mut self, _prompt: ResetPrompt) -> Option<i64> {
        self.commit(0).await
    }

    async fn commit(&mut self, next: i64) -> Option<i64> {
        if self.phase != Phase::Ready {
            return None;
        }
        self.count = next;
        self.service.save_counter_value(next).await;
        Some(next)
    }
}
