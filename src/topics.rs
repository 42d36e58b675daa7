/// Sent with every refresh request after a local write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterChanged {
    pub value: i64,
}

/// The platform's "redraw every widget" primitive.
///
/// Fire-and-forget: the caller never learns whether anything redrew.
/// Implementations must not block on the widget actually rendering.
pub trait WidgetRefresh: Send + Sync {
    fn reload_all(&self, change: CounterChanged);
}

/// Used where the host has no widgets to poke.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRefresh;

impl WidgetRefresh for NoopRefresh {
    fn reload_all(&self, _change: CounterChanged) {}
}
