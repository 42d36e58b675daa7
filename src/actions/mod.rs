pub mod android;
pub mod ios;
pub mod screen;

pub mod ids {
    use crate::APP_ID;

    pub const ACTION_INCREMENT: &str = const_format::concatcp!(APP_ID, ".INCREMENT");
    pub const ACTION_DECREMENT: &str = const_format::concatcp!(APP_ID, ".DECREMENT");
    pub const ANDROID_PROVIDER: &str = const_format::concatcp!(APP_ID, ".CounterWidgetProvider");
    pub const IOS_WIDGET_KIND: &str = "CounterWidget";
}

/// What a widget control asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Increment,
    Decrement,
}

impl Direction {
    /// Next value from the one just read. Decrement stops at 0.
    pub fn apply(self, current: i64) -> i64 {
        match self {
            Direction::Increment => current.saturating_add(1),
            Direction::Decrement => current.saturating_sub(1).max(0),
        }
    }
}
