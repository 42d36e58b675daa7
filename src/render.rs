pub const WIDGET_TITLE: &str = "Counter";
pub const DISPLAY_NAME: &str = "Counter Widget";
pub const DESCRIPTION: &str = "Keep track of your counter right from your home screen.";

/// Shown instead of +/- on systems where widget buttons cannot run code.
pub const STATIC_HINT: &str = "Tap app to update";

/// Home-screen widget sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WidgetFamily {
    #[default]
    Small,
    Medium,
    Large,
}

impl WidgetFamily {
    pub const ALL: [WidgetFamily; 3] = [WidgetFamily::Small, WidgetFamily::Medium, WidgetFamily::Large];

    /// Point size of the count.
    pub fn count_font_size(self) -> f32 {
        match self {
            WidgetFamily::Small => 32.0,
            WidgetFamily::Medium => 40.0,
            WidgetFamily::Large => 48.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Controls {
    /// Decrement and increment buttons wired to the widget's own actions.
    Buttons,
    Hint(&'static str),
}

/// Everything one widget instance draws.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetView {
    pub title: &'static str,
    pub count_text: String,
    pub font_size: f32,
    pub controls: Controls,
}

/// Lay out `value` for a widget of the given family.
pub fn render_number(value: i64, family: WidgetFamily, interactive: bool) -> WidgetView {
    WidgetView {
        title: WIDGET_TITLE,
        count_text: value.to_string(),
        font_size: family.count_font_size(),
        controls: if interactive { Controls::Buttons } else { Controls::Hint(STATIC_HINT) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_grows_with_family() {
        let sizes: Vec<f32> = WidgetFamily::ALL.iter().map(|f| f.count_font_size()).collect();
        assert_eq!(sizes, vec![32.0, 40.0, 48.0]);
    }

    #[test]
    fn static_widgets_show_hint() {
        let v = render_number(7, WidgetFamily::Medium, false);
        assert_eq!(v.count_text, "7");
        assert_eq!(v.title, "Counter");
        assert_eq!(v.controls, Controls::Hint(STATIC_HINT));

        let v = render_number(7, WidgetFamily::Medium, true);
        assert_eq!(v.controls, Controls::Buttons);
    }
}
