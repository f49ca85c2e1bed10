use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use throbber_widgets_tui::WhichUse::Spin;
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState};

use crate::Theme;
use crate::ui::Component;

/// Animated busy indicator with an optional label, centered in its area.
pub struct Spinner {
    throbber_state: ThrobberState,
    label: Option<String>,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            throbber_state: ThrobberState::default(),
            label: None,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Columns needed to draw the spinner and its label.
    pub fn width(&self) -> u16 {
        // Throbber glyph, then a space before the label
        let label_width = self
            .label
            .as_ref()
            .map_or(0, |label| label.chars().count() + 1);
        u16::try_from(1 + label_width).unwrap_or(u16::MAX)
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Spinner {
    type Output = ();

    fn on_tick(&mut self) {
        self.throbber_state.calc_next();
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut throbber = Throbber::default()
            .throbber_set(BRAILLE_SIX)
            .use_type(Spin)
            .throbber_style(Style::default().fg(theme.lavender()))
            .style(Style::default().fg(theme.subtext0()));

        if let Some(label) = &self.label {
            throbber = throbber.label(label.clone());
        }

        let area = area.centered(Constraint::Length(self.width()), Constraint::Length(1));
        frame.render_stateful_widget(throbber, area, &mut self.throbber_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_includes_label() {
        let mut spinner = Spinner::new();
        assert_eq!(spinner.width(), 1);

        spinner.set_label("Wird verarbeitet...");
        assert_eq!(spinner.width(), 21);
    }
}
