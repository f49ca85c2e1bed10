use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear};

use crate::Theme;
use crate::ui::{Component, FieldInput, Handled, Result};

pub enum TextInputEvent {
    Submitted(String),
    Cancelled,
}

/// Centered popup prompting for a single line of text.
pub struct TextInput {
    label: String,
    field: FieldInput,
}

impl TextInput {
    pub fn new(label: impl Into<String>) -> Self {
        let mut field = FieldInput::new();
        field.set_focused(true);
        Self {
            label: label.into(),
            field,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.field.set_value(value);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.field = self.field.with_placeholder(placeholder);
        self
    }
}

impl Component for TextInput {
    type Output = TextInputEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        match key.code {
            KeyCode::Enter => Ok(TextInputEvent::Submitted(self.field.value().to_string()).into()),
            KeyCode::Esc => Ok(TextInputEvent::Cancelled.into()),
            _ => {
                self.field.handle_key(key)?;
                // Consume all keys to prevent propagation
                Ok(Handled::Consumed)
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = area.centered(Constraint::Percentage(50), Constraint::Length(3));
        frame.render_widget(Clear, popup_area);

        let title = format!(" {} (Enter to confirm, Esc to cancel) ", self.label);
        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(theme.mauve()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.lavender()))
            .style(Style::default().bg(theme.base()));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);
        self.field.render(frame, inner, theme);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    #[test]
    fn test_submit_returns_typed_value() {
        let mut input = TextInput::new("Suche").with_value("Hals");
        input
            .handle_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE))
            .unwrap();

        let result = input
            .handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        assert!(matches!(
            result,
            Handled::Event(TextInputEvent::Submitted(ref value)) if value == "Halsw"
        ));
    }

    #[test]
    fn test_escape_cancels() {
        let mut input = TextInput::new("Suche");
        let result = input
            .handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
            .unwrap();
        assert!(matches!(result, Handled::Event(TextInputEvent::Cancelled)));
    }
}
