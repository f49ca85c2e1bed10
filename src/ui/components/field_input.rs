use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::ui::{Component, Handled, Result};

/// Inline editable text field used inside dialog forms.
///
/// Unlike [`TextInput`](super::TextInput) this does not draw its own popup;
/// the owning form lays fields out and tells the field whether it has focus.
/// The cursor is a character index, so umlauts and other multi-byte
/// characters edit correctly.
pub struct FieldInput {
    value: String,
    cursor: usize,
    placeholder: Option<String>,
    masked: bool,
    multiline: bool,
    focused: bool,
}

impl FieldInput {
    pub const fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: None,
            masked: false,
            multiline: false,
            focused: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Render every character as `*`.
    pub const fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Allow line breaks with Enter.
    pub const fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn delete_char_before_cursor(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    fn delete_char_at_cursor(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    fn delete_word_before_cursor(&mut self) {
        let chars: Vec<char> = self.value.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        let start = self.byte_index(pos);
        let end = self.byte_index(self.cursor);
        self.value.drain(start..end);
        self.cursor = pos;
    }

    fn display_value(&self) -> String {
        if self.masked {
            "*".repeat(self.len())
        } else {
            self.value.clone()
        }
    }

    fn render_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let input_style = Style::default().fg(theme.text());
        let cursor_style = Style::default()
            .fg(theme.base())
            .bg(theme.text())
            .add_modifier(Modifier::BOLD);
        let placeholder_style = Style::default().fg(theme.overlay0());

        if self.value.is_empty() {
            let mut spans = Vec::new();
            if self.focused {
                spans.push(Span::styled(" ", cursor_style));
            }
            if let Some(placeholder) = &self.placeholder {
                spans.push(Span::styled(placeholder.clone(), placeholder_style));
            }
            return vec![Line::from(spans)];
        }

        let display = self.display_value();
        let mut lines = Vec::new();
        let mut spans = Vec::new();
        let mut current = String::new();
        let mut cursor_drawn = false;

        for (index, c) in display.chars().enumerate() {
            if self.focused && index == self.cursor {
                spans.push(Span::styled(std::mem::take(&mut current), input_style));
                let glyph = if c == '\n' { ' ' } else { c };
                spans.push(Span::styled(glyph.to_string(), cursor_style));
                cursor_drawn = true;
                if c == '\n' {
                    lines.push(Line::from(std::mem::take(&mut spans)));
                }
                continue;
            }
            if c == '\n' {
                spans.push(Span::styled(std::mem::take(&mut current), input_style));
                lines.push(Line::from(std::mem::take(&mut spans)));
            } else {
                current.push(c);
            }
        }

        spans.push(Span::styled(current, input_style));
        if self.focused && !cursor_drawn {
            spans.push(Span::styled(" ", cursor_style));
        }
        lines.push(Line::from(spans));
        lines
    }
}

impl Default for FieldInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for FieldInput {
    type Output = ();

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        Ok(match (key.code, key.modifiers) {
            (KeyCode::Enter, _) if self.multiline => {
                self.insert_char('\n');
                Handled::Consumed
            }

            // Delete
            (KeyCode::Backspace, KeyModifiers::ALT) | (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                self.delete_word_before_cursor();
                Handled::Consumed
            }
            (KeyCode::Backspace, _) => {
                self.delete_char_before_cursor();
                Handled::Consumed
            }
            (KeyCode::Delete, _) => {
                self.delete_char_at_cursor();
                Handled::Consumed
            }

            // Navigation
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                Handled::Consumed
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.len());
                Handled::Consumed
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                Handled::Consumed
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.len();
                Handled::Consumed
            }

            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.clear();
                Handled::Consumed
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                Handled::Consumed
            }

            _ => Handled::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let background = if self.focused {
            theme.surface1()
        } else {
            theme.surface0()
        };
        let paragraph =
            Paragraph::new(self.render_lines(theme)).style(Style::default().bg(background));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut FieldInput, code: KeyCode) {
        input
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    fn type_text(input: &mut FieldInput, text: &str) {
        for c in text.chars() {
            press(input, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_edits_multibyte_text() {
        let mut input = FieldInput::new();
        type_text(&mut input, "Übelkeit");
        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.value(), "belkeit");

        press(&mut input, KeyCode::Char('Ü'));
        press(&mut input, KeyCode::End);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "Übelkei");
    }

    #[test]
    fn test_delete_word() {
        let mut input = FieldInput::new();
        type_text(&mut input, "starke Kopfschmerzen");
        input
            .handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::ALT))
            .unwrap();
        assert_eq!(input.value(), "starke ");
    }

    #[test]
    fn test_enter_only_consumed_when_multiline() {
        let mut single = FieldInput::new();
        let result = single
            .handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(result, Handled::Ignored);

        let mut multi = FieldInput::new().multiline();
        type_text(&mut multi, "a");
        press(&mut multi, KeyCode::Enter);
        type_text(&mut multi, "b");
        assert_eq!(multi.value(), "a\nb");
        assert_eq!(multi.render_lines(&Theme::default()).len(), 2);
    }

    #[test]
    fn test_masked_display() {
        let mut input = FieldInput::new().masked();
        type_text(&mut input, "geheim");
        assert_eq!(input.display_value(), "******");
        assert_eq!(input.value(), "geheim");
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut input = FieldInput::new();
        input.set_value("max@example.com");
        input.clear();
        type_text(&mut input, "x");
        assert_eq!(input.value(), "x");
    }
}
