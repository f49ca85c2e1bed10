//! Component trait for reusable UI building blocks.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::ui::{Handled, Result};

/// Interactive UI building block.
///
/// Components are reusable widgets that handle key events and emit
/// generic outputs. They know nothing about the clinic domain.
///
/// # Examples
///
/// - `List` - Selectable list with navigation
/// - `TextInput` - Popup prompt for a single line of text
/// - `FieldInput` - Inline editable form field
pub trait Component {
    /// The output type this component produces (e.g., `ListEvent<T>`)
    type Output;

    /// Handle a key event.
    ///
    /// Returns `Ok(Handled::...)` where:
    /// - `Ignored` - key was not handled, parent should process it
    /// - `Consumed` - key was handled but produced no output
    /// - `Event(output)` - key was handled and produced an output
    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        _ = key;
        Ok(Handled::Ignored)
    }

    /// Called on each tick for animations and time-based updates.
    fn on_tick(&mut self) {}

    /// Render the component to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}
