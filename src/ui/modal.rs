//! Modal trait for ephemeral overlay dialogs.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::ui::{Handled, Result};

/// Ephemeral overlay that blocks the screen below.
///
/// Modals are transient views for specific tasks like signing in or
/// booking a consultation. They capture all keys until dismissed.
pub trait Modal {
    /// The message type this modal emits to its owner.
    type Msg;

    /// Handle a key event.
    ///
    /// Returns `Ok(Handled::...)` where:
    /// - `Ignored` - key was not handled (unusual for modals)
    /// - `Consumed` - key was handled but produced no message
    /// - `Event(msg)` - key was handled and produced a message
    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Msg>>;

    /// Render the modal (typically as a centered overlay).
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Title shown in the modal header (optional).
    fn title(&self) -> Option<&str> {
        None
    }
}
