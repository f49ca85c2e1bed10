//! Screen trait for full-page views.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::ui::{Handled, Result};

/// Full-page view that orchestrates components.
///
/// Screens connect UI interactions to the clinic domain by translating
/// component events into messages for the app, such as "open the login
/// dialog" or "show information about a condition".
pub trait Screen {
    /// The message type this screen emits (e.g., `LandingMsg`)
    type Msg;

    /// Handle a key event, possibly emitting a message.
    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Msg>> {
        _ = key;
        Ok(Handled::Ignored)
    }

    /// Called on each tick for animations and time-based updates.
    fn on_tick(&mut self) {}

    /// Render the screen to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}
