//! UI trait hierarchy for the TUI.
//!
//! This module defines the core UI abstractions:
//! - [`Component`] - Reusable, interactive UI building blocks
//! - [`Screen`] - Full-page views that orchestrate components
//! - [`Modal`] - Ephemeral overlays that block the screen below
//! - [`Handled`] - Result of handling an input event

mod component;
pub mod components;
mod modal;
mod screen;
mod toast;
pub mod widgets;

pub use component::Component;
pub use components::{FieldInput, List, ListEvent, ListRow, TextInput, TextInputEvent};
pub use modal::Modal;
pub use screen::Screen;
pub use toast::{Toast, ToastManager};
#[cfg(test)]
pub use toast::ToastKind;
pub use widgets::Spinner;

/// Result type alias for UI operations.
pub type Result<T> = std::result::Result<T, color_eyre::Report>;

/// Result of handling an input event.
///
/// - `Ignored` - The handler didn't recognize or handle this input
/// - `Consumed` - The input was handled but produced no message
/// - `Event(E)` - The input was handled and produced a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled<E> {
    /// Input was not handled, parent should process it.
    Ignored,
    /// Input was consumed but produced no event.
    Consumed,
    /// Input was consumed and produced an event.
    Event(E),
}

impl<E> Handled<E> {
    /// Returns true if the input was consumed (not ignored).
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

impl<E> From<E> for Handled<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}
