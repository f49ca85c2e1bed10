//! The TeleClinic landing page and the dialogs it opens.

pub mod catalog;
pub mod conditions;
pub mod landing;
pub mod stats;

pub use landing::{LandingMsg, LandingScreen};
