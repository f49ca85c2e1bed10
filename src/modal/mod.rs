//! Dialog subsystem.
//!
//! Dialogs are registered once from a [`ModalDefinition`], realized into a
//! [`ModalElement`] and driven by the [`ModalManager`]: visibility, scroll
//! locking, input routing, overlay clicks and asynchronous form submission.

mod definition;
mod element;
mod error;
mod form;
mod manager;
mod registry;
mod render;
mod scroll_lock;
mod submission;

pub use definition::{
    ActionEffect, Document, DocumentAction, DocumentSection, FieldKind, FormField, FormSpec,
    ModalBody, ModalDefinition, ModalId, SectionContent, SelectOption,
};
pub use element::{ElementEvent, ModalElement};
pub use error::{ModalError, SubmitError};
pub use form::{FormData, FormState};
pub use manager::ModalManager;
pub use registry::ModalRegistry;
pub use scroll_lock::ScrollLock;
pub use submission::{SimulatedSubmitter, SubmissionOutcome, SubmissionReport, Submitter};
