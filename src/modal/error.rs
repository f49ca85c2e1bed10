use thiserror::Error;

use crate::modal::ModalId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModalError {
    #[error("a dialog with id `{0}` is already registered")]
    DuplicateId(ModalId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The receiving side refused the data. Carries the reason shown to the user.
    #[error("{0}")]
    Rejected(String),
}
