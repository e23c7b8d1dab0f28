//! Error types for saccoview-forms

use saccoview_core::ValidationErrors;
use thiserror::Error;

/// Failure reported by the create-member collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The remote system rejected the registration
    #[error("Registration rejected: {message}")]
    Rejected { message: String },

    /// The remote system could not be reached
    #[error("Directory unavailable: {message}")]
    Unavailable { message: String },
}

/// Errors produced by the registration form's submission protocol
///
/// Validation errors and collaborator failures are carried as values so
/// the caller can decide between retry and display; the form itself
/// stays editable in either case.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    /// Validation failed; the form was not submitted
    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),

    /// A submission is already in flight; no second create call is made
    #[error("Submission already in progress")]
    SubmissionInProgress,

    /// The registration was already accepted; the form is immutable
    #[error("Registration already submitted")]
    AlreadySubmitted,

    /// complete_submit was called with no submission outstanding
    #[error("No submission in flight")]
    NoSubmissionInFlight,

    /// The collaborator rejected the create call; form state preserved
    #[error(transparent)]
    Rejected(#[from] DirectoryError),
}
