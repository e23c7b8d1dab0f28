//! Member registration form model
//!
//! A [`RegistrationForm`] holds one member draft plus an ordered list
//! of next-of-kin drafts whose percentage shares must sum to exactly
//! 100. Validation is pure and field-scoped; submission goes through
//! the [`MemberDirectory`] collaborator exactly once per attempt.

pub mod directory;
pub mod error;
pub mod form;

pub use directory::{InMemoryDirectory, MemberDirectory};
pub use error::{DirectoryError, FormError};
pub use form::{
    FieldPath, FormStatus, KinDraft, KinField, MemberDraft, MemberField, RegistrationForm,
    RegistrationRequest, SubmitRequest,
};
