//! Domain models and shared validation for saccoview
//!
//! This crate holds the member-registration and ledger row types, the
//! enumerated vocabularies used by the remote API, and the field-level
//! validation helpers shared by the form model and list controllers.

pub mod error;
pub mod models;
pub mod types;
pub mod validate;

pub use error::{FieldError, ValidationErrors};
pub use models::{CreatedId, LedgerTransaction, MemberRecord, NextOfKin, SavingsAccount};
pub use types::{
    AccountStatus, EmploymentStatus, MaritalStatus, MembershipType, Relationship,
    TransactionStatus, TransactionType,
};
