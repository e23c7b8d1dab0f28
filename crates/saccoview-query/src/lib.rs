//! Paged, filtered list controllers
//!
//! [`PagedListController`] owns the page, page size, and filter state of
//! one list view and correlates every fetch with a request epoch so
//! out-of-order responses can never overwrite newer ones. The rows come
//! from a [`PagedQuery`] collaborator; [`InMemoryQuery`] serves fixed
//! row sets for tests and demos.

pub mod controller;
pub mod error;
pub mod memory;

pub use controller::{
    FetchTicket, FilterField, FilterVocabulary, ListState, Page, PagedListController, PagedQuery,
    QueryState, FILTER_ALL,
};
pub use error::{FetchError, QueryError};
pub use memory::{InMemoryQuery, RowFilter};
