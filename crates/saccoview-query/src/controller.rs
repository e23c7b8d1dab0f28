//! Paged list controller with stale-response protection
//!
//! The controller owns the query state of one list view: current page,
//! page size, and a set of named filters drawn from a fixed vocabulary.
//! Every state change bumps a request epoch and yields a [`FetchTicket`]
//! describing the page to load; the caller performs the fetch however
//! it likes and feeds the outcome back through [`PagedListController::apply`].
//! A response whose epoch no longer matches the controller's is stale
//! and is discarded without touching the visible rows.
//!
//! Pages are 0-based internally and 1-based on the wire, matching the
//! ledger API's pagination scheme.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{FetchError, QueryError};

/// Filter value meaning "do not constrain this dimension"
pub const FILTER_ALL: &str = "all";

// ==================== Vocabulary ====================

/// One filter dimension and its allowed values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField {
    pub key: String,
    /// Allowed values, not counting the implicit "all"
    pub values: Vec<String>,
}

/// The set of filters a list view exposes
///
/// Every dimension implicitly allows "all"; a dimension set to "all" is
/// omitted from the wire request entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterVocabulary {
    fields: Vec<FilterField>,
}

impl FilterVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter dimension with its allowed values
    pub fn with_field(mut self, key: &str, values: &[&str]) -> Self {
        self.fields.push(FilterField {
            key: key.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        });
        self
    }

    /// Vocabulary of the transactions list: status and transaction type
    pub fn transactions() -> Self {
        Self::new()
            .with_field("status", &["COMPLETED", "PENDING", "FAILED"])
            .with_field(
                "transaction_type",
                &["DEPOSIT", "WITHDRAWAL", "LOAN_DISBURSEMENT", "LOAN_REPAYMENT"],
            )
    }

    /// Vocabulary of the savings accounts list: status only
    pub fn accounts() -> Self {
        Self::new().with_field("status", &["ACTIVE", "DORMANT", "CLOSED"])
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    fn field(&self, key: &str) -> Option<&FilterField> {
        self.fields.iter().find(|f| f.key == key)
    }

    fn allows(&self, key: &str, value: &str) -> Result<(), QueryError> {
        let field = self.field(key).ok_or_else(|| QueryError::UnknownFilter {
            key: key.to_string(),
        })?;
        if value == FILTER_ALL || field.values.iter().any(|v| v == value) {
            Ok(())
        } else {
            Err(QueryError::InvalidFilterValue {
                key: key.to_string(),
                value: value.to_string(),
            })
        }
    }
}

// ==================== Query state and tickets ====================

/// The query parameters a list view is currently showing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Current page, 0-based
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
    /// Filter selections keyed by dimension; "all" means unconstrained
    pub filters: BTreeMap<String, String>,
}

/// A request for one page of rows, correlated to the controller state
/// it was derived from
///
/// Whoever performs the fetch must hand the outcome back together with
/// this ticket's epoch; a mismatch marks the response as stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTicket {
    /// Epoch of the controller state this ticket was cut from
    pub epoch: u64,
    /// Page to request, 1-based as the wire expects
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
    /// Active filters; dimensions set to "all" are omitted
    pub filters: Vec<(String, String)>,
}

/// One fetched page of rows
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// Total row count across all pages under the active filters
    pub total_count: u64,
}

/// External collaborator that serves pages of rows
#[async_trait]
pub trait PagedQuery<T: Send>: Send + Sync {
    async fn fetch(&self, ticket: &FetchTicket) -> Result<Page<T>, FetchError>;
}

/// Where a list view is in its load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// Nothing requested yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// Showing the rows of the latest successful fetch
    Loaded,
    /// The latest fetch failed; previous good rows still showing
    LoadedWithError,
}

// ==================== Controller ====================

/// State controller for one paged, filtered list view
///
/// Mutations never fetch by themselves; they return a [`FetchTicket`]
/// for the caller to dispatch. Responses arriving out of order are
/// handled by epoch comparison in [`Self::apply`], so only the outcome
/// of the newest request ever lands in the visible rows.
///
/// There is no timeout: a fetch whose outcome is never applied leaves
/// the controller loading until the next mutation supersedes it.
#[derive(Debug)]
pub struct PagedListController<T> {
    vocabulary: FilterVocabulary,
    page_size_options: Vec<usize>,
    state: QueryState,
    epoch: u64,
    rows: Vec<T>,
    total_count: u64,
    loading: bool,
    error: Option<FetchError>,
    has_loaded: bool,
}

impl<T> PagedListController<T> {
    /// Build a controller starting at page 0 with every filter at "all"
    pub fn new(
        vocabulary: FilterVocabulary,
        page_size_options: Vec<usize>,
        default_page_size: usize,
    ) -> Result<Self, QueryError> {
        if !page_size_options.contains(&default_page_size) {
            return Err(QueryError::InvalidPageSize {
                size: default_page_size,
            });
        }
        let filters = vocabulary
            .fields()
            .iter()
            .map(|f| (f.key.clone(), FILTER_ALL.to_string()))
            .collect();
        Ok(Self {
            vocabulary,
            page_size_options,
            state: QueryState {
                page: 0,
                page_size: default_page_size,
                filters,
            },
            epoch: 0,
            rows: Vec::new(),
            total_count: 0,
            loading: false,
            error: None,
            has_loaded: false,
        })
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    pub fn list_state(&self) -> ListState {
        if self.loading {
            ListState::Loading
        } else if self.error.is_some() {
            ListState::LoadedWithError
        } else if self.has_loaded {
            ListState::Loaded
        } else {
            ListState::Idle
        }
    }

    /// Cut a ticket for the current state under a fresh epoch
    fn ticket(&mut self) -> FetchTicket {
        self.epoch += 1;
        self.loading = true;
        FetchTicket {
            epoch: self.epoch,
            // 1-based on the wire
            page: self.state.page + 1,
            page_size: self.state.page_size,
            filters: self
                .state
                .filters
                .iter()
                .filter(|(_, v)| v.as_str() != FILTER_ALL)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Move to a different page (0-based)
    pub fn set_page(&mut self, page: usize) -> FetchTicket {
        self.state.page = page;
        self.ticket()
    }

    /// Change the page size; resets to the first page
    pub fn set_page_size(&mut self, size: usize) -> Result<FetchTicket, QueryError> {
        if !self.page_size_options.contains(&size) {
            return Err(QueryError::InvalidPageSize { size });
        }
        self.state.page_size = size;
        self.state.page = 0;
        Ok(self.ticket())
    }

    /// Change a filter selection; resets to the first page
    ///
    /// The key must belong to the vocabulary and the value must be one
    /// of its allowed values or "all". Rejected changes leave the state
    /// and epoch untouched.
    pub fn set_filter(&mut self, key: &str, value: &str) -> Result<FetchTicket, QueryError> {
        self.vocabulary.allows(key, value)?;
        self.state.filters.insert(key.to_string(), value.to_string());
        self.state.page = 0;
        Ok(self.ticket())
    }

    /// Re-request the current page without changing any parameter
    pub fn refresh(&mut self) -> FetchTicket {
        self.ticket()
    }

    /// Land the outcome of a fetch
    ///
    /// Returns false when the ticket's epoch is stale; stale outcomes
    /// are discarded without touching rows, error, or loading state.
    /// A failed current fetch records the error but keeps the previous
    /// good rows and total count.
    pub fn apply(&mut self, epoch: u64, outcome: Result<Page<T>, FetchError>) -> bool {
        if epoch != self.epoch {
            log::debug!(
                "discarding stale response for epoch {} (current {})",
                epoch,
                self.epoch
            );
            return false;
        }
        self.loading = false;
        self.has_loaded = true;
        match outcome {
            Ok(page) => {
                self.rows = page.rows;
                self.total_count = page.total_count;
                self.error = None;
            }
            Err(error) => {
                log::warn!("page fetch failed: {}", error);
                self.error = Some(error);
            }
        }
        true
    }

    /// Dispatch a ticket through the collaborator and land the outcome
    pub async fn dispatch(&mut self, ticket: FetchTicket, query: &dyn PagedQuery<T>) -> bool
    where
        T: Send,
    {
        let outcome = query.fetch(&ticket).await;
        self.apply(ticket.epoch, outcome)
    }

    /// Refresh the current page through the collaborator
    pub async fn run(&mut self, query: &dyn PagedQuery<T>) -> bool
    where
        T: Send,
    {
        let ticket = self.refresh();
        self.dispatch(ticket, query).await
    }
}

// ==================== Tests ====================
