//! In-memory page source used by tests and the demo binary

use async_trait::async_trait;
use saccoview_core::{LedgerTransaction, SavingsAccount};
use std::sync::Mutex;

use crate::controller::{FetchTicket, Page, PagedQuery};
use crate::error::FetchError;

/// Rows that can be matched against a filter selection
pub trait RowFilter {
    /// Does this row satisfy `key = value`?
    ///
    /// Unknown keys match nothing; the vocabulary is expected to keep
    /// them out before a ticket is cut.
    fn matches(&self, key: &str, value: &str) -> bool;
}

impl RowFilter for SavingsAccount {
    fn matches(&self, key: &str, value: &str) -> bool {
        match key {
            "status" => self.status.to_string() == value,
            _ => false,
        }
    }
}

impl RowFilter for LedgerTransaction {
    fn matches(&self, key: &str, value: &str) -> bool {
        match key {
            "status" => self.status.to_string() == value,
            "transaction_type" => self.transaction_type.to_string() == value,
            _ => false,
        }
    }
}

/// A page source backed by a fixed row set
///
/// Applies the ticket's filters and pagination the way the remote API
/// would, and records every ticket it serves.
pub struct InMemoryQuery<T> {
    rows: Vec<T>,
    fail_with: Option<String>,
    served: Mutex<Vec<FetchTicket>>,
}

impl<T> InMemoryQuery<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            fail_with: None,
            served: Mutex::new(Vec::new()),
        }
    }

    /// A source that fails every fetch
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            fail_with: Some(message.into()),
            served: Mutex::new(Vec::new()),
        }
    }

    /// Tickets served so far, in arrival order
    pub fn served(&self) -> Vec<FetchTicket> {
        self.served.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl<T> PagedQuery<T> for InMemoryQuery<T>
where
    T: RowFilter + Clone + Send + Sync,
{
    async fn fetch(&self, ticket: &FetchTicket) -> Result<Page<T>, FetchError> {
        if let Ok(mut served) = self.served.lock() {
            served.push(ticket.clone());
        }
        if let Some(message) = &self.fail_with {
            return Err(FetchError::new(message.clone()));
        }

        let matching: Vec<T> = self
            .rows
            .iter()
            .filter(|row| ticket.filters.iter().all(|(k, v)| row.matches(k, v)))
            .cloned()
            .collect();
        let total_count = matching.len() as u64;

        // Ticket pages are 1-based; saturate so an absurd page number
        // yields an empty page instead of overflowing
        let start = ticket
            .page
            .saturating_sub(1)
            .saturating_mul(ticket.page_size);
        let rows = matching
            .into_iter()
            .skip(start)
            .take(ticket.page_size)
            .collect();

        Ok(Page { rows, total_count })
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{FilterVocabulary, ListState, PagedListController};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use saccoview_core::{TransactionStatus, TransactionType};

    fn transaction(id: u64, status: TransactionStatus, kind: TransactionType) -> LedgerTransaction {
        LedgerTransaction {
            id,
            transaction_ref: format!("TXN-2024-{:06}", id),
            transaction_type: kind,
            amount: Decimal::new(10_000, 0),
            payment_method: "MOBILE_MONEY".to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    fn sample_rows() -> Vec<LedgerTransaction> {
        vec![
            transaction(1, TransactionStatus::Completed, TransactionType::Deposit),
            transaction(2, TransactionStatus::Pending, TransactionType::Deposit),
            transaction(3, TransactionStatus::Completed, TransactionType::Withdrawal),
            transaction(4, TransactionStatus::Failed, TransactionType::LoanRepayment),
            transaction(5, TransactionStatus::Completed, TransactionType::Deposit),
        ]
    }

    #[tokio::test]
    async fn test_fetch_applies_filters_and_pagination() {
        let query = InMemoryQuery::new(sample_rows());
        let mut c = PagedListController::new(FilterVocabulary::transactions(), vec![2, 10], 2)
            .unwrap();

        let ticket = c.set_filter("status", "COMPLETED").unwrap();
        assert!(c.dispatch(ticket, &query).await);
        assert_eq!(c.total_count(), 3);
        assert_eq!(c.rows().len(), 2);
        assert_eq!(c.rows()[0].id, 1);
        assert_eq!(c.rows()[1].id, 3);

        // Second page holds the remainder
        let ticket = c.set_page(1);
        assert!(c.dispatch(ticket, &query).await);
        assert_eq!(c.rows().len(), 1);
        assert_eq!(c.rows()[0].id, 5);
    }

    #[tokio::test]
    async fn test_combined_filters_intersect() {
        let query = InMemoryQuery::new(sample_rows());
        let mut c = PagedListController::new(FilterVocabulary::transactions(), vec![10], 10)
            .unwrap();

        c.set_filter("status", "COMPLETED").unwrap();
        let ticket = c.set_filter("transaction_type", "DEPOSIT").unwrap();
        assert!(c.dispatch(ticket, &query).await);
        assert_eq!(c.total_count(), 2);
        assert_eq!(c.rows()[0].id, 1);
        assert_eq!(c.rows()[1].id, 5);
    }

    #[tokio::test]
    async fn test_failing_source_reports_fetch_error() {
        let query = InMemoryQuery::<LedgerTransaction>::failing("backend down");
        let mut c = PagedListController::new(FilterVocabulary::transactions(), vec![10], 10)
            .unwrap();

        assert!(c.run(&query).await);
        assert_eq!(c.list_state(), ListState::LoadedWithError);
        assert_eq!(c.error().unwrap().message, "backend down");
    }

    #[tokio::test]
    async fn test_fetch_past_the_end_yields_empty_page() {
        let query = InMemoryQuery::new(sample_rows());
        let ticket = FetchTicket {
            epoch: 1,
            page: usize::MAX,
            page_size: 10,
            filters: Vec::new(),
        };
        let page = query.fetch(&ticket).await.unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.total_count, 5);
    }

    #[tokio::test]
    async fn test_served_tickets_carry_wire_page() {
        let query = InMemoryQuery::new(sample_rows());
        let mut c = PagedListController::new(FilterVocabulary::transactions(), vec![2, 10], 2)
            .unwrap();

        let ticket = c.set_page(1);
        c.dispatch(ticket, &query).await;

        let served = query.served();
        assert_eq!(served.len(), 1);
        assert_eq!(served[0].page, 2);
        assert!(served[0].filters.is_empty());
    }
}
