//! Core data models for member records and the ledger

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{
    AccountStatus, EmploymentStatus, MaritalStatus, MembershipType, Relationship,
    TransactionStatus, TransactionType,
};

/// A validated, normalized member registration record
///
/// Produced by form validation; owned by the remote system once a
/// registration has been accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// National ID or passport number
    pub national_id: String,
    /// Physical address
    pub physical_address: String,
    /// City
    pub city: String,
    /// District
    pub district: String,
    /// Postal address (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_address: Option<String>,
    /// Occupation
    pub occupation: String,
    /// Employment status
    pub employment_status: EmploymentStatus,
    /// Marital status
    pub marital_status: MaritalStatus,
    /// Membership category
    pub membership_type: MembershipType,
    /// Monthly income (non-negative)
    pub monthly_income: Decimal,
    /// Date of birth (must be in the past)
    pub date_of_birth: NaiveDate,
}

/// A validated next-of-kin (beneficiary) entry
///
/// Next-of-kin entries have no lifecycle of their own: they exist only
/// as part of a registration and are dropped with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextOfKin {
    /// Full name
    pub full_name: String,
    /// Relationship to the member
    pub relationship: Relationship,
    /// Phone number
    pub phone_number: String,
    /// National ID
    pub national_id: String,
    /// Physical address
    pub physical_address: String,
    /// Share of benefits in percent, within [0, 100]
    pub percentage_share: Decimal,
}

/// Identifier assigned by the remote system to an accepted registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedId(pub u64);

impl std::fmt::Display for CreatedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A savings account row as returned by the accounts list API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAccount {
    /// Record identifier
    pub id: u64,
    /// Account number (e.g., "SAV-2024-00017")
    pub account_number: String,
    /// Account product type (e.g., "REGULAR", "FIXED")
    pub account_type: String,
    /// Current balance
    pub balance: Decimal,
    /// Account status
    pub status: AccountStatus,
    /// Annual interest rate in percent
    pub interest_rate: Decimal,
    /// Date the account was opened
    pub date_opened: NaiveDate,
}

impl SavingsAccount {
    /// Check if the account can transact
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

/// A ledger transaction row as returned by the transactions list API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    /// Record identifier
    pub id: u64,
    /// Human-readable reference (e.g., "TXN-2024-001234")
    pub transaction_ref: String,
    /// Transaction type
    pub transaction_type: TransactionType,
    /// Amount
    pub amount: Decimal,
    /// Payment method (e.g., "MOBILE_MONEY", "CASH")
    pub payment_method: String,
    /// Transaction status
    pub status: TransactionStatus,
    /// When the transaction was created
    pub created_at: DateTime<Utc>,
}

impl LedgerTransaction {
    /// Check if the transaction has reached a terminal status
    pub fn is_final(&self) -> bool {
        matches!(
            self.status,
            TransactionStatus::Completed | TransactionStatus::Failed
        )
    }

    /// Check if the transaction moves money out of the account
    pub fn is_outflow(&self) -> bool {
        matches!(
            self.transaction_type,
            TransactionType::Withdrawal | TransactionType::LoanRepayment
        )
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account(status: AccountStatus) -> SavingsAccount {
        SavingsAccount {
            id: 1,
            account_number: "SAV-2024-00017".to_string(),
            account_type: "REGULAR".to_string(),
            balance: Decimal::new(150_000, 0),
            status,
            interest_rate: Decimal::new(75, 1),
            date_opened: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_account_is_active() {
        assert!(sample_account(AccountStatus::Active).is_active());
        assert!(!sample_account(AccountStatus::Dormant).is_active());
        assert!(!sample_account(AccountStatus::Closed).is_active());
    }

    #[test]
    fn test_transaction_is_final() {
        let mut tx = LedgerTransaction {
            id: 7,
            transaction_ref: "TXN-2024-000007".to_string(),
            transaction_type: TransactionType::Deposit,
            amount: Decimal::new(50_000, 0),
            payment_method: "MOBILE_MONEY".to_string(),
            status: TransactionStatus::Pending,
            created_at: Utc::now(),
        };
        assert!(!tx.is_final());
        tx.status = TransactionStatus::Completed;
        assert!(tx.is_final());
        tx.status = TransactionStatus::Failed;
        assert!(tx.is_final());
    }

    #[test]
    fn test_transaction_is_outflow() {
        let tx = LedgerTransaction {
            id: 8,
            transaction_ref: "TXN-2024-000008".to_string(),
            transaction_type: TransactionType::Withdrawal,
            amount: Decimal::new(20_000, 0),
            payment_method: "CASH".to_string(),
            status: TransactionStatus::Completed,
            created_at: Utc::now(),
        };
        assert!(tx.is_outflow());
    }

    #[test]
    fn test_member_record_serialization() {
        let member = MemberRecord {
            national_id: "CM1234567".to_string(),
            physical_address: "Plot 14, Kira Road".to_string(),
            city: "Kampala".to_string(),
            district: "Central".to_string(),
            postal_address: None,
            occupation: "Teacher".to_string(),
            employment_status: EmploymentStatus::Employed,
            marital_status: MaritalStatus::Married,
            membership_type: MembershipType::Individual,
            monthly_income: Decimal::new(1_200_000, 0),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 20).unwrap(),
        };

        let json = serde_json::to_string(&member).unwrap();
        assert!(json.contains("\"employment_status\":\"EMPLOYED\""));
        assert!(!json.contains("postal_address"));

        let back: MemberRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, member);
    }
}
