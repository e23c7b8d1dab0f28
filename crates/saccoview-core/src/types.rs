//! Enumerated vocabularies used across member records and the ledger
//!
//! Each enum serializes to the wire form used by the remote API
//! (SCREAMING_SNAKE_CASE) and parses case-insensitively from form input.

use serde::{Deserialize, Serialize};

/// Membership category of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipType {
    Individual,
    Joint,
    Corporate,
}

impl Default for MembershipType {
    fn default() -> Self {
        MembershipType::Individual
    }
}

impl std::str::FromStr for MembershipType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INDIVIDUAL" => Ok(MembershipType::Individual),
            "JOINT" => Ok(MembershipType::Joint),
            "CORPORATE" => Ok(MembershipType::Corporate),
            _ => Err(format!("Invalid membership type: {}", s)),
        }
    }
}

impl std::fmt::Display for MembershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipType::Individual => write!(f, "INDIVIDUAL"),
            MembershipType::Joint => write!(f, "JOINT"),
            MembershipType::Corporate => write!(f, "CORPORATE"),
        }
    }
}

/// Marital status of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl Default for MaritalStatus {
    fn default() -> Self {
        MaritalStatus::Single
    }
}

impl std::str::FromStr for MaritalStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SINGLE" => Ok(MaritalStatus::Single),
            "MARRIED" => Ok(MaritalStatus::Married),
            "DIVORCED" => Ok(MaritalStatus::Divorced),
            "WIDOWED" => Ok(MaritalStatus::Widowed),
            _ => Err(format!("Invalid marital status: {}", s)),
        }
    }
}

impl std::fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaritalStatus::Single => write!(f, "SINGLE"),
            MaritalStatus::Married => write!(f, "MARRIED"),
            MaritalStatus::Divorced => write!(f, "DIVORCED"),
            MaritalStatus::Widowed => write!(f, "WIDOWED"),
        }
    }
}

/// Employment status of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Retired,
    Student,
    Other,
}

impl Default for EmploymentStatus {
    fn default() -> Self {
        EmploymentStatus::Employed
    }
}

impl std::str::FromStr for EmploymentStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EMPLOYED" => Ok(EmploymentStatus::Employed),
            "SELF_EMPLOYED" => Ok(EmploymentStatus::SelfEmployed),
            "UNEMPLOYED" => Ok(EmploymentStatus::Unemployed),
            "RETIRED" => Ok(EmploymentStatus::Retired),
            "STUDENT" => Ok(EmploymentStatus::Student),
            "OTHER" => Ok(EmploymentStatus::Other),
            _ => Err(format!("Invalid employment status: {}", s)),
        }
    }
}

impl std::fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmploymentStatus::Employed => write!(f, "EMPLOYED"),
            EmploymentStatus::SelfEmployed => write!(f, "SELF_EMPLOYED"),
            EmploymentStatus::Unemployed => write!(f, "UNEMPLOYED"),
            EmploymentStatus::Retired => write!(f, "RETIRED"),
            EmploymentStatus::Student => write!(f, "STUDENT"),
            EmploymentStatus::Other => write!(f, "OTHER"),
        }
    }
}

/// Relationship between a member and a next-of-kin entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relationship {
    Spouse,
    Child,
    Parent,
    Sibling,
    Other,
}

impl Default for Relationship {
    fn default() -> Self {
        Relationship::Spouse
    }
}

impl std::str::FromStr for Relationship {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SPOUSE" => Ok(Relationship::Spouse),
            "CHILD" => Ok(Relationship::Child),
            "PARENT" => Ok(Relationship::Parent),
            "SIBLING" => Ok(Relationship::Sibling),
            "OTHER" => Ok(Relationship::Other),
            _ => Err(format!("Invalid relationship: {}", s)),
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relationship::Spouse => write!(f, "SPOUSE"),
            Relationship::Child => write!(f, "CHILD"),
            Relationship::Parent => write!(f, "PARENT"),
            Relationship::Sibling => write!(f, "SIBLING"),
            Relationship::Other => write!(f, "OTHER"),
        }
    }
}

/// Savings account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Dormant,
    Closed,
}

impl Default for AccountStatus {
    fn default() -> Self {
        AccountStatus::Active
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(AccountStatus::Active),
            "DORMANT" => Ok(AccountStatus::Dormant),
            "CLOSED" => Ok(AccountStatus::Closed),
            _ => Err(format!("Invalid account status: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "ACTIVE"),
            AccountStatus::Dormant => write!(f, "DORMANT"),
            AccountStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Ledger transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "COMPLETED" => Ok(TransactionStatus::Completed),
            "PENDING" => Ok(TransactionStatus::Pending),
            "FAILED" => Ok(TransactionStatus::Failed),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "COMPLETED"),
            TransactionStatus::Pending => write!(f, "PENDING"),
            TransactionStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Ledger transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    LoanDisbursement,
    LoanRepayment,
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEPOSIT" => Ok(TransactionType::Deposit),
            "WITHDRAWAL" => Ok(TransactionType::Withdrawal),
            "LOAN_DISBURSEMENT" => Ok(TransactionType::LoanDisbursement),
            "LOAN_REPAYMENT" => Ok(TransactionType::LoanRepayment),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "DEPOSIT"),
            TransactionType::Withdrawal => write!(f, "WITHDRAWAL"),
            TransactionType::LoanDisbursement => write!(f, "LOAN_DISBURSEMENT"),
            TransactionType::LoanRepayment => write!(f, "LOAN_REPAYMENT"),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_from_str() {
        assert_eq!("SPOUSE".parse::<Relationship>().unwrap(), Relationship::Spouse);
        assert_eq!("child".parse::<Relationship>().unwrap(), Relationship::Child);
        assert!("COUSIN".parse::<Relationship>().is_err());
    }

    #[test]
    fn test_employment_status_round_trip() {
        let status = EmploymentStatus::SelfEmployed;
        assert_eq!(status.to_string(), "SELF_EMPLOYED");
        assert_eq!("SELF_EMPLOYED".parse::<EmploymentStatus>().unwrap(), status);
    }

    #[test]
    fn test_transaction_type_from_str() {
        assert_eq!(
            "LOAN_DISBURSEMENT".parse::<TransactionType>().unwrap(),
            TransactionType::LoanDisbursement
        );
        assert!("TRANSFER".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_wire_serialization() {
        let json = serde_json::to_string(&TransactionStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
        let json = serde_json::to_string(&EmploymentStatus::SelfEmployed).unwrap();
        assert_eq!(json, "\"SELF_EMPLOYED\"");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(MembershipType::default(), MembershipType::Individual);
        assert_eq!(MaritalStatus::default(), MaritalStatus::Single);
        assert_eq!(Relationship::default(), Relationship::Spouse);
        assert_eq!(AccountStatus::default(), AccountStatus::Active);
    }
}
