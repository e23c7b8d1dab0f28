//! Create-member collaborator contract
//!
//! The remote API is consumed only through this trait; the core calls
//! it at most once per submission. Deduplication of retried requests is
//! the collaborator's concern, not the form's.

use async_trait::async_trait;
use saccoview_core::{CreatedId, MemberRecord, NextOfKin};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::error::DirectoryError;

/// External collaborator that persists accepted registrations
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Create a member with their next-of-kin entries
    async fn create(
        &self,
        member: &MemberRecord,
        next_of_kin: &[NextOfKin],
    ) -> Result<CreatedId, DirectoryError>;
}

/// In-memory directory used by tests and the demo binary
///
/// Records every create call and hands out sequential ids, or fails
/// every call with a configured message.
#[derive(Default)]
pub struct InMemoryDirectory {
    next_id: AtomicU64,
    calls: Mutex<Vec<(MemberRecord, Vec<NextOfKin>)>>,
    fail_with: Option<String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory that rejects every create call
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            next_id: AtomicU64::new(0),
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Number of create calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Registrations received so far
    pub fn registrations(&self) -> Vec<(MemberRecord, Vec<NextOfKin>)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MemberDirectory for InMemoryDirectory {
    async fn create(
        &self,
        member: &MemberRecord,
        next_of_kin: &[NextOfKin],
    ) -> Result<CreatedId, DirectoryError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((member.clone(), next_of_kin.to_vec()));
        }
        if let Some(message) = &self.fail_with {
            return Err(DirectoryError::Rejected {
                message: message.clone(),
            });
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(CreatedId(id))
    }
}
