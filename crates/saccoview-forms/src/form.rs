//! Member registration form model
//!
//! Owns a primary member draft plus an ordered, dynamically sized list
//! of next-of-kin drafts. Drafts hold raw form input as strings; typed
//! parsing happens only inside [`RegistrationForm::validate`], so
//! partial input never fails while the user is still typing.
//!
//! The share-sum invariant depends on every beneficiary row at once,
//! so it is checked only at validation time rather than per keystroke.
//! Per-field required and range checks can be surfaced earlier by
//! calling `validate` on blur and picking errors per field.

use rust_decimal::Decimal;
use saccoview_core::validate;
use saccoview_core::{
    CreatedId, FieldError, MemberRecord, NextOfKin, ValidationErrors,
};
use serde::{Deserialize, Serialize};

use crate::directory::MemberDirectory;
use crate::error::{DirectoryError, FormError};

// ==================== Drafts ====================

/// Raw member input as captured from form controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDraft {
    #[serde(default)]
    pub national_id: String,
    #[serde(default)]
    pub physical_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub postal_address: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default = "default_employment_status")]
    pub employment_status: String,
    #[serde(default = "default_marital_status")]
    pub marital_status: String,
    #[serde(default = "default_membership_type")]
    pub membership_type: String,
    #[serde(default = "default_income")]
    pub monthly_income: String,
    #[serde(default)]
    pub date_of_birth: String,
}

fn default_employment_status() -> String {
    "EMPLOYED".to_string()
}

fn default_marital_status() -> String {
    "SINGLE".to_string()
}

fn default_membership_type() -> String {
    "INDIVIDUAL".to_string()
}

fn default_income() -> String {
    "0".to_string()
}

impl Default for MemberDraft {
    fn default() -> Self {
        Self {
            national_id: String::new(),
            physical_address: String::new(),
            city: String::new(),
            district: String::new(),
            postal_address: String::new(),
            occupation: String::new(),
            employment_status: default_employment_status(),
            marital_status: default_marital_status(),
            membership_type: default_membership_type(),
            monthly_income: default_income(),
            date_of_birth: String::new(),
        }
    }
}

/// Raw next-of-kin input as captured from form controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KinDraft {
    #[serde(default)]
    pub full_name: String,
    #[serde(default = "default_relationship")]
    pub relationship: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub national_id: String,
    #[serde(default)]
    pub physical_address: String,
    #[serde(default = "default_share")]
    pub percentage_share: String,
}

fn default_relationship() -> String {
    "SPOUSE".to_string()
}

fn default_share() -> String {
    "0".to_string()
}

impl Default for KinDraft {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            relationship: default_relationship(),
            phone_number: String::new(),
            national_id: String::new(),
            physical_address: String::new(),
            percentage_share: default_share(),
        }
    }
}

impl KinDraft {
    /// The entry a fresh form is seeded with: sole spouse beneficiary
    /// holding the full share
    pub fn seed() -> Self {
        Self {
            percentage_share: "100".to_string(),
            ..Self::default()
        }
    }
}

/// Member registration payload as read from a JSON file or request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub member: MemberDraft,
    #[serde(default)]
    pub next_of_kin: Vec<KinDraft>,
}

// ==================== Field addressing ====================

/// Member fields addressable by [`FieldPath`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberField {
    NationalId,
    PhysicalAddress,
    City,
    District,
    PostalAddress,
    Occupation,
    EmploymentStatus,
    MaritalStatus,
    MembershipType,
    MonthlyIncome,
    DateOfBirth,
}

impl MemberField {
    fn key(&self) -> &'static str {
        match self {
            MemberField::NationalId => "national_id",
            MemberField::PhysicalAddress => "physical_address",
            MemberField::City => "city",
            MemberField::District => "district",
            MemberField::PostalAddress => "postal_address",
            MemberField::Occupation => "occupation",
            MemberField::EmploymentStatus => "employment_status",
            MemberField::MaritalStatus => "marital_status",
            MemberField::MembershipType => "membership_type",
            MemberField::MonthlyIncome => "monthly_income",
            MemberField::DateOfBirth => "date_of_birth",
        }
    }
}

/// Next-of-kin fields addressable by [`FieldPath`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KinField {
    FullName,
    Relationship,
    PhoneNumber,
    NationalId,
    PhysicalAddress,
    PercentageShare,
}

impl KinField {
    fn key(&self) -> &'static str {
        match self {
            KinField::FullName => "full_name",
            KinField::Relationship => "relationship",
            KinField::PhoneNumber => "phone_number",
            KinField::NationalId => "national_id",
            KinField::PhysicalAddress => "physical_address",
            KinField::PercentageShare => "percentage_share",
        }
    }
}

/// Address of a single editable field
///
/// Errors are reported under the same dotted names the original form
/// binds its controls to: "member.city", "next_of_kin.2.full_name".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Member(MemberField),
    Kin(usize, KinField),
}

impl FieldPath {
    /// Dotted path used in error reporting
    pub fn name(&self) -> String {
        match self {
            FieldPath::Member(field) => format!("member.{}", field.key()),
            FieldPath::Kin(index, field) => format!("next_of_kin.{}.{}", index, field.key()),
        }
    }
}

// ==================== Form model ====================

/// Lifecycle of a registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    /// Open for edits
    Editing,
    /// A create call is outstanding; edits and further submits blocked
    Submitting,
    /// The remote system accepted the registration; form is immutable
    Accepted,
}

/// Normalized payload handed to the create-member collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub member: MemberRecord,
    pub next_of_kin: Vec<NextOfKin>,
}

/// Member registration form with beneficiary share allocation
///
/// Removal shifts the indices of subsequent entries; callers holding a
/// [`FieldPath::Kin`] index across a removal must re-resolve it.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    member: MemberDraft,
    next_of_kin: Vec<KinDraft>,
    status: FormStatus,
    created: Option<CreatedId>,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationForm {
    /// A fresh form seeded with one spouse beneficiary at 100% share
    pub fn new() -> Self {
        Self {
            member: MemberDraft::default(),
            next_of_kin: vec![KinDraft::seed()],
            status: FormStatus::Editing,
            created: None,
        }
    }

    /// Build a form from an externally captured payload (CLI, request
    /// body). The seed entry is not added; the payload's list is taken
    /// as-is.
    pub fn from_request(request: RegistrationRequest) -> Self {
        Self {
            member: request.member,
            next_of_kin: request.next_of_kin,
            status: FormStatus::Editing,
            created: None,
        }
    }

    pub fn member(&self) -> &MemberDraft {
        &self.member
    }

    pub fn next_of_kin(&self) -> &[KinDraft] {
        &self.next_of_kin
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Identifier assigned by the remote system, once accepted
    pub fn created_id(&self) -> Option<&CreatedId> {
        self.created.as_ref()
    }

    fn ensure_editable(&self, field: &str) -> Result<(), FieldError> {
        match self.status {
            FormStatus::Editing => Ok(()),
            FormStatus::Submitting => Err(FieldError::new(field, "Submission in progress")),
            FormStatus::Accepted => Err(FieldError::new(field, "Registration already submitted")),
        }
    }

    /// Set a single field addressed by path
    ///
    /// An out-of-range beneficiary index is reported as a field error
    /// and leaves the form untouched.
    pub fn update_field(&mut self, path: FieldPath, value: &str) -> Result<(), FieldError> {
        self.ensure_editable(&path.name())?;

        match path {
            FieldPath::Member(field) => {
                let slot = match field {
                    MemberField::NationalId => &mut self.member.national_id,
                    MemberField::PhysicalAddress => &mut self.member.physical_address,
                    MemberField::City => &mut self.member.city,
                    MemberField::District => &mut self.member.district,
                    MemberField::PostalAddress => &mut self.member.postal_address,
                    MemberField::Occupation => &mut self.member.occupation,
                    MemberField::EmploymentStatus => &mut self.member.employment_status,
                    MemberField::MaritalStatus => &mut self.member.marital_status,
                    MemberField::MembershipType => &mut self.member.membership_type,
                    MemberField::MonthlyIncome => &mut self.member.monthly_income,
                    MemberField::DateOfBirth => &mut self.member.date_of_birth,
                };
                *slot = value.to_string();
                Ok(())
            }
            FieldPath::Kin(index, field) => {
                let len = self.next_of_kin.len();
                let entry = self.next_of_kin.get_mut(index).ok_or_else(|| {
                    FieldError::new(
                        path.name(),
                        format!("No beneficiary at index {} (have {})", index, len),
                    )
                })?;
                let slot = match field {
                    KinField::FullName => &mut entry.full_name,
                    KinField::Relationship => &mut entry.relationship,
                    KinField::PhoneNumber => &mut entry.phone_number,
                    KinField::NationalId => &mut entry.national_id,
                    KinField::PhysicalAddress => &mut entry.physical_address,
                    KinField::PercentageShare => &mut entry.percentage_share,
                };
                *slot = value.to_string();
                Ok(())
            }
        }
    }

    /// Append a beneficiary entry; returns its index
    ///
    /// New entries default to a 0% share so an explicit allocation
    /// decision is required before the form can pass validation.
    pub fn add_kin(&mut self, initial: Option<KinDraft>) -> Result<usize, FieldError> {
        self.ensure_editable("next_of_kin")?;
        self.next_of_kin.push(initial.unwrap_or_default());
        Ok(self.next_of_kin.len() - 1)
    }

    /// Remove the beneficiary at `index`
    ///
    /// Subsequent entries shift down by one. Removing a non-existent
    /// index is a no-op that reports an error.
    pub fn remove_kin(&mut self, index: usize) -> Result<(), FieldError> {
        self.ensure_editable("next_of_kin")?;
        if index >= self.next_of_kin.len() {
            return Err(FieldError::new(
                format!("next_of_kin.{}", index),
                format!(
                    "No beneficiary at index {} (have {})",
                    index,
                    self.next_of_kin.len()
                ),
            ));
        }
        self.next_of_kin.remove(index);
        Ok(())
    }

    /// Run all field checks plus the share-sum invariant
    ///
    /// Pure: stored drafts are never mutated, and repeated calls with
    /// no intervening edits return identical results. On success the
    /// returned pair is normalized (trimmed strings, parsed decimals
    /// and dates).
    pub fn validate(&self) -> Result<(MemberRecord, Vec<NextOfKin>), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let member = self.validate_member(&mut errors);
        let kin = self.validate_kin(&mut errors);

        if errors.is_empty() {
            // Both are Some when no errors were recorded
            match (member, kin) {
                (Some(member), Some(kin)) => Ok((member, kin)),
                _ => Err(errors),
            }
        } else {
            Err(errors)
        }
    }

    fn validate_member(&self, errors: &mut ValidationErrors) -> Option<MemberRecord> {
        let national_id = collect(
            errors,
            validate::require("member.national_id", &self.member.national_id),
        );
        let physical_address = collect(
            errors,
            validate::require("member.physical_address", &self.member.physical_address),
        );
        let city = collect(errors, validate::require("member.city", &self.member.city));
        let district = collect(
            errors,
            validate::require("member.district", &self.member.district),
        );
        let occupation = collect(
            errors,
            validate::require("member.occupation", &self.member.occupation),
        );
        let postal_address = validate::optional(&self.member.postal_address);
        let employment_status = collect(
            errors,
            validate::parse_enum("member.employment_status", &self.member.employment_status),
        );
        let marital_status = collect(
            errors,
            validate::parse_enum("member.marital_status", &self.member.marital_status),
        );
        let membership_type = collect(
            errors,
            validate::parse_enum("member.membership_type", &self.member.membership_type),
        );
        let monthly_income = collect(
            errors,
            validate::non_negative_decimal("member.monthly_income", &self.member.monthly_income),
        );
        let date_of_birth = collect(
            errors,
            validate::past_date("member.date_of_birth", &self.member.date_of_birth),
        );

        Some(MemberRecord {
            national_id: national_id?,
            physical_address: physical_address?,
            city: city?,
            district: district?,
            postal_address,
            occupation: occupation?,
            employment_status: employment_status?,
            marital_status: marital_status?,
            membership_type: membership_type?,
            monthly_income: monthly_income?,
            date_of_birth: date_of_birth?,
        })
    }

    fn validate_kin(&self, errors: &mut ValidationErrors) -> Option<Vec<NextOfKin>> {
        if self.next_of_kin.is_empty() {
            errors.add("next_of_kin", "At least one beneficiary is required");
            return None;
        }

        let mut entries = Vec::with_capacity(self.next_of_kin.len());
        let mut share_sum = Decimal::ZERO;
        let mut complete = true;

        for (index, draft) in self.next_of_kin.iter().enumerate() {
            let prefix = |key: &str| format!("next_of_kin.{}.{}", index, key);

            let full_name = validate::require(&prefix("full_name"), &draft.full_name);
            let relationship = validate::parse_enum(&prefix("relationship"), &draft.relationship);
            let phone_number = validate::require_phone(&prefix("phone_number"), &draft.phone_number);
            let national_id = validate::require(&prefix("national_id"), &draft.national_id);
            let physical_address =
                validate::require(&prefix("physical_address"), &draft.physical_address);
            let share =
                validate::share_percentage(&prefix("percentage_share"), &draft.percentage_share);

            if let Ok(share) = &share {
                share_sum += *share;
            }

            match (
                full_name,
                relationship,
                phone_number,
                national_id,
                physical_address,
                share,
            ) {
                (
                    Ok(full_name),
                    Ok(relationship),
                    Ok(phone_number),
                    Ok(national_id),
                    Ok(physical_address),
                    Ok(percentage_share),
                ) => entries.push(NextOfKin {
                    full_name,
                    relationship,
                    phone_number,
                    national_id,
                    physical_address,
                    percentage_share,
                }),
                (a, b, c, d, e, f) => {
                    complete = false;
                    for error in [a.err(), b.err(), c.err(), d.err(), e.err(), f.err()]
                        .into_iter()
                        .flatten()
                    {
                        errors.push(error);
                    }
                }
            }
        }

        // Holistic check across all rows; exact equality on normalized
        // decimals, no float epsilon.
        if share_sum != Decimal::from(100) {
            errors.add(
                "next_of_kin",
                format!("Beneficiary shares must sum to 100, got {}", share_sum),
            );
            return None;
        }

        if complete {
            Some(entries)
        } else {
            None
        }
    }

    // ==================== Submission protocol ====================

    /// Validate and open a submission
    ///
    /// Returns the normalized payload to hand to the collaborator.
    /// While the returned request is outstanding the form refuses
    /// edits and further submits; [`Self::complete_submit`] closes it.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, FormError> {
        match self.status {
            FormStatus::Submitting => return Err(FormError::SubmissionInProgress),
            FormStatus::Accepted => return Err(FormError::AlreadySubmitted),
            FormStatus::Editing => {}
        }

        let (member, next_of_kin) = self.validate().map_err(FormError::Invalid)?;
        self.status = FormStatus::Submitting;
        Ok(SubmitRequest {
            member,
            next_of_kin,
        })
    }

    /// Record the collaborator's outcome for the outstanding submission
    ///
    /// On acceptance the form becomes immutable; on rejection it
    /// returns to the editing state with all drafts untouched so the
    /// user can correct and resubmit.
    pub fn complete_submit(
        &mut self,
        outcome: Result<CreatedId, DirectoryError>,
    ) -> Result<CreatedId, FormError> {
        if self.status != FormStatus::Submitting {
            return Err(FormError::NoSubmissionInFlight);
        }

        match outcome {
            Ok(id) => {
                self.status = FormStatus::Accepted;
                self.created = Some(id.clone());
                Ok(id)
            }
            Err(error) => {
                log::warn!("registration rejected by directory: {}", error);
                self.status = FormStatus::Editing;
                Err(FormError::Rejected(error))
            }
        }
    }

    /// Validate and submit through the collaborator in one step
    ///
    /// The collaborator is called at most once per invocation; there is
    /// no implicit retry.
    pub async fn submit(
        &mut self,
        directory: &dyn MemberDirectory,
    ) -> Result<CreatedId, FormError> {
        let request = self.begin_submit()?;
        let outcome = directory.create(&request.member, &request.next_of_kin).await;
        self.complete_submit(outcome)
    }
}

/// Record an error and carry on, keeping the value when there was one
fn collect<T>(errors: &mut ValidationErrors, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;
    use saccoview_core::{EmploymentStatus, Relationship};

    fn fill_kin(form: &mut RegistrationForm, index: usize, name: &str, share: &str) {
        form.update_field(FieldPath::Kin(index, KinField::FullName), name)
            .unwrap();
        form.update_field(FieldPath::Kin(index, KinField::PhoneNumber), "+256700123456")
            .unwrap();
        form.update_field(FieldPath::Kin(index, KinField::NationalId), "CM7654321")
            .unwrap();
        form.update_field(
            FieldPath::Kin(index, KinField::PhysicalAddress),
            "Plot 3, Entebbe Road",
        )
        .unwrap();
        form.update_field(FieldPath::Kin(index, KinField::PercentageShare), share)
            .unwrap();
    }

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.update_field(FieldPath::Member(MemberField::NationalId), "CM1234567")
            .unwrap();
        form.update_field(
            FieldPath::Member(MemberField::PhysicalAddress),
            "Plot 14, Kira Road",
        )
        .unwrap();
        form.update_field(FieldPath::Member(MemberField::City), "Kampala")
            .unwrap();
        form.update_field(FieldPath::Member(MemberField::District), "Central")
            .unwrap();
        form.update_field(FieldPath::Member(MemberField::Occupation), "Teacher")
            .unwrap();
        form.update_field(FieldPath::Member(MemberField::MonthlyIncome), "1200000")
            .unwrap();
        form.update_field(FieldPath::Member(MemberField::DateOfBirth), "1990-05-20")
            .unwrap();
        fill_kin(&mut form, 0, "Jane Doe", "100");
        form
    }

    #[test]
    fn test_new_form_is_seeded() {
        let form = RegistrationForm::new();
        assert_eq!(form.status(), FormStatus::Editing);
        assert_eq!(form.next_of_kin().len(), 1);
        assert_eq!(form.next_of_kin()[0].relationship, "SPOUSE");
        assert_eq!(form.next_of_kin()[0].percentage_share, "100");
        assert_eq!(form.member().membership_type, "INDIVIDUAL");
    }

    #[test]
    fn test_update_field_out_of_range_is_rejected() {
        let mut form = RegistrationForm::new();
        let before = form.clone().next_of_kin().to_vec();

        let err = form
            .update_field(FieldPath::Kin(5, KinField::FullName), "Ghost")
            .unwrap_err();
        assert_eq!(err.field, "next_of_kin.5.full_name");
        assert_eq!(form.next_of_kin(), before.as_slice());
    }

    #[test]
    fn test_add_and_remove_preserve_order() {
        let mut form = RegistrationForm::new();
        form.add_kin(None).unwrap();
        form.add_kin(None).unwrap();
        form.update_field(FieldPath::Kin(0, KinField::FullName), "First")
            .unwrap();
        form.update_field(FieldPath::Kin(1, KinField::FullName), "Second")
            .unwrap();
        form.update_field(FieldPath::Kin(2, KinField::FullName), "Third")
            .unwrap();

        // Removal shifts subsequent indices down
        form.remove_kin(1).unwrap();
        assert_eq!(form.next_of_kin().len(), 2);
        assert_eq!(form.next_of_kin()[0].full_name, "First");
        assert_eq!(form.next_of_kin()[1].full_name, "Third");
    }

    #[test]
    fn test_added_kin_defaults_to_zero_share() {
        let mut form = RegistrationForm::new();
        let index = form.add_kin(None).unwrap();
        assert_eq!(index, 1);
        assert_eq!(form.next_of_kin()[1].percentage_share, "0");
    }

    #[test]
    fn test_remove_then_add_does_not_recycle_values() {
        let mut form = RegistrationForm::new();
        form.update_field(FieldPath::Kin(0, KinField::FullName), "Jane Doe")
            .unwrap();
        form.remove_kin(0).unwrap();
        form.add_kin(None).unwrap();

        // Same length as before, but a fresh blank entry
        assert_eq!(form.next_of_kin().len(), 1);
        assert_eq!(form.next_of_kin()[0].full_name, "");
        assert_eq!(form.next_of_kin()[0].percentage_share, "0");
    }

    #[test]
    fn test_remove_nonexistent_index_is_noop_with_error() {
        let mut form = RegistrationForm::new();
        let err = form.remove_kin(3).unwrap_err();
        assert_eq!(err.field, "next_of_kin.3");
        assert_eq!(form.next_of_kin().len(), 1);
    }

    #[test]
    fn test_validate_success_normalizes() {
        let mut form = filled_form();
        form.update_field(FieldPath::Member(MemberField::City), "  Kampala  ")
            .unwrap();

        let (member, kin) = form.validate().unwrap();
        assert_eq!(member.city, "Kampala");
        assert_eq!(member.employment_status, EmploymentStatus::Employed);
        assert_eq!(kin.len(), 1);
        assert_eq!(kin[0].relationship, Relationship::Spouse);
        assert_eq!(kin[0].percentage_share, Decimal::from(100));
    }

    #[test]
    fn test_validate_reports_missing_required_fields() {
        let form = RegistrationForm::new();
        let errors = form.validate().unwrap_err();
        assert!(errors.for_field("member.national_id").is_some());
        assert!(errors.for_field("member.date_of_birth").is_some());
        assert!(errors.for_field("next_of_kin.0.full_name").is_some());
    }

    #[test]
    fn test_share_sum_mismatch_is_aggregate_error() {
        let mut form = filled_form();
        fill_kin(&mut form, 0, "Jane Doe", "60");
        form.add_kin(None).unwrap();
        fill_kin(&mut form, 1, "John Doe", "60");

        // Every field is individually valid; only the sum is off
        let errors = form.validate().unwrap_err();
        let aggregate = errors.for_field("next_of_kin").unwrap();
        assert!(aggregate.message.contains("120"));
        assert!(errors.for_field("next_of_kin.0.percentage_share").is_none());
    }

    #[test]
    fn test_empty_kin_list_blocks_submission() {
        let mut form = filled_form();
        form.remove_kin(0).unwrap();

        let errors = form.validate().unwrap_err();
        let aggregate = errors.for_field("next_of_kin").unwrap();
        assert!(aggregate.message.contains("At least one"));
        assert!(matches!(
            form.begin_submit().unwrap_err(),
            FormError::Invalid(_)
        ));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut form = filled_form();
        fill_kin(&mut form, 0, "Jane Doe", "70");
        let first = form.validate();
        let second = form.validate();
        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_plus_blank_entry_sums_to_one_hundred() {
        // Seeded entry keeps its 100% share; the new blank entry adds
        // 0, so the sum stays correct and the failure comes from the
        // blank required fields, not the allocation.
        let mut form = filled_form();
        form.add_kin(None).unwrap();

        let errors = form.validate().unwrap_err();
        assert!(errors.for_field("next_of_kin").is_none());
        assert!(errors.for_field("next_of_kin.1.full_name").is_some());
    }

    #[test]
    fn test_begin_submit_twice_is_rejected() {
        let mut form = filled_form();
        let request = form.begin_submit().unwrap();
        assert_eq!(request.member.city, "Kampala");

        assert_eq!(
            form.begin_submit().unwrap_err(),
            FormError::SubmissionInProgress
        );
    }

    #[test]
    fn test_edits_blocked_while_submitting() {
        let mut form = filled_form();
        form.begin_submit().unwrap();

        let err = form
            .update_field(FieldPath::Member(MemberField::City), "Jinja")
            .unwrap_err();
        assert!(err.message.contains("in progress"));
    }

    #[test]
    fn test_complete_submit_without_submission() {
        let mut form = filled_form();
        assert_eq!(
            form.complete_submit(Ok(CreatedId(1))).unwrap_err(),
            FormError::NoSubmissionInFlight
        );
    }

    #[test]
    fn test_rejection_returns_form_to_editing() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        let err = form
            .complete_submit(Err(DirectoryError::Rejected {
                message: "duplicate national id".to_string(),
            }))
            .unwrap_err();
        assert!(matches!(err, FormError::Rejected(_)));

        // Fully editable again, drafts untouched
        assert_eq!(form.status(), FormStatus::Editing);
        assert_eq!(form.member().city, "Kampala");
        form.update_field(FieldPath::Member(MemberField::City), "Jinja")
            .unwrap();
    }

    #[test]
    fn test_acceptance_makes_form_immutable() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        let id = form.complete_submit(Ok(CreatedId(42))).unwrap();
        assert_eq!(id, CreatedId(42));
        assert_eq!(form.status(), FormStatus::Accepted);
        assert_eq!(form.created_id(), Some(&CreatedId(42)));

        assert!(form
            .update_field(FieldPath::Member(MemberField::City), "Jinja")
            .is_err());
        assert!(form.add_kin(None).is_err());
        assert_eq!(form.begin_submit().unwrap_err(), FormError::AlreadySubmitted);
    }

    #[tokio::test]
    async fn test_submit_calls_directory_once() {
        let directory = InMemoryDirectory::new();
        let mut form = filled_form();

        let id = form.submit(&directory).await.unwrap();
        assert_eq!(id, CreatedId(1));
        assert_eq!(directory.call_count(), 1);

        let registrations = directory.registrations();
        assert_eq!(registrations[0].0.national_id, "CM1234567");
        assert_eq!(registrations[0].1.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_while_in_flight_does_not_call_again() {
        let directory = InMemoryDirectory::new();
        let mut form = filled_form();

        // Simulate an unresolved first submission
        form.begin_submit().unwrap();
        let err = form.submit(&directory).await.unwrap_err();
        assert_eq!(err, FormError::SubmissionInProgress);
        assert_eq!(directory.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_submit_allows_retry() {
        let failing = InMemoryDirectory::failing("ledger offline");
        let mut form = filled_form();

        let err = form.submit(&failing).await.unwrap_err();
        assert!(matches!(err, FormError::Rejected(_)));
        assert_eq!(form.status(), FormStatus::Editing);

        let directory = InMemoryDirectory::new();
        let id = form.submit(&directory).await.unwrap();
        assert_eq!(id, CreatedId(1));
    }
}
