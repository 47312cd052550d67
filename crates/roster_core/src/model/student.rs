//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical roster record and its wire shape.
//! - Own the field-level validation rules shared by create and edit flows.
//!
//! # Invariants
//! - `id` never changes after creation.
//! - `status == false` means blocked; there is no path back to active.
//! - Wire field names are `id`, `name`, `dayOfBirth`, `email`, `status`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$").expect("valid email regex")
});

/// Caller-assigned student code, unique across the roster.
pub type StudentId = String;

/// One roster entry as persisted in the `students` slot.
///
/// Decoding is lenient for everything but `id`: missing or `null` text
/// fields read as `""`, and a missing or `null` status reads as active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// ISO calendar date (`YYYY-MM-DD`) or empty when unknown.
    #[serde(rename = "dayOfBirth", default, deserialize_with = "null_as_empty")]
    pub day_of_birth: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    /// `true` = active, `false` = blocked.
    #[serde(default = "default_status", deserialize_with = "null_as_active")]
    pub status: bool,
}

fn default_status() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_active<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_status))
}

impl StudentRecord {
    /// Marks the record as blocked. Blocking twice is a no-op.
    pub fn block(&mut self) {
        self.status = false;
    }

    pub fn is_active(&self) -> bool {
        self.status
    }
}

/// Editable inputs of the creation and edit forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Id,
    Name,
    DayOfBirth,
    Email,
}

/// In-progress form input. Status is implicit (`true`) until persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub id: String,
    pub name: String,
    pub day_of_birth: String,
    pub email: String,
}

impl StudentDraft {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        day_of_birth: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            day_of_birth: day_of_birth.into(),
            email: email.into(),
        }
    }

    /// Replaces one field value.
    pub fn set(&mut self, field: StudentField, value: impl Into<String>) {
        let value = value.into();
        match field {
            StudentField::Id => self.id = value,
            StudentField::Name => self.name = value,
            StudentField::DayOfBirth => self.day_of_birth = value,
            StudentField::Email => self.email = value,
        }
    }

    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::Id => &self.id,
            StudentField::Name => &self.name,
            StudentField::DayOfBirth => &self.day_of_birth,
            StudentField::Email => &self.email,
        }
    }

    /// Converts the draft into an active record.
    pub fn into_record(self) -> StudentRecord {
        StudentRecord {
            id: self.id,
            name: self.name,
            day_of_birth: self.day_of_birth,
            email: self.email,
            status: true,
        }
    }
}

impl From<&StudentRecord> for StudentDraft {
    fn from(record: &StudentRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            day_of_birth: record.day_of_birth.clone(),
            email: record.email.clone(),
        }
    }
}

/// Reasons a student submission is rejected.
///
/// Variant order mirrors evaluation order: only the first failing check is
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingRequiredField,
    DuplicateId,
    DuplicateEmail,
    MalformedEmail,
}

impl ValidationError {
    /// Message shown inline in the form, in the product's UI language.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::MissingRequiredField => {
                "Mã sinh viên, Tên sinh viên và Email không được để trống."
            }
            Self::DuplicateId => "Mã sinh viên không được phép trùng.",
            Self::DuplicateEmail => "Email không được phép trùng.",
            Self::MalformedEmail => "Email không đúng định dạng.",
        }
    }

    /// Stable machine code used in log lines.
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::DuplicateId => "duplicate_id",
            Self::DuplicateEmail => "duplicate_email",
            Self::MalformedEmail => "malformed_email",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredField => write!(f, "required field missing"),
            Self::DuplicateId => write!(f, "duplicate id"),
            Self::DuplicateEmail => write!(f, "duplicate email"),
            Self::MalformedEmail => write!(f, "malformed email"),
        }
    }
}

impl Error for ValidationError {}

/// Returns whether `email` matches `local@domain.tld` with a 2-6 letter TLD.
///
/// The check runs against the lowercased input.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(&email.to_lowercase())
}

/// Validates a new record against the current roster.
///
/// Order: required fields, duplicate id, duplicate email, email format.
pub fn validate_new_student(
    draft: &StudentDraft,
    existing: &[StudentRecord],
) -> Result<(), ValidationError> {
    if draft.id.is_empty() || draft.name.is_empty() || draft.email.is_empty() {
        return Err(ValidationError::MissingRequiredField);
    }
    if existing.iter().any(|student| student.id == draft.id) {
        return Err(ValidationError::DuplicateId);
    }
    if existing.iter().any(|student| student.email == draft.email) {
        return Err(ValidationError::DuplicateEmail);
    }
    if !is_valid_email(&draft.email) {
        return Err(ValidationError::MalformedEmail);
    }
    Ok(())
}

/// Validates an edit of the record identified by `draft.id`.
///
/// Same order as creation, minus the id check; the record being edited is
/// excluded from the email uniqueness scan so keeping its own email passes.
pub fn validate_edited_student(
    draft: &StudentDraft,
    existing: &[StudentRecord],
) -> Result<(), ValidationError> {
    if draft.name.is_empty() || draft.email.is_empty() {
        return Err(ValidationError::MissingRequiredField);
    }
    if existing
        .iter()
        .any(|student| student.id != draft.id && student.email == draft.email)
    {
        return Err(ValidationError::DuplicateEmail);
    }
    if !is_valid_email(&draft.email) {
        return Err(ValidationError::MalformedEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn email_pattern_accepts_common_addresses() {
        assert!(is_valid_email("an@x.com"));
        assert!(is_valid_email("first.last-1_a@mail.example.vn"));
        assert!(is_valid_email("UPPER@EXAMPLE.ORG"));
    }

    #[test]
    fn email_pattern_rejects_malformed_addresses() {
        assert!(!is_valid_email("bad@@x"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("a@b.toolongtld"));
        assert!(!is_valid_email("a b@x.com"));
    }
}
