//! Creation form presenter.
//!
//! # Responsibility
//! - Hold the in-progress draft and the inline message of the "add student"
//!   dialog.
//! - Submit through the roster service and notify the caller on success.
//!
//! # Invariants
//! - A submit attempt starts by clearing the previous message.
//! - After an attempt at most one of {error, success} is shown.
//! - The draft is reset only after a successful submit.

use crate::model::student::{StudentDraft, StudentField, StudentRecord, ValidationError};
use crate::repo::student_repo::StudentRepository;
use crate::service::roster_service::{RosterService, RosterServiceError};

pub const ADD_SUCCESS_MESSAGE: &str = "Thêm tài khoản thành công";

/// Inline message rendered above the form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMessage {
    Error(ValidationError),
    Success,
}

impl FormMessage {
    pub fn text(self) -> &'static str {
        match self {
            Self::Error(err) => err.user_message(),
            Self::Success => ADD_SUCCESS_MESSAGE,
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Result of one submit attempt that reached validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(StudentRecord),
    Rejected(ValidationError),
}

/// Headless "add student" form.
#[derive(Debug, Default)]
pub struct CreationForm {
    draft: StudentDraft,
    message: Option<FormMessage>,
}

impl CreationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    pub fn message(&self) -> Option<FormMessage> {
        self.message
    }

    pub fn set_field(&mut self, field: StudentField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Validates and persists the draft.
    ///
    /// On success the record is appended, the success message is set,
    /// `on_added` runs with the stored record, and the draft is cleared.
    /// Validation failures are reported through `Ok(Rejected)` and the inline
    /// message; storage failures are returned as errors with no message.
    pub fn submit<R, F>(
        &mut self,
        service: &mut RosterService<R>,
        on_added: F,
    ) -> Result<SubmitOutcome, RosterServiceError>
    where
        R: StudentRepository,
        F: FnOnce(&StudentRecord),
    {
        self.message = None;

        match service.add_student(self.draft.clone()) {
            Ok(record) => {
                self.message = Some(FormMessage::Success);
                on_added(&record);
                self.draft = StudentDraft::default();
                Ok(SubmitOutcome::Added(record))
            }
            Err(RosterServiceError::Validation(err)) => {
                self.message = Some(FormMessage::Error(err));
                Ok(SubmitOutcome::Rejected(err))
            }
            Err(other) => Err(other),
        }
    }
}
