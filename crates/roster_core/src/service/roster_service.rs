//! Roster use-case service.
//!
//! # Responsibility
//! - Act as the single source of truth shared by the creation form and the
//!   listing panel.
//! - Run every mutation as load -> validate/mutate -> save.
//!
//! # Invariants
//! - `id` and `email` stay unique across the roster.
//! - Edit and block keep the record's position; delete removes only the
//!   matching record.
//! - `revision` increases after every successful save and never otherwise.

use crate::model::student::{
    validate_edited_student, validate_new_student, StudentDraft, StudentRecord, ValidationError,
};
use crate::repo::student_repo::{RepoError, RepoResult, StudentRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for roster use-cases.
#[derive(Debug)]
pub enum RosterServiceError {
    /// Submission rejected by a field rule.
    Validation(ValidationError),
    /// Edit target does not exist.
    StudentNotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for RosterServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RosterServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::StudentNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for RosterServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for RosterServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl RosterServiceError {
    /// Returns the validation cause when this is a rejected submission.
    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(err) => Some(*err),
            _ => None,
        }
    }
}

/// Roster facade over a repository implementation.
pub struct RosterService<R: StudentRepository> {
    repo: R,
    revision: u64,
}

impl<R: StudentRepository> RosterService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo, revision: 0 }
    }

    /// Counter bumped after each persisted mutation.
    ///
    /// Views compare it with the value they last loaded at to detect staleness.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the whole roster in insertion order.
    pub fn list_students(&self) -> RepoResult<Vec<StudentRecord>> {
        self.repo.load()
    }

    /// Validates and appends a new active record.
    pub fn add_student(&mut self, draft: StudentDraft) -> Result<StudentRecord, RosterServiceError> {
        let mut students = self.repo.load()?;
        if let Err(err) = validate_new_student(&draft, &students) {
            warn!(
                "event=student_add module=service status=rejected reason={}",
                err.code()
            );
            return Err(err.into());
        }

        let record = draft.into_record();
        students.push(record.clone());
        self.persist(&students)?;
        info!(
            "event=student_add module=service status=ok student_id={} total={}",
            record.id,
            students.len()
        );
        Ok(record)
    }

    /// Sets `status = false` on the matching record.
    ///
    /// Returns `false` when no record has `id`. Blocking an already blocked
    /// record still succeeds and leaves it blocked.
    pub fn block_student(&mut self, id: &str) -> RepoResult<bool> {
        let mut students = self.repo.load()?;
        let Some(student) = students.iter_mut().find(|student| student.id == id) else {
            info!("event=student_block module=service status=noop student_id={id}");
            return Ok(false);
        };

        student.block();
        self.persist(&students)?;
        info!("event=student_block module=service status=ok student_id={id}");
        Ok(true)
    }

    /// Removes the matching record.
    ///
    /// Returns `false` and leaves storage untouched when no record has `id`.
    pub fn delete_student(&mut self, id: &str) -> RepoResult<bool> {
        let mut students = self.repo.load()?;
        let before = students.len();
        students.retain(|student| student.id != id);
        if students.len() == before {
            info!("event=student_delete module=service status=noop student_id={id}");
            return Ok(false);
        }

        self.persist(&students)?;
        info!(
            "event=student_delete module=service status=ok student_id={id} total={}",
            students.len()
        );
        Ok(true)
    }

    /// Replaces name, birth date and email of the record with `draft.id`.
    ///
    /// Status and position are kept. Edits go through the same email rules
    /// as creation, with the edited record excluded from the uniqueness scan.
    pub fn edit_student(&mut self, draft: StudentDraft) -> Result<StudentRecord, RosterServiceError> {
        let mut students = self.repo.load()?;
        let Some(index) = students.iter().position(|student| student.id == draft.id) else {
            warn!(
                "event=student_edit module=service status=error error_code=not_found student_id={}",
                draft.id
            );
            return Err(RosterServiceError::StudentNotFound(draft.id));
        };

        if let Err(err) = validate_edited_student(&draft, &students) {
            warn!(
                "event=student_edit module=service status=rejected reason={} student_id={}",
                err.code(),
                draft.id
            );
            return Err(err.into());
        }

        let target = &mut students[index];
        target.name = draft.name;
        target.day_of_birth = draft.day_of_birth;
        target.email = draft.email;
        let updated = target.clone();

        self.persist(&students)?;
        info!(
            "event=student_edit module=service status=ok student_id={}",
            updated.id
        );
        Ok(updated)
    }

    fn persist(&mut self, students: &[StudentRecord]) -> RepoResult<()> {
        self.repo.save(students)?;
        self.revision += 1;
        Ok(())
    }
}
