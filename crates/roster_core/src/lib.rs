//! Core domain logic for the student roster.
//! This crate is the single source of truth for roster invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod ui;

pub use config::RosterConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::student::{
    is_valid_email, StudentDraft, StudentField, StudentId, StudentRecord, ValidationError,
};
pub use repo::student_repo::{
    RepoError, RepoResult, SqliteStudentRepository, StudentRepository, STUDENTS_SLOT_KEY,
};
pub use service::roster_service::{RosterService, RosterServiceError};
pub use ui::creation_form::{CreationForm, FormMessage, SubmitOutcome};
pub use ui::listing_panel::{ConfirmOutcome, Dialog, ListingPanel, RosterRow, StatusBadge};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
