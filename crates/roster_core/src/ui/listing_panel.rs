//! Listing and mutation panel presenter.
//!
//! # Responsibility
//! - Keep a view copy of the roster and render it as table rows.
//! - Drive the block / delete / edit confirmation dialogs.
//!
//! # Invariants
//! - At most one dialog is open; opening another replaces it.
//! - Every successful confirm reloads the view from the service.
//! - The edit draft never changes `id`.

use crate::model::student::{StudentDraft, StudentField, StudentRecord, ValidationError};
use crate::repo::student_repo::{RepoResult, StudentRepository};
use crate::service::roster_service::{RosterService, RosterServiceError};
use chrono::NaiveDate;

const BLOCK_TITLE: &str = "Xác nhận";
const BLOCK_BODY: &str = "Bạn chắc chắn muốn chặn sinh viên này không?";
const DELETE_TITLE: &str = "Xác nhận xóa";
const DELETE_BODY: &str = "Bạn chắc chắn muốn xóa sinh viên này không?";
const EDIT_TITLE: &str = "Cập nhật sinh viên";
const CONFIRM_LABEL: &str = "Xác nhận";
const UPDATE_LABEL: &str = "Cập nhật";
pub const CANCEL_LABEL: &str = "Hủy";

/// Two-state status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Active,
    Blocked,
}

impl StatusBadge {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Đang hoạt động",
            Self::Blocked => "Ngừng hoạt động",
        }
    }
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    /// 1-based position in roster order.
    pub position: usize,
    pub id: String,
    pub name: String,
    pub birth_date: String,
    pub email: String,
    pub status: StatusBadge,
}

/// Currently open modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Block { target: String },
    Delete { target: String },
    Edit { draft: StudentDraft },
}

impl Dialog {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Block { .. } => BLOCK_TITLE,
            Self::Delete { .. } => DELETE_TITLE,
            Self::Edit { .. } => EDIT_TITLE,
        }
    }

    /// Confirmation question; edit dialogs render the form instead.
    pub fn body(&self) -> Option<&'static str> {
        match self {
            Self::Block { .. } => Some(BLOCK_BODY),
            Self::Delete { .. } => Some(DELETE_BODY),
            Self::Edit { .. } => None,
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            Self::Edit { .. } => UPDATE_LABEL,
            _ => CONFIRM_LABEL,
        }
    }
}

/// What a confirm did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// No dialog was open.
    Idle,
    /// `found` is false when the target id is not in the roster.
    Blocked { found: bool },
    /// `removed` is false when the target id is not in the roster.
    Deleted { removed: bool },
    Edited(StudentRecord),
    /// Edit rejected; the dialog stays open with the error shown.
    EditRejected(ValidationError),
    /// Edit target disappeared from the roster; the dialog is closed.
    EditTargetMissing,
}

/// Headless roster table with its confirmation dialogs.
#[derive(Debug, Default)]
pub struct ListingPanel {
    students: Vec<StudentRecord>,
    dialog: Option<Dialog>,
    edit_error: Option<ValidationError>,
    loaded_revision: Option<u64>,
}

impl ListingPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the panel with the current roster.
    pub fn load<R: StudentRepository>(service: &RosterService<R>) -> RepoResult<Self> {
        let mut panel = Self::new();
        panel.reload(service)?;
        Ok(panel)
    }

    /// Replaces the view copy with the roster held by `service`.
    pub fn reload<R: StudentRepository>(&mut self, service: &RosterService<R>) -> RepoResult<()> {
        self.students = service.list_students()?;
        self.loaded_revision = Some(service.revision());
        Ok(())
    }

    /// Reloads only when `service` has persisted changes since the last load.
    pub fn refresh_if_stale<R: StudentRepository>(
        &mut self,
        service: &RosterService<R>,
    ) -> RepoResult<bool> {
        if self.loaded_revision == Some(service.revision()) {
            return Ok(false);
        }
        self.reload(service)?;
        Ok(true)
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn rows(&self) -> Vec<RosterRow> {
        self.students
            .iter()
            .enumerate()
            .map(|(index, student)| RosterRow {
                position: index + 1,
                id: student.id.clone(),
                name: student.name.clone(),
                birth_date: format_birth_date(&student.day_of_birth),
                email: student.email.clone(),
                status: if student.is_active() {
                    StatusBadge::Active
                } else {
                    StatusBadge::Blocked
                },
            })
            .collect()
    }

    pub fn open_dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Validation error shown inside the open edit dialog.
    pub fn edit_error(&self) -> Option<ValidationError> {
        self.edit_error
    }

    pub fn request_block(&mut self, id: impl Into<String>) {
        self.open(Dialog::Block { target: id.into() });
    }

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.open(Dialog::Delete { target: id.into() });
    }

    /// Opens the edit dialog pre-filled from the row with `id`.
    ///
    /// Returns `false` when the view has no such row.
    pub fn request_edit(&mut self, id: &str) -> bool {
        let Some(student) = self.students.iter().find(|student| student.id == id) else {
            return false;
        };
        let draft = StudentDraft::from(student);
        self.open(Dialog::Edit { draft });
        true
    }

    /// Stages one field change in the open edit dialog.
    ///
    /// Ignored when no edit dialog is open or when `field` is the id.
    pub fn edit_field(&mut self, field: StudentField, value: impl Into<String>) -> bool {
        if field == StudentField::Id {
            return false;
        }
        match self.dialog.as_mut() {
            Some(Dialog::Edit { draft }) => {
                draft.set(field, value);
                true
            }
            _ => false,
        }
    }

    /// Closes the open dialog without touching storage.
    pub fn cancel(&mut self) {
        self.dialog = None;
        self.edit_error = None;
    }

    /// Applies the open dialog's action through `service`.
    pub fn confirm<R: StudentRepository>(
        &mut self,
        service: &mut RosterService<R>,
    ) -> Result<ConfirmOutcome, RosterServiceError> {
        let Some(dialog) = self.dialog.clone() else {
            return Ok(ConfirmOutcome::Idle);
        };

        let outcome = match dialog {
            Dialog::Block { target } => ConfirmOutcome::Blocked {
                found: service.block_student(&target)?,
            },
            Dialog::Delete { target } => ConfirmOutcome::Deleted {
                removed: service.delete_student(&target)?,
            },
            Dialog::Edit { draft } => match service.edit_student(draft) {
                Ok(record) => ConfirmOutcome::Edited(record),
                Err(RosterServiceError::Validation(err)) => {
                    self.edit_error = Some(err);
                    return Ok(ConfirmOutcome::EditRejected(err));
                }
                Err(RosterServiceError::StudentNotFound(_)) => ConfirmOutcome::EditTargetMissing,
                Err(other) => return Err(other),
            },
        };

        self.cancel();
        self.reload(service)?;
        Ok(outcome)
    }

    fn open(&mut self, dialog: Dialog) {
        self.edit_error = None;
        self.dialog = Some(dialog);
    }
}

/// Formats an ISO birth date as `dd/mm/yyyy`.
///
/// Empty input renders empty; unparseable input is shown as stored.
pub fn format_birth_date(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_birth_date, Dialog, StatusBadge};
    use crate::model::student::StudentDraft;

    #[test]
    fn birth_date_renders_day_first() {
        assert_eq!(format_birth_date("2004-03-09"), "09/03/2004");
        assert_eq!(format_birth_date(""), "");
        assert_eq!(format_birth_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn dialogs_carry_their_own_copy() {
        let block = Dialog::Block {
            target: "S1".to_string(),
        };
        assert_eq!(block.title(), "Xác nhận");
        assert_eq!(block.confirm_label(), "Xác nhận");

        let edit = Dialog::Edit {
            draft: StudentDraft::default(),
        };
        assert_eq!(edit.body(), None);
        assert_eq!(edit.confirm_label(), "Cập nhật");
    }

    #[test]
    fn status_badges_are_distinct() {
        assert_ne!(StatusBadge::Active.label(), StatusBadge::Blocked.label());
    }
}
