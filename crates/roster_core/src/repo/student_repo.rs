//! Student repository contract and slot-backed implementation.
//!
//! # Responsibility
//! - Load and save the whole roster as one ordered sequence.
//! - Hide the slot key and the JSON payload format from callers.
//!
//! # Invariants
//! - `load` never fails on an absent or corrupt payload; both read as an
//!   empty roster.
//! - `save` replaces the whole sequence and preserves its order.

use crate::db::DbError;
use crate::model::student::StudentRecord;
use crate::repo::slot_store::SlotStore;
use log::warn;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed logical name of the persisted roster slot.
pub const STUDENTS_SLOT_KEY: &str = "students";

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage failure raised by roster persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize roster: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whole-collection persistence for the roster.
pub trait StudentRepository {
    fn load(&self) -> RepoResult<Vec<StudentRecord>>;
    fn save(&self, students: &[StudentRecord]) -> RepoResult<()>;
}

/// Roster repository storing a JSON array in the `students` slot.
pub struct SqliteStudentRepository<'conn> {
    slots: SlotStore<'conn>,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            slots: SlotStore::new(conn),
        }
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn load(&self) -> RepoResult<Vec<StudentRecord>> {
        let Some(payload) = self.slots.get(STUDENTS_SLOT_KEY)? else {
            return Ok(Vec::new());
        };
        Ok(decode_roster(&payload))
    }

    fn save(&self, students: &[StudentRecord]) -> RepoResult<()> {
        let payload = serde_json::to_string(students).map_err(RepoError::Serialize)?;
        self.slots.set(STUDENTS_SLOT_KEY, &payload)?;
        Ok(())
    }
}

/// Decodes a persisted roster payload.
///
/// A payload that is not a JSON array reads as an empty roster. Inside an
/// array, each element is decoded on its own; elements that still fail
/// (for example a missing `id`) are skipped so the rest survive.
pub fn decode_roster(payload: &str) -> Vec<StudentRecord> {
    let elements = match serde_json::from_str::<Vec<serde_json::Value>>(payload) {
        Ok(elements) => elements,
        Err(err) => {
            warn!(
                "event=roster_decode module=repo status=error error_code=corrupt_payload bytes={} error={}",
                payload.len(),
                err
            );
            return Vec::new();
        }
    };

    elements
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, element)| match serde_json::from_value::<StudentRecord>(element) {
                Ok(student) => Some(student),
                Err(err) => {
                    warn!(
                        "event=roster_decode module=repo status=error error_code=corrupt_record index={} error={}",
                        index, err
                    );
                    None
                }
            },
        )
        .collect()
}
