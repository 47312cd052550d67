//! Roster domain model.
//!
//! # Responsibility
//! - Define the student record, form drafts, and validation rules.
//!
//! # Invariants
//! - Every record is identified by a caller-assigned, unique `StudentId`.
//! - Deletion is a hard removal from the roster sequence.

pub mod student;
