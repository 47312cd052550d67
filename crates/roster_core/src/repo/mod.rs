//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-collection roster persistence contract.
//! - Isolate slot/SQL details from service orchestration.
//!
//! # Invariants
//! - Repositories never validate business rules; the service does.
//! - Corrupt persisted payloads degrade to an empty roster.

pub mod slot_store;
pub mod student_repo;
