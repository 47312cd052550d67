//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into roster use-case APIs.
//! - Keep presenters and front ends decoupled from storage details.

pub mod roster_service;
