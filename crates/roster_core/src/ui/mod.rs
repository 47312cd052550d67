//! Headless presenters for the roster screens.
//!
//! Each presenter owns only view state (drafts, dialogs, messages) and takes
//! the roster service by reference on every call, so the two screens never
//! hold diverging copies past a reload.

pub mod creation_form;
pub mod listing_panel;
