//! Domain models for Sunstone.
//!
//! # Core Concepts
//!
//! - [`ProjectRecord`]: the only persisted entity. Created once by the wizard,
//!   never edited or deleted by the dashboard.
//! - [`CardSummary`] and [`Stats`]: derived display values, never persisted.
//!
//! The wizard's fixed option lists live in [`options`].

pub mod options;
mod project;
mod samples;
mod summary;

pub use options::{option_label, BUDGETS, DELIVERABLES, DURATIONS, OBJECTIVES};
pub use project::*;
pub use samples::*;
pub use summary::*;
