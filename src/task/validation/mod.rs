//! Trust boundary between untyped oracle output and the task domain.
//!
//! Oracle payloads are never deserialized straight into domain types. They
//! pass through these validators, which hard-fail on violations the user
//! would notice (a task longer than requested, an out-of-range score) and
//! silently correct cosmetic drift (unknown level or type, missing detailed
//! description).

mod analysis;
mod candidate;
mod rules;

pub use analysis::{InvalidScore, validate_analysis};
pub use candidate::{TaskConstraintViolation, validate_task_candidate};
