//! interop-course-core — Progress, scoring and achievement engine for the
//! health-data interoperability course.
//!
//! The crate owns the learner's state machine: quiz grading, sequential
//! module unlocking, idempotent achievement grants, scenario pathways and the
//! master-challenge solution builder. Rendering and storage are supplied by
//! the host through the traits in [`traits`].

pub mod achievements;
pub mod challenge;
pub mod completion;
pub mod content;
pub mod course;
pub mod error;
pub mod evaluator;
pub mod memory;
pub mod model;
pub mod parser;
pub mod progress;
pub mod scenario;
pub mod summary;
pub mod traits;
