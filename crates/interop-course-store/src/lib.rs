//! interop-course-store — Configuration and durable progress storage.
//!
//! Provides the JSON file implementation of
//! [`SnapshotStore`](interop_course_core::traits::SnapshotStore) and the
//! layered configuration loader used by the command-line front end.

pub mod config;
pub mod error;
pub mod file;

pub use config::{load_config, load_config_from, CourseConfig};
pub use error::StoreError;
pub use file::JsonFileStore;
