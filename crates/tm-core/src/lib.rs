//! Core types and traits for the TaskMatch dashboard
//!
//! This crate defines the domain model shared across the TaskMatch system:
//! the task and employee tables loaded from CSV, the recommendation and
//! feedback types exchanged with the remote matching service, and the
//! `RecommendationBackend` trait that makes the view layer test-friendly.

pub mod backend;
pub mod csv_table;
pub mod dataset;
pub mod error;
pub mod types;

pub use backend::RecommendationBackend;
pub use csv_table::{parse_table, CsvRecord, ParseIssue};
pub use dataset::{DatasetStore, LoadReport};
pub use error::{Error, Result};
pub use types::{
    split_skills, Employee, FeedbackAck, FeedbackSubmission, MatchSubject, NewTaskRequest,
    Recommendation, RecommendationSet, ServiceStatus, Task,
};
