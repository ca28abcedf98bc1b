//! Backend trait for the remote recommendation service
//!
//! The dashboard talks to the service through this trait so the view layer
//! can be exercised against a mock. `tm-client` provides the HTTP
//! implementation.

use async_trait::async_trait;

use crate::types::{
    FeedbackAck, FeedbackSubmission, NewTaskRequest, RecommendationSet, ServiceStatus,
};
use crate::Result;

/// The five operations offered by the remote matching service.
///
/// Callers do not pre-validate that ids exist in the loaded datasets; the
/// service is the authority and answers unknown ids with its own error.
#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Probe the service root. Never errors: any failure is `Unreachable`.
    async fn check_status(&self) -> ServiceStatus;

    /// Rank employees for an existing task
    async fn recommend_for_task(&self, task_id: &str, top_k: usize) -> Result<RecommendationSet>;

    /// Rank tasks for an employee
    async fn recommend_for_employee(
        &self,
        employee_id: &str,
        top_k: usize,
    ) -> Result<RecommendationSet>;

    /// Rank employees for a task described in free text
    async fn recommend_for_new_task(&self, request: &NewTaskRequest)
        -> Result<RecommendationSet>;

    /// Report how a recommended pairing worked out
    async fn submit_feedback(&self, feedback: &FeedbackSubmission) -> Result<FeedbackAck>;
}
