//! Recommendation service client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use tm_core::{
    Error, FeedbackAck, FeedbackSubmission, MatchSubject, NewTaskRequest, Recommendation,
    RecommendationBackend, RecommendationSet, Result, ServiceStatus,
};

use crate::config::ServiceConfig;

/// Typed wrapper around the remote matching service.
///
/// Every call is self-contained: no session, no auth, no retry. A non-2xx
/// response is unwrapped to the server's `detail` message when one is
/// present and surfaced as `Error::Service`.
pub struct RecommendationClient {
    config: ServiceConfig,
    client: Client,
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    task_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    employee_id: Option<&'a str>,
    top_k: usize,
}

#[derive(Deserialize)]
struct RecommendResponse {
    task_id: Option<String>,
    employee_id: Option<String>,
    total_recommendations: Option<usize>,
    #[serde(default)]
    recommendations: Vec<RecommendationItem>,
}

#[derive(Deserialize)]
struct NewTaskResponse {
    #[serde(default)]
    recommendations: Vec<RecommendationItem>,
}

/// One entry of a `recommendations` array. Which id field is present
/// depends on the direction of the request.
#[derive(Deserialize)]
struct RecommendationItem {
    task_id: Option<String>,
    employee_id: Option<String>,
    match_score: f64,
    match_percentage: String,
    explanation: Option<String>,
}

impl RecommendationItem {
    fn into_recommendation(self) -> Recommendation {
        Recommendation {
            id: self.employee_id.or(self.task_id).unwrap_or_default(),
            match_score: self.match_score,
            match_percentage: self.match_percentage,
            explanation: self.explanation,
        }
    }
}

/// Pull the server-supplied `detail` message out of an error body, falling
/// back to a status-derived message when the body has none.
fn extract_detail(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail")?.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("service returned status {}", status))
}

fn into_set(response: RecommendResponse, subject: MatchSubject) -> RecommendationSet {
    let recommendations: Vec<Recommendation> = response
        .recommendations
        .into_iter()
        .map(RecommendationItem::into_recommendation)
        .collect();
    RecommendationSet {
        subject,
        total: response.total_recommendations.unwrap_or(recommendations.len()),
        recommendations,
    }
}

impl RecommendationClient {
    /// Create a new client from configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = ServiceConfig::from_env()?;
        Self::new(config)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .client
            .post(self.endpoint(path))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Service(extract_detail(status, &body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|_| Error::Service("malformed response".to_string()))
    }
}

#[async_trait]
impl RecommendationBackend for RecommendationClient {
    async fn check_status(&self) -> ServiceStatus {
        let probe = self.client.get(self.endpoint("/")).send().await;
        match probe {
            Ok(response) if response.status().is_success() => ServiceStatus::Healthy,
            _ => ServiceStatus::Unreachable,
        }
    }

    async fn recommend_for_task(&self, task_id: &str, top_k: usize) -> Result<RecommendationSet> {
        let request = RecommendRequest {
            task_id: Some(task_id),
            employee_id: None,
            top_k,
        };
        let response: RecommendResponse = self.post_json("/recommend", &request).await?;
        let subject = MatchSubject::Task(response.task_id.clone().unwrap_or_else(|| task_id.to_string()));
        Ok(into_set(response, subject))
    }

    async fn recommend_for_employee(
        &self,
        employee_id: &str,
        top_k: usize,
    ) -> Result<RecommendationSet> {
        let request = RecommendRequest {
            task_id: None,
            employee_id: Some(employee_id),
            top_k,
        };
        let response: RecommendResponse = self.post_json("/recommend", &request).await?;
        let subject = MatchSubject::Employee(
            response.employee_id.clone().unwrap_or_else(|| employee_id.to_string()),
        );
        Ok(into_set(response, subject))
    }

    async fn recommend_for_new_task(
        &self,
        request: &NewTaskRequest,
    ) -> Result<RecommendationSet> {
        let response: NewTaskResponse = self.post_json("/recommend/new-task", request).await?;
        let recommendations: Vec<Recommendation> = response
            .recommendations
            .into_iter()
            .map(RecommendationItem::into_recommendation)
            .collect();
        Ok(RecommendationSet {
            subject: MatchSubject::NewTask,
            total: recommendations.len(),
            recommendations,
        })
    }

    async fn submit_feedback(&self, feedback: &FeedbackSubmission) -> Result<FeedbackAck> {
        self.post_json("/feedback", feedback).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_field_surfaces_verbatim() {
        let message = extract_detail(
            reqwest::StatusCode::NOT_FOUND,
            r#"{"detail":"task not found"}"#,
        );
        assert_eq!(message, "task not found");
    }

    #[test]
    fn test_missing_detail_falls_back_to_status() {
        let message = extract_detail(reqwest::StatusCode::BAD_GATEWAY, "upstream exploded");
        assert_eq!(message, "service returned status 502 Bad Gateway");

        let message = extract_detail(reqwest::StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"x"}"#);
        assert!(message.starts_with("service returned status 500"));
    }

    #[test]
    fn test_recommend_request_carries_exactly_one_id() {
        let request = RecommendRequest {
            task_id: Some("T001"),
            employee_id: None,
            top_k: 5,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["task_id"], "T001");
        assert_eq!(value["top_k"], 5);
        assert!(value.get("employee_id").is_none());
    }

    #[test]
    fn test_response_maps_to_recommendation_set() {
        let body = r#"{
            "task_id": "T001",
            "total_recommendations": 2,
            "recommendations": [
                {"employee_id": "E003", "match_score": 0.91, "match_percentage": "91.0%"},
                {"employee_id": "E007", "match_score": 0.72, "match_percentage": "72.0%"}
            ]
        }"#;
        let response: RecommendResponse = serde_json::from_str(body).unwrap();
        let set = into_set(response, MatchSubject::Task("T001".to_string()));
        assert_eq!(set.total, 2);
        assert_eq!(set.recommendations[0].id, "E003");
        assert_eq!(set.recommendations[0].match_percentage, "91.0%");
        assert!(set.recommendations[0].explanation.is_none());
    }

    #[test]
    fn test_total_defaults_to_list_length() {
        let body = r#"{"employee_id": "E001", "recommendations": [
            {"task_id": "T004", "match_score": 0.5, "match_percentage": "50.0%"}
        ]}"#;
        let response: RecommendResponse = serde_json::from_str(body).unwrap();
        let set = into_set(response, MatchSubject::Employee("E001".to_string()));
        assert_eq!(set.total, 1);
        assert_eq!(set.recommendations[0].id, "T004");
    }

    #[test]
    fn test_new_task_response_keeps_explanations() {
        let body = r#"{"recommendations": [
            {"employee_id": "E002", "match_score": 0.8, "match_percentage": "80.0%",
             "explanation": "strong skill overlap"}
        ]}"#;
        let response: NewTaskResponse = serde_json::from_str(body).unwrap();
        let item = response.recommendations.into_iter().next().unwrap();
        let rec = item.into_recommendation();
        assert_eq!(rec.explanation.as_deref(), Some("strong skill overlap"));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = ServiceConfig::new("http://localhost:8000/").unwrap();
        let client = RecommendationClient::new(config).unwrap();
        assert_eq!(client.endpoint("/recommend"), "http://localhost:8000/recommend");
    }
}
