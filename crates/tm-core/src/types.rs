//! Domain types for tasks, employees, recommendations, and feedback

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Delimiter used for skill lists inside a single CSV column
pub const SKILL_DELIMITER: char = ';';

/// A unit of work with required skills and difficulty, matched against
/// employees. Immutable once loaded; the whole table is replaced on reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub title: String,
    /// Free string: the service enumerates the values, the dashboard does not
    pub difficulty_level: String,
    pub required_skills: Vec<String>,
}

/// A worker profile with skills and experience, matched against tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String,
    pub name: String,
    pub experience_years: u32,
    pub skills: Vec<String>,
}

/// Split a delimited skill column into individual skills.
///
/// The CSV stores skill lists as a single string (`"rust;go;sql"`), so the
/// split happens once at load time instead of being re-guessed at render
/// time. Entries are trimmed and empties dropped.
pub fn split_skills(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Health of the remote recommendation service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Healthy,
    Unreachable,
}

/// What a recommendation set was requested for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSubject {
    /// Employees recommended for an existing task
    Task(String),
    /// Tasks recommended for an employee
    Employee(String),
    /// Employees recommended for a not-yet-registered task description
    NewTask,
}

/// One scored pairing produced by the remote matching service.
/// Ephemeral: constructed per response, held only for the current render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Task or employee id, whichever the subject was matched against
    pub id: String,
    /// Match score in [0,1]
    pub match_score: f64,
    /// Pre-formatted by the service (e.g. "87.3%"), rendered as-is
    pub match_percentage: String,
    pub explanation: Option<String>,
}

/// A ranked response from the matching service
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationSet {
    pub subject: MatchSubject,
    pub total: usize,
    pub recommendations: Vec<Recommendation>,
}

/// Request body for matching against a task that only exists as a form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTaskRequest {
    pub description: String,
    pub required_skills: Vec<String>,
    pub difficulty_level: String,
    pub deadline_days: u32,
    pub expected_duration: u32,
    pub top_k: usize,
}

/// A human-supplied correctness signal for a prior recommendation,
/// sent back to the service for learning. Write-only: not retained
/// client-side after submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackSubmission {
    pub task_id: String,
    pub employee_id: String,
    pub feedback_score: f64,
    pub success: bool,
}

impl FeedbackSubmission {
    /// Validate the submission before any network call
    pub fn validate(&self) -> Result<()> {
        if self.task_id.trim().is_empty() || self.employee_id.trim().is_empty() {
            return Err(Error::Validation(
                "both a task and an employee must be selected".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.feedback_score) || self.feedback_score.is_nan() {
            return Err(Error::Validation(
                "feedback score must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Acknowledgement returned by the service after feedback is recorded
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedbackAck {
    pub loss: f64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_skills_semicolon() {
        assert_eq!(split_skills("a;b;c", ';'), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_skills_trims_entries() {
        assert_eq!(
            split_skills("rust ; go ;  sql", ';'),
            vec!["rust", "go", "sql"]
        );
    }

    #[test]
    fn test_split_skills_drops_empties() {
        assert_eq!(split_skills("a;;b;", ';'), vec!["a", "b"]);
        assert!(split_skills("", ';').is_empty());
        assert!(split_skills("  ", ';').is_empty());
    }

    #[test]
    fn test_split_skills_comma_for_form_input() {
        assert_eq!(
            split_skills("python, pandas ,ml", ','),
            vec!["python", "pandas", "ml"]
        );
    }

    #[test]
    fn test_feedback_validation_range() {
        let mut feedback = FeedbackSubmission {
            task_id: "T001".to_string(),
            employee_id: "E001".to_string(),
            feedback_score: 0.5,
            success: true,
        };
        assert!(feedback.validate().is_ok());

        feedback.feedback_score = 1.5;
        assert!(matches!(feedback.validate(), Err(Error::Validation(_))));

        feedback.feedback_score = -0.1;
        assert!(matches!(feedback.validate(), Err(Error::Validation(_))));

        feedback.feedback_score = 0.0;
        assert!(feedback.validate().is_ok());
        feedback.feedback_score = 1.0;
        assert!(feedback.validate().is_ok());
    }

    #[test]
    fn test_feedback_validation_requires_selections() {
        let feedback = FeedbackSubmission {
            task_id: "".to_string(),
            employee_id: "E001".to_string(),
            feedback_score: 0.5,
            success: true,
        };
        assert!(matches!(feedback.validate(), Err(Error::Validation(_))));
    }
}
