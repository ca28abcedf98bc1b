//! Dashboard controller: orchestrates dataset loads, user actions, and the
//! state each view region should render next.
//!
//! Every async action resolves to exactly one `RegionContent` for its
//! region, or to `None` when a newer action against the same region
//! superseded it (latest request wins, tracked per region by a generation
//! counter).

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use tm_core::{
    split_skills, DatasetStore, Employee, Error, FeedbackAck, FeedbackSubmission, NewTaskRequest,
    ParseIssue, RecommendationBackend, RecommendationSet, Result, ServiceStatus, Task,
};

/// The independently refreshable parts of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    TaskList,
    EmployeeList,
    Recommendations,
    Feedback,
}

/// What a region should display. Rendering is a pure function of this
/// value, see `views::render`.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionContent {
    Loading(String),
    TaskList {
        tasks: Vec<Task>,
        /// Rows the last load skipped; reported alongside the list
        skipped: Vec<ParseIssue>,
    },
    EmployeeList {
        employees: Vec<Employee>,
        skipped: Vec<ParseIssue>,
    },
    Matches(RecommendationSet),
    /// A 200 response with an empty recommendation list: not an error
    NoMatch,
    FeedbackAck(FeedbackAck),
    Error(String),
}

/// Where the two CSV sources live on disk
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub tasks: PathBuf,
    pub employees: PathBuf,
}

impl DatasetPaths {
    pub fn new(tasks: impl Into<PathBuf>, employees: impl Into<PathBuf>) -> Self {
        Self {
            tasks: tasks.into(),
            employees: employees.into(),
        }
    }

    /// Resolve paths from environment variables, with repo-local defaults
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            tasks: env::var("TASKMATCH_TASKS_CSV")
                .unwrap_or_else(|_| "data/task.csv".to_string())
                .into(),
            employees: env::var("TASKMATCH_EMPLOYEES_CSV")
                .unwrap_or_else(|_| "data/employees.csv".to_string())
                .into(),
        }
    }
}

/// Per-region generation counters for latest-request-wins semantics
#[derive(Debug, Default)]
struct RegionGenerations {
    current: HashMap<Region, u64>,
}

impl RegionGenerations {
    /// Start a new request against a region, superseding any outstanding one
    fn begin(&mut self, region: Region) -> u64 {
        let generation = self.current.entry(region).or_insert(0);
        *generation += 1;
        *generation
    }

    /// Whether a completed request is still the latest one for its region
    fn is_current(&self, region: Region, generation: u64) -> bool {
        self.current.get(&region).copied().unwrap_or(0) == generation
    }
}

/// Form state for the new-task view. Numeric fields stay text until
/// validation so a bad entry is a validation error, never a silent default.
#[derive(Debug, Clone, Default)]
pub struct NewTaskForm {
    pub description: String,
    pub skills_text: String,
    pub difficulty_level: String,
    pub deadline_days: String,
    pub expected_duration: String,
    pub top_k: usize,
}

impl NewTaskForm {
    /// Validate the form and build the request body
    pub fn to_request(&self) -> Result<NewTaskRequest> {
        if self.description.trim().is_empty() || self.skills_text.trim().is_empty() {
            return Err(Error::Validation(
                "description and required skills must both be filled in".to_string(),
            ));
        }
        let deadline_days = parse_whole_number("deadline days", &self.deadline_days)?;
        let expected_duration = parse_whole_number("expected duration", &self.expected_duration)?;

        Ok(NewTaskRequest {
            description: self.description.trim().to_string(),
            required_skills: split_skills(&self.skills_text, ','),
            difficulty_level: self.difficulty_level.trim().to_string(),
            deadline_days,
            expected_duration,
            top_k: self.top_k,
        })
    }
}

/// Form state for the feedback view
#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    pub task_id: String,
    pub employee_id: String,
    pub score_text: String,
    pub success_text: String,
}

impl FeedbackForm {
    /// Validate the form and build the submission
    pub fn to_submission(&self) -> Result<FeedbackSubmission> {
        let feedback_score = self.score_text.trim().parse::<f64>().map_err(|_| {
            Error::Validation(format!("feedback score '{}' is not a number", self.score_text))
        })?;
        let success = match self.success_text.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" => true,
            "false" | "no" | "n" => false,
            other => {
                return Err(Error::Validation(format!(
                    "success must be true or false, got '{}'",
                    other
                )))
            }
        };
        let submission = FeedbackSubmission {
            task_id: self.task_id.trim().to_string(),
            employee_id: self.employee_id.trim().to_string(),
            feedback_score,
            success,
        };
        submission.validate()?;
        Ok(submission)
    }
}

/// Orchestrates the dashboard: owns the dataset store, dispatches user
/// actions to the backend, and decides what each region renders.
pub struct Dashboard<B: RecommendationBackend> {
    backend: B,
    store: DatasetStore,
    paths: DatasetPaths,
    generations: RegionGenerations,
}

impl<B: RecommendationBackend> Dashboard<B> {
    pub fn new(backend: B, paths: DatasetPaths) -> Self {
        Self {
            backend,
            store: DatasetStore::new(),
            paths,
            generations: RegionGenerations::default(),
        }
    }

    /// The currently loaded datasets
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Probe the remote service
    pub async fn check_status(&self) -> ServiceStatus {
        self.backend.check_status().await
    }

    /// Re-read both CSV sources and replace the store atomically.
    ///
    /// Explicit and idempotent: the data view calls this every time it is
    /// shown, but showing a view and reloading its data are separate
    /// operations. Returns the fresh renders for the two list regions, or
    /// `None` when a newer reload superseded this one.
    pub async fn reload_data(&mut self) -> Option<(RegionContent, RegionContent)> {
        let task_generation = self.generations.begin(Region::TaskList);
        self.generations.begin(Region::EmployeeList);

        let loaded = self.read_sources().await;
        if !self.generations.is_current(Region::TaskList, task_generation) {
            return None;
        }

        Some(match loaded {
            Ok((tasks_csv, employees_csv)) => match self.store.load(&tasks_csv, &employees_csv) {
                Ok(report) => (
                    RegionContent::TaskList {
                        tasks: self.store.tasks().to_vec(),
                        skipped: report.task_issues,
                    },
                    RegionContent::EmployeeList {
                        employees: self.store.employees().to_vec(),
                        skipped: report.employee_issues,
                    },
                ),
                Err(e) => {
                    let message = e.to_string();
                    (
                        RegionContent::Error(message.clone()),
                        RegionContent::Error(message),
                    )
                }
            },
            Err(e) => {
                let message = e.to_string();
                (
                    RegionContent::Error(message.clone()),
                    RegionContent::Error(message),
                )
            }
        })
    }

    async fn read_sources(&self) -> Result<(String, String)> {
        let tasks_csv = tokio::fs::read_to_string(&self.paths.tasks).await?;
        let employees_csv = tokio::fs::read_to_string(&self.paths.employees).await?;
        Ok((tasks_csv, employees_csv))
    }

    /// Current store contents without touching the sources. Skipped rows
    /// belong to a load event, so none are reported here.
    pub fn current_lists(&self) -> (RegionContent, RegionContent) {
        (
            RegionContent::TaskList {
                tasks: self.store.tasks().to_vec(),
                skipped: vec![],
            },
            RegionContent::EmployeeList {
                employees: self.store.employees().to_vec(),
                skipped: vec![],
            },
        )
    }

    /// Rank employees for an existing task. The task id is not checked
    /// against the store: the service is the authority on existence.
    pub async fn request_task_recommendations(
        &mut self,
        task_id: &str,
        top_k: usize,
    ) -> Option<RegionContent> {
        if task_id.trim().is_empty() {
            return Some(RegionContent::Error(
                Error::Validation("select a task first".to_string()).to_string(),
            ));
        }
        let generation = self.generations.begin(Region::Recommendations);
        let result = self.backend.recommend_for_task(task_id.trim(), top_k).await;
        if !self.generations.is_current(Region::Recommendations, generation) {
            return None;
        }
        Some(Self::recommendation_content(result))
    }

    /// Rank tasks for an employee
    pub async fn request_employee_recommendations(
        &mut self,
        employee_id: &str,
        top_k: usize,
    ) -> Option<RegionContent> {
        if employee_id.trim().is_empty() {
            return Some(RegionContent::Error(
                Error::Validation("select an employee first".to_string()).to_string(),
            ));
        }
        let generation = self.generations.begin(Region::Recommendations);
        let result = self
            .backend
            .recommend_for_employee(employee_id.trim(), top_k)
            .await;
        if !self.generations.is_current(Region::Recommendations, generation) {
            return None;
        }
        Some(Self::recommendation_content(result))
    }

    /// Rank employees for a task that only exists as a form
    pub async fn request_new_task_recommendations(
        &mut self,
        form: &NewTaskForm,
    ) -> Option<RegionContent> {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => return Some(RegionContent::Error(e.to_string())),
        };
        let generation = self.generations.begin(Region::Recommendations);
        let result = self.backend.recommend_for_new_task(&request).await;
        if !self.generations.is_current(Region::Recommendations, generation) {
            return None;
        }
        Some(Self::recommendation_content(result))
    }

    /// Send a feedback signal. Validation happens before any network call;
    /// the form is left as-is afterward.
    pub async fn submit_feedback(&mut self, form: &FeedbackForm) -> Option<RegionContent> {
        let submission = match form.to_submission() {
            Ok(submission) => submission,
            Err(e) => return Some(RegionContent::Error(e.to_string())),
        };
        let generation = self.generations.begin(Region::Feedback);
        let result = self.backend.submit_feedback(&submission).await;
        if !self.generations.is_current(Region::Feedback, generation) {
            return None;
        }
        Some(match result {
            Ok(ack) => RegionContent::FeedbackAck(ack),
            Err(e) => RegionContent::Error(e.to_string()),
        })
    }

    fn recommendation_content(result: Result<RecommendationSet>) -> RegionContent {
        match result {
            Ok(set) if set.recommendations.is_empty() => RegionContent::NoMatch,
            Ok(set) => RegionContent::Matches(set),
            Err(e) => RegionContent::Error(e.to_string()),
        }
    }
}

fn parse_whole_number(label: &str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| Error::Validation(format!("{} '{}' is not a whole number", label, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_counter_latest_wins() {
        let mut generations = RegionGenerations::default();
        let first = generations.begin(Region::Recommendations);
        let second = generations.begin(Region::Recommendations);
        assert!(!generations.is_current(Region::Recommendations, first));
        assert!(generations.is_current(Region::Recommendations, second));
    }

    #[test]
    fn test_generation_counters_are_per_region() {
        let mut generations = RegionGenerations::default();
        let rec = generations.begin(Region::Recommendations);
        let feedback = generations.begin(Region::Feedback);
        assert!(generations.is_current(Region::Recommendations, rec));
        assert!(generations.is_current(Region::Feedback, feedback));
    }

    #[test]
    fn test_new_task_form_splits_skills_on_commas() {
        let form = NewTaskForm {
            description: "Migrate the billing database".to_string(),
            skills_text: "sql, postgres ,migrations".to_string(),
            difficulty_level: "hard".to_string(),
            deadline_days: "14".to_string(),
            expected_duration: "10".to_string(),
            top_k: 5,
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.required_skills, vec!["sql", "postgres", "migrations"]);
        assert_eq!(request.deadline_days, 14);
        assert_eq!(request.expected_duration, 10);
    }

    #[test]
    fn test_new_task_form_rejects_blank_required_fields() {
        let form = NewTaskForm {
            description: "  ".to_string(),
            skills_text: "sql".to_string(),
            top_k: 5,
            ..Default::default()
        };
        assert!(matches!(form.to_request(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_new_task_form_rejects_unparsable_numbers() {
        let form = NewTaskForm {
            description: "Something".to_string(),
            skills_text: "sql".to_string(),
            difficulty_level: "easy".to_string(),
            deadline_days: "soon".to_string(),
            expected_duration: "5".to_string(),
            top_k: 5,
        };
        let err = form.to_request().unwrap_err();
        assert!(err.to_string().contains("deadline days"));
    }

    #[test]
    fn test_feedback_form_parses_score_and_success() {
        let form = FeedbackForm {
            task_id: "T001".to_string(),
            employee_id: "E001".to_string(),
            score_text: "0.5".to_string(),
            success_text: "true".to_string(),
        };
        let submission = form.to_submission().unwrap();
        assert_eq!(submission.feedback_score, 0.5);
        assert!(submission.success);
    }

    #[test]
    fn test_feedback_form_rejects_out_of_range_score() {
        let form = FeedbackForm {
            task_id: "T001".to_string(),
            employee_id: "E001".to_string(),
            score_text: "1.5".to_string(),
            success_text: "false".to_string(),
        };
        assert!(matches!(form.to_submission(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_feedback_form_rejects_bad_success_flag() {
        let form = FeedbackForm {
            task_id: "T001".to_string(),
            employee_id: "E001".to_string(),
            score_text: "0.5".to_string(),
            success_text: "maybe".to_string(),
        };
        assert!(matches!(form.to_submission(), Err(Error::Validation(_))));
    }
}
