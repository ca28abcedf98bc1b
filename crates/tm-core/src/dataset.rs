//! In-memory store for the two loaded reference tables
//!
//! Single source of truth the view layer reads. Loading replaces both
//! tables wholesale: either both parses succeed and the store swaps to the
//! new contents, or the store keeps what it had. There is no incremental
//! mutation, so a reader never observes a half-replaced pair.

use crate::csv_table::{parse_table, ParseIssue};
use crate::types::{Employee, Task};
use crate::Result;

/// Outcome of a successful load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub tasks_loaded: usize,
    pub employees_loaded: usize,
    /// Task rows that were skipped
    pub task_issues: Vec<ParseIssue>,
    /// Employee rows that were skipped
    pub employee_issues: Vec<ParseIssue>,
}

/// Holds the task and employee tables for the current session
#[derive(Debug, Default)]
pub struct DatasetStore {
    tasks: Vec<Task>,
    employees: Vec<Employee>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse both CSV sources and replace both tables atomically.
    ///
    /// Per-row problems are reported in the `LoadReport` without failing the
    /// load. A structural failure in either source leaves the store
    /// untouched.
    pub fn load(&mut self, tasks_csv: &str, employees_csv: &str) -> Result<LoadReport> {
        let (tasks, task_issues) = parse_table::<Task>(tasks_csv)?;
        let (employees, employee_issues) = parse_table::<Employee>(employees_csv)?;

        let report = LoadReport {
            tasks_loaded: tasks.len(),
            employees_loaded: employees.len(),
            task_issues,
            employee_issues,
        };
        self.tasks = tasks;
        self.employees = employees;
        Ok(report)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn task_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.task_id == id)
    }

    pub fn employee_by_id(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.employee_id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.employees.is_empty()
    }
}
