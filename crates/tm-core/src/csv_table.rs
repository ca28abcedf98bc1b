//! CSV-backed table parsing
//!
//! Parses delimited text with a header row into typed records. Parsing is
//! permissive: a malformed row becomes a `ParseIssue` and is skipped, the
//! rest of the table still loads. Only structural problems (a required
//! column missing from the header, unreadable input) abort the parse.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{split_skills, Employee, Task, SKILL_DELIMITER};
use crate::{Error, Result};

/// A row that failed to parse, reported without aborting the table load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    /// 1-based line number in the source text
    pub line: u64,
    pub message: String,
}

/// Header-name to column-position lookup for one table
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self { positions }
    }

    fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Fetch a named field from a row, or a row-scoped error message
    pub fn field<'a>(
        &self,
        row: &'a csv::StringRecord,
        name: &str,
    ) -> std::result::Result<&'a str, String> {
        self.positions
            .get(name)
            .and_then(|&i| row.get(i))
            .ok_or_else(|| format!("missing field '{}'", name))
    }
}

/// A record type that can be built from one CSV row
pub trait CsvRecord: Sized {
    /// Columns that must appear in the header row
    const REQUIRED_COLUMNS: &'static [&'static str];

    /// Build a record from one data row. An `Err` skips the row and is
    /// reported as a `ParseIssue`.
    fn from_row(columns: &ColumnIndex, row: &csv::StringRecord)
        -> std::result::Result<Self, String>;
}

/// Parse delimited text into an ordered sequence of typed records.
///
/// The first line is a header naming columns; empty lines are skipped.
/// Returns the parsed rows together with per-row issues. Pure: no I/O.
pub fn parse_table<T: CsvRecord>(text: &str) -> Result<(Vec<T>, Vec<ParseIssue>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| Error::Csv(format!("unreadable header row: {}", e)))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers);

    for &required in T::REQUIRED_COLUMNS {
        if !columns.contains(required) {
            return Err(Error::Csv(format!(
                "header is missing required column '{}'",
                required
            )));
        }
    }

    let mut records = Vec::new();
    let mut issues = Vec::new();

    for row in reader.records() {
        match row {
            Ok(row) => {
                let line = row.position().map(|p| p.line()).unwrap_or(0);
                match T::from_row(&columns, &row) {
                    Ok(record) => records.push(record),
                    Err(message) => issues.push(ParseIssue { line, message }),
                }
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                issues.push(ParseIssue {
                    line,
                    message: format!("unparsable row: {}", e),
                });
            }
        }
    }

    Ok((records, issues))
}

impl CsvRecord for Task {
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["task_id", "title", "difficulty_level", "required_skills"];

    fn from_row(
        columns: &ColumnIndex,
        row: &csv::StringRecord,
    ) -> std::result::Result<Self, String> {
        let task_id = columns.field(row, "task_id")?;
        if task_id.is_empty() {
            return Err("empty task_id".to_string());
        }
        Ok(Task {
            task_id: task_id.to_string(),
            title: columns.field(row, "title")?.to_string(),
            difficulty_level: columns.field(row, "difficulty_level")?.to_string(),
            required_skills: split_skills(columns.field(row, "required_skills")?, SKILL_DELIMITER),
        })
    }
}

impl CsvRecord for Employee {
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["employee_id", "name", "experience_years", "skills"];

    fn from_row(
        columns: &ColumnIndex,
        row: &csv::StringRecord,
    ) -> std::result::Result<Self, String> {
        let employee_id = columns.field(row, "employee_id")?;
        if employee_id.is_empty() {
            return Err("empty employee_id".to_string());
        }
        let raw_years = columns.field(row, "experience_years")?;
        let experience_years = raw_years
            .parse::<u32>()
            .map_err(|_| format!("experience_years '{}' is not a whole number", raw_years))?;
        Ok(Employee {
            employee_id: employee_id.to_string(),
            name: columns.field(row, "name")?.to_string(),
            experience_years,
            skills: split_skills(columns.field(row, "skills")?, SKILL_DELIMITER),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_task_row_populates_all_fields() {
        let text = "task_id,title,difficulty_level,required_skills\n\
                    T001,Build ETL pipeline,hard,python;sql\n";
        let (tasks, issues) = parse_table::<Task>(text).unwrap();
        assert!(issues.is_empty());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_id, "T001");
        assert_eq!(tasks[0].title, "Build ETL pipeline");
        assert_eq!(tasks[0].difficulty_level, "hard");
        assert_eq!(tasks[0].required_skills, vec!["python", "sql"]);
    }

    #[test]
    fn test_skills_column_is_split_on_semicolons() {
        let text = "task_id,title,difficulty_level,required_skills\n\
                    T001,Something,easy,a;b;c\n";
        let (tasks, _) = parse_table::<Task>(text).unwrap();
        assert_eq!(tasks[0].required_skills, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_skills_column_yields_empty_list() {
        let text = "task_id,title,difficulty_level,required_skills\n\
                    T001,Something,easy,\n";
        let (tasks, issues) = parse_table::<Task>(text).unwrap();
        assert!(issues.is_empty());
        assert!(tasks[0].required_skills.is_empty());
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let text = "task_id,title,difficulty_level,required_skills\n\
                    \n\
                    T001,First,easy,a\n\
                    \n\
                    T002,Second,hard,b\n";
        let (tasks, issues) = parse_table::<Task>(text).unwrap();
        assert!(issues.is_empty());
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].task_id, "T002");
    }

    #[test]
    fn test_malformed_row_reported_without_aborting() {
        let text = "employee_id,name,experience_years,skills\n\
                    E001,Alice,5,rust;go\n\
                    E002,Bob,not-a-number,java\n\
                    E003,Carol,2,python\n";
        let (employees, issues) = parse_table::<Employee>(text).unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].employee_id, "E001");
        assert_eq!(employees[1].employee_id, "E003");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 3);
        assert!(issues[0].message.contains("experience_years"));
    }

    #[test]
    fn test_short_row_reported_without_aborting() {
        let text = "task_id,title,difficulty_level,required_skills\n\
                    T001,Only a title\n\
                    T002,Complete,easy,sql\n";
        let (tasks, issues) = parse_table::<Task>(text).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_id, "T002");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("missing field"));
    }

    #[test]
    fn test_missing_required_column_is_a_hard_error() {
        let text = "task_id,title,required_skills\nT001,Something,a;b\n";
        let result = parse_table::<Task>(text);
        assert!(matches!(result, Err(Error::Csv(_))));
    }

    #[test]
    fn test_header_only_yields_empty_table() {
        let text = "employee_id,name,experience_years,skills\n";
        let (employees, issues) = parse_table::<Employee>(text).unwrap();
        assert!(employees.is_empty());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_column_order_follows_header_not_schema() {
        let text = "skills,employee_id,experience_years,name\n\
                    rust,E009,7,Dana\n";
        let (employees, _) = parse_table::<Employee>(text).unwrap();
        assert_eq!(employees[0].employee_id, "E009");
        assert_eq!(employees[0].name, "Dana");
        assert_eq!(employees[0].experience_years, 7);
        assert_eq!(employees[0].skills, vec!["rust"]);
    }
}
