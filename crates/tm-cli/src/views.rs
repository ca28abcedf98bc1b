//! Deterministic rendering of region state to terminal text
//!
//! Every region render is a pure function of a `RegionContent` value, so
//! the same state always produces the same output.

use colored::*;

use tm_core::{
    Employee, MatchSubject, ParseIssue, Recommendation, RecommendationSet, ServiceStatus, Task,
};

use crate::controller::RegionContent;

/// Render one region's state
pub fn render(content: &RegionContent) -> String {
    match content {
        RegionContent::Loading(message) => format!("⏳ {}", message.dimmed()),
        RegionContent::TaskList { tasks, skipped } => {
            with_skipped_rows(render_task_list(tasks), skipped)
        }
        RegionContent::EmployeeList { employees, skipped } => {
            with_skipped_rows(render_employee_list(employees), skipped)
        }
        RegionContent::Matches(set) => render_matches(set),
        RegionContent::NoMatch => format!("{}", "No match found".yellow()),
        RegionContent::FeedbackAck(ack) => format!(
            "{}\n   loss: {}\n   {}",
            "✅ Feedback submitted".green().bold(),
            ack.loss,
            ack.message
        ),
        RegionContent::Error(message) => format!("{} {}", "❌ Error:".red().bold(), message),
    }
}

/// Render the service health probe result
pub fn render_status(status: ServiceStatus) -> String {
    match status {
        ServiceStatus::Healthy => format!("{} service is online", "●".green()),
        ServiceStatus::Unreachable => format!(
            "{} service is offline - check the connection",
            "●".red()
        ),
    }
}

fn render_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return format!("{}", "No tasks loaded".dimmed());
    }
    let mut out = format!("{}", format!("Tasks ({})", tasks.len()).bold());
    for task in tasks {
        out.push_str(&format!(
            "\n  {} - {} [{}]\n      {}",
            task.task_id.cyan(),
            task.title,
            task.difficulty_level,
            skill_tags(&task.required_skills)
        ));
    }
    out
}

fn render_employee_list(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return format!("{}", "No employees loaded".dimmed());
    }
    let mut out = format!("{}", format!("Employees ({})", employees.len()).bold());
    for employee in employees {
        out.push_str(&format!(
            "\n  {} - {} ({} years)\n      {}",
            employee.employee_id.cyan(),
            employee.name,
            employee.experience_years,
            skill_tags(&employee.skills)
        ));
    }
    out
}

/// Append the rows a load skipped, one line each. Silence here would hide
/// data loss, so every skipped row is named with its source line.
fn with_skipped_rows(mut out: String, skipped: &[ParseIssue]) -> String {
    if skipped.is_empty() {
        return out;
    }
    out.push_str(&format!(
        "\n{}",
        format!("⚠️  skipped {} malformed row(s):", skipped.len()).yellow()
    ));
    for issue in skipped {
        out.push_str(&format!(
            "\n  {}",
            format!("line {}: {}", issue.line, issue.message).dimmed()
        ));
    }
    out
}

/// Skill tags for one list entry. An empty list gets an explicit
/// placeholder, never a blank line.
fn skill_tags(skills: &[String]) -> String {
    if skills.is_empty() {
        return "[No skills]".dimmed().to_string();
    }
    skills
        .iter()
        .map(|skill| format!("[{}]", skill))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_matches(set: &RecommendationSet) -> String {
    let header = match &set.subject {
        MatchSubject::Task(task_id) => {
            format!("{} employees recommended for task {}", set.total, task_id)
        }
        MatchSubject::Employee(employee_id) => {
            format!("{} tasks recommended for employee {}", set.total, employee_id)
        }
        MatchSubject::NewTask => {
            format!("{} employees recommended for the new task", set.total)
        }
    };

    let mut out = format!("{}", header.green().bold());
    for (index, rec) in set.recommendations.iter().enumerate() {
        out.push_str(&render_match_row(index + 1, rec));
    }
    out
}

fn render_match_row(rank: usize, rec: &Recommendation) -> String {
    let mut row = format!(
        "\n  {}. {}  {}  (score {})",
        rank,
        rec.id.cyan().bold(),
        rec.match_percentage,
        rec.match_score
    );
    if let Some(explanation) = &rec.explanation {
        row.push_str(&format!("\n      {}", explanation.dimmed()));
    }
    row
}
