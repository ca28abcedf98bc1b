//! Parsing of dashboard commands
//!
//! One command per dashboard view: the data tab, the two match directions,
//! the new-task form, and the feedback form.

use tm_core::{Error, Result};

const DEFAULT_TOP_K: usize = 5;

/// A parsed dashboard command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    /// Probe the remote service
    Status,
    /// Reload both CSV sources and show the lists (refresh-on-view)
    Data,
    /// Show the currently loaded tasks without reloading
    Tasks,
    /// Show the currently loaded employees without reloading
    Employees,
    MatchTask {
        task_id: String,
        top_k: usize,
    },
    MatchEmployee {
        employee_id: String,
        top_k: usize,
    },
    /// Starts the interactive new-task form
    NewTask,
    Feedback {
        task_id: String,
        employee_id: String,
        score_text: String,
        success_text: String,
    },
}

impl Command {
    /// Parse one input line. Shape problems are validation errors; domain
    /// validation (score range, numeric fields) happens in the controller.
    pub fn parse(line: &str) -> Result<Command> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["help"] => Ok(Command::Help),
            ["exit"] | ["quit"] => Ok(Command::Exit),
            ["status"] => Ok(Command::Status),
            ["data"] => Ok(Command::Data),
            ["tasks"] => Ok(Command::Tasks),
            ["employees"] => Ok(Command::Employees),
            ["new-task"] => Ok(Command::NewTask),
            ["match", "task", task_id, rest @ ..] => Ok(Command::MatchTask {
                task_id: task_id.to_string(),
                top_k: parse_top_k(rest)?,
            }),
            ["match", "employee", employee_id, rest @ ..] => Ok(Command::MatchEmployee {
                employee_id: employee_id.to_string(),
                top_k: parse_top_k(rest)?,
            }),
            ["match", ..] => Err(Error::Validation(
                "usage: match task <id> [top_k]  or  match employee <id> [top_k]".to_string(),
            )),
            ["feedback", task_id, employee_id, score, success] => Ok(Command::Feedback {
                task_id: task_id.to_string(),
                employee_id: employee_id.to_string(),
                score_text: score.to_string(),
                success_text: success.to_string(),
            }),
            ["feedback", ..] => Err(Error::Validation(
                "usage: feedback <task_id> <employee_id> <score 0..1> <true|false>".to_string(),
            )),
            [] => Err(Error::Validation("empty command".to_string())),
            _ => Err(Error::Validation(format!(
                "unknown command '{}', try 'help'",
                line.trim()
            ))),
        }
    }
}

fn parse_top_k(rest: &[&str]) -> Result<usize> {
    match rest {
        [] => Ok(DEFAULT_TOP_K),
        [raw] => raw
            .parse::<usize>()
            .map_err(|_| Error::Validation(format!("top_k '{}' is not a whole number", raw))),
        _ => Err(Error::Validation("too many arguments".to_string())),
    }
}
