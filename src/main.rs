use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;

use tm_cli::{
    display_banner, handle_input_with_history, print_help, prompt_field, render, render_status,
    Command, Dashboard, DatasetPaths, FeedbackForm, NewTaskForm, RegionContent,
};
use tm_client::{RecommendationClient, ServiceConfig};
use tm_core::RecommendationBackend;

#[derive(Parser)]
#[command(name = "taskmatch")]
#[command(about = "Terminal dashboard for the task/employee matching service", long_about = None)]
struct Cli {
    /// Base URL of the recommendation service (overrides TASKMATCH_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Path to the tasks CSV (overrides TASKMATCH_TASKS_CSV)
    #[arg(long)]
    tasks: Option<PathBuf>,

    /// Path to the employees CSV (overrides TASKMATCH_EMPLOYEES_CSV)
    #[arg(long)]
    employees: Option<PathBuf>,

    /// Run a single dashboard command and exit
    #[arg(short, long)]
    command: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match cli.api_url {
        Some(url) => ServiceConfig::new(url)?,
        None => ServiceConfig::from_env()?,
    };
    let client = RecommendationClient::new(config)?;

    let mut paths = DatasetPaths::from_env();
    if let Some(tasks) = cli.tasks {
        paths.tasks = tasks;
    }
    if let Some(employees) = cli.employees {
        paths.employees = employees;
    }

    let mut dashboard = Dashboard::new(client, paths);

    // One-shot mode
    if let Some(line) = cli.command {
        let command = Command::parse(&line)?;
        run_command(&mut dashboard, command).await?;
        return Ok(());
    }

    // Interactive mode
    display_banner();
    println!("{}", render_status(dashboard.check_status().await));
    println!();

    println!("{}", render(&RegionContent::Loading("loading datasets".to_string())));
    if let Some((tasks, employees)) = dashboard.reload_data().await {
        println!("{}", render(&tasks));
        println!();
        println!("{}", render(&employees));
    }
    println!();

    let mut history = Vec::new();

    loop {
        let input = handle_input_with_history(&mut history).await?;

        if input.is_empty() {
            continue;
        }

        let command = match Command::parse(&input) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", render(&RegionContent::Error(e.to_string())));
                continue;
            }
        };

        if command == Command::Exit {
            println!("{}", "👋 Goodbye!".green());
            break;
        }

        run_command(&mut dashboard, command).await?;
    }

    Ok(())
}

/// Dispatch one parsed command: show the loading placeholder for the target
/// region, run the action, and render whatever it resolved to. A `None`
/// result was superseded by a newer action and renders nothing.
async fn run_command<B: RecommendationBackend>(
    dashboard: &mut Dashboard<B>,
    command: Command,
) -> Result<()> {
    match command {
        Command::Help => print_help(),
        Command::Exit => {}
        Command::Status => {
            println!("{}", render_status(dashboard.check_status().await));
        }
        Command::Data => {
            println!("{}", render(&RegionContent::Loading("reloading datasets".to_string())));
            if let Some((tasks, employees)) = dashboard.reload_data().await {
                println!("{}", render(&tasks));
                println!();
                println!("{}", render(&employees));
            }
        }
        Command::Tasks => {
            let (tasks, _) = dashboard.current_lists();
            println!("{}", render(&tasks));
        }
        Command::Employees => {
            let (_, employees) = dashboard.current_lists();
            println!("{}", render(&employees));
        }
        Command::MatchTask { task_id, top_k } => {
            println!(
                "{}",
                render(&RegionContent::Loading("finding matching employees".to_string()))
            );
            if let Some(content) = dashboard.request_task_recommendations(&task_id, top_k).await {
                println!("{}", render(&content));
            }
        }
        Command::MatchEmployee { employee_id, top_k } => {
            println!(
                "{}",
                render(&RegionContent::Loading("finding matching tasks".to_string()))
            );
            if let Some(content) = dashboard
                .request_employee_recommendations(&employee_id, top_k)
                .await
            {
                println!("{}", render(&content));
            }
        }
        Command::NewTask => {
            let form = NewTaskForm {
                description: prompt_field("Description")?,
                skills_text: prompt_field("Required skills (comma separated)")?,
                difficulty_level: prompt_field("Difficulty level")?,
                deadline_days: prompt_field("Deadline (days)")?,
                expected_duration: prompt_field("Expected duration (days)")?,
                top_k: 5,
            };
            println!(
                "{}",
                render(&RegionContent::Loading(
                    "analyzing the task and finding matching employees".to_string()
                ))
            );
            if let Some(content) = dashboard.request_new_task_recommendations(&form).await {
                println!("{}", render(&content));
            }
        }
        Command::Feedback {
            task_id,
            employee_id,
            score_text,
            success_text,
        } => {
            let form = FeedbackForm {
                task_id,
                employee_id,
                score_text,
                success_text,
            };
            println!(
                "{}",
                render(&RegionContent::Loading("submitting feedback".to_string()))
            );
            if let Some(content) = dashboard.submit_feedback(&form).await {
                println!("{}", render(&content));
            }
        }
    }

    Ok(())
}
