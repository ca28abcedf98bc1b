//! Terminal view layer for the TaskMatch dashboard

mod command;
mod controller;
mod ui;
mod views;


pub use command::Command;
pub use controller::{Dashboard, DatasetPaths, FeedbackForm, NewTaskForm, Region, RegionContent};
pub use ui::{display_banner, handle_input_with_history, print_help, prompt_field};
pub use views::{render, render_status};

// Re-export core types
pub use tm_core::{Error, Result};
