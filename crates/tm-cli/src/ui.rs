//! UI utilities for the dashboard loop

use colored::*;
use crossterm::{
    cursor, execute,
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use std::io::{self, IsTerminal, Write};
use tm_core::Result;

const BANNER_TITLE: &str = "TaskMatch - matching dashboard";
const MAX_BANNER_WIDTH: usize = 60;

/// Display the startup banner
pub fn display_banner() {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    println!();
    for line in banner_lines(terminal_width) {
        println!("{}", line);
    }
    println!();
    println!(
        "{}",
        "💡 Tip: 'data' shows the loaded tables, 'help' lists all commands".dimmed()
    );
    println!();
}

/// Build the banner box for a terminal of the given width. The box never
/// shrinks below the title, so a tiny terminal wraps instead of panicking.
fn banner_lines(terminal_width: usize) -> Vec<String> {
    let banner_width = std::cmp::min(MAX_BANNER_WIDTH, terminal_width.saturating_sub(4))
        .max(BANNER_TITLE.len() + 6);

    let top_border = format!("┌{}┐", "─".repeat(banner_width - 2));
    let bottom_border = format!("└{}┘", "─".repeat(banner_width - 2));
    let empty_line = format!("│{}│", " ".repeat(banner_width - 2));
    let title_line = format!(
        "│  {}{}│",
        BANNER_TITLE.blue().bold(),
        " ".repeat(banner_width.saturating_sub(BANNER_TITLE.len() + 3))
    );

    vec![
        format!("{}", top_border.blue()),
        format!("{}", empty_line.blue()),
        title_line,
        format!("{}", empty_line.blue()),
        format!("{}", bottom_border.blue()),
    ]
}

/// Build the repaint of the prompt line after an edit: the text to print
/// following a carriage return, and how many cells to step the cursor back
/// so it sits at the edit position. `previous_len` is the input length the
/// line showed before this edit; anything beyond the new input is blanked.
fn repaint_line(input: &str, cursor_pos: usize, previous_len: usize) -> (String, u16) {
    let current_len = input.chars().count();
    let erase = previous_len.saturating_sub(current_len);
    let line = format!(
        "\r{} {}{}",
        "taskmatch>".green().bold(),
        input,
        " ".repeat(erase)
    );
    let step_back = (current_len - cursor_pos + erase) as u16;
    (line, step_back)
}

fn redraw(buffer: &[char], cursor_pos: usize, rendered_len: &mut usize) -> Result<()> {
    let input: String = buffer.iter().collect();
    let (line, step_back) = repaint_line(&input, cursor_pos, *rendered_len);
    let mut stdout = io::stdout();
    print!("{}", line);
    if step_back > 0 {
        execute!(stdout, cursor::MoveLeft(step_back))?;
    }
    stdout.flush()?;
    *rendered_len = buffer.len();
    Ok(())
}

/// Handle input with line editing and command history navigation
pub async fn handle_input_with_history(history: &mut Vec<String>) -> Result<String> {
    // Piped input is read straight from stdin
    if !io::stdin().is_terminal() {
        let mut input = String::new();
        let bytes_read = io::stdin().read_line(&mut input)?;
        if bytes_read == 0 {
            // EOF ends the session
            return Ok("exit".to_string());
        }
        let input = input.trim().to_string();
        if !input.is_empty() {
            history.push(input.clone());
        }
        return Ok(input);
    }

    enable_raw_mode()?;
    // Char buffer so cursor movement never lands inside a multi-byte char
    let mut buffer: Vec<char> = Vec::new();
    let mut cursor_pos = 0;
    let mut rendered_len = 0;
    let mut history_index: Option<usize> = None;

    redraw(&buffer, cursor_pos, &mut rendered_len)?;

    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        match key_event.code {
            KeyCode::Enter => {
                disable_raw_mode()?;
                println!();
                let input: String = buffer.into_iter().collect();
                if !input.is_empty() {
                    history.push(input.clone());
                }
                return Ok(input);
            }
            KeyCode::Char(c) => {
                buffer.insert(cursor_pos, c);
                cursor_pos += 1;
            }
            KeyCode::Backspace => {
                if cursor_pos > 0 {
                    cursor_pos -= 1;
                    buffer.remove(cursor_pos);
                }
            }
            KeyCode::Left => {
                cursor_pos = cursor_pos.saturating_sub(1);
            }
            KeyCode::Right => {
                cursor_pos = (cursor_pos + 1).min(buffer.len());
            }
            KeyCode::Up => {
                if !history.is_empty() {
                    let new_index = match history_index {
                        None => history.len() - 1,
                        Some(idx) => idx.saturating_sub(1),
                    };
                    history_index = Some(new_index);
                    buffer = history[new_index].chars().collect();
                    cursor_pos = buffer.len();
                }
            }
            KeyCode::Down => {
                if let Some(idx) = history_index {
                    if idx + 1 < history.len() {
                        history_index = Some(idx + 1);
                        buffer = history[idx + 1].chars().collect();
                    } else {
                        history_index = None;
                        buffer.clear();
                    }
                    cursor_pos = buffer.len();
                }
            }
            KeyCode::Esc => {
                disable_raw_mode()?;
                println!();
                return Ok(String::new());
            }
            _ => {}
        }
        redraw(&buffer, cursor_pos, &mut rendered_len)?;
    }
}

/// Prompt for one form field and read a line
pub fn prompt_field(label: &str) -> Result<String> {
    print!("{} ", format!("{}:", label).cyan());
    io::stdout().flush()?;

    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

/// Display help message
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - Check whether the matching service is reachable", "status".green());
    println!("  {} - Reload both CSV files and show the tables", "data".green());
    println!("  {} - Show loaded tasks (no reload)", "tasks".green());
    println!("  {} - Show loaded employees (no reload)", "employees".green());
    println!("  {} - Recommend employees for a task", "match task <id> [top_k]".green());
    println!("  {} - Recommend tasks for an employee", "match employee <id> [top_k]".green());
    println!("  {} - Describe a new task and get recommendations", "new-task".green());
    println!(
        "  {} - Report how a pairing worked out",
        "feedback <task_id> <employee_id> <score> <true|false>".green()
    );
    println!("  {} - Show this help message", "help".green());
    println!("  {} - Exit the dashboard", "exit/quit".green());
    println!();
    println!("{}", "Examples:".bold());
    println!("  match task T001 5");
    println!("  match employee E002");
    println!("  feedback T001 E002 0.8 true");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repaint_blanks_the_whole_previous_input() {
        // A long history entry followed by a short one must leave no tail
        let (line, _) = repaint_line("ab", 2, 70);
        assert!(line.ends_with(&" ".repeat(68)));
    }

    #[test]
    fn test_repaint_steps_back_to_the_edit_position() {
        // cursor in the middle of "hello": two chars sit to its right
        let (_, step_back) = repaint_line("hello", 3, 5);
        assert_eq!(step_back, 2);

        // cursor at the end of an input no shorter than before: stay put
        let (_, step_back) = repaint_line("hello", 5, 5);
        assert_eq!(step_back, 0);
    }

    #[test]
    fn test_repaint_steps_over_erase_padding() {
        // shrank from 10 to 5 chars with the cursor at the end: step back
        // over the 5 blanks so typing continues right after the input
        let (_, step_back) = repaint_line("hello", 5, 10);
        assert_eq!(step_back, 5);
    }

    #[test]
    fn test_repaint_counts_chars_not_bytes() {
        let (line, step_back) = repaint_line("đá bóng", 7, 9);
        assert_eq!(step_back, 2);
        assert!(line.ends_with(&" ".repeat(2)));
    }

    #[test]
    fn test_banner_survives_a_tiny_terminal() {
        let lines = banner_lines(10);
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains('┌'));
        assert!(lines[2].contains(BANNER_TITLE));
        assert!(lines[4].contains('┘'));
    }

    #[test]
    fn test_banner_caps_its_width_on_wide_terminals() {
        let lines = banner_lines(500);
        // top border is the box width: 2 corners + (width - 2) dashes
        let dashes = lines[0].chars().filter(|&c| c == '─').count();
        assert_eq!(dashes, MAX_BANNER_WIDTH - 2);
    }
}
