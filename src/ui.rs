// File: ./src/ui.rs
//! Text shown to the user. Pure functions only; callers do the printing.
use crate::model::{Task, TaskDisplay};

const BORDER: &str = "____________________________________________________________";

pub const GREETING: &str = " Hello! I'm Taskline\n What can I do for you?";
pub const FAREWELL: &str = "Bye. Hope to see you again soon!";
pub const NO_MATCHES: &str = "No matching tasks found in your list.";

/// Puts `message` between two horizontal rules.
pub fn encase(message: &str) -> String {
    format!("{BORDER}\n{message}\n{BORDER}\n")
}

pub fn added(task: &Task, size: usize) -> String {
    format!(
        "Got it. I've added this task:\n  {}\n{}",
        task.render(),
        task_count(size)
    )
}

pub fn removed(task: &Task, size: usize) -> String {
    format!(
        "Noted. I've removed this task:\n  {}\n{}",
        task.render(),
        task_count(size)
    )
}

pub fn marked(task: &Task) -> String {
    format!("Nice! I've marked this task as done:\n  {}", task.render())
}

pub fn unmarked(task: &Task) -> String {
    format!("OK, I've marked this task as not done yet:\n  {}", task.render())
}

pub fn listing(rendered: &str) -> String {
    format!("Here are the tasks in your list:\n{rendered}")
}

pub fn matches(found: &[&Task]) -> String {
    if found.is_empty() {
        return NO_MATCHES.to_string();
    }
    let mut s = String::from("Here are the matching tasks in your list:");
    for (i, task) in found.iter().enumerate() {
        s.push_str(&format!("\n {}.{}", i + 1, task.render()));
    }
    s
}

fn task_count(size: usize) -> String {
    match size {
        1 => "Now you have 1 task in the list.".to_string(),
        n => format!("Now you have {n} tasks in the list."),
    }
}
