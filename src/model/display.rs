// File: ./src/model/display.rs
use crate::model::item::{Task, TaskKind};

pub trait TaskDisplay {
    fn render(&self) -> String;
    fn status_icon(&self) -> &'static str;
}

impl TaskDisplay for Task {
    fn status_icon(&self) -> &'static str {
        if self.is_done() { "X" } else { " " }
    }

    /// Single-line form: `[T][X] Read book (priority: Low)` plus the kind's suffix.
    fn render(&self) -> String {
        let mut s = format!(
            "[{}][{}] {} (priority: {})",
            self.kind().tag(),
            self.status_icon(),
            self.description(),
            self.priority()
        );
        match self.kind() {
            TaskKind::ToDo => {}
            TaskKind::Deadline(due) => {
                s.push_str(&format!(" (by: {})", due.format_friendly()));
            }
            TaskKind::Event { from, to } => {
                s.push_str(&format!(" (from: {} to: {})", from, to));
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    #[test]
    fn renders_each_kind() {
        let todo = Task::new_todo("Read book", Priority::Low).unwrap();
        assert_eq!(todo.render(), "[T][ ] Read book (priority: Low)");

        let deadline =
            Task::new_deadline("Submit report", Priority::High, "2025-09-15 1800").unwrap();
        assert_eq!(
            deadline.render(),
            "[D][ ] Submit report (priority: High) (by: 15 September 2025 6:00 pm)"
        );

        let mut event =
            Task::new_event("Project meeting", Priority::Medium, "Mon 2pm", "4pm").unwrap();
        event.mark_done();
        assert_eq!(
            event.render(),
            "[E][X] Project meeting (priority: Medium) (from: Mon 2pm to: 4pm)"
        );
    }

    #[test]
    fn mark_then_unmark_restores_render() {
        let mut t = Task::new_deadline("File taxes", Priority::Medium, "2026-04-15 2359").unwrap();
        let before = t.render();
        t.mark_done();
        assert_ne!(t.render(), before);
        t.mark_not_done();
        assert_eq!(t.render(), before);
    }
}
