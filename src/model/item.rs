// File: ./src/model/item.rs
use crate::error::ValidationError;
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

/// Literal format of a deadline, e.g. `2025-09-15 1800`.
pub const DUE_FORMAT: &str = "%Y-%m-%d %H%M";
/// Shape of [`DUE_FORMAT`]; `9` stands for any ASCII digit.
const DUE_SHAPE: &str = "9999-99-99 9999";
/// Friendly rendering, e.g. `15 September 2025 6:00 pm`.
const DUE_DISPLAY_FORMAT: &str = "%-d %B %Y %-I:%M %P";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Full uppercase name, as written to the task file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }

    pub fn short_code(&self) -> &'static str {
        match self {
            Priority::Low => "L",
            Priority::Medium => "M",
            Priority::High => "H",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    /// Accepts the full name or the one-letter code, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Priority::iter()
            .find(|p| p.as_str() == normalized || p.short_code() == normalized)
            .ok_or_else(|| ValidationError::InvalidPriority(s.trim().to_string()))
    }
}

/// A deadline's due moment together with the literal the user typed.
///
/// Both halves are produced by [`Due::parse`] and are never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Due {
    raw: String,
    at: NaiveDateTime,
}

impl Due {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let shape_ok = raw.len() == DUE_SHAPE.len()
            && raw.chars().zip(DUE_SHAPE.chars()).all(|(c, s)| match s {
                '9' => c.is_ascii_digit(),
                other => c == other,
            });
        if !shape_ok {
            return Err(ValidationError::DateFormat(raw.to_string()));
        }
        let at = NaiveDateTime::parse_from_str(raw, DUE_FORMAT)
            .map_err(|_| ValidationError::DateFormat(raw.to_string()))?;
        Ok(Self {
            raw: raw.to_string(),
            at,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn format_friendly(&self) -> String {
        self.at.format(DUE_DISPLAY_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    ToDo,
    Deadline(Due),
    Event { from: String, to: String },
}

impl TaskKind {
    /// One-letter tag used both on screen and on disk.
    pub fn tag(&self) -> &'static str {
        match self {
            TaskKind::ToDo => "T",
            TaskKind::Deadline(_) => "D",
            TaskKind::Event { .. } => "E",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    priority: Priority,
    kind: TaskKind,
}

impl Task {
    fn new(description: &str, priority: Priority, kind: TaskKind) -> Result<Self, ValidationError> {
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(Self {
            description: description.to_string(),
            done: false,
            priority,
            kind,
        })
    }

    pub fn new_todo(description: &str, priority: Priority) -> Result<Self, ValidationError> {
        Self::new(description, priority, TaskKind::ToDo)
    }

    pub fn new_deadline(
        description: &str,
        priority: Priority,
        raw_due: &str,
    ) -> Result<Self, ValidationError> {
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let due = Due::parse(raw_due)?;
        Self::new(description, priority, TaskKind::Deadline(due))
    }

    pub fn new_event(
        description: &str,
        priority: Priority,
        from: &str,
        to: &str,
    ) -> Result<Self, ValidationError> {
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if from.trim().is_empty() {
            return Err(ValidationError::EmptyEventTime("from"));
        }
        if to.trim().is_empty() {
            return Err(ValidationError::EmptyEventTime("to"));
        }
        Self::new(
            description,
            priority,
            TaskKind::Event {
                from: from.to_string(),
                to: to.to_string(),
            },
        )
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_not_done(&mut self) {
        self.done = false;
    }

    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }
}
