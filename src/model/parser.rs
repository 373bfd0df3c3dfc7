// File: src/model/parser.rs
use crate::error::{Error, ParseError, Result, ValidationError};
use crate::model::item::{Due, Priority};

const BY_MARKER: &str = "/by";
const FROM_MARKER: &str = "/from";
const TO_MARKER: &str = "/to";
const PRIORITY_MARKER: &str = "/priority";

/// One fully validated user request. Indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Bye,
    Mark(usize),
    Unmark(usize),
    AddToDo {
        description: String,
        priority: Priority,
    },
    AddDeadline {
        description: String,
        priority: Priority,
        due: String,
    },
    AddEvent {
        description: String,
        priority: Priority,
        from: String,
        to: String,
    },
    Delete(usize),
    Find(String),
}

/// Parses one input line. Never touches any state.
pub fn parse(input: &str) -> Result<Command> {
    let line = input.trim();
    let (keyword, rest) = match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], line[idx..].trim_start()),
        None => (line, ""),
    };

    match keyword {
        "bye" if rest.is_empty() => Ok(Command::Bye),
        "list" if rest.is_empty() => Ok(Command::List),
        "mark" => parse_task_number(rest).map(Command::Mark),
        "unmark" => parse_task_number(rest).map(Command::Unmark),
        "todo" => parse_todo(rest),
        "deadline" => parse_deadline(rest),
        "event" => parse_event(rest),
        "delete" => parse_task_number(rest).map(Command::Delete),
        "find" => parse_find(rest),
        _ => Err(ParseError::UnrecognizedCommand.into()),
    }
}

/// Reads a 1-based task number from the first token and returns it 0-based.
fn parse_task_number(args: &str) -> Result<usize> {
    let token = args
        .split_whitespace()
        .next()
        .ok_or(ParseError::MissingArgument)?;
    match token.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(ParseError::NumberFormat(token.to_string()).into()),
    }
}

fn parse_todo(args: &str) -> Result<Command> {
    let (description, priority) = match split_marker(args, PRIORITY_MARKER) {
        Some((before, after)) => (before.trim(), Some(after.trim())),
        None => (args.trim(), None),
    };
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription.into());
    }
    let priority = match priority {
        Some(p) if !p.is_empty() => p.parse::<Priority>()?,
        _ => return Err(ParseError::MissingPriority.into()),
    };
    Ok(Command::AddToDo {
        description: description.to_string(),
        priority,
    })
}

fn parse_deadline(args: &str) -> Result<Command> {
    let (description, tail) =
        split_marker(args, BY_MARKER).ok_or(ParseError::InvalidDeadlineFormat)?;
    let (due, priority) =
        split_marker(tail, PRIORITY_MARKER).ok_or(ParseError::InvalidDeadlineFormat)?;
    let (description, due, priority) = (description.trim(), due.trim(), priority.trim());
    if due.is_empty() || priority.is_empty() {
        return Err(ParseError::InvalidDeadlineFormat.into());
    }
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription.into());
    }
    Due::parse(due)?;
    let priority = priority.parse::<Priority>()?;
    Ok(Command::AddDeadline {
        description: description.to_string(),
        priority,
        due: due.to_string(),
    })
}

fn parse_event(args: &str) -> Result<Command> {
    for marker in [FROM_MARKER, TO_MARKER, PRIORITY_MARKER] {
        if marker_positions(args, marker).len() != 1 {
            return Err(ParseError::InvalidEventFormat.into());
        }
    }
    let (description, tail) =
        split_marker(args, FROM_MARKER).ok_or(ParseError::InvalidEventFormat)?;
    let (from, tail) = split_marker(tail, TO_MARKER).ok_or(ParseError::InvalidEventFormat)?;
    let (to, priority) =
        split_marker(tail, PRIORITY_MARKER).ok_or(ParseError::InvalidEventFormat)?;

    let description = description.trim();
    let (from, to, priority) = (from.trim(), to.trim(), priority.trim());
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription.into());
    }
    if from.is_empty() {
        return Err(ValidationError::EmptyEventTime("from").into());
    }
    if to.is_empty() {
        return Err(ValidationError::EmptyEventTime("to").into());
    }
    if priority.is_empty() {
        return Err(ParseError::MissingPriority.into());
    }
    let priority = priority.parse::<Priority>()?;
    Ok(Command::AddEvent {
        description: description.to_string(),
        priority,
        from: from.to_string(),
        to: to.to_string(),
    })
}

fn parse_find(args: &str) -> Result<Command> {
    let keyword = args.trim();
    if keyword.is_empty() {
        return Err(Error::Parse(ParseError::EmptyKeyword));
    }
    Ok(Command::Find(keyword.to_string()))
}

/// Byte offsets where `marker` stands as a word of its own.
fn marker_positions(input: &str, marker: &str) -> Vec<usize> {
    input
        .match_indices(marker)
        .map(|(idx, _)| idx)
        .filter(|&idx| {
            let before_ok = input[..idx]
                .chars()
                .next_back()
                .is_none_or(char::is_whitespace);
            let after_ok = input[idx + marker.len()..]
                .chars()
                .next()
                .is_none_or(char::is_whitespace);
            before_ok && after_ok
        })
        .collect()
}

/// Splits around the first standalone occurrence of `marker`.
fn split_marker<'a>(input: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let idx = *marker_positions(input, marker).first()?;
    Some((&input[..idx], &input[idx + marker.len()..]))
}
