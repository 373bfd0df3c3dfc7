// File: ./src/model/record.rs
//! One task <-> one line of the task file.
//!
//! ```text
//! T | false | LOW | Read book
//! D | true | HIGH | Submit report | 2025-09-15 1800
//! E | false | MEDIUM | Project meeting | Mon 2pm | 4pm
//! ```
//!
//! Inside a field `\` is written as `\\` and `|` as `\|`, so the separator
//! never appears in user text. Event lines from older files that keep both
//! times in one `from - to` field are still read.
use crate::error::RecordError;
use crate::model::item::{Priority, Task, TaskKind};

pub const FIELD_SEPARATOR: &str = " | ";
const LEGACY_EVENT_SEPARATOR: &str = " - ";
/// Position of the done flag in every record.
pub const DONE_FIELD: usize = 1;

/// Escapes `\`, `|` and line breaks so that a record stays on one line.
pub fn escape_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '|' => out.push_str("\\|"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

pub fn unescape_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                // A trailing lone backslash is kept as is.
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Splits a record on unescaped `|`, dropping the single space of padding on
/// each side. Fields are returned still escaped.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '|' => {
                fields.push(&line[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);

    let last = fields.len() - 1;
    fields
        .into_iter()
        .enumerate()
        .map(|(i, f)| {
            let f = if i > 0 { f.strip_prefix(' ').unwrap_or(f) } else { f };
            if i < last {
                f.strip_suffix(' ').unwrap_or(f)
            } else {
                f
            }
        })
        .collect()
}

pub fn encode(task: &Task) -> String {
    let mut fields = vec![
        task.kind().tag().to_string(),
        task.is_done().to_string(),
        task.priority().as_str().to_string(),
        escape_field(task.description()),
    ];
    match task.kind() {
        TaskKind::ToDo => {}
        TaskKind::Deadline(due) => fields.push(escape_field(due.raw())),
        TaskKind::Event { from, to } => {
            fields.push(escape_field(from));
            fields.push(escape_field(to));
        }
    }
    fields.join(FIELD_SEPARATOR)
}

pub fn decode(line: &str) -> Result<Task, RecordError> {
    let fields = split_fields(line.trim_end_matches(['\r', '\n']));
    let kind = fields[0].trim();

    let expected: &[usize] = match kind {
        "T" => &[4],
        "D" => &[5],
        "E" => &[6, 5],
        other => return Err(RecordError::UnknownKind(other.to_string())),
    };
    if !expected.contains(&fields.len()) {
        return Err(RecordError::FieldCount {
            kind: kind.to_string(),
            expected: expected[0],
            found: fields.len(),
        });
    }

    let done = fields[DONE_FIELD].trim().eq_ignore_ascii_case("true");
    let priority: Priority = fields[2].parse()?;
    let description = unescape_field(fields[3]);

    let mut task = match kind {
        "T" => Task::new_todo(&description, priority)?,
        "D" => Task::new_deadline(&description, priority, &unescape_field(fields[4]))?,
        _ => {
            let (from, to) = if fields.len() == 6 {
                (unescape_field(fields[4]), unescape_field(fields[5]))
            } else {
                let joined = unescape_field(fields[4]);
                match joined.split_once(LEGACY_EVENT_SEPARATOR) {
                    Some((from, to)) => (from.to_string(), to.to_string()),
                    None => {
                        return Err(RecordError::FieldCount {
                            kind: kind.to_string(),
                            expected: 6,
                            found: 5,
                        });
                    }
                }
            };
            Task::new_event(&description, priority, &from, &to)?
        }
    };
    task.set_done(done);
    Ok(task)
}

/// Rewrites only the done flag of an encoded record, leaving every other byte alone.
pub fn with_done_flag(line: &str, done: bool) -> Result<String, RecordError> {
    let mut fields = split_fields(line);
    if fields.len() <= DONE_FIELD {
        return Err(RecordError::FieldCount {
            kind: fields[0].trim().to_string(),
            expected: DONE_FIELD + 1,
            found: fields.len(),
        });
    }
    let flag = done.to_string();
    fields[DONE_FIELD] = &flag;
    Ok(fields.join(FIELD_SEPARATOR))
}
