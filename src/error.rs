// File: ./src/error.rs
//! Error taxonomy for the task core.
//!
//! Every failure a single command can hit is one of these variants. The
//! controller turns them into a user-facing line with [`Error::user_message`];
//! none of them ends the session.
use std::path::PathBuf;
use thiserror::Error;

/// Prefix put in front of every message shown to the user.
pub const USER_ERROR_PREFIX: &str = "Urm... ";

/// Grammar-level failures raised by the command parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("I'm sorry I don't quite understand you.")]
    UnrecognizedCommand,
    #[error("Please input a valid task number.")]
    MissingArgument,
    #[error("Please input a valid task number.")]
    NumberFormat(String),
    #[error("Input a valid Todo task - todo task_name /priority priority")]
    MissingPriority,
    #[error("Input a valid Deadline task - deadline task_name /by yyyy-MM-dd HHmm /priority priority")]
    InvalidDeadlineFormat,
    #[error("Input a valid Event task - event task_name /from time /to time /priority priority")]
    InvalidEventFormat,
    #[error("The keyword to search for cannot be empty")]
    EmptyKeyword,
}

/// Field-level failures, shared by the parser and the model constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The description of task cannot be empty")]
    EmptyDescription,
    #[error("The '{0}' time of an event cannot be empty")]
    EmptyEventTime(&'static str),
    #[error("'{0}' is not a priority. Use LOW, MEDIUM, HIGH (or L, M, H)")]
    InvalidPriority(String),
    #[error("Input correct date format -> yyyy-mm-dd HHmm (got '{0}')")]
    DateFormat(String),
}

/// Why a persisted line could not be turned back into a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("unknown task kind '{0}'")]
    UnknownKind(String),
    #[error("kind '{kind}' expects {expected} fields, found {found}")]
    FieldCount {
        kind: String,
        expected: usize,
        found: usize,
    },
    #[error("invalid field value: {0}")]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Please input a valid task number. (task {number} does not exist, list has {len})")]
    Index { number: usize, len: usize },

    #[error("Could not update the task file '{}': {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt record '{line}': {reason}")]
    CorruptRecord {
        line: String,
        #[source]
        reason: RecordError,
    },
}

impl Error {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Message shown to the person at the keyboard.
    pub fn user_message(&self) -> String {
        format!("{}{}", USER_ERROR_PREFIX, self)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
