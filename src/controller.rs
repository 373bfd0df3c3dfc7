// File: src/controller.rs
//! Central logic controller for task operations.
//!
//! Every front end (console loop, tests, anything else) hands one input line
//! to [`TaskController::execute`] and shows whatever comes back. A command is
//! parsed, applied to the in-memory list and mirrored to the task file before
//! `execute` returns.
use crate::error::{Error, Result};
use crate::model::parser::{self, Command};
use crate::model::{Task, record};
use crate::storage::LocalStorage;
use crate::store::TaskList;
use crate::ui;
use std::path::PathBuf;

#[derive(Debug)]
pub struct TaskController {
    tasks: TaskList,
    storage: LocalStorage,
    finished: bool,
}

impl TaskController {
    /// Loads the list from `storage`, skipping unreadable records.
    pub fn new(storage: LocalStorage) -> Result<Self> {
        let tasks = TaskList::from_tasks(storage.load()?);
        Ok(Self {
            tasks,
            storage,
            finished: false,
        })
    }

    /// Opens (creating if needed) the task file at `path` and loads it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(LocalStorage::open(path)?)
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// True once `bye` has been handled.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Runs one line of user input. `Ok` carries the reply, `Err` the message
    /// explaining what went wrong; neither ends the session by itself.
    pub fn execute(&mut self, input: &str) -> std::result::Result<String, String> {
        let outcome = parser::parse(input).and_then(|command| {
            log::debug!("Applying {:?}", command);
            self.apply(command)
        });
        outcome.map_err(|e| {
            match &e {
                Error::Persistence { .. } => log::error!("{}", e),
                _ => log::debug!("Rejected input {:?}: {}", input, e),
            }
            e.user_message()
        })
    }

    /// Applies an already parsed command.
    ///
    /// A failed write after the in-memory change is reported as an error but
    /// the in-memory change is kept.
    pub fn apply(&mut self, command: Command) -> Result<String> {
        match command {
            Command::Bye => {
                self.finished = true;
                Ok(ui::FAREWELL.to_string())
            }
            Command::List => Ok(ui::listing(&self.tasks.render_all())),
            Command::AddToDo {
                description,
                priority,
            } => self.add(Task::new_todo(&description, priority)?),
            Command::AddDeadline {
                description,
                priority,
                due,
            } => self.add(Task::new_deadline(&description, priority, &due)?),
            Command::AddEvent {
                description,
                priority,
                from,
                to,
            } => self.add(Task::new_event(&description, priority, &from, &to)?),
            Command::Mark(index) => {
                let reply = ui::marked(self.tasks.mark(index)?);
                self.storage.set_done_at(index, true)?;
                Ok(reply)
            }
            Command::Unmark(index) => {
                let reply = ui::unmarked(self.tasks.unmark(index)?);
                self.storage.set_done_at(index, false)?;
                Ok(reply)
            }
            Command::Delete(index) => {
                let removed = self.tasks.delete(index)?;
                self.storage.remove_at(index)?;
                Ok(ui::removed(&removed, self.tasks.len()))
            }
            Command::Find(keyword) => Ok(ui::matches(&self.tasks.find(&keyword)?)),
        }
    }

    fn add(&mut self, task: Task) -> Result<String> {
        let line = record::encode(&task);
        let reply = ui::added(&task, self.tasks.len() + 1);
        self.tasks.add(task);
        self.storage.append(&line)?;
        Ok(reply)
    }
}
