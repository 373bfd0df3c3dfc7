// File: src/store.rs
use crate::error::{Error, ParseError, Result};
use crate::model::{Task, TaskDisplay};

pub const EMPTY_LIST_MESSAGE: &str = "Your task list is empty!";

/// Ordered, index-addressed tasks. Indices are 0-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.tasks.len() {
            return Err(Error::Index {
                number: index + 1,
                len: self.tasks.len(),
            });
        }
        Ok(())
    }

    /// Appends and returns the new size.
    pub fn add(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len()
    }

    pub fn get(&self, index: usize) -> Result<&Task> {
        self.check_index(index)?;
        Ok(&self.tasks[index])
    }

    pub fn delete(&mut self, index: usize) -> Result<Task> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    pub fn mark(&mut self, index: usize) -> Result<&Task> {
        self.check_index(index)?;
        self.tasks[index].mark_done();
        Ok(&self.tasks[index])
    }

    pub fn unmark(&mut self, index: usize) -> Result<&Task> {
        self.check_index(index)?;
        self.tasks[index].mark_not_done();
        Ok(&self.tasks[index])
    }

    /// Case-sensitive substring match on descriptions, in list order.
    pub fn find(&self, keyword: &str) -> Result<Vec<&Task>> {
        if keyword.is_empty() {
            return Err(ParseError::EmptyKeyword.into());
        }
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.description().contains(keyword))
            .collect())
    }

    pub fn render_all(&self) -> String {
        if self.tasks.is_empty() {
            return EMPTY_LIST_MESSAGE.to_string();
        }
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}. {}", i + 1, t.render()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
