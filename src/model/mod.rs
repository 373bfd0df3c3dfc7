// File: ./src/model/mod.rs
pub mod display;
pub mod item;
pub mod parser;
pub mod record;

pub use display::TaskDisplay;
pub use item::{Due, Priority, Task, TaskKind};
pub use parser::Command;
