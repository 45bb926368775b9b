mod list;
mod tools;

pub use list::{Task, TaskDescription, TaskError, TaskList};
pub use tools::task_tools;
