use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    /// Higher value means more urgent. May be negative.
    pub priority: i64,
    pub completed: bool,
}

/// Task as described by the model; omitted fields take defaults on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescription {
    pub title: String,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TaskDescription {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = Some(markdown.into());
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = Some(true);
        self
    }

    fn into_task(self, fallback_priority: i64) -> Task {
        Task {
            title: self.title,
            markdown: self.markdown,
            priority: self.priority.unwrap_or(fallback_priority),
            completed: self.completed.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("index {index} is out of range for {len} tasks")]
    OutOfRange { index: usize, len: usize },
    #[error("priority {priority} does not fit at index {index}")]
    PriorityOrder { index: usize, priority: i64 },
}

/// Plan steps kept sorted by priority, highest first.
///
/// The first incomplete entry is the active task. Every mutation keeps the
/// ordering; a mutation that would break it is refused and leaves the list
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Replaces the whole list. Returns, for each input in order, the index it
    /// ended up at. Equal priorities keep their input order.
    pub fn set(&mut self, descriptions: Vec<TaskDescription>) -> Vec<usize> {
        let mut ranked: Vec<(usize, Task)> = descriptions
            .into_iter()
            .map(|description| description.into_task(0))
            .enumerate()
            .collect();
        ranked.sort_by(|(_, a), (_, b)| b.priority.cmp(&a.priority));

        let mut indices = vec![0; ranked.len()];
        for (position, (original, _)) in ranked.iter().enumerate() {
            indices[*original] = position;
        }
        self.tasks = ranked.into_iter().map(|(_, task)| task).collect();
        indices
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn active_index(&self) -> Option<usize> {
        self.tasks.iter().position(|task| !task.completed)
    }

    pub fn active(&self) -> Option<&Task> {
        self.tasks.iter().find(|task| !task.completed)
    }

    /// Markdown detail of the active task, or its title when there is none.
    pub fn active_info(&self) -> Option<&str> {
        self.active().map(|task| match task.markdown.as_deref() {
            Some(markdown) if !markdown.is_empty() => markdown,
            _ => task.title.as_str(),
        })
    }

    /// Completes the active task and returns its index.
    pub fn mark_completed(&mut self) -> Option<usize> {
        let index = self.active_index()?;
        self.tasks[index].completed = true;
        Some(index)
    }

    pub fn mark_incomplete(&mut self, index: usize) -> Option<&Task> {
        let task = self.tasks.get_mut(index)?;
        task.completed = false;
        Some(task)
    }

    /// Inserts by priority: after every task of equal or higher priority.
    /// Without a priority the task goes to the back.
    pub fn add(&mut self, description: TaskDescription) -> usize {
        let slot = description.priority.and_then(|priority| {
            self.tasks
                .iter()
                .position(|task| task.priority < priority)
        });
        match slot {
            Some(index) => {
                self.tasks.insert(index, description.into_task(0));
                index
            }
            None => {
                let fallback = self.tasks.last().map_or(0, |task| task.priority);
                self.tasks.push(description.into_task(fallback));
                self.tasks.len() - 1
            }
        }
    }

    /// Appends a task. Without a priority it takes the lowest one in the list.
    pub fn add_back(&mut self, description: TaskDescription) -> Result<usize, TaskError> {
        let last = self.tasks.last().map(|task| task.priority);
        if let (Some(last), Some(priority)) = (last, description.priority) {
            if last < priority {
                return Err(TaskError::PriorityOrder {
                    index: self.tasks.len(),
                    priority,
                });
            }
        }
        self.tasks.push(description.into_task(last.unwrap_or(0)));
        Ok(self.tasks.len() - 1)
    }

    /// Inserts before the active task, sharing its priority unless one is given.
    pub fn add_front(&mut self, description: TaskDescription) -> Result<usize, TaskError> {
        match self.active_index() {
            Some(index) => self.insert(index, description),
            None => self.add_back(description),
        }
    }

    /// Positional insert. An explicit priority must sit between its neighbours;
    /// a missing one is borrowed from the next task, else the previous one.
    pub fn insert(&mut self, index: usize, description: TaskDescription) -> Result<usize, TaskError> {
        if index > self.tasks.len() {
            return Err(TaskError::OutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        let previous = index
            .checked_sub(1)
            .and_then(|i| self.tasks.get(i))
            .map(|task| task.priority);
        let next = self.tasks.get(index).map(|task| task.priority);

        if let Some(priority) = description.priority {
            let fits_previous = previous.is_none_or(|p| p >= priority);
            let fits_next = next.is_none_or(|n| n <= priority);
            if !(fits_previous && fits_next) {
                return Err(TaskError::PriorityOrder { index, priority });
            }
        }

        let fallback = next.or(previous).unwrap_or(0);
        self.tasks.insert(index, description.into_task(fallback));
        Ok(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<Task> {
        (index < self.tasks.len()).then(|| self.tasks.remove(index))
    }

    pub fn is_sorted(&self) -> bool {
        self.tasks
            .windows(2)
            .all(|pair| pair[0].priority >= pair[1].priority)
    }
}
