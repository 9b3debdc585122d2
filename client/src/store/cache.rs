use std::collections::HashMap;

use dailyflo::task::{Task, TaskId};

/// The locally cached task list.
///
/// The cache is a plain projection of the last full fetch; it never talks to
/// the network itself. A miss is handled by the caller with a full re-fetch.
#[derive(Debug, Default, Clone)]
pub struct TaskCache {
    tasks: HashMap<TaskId, Task>,
}

impl TaskCache {
    pub fn new() -> TaskCache {
        TaskCache::default()
    }

    pub fn get(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.get(&task_id)
    }

    pub fn upsert(&mut self, task: Task) {
        self.tasks.insert(task.id, task);
    }

    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks.into_iter().map(|task| (task.id, task)).collect();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
