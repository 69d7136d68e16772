pub mod data_loader;

use crate::ui::screens::ScreenKind;
use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

struct TrackedTask {
    scope: Option<ScreenKind>,
    handle: JoinHandle<()>,
}

/// Manages background tasks for data loading
/// Tracks running tasks and provides cancellation support
pub struct BackgroundTaskManager {
    tasks: HashMap<String, TrackedTask>,
    next_id: u64,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            next_id: 0,
        }
    }

    /// Spawn a background task.
    ///
    /// A scoped task (a screen load) replaces a running task with the same
    /// ID. Unscoped tasks are mutations and are never aborted by a later
    /// job; each one is tracked under its own ID.
    pub fn spawn_load_task<F>(&mut self, task_id: String, scope: Option<ScreenKind>, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|_, task| !task.handle.is_finished());

        let task_id = match scope {
            Some(_) => {
                // Cancel existing task with same ID (prevents stale data)
                if let Some(task) = self.tasks.remove(&task_id) {
                    tracing::debug!("Aborting previous task {}", task_id);
                    task.handle.abort();
                }
                task_id
            }
            None => {
                self.next_id += 1;
                format!("{}#{}", task_id, self.next_id)
            }
        };

        let handle = tokio::spawn(future);
        self.tasks.insert(task_id, TrackedTask { scope, handle });
    }

    /// Cancel the loads that belong to a screen the user just left
    pub fn cancel_scope(&mut self, scope: ScreenKind) {
        self.tasks.retain(|task_id, task| {
            if task.scope == Some(scope) {
                tracing::debug!("Cancelling {} after leaving {:?}", task_id, scope);
                task.handle.abort();
                false
            } else {
                true
            }
        });
    }

    /// Cancel all running tasks (used on shutdown)
    pub fn cancel_all(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn pending() -> impl Future<Output = ()> + Send + 'static {
        tokio::time::sleep(Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_same_key_replaces_task() {
        let mut manager = BackgroundTaskManager::new();
        manager.spawn_load_task("load_expenses".into(), Some(ScreenKind::Expenses), pending());
        manager.spawn_load_task("load_expenses".into(), Some(ScreenKind::Expenses), pending());
        assert_eq!(manager.len(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_mutations_both_finish() {
        let mut manager = BackgroundTaskManager::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        for id in ["A", "B"] {
            let tx = tx.clone();
            manager.spawn_load_task("delete_expenses".into(), None, async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                let _ = tx.send(id);
            });
        }
        assert_eq!(manager.len(), 2);
        drop(tx);

        let mut finished = Vec::new();
        while let Some(id) = rx.recv().await {
            finished.push(id);
        }
        finished.sort();
        assert_eq!(finished, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_cancel_scope_keeps_other_tasks() {
        let mut manager = BackgroundTaskManager::new();
        manager.spawn_load_task("load_expenses".into(), Some(ScreenKind::Expenses), pending());
        manager.spawn_load_task("load_incomes".into(), Some(ScreenKind::Incomes), pending());
        manager.spawn_load_task("save_expense".into(), None, pending());

        manager.cancel_scope(ScreenKind::Expenses);
        assert_eq!(manager.len(), 2);

        manager.cancel_all();
        assert!(manager.is_empty());
    }
}
