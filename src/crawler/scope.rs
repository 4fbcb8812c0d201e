//! Fork-join task scope
//!
//! Tasks running inside the scope can spawn further tasks through a cloned
//! `Spawner`. `TaskScope::join` waits for the whole transitive set of spawned
//! tasks, not just the ones spawned before it was called. The first task that
//! fails aborts every other task and its error becomes the result of `join`.

use crate::CrawlError;
use futures::future::BoxFuture;
use std::future::Future;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::{JoinError, JoinSet};

type Task = BoxFuture<'static, Result<(), CrawlError>>;

/// Handle for submitting tasks to a `TaskScope`
#[derive(Clone)]
pub struct Spawner {
    tx: UnboundedSender<Task>,
}

impl Spawner {
    /// Submits a task to the scope without waiting for it
    ///
    /// Returns false if the scope has already finished or aborted, in which
    /// case the task is dropped without running.
    pub fn spawn<F>(&self, task: F) -> bool
    where
        F: Future<Output = Result<(), CrawlError>> + Send + 'static,
    {
        if self.tx.send(Box::pin(task)).is_err() {
            tracing::trace!("Task scope closed, dropping submitted task");
            return false;
        }
        true
    }
}

/// Owner side of the scope
pub struct TaskScope {
    spawner: Spawner,
    rx: UnboundedReceiver<Task>,
    tasks: JoinSet<Result<(), CrawlError>>,
    completed: usize,
}

impl TaskScope {
    /// Creates an empty scope
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            spawner: Spawner { tx },
            rx,
            tasks: JoinSet::new(),
            completed: 0,
        }
    }

    /// Returns a handle that can spawn into this scope from any task
    pub fn spawner(&self) -> Spawner {
        self.spawner.clone()
    }

    /// Waits until every task in the scope has finished
    ///
    /// Returns the number of tasks that ran to completion. On the first task
    /// error or panic, the remaining tasks are aborted and awaited, further
    /// submissions are refused, and the error is returned.
    pub async fn join(mut self) -> Result<usize, CrawlError> {
        loop {
            // A task submits its children before it completes, so once the
            // channel is drained and no task is running, nothing can be left.
            while let Ok(task) = self.rx.try_recv() {
                self.tasks.spawn(task);
            }

            if self.tasks.is_empty() {
                return Ok(self.completed);
            }

            tokio::select! {
                Some(task) = self.rx.recv() => {
                    self.tasks.spawn(task);
                }
                Some(joined) = self.tasks.join_next() => {
                    if let Err(e) = flatten(joined) {
                        self.abort().await;
                        return Err(e);
                    }
                    self.completed += 1;
                }
            }
        }
    }

    async fn abort(&mut self) {
        tracing::debug!("Aborting {} outstanding tasks", self.tasks.len());
        self.rx.close();
        self.tasks.abort_all();
        while self.tasks.join_next().await.is_some() {}
    }
}

impl Default for TaskScope {
    fn default() -> Self {
        Self::new()
    }
}

fn flatten(joined: Result<Result<(), CrawlError>, JoinError>) -> Result<(), CrawlError> {
    match joined {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(CrawlError::TaskFailed(format!("task panicked: {}", e))),
        Err(e) => Err(CrawlError::TaskFailed(e.to_string())),
    }
}
