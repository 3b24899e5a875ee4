use crate::common::TaskError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Bounded pool for blocking filesystem and process work.
///
/// At most `n_tasks` closures run at once; the rest wait on the semaphore
/// inside their own task, so spawning never blocks the caller.
pub struct TaskPool {
    semaphore: Arc<Semaphore>,
    size: usize,
}

impl TaskPool {
    pub fn new(n_tasks: usize) -> TaskPool {
        let size = n_tasks.max(1);
        TaskPool {
            semaphore: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Run `func` on the blocking thread pool once a permit is free.
    pub fn spawn_blocking<F, T>(&self, func: F) -> JoinHandle<Result<T, TaskError>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let semaphore = self.semaphore.clone();
        tokio::spawn(async move {
            let Ok(permit) = semaphore.acquire_owned().await else {
                return Err(TaskError::Closed);
            };
            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                func()
            })
            .await
            .map_err(|e| TaskError::Panicked(e.to_string()))
        })
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.semaphore.close();
    }
}
