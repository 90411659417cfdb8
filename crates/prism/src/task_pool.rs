//! Background task execution for off-frame geometry generation.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use async_executor::{Executor, Task};

/// A small thread pool running async tasks.
///
/// Chart backends spawn work here and poll the returned [`Task`] once per
/// frame, so the frame loop never blocks on generation.
///
/// # Example
///
/// ```
/// use prism::TaskPool;
///
/// let pool = TaskPool::new(2).unwrap();
/// let task = pool.spawn(async { 6 * 7 });
/// assert_eq!(futures_lite::future::block_on(task), 42);
/// ```
pub struct TaskPool {
    executor: Arc<Executor<'static>>,
    threads: Vec<thread::JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl std::fmt::Debug for TaskPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskPool")
            .field("threads", &self.threads.len())
            .field("shutdown", &self.shutdown.load(Ordering::Relaxed))
            .finish()
    }
}

impl TaskPool {
    /// Start a pool with `num_threads` workers (at least one).
    pub fn new(num_threads: usize) -> std::io::Result<Self> {
        let num_threads = num_threads.max(1);
        let executor = Arc::new(Executor::new());
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut threads = Vec::with_capacity(num_threads);

        for i in 0..num_threads {
            let exec = executor.clone();
            let shutdown_flag = shutdown.clone();

            let spawned = thread::Builder::new()
                .name(format!("prism-task-{}", i))
                .spawn(move || {
                    while !shutdown_flag.load(Ordering::Relaxed) {
                        if !exec.try_tick() {
                            thread::sleep(Duration::from_millis(1));
                        }
                    }
                });

            match spawned {
                Ok(handle) => threads.push(handle),
                Err(e) => {
                    tracing::error!("Failed to spawn task pool thread {}: {}", i, e);
                    shutdown.store(true, Ordering::Relaxed);
                    return Err(e);
                }
            }
        }

        tracing::debug!("TaskPool created with {} threads", num_threads);

        Ok(Self {
            executor,
            threads,
            shutdown,
        })
    }

    /// Leave one core for the frame loop: `max(1, num_cpus - 1)` workers.
    pub fn default_threads() -> std::io::Result<Self> {
        Self::new(num_cpus::get().saturating_sub(1).max(1))
    }

    /// Spawn a task. Dropping the returned [`Task`] cancels it.
    pub fn spawn<T>(&self, future: impl Future<Output = T> + Send + 'static) -> Task<T>
    where
        T: Send + 'static,
    {
        self.executor.spawn(future)
    }

    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Stop the workers and join them.
    ///
    /// A task already running finishes; queued tasks are never started.
    pub fn shutdown(mut self) {
        self.join_all();
    }

    fn join_all(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        let threads = std::mem::take(&mut self.threads);
        if threads.is_empty() {
            return;
        }
        tracing::debug!("Shutting down TaskPool with {} threads", threads.len());
        for handle in threads {
            if let Err(e) = handle.join() {
                tracing::error!("Task pool thread panicked: {:?}", e);
            }
        }
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
