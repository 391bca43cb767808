//! Deferred task execution for the notification auto-reset.

use std::fmt;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::trace;

use crate::error::Result;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks after a delay without blocking the caller.
///
/// Implementations may run a task inline from `schedule`; the store never
/// holds its own locks while scheduling.
pub trait Scheduler: Send + Sync + 'static {
    /// Run `task` once `delay` has elapsed. The returned handle may cancel it
    /// before it runs; dropping the handle leaves the task scheduled.
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;
}

/// Cancellation handle for a scheduled [`Task`].
pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TaskHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle for a task that cannot be cancelled.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    /// Prevent the task from running. No effect if it already ran.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

/// Spawns each task onto a Tokio runtime behind a `sleep`.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running on.
    pub fn try_current() -> Result<Self> {
        Ok(Self::new(Handle::try_current()?))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        trace!(?delay, "spawning delayed task");
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        let abort = join.abort_handle();
        TaskHandle::new(move || abort.abort())
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    /// Holds tasks until the test fires them.
    #[derive(Clone, Default)]
    pub(crate) struct ManualScheduler {
        inner: Arc<Mutex<Pending>>,
    }

    #[derive(Default)]
    struct Pending {
        next_id: u64,
        tasks: Vec<(u64, Duration, Task)>,
    }

    impl ManualScheduler {
        pub(crate) fn pending(&self) -> usize {
            self.inner.lock().tasks.len()
        }

        pub(crate) fn delays(&self) -> Vec<Duration> {
            self.inner.lock().tasks.iter().map(|(_, d, _)| *d).collect()
        }

        /// Run every task still scheduled, in scheduling order.
        pub(crate) fn fire_all(&self) {
            let tasks = std::mem::take(&mut self.inner.lock().tasks);
            for (_, _, task) in tasks {
                task();
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
            let mut pending = self.inner.lock();
            let id = pending.next_id;
            pending.next_id += 1;
            pending.tasks.push((id, delay, task));

            let inner = Arc::clone(&self.inner);
            TaskHandle::new(move || inner.lock().tasks.retain(|(i, _, _)| *i != id))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::manual::ManualScheduler;
    use super::*;

    fn counter_task(counter: &Arc<AtomicUsize>) -> Task {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_runs_after_delay() {
        let scheduler = TokioScheduler::try_current().unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        let _handle = scheduler.schedule(Duration::from_millis(1500), counter_task(&counter));

        tokio::time::sleep(Duration::from_millis(1400)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_cancel() {
        let scheduler = TokioScheduler::try_current().unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        let handle = scheduler.schedule(Duration::from_millis(1500), counter_task(&counter));
        handle.cancel();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_try_current_outside_runtime() {
        assert!(TokioScheduler::try_current().is_err());
    }

    #[test]
    fn test_manual_scheduler_cancel_removes_task() {
        let scheduler = ManualScheduler::default();
        let counter = Arc::new(AtomicUsize::new(0));

        let first = scheduler.schedule(Duration::from_secs(1), counter_task(&counter));
        let _second = scheduler.schedule(Duration::from_secs(2), counter_task(&counter));
        assert_eq!(scheduler.pending(), 2);

        first.cancel();
        assert_eq!(scheduler.delays(), vec![Duration::from_secs(2)]);

        scheduler.fire_all();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_detached_handle_cancel_is_noop() {
        let handle = TaskHandle::detached();
        assert_eq!(format!("{handle:?}"), "TaskHandle { cancellable: false }");
        handle.cancel();
    }
}
