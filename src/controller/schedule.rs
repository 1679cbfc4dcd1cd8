//! Delayed, cancellable tasks on the tokio runtime.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to a task started by [`schedule`].
///
/// Cancelling is idempotent. Dropping the handle cancels the task too, so
/// replacing a stored handle is enough to supersede the previous task.
#[derive(Debug)]
pub struct TaskHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl TaskHandle {
    /// Prevents the task from running if its delay has not elapsed yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True once the task either ran or observed its cancellation.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Runs `task` after `delay` unless the returned handle is cancelled first.
///
/// Must be called from within a tokio runtime.
pub fn schedule<F>(delay: Duration, task: F) -> TaskHandle
where
    F: FnOnce() + Send + 'static,
{
    let token = CancellationToken::new();
    let cancelled = token.clone();

    let join = tokio::spawn(async move {
        tokio::select! {
            () = cancelled.cancelled() => {
                tracing::debug!("Scheduled task cancelled before its {:?} delay elapsed", delay);
            }
            () = tokio::time::sleep(delay) => {
                if !cancelled.is_cancelled() {
                    task();
                }
            }
        }
    });

    TaskHandle { token, join }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn runs_after_delay() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let handle = schedule(Duration::from_millis(100), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        check!(hits.load(Ordering::SeqCst) == 0);

        tokio::time::sleep(Duration::from_millis(60)).await;
        check!(hits.load(Ordering::SeqCst) == 1);
        check!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_run() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let handle = schedule(Duration::from_millis(100), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        handle.cancel();
        handle.cancel();
        check!(handle.is_cancelled());
        tokio::time::sleep(Duration::from_millis(200)).await;
        check!(hits.load(Ordering::SeqCst) == 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        drop(schedule(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        tokio::time::sleep(Duration::from_millis(50)).await;
        check!(hits.load(Ordering::SeqCst) == 0);
    }
}
