//! Background jobs polled from the GUI thread
//!
//! Each job runs on its own thread with a current-thread tokio runtime and
//! reports back over a channel that `update` polls every frame.

use anyhow::{anyhow, Result};
use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tokio::runtime::Builder;

/// Helper struct for async jobs - polls a background task
pub struct AsyncJob<T> {
    receiver: Option<Receiver<Result<T>>>,
}

impl<T> AsyncJob<T> {
    /// Create a new async job with the given receiver
    pub fn new(receiver: Receiver<Result<T>>) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }

    /// Poll the job for completion
    /// Returns Some(result) if the job has completed, None if still running
    pub fn poll(&mut self) -> Option<Result<T>> {
        if let Some(rx) = &self.receiver {
            match rx.try_recv() {
                Ok(res) => {
                    self.receiver = None;
                    return Some(res);
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.receiver = None;
                    return Some(Err(anyhow!("Worker task disconnected")));
                }
            }
        }
        None
    }

    /// Check if the job is still running
    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Run `builder()` to completion on a worker thread
pub fn spawn_job<T, FutBuilder, Fut>(builder: FutBuilder) -> AsyncJob<T>
where
    T: Send + 'static,
    FutBuilder: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T>> + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = match Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime.block_on(builder()),
            Err(e) => Err(anyhow!("Failed to create async runtime: {}", e)),
        };
        // The receiver is gone when the screen was left; nothing to report to
        let _ = tx.send(result);
    });
    AsyncJob::new(rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for<T>(job: &mut AsyncJob<T>) -> Result<T> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(res) = job.poll() {
                return res;
            }
            assert!(Instant::now() < deadline, "job did not finish in time");
            thread::sleep(Duration::from_millis(5));
        }
    }

    // ==================== AsyncJob tests ====================

    #[test]
    fn test_spawned_job_delivers_result_once() {
        let mut job = spawn_job(|| async { Ok(21 * 2) });
        assert_eq!(wait_for(&mut job).unwrap(), 42);
        assert!(!job.is_running());
        assert!(job.poll().is_none());
    }

    #[test]
    fn test_spawned_job_error_is_forwarded() {
        let mut job: AsyncJob<()> = spawn_job(|| async { Err(anyhow!("boom")) });
        assert_eq!(wait_for(&mut job).unwrap_err().to_string(), "boom");
    }

    #[test]
    fn test_dropped_sender_reports_disconnect() {
        let (tx, rx) = mpsc::channel::<Result<u8>>();
        drop(tx);
        let mut job = AsyncJob::new(rx);
        let err = job.poll().unwrap().unwrap_err();
        assert!(err.to_string().contains("disconnected"));
    }
}
