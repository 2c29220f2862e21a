use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use log::debug;

/// A shared flag that asks a running evaluation to stop.
///
/// Clones share the same flag, so a token can be handed to another thread
/// and cancelled from there. Evaluation only observes the flag at its
/// checkpoints: every expression evaluated and every list element produced.
///
/// # Example
/// ```
/// use morgana::interpreter::evaluator::cancel::CancellationToken;
///
/// let token = CancellationToken::new();
/// let remote = token.clone();
/// std::thread::spawn(move || remote.cancel()).join().unwrap();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. May be called from any thread, any number of
    /// times.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Cancels the token once `timeout` has elapsed.
    ///
    /// The timer runs on its own thread until it fires or the returned guard
    /// is dropped, whichever comes first.
    ///
    /// # Parameters
    /// - `timeout`: Time allowed before cancellation.
    ///
    /// # Returns
    /// A [`Deadline`] guard; keep it alive for as long as the deadline should
    /// apply.
    #[must_use = "dropping the deadline stops its timer"]
    pub fn cancel_after(&self, timeout: Duration) -> Deadline {
        let (stop, stopped) = mpsc::channel::<()>();
        let token = self.clone();

        let timer = thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = stopped.recv_timeout(timeout) {
                debug!("deadline of {timeout:?} elapsed, cancelling evaluation");
                token.cancel();
            }
        });

        Deadline { stop:  Some(stop),
                   timer: Some(timer), }
    }
}

/// Guard for a running deadline timer.
///
/// Dropping the guard stops the timer and waits for its thread to finish;
/// a token that was already cancelled stays cancelled.
#[derive(Debug)]
pub struct Deadline {
    stop:  Option<mpsc::Sender<()>>,
    timer: Option<JoinHandle<()>>,
}

impl Drop for Deadline {
    fn drop(&mut self) {
        drop(self.stop.take());
        if let Some(timer) = self.timer.take() {
            let _ = timer.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn deadline_cancels_after_timeout() {
        let token = CancellationToken::new();
        let _deadline = token.cancel_after(Duration::from_millis(10));

        let start = Instant::now();
        while !token.is_cancelled() {
            assert!(start.elapsed() < Duration::from_secs(5), "deadline never fired");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn dropped_deadline_never_fires() {
        let token = CancellationToken::new();
        drop(token.cancel_after(Duration::from_millis(20)));

        thread::sleep(Duration::from_millis(50));
        assert!(!token.is_cancelled());
    }
}
