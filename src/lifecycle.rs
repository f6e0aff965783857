//! Lifecycle primitives: cancellable polling tasks and one-time setup guards.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Locks a std mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A repeating job owned by whoever holds the handle.
///
/// The job is cancelled when the handle is dropped, so a page that forgets
/// its task cannot leak a timer.
#[derive(Debug)]
pub struct PollTask {
    name: String,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl PollTask {
    /// Runs `job` for the first time after one `period`, then every `period`.
    ///
    /// Callers do their first load themselves, so the task never fires at once.
    pub fn spawn_after<F, Fut>(name: impl Into<String>, period: Duration, mut job: F) -> Self
    where
        F: FnMut(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        let first = Instant::now() + period;
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(first, period);
            // A slow fetch delays the next run instead of bursting to catch up
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut tick: u64 = 0;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = job(tick) => {}
                }
                tick = tick.wrapping_add(1);
            }
            tracing::debug!(task = %task_name, "poll task stopped");
        });
        tracing::debug!(task = %name, period_ms = period.as_millis() as u64, "poll task started");
        Self { name, cancel, handle }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// True once the task has observed cancellation and exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Runs a setup closure at most once per owner.
#[derive(Debug, Default)]
pub struct SetupOnce(AtomicBool);

impl SetupOnce {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Returns true if `setup` ran on this call.
    pub fn run<F: FnOnce()>(&self, setup: F) -> bool {
        if self.0.swap(true, Ordering::AcqRel) {
            return false;
        }
        setup();
        true
    }
}
