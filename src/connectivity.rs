//! Backend reachability and the offline overlay.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::api::Transport;
use crate::lifecycle::PollTask;
use crate::surface::Surface;

/// Shared online/offline flag. Only actual transitions touch the overlay.
#[derive(Clone)]
pub struct Connectivity {
    offline: Arc<AtomicBool>,
    surface: Arc<dyn Surface>,
}

impl Connectivity {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self { offline: Arc::new(AtomicBool::new(false)), surface }
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::Acquire)
    }

    pub fn mark_offline(&self) {
        if !self.offline.swap(true, Ordering::AcqRel) {
            tracing::warn!("backend unreachable, showing offline overlay");
            self.surface.set_offline_overlay(true);
        }
    }

    pub fn mark_online(&self) {
        if self.offline.swap(false, Ordering::AcqRel) {
            tracing::info!("backend reachable again");
            self.surface.set_offline_overlay(false);
        }
    }
}

/// Periodic `HEAD /api/server` probe.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    transport: Arc<dyn Transport>,
    connectivity: Connectivity,
    period: Duration,
    timeout: Duration,
}

impl ConnectivityMonitor {
    pub fn new(transport: Arc<dyn Transport>, connectivity: Connectivity, period: Duration, timeout: Duration) -> Self {
        Self { transport, connectivity, period, timeout }
    }

    /// Runs one probe and updates the flag. Returns whether the backend answered.
    pub async fn probe_once(&self) -> bool {
        let reachable = match tokio::time::timeout(self.timeout, self.transport.probe()).await {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                tracing::debug!(error = %err, "connectivity probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(timeout_ms = self.timeout.as_millis() as u64, "connectivity probe timed out");
                false
            }
        };
        if reachable {
            self.connectivity.mark_online();
        } else {
            self.connectivity.mark_offline();
        }
        reachable
    }

    /// Starts probing; the first probe runs one period from now.
    pub fn spawn(&self) -> PollTask {
        let monitor = self.clone();
        PollTask::spawn_after("connectivity", self.period, move |_| {
            let monitor = monitor.clone();
            async move {
                monitor.probe_once().await;
            }
        })
    }
}
