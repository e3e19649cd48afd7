//! Readiness Polling
//!
//! A container is handed to callers only after its output proves it started. The
//! [`ReadinessPoller`] takes one log snapshot per tick and evaluates a pure
//! predicate against it; the [`WaitStrategy`] schedules ticks and bounds the whole
//! wait with a timeout.
//!
//! ```text
//!   Waiting --(snapshot matches marker)--> Ready
//!      |
//!      +--(timeout elapses)--> ReadinessTimeout
//! ```

use crate::error::{BuildError, RuntimeError};
use crate::runtime::{ContainerId, ContainerRuntime};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Poller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Waiting,
    Ready,
}

/// How a log snapshot is compared with the startup markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerMatch {
    /// The whole snapshot must equal a marker
    #[default]
    Exact,
    /// The snapshot must contain a marker anywhere
    Contains,
}

/// Readiness predicate over a stdout snapshot. Pure; safe to re-evaluate.
pub fn evaluate(stdout: &str, markers: &[&str], marker_match: MarkerMatch) -> Readiness {
    let matched = match marker_match {
        MarkerMatch::Exact => markers.iter().any(|marker| *marker == stdout),
        MarkerMatch::Contains => markers.iter().any(|marker| stdout.contains(marker)),
    };
    if matched {
        Readiness::Ready
    } else {
        Readiness::Waiting
    }
}

/// Fetches one output snapshot per call and evaluates it against the markers
pub struct ReadinessPoller<'a> {
    runtime: &'a dyn ContainerRuntime,
    container: &'a ContainerId,
    markers: &'a [&'a str],
    marker_match: MarkerMatch,
}

impl<'a> ReadinessPoller<'a> {
    pub fn new(
        runtime: &'a dyn ContainerRuntime,
        container: &'a ContainerId,
        markers: &'a [&'a str],
        marker_match: MarkerMatch,
    ) -> Self {
        Self {
            runtime,
            container,
            markers,
            marker_match,
        }
    }

    pub fn container(&self) -> &ContainerId {
        self.container
    }

    /// One tick: snapshot stdout (no timestamps) and test it.
    pub async fn poll(&self) -> Result<Readiness, RuntimeError> {
        let logs = self.runtime.logs(self.container, false).await?;
        Ok(evaluate(&logs.stdout, self.markers, self.marker_match))
    }
}

/// Tick schedule and time bound for readiness polling
#[derive(Debug, Clone, PartialEq)]
pub struct WaitStrategy {
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub marker_match: MarkerMatch,
}

impl Default for WaitStrategy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_STARTUP_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            marker_match: MarkerMatch::default(),
        }
    }
}

impl WaitStrategy {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_marker_match(mut self, marker_match: MarkerMatch) -> Self {
        self.marker_match = marker_match;
        self
    }

    /// Poll until `Ready`, sleeping between ticks.
    ///
    /// Runtime errors abort the wait immediately; running out of time yields
    /// [`BuildError::ReadinessTimeout`].
    pub async fn wait_until_ready(&self, poller: &ReadinessPoller<'_>) -> Result<(), BuildError> {
        let ticks = async {
            let mut attempt: u64 = 0;
            loop {
                attempt += 1;
                match poller.poll().await? {
                    Readiness::Ready => return Ok::<u64, RuntimeError>(attempt),
                    Readiness::Waiting => {
                        debug!(container = %poller.container(), attempt, "Container not ready yet");
                        sleep(self.poll_interval).await;
                    }
                }
            }
        };

        match timeout(self.timeout, ticks).await {
            Ok(Ok(attempts)) => {
                info!(container = %poller.container(), attempts, "Container ready");
                Ok(())
            }
            Ok(Err(e)) => Err(BuildError::Runtime(e)),
            Err(_) => Err(BuildError::ReadinessTimeout {
                container: poller.container().clone(),
                timeout: self.timeout,
            }),
        }
    }
}
