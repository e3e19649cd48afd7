//! Shared test utilities for integration tests
//!
//! Provides a scripted in-memory container runtime so builder lifecycles can be
//! exercised without a container engine.

use async_trait::async_trait;
use cosmos_testcontainer::container::LaunchSpec;
use cosmos_testcontainer::runtime::{ContainerId, ContainerLogs, ContainerRuntime};
use cosmos_testcontainer::RuntimeError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the scripted container does once started
#[derive(Debug, Clone)]
pub enum Script {
    /// stdout becomes `output` on the given snapshot (1-based)
    PrintsAfter { snapshot: usize, output: String },
    /// stdout never changes from the given text
    Prints(String),
    /// `start` fails
    FailsToStart,
    /// `logs` fails
    LogsUnavailable,
}

pub struct ScriptedRuntime {
    script: Script,
    host: String,
    snapshots: AtomicUsize,
    started: Mutex<Vec<LaunchSpec>>,
    stopped: Mutex<Vec<ContainerId>>,
}

impl ScriptedRuntime {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            host: "localhost".to_string(),
            snapshots: AtomicUsize::new(0),
            started: Mutex::new(Vec::new()),
            stopped: Mutex::new(Vec::new()),
        }
    }

    /// Container that prints exactly "Started" on its `snapshot`-th log read
    pub fn ready_after(snapshot: usize) -> Self {
        Self::new(Script::PrintsAfter {
            snapshot,
            output: "Started".to_string(),
        })
    }

    pub fn started(&self) -> Vec<LaunchSpec> {
        self.started.lock().unwrap().clone()
    }

    pub fn stopped(&self) -> Vec<ContainerId> {
        self.stopped.lock().unwrap().clone()
    }

    pub fn snapshots(&self) -> usize {
        self.snapshots.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContainerRuntime for ScriptedRuntime {
    async fn start(&self, spec: &LaunchSpec) -> Result<ContainerId, RuntimeError> {
        if matches!(self.script, Script::FailsToStart) {
            return Err(RuntimeError::CommandFailed {
                command: "run".to_string(),
                status: 125,
                stderr: "image not found".to_string(),
            });
        }
        let mut started = self.started.lock().unwrap();
        started.push(spec.clone());
        Ok(ContainerId::new(format!("scripted-{}", started.len())))
    }

    async fn stop(&self, id: &ContainerId) -> Result<(), RuntimeError> {
        self.stopped.lock().unwrap().push(id.clone());
        Ok(())
    }

    async fn logs(&self, _id: &ContainerId, timestamps: bool) -> Result<ContainerLogs, RuntimeError> {
        assert!(!timestamps, "readiness polling must not request timestamps");
        let snapshot = self.snapshots.fetch_add(1, Ordering::SeqCst) + 1;
        let stdout = match &self.script {
            Script::PrintsAfter {
                snapshot: ready_at,
                output,
            } if snapshot >= *ready_at => output.clone(),
            Script::PrintsAfter { .. } => String::new(),
            Script::Prints(output) => output.clone(),
            Script::LogsUnavailable => {
                return Err(RuntimeError::InvalidOutput("log stream closed".to_string()))
            }
            Script::FailsToStart => String::new(),
        };
        Ok(ContainerLogs {
            stdout,
            stderr: String::new(),
        })
    }

    fn host(&self) -> String {
        self.host.clone()
    }
}
