//! Analyze-and-render workflow: state, reducer transitions and the command executor.
//!
//! [`WorkflowState`] never performs I/O. Every operation mutates state and
//! returns the [`WorkflowCommand`]s it wants executed; completions come back
//! as [`WorkflowEvent`]s through [`WorkflowState::apply`]. [`CommandExecutor`]
//! is the only piece that talks to the service.

use std::{future::Future, sync::Arc, time::Duration};

use chrono::{DateTime, Local};
use shared::protocol::{AnalysisResult, AnalyzeRequest, StatsSnapshot};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    error::{ClientError, ServiceOperation},
    service::AnalysisService,
};

pub const SAMPLE_TRANSCRIPT: &str = "Patient: I have had fever and cough for three days.\nDoctor: Sounds like influenza. No pneumonia.\nPatient: Also a bit of sore throat.";

pub const ANALYSIS_CANCELLED_MESSAGE: &str = "Analysis cancelled";

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowStatus {
    Idle,
    Loading,
    Success,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowCommand {
    Analyze {
        request_id: RequestId,
        request: AnalyzeRequest,
    },
    RefreshStats {
        generation: u64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    AnalysisCompleted {
        request_id: RequestId,
        result: AnalysisResult,
    },
    AnalysisFailed {
        request_id: RequestId,
        message: String,
    },
    StatsRefreshed {
        generation: u64,
        snapshot: StatsSnapshot,
    },
    StatsRefreshFailed {
        generation: u64,
        error: ClientError,
    },
}

#[derive(Debug, Clone)]
pub struct WorkflowState {
    transcript: String,
    status: WorkflowStatus,
    result: Option<AnalysisResult>,
    completed_at: Option<DateTime<Local>>,
    stats: Option<StatsSnapshot>,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    stats_issued: u64,
    stats_applied: u64,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new(SAMPLE_TRANSCRIPT)
    }
}

impl WorkflowState {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            status: WorkflowStatus::Idle,
            result: None,
            completed_at: None,
            stats: None,
            in_flight: None,
            next_request_id: 1,
            stats_issued: 0,
            stats_applied: 0,
        }
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Editable draft; stays writable while an analysis is in flight.
    pub fn transcript_mut(&mut self) -> &mut String {
        &mut self.transcript
    }

    pub fn set_transcript(&mut self, transcript: impl Into<String>) {
        self.transcript = transcript.into();
    }

    pub fn status(&self) -> &WorkflowStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == WorkflowStatus::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            WorkflowStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        self.completed_at
    }

    pub fn stats(&self) -> Option<&StatsSnapshot> {
        self.stats.as_ref()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Initial stats load when the workflow is first presented.
    pub fn mount(&mut self) -> Vec<WorkflowCommand> {
        self.refresh_stats()
    }

    pub fn refresh_stats(&mut self) -> Vec<WorkflowCommand> {
        self.stats_issued += 1;
        vec![WorkflowCommand::RefreshStats {
            generation: self.stats_issued,
        }]
    }

    /// Starts an analysis of the current draft. Returns no command while a
    /// previous analysis is still in flight.
    pub fn submit_analysis(&mut self) -> Vec<WorkflowCommand> {
        if let Some(pending) = self.in_flight {
            info!(pending, "analysis already in flight; ignoring submit");
            return Vec::new();
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(request_id);
        self.status = WorkflowStatus::Loading;

        vec![WorkflowCommand::Analyze {
            request_id,
            request: AnalyzeRequest::new(self.transcript.clone()),
        }]
    }

    pub fn apply(&mut self, event: WorkflowEvent) -> Vec<WorkflowCommand> {
        match event {
            WorkflowEvent::AnalysisCompleted { request_id, result } => {
                if !self.settle(request_id) {
                    return Vec::new();
                }
                self.result = Some(result);
                self.completed_at = Some(Local::now());
                self.status = WorkflowStatus::Success;
                self.refresh_stats()
            }
            WorkflowEvent::AnalysisFailed {
                request_id,
                message,
            } => {
                if self.settle(request_id) {
                    self.status = WorkflowStatus::Error(message);
                }
                Vec::new()
            }
            WorkflowEvent::StatsRefreshed {
                generation,
                snapshot,
            } => {
                if generation < self.stats_applied {
                    debug!(
                        generation,
                        applied = self.stats_applied,
                        "dropping superseded stats response"
                    );
                } else {
                    self.stats_applied = generation;
                    self.stats = Some(snapshot);
                }
                Vec::new()
            }
            WorkflowEvent::StatsRefreshFailed { generation, error } => {
                warn!(generation, "stats refresh failed; keeping previous snapshot: {error}");
                Vec::new()
            }
        }
    }

    fn settle(&mut self, request_id: RequestId) -> bool {
        if self.in_flight != Some(request_id) {
            debug!(request_id, in_flight = ?self.in_flight, "ignoring stale analysis completion");
            return false;
        }
        self.in_flight = None;
        true
    }
}

/// Runs workflow commands as tokio tasks and reports completions as events.
///
/// Must be driven from inside a tokio runtime.
pub struct CommandExecutor {
    service: Arc<dyn AnalysisService>,
    request_timeout: Duration,
    events: mpsc::UnboundedSender<WorkflowEvent>,
    analysis_task: Option<(RequestId, JoinHandle<()>)>,
    stats_task: Option<JoinHandle<()>>,
}

impl CommandExecutor {
    pub fn new(
        service: Arc<dyn AnalysisService>,
        request_timeout: Duration,
        events: mpsc::UnboundedSender<WorkflowEvent>,
    ) -> Self {
        Self {
            service,
            request_timeout,
            events,
            analysis_task: None,
            stats_task: None,
        }
    }

    pub fn execute(&mut self, command: WorkflowCommand) {
        match command {
            WorkflowCommand::Analyze {
                request_id,
                request,
            } => self.spawn_analysis(request_id, request),
            WorkflowCommand::RefreshStats { generation } => self.spawn_stats(generation),
        }
    }

    pub fn execute_all(&mut self, commands: impl IntoIterator<Item = WorkflowCommand>) {
        for command in commands {
            self.execute(command);
        }
    }

    /// Aborts the in-flight analysis, if any, and reports it as failed so the
    /// workflow leaves the loading state.
    pub fn cancel_analysis(&mut self) {
        let Some((request_id, task)) = self.analysis_task.take() else {
            return;
        };
        if task.is_finished() {
            return;
        }
        task.abort();
        info!(request_id, "analysis cancelled");
        let _ = self.events.send(WorkflowEvent::AnalysisFailed {
            request_id,
            message: ANALYSIS_CANCELLED_MESSAGE.to_string(),
        });
    }

    fn spawn_analysis(&mut self, request_id: RequestId, request: AnalyzeRequest) {
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        let timeout = self.request_timeout;
        let task = tokio::spawn(async move {
            let outcome = bounded(ServiceOperation::Analyze, timeout, async {
                service.analyze(&request).await
            })
            .await;
            let event = match outcome {
                Ok(result) => WorkflowEvent::AnalysisCompleted { request_id, result },
                Err(err) => WorkflowEvent::AnalysisFailed {
                    request_id,
                    message: err.user_message(),
                },
            };
            let _ = events.send(event);
        });
        self.analysis_task = Some((request_id, task));
    }

    fn spawn_stats(&mut self, generation: u64) {
        if let Some(previous) = self.stats_task.take() {
            if !previous.is_finished() {
                debug!(generation, "superseding in-flight stats refresh");
                previous.abort();
            }
        }

        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        let timeout = self.request_timeout;
        self.stats_task = Some(tokio::spawn(async move {
            let outcome = bounded(ServiceOperation::Stats, timeout, async {
                service.fetch_stats().await
            })
            .await;
            let event = match outcome {
                Ok(snapshot) => WorkflowEvent::StatsRefreshed {
                    generation,
                    snapshot,
                },
                Err(error) => WorkflowEvent::StatsRefreshFailed { generation, error },
            };
            let _ = events.send(event);
        }));
    }
}

async fn bounded<T>(
    operation: ServiceOperation,
    after: Duration,
    call: impl Future<Output = Result<T, ClientError>>,
) -> Result<T, ClientError> {
    match tokio::time::timeout(after, call).await {
        Ok(outcome) => outcome,
        Err(_) => Err(ClientError::Timeout { operation, after }),
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
