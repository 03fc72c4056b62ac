//! UI-thread owner of the workflow state: folds backend events into it and
//! forwards the resulting commands to the backend queue.

use client_core::{WorkflowCommand, WorkflowEvent, WorkflowState};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

pub struct AnalyzerController {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    workflow: WorkflowState,
    status_banner: Option<String>,
    backend_ready: bool,
    mounted: bool,
}

impl AnalyzerController {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        workflow: WorkflowState,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            workflow,
            status_banner: None,
            backend_ready: false,
            mounted: false,
        }
    }

    pub fn workflow(&self) -> &WorkflowState {
        &self.workflow
    }

    pub fn transcript_mut(&mut self) -> &mut String {
        self.workflow.transcript_mut()
    }

    pub fn status_banner(&self) -> Option<&str> {
        self.status_banner.as_deref()
    }

    pub fn backend_ready(&self) -> bool {
        self.backend_ready
    }

    /// Issues the initial stats refresh once, the first time the analyzer is shown.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        let commands = self.workflow.mount();
        self.run(commands);
    }

    pub fn submit(&mut self) {
        let commands = self.workflow.submit_analysis();
        self.run(commands);
    }

    pub fn refresh_stats(&mut self) {
        let commands = self.workflow.refresh_stats();
        self.run(commands);
    }

    pub fn cancel_analysis(&mut self) {
        if !self.workflow.is_loading() {
            return;
        }
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, BackendCommand::CancelAnalysis) {
            self.report(err);
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if matches!(event, UiEvent::BackendReady) {
                self.backend_ready = true;
            }
            let commands = reduce(&mut self.workflow, &mut self.status_banner, event);
            self.run(commands);
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.status_banner = None;
    }

    fn run(&mut self, commands: Vec<WorkflowCommand>) {
        for command in commands {
            let analysis = match &command {
                WorkflowCommand::Analyze { request_id, .. } => Some(*request_id),
                WorkflowCommand::RefreshStats { .. } => None,
            };
            let Err(err) = dispatch_backend_command(&self.cmd_tx, BackendCommand::Run(command))
            else {
                continue;
            };

            // An analyze command that never reached the backend must not leave
            // the submit button locked.
            if let Some(request_id) = analysis {
                self.workflow.apply(WorkflowEvent::AnalysisFailed {
                    request_id,
                    message: err.message().to_string(),
                });
            }
            self.report(err);
        }
    }

    fn report(&mut self, err: UiError) {
        tracing::warn!(category = ?err.category(), context = ?err.context(), "{}", err.message());
        self.status_banner = Some(err.banner_text());
    }
}

pub fn reduce(
    workflow: &mut WorkflowState,
    status_banner: &mut Option<String>,
    event: UiEvent,
) -> Vec<WorkflowCommand> {
    match event {
        UiEvent::BackendReady => {
            *status_banner = None;
            Vec::new()
        }
        UiEvent::Workflow(event) => workflow.apply(event),
        UiEvent::Error(err) => {
            tracing::error!(category = ?err.category(), "{}", err.message());
            *status_banner = Some(err.banner_text());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use client_core::{ClientError, ServiceOperation, WorkflowStatus};
    use crossbeam_channel::bounded;
    use shared::{domain::ConversationId, protocol::AnalysisResult};

    use crate::controller::events::{UiErrorCategory, UiErrorContext};

    fn controller() -> (
        AnalyzerController,
        Receiver<BackendCommand>,
        Sender<UiEvent>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(16);
        let (ui_tx, ui_rx) = bounded(16);
        (
            AnalyzerController::new(cmd_tx, ui_rx, WorkflowState::new("Patient: cough")),
            cmd_rx,
            ui_tx,
        )
    }

    fn drain(cmd_rx: &Receiver<BackendCommand>) -> Vec<&'static str> {
        cmd_rx.try_iter().map(|cmd| cmd.name()).collect()
    }

    fn empty_result() -> AnalysisResult {
        AnalysisResult {
            conversation_id: ConversationId("conv-ui".to_string()),
            entities: Vec::new(),
            code_proposals: Vec::new(),
        }
    }

    #[test]
    fn mount_queues_one_stats_refresh_only_once() {
        let (mut controller, cmd_rx, _ui_tx) = controller();
        controller.mount();
        controller.mount();
        assert_eq!(drain(&cmd_rx), ["refresh_stats"]);
    }

    #[test]
    fn repeated_submit_queues_a_single_analysis() {
        let (mut controller, cmd_rx, _ui_tx) = controller();
        controller.submit();
        controller.submit();
        assert_eq!(drain(&cmd_rx), ["analyze"]);
        assert!(controller.workflow().is_loading());
    }

    #[test]
    fn analysis_completion_queues_chained_stats_refresh() {
        let (mut controller, cmd_rx, ui_tx) = controller();
        controller.submit();
        let request_id = controller.workflow().in_flight().expect("in flight");
        drain(&cmd_rx);

        ui_tx
            .send(UiEvent::Workflow(WorkflowEvent::AnalysisCompleted {
                request_id,
                result: empty_result(),
            }))
            .expect("send");
        controller.process_ui_events();

        assert_eq!(controller.workflow().status(), &WorkflowStatus::Success);
        assert_eq!(drain(&cmd_rx), ["refresh_stats"]);
    }

    #[test]
    fn stats_failure_event_raises_no_banner() {
        let (mut controller, _cmd_rx, ui_tx) = controller();
        ui_tx
            .send(UiEvent::Workflow(WorkflowEvent::StatsRefreshFailed {
                generation: 1,
                error: ClientError::Status {
                    operation: ServiceOperation::Stats,
                    status: 500,
                },
            }))
            .expect("send");
        controller.process_ui_events();

        assert!(controller.status_banner().is_none());
        assert!(controller.workflow().error_message().is_none());
    }

    #[test]
    fn disconnected_backend_unlocks_submit_and_reports() {
        let (mut controller, cmd_rx, _ui_tx) = controller();
        drop(cmd_rx);

        controller.submit();

        assert!(!controller.workflow().is_loading());
        assert!(controller
            .workflow()
            .error_message()
            .is_some_and(|message| message.contains("disconnected")));
        assert!(controller
            .status_banner()
            .is_some_and(|banner| banner.starts_with("Backend unavailable")));
    }

    #[test]
    fn startup_error_event_sets_banner() {
        let (mut controller, _cmd_rx, ui_tx) = controller();
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "invalid backend url 'ftp://x': unsupported scheme 'ftp'",
        );
        assert_eq!(err.category(), UiErrorCategory::Configuration);
        ui_tx.send(UiEvent::Error(err)).expect("send");
        controller.process_ui_events();

        assert_eq!(
            controller.status_banner(),
            Some("Backend configuration error: invalid backend url 'ftp://x': unsupported scheme 'ftp'")
        );

        ui_tx.send(UiEvent::BackendReady).expect("send");
        controller.process_ui_events();
        assert!(controller.status_banner().is_none());
        assert!(controller.backend_ready());
    }

    #[test]
    fn cancel_is_only_sent_while_loading() {
        let (mut controller, cmd_rx, _ui_tx) = controller();
        controller.cancel_analysis();
        assert!(drain(&cmd_rx).is_empty());

        controller.submit();
        controller.cancel_analysis();
        assert_eq!(drain(&cmd_rx), ["analyze", "cancel_analysis"]);
    }
}
