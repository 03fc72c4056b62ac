//! Backend commands queued from UI to backend worker.

use client_core::WorkflowCommand;

pub enum BackendCommand {
    Run(WorkflowCommand),
    CancelAnalysis,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Run(WorkflowCommand::Analyze { .. }) => "analyze",
            Self::Run(WorkflowCommand::RefreshStats { .. }) => "refresh_stats",
            Self::CancelAnalysis => "cancel_analysis",
        }
    }
}
