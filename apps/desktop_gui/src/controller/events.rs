//! UI/backend events and error modeling for the analyzer controller.

use client_core::WorkflowEvent;

pub enum UiEvent {
    BackendReady,
    Workflow(WorkflowEvent),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Configuration,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("url")
            || message_lower.contains("config")
            || message_lower.contains("scheme")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("disconnected")
            || message_lower.contains("runtime")
            || message_lower.contains("queue")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line text for the status banner.
    pub fn banner_text(&self) -> String {
        let prefix = match (self.context, self.category) {
            (UiErrorContext::BackendStartup, UiErrorCategory::Configuration) => {
                "Backend configuration error"
            }
            (UiErrorContext::BackendStartup, _) => "Backend worker startup failure",
            (UiErrorContext::CommandQueue, _) => "Backend unavailable",
        };
        format!("{prefix}: {}", self.message)
    }
}
