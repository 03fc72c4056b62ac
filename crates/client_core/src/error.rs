//! Failure modes of the two outbound calls and of configuration loading.

use std::{fmt, time::Duration};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceOperation {
    Analyze,
    Stats,
}

impl ServiceOperation {
    pub fn label(self) -> &'static str {
        match self {
            Self::Analyze => "Analyze",
            Self::Stats => "Stats",
        }
    }
}

impl fmt::Display for ServiceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque failure of a call to the analysis service.
///
/// Service error payloads are never interpreted; a non-2xx response only
/// contributes its status code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("{operation} failed: {status}")]
    Status {
        operation: ServiceOperation,
        status: u16,
    },
    #[error("{operation} failed: network error: {message}")]
    Transport {
        operation: ServiceOperation,
        message: String,
    },
    #[error("{operation} failed: no response after {after:?}")]
    Timeout {
        operation: ServiceOperation,
        after: Duration,
    },
    #[error("{operation} failed: malformed response: {message}")]
    Decode {
        operation: ServiceOperation,
        message: String,
    },
}

impl ClientError {
    pub fn operation(&self) -> ServiceOperation {
        match self {
            Self::Status { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Timeout { operation, .. }
            | Self::Decode { operation, .. } => *operation,
        }
    }

    /// Short message suitable for inline display next to the analyze button.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub(crate) fn from_reqwest(
        operation: ServiceOperation,
        err: reqwest::Error,
        timeout: Duration,
    ) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                operation,
                after: timeout,
            };
        }
        if let Some(status) = err.status() {
            return Self::Status {
                operation,
                status: status.as_u16(),
            };
        }
        if err.is_decode() {
            return Self::Decode {
                operation,
                message: err.to_string(),
            };
        }
        Self::Transport {
            operation,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid backend url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    ParseFile {
        path: String,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_failure_reads_like_original_inline_message() {
        let err = ClientError::Status {
            operation: ServiceOperation::Analyze,
            status: 500,
        };
        assert_eq!(err.user_message(), "Analyze failed: 500");
    }

    #[test]
    fn timeout_message_names_the_bound() {
        let err = ClientError::Timeout {
            operation: ServiceOperation::Stats,
            after: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "Stats failed: no response after 30s");
        assert_eq!(err.operation(), ServiceOperation::Stats);
    }
}
