//! Client side of the clinical conversation analyzer: configuration, the
//! analysis service client, the analyze-and-render workflow and its pure
//! render model.

pub mod config;
pub mod error;
pub mod render;
pub mod service;
pub mod workflow;

pub use config::{load_config, ClientConfig};
pub use error::{ClientError, ConfigError, ServiceOperation};
pub use render::{
    AssertionStyle, CodePillView, EntityRowView, RenderModel, Section, StatCardView,
};
pub use service::{AnalysisService, HttpAnalysisService};
pub use workflow::{
    CommandExecutor, RequestId, WorkflowCommand, WorkflowEvent, WorkflowState, WorkflowStatus,
};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
