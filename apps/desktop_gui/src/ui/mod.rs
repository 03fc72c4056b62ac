//! UI layer for the analyzer: app shell, panels, widgets and theme.

pub mod app;
pub mod panels;
pub mod theme;
pub mod widgets;

pub use app::{AnalyzerApp, StartupConfig};
