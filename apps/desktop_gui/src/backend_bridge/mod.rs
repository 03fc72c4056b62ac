//! Backend bridge: command vocabulary and the worker thread that executes it.

pub mod commands;
pub mod runtime;
