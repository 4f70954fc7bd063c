#![doc = include_str!("../README.md")]

// Re-export std common modules
pub mod prelude {
    pub use std::env;
    pub use std::fs;
    pub use std::io;
    pub use std::path::{Path, PathBuf};
    pub use std::process::Command;
    pub use std::process::Stdio;
    pub use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    pub use std::sync::{Arc, Mutex};
    pub use std::time::Instant;
    pub use log::{debug, error, info, warn};
}

pub mod e_cli;
pub use e_cli::Cli;
pub mod e_command_builder;
pub mod e_diagnostics;
pub use e_diagnostics::{filter_for_file, DiagnosticReport, FlowDiagnostic, FlowMessage};
pub mod e_dispatcher;
pub use e_dispatcher::FlowDispatcher;
pub mod e_error;
pub use e_error::FlowError;
pub mod e_file;
pub use e_file::{FileContents, PipelineFile};
pub mod e_flowconfig;
pub mod e_fmt;
pub mod e_marker;
pub use e_marker::has_flow_marker;
pub mod e_options;
pub use e_options::FlowOptions;
pub mod e_pipeline;
pub mod e_reports;
pub mod e_runner;
pub use e_runner::{Checker, ProcessChecker};
pub mod e_runresult;
pub use e_runresult::RunResult;
