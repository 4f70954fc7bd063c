//! Per-file decisions: which files get checked, under which flow config, and
//! what is forwarded downstream.

use crate::e_command_builder::FlowCommandBuilder;
use crate::e_diagnostics::DiagnosticReport;
use crate::e_error::{FlowError, Result};
use crate::e_file::PipelineFile;
use crate::e_flowconfig::FlowConfigScope;
use crate::e_marker::has_flow_marker;
use crate::e_options::FlowOptions;
use crate::e_reports::Reporter;
use crate::e_runner::{execute_flow, Checker};
use crate::e_runresult::RunResult;
use crate::prelude::*;
use std::path::Component;

/// Runs flow over the files of one pipeline run.
///
/// Owns the [`RunResult`] for that run; build a new dispatcher per run.
#[derive(Clone)]
pub struct FlowDispatcher {
    options: FlowOptions,
    flow_bin: PathBuf,
    checker: Arc<dyn Checker>,
    reporter: Reporter,
    run: Arc<RunResult>,
}

impl FlowDispatcher {
    pub fn new(
        options: FlowOptions,
        flow_bin: impl Into<PathBuf>,
        checker: Arc<dyn Checker>,
        reporter: Reporter,
    ) -> Self {
        FlowDispatcher {
            options,
            flow_bin: flow_bin.into(),
            checker,
            reporter,
            run: Arc::new(RunResult::new()),
        }
    }

    pub fn run_result(&self) -> &RunResult {
        &self.run
    }

    /// True when a buffered file should go through flow.
    pub fn should_check(&self, file: &PipelineFile) -> bool {
        if self.options.all {
            return true;
        }
        file.text().is_some_and(|text| has_flow_marker(&text))
    }

    /// Handles one file. Returns the file to forward downstream, or
    /// `UnsupportedInputKind` for stream files, which are dropped.
    ///
    /// Checker failures do not drop the file: they are reported, counted
    /// against the run, and the file is forwarded.
    pub fn transform(&self, file: PipelineFile) -> Result<PipelineFile> {
        if file.is_null() {
            debug!("{}: no contents, passing through", file.path.display());
            return Ok(file);
        }
        if file.is_stream() {
            warn!("{}: stream content is not supported", file.path.display());
            return Err(FlowError::UnsupportedInputKind { path: file.path });
        }
        if !self.should_check(&file) {
            debug!("{}: no @flow marker, skipping", file.path.display());
            return Ok(file);
        }

        if let Err(e) = self.check_file(&file.path) {
            error!("{}: {}", file.path.display(), e);
            self.run.record_failure();
            self.reporter.failure(&file.path, &e.to_string());
        }
        Ok(file)
    }

    /// Checks one file on disk and returns its filtered diagnostics.
    ///
    /// A temporary flow config is scaffolded when the file's directory has
    /// none, and removed before this returns on every path. A non-empty result
    /// marks the run as failed and is printed through the reporter.
    pub fn check_file(&self, path: &Path) -> Result<DiagnosticReport> {
        let target = resolve_target(path)?;
        let dir = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        let scope = FlowConfigScope::prepare(&dir)?;
        let command = FlowCommandBuilder::new(&self.flow_bin)
            .with_target(&target)
            .with_options(&self.options)
            .with_flowconfig_name(scope.flowconfig_name());
        let result = execute_flow(self.checker.as_ref(), command, &target);
        if let Err(e) = scope.close() {
            warn!("{}", e);
        }

        let report = result?;
        self.run.record_checked();
        if report.has_errors() {
            self.run.record_errors();
            self.reporter.report(&report);
        }
        Ok(report)
    }

    /// Ends the run: prints the success line when nothing failed and returns
    /// whether the run passed.
    pub fn finish(&self) -> bool {
        let passed = self.run.passed();
        info!(
            "checked {} files: {} with errors, {} checker failures",
            self.run.checked(),
            self.run.files_with_errors(),
            self.run.check_failures()
        );
        if passed {
            self.reporter.success();
        }
        passed
    }
}

/// The path flow will report for `path`: symlinks and `..` resolved. Falls
/// back to a lexical cleanup when the file cannot be canonicalized.
pub fn resolve_target(path: &Path) -> Result<PathBuf> {
    if let Ok(real) = fs::canonicalize(path) {
        return Ok(real);
    }
    let absolute = std::path::absolute(path).map_err(|e| FlowError::io(path, e))?;
    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    Ok(cleaned)
}
