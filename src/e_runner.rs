use crate::e_command_builder::FlowCommandBuilder;
use crate::e_diagnostics::{filter_for_file, DiagnosticReport};
use crate::e_error::{FlowError, Result};
use crate::e_fmt::format_elapsed;
use crate::prelude::*;

/// Captured output of one checker process.
#[derive(Debug, Clone, Default)]
pub struct CheckerOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: Option<i32>,
}

/// Runs a built flow command. Implemented by [`ProcessChecker`] for real
/// subprocesses; tests substitute their own.
pub trait Checker: Send + Sync {
    fn run(&self, command: FlowCommandBuilder) -> Result<CheckerOutput>;
}

/// Spawns the flow binary and waits for it.
#[derive(Debug, Clone, Default)]
pub struct ProcessChecker;

impl Checker for ProcessChecker {
    fn run(&self, command: FlowCommandBuilder) -> Result<CheckerOutput> {
        let full_command = command.display();
        debug!("Running: {}", full_command);
        let start = Instant::now();

        let mut cmd = command.build_command();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let output = cmd.output().map_err(|source| FlowError::CheckerSpawn {
            command: full_command.clone(),
            source,
        })?;

        let result = CheckerOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            exit_code: output.status.code(),
        };
        info!(
            "`{}` exited with {:?} after {}",
            full_command,
            result.exit_code,
            format_elapsed(start.elapsed())
        );
        Ok(result)
    }
}

/// Picks the flow binary: an explicit path, then `flow` on `PATH`, then the
/// bare name and let the OS resolve it at spawn time.
pub fn resolve_flow_bin(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match which::which("flow") {
        Ok(path) => path,
        Err(e) => {
            debug!("flow not found on PATH ({}), using bare name", e);
            PathBuf::from("flow")
        }
    }
}

/// Turns checker output into a parsed report. Flow exits non-zero whenever it
/// finds errors, so the exit status only matters when stdout is empty.
pub fn parse_output(
    output: &CheckerOutput,
    target: &Path,
    command: &str,
) -> Result<DiagnosticReport> {
    if output.stdout.trim().is_empty() && !output.success {
        return Err(FlowError::CheckerProcessFailure {
            command: command.to_string(),
            code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        });
    }
    DiagnosticReport::from_json(&output.stdout).map_err(|source| {
        FlowError::MalformedCheckerOutput {
            path: target.to_path_buf(),
            source,
        }
    })
}

/// Runs `command` (already targeting `target`) and returns the diagnostics
/// that belong to `target`.
pub fn execute_flow(
    checker: &dyn Checker,
    command: FlowCommandBuilder,
    target: &Path,
) -> Result<DiagnosticReport> {
    let display = command.display();
    let output = checker.run(command)?;
    let parsed = parse_output(&output, target, &display)?;
    let filtered = filter_for_file(&parsed, target);
    debug!(
        "{}: {} of {} diagnostics belong to this file",
        target.display(),
        filtered.len(),
        parsed.len()
    );
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(CheckerOutput);

    impl Checker for Canned {
        fn run(&self, _command: FlowCommandBuilder) -> Result<CheckerOutput> {
            Ok(self.0.clone())
        }
    }

    fn canned(stdout: &str, success: bool) -> Canned {
        Canned(CheckerOutput {
            stdout: stdout.to_string(),
            stderr: "flow: oops".to_string(),
            success,
            exit_code: Some(if success { 0 } else { 2 }),
        })
    }

    #[test]
    fn non_zero_exit_with_json_is_parsed_and_filtered() {
        let json = r#"{"errors":[
            {"message":[{"path":"/p/a.js","descr":"string"}]},
            {"message":[{"path":"/p/b.js","descr":"number"}]}
        ]}"#;
        let target = Path::new("/p/a.js");
        let report = execute_flow(
            &canned(json, false),
            FlowCommandBuilder::new("flow").with_target(target),
            target,
        )
        .unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors[0].message[0].path, "/p/a.js");
    }

    #[test]
    fn garbage_stdout_is_malformed() {
        let target = Path::new("/p/a.js");
        let err = execute_flow(
            &canned("Launching Flow server for /p", true),
            FlowCommandBuilder::new("flow").with_target(target),
            target,
        )
        .unwrap_err();
        assert!(matches!(err, FlowError::MalformedCheckerOutput { .. }));
        assert!(err.is_checker_failure());
    }

    #[test]
    fn empty_stdout_with_failure_is_process_failure() {
        let err = parse_output(&canned("", false).0, Path::new("/p/a.js"), "flow check").unwrap_err();
        match err {
            FlowError::CheckerProcessFailure { code, stderr, .. } => {
                assert_eq!(code, Some(2));
                assert_eq!(stderr, "flow: oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_stdout_with_success_is_malformed() {
        let err = parse_output(&canned("", true).0, Path::new("/p/a.js"), "flow check").unwrap_err();
        assert!(matches!(err, FlowError::MalformedCheckerOutput { .. }));
    }

    #[test]
    fn missing_binary_is_spawn_error() {
        let err = ProcessChecker
            .run(FlowCommandBuilder::new("/definitely/not/a/flow/binary").with_target("/p/a.js"))
            .unwrap_err();
        assert!(matches!(err, FlowError::CheckerSpawn { .. }));
    }

    #[test]
    fn explicit_flow_bin_wins() {
        assert_eq!(
            resolve_flow_bin(Some(Path::new("/opt/flow"))),
            PathBuf::from("/opt/flow")
        );
    }
}
