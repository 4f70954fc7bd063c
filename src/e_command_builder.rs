use crate::e_options::FlowOptions;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A builder that constructs a `flow check` command for one file.
///
/// # Example
/// ```
/// use flow_e::e_command_builder::FlowCommandBuilder;
/// use flow_e::FlowOptions;
///
/// let opts = FlowOptions { weak: true, ..FlowOptions::default() };
/// let args = FlowCommandBuilder::new("flow")
///     .with_target("/src/app.js")
///     .with_options(&opts)
///     .build();
/// assert_eq!(args, vec!["check", "/src/app.js", "--json", "--weak"]);
/// ```
#[derive(Debug, Clone)]
pub struct FlowCommandBuilder {
    program: PathBuf,
    args: Vec<String>,
}

impl FlowCommandBuilder {
    /// Creates a builder for the given flow binary.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        FlowCommandBuilder {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// `check <path> --json`. The path should already be absolute.
    pub fn with_target(mut self, path: impl AsRef<Path>) -> Self {
        self.args.push("check".into());
        self.args.push(path.as_ref().to_string_lossy().to_string());
        self.args.push("--json".into());
        self
    }

    /// Adds the checker flags derived from the options. `all` only decides
    /// which files are checked and never reaches flow.
    pub fn with_options(mut self, options: &FlowOptions) -> Self {
        if options.weak {
            self.args.push("--weak".into());
        }
        if let Some(ref lib) = options.declarations {
            self.args.push("--lib".into());
            self.args.push(lib.to_string_lossy().to_string());
        }
        self
    }

    /// Points flow at a config file other than `.flowconfig` in the root.
    pub fn with_flowconfig_name(mut self, name: Option<&OsStr>) -> Self {
        if let Some(name) = name {
            self.args.push("--flowconfig-name".into());
            self.args.push(name.to_string_lossy().to_string());
        }
        self
    }

    /// The full command line, for logging and error messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.to_string_lossy().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Builds the final vector of command-line arguments.
    pub fn build(self) -> Vec<String> {
        self.args
    }

    pub fn build_command(self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args);
        cmd
    }
}
