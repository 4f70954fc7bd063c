use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "flow-e runs Flow over files that opt in with @flow.", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print version and feature flags in JSON format.
    #[arg(
        long,
        short = 'v',
        help = "Print version and feature flags in JSON format."
    )]
    pub version: bool,

    #[arg(
        long,
        short = 'a',
        help = "Check every file, even without an @flow comment."
    )]
    pub all: bool,

    #[arg(long, help = "Pass --weak to flow (weak inference mode).")]
    pub weak: bool,

    #[arg(
        long,
        alias = "lib",
        value_name = "PATH",
        help = "Pass --lib <PATH> to flow for custom declarations."
    )]
    pub declarations: Option<PathBuf>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Read options (all, weak, declarations) from a TOML file."
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "flow-bin",
        value_name = "PATH",
        env = "FLOW_BIN",
        help = "Path to the flow binary (default: flow on PATH)."
    )]
    pub flow_bin: Option<PathBuf>,

    #[arg(
        long,
        short = 'j',
        default_value_t = 1,
        help = "Number of files checked at once (default: 1)."
    )]
    pub jobs: usize,

    #[arg(long = "no-color", help = "Disable colored output.")]
    pub no_color: bool,

    #[arg(help = "Files to run through the pipeline; `-` reads a stream from stdin.")]
    pub paths: Vec<PathBuf>,
}

/// Print the version and the JSON array of feature flags.
pub fn print_version_and_features() {
    let version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown");
    let json_features = format!(
        "[{}]",
        get_feature_flags()
            .iter()
            .map(|f| format!("\"{}\"", f))
            .collect::<Vec<String>>()
            .join(", ")
    );
    println!("flow-e {}", version);
    println!("{}", json_features);
}

/// Returns a vector of feature flag strings.
/// Enabled features are listed as-is while disabled ones are prefixed with "!".
pub fn get_feature_flags() -> Vec<&'static str> {
    let mut flags = Vec::new();
    if cfg!(feature = "concurrent") {
        flags.push("concurrent");
    } else {
        flags.push("!concurrent");
    }
    flags
}
