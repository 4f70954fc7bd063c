//! # flow-e
//!
//! `flow-e` runs the [Flow](https://flow.org) type checker over the files you
//! give it, but only those that opt in with an `@flow` comment (or all of
//! them with `--all`), and prints each file's own diagnostics.
//!
//! ## Quick Start
//! ```sh
//! flow-e src/*.js
//! flow-e --weak --lib decls src/app.js
//! ```

use anyhow::Context;
use clap::Parser;
use flow_e::e_pipeline::run_pipeline;
use flow_e::e_reports::Reporter;
use flow_e::e_runner::resolve_flow_bin;
use flow_e::prelude::*;
use flow_e::{Cli, FlowDispatcher, FlowOptions, PipelineFile, ProcessChecker};

fn collect_files(paths: &[PathBuf]) -> Vec<PipelineFile> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        if path.as_os_str() == "-" {
            files.push(PipelineFile::stream("<stdin>", Box::new(io::stdin())));
            continue;
        }
        match PipelineFile::from_path(path) {
            Ok(file) => files.push(file),
            Err(e) => eprintln!("flow-e: skipping {}", e),
        }
    }
    files
}

pub fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();
    if cli.version {
        flow_e::e_cli::print_version_and_features();
        return Ok(());
    }

    let options = match &cli.config {
        Some(path) => match FlowOptions::from_toml_file(path)
            .with_context(|| format!("loading options from {}", path.display()))
        {
            Ok(options) => options,
            Err(e) => {
                // Same status clap uses for bad arguments.
                eprintln!("flow-e: {:#}", e);
                std::process::exit(2);
            }
        },
        None => FlowOptions::default(),
    }
    .merged_with_cli(&cli);
    debug!("options: {:?}", options);

    let flow_bin = resolve_flow_bin(cli.flow_bin.as_deref());
    debug!("flow binary: {}", flow_bin.display());

    let dispatcher = FlowDispatcher::new(
        options,
        flow_bin,
        Arc::new(ProcessChecker),
        Reporter::console(!cli.no_color),
    );
    let outcome = run_pipeline(&dispatcher, collect_files(&cli.paths), cli.jobs);

    for rejected in &outcome.rejected {
        eprintln!("flow-e: {}", rejected);
    }
    for file in &outcome.forwarded {
        debug!("forwarded {}", file.path.display());
    }

    if !outcome.passed {
        std::process::exit(1);
    }
    Ok(())
}
