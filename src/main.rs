mod aggregate;
mod cli;
mod config;
mod error;
mod extract;
mod logging;
mod normalize;
mod report;
mod reset;
mod results;
mod store;
mod submission;
mod types;

use crate::error::{MarksError, Result};
use crate::store::fs::FsStore;
use crate::types::config::MarksConfig;
use clap::Parser;
use std::path::Path;
use tracing::{error, info};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const REJECTED: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

/// The config for a data root, and whether it came from defaults.
fn load_root(path: &Path) -> Result<(MarksConfig, bool)> {
    if !path.exists() {
        return Err(MarksError::PathNotFound(path.display().to_string()));
    }
    match config::load_config(path)? {
        Some(cfg) => Ok((cfg, false)),
        None => {
            eprintln!(
                "warning: no {} found in {}; using defaults",
                config::DEFAULT_CONFIG_FILE,
                path.display()
            );
            Ok((MarksConfig::default(), true))
        }
    }
}

fn run(cli: cli::Cli) -> Result<i32> {
    info!(version = env!("CARGO_PKG_VERSION"), "housemarks starting");
    match cli.command {
        cli::Commands::Init(cmd) => {
            let path = config::write_default_config(&cmd.path)?;
            let cfg = MarksConfig::default();
            let store = FsStore::new(&cmd.path);
            for collection in cfg
                .score_collections()
                .into_iter()
                .chain([cfg.store.judges_collection.as_str()])
            {
                std::fs::create_dir_all(store.collection_dir(collection)?)?;
            }
            println!("config: {}", path.display());
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Judge(cmd) => {
            let (cfg, _) = load_root(&cmd.path)?;
            let store = FsStore::new(&cmd.path);
            match submission::gate::register(&store, &cfg, &cmd.id, &cmd.name)? {
                submission::gate::Registration::Registered => {
                    println!("registered judge {} ({})", cmd.id, cmd.name.trim());
                }
                submission::gate::Registration::AlreadyRegistered => {
                    println!("judge {} is already registered", cmd.id);
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Submit(cmd) => {
            let (cfg, _) = load_root(&cmd.path)?;
            let store = FsStore::new(&cmd.path);
            let content = std::fs::read_to_string(&cmd.marks)?;
            let request = submission::SubmissionRequest {
                judge_id: cmd.judge_id,
                judge_name: cmd.judge_name,
                category: cmd.category,
                marks: serde_json::from_str(&content)?,
            };
            let key = submission::submit(&store, &cfg, &request)?;
            println!(
                "scores submitted successfully: {}/{}",
                cfg.store.scores_collection, key
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Results(cmd) => {
            let (cfg, defaulted) = load_root(&cmd.path)?;
            let store = FsStore::new(&cmd.path);
            let results_report = results::results(&store, &cfg, &cmd.category);

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
                cli::ReportFormat::Csv => report::OutputFormat::Csv,
            };
            let rendered = report::render(&results_report, output_format)?;
            match &cmd.output {
                Some(out) => {
                    std::fs::write(out, &rendered)?;
                    println!("wrote {}", out.display());
                }
                None => print!("{rendered}"),
            }

            for failure in &results_report.failures {
                eprintln!(
                    "warning: collection {} could not be read: {}",
                    failure.collection, failure.message
                );
            }
            if results_report.is_partial() || defaulted {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Inspect(cmd) => {
            let (cfg, _) = load_root(&cmd.path)?;
            let store = FsStore::new(&cmd.path);
            let loaded = results::load_entries(&store, &cfg);
            print!("{}", report::md::entries_to_markdown(&loaded.entries));
            for failure in &loaded.failures {
                eprintln!(
                    "warning: collection {} could not be read: {}",
                    failure.collection, failure.message
                );
            }
            if loaded.failures.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Reset(cmd) => {
            let (cfg, _) = load_root(&cmd.path)?;
            if !cmd.yes {
                eprintln!("reset permanently erases stored results; re-run with --yes to confirm");
                return Ok(exit_code::REJECTED);
            }
            let store = FsStore::new(&cmd.path);
            let outcome = reset::reset(&store, &cfg, cmd.category.as_deref());
            println!("deleted {} document(s)", outcome.deleted);
            if outcome.is_complete() {
                return Ok(exit_code::SUCCESS);
            }
            for failure in &outcome.unreadable {
                eprintln!(
                    "error: collection {} could not be read: {}",
                    failure.collection, failure.message
                );
            }
            for failure in &outcome.failed_deletes {
                eprintln!(
                    "error: failed to delete {}/{}: {}",
                    failure.collection, failure.key, failure.message
                );
            }
            eprintln!("warning: reset was incomplete; verify the store before collecting new marks");
            Ok(exit_code::WARNINGS)
        }
    }
}

fn main() {
    let cli = cli::Cli::parse();
    logging::init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => {
            if code != exit_code::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
