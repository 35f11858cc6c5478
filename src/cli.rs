//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::backup;
use crate::config::{Paths, Settings};
use crate::error::EngineError;
use crate::fetch::{self, FetchOptions, FetchStrategy};
use crate::platform;
use crate::report::{ConsoleReporter, Reporter};
use crate::rules::validate_rules_text;
use crate::target::Target;
use crate::writer;

#[derive(Parser)]
#[command(name = "hostpatch")]
#[command(about = "Managed hosts-file rules for GitHub and Replit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the latest rules for a target and print them
    Download {
        /// Target service
        #[arg(long, value_enum)]
        target: Target,
        /// Write the rules to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Race all mirrors concurrently instead of trying them in order
        #[arg(long)]
        concurrent: bool,
        /// Per-source timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Merge rules into the system hosts file (downloads first unless --rules)
    Apply {
        /// Target service
        #[arg(long, value_enum)]
        target: Target,
        /// Apply rules from a local file instead of downloading
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Race all mirrors concurrently instead of trying them in order
        #[arg(long)]
        concurrent: bool,
        /// Per-source timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Create a timestamped backup of the hosts file
    Backup,

    /// Restore the newest backup, or a named one
    Restore {
        /// Backup filename or its YYYYMMDD_HHMMSS stamp
        backup_id: Option<String>,
    },

    /// List backups, newest first
    ListBackups,

    /// Check hosts file, privileges, and backup store health
    Doctor {
        /// Emit results as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let paths = Paths::default_paths();

    match cli.command {
        Commands::Download {
            target,
            output,
            concurrent,
            timeout,
        } => cmd_download(&paths, target, output, concurrent, timeout),
        Commands::Apply {
            target,
            rules,
            concurrent,
            timeout,
        } => cmd_apply(&paths, target, rules, concurrent, timeout),
        Commands::Backup => cmd_backup(&paths),
        Commands::Restore { backup_id } => cmd_restore(&paths, backup_id),
        Commands::ListBackups => cmd_list_backups(&paths),
        Commands::Doctor { json } => cmd_doctor(&paths, json),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Fetch options from persisted settings, overridden by CLI flags.
fn fetch_options(paths: &Paths, concurrent: bool, timeout: Option<u64>) -> Result<FetchOptions> {
    let settings = Settings::load(paths)?;
    let strategy = if concurrent || settings.concurrent {
        FetchStrategy::Concurrent
    } else {
        FetchStrategy::Sequential
    };
    Ok(FetchOptions {
        timeout: Duration::from_secs(timeout.unwrap_or(settings.timeout_secs)),
        strategy,
    })
}

fn run_download(
    paths: &Paths,
    target: Target,
    concurrent: bool,
    timeout: Option<u64>,
    reporter: &dyn Reporter,
) -> Result<fetch::Download> {
    let opts = fetch_options(paths, concurrent, timeout)?;
    let rt = tokio::runtime::Runtime::new()?;
    let download = rt.block_on(fetch::download_rules(target, &opts, reporter))?;
    if download.rules.is_empty() {
        reporter.log(&format!("No {target} rules found in downloaded content"));
    } else {
        reporter.log(&format!(
            "{target} rules fetched: {} entries (source: {})",
            download.rules.len(),
            download.source
        ));
    }
    Ok(download)
}

fn cmd_download(
    paths: &Paths,
    target: Target,
    output: Option<PathBuf>,
    concurrent: bool,
    timeout: Option<u64>,
) -> Result<()> {
    let reporter = ConsoleReporter;
    let download = run_download(paths, target, concurrent, timeout, &reporter)?;
    let text = download.rules.to_text(target);

    match output {
        Some(path) => {
            std::fs::write(&path, format!("{text}\n"))
                .with_context(|| format!("write rules to {}", path.display()))?;
            println!("Rules written to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn cmd_apply(
    paths: &Paths,
    target: Target,
    rules: Option<PathBuf>,
    concurrent: bool,
    timeout: Option<u64>,
) -> Result<()> {
    let reporter = ConsoleReporter;

    let rules_text = match rules {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("read rules file {}", path.display()))?;
            let (rule_set, rejected) = validate_rules_text(&content, target);
            if let Some(bad) = rejected.first() {
                return Err(EngineError::InvalidInput(format!(
                    "{}: not a valid {target} rule line: {bad}",
                    path.display()
                ))
                .into());
            }
            if rule_set.is_empty() {
                return Err(EngineError::InvalidInput(format!(
                    "{}: no rule lines found",
                    path.display()
                ))
                .into());
            }
            reporter.log(&format!(
                "Applying {} rules from {}",
                rule_set.len(),
                path.display()
            ));
            rule_set.to_text(target)
        }
        None => {
            let download = run_download(paths, target, concurrent, timeout, &reporter)?;
            download.rules.to_text(target)
        }
    };

    let live = platform::hosts_path();
    let outcome = writer::apply(paths, &live, target, &rules_text, &reporter)?;
    println!(
        "Applied {target} rules to {} (backup: {})",
        outcome.hosts_path.display(),
        outcome.backup_path.display()
    );
    Ok(())
}

fn cmd_backup(paths: &Paths) -> Result<()> {
    let reporter = ConsoleReporter;
    let live = platform::hosts_path();
    let record = backup::create_backup(paths, &live, &reporter)?;
    println!("Backup created: {}", record.path.display());
    Ok(())
}

fn cmd_restore(paths: &Paths, backup_id: Option<String>) -> Result<()> {
    let reporter = ConsoleReporter;
    let live = platform::hosts_path();

    let record = match backup_id {
        Some(id) => {
            let record = backup::find_backup(paths, &id)?;
            backup::restore_record(&record, &live, &reporter)?;
            record
        }
        None => backup::restore_latest(paths, &live, &reporter)?,
    };

    println!("Restored {} to {}", record.name, live.display());
    Ok(())
}

fn cmd_list_backups(paths: &Paths) -> Result<()> {
    let records = backup::list_backups(paths)?;
    if records.is_empty() {
        println!("No backups found in {}", paths.backup_dir.display());
        return Ok(());
    }
    for record in records {
        println!("{}\t{}", record.name, record.path.display());
    }
    Ok(())
}

fn cmd_doctor(paths: &Paths, json: bool) -> Result<()> {
    let live = platform::hosts_path();
    let results = crate::doctor::run_checks(paths, &live);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let mut failed = false;
    for check in &results {
        let tag = if check.ok { "[ok]" } else { "[!!]" };
        println!("{tag} {}", check.message);
        failed |= !check.ok;
    }
    if failed {
        anyhow::bail!("one or more checks failed");
    }
    Ok(())
}
