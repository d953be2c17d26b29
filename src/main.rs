// geckolog - main.rs
//
// CLI entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Whitelist assembly (built-in + user-defined rules)
// 4. Scanning the log and reporting unexpected error lines
//
// Exit codes: 0 = clean log, 1 = unexpected error lines found,
// 2 = operational failure (unreadable log, malformed whitelist file).

use clap::Parser;
use geckolog::app::gecko_log::GeckoLog;
use geckolog::core::model::FilterOptions;
use geckolog::core::whitelist::{self, Whitelist};
use geckolog::util;
use geckolog::util::error::{GeckoLogError, WhitelistError};
use std::path::PathBuf;
use std::process::ExitCode;

/// geckolog - scan a gecko log for unexpected extension errors.
///
/// Reads the log written by the browser under test and reports every line
/// that classifies as a genuine, unsuppressed error attributable to the
/// extension. Lines inside ignore/expect suppression regions are skipped.
#[derive(Parser, Debug)]
#[command(name = "geckolog", version, about)]
struct Cli {
    /// Path to the gecko log file.
    log_file: PathBuf,

    /// Print each offending line to standard output.
    #[arg(long)]
    print: bool,

    /// Emit the offending lines as a JSON array instead of plain text.
    #[arg(long, conflicts_with = "print")]
    json: bool,

    /// Only scan the lines of the most recent test (from the last
    /// TEST-START marker onward).
    #[arg(long, conflicts_with = "before_first_test")]
    current_test: bool,

    /// Only scan the lines preceding the first TEST-START marker.
    #[arg(long)]
    before_first_test: bool,

    /// TOML file with additional whitelist rules, appended after the
    /// built-in rules.
    #[arg(short = 'w', long = "whitelist")]
    whitelist: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    util::logging::init(cli.debug);

    tracing::debug!(
        version = util::constants::APP_VERSION,
        log_file = %cli.log_file.display(),
        "geckolog starting"
    );

    let error_lines = match scan(&cli) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::error!(error = %e, "Scan failed");
            eprintln!("geckolog: {e}");
            return ExitCode::from(2);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&error_lines) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("geckolog: JSON serialisation failed: {e}");
                return ExitCode::from(2);
            }
        }
    } else if cli.print {
        for line in &error_lines {
            println!("{line}");
        }
    }

    if error_lines.is_empty() {
        tracing::debug!("No unexpected error lines found");
        ExitCode::SUCCESS
    } else {
        eprintln!(
            "geckolog: {} unexpected error line(s) found in '{}'",
            error_lines.len(),
            cli.log_file.display()
        );
        ExitCode::from(1)
    }
}

/// Assemble the whitelist, open the log, and run the scoped error query.
/// Expected errors count as failures here (`return_expected_as_well`
/// disabled): an expect-region that never produced its error still ends,
/// and anything left over is unexpected by definition.
fn scan(cli: &Cli) -> Result<Vec<String>, GeckoLogError> {
    let mut whitelist = Whitelist::builtin();
    if let Some(path) = &cli.whitelist {
        let content = std::fs::read_to_string(path).map_err(|e| WhitelistError::Io {
            path: path.clone(),
            source: e,
        })?;
        let rules = whitelist::parse_rules_toml(&content, path)?;
        tracing::debug!(count = rules.len(), "User whitelist rules loaded");
        whitelist.extend(rules);
    }

    let log = GeckoLog::with_whitelist(&cli.log_file, whitelist);
    let opts = FilterOptions::unexpected_only();

    let lines = if cli.current_test {
        log.error_lines_of_current_test(&opts)
    } else if cli.before_first_test {
        log.error_lines_before_first_test(&opts)
    } else {
        log.all_error_lines(&opts)
    }?;

    Ok(lines)
}
