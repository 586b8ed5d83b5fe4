//! # pim CLI entry point
//!
//! Parses arguments, loads configuration, installs logging, opens the
//! session, and dispatches to the subcommand handler.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pim_app::{LogFormat, PimConfig, Session};
use pim_cli::commands::{run_command, PimCommand, EXIT_ERROR};

/// Personal information manager.
///
/// Stores person records (name, birth date, nationality, citizen ID, phone,
/// passport, salary) in a local data directory, five to a page.
#[derive(Parser, Debug)]
#[command(name = "pim", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the snapshot (overrides the config file).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: PimCommand,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    ExitCode::from(exit_code(run(cli)))
}

/// Collapse the outcome of [`run`] into a process exit code, reporting
/// any error on stderr.
fn exit_code(result: anyhow::Result<u8>) -> u8 {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let mut config = PimConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    init_tracing(cli.verbose, config.log_format);
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        key = %config.storage_key,
        "pim starting"
    );

    let mut session = Session::from_config(&config);
    let today = pim_core::local_today();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_command(&cli.command, &mut session, today, &mut out)
}

/// Map `-v` repetitions to a filter level and install the subscriber.
///
/// Logs go to stderr so command output stays clean on stdout.
fn init_tracing(verbose: u8, format: LogFormat) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_list_with_page() {
        let cli = Cli::try_parse_from(["pim", "list", "--page", "3"]).unwrap();
        assert!(matches!(cli.command, PimCommand::List { page: 3 }));
    }

    #[test]
    fn cli_parse_list_defaults_to_first_page() {
        let cli = Cli::try_parse_from(["pim", "list"]).unwrap();
        assert!(matches!(cli.command, PimCommand::List { page: 1 }));
    }

    #[test]
    fn cli_parse_submit_fields() {
        let cli = Cli::try_parse_from([
            "pim",
            "submit",
            "--first-name",
            "Jane",
            "--citizen-id",
            "1-2345-67890-12-3",
            "--calling-code",
            "+44",
        ])
        .unwrap();
        if let PimCommand::Submit(args) = cli.command {
            assert_eq!(args.first_name.as_deref(), Some("Jane"));
            assert_eq!(args.citizen_id.as_deref(), Some("1-2345-67890-12-3"));
            assert_eq!(args.calling_code.as_deref(), Some("+44"));
            assert!(args.salary.is_none());
        } else {
            panic!("expected submit");
        }
    }

    #[test]
    fn cli_parse_global_flags() {
        let cli = Cli::try_parse_from(["pim", "-vv", "toggle", "4", "--data-dir", "/tmp/p"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/p")));
        assert!(matches!(cli.command, PimCommand::Toggle { id: 4 }));
    }

    #[test]
    fn cli_parse_select_all_clear() {
        let cli = Cli::try_parse_from(["pim", "select-all", "--clear"]).unwrap();
        assert!(matches!(cli.command, PimCommand::SelectAll { clear: true }));
    }

    #[test]
    fn internal_error_exit_code_is_distinct() {
        use pim_cli::commands::{EXIT_INVALID, EXIT_REJECTED};

        let missing = PathBuf::from("/nonexistent/pim.yaml");
        let cli = Cli::try_parse_from(["pim", "--config", missing.to_str().unwrap(), "list"])
            .unwrap();
        let code = exit_code(run(cli));
        assert_eq!(code, EXIT_ERROR);
        assert_ne!(code, EXIT_REJECTED);
        assert_ne!(code, EXIT_INVALID);
        assert_eq!(exit_code(Ok(EXIT_REJECTED)), EXIT_REJECTED);
    }

    #[test]
    fn cli_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["pim", "delete", "abc"]).is_err());
    }
}
