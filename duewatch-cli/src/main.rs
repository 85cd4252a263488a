//! Duewatch CLI - due date hygiene for GitHub Projects
//!
//! Reports and labels past-due work, reminds authors about missing fields,
//! and runs a few operator actions against the organization's projects.

mod commands;

use std::time::Duration;

use clap::{Parser, Subcommand};
use duewatch_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{AdminArgs, ConfigArgs, LabelArgs, NotifyArgs, ProjectsArgs, ReportArgs};

/// Duewatch: due date hygiene for GitHub Projects
#[derive(Parser, Debug)]
#[command(name = "duewatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Organization login (overrides config and env)
    #[arg(long, global = true)]
    org: Option<String>,

    /// HTTP timeout in seconds (overrides config and env)
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// List the organization's projects
    #[command(visible_alias = "p")]
    Projects(ProjectsArgs),

    /// Print issues matching a due date check
    #[command(visible_alias = "r")]
    Report(ReportArgs),

    /// Label issues matching a due date check
    #[command(visible_alias = "l")]
    Label(LabelArgs),

    /// Send Slack reminders to issue authors
    Notify(NotifyArgs),

    /// Create projects and repositories, attach issues to projects
    Admin(AdminArgs),

    /// Show current configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.org.clone(), cli.timeout.map(Duration::from_secs))?;
    let secrets = Secrets::load()?;

    tracing::debug!(
        organization = ?config.github.organization,
        timeout = ?config.github.timeout,
        "Configuration loaded"
    );

    match cli.command {
        Some(Commands::Version) => {
            println!("duewatch {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Projects(args)) => {
            args.execute(&config, &secrets).await?;
        }
        Some(Commands::Report(args)) => {
            args.execute(&config, &secrets).await?;
        }
        Some(Commands::Label(args)) => {
            args.execute(&config, &secrets).await?;
        }
        Some(Commands::Notify(args)) => {
            args.execute(&config, &secrets).await?;
        }
        Some(Commands::Admin(args)) => {
            args.execute(&config, &secrets).await?;
        }
        Some(Commands::Config(args)) => {
            args.execute(&config, &secrets)?;
        }
        None => {
            println!("duewatch - due date hygiene for GitHub Projects");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["duewatch", "report", "past-due", "--org", "acme", "--timeout", "5"])
            .unwrap();
        assert_eq!(cli.org.as_deref(), Some("acme"));
        assert_eq!(cli.timeout, Some(5));
        assert!(matches!(cli.command, Some(Commands::Report(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["duewatch", "--timeout", "0", "projects"]).is_err());
        assert!(Cli::try_parse_from(["duewatch", "--timeout", "1", "projects"]).is_ok());
    }

    #[test]
    fn test_report_with_ids_flag() {
        let cli = Cli::try_parse_from(["duewatch", "report", "missing-due-date", "--with-ids"]).unwrap();
        match cli.command {
            Some(Commands::Report(args)) => assert!(args.with_ids),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
