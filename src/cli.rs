use std::{fmt, path::PathBuf};

mod allow;
mod menu;
mod schedule;
mod terminal;
mod validate;

use allow::Allow;
use clap::ArgAction;
use madrasa::Role;
use menu::Menu;
use schedule::Schedule;
use validate::Validate;

/// Parse a role name from a CLI argument.
fn parse_role(s: &str) -> Result<Role, String> {
    s.parse().map_err(|e: madrasa::domain::UnknownRoleError| e.to_string())
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
        })
    }
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the menu definition file
    #[arg(short, long, default_value = "menu.toml", global = true)]
    menu: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.run(self.menu)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Derive course duration and session count from a date range and
    /// weekly slots
    Schedule(Schedule),

    /// Preview the menu as a given set of roles sees it
    Menu(Menu),

    /// Evaluate the route guard for a path
    Allow(Allow),

    /// Validate the menu definition file
    Validate(Validate),
}

impl Command {
    fn run(self, menu_path: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Schedule(command) => command.run(),
            Self::Menu(command) => command.run(&menu_path),
            Self::Allow(command) => command.run(&menu_path),
            Self::Validate(command) => command.run(&menu_path),
        }
    }
}
