//! Command-line inspection tool for the course platform core.
//!
//! Derives course schedules and previews role-filtered navigation from the
//! same library the UI layer uses.

mod cli;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
