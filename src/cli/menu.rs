use std::path::Path;

use clap::Parser;
use madrasa::{
    MenuConfig, MenuItem, Principal, Role,
    domain::menu::active_trail,
};

use super::OutputFormat;
use super::terminal::{Colorize, is_narrow, paint_roles};

/// Command arguments for `madrasa menu`.
#[derive(Debug, Parser)]
#[command(about = "Preview the menu as a given set of roles sees it")]
pub struct Menu {
    /// Roles held by the user (repeatable); omit for an unauthenticated
    /// visitor
    #[arg(long = "role", value_name = "ROLE", value_parser = super::parse_role)]
    roles: Vec<Role>,

    /// Current route path, used to mark the active trail
    #[arg(long, value_name = "PATH")]
    path: Option<String>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Menu {
    pub fn run(self, menu_path: &Path) -> anyhow::Result<()> {
        let config = MenuConfig::load(menu_path).map_err(|e| anyhow::anyhow!(e))?;

        let principal =
            (!self.roles.is_empty()).then(|| Principal::new(self.roles.iter().copied()));
        let filtered = madrasa::filter_menu(config.items(), principal.as_ref());

        if self.output == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&filtered)?);
            return Ok(());
        }

        if filtered.is_empty() {
            println!("{}", "(no visible items)".dim());
            return Ok(());
        }

        let active: Vec<&str> = self.path.as_deref().map_or_else(Vec::new, |path| {
            active_trail(config.items(), path)
                .into_iter()
                .map(|key| key.as_str())
                .collect()
        });

        for item in &filtered {
            print_line(item, 0, &active);
            for child in &item.children {
                print_line(child, 1, &active);
            }
        }

        Ok(())
    }
}

fn print_line(item: &MenuItem, depth: usize, active: &[&str]) {
    let marker = if active.contains(&item.key.as_str()) {
        "*".success()
    } else {
        " ".to_string()
    };
    let indent = "  ".repeat(depth);
    let link = item.link.as_deref().unwrap_or("");

    if is_narrow() {
        println!("{marker} {indent}{}", item.label);
    } else {
        let restriction = paint_roles(&item.roles)
            .map_or_else(String::new, |summary| format!(" {summary}"));
        println!("{marker} {indent}{:<24} {}{restriction}", item.label, link.dim());
    }
}
