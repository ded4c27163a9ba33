use std::path::Path;

use clap::Parser;
use madrasa::MenuConfig;

use super::OutputFormat;
use super::terminal::Colorize;

/// Command arguments for `madrasa validate`.
#[derive(Debug, Parser)]
#[command(about = "Validate the menu definition file")]
pub struct Validate {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Validate {
    pub fn run(self, menu_path: &Path) -> anyhow::Result<()> {
        let config = MenuConfig::load(menu_path).map_err(|e| anyhow::anyhow!(e))?;
        let issues = config.validate();

        match self.output {
            OutputFormat::Json => {
                let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
                println!("{}", serde_json::to_string_pretty(&messages)?);
            }
            OutputFormat::Table => {
                for issue in &issues {
                    println!("{} {issue}", "error:".error());
                }
            }
        }

        if issues.is_empty() {
            if self.output == OutputFormat::Table {
                println!(
                    "{}",
                    format!("menu OK ({} top-level items)", config.items().len()).success()
                );
            }
            Ok(())
        } else {
            anyhow::bail!("{} issue(s) found in {}", issues.len(), menu_path.display())
        }
    }
}
