use crate::output::print_json;
use callsheet_core::config::{Config, WarnLevel};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the resolved configuration
    Show,
    /// Validate the configuration and report warnings
    Check,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    match subcmd {
        ConfigSubcommand::Show => {
            if json {
                print_json(&serde_json::json!({
                    "project": config.project,
                    "template_team": config.template_team,
                    "targets": config.resolved_targets(),
                    "agent": {
                        "base_url": config.agent.base_url,
                        "model": config.agent.model,
                        "api_key_env": config.agent.api_key_env,
                    },
                }))?;
                return Ok(());
            }
            println!("project:       {}", config.project);
            println!("template team: {}", config.template_team);
            for (cat, n) in config.resolved_targets() {
                println!("target.{cat}: {n}");
            }
            println!("agent:         {} ({})", config.agent.model, config.agent.base_url);
            Ok(())
        }
        ConfigSubcommand::Check => {
            let warnings = config.validate();
            if json {
                print_json(&warnings)?;
                return Ok(());
            }
            if warnings.is_empty() {
                println!("Configuration OK.");
                return Ok(());
            }
            let mut has_error = false;
            for w in &warnings {
                match w.level {
                    WarnLevel::Warning => println!("warning: {}", w.message),
                    WarnLevel::Error => {
                        has_error = true;
                        println!("error: {}", w.message);
                    }
                }
            }
            if has_error {
                anyhow::bail!("configuration has errors");
            }
            Ok(())
        }
    }
}
