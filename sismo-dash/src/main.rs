//! sismo-dash
//!
//! Select a region the way a map click would, switch tabs, and print the
//! settled content area as plain text.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sismo_core::{Config, Dashboard, PlainText, Present, TabId};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "sismo-dash", author, version, about = "Regional seismic history and forecasts")]
struct Cli {
    /// Configuration file (JSON); defaults apply when it does not exist
    #[arg(long, global = true, default_value = "sismo.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List selectable regions
    Regions,
    /// Select a region and print its content area
    Show {
        region: String,
        /// antecedentes, pronostico or estadisticas
        #[arg(long)]
        tab: Option<TabId>,
        /// Width of a full statistics bar
        #[arg(long, default_value_t = 20)]
        bar_columns: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    sismo_core::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    debug!(api = %config.api_base_url, dataset = %config.dataset_path.display(), "Configuration loaded");

    let dashboard = Dashboard::new(config).context("Failed to build dashboard")?;

    match cli.command {
        Commands::Regions => {
            for name in dashboard.region_names() {
                println!("{}", name);
            }
        }
        Commands::Show {
            region,
            tab,
            bar_columns,
        } => {
            let view = dashboard
                .show(&region, tab)
                .await
                .with_context(|| format!("Failed to show {}", region))?;

            let tabs = dashboard.controller().tab_bar();
            let strip: Vec<String> = tabs
                .buttons
                .iter()
                .map(|b| {
                    if b.active {
                        format!("[{}]", b.label)
                    } else {
                        b.label.to_string()
                    }
                })
                .collect();

            println!("{}", strip.join(" | "));
            print!("{}", PlainText { bar_columns }.present(&view.model));
        }
    }

    Ok(())
}
