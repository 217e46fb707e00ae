//! CLI for the stacview catalog viewer.

mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stacview_core::config;
use stacview_core::origin::ProxyOrigin;
use stacview_core::viewer::Viewer;

use commands::{run_links, run_origin, run_show};

/// Top-level CLI for the stacview catalog viewer.
#[derive(Debug, Parser)]
#[command(name = "stacview")]
#[command(about = "stacview: client-side viewer for catalog resources", long_about = None)]
pub struct Cli {
    /// Proxy base URL for this invocation, overriding STACVIEW_PROXY and
    /// the config file.
    #[arg(long, global = true, value_name = "URL")]
    pub proxy: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a resource through the proxy and render it.
    Show {
        /// Resource path relative to the proxy origin (e.g. "collections/x").
        path: String,
    },

    /// List a resource's significant links with rewritten hrefs.
    Links {
        /// Resource path relative to the proxy origin.
        path: String,
    },

    /// Print the resolved proxy origin.
    Origin,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        // Flag > environment > config file > built-in default.
        let configured = cli
            .proxy
            .clone()
            .or_else(|| config::effective_proxy(config::proxy_from_env(), cfg.proxy.clone()));
        let origin = ProxyOrigin::resolve(configured.as_deref())?;

        match cli.command {
            CliCommand::Show { path } => run_show(&Viewer::new(origin), &path).await?,
            CliCommand::Links { path } => run_links(&Viewer::new(origin), &path).await?,
            CliCommand::Origin => run_origin(&origin),
        }

        Ok(())
    }
}
