use crate::config::ServerConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "flagship-pages")]
#[command(about = "Personalized landing pages for flagship stashpoint partners")]
pub struct Cli {
    /// Optional TOML file; values there win over the environment
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Print every slug known to the sheet, one per line
    Slugs,
    /// Resolve a single slug and print the row as JSON
    Lookup { slug: String },
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Seconds a resolved page stays fresh (0 disables)")]
    pub revalidate_secs: Option<u64>,

    #[arg(long, help = "Skip warming the page cache from the sheet at startup")]
    pub no_prerender: bool,

    #[arg(long, help = "Directory for persisted signage selections")]
    pub selection_dir: Option<PathBuf>,
}

impl ServeArgs {
    pub fn apply(&self, server: &mut ServerConfig) {
        if let Some(port) = self.port {
            server.port = port;
        }
        if let Some(secs) = self.revalidate_secs {
            server.revalidate_secs = secs;
        }
        if self.no_prerender {
            server.prerender = false;
        }
        if let Some(dir) = &self.selection_dir {
            server.selection_dir = Some(dir.clone());
        }
    }
}
