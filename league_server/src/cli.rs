//! Command-line interface definitions using clap derive API.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::settings::Settings;

/// Player league server
#[derive(Parser)]
#[command(name = "league")]
#[command(about = "Track player wins over HTTP or from the command line")]
#[command(version)]
pub struct Cli {
    /// Player db file, overrides the configured storage path
    #[arg(long, global = true, conflicts_with = "memory")]
    pub db: Option<PathBuf>,

    /// Keep scores in memory only
    #[arg(long, global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind to, overrides the configured host and port
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
    /// Record wins typed as "<Name> wins", one per line, until end of input
    Play,
}

impl Cli {
    /// Fold command-line overrides into the loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(db) = &self.db {
            settings.storage.backend = "file".to_string();
            settings.storage.path = db.clone();
        }
        if self.memory {
            settings.storage.backend = "memory".to_string();
        }
        if let Commands::Serve { addr: Some(addr) } = &self.command {
            settings.server.host = addr.ip().to_string();
            settings.server.port = addr.port();
        }
    }
}
