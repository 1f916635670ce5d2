use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::SortMode;

#[derive(Parser)]
#[command(name = "shop", about = concat!("shop v", env!("CARGO_PKG_VERSION"), " - a shopping list for your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ./shop.toml if it exists)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Initial sort order: name or quantity
    #[arg(long, global = true)]
    pub sort: Option<SortMode>,

    /// Reject bad quantities when editing instead of using 1
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an intent script and print the resulting list
    Replay(ReplayArgs),
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Script to run (default: read from stdin)
    pub file: Option<PathBuf>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
