pub mod commands;
pub mod menu;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "headwire")]
#[command(about = "Browse Times of India headlines from the terminal", long_about = None)]
pub struct Cli {
    /// Path to a config file (defaults to ~/.config/headwire/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive topic and headline menu (default)
    Read,
    /// List configured topics
    Topics,
    /// Print the top headlines for a topic
    Headlines {
        /// Topic name, as shown by `topics`
        topic: String,
        /// Number of headlines to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Open a link in the browser if its host is allowed
    Open {
        url: String,
    },
}
