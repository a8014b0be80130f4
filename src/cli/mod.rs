use clap::{ Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "flipper",
    about = "AI-assisted fix-and-flip analysis for candidate properties",
    version,
    author,
    long_about = None
)]
pub struct FlipperCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the property storage file
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Analysis backend (live, mock)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Gemini model (gemini-2.5-flash, gemini-2.0-flash)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a property; prompts for fields when --address is omitted
    Add {
        #[arg(short, long)]
        address: Option<String>,

        /// Purchase price in dollars
        #[arg(short, long)]
        price: Option<String>,

        #[arg(short, long)]
        square_feet: Option<String>,

        #[arg(long)]
        bedrooms: Option<String>,

        #[arg(long)]
        bathrooms: Option<String>,

        /// poor, average, good or excellent
        #[arg(long, default_value = "average")]
        condition: String,

        /// Free-text notes about the local market
        #[arg(long)]
        market: Option<String>,
    },

    /// List saved properties
    List,

    /// Remove a property by id or list position
    Remove {
        target: String,
    },

    /// Analyse a property by id or list position
    Analyze {
        target: String,
    },

    /// List supported Gemini models
    Models,

    /// Menu-driven session over the saved properties
    Interactive,
}
