use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hookctl")]
#[command(about = "Build and run hookable pipelines from TOML", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to pipeline config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample pipeline config
    Init {
        /// Path for new config file
        #[arg(default_value = "hookctl.toml")]
        path: PathBuf,
    },
    /// Run the pipeline as pre -> actor -> post and print the result
    Run {
        /// Input string fed to the first stage
        #[arg(long)]
        input: String,
    },
    /// Run the pipeline as one request/response chain and print each step
    Trace {
        /// Input string stored as the initial response body
        #[arg(long)]
        input: String,
    },
    /// List built-in transforms
    List,
}
