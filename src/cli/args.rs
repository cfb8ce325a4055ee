use clap::Parser;
use std::path::PathBuf;

use crate::core::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Recorded SSE response to replay, or `-` to read stdin
    #[arg()]
    pub input: PathBuf,

    /// How forwarded chunks are written to stdout
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Execute detected function calls with the built-in tools
    #[arg(long)]
    pub enable_tools: Option<bool>,

    /// Config file to use instead of ./config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, default_value = "false")]
    pub debug: bool,
}
