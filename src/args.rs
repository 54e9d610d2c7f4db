use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Args {
    /// video URL (or bare video id); prompted for interactively if omitted
    pub url: Option<String>,

    /// location of config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// notes file to append to (overrides the configured path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
