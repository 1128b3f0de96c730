mod platform;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "resume-tailor")]
#[command(about = "Score a resume against a job description and tailor it with an AI oracle")]
#[command(version)]
pub struct Cli {
    /// RON configuration file. Defaults to ./resume_tailor.ron when present.
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of the configured level.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Skip the simulated sign-in screen.
    #[arg(long)]
    pub no_login: bool,
}

fn main() -> anyhow::Result<()> {
    platform::run_app(Cli::parse())
}
