//! CLI argument definitions using clap.

use crate::config::{Config, Variant};
use crate::logger::TerminalLogger;
use crate::session::{Exit, Session};
use clap::{Parser, Subcommand};
use color_eyre::Section;
use eyre::Result;
use piratetube_dl::dl::YtDlp;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug, Parser)]
#[command(name = "piratetube")]
#[command(about = "Interactive video downloader: pick a quality, get a file")]
#[command(version)]
pub struct Cli {
    /// Downloader to run (default: pro)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolution menu, merged MP4 with AAC audio (needs FFmpeg)
    Pro(Args),

    /// Progressive streams only, no FFmpeg required
    Simple(Args),
}

#[derive(clap::Args, Debug, Default)]
pub struct Args {
    /// Destination folder (default: /downloads for pro, Desktop/PYT for simple)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Selected variant and its arguments.
    pub fn into_parts(self) -> (Variant, Args) {
        match self.command {
            None => (Variant::Pro, Args::default()),
            Some(Commands::Pro(args)) => (Variant::Pro, args),
            Some(Commands::Simple(args)) => (Variant::Simple, args),
        }
    }
}

/// Execute CLI command - separated for testing.
pub fn run_cli(cli: Cli) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    let (variant, args) = cli.into_parts();
    let config = Config::resolve(variant, args)?;
    config
        .ensure_output_dir()
        .suggestion("pass a writable folder with --output")?;

    let ytdlp = YtDlp::new(Rc::new(TerminalLogger));
    match ytdlp.version() {
        Ok(version) => tracing::info!(version, "yt-dlp loaded"),
        Err(e) => tracing::warn!(error = %e, "yt-dlp version unavailable"),
    }

    let stdin = std::io::stdin();
    let mut session = Session::new(config, ytdlp, stdin.lock(), std::io::stdout());

    match session.run()? {
        Exit::Quit => tracing::debug!("session ended"),
        Exit::PreflightFailed => tracing::debug!("session aborted before start"),
    }

    Ok(())
}
