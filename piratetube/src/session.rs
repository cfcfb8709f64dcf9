//! Interactive loop: URL → menu → choice → download, until the user quits.
//!
//! ```text
//! AwaitingUrl ──url──▶ ListingFormats ──options──▶ AwaitingSelection ──valid──▶ Downloading
//!      ▲  │                  │ failure                   │ invalid                 │ done / failure
//!      │  └──"q"──▶ Terminated                           │                         │
//!      └─────────────────────┴───────────────────────────┴─────────────────────────┘
//! ```

use crate::config::{Config, Variant};
use crate::dl;
use crate::error::Failure;
use crate::lister;
use crate::preflight::Unavailable;
use crate::progress::ProgressPresenter;
use crate::selector::select;
use crate::term::{self, BLUE, BOLD, CYAN, END, GREEN, RED, YELLOW};
use eyre::{Result, WrapErr};
use piratetube_dl::dl::{Extractor, YdlParams};
use piratetube_dl::error::Error as DlError;
use piratetube_dl::presets::{AUDIO_BITRATE, AUDIO_CODEC};
use std::io::{BufRead, Write};

/// Answer that ends the session, compared case-insensitively.
pub const QUIT: &str = "q";

/// How a session ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Exit {
    /// User typed the quit sentinel or closed the input
    Quit,
    /// A required tool was missing, the loop never started
    PreflightFailed,
}

/// One interactive session over `input`/`output`.
pub struct Session<E, R, W> {
    config: Config,
    extractor: E,
    input: R,
    output: W,
}

impl<E: Extractor, R: BufRead, W: Write> Session<E, R, W> {
    pub fn new(config: Config, extractor: E, input: R, output: W) -> Self {
        Self {
            config,
            extractor,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<Exit> {
        term::header(&mut self.output, self.config.variant.title())?;

        if let Some(preflight) = &self.config.preflight {
            match preflight.check() {
                Ok(version) => {
                    tracing::debug!(version, "preflight ok");
                    term::success(&mut self.output, "FFmpeg detected and ready!")?;
                }
                Err(e) => {
                    self.report_preflight(&e)?;
                    return Ok(Exit::PreflightFailed);
                }
            }
        }

        term::info(
            &mut self.output,
            &format!(
                "Downloads will be saved to: {BOLD}{}{END}\n",
                self.config.output_dir.display()
            ),
        )?;

        loop {
            let Some(url) = self.prompt_url()? else {
                break;
            };

            if url.eq_ignore_ascii_case(QUIT) {
                break;
            }

            if url.is_empty() {
                continue;
            }

            match self.attempt(&url) {
                Ok(()) => {}
                Err(Failure::Io(e)) => return Err(e).wrap_err("terminal I/O failed"),
                Err(failure) => self.report(&url, failure)?,
            }
        }

        writeln!(
            self.output,
            "\n{CYAN}👋 Thanks for using PirateTube!{END}\n"
        )?;

        Ok(Exit::Quit)
    }

    /// Read one URL; `None` at end of input.
    fn prompt_url(&mut self) -> Result<Option<String>> {
        term::rule(&mut self.output, '─', BOLD)?;
        term::prompt(
            &mut self.output,
            &format!("{BOLD}🔗 Enter video URL{END} (or {RED}'{QUIT}'{END} to quit): "),
        )?;
        let line = self.read_line().wrap_err("failed to read input")?;
        term::rule(&mut self.output, '─', BOLD)?;

        Ok(line)
    }

    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line)?;

        Ok((n > 0).then(|| line.trim().to_string()))
    }

    /// ListingFormats → AwaitingSelection → Downloading for one URL.
    fn attempt(&mut self, url: &str) -> Result<(), Failure> {
        let variant = self.config.variant;
        let policy = variant.policy();

        tracing::info!(url, "listing formats");

        let info = self
            .extractor
            .extract_info(url, YdlParams::probe())
            .map_err(Failure::extraction)?;

        lister::render_info(&mut self.output, &info, policy)?;

        let options = lister::list(&info.formats, policy);
        tracing::debug!(total = info.formats.len(), usable = options.len(), "formats");

        if options.is_empty() {
            return Err(Failure::NoFormats);
        }

        lister::render_table(&mut self.output, &options, policy)?;

        if variant == Variant::Pro {
            term::info(
                &mut self.output,
                &format!("{BOLD}Lower numbers = better quality (and larger files){END}"),
            )?;
        }

        term::prompt(
            &mut self.output,
            &format!(
                "\n{BOLD}Pick a number (1-{}){END} or press {GREEN}Enter{END} for best quality: ",
                options.len()
            ),
        )?;
        let Some(choice) = self.read_line()? else {
            writeln!(self.output)?;
            return Ok(());
        };

        let selection = select(&options, &choice)?;
        let option = selection.option;

        if selection.auto {
            term::info(
                &mut self.output,
                &format!("Auto-selected best quality: {BOLD}{}{END}", option.label()),
            )?;
        }

        if variant == Variant::Pro {
            writeln!(
                self.output,
                "\n{BLUE}🎬 Downloading {} video + audio...{END}\n",
                option.label()
            )?;
        }
        self.output.flush()?;

        dl::execute(
            &self.extractor,
            url,
            &option.target,
            &self.config.output_dir,
            Box::new(ProgressPresenter::new(variant)),
        )?;

        self.report_complete()?;
        Ok(())
    }

    fn report_complete(&mut self) -> std::io::Result<()> {
        let dir = self.config.output_dir.display().to_string();

        writeln!(self.output)?;
        term::rule(&mut self.output, '═', GREEN)?;
        writeln!(self.output, "{BOLD}{GREEN}✨ DOWNLOAD COMPLETE! ✨{END}")?;
        term::rule(&mut self.output, '═', GREEN)?;
        term::success(&mut self.output, &format!("Video saved to: {BOLD}{dir}{END}"))?;

        if self.config.variant == Variant::Pro {
            term::success(
                &mut self.output,
                &format!(
                    "Audio format: {BOLD}{} {}bps{END} (universal compatibility)",
                    AUDIO_CODEC.to_uppercase(),
                    AUDIO_BITRATE
                ),
            )?;
        }

        term::rule(&mut self.output, '═', GREEN)?;
        writeln!(self.output)
    }

    /// Tell the user what went wrong; the loop continues afterwards.
    fn report(&mut self, url: &str, failure: Failure) -> Result<()> {
        tracing::warn!(url, error = %failure, "attempt failed");

        match failure {
            Failure::Cancelled => {
                writeln!(
                    self.output,
                    "\n\n{YELLOW}⏸️  Download cancelled by user.{END}\n"
                )?;
            }
            Failure::NoFormats => {
                let msg = match self.config.variant {
                    Variant::Pro => "No formats found for this video.",
                    Variant::Simple => {
                        "No simple formats found. YouTube might be blocking this video."
                    }
                };
                term::error(&mut self.output, msg)?;
            }
            Failure::InvalidSelection(_) => {
                term::error(&mut self.output, "Invalid choice.")?;
            }
            Failure::Extraction(DlError::MissingModule(e))
            | Failure::Download(DlError::MissingModule(e)) => {
                term::error(&mut self.output, &format!("yt-dlp is not installed: {e}"))?;
                term::info(&mut self.output, "Install it with: pip install yt-dlp")?;
            }
            Failure::Extraction(e) | Failure::Download(e) => {
                writeln!(self.output)?;
                term::rule(&mut self.output, '═', RED)?;
                term::error(&mut self.output, &format!("An error occurred: {e}"))?;
                term::rule(&mut self.output, '═', RED)?;
                writeln!(self.output)?;
            }
            Failure::Io(e) => return Err(e.into()),
        }

        Ok(())
    }

    fn report_preflight(&mut self, e: &Unavailable) -> Result<()> {
        tracing::error!(error = %e, "preflight failed");

        term::error(&mut self.output, "FFmpeg not found in PATH!")?;
        term::info(
            &mut self.output,
            "Please restart your terminal after installing FFmpeg",
        )?;
        writeln!(
            self.output,
            "\n{RED}Please restart your terminal and try again.{END}"
        )?;
        term::prompt(&mut self.output, "\nPress Enter to exit...")?;
        self.read_line()?;

        Ok(())
    }
}
