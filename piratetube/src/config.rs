//! Configuration resolved once at startup.
//!
//! The destination folder is decided here and handed to the session; nothing
//! reads it from global state afterwards.

use crate::cli::Args;
use crate::lister::Policy;
use crate::preflight::Preflight;
use eyre::{OptionExt, Result, WrapErr};
use std::path::{Path, PathBuf};

/// Folder bound to the host's downloads directory when running in a container.
pub const CONTAINER_DOWNLOADS: &str = "/downloads";

/// Subfolder of the desktop used by the simple variant.
pub const DESKTOP_SUBFOLDER: &str = "PYT";

/// Which of the two downloaders runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Resolution menu, merged MP4 with AAC audio. Needs FFmpeg.
    #[default]
    Pro,
    /// Progressive streams only, no FFmpeg.
    Simple,
}

impl Variant {
    pub fn policy(self) -> Policy {
        match self {
            Self::Pro => Policy::Rich,
            Self::Simple => Policy::Simple,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Pro => "🎬 YOUTUBE DOWNLOADER PRO 🎬",
            Self::Simple => "SIMPLE DOWNLOADER (No FFmpeg Required)",
        }
    }

    /// Default destination folder.
    pub fn default_output_dir(self) -> Result<PathBuf> {
        match self {
            Self::Pro => Ok(PathBuf::from(CONTAINER_DOWNLOADS)),
            Self::Simple => dirs::desktop_dir()
                .or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
                .map(|desktop| desktop.join(DESKTOP_SUBFOLDER))
                .ok_or_eyre("failed to find desktop directory"),
        }
    }
}

/// Resolved session configuration.
#[derive(Debug)]
pub struct Config {
    pub variant: Variant,
    pub output_dir: PathBuf,
    /// Required tool check, run before the loop starts
    pub preflight: Option<Preflight>,
}

impl Config {
    pub fn new(variant: Variant, output_dir: PathBuf) -> Self {
        let preflight = match variant {
            Variant::Pro => Some(Preflight::ffmpeg()),
            Variant::Simple => None,
        };

        Self {
            variant,
            output_dir,
            preflight,
        }
    }

    /// Resolve from CLI arguments, falling back to the variant's default folder.
    pub fn resolve(variant: Variant, args: Args) -> Result<Self> {
        let output_dir = match args.output {
            Some(dir) => dir,
            None => variant.default_output_dir()?,
        };

        Ok(Self::new(variant, output_dir))
    }

    /// Create the destination folder if missing.
    pub fn ensure_output_dir(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.output_dir).wrap_err_with(|| {
            format!(
                "failed to create output directory: {:?}",
                self.output_dir.display()
            )
        })?;

        Ok(&self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pro_defaults_to_container_mount_and_needs_ffmpeg() {
        let config = Config::resolve(Variant::Pro, Args::default()).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/downloads"));
        assert!(matches!(
            config.preflight,
            Some(Preflight { ref program, .. }) if program == "ffmpeg"
        ));
    }

    #[test]
    fn simple_defaults_to_desktop_subfolder_without_preflight() {
        let config = Config::resolve(Variant::Simple, Args::default()).unwrap();

        assert!(config.output_dir.ends_with("PYT"));
        assert!(config.preflight.is_none());
    }

    #[test]
    fn output_override_wins() {
        let args = Args {
            output: Some(PathBuf::from("/tmp/videos")),
        };
        let config = Config::resolve(Variant::Pro, args).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/videos"));
    }

    #[test]
    fn ensure_output_dir_is_idempotent() {
        let dir = std::env::temp_dir().join("piratetube-config-test");
        let config = Config::new(Variant::Simple, dir.clone());

        config.ensure_output_dir().unwrap();
        config.ensure_output_dir().unwrap();
        assert!(dir.is_dir());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn variant_policies() {
        assert_eq!(Variant::Pro.policy(), Policy::Rich);
        assert_eq!(Variant::Simple.policy(), Policy::Simple);
    }
}
