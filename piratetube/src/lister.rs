//! Format lister: turns yt-dlp format descriptors into a numbered menu.

use crate::term::{BOLD, CYAN, END, GREEN, WIDTH, YELLOW, rule};
use piratetube_dl::dl::{FormatDescriptor, VideoInfo};
use std::collections::HashSet;
use std::io::{self, Write};

/// Frame rate shown when yt-dlp does not report one.
pub const DEFAULT_FPS: f64 = 30.0;

const MIB: f64 = 1024.0 * 1024.0;

/// How descriptors are filtered and ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Video formats with a height, one per height, tallest first.
    Rich,
    /// Progressive formats only, in yt-dlp's order.
    Simple,
}

/// Display decoration by resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    /// 1080p and up
    Top,
    /// 720p to 1079p
    Mid,
    Low,
}

impl Tier {
    pub fn from_height(height: u32) -> Self {
        match height {
            1080.. => Self::Top,
            720..1080 => Self::Mid,
            _ => Self::Low,
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Top => GREEN,
            Self::Mid => YELLOW,
            Self::Low => END,
        }
    }

    fn badge(self) -> &'static str {
        match self {
            Self::Top => "🔥 HD",
            Self::Mid => "📺 HD",
            Self::Low => "📱 SD",
        }
    }
}

/// What a menu entry downloads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Quality {
    /// Best video + audio no taller than this height
    MaxHeight(u32),
    /// This exact yt-dlp format id
    Exact(String),
}

/// One numbered menu entry.
#[derive(Clone, Debug, PartialEq)]
pub struct QualityOption {
    /// 1-based position in the menu
    pub index: usize,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    /// Human-readable size, e.g. `"12.5 MB"` or `"Unknown"`
    pub size: String,
    pub ext: Option<String>,
    pub tier: Option<Tier>,
    pub target: Quality,
}

impl QualityOption {
    /// `"720p"`, or `"?"` when the height is unknown.
    pub fn label(&self) -> String {
        match self.height {
            Some(h) => format!("{h}p"),
            None => "?".to_string(),
        }
    }
}

/// Filter, dedupe and number `formats` according to `policy`.
pub fn list(formats: &[FormatDescriptor], policy: Policy) -> Vec<QualityOption> {
    let mut options = match policy {
        Policy::Rich => rich(formats),
        Policy::Simple => simple(formats),
    };

    for (option, index) in options.iter_mut().zip(1..) {
        option.index = index;
    }

    options
}

fn rich(formats: &[FormatDescriptor]) -> Vec<QualityOption> {
    let mut seen = HashSet::new();

    let mut options: Vec<_> = formats
        .iter()
        .filter(|f| f.has_video())
        .filter_map(|f| f.height.map(|h| (h, f)))
        .filter(|(h, _)| seen.insert(*h))
        .map(|(h, f)| QualityOption {
            index: 0,
            height: Some(h),
            fps: Some(f.fps.unwrap_or(DEFAULT_FPS)),
            size: format_size(f.filesize),
            ext: f.ext.clone(),
            tier: Some(Tier::from_height(h)),
            target: Quality::MaxHeight(h),
        })
        .collect();

    options.sort_by(|a, b| b.height.cmp(&a.height));
    options
}

fn simple(formats: &[FormatDescriptor]) -> Vec<QualityOption> {
    formats
        .iter()
        .filter(|f| f.is_progressive())
        .map(|f| QualityOption {
            index: 0,
            height: f.height,
            fps: f.fps,
            size: format_size(f.filesize),
            ext: f.ext.clone(),
            tier: None,
            target: Quality::Exact(f.format_id.clone()),
        })
        .collect()
}

/// Bytes as `"{:.1} MB"` (binary megabytes), `"Unknown"` when absent or zero.
pub fn format_size(bytes: Option<u64>) -> String {
    match bytes {
        Some(b) if b > 0 => format!("{:.1} MB", b as f64 / MIB),
        _ => "Unknown".to_string(),
    }
}

/// Seconds as `m:ss`.
pub fn format_duration(secs: f64) -> String {
    let secs = secs.max(0.0) as u64;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Print title, duration and channel.
pub fn render_info(w: &mut impl Write, info: &VideoInfo, policy: Policy) -> io::Result<()> {
    let title = info.title.as_deref().unwrap_or("Unknown");
    writeln!(w)?;
    writeln!(w, "{BOLD}📹 Title:{END} {CYAN}{title}{END}")?;

    if policy == Policy::Rich {
        let duration = format_duration(info.duration.unwrap_or_default());
        let uploader = info.uploader.as_deref().unwrap_or("Unknown");
        writeln!(w, "{BOLD}⏱️  Duration:{END} {duration}")?;
        writeln!(w, "{BOLD}👤 Channel:{END} {uploader}")?;
        writeln!(w)?;
    }

    Ok(())
}

/// Print the numbered menu.
pub fn render_table(w: &mut impl Write, options: &[QualityOption], policy: Policy) -> io::Result<()> {
    match policy {
        Policy::Rich => render_rich(w, options),
        Policy::Simple => render_simple(w, options),
    }
}

fn render_rich(w: &mut impl Write, options: &[QualityOption]) -> io::Result<()> {
    rule(w, '─', CYAN)?;
    writeln!(
        w,
        "{BOLD}  {:<4} │ {:<15} │ {:<8} │ {:<16} │ {}{END}",
        "#", "Quality", "FPS", "File Size (est.)", "Tier"
    )?;
    rule(w, '─', CYAN)?;

    for option in options {
        let tier = option.tier.unwrap_or(Tier::Low);
        let fps = option.fps.map(|f| f.to_string()).unwrap_or_default();
        writeln!(
            w,
            "  {}{:<4} │ {:<15} │ {:<8} │ {:<16} │ {}{END}",
            tier.color(),
            option.index,
            option.label(),
            fps,
            option.size,
            tier.badge(),
        )?;
    }

    rule(w, '─', CYAN)?;
    writeln!(w)
}

fn render_simple(w: &mut impl Write, options: &[QualityOption]) -> io::Result<()> {
    writeln!(w, "{:<3} | {:<10} | {}", "#", "Resolution", "Type")?;
    writeln!(w, "{}", "-".repeat(WIDTH / 2))?;

    for option in options {
        let ext = option.ext.as_deref().unwrap_or("?");
        writeln!(w, "{:<3} | {:>5}      | {ext}", option.index, option.label())?;
    }

    writeln!(w)
}
