//! Probe and progressive download integration tests.
//!
//! Tests: format probing, progressive download to `{dir}/{title}.{ext}`,
//! progress events (downloading then finished).
//!
//! Uses "Me at the zoo" (jNQXAC9IVRw) - predictable metadata.

use eyre::{OptionExt, Result, WrapErr, ensure};
use piratetube_dl::dl::{Extractor, VideoInfo, YdlParams, YtDlp};
use piratetube_dl::error::Error;
use piratetube_dl::hooks::ProgressEvent;
use piratetube_dl::presets::Progressive;
use std::cell::RefCell;
use std::fs::{create_dir_all, remove_dir_all};
use std::path::PathBuf;
use std::rc::Rc;

const TEST_URL: &str = "https://youtu.be/jNQXAC9IVRw";
const TEST_ID: &str = "jNQXAC9IVRw";
const TEST_TITLE: &str = "Me at the zoo";
const TEST_UPLOADER: &str = "jawed";

struct TestContext {
    dir: PathBuf,
    info: VideoInfo,
    events: Vec<ProgressEvent>,
}

// Python objects are thread-bound, so each test builds its own context.
fn run_download() -> Result<TestContext> {
    let dir = create_temp_dir();
    let ytdlp = YtDlp::default();

    let info = ytdlp
        .extract_info(TEST_URL, YdlParams::probe())
        .wrap_err("yt-dlp probe failed")?;

    let format = info
        .formats
        .iter()
        .rev()
        .find(|f| f.is_progressive())
        .ok_or_eyre("no progressive format offered")?;

    let events: Rc<RefCell<Vec<ProgressEvent>>> = Rc::default();
    let sink = {
        let events = Rc::clone(&events);
        move |event: ProgressEvent| events.borrow_mut().push(event)
    };

    let params = YdlParams::from(Progressive {
        format_id: format.format_id.clone(),
    })
    .with_output_dir(&dir);

    ytdlp
        .download(TEST_URL, params, Box::new(sink))
        .wrap_err("yt-dlp download failed")?;

    ensure!(dir.read_dir()?.next().is_some(), "nothing downloaded");

    Ok(TestContext {
        dir,
        info,
        events: events.take(),
    })
}

fn create_temp_dir() -> PathBuf {
    let mut temp_dir = std::env::temp_dir();
    temp_dir.push("piratetube-dl-test");

    // Clean up previous test run
    if temp_dir.exists() {
        remove_dir_all(&temp_dir).ok();
    }

    create_dir_all(&temp_dir).expect("failed to create temp dir");

    temp_dir
}

#[test]
#[ignore = "network I/O"]
fn info_fields() {
    let info = YtDlp::default()
        .extract_info(TEST_URL, YdlParams::probe())
        .expect("probe failed");

    assert_eq!(info.id.as_deref(), Some(TEST_ID));
    assert_eq!(info.title.as_deref(), Some(TEST_TITLE));
    assert_eq!(info.uploader.as_deref(), Some(TEST_UPLOADER));
    assert!(info.duration.is_some_and(|d| d > 0.0));
    assert!(!info.formats.is_empty());
}

#[test]
#[ignore = "network I/O"]
fn progressive_download() {
    let ctx = run_download().expect("download failed");

    let expected = ctx.dir.join(format!("{TEST_TITLE}.mp4"));
    assert!(
        expected.exists(),
        "downloaded file not found: {:?}",
        expected.display()
    );
    assert_eq!(ctx.info.title.as_deref(), Some(TEST_TITLE));

    assert!(
        ctx.events
            .iter()
            .any(|e| matches!(e, ProgressEvent::Downloading(_))),
        "no downloading events"
    );
    assert!(
        matches!(ctx.events.last(), Some(ProgressEvent::Finished { .. })),
        "last event should be finished, got {:?}",
        ctx.events.last()
    );
}

#[test]
#[ignore = "network I/O"]
fn unsupported_url_is_extraction_error() {
    let err = YtDlp::default()
        .extract_info("https://example.invalid/nothing", YdlParams::probe())
        .expect_err("probe should fail");

    assert!(matches!(err, Error::Extraction(_)), "unexpected: {err:?}");
}
