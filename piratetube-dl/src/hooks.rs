//! Progress and logging callbacks handed to yt-dlp.
//!
//! yt-dlp calls back into Rust synchronously, on the thread that started the
//! download, so the bridges are `unsendable` and the sinks need no locking.

use pyo3::prelude::*;
use std::rc::Rc;

/// Pre-formatted transfer statistics of an in-progress download.
///
/// Values come straight from yt-dlp's `_*_str` fields with terminal colour
/// sequences removed, e.g. `" 45.0%"` → `"45.0%"`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DownloadProgress {
    pub percent: Option<String>,
    pub speed: Option<String>,
    pub eta: Option<String>,
    pub downloaded: Option<String>,
    pub total: Option<String>,
}

/// Status pushed by yt-dlp while a download runs.
#[derive(Clone, Debug, PartialEq)]
pub enum ProgressEvent {
    Downloading(DownloadProgress),
    /// One item (video or audio track) finished; post-processing may follow.
    Finished { filename: Option<String> },
    /// Any other status, e.g. `"error"`.
    Other(String),
}

/// Receives [`ProgressEvent`]s during a download.
pub trait ProgressSink {
    fn on_progress(&mut self, event: ProgressEvent);
}

impl<F: FnMut(ProgressEvent)> ProgressSink for F {
    fn on_progress(&mut self, event: ProgressEvent) {
        self(event)
    }
}

/// Logger passed to `YoutubeDL(params={"logger": ...})`.
pub trait Logger {
    fn debug(&self, msg: &str);
    fn warning(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Row produced by `dl.py` for every progress hook call.
#[derive(Debug, FromPyObject)]
#[pyo3(from_item_all)]
struct ProgressRow {
    status: String,
    percent: Option<String>,
    speed: Option<String>,
    eta: Option<String>,
    downloaded: Option<String>,
    total: Option<String>,
    filename: Option<String>,
}

impl From<ProgressRow> for ProgressEvent {
    fn from(row: ProgressRow) -> Self {
        match row.status.as_str() {
            "downloading" => Self::Downloading(DownloadProgress {
                percent: row.percent,
                speed: row.speed,
                eta: row.eta,
                downloaded: row.downloaded,
                total: row.total,
            }),
            "finished" => Self::Finished {
                filename: row.filename,
            },
            _ => Self::Other(row.status),
        }
    }
}

/// Callable wrapper around a [`ProgressSink`].
#[pyclass(unsendable, name = "ProgressHook")]
pub(crate) struct ProgressHook {
    sink: Box<dyn ProgressSink>,
}

impl ProgressHook {
    pub(crate) fn new(sink: Box<dyn ProgressSink>) -> Self {
        Self { sink }
    }
}

#[pymethods]
impl ProgressHook {
    /// Never raises: a malformed event must not abort the download.
    fn __call__(&mut self, row: &Bound<'_, PyAny>) {
        match row.extract::<ProgressRow>() {
            Ok(row) => self.sink.on_progress(row.into()),
            Err(e) => tracing::debug!(error = %e, "dropping malformed progress event"),
        }
    }
}

/// Object with `debug`/`warning`/`error` methods forwarding to a [`Logger`].
#[pyclass(unsendable, name = "Logger")]
pub(crate) struct LoggerBridge {
    inner: Rc<dyn Logger>,
}

impl LoggerBridge {
    pub(crate) fn new(inner: Rc<dyn Logger>) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl LoggerBridge {
    fn debug(&self, msg: &str) {
        self.inner.debug(msg);
    }

    fn warning(&self, msg: &str) {
        self.inner.warning(msg);
    }

    fn error(&self, msg: &str) {
        self.inner.error(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::ffi::CStr;

    fn call_hook(row: &'static CStr) -> Vec<ProgressEvent> {
        let events: Rc<RefCell<Vec<ProgressEvent>>> = Rc::default();
        let sink = {
            let events = Rc::clone(&events);
            move |event: ProgressEvent| events.borrow_mut().push(event)
        };

        Python::attach(|py| {
            let hook = Bound::new(py, ProgressHook::new(Box::new(sink))).unwrap();
            let row = py.eval(row, None, None).unwrap();
            hook.call1((row,)).unwrap();
        });

        events.take()
    }

    #[test]
    fn downloading_row() {
        let events = call_hook(
            c"{'status': 'downloading', 'percent': '45.0%', 'speed': '1.2MiB/s', 'eta': '00:10', 'downloaded': '4.5MiB', 'total': '10.0MiB', 'filename': None}",
        );

        assert_eq!(
            events,
            vec![ProgressEvent::Downloading(DownloadProgress {
                percent: Some("45.0%".to_string()),
                speed: Some("1.2MiB/s".to_string()),
                eta: Some("00:10".to_string()),
                downloaded: Some("4.5MiB".to_string()),
                total: Some("10.0MiB".to_string()),
            })]
        );
    }

    #[test]
    fn finished_row() {
        let events = call_hook(
            c"{'status': 'finished', 'percent': None, 'speed': None, 'eta': None, 'downloaded': None, 'total': None, 'filename': '/tmp/a.mp4'}",
        );

        assert_eq!(
            events,
            vec![ProgressEvent::Finished {
                filename: Some("/tmp/a.mp4".to_string())
            }]
        );
    }

    #[test]
    fn malformed_row_is_dropped() {
        let events = call_hook(c"{'status': 'downloading'}");
        assert!(events.is_empty());

        let events = call_hook(c"42");
        assert!(events.is_empty());
    }

    #[test]
    fn other_status() {
        let events = call_hook(
            c"{'status': 'error', 'percent': None, 'speed': None, 'eta': None, 'downloaded': None, 'total': None, 'filename': None}",
        );
        assert_eq!(events, vec![ProgressEvent::Other("error".to_string())]);
    }

    struct Recorder(RefCell<Vec<String>>);

    impl Logger for Recorder {
        fn debug(&self, msg: &str) {
            self.0.borrow_mut().push(format!("debug:{msg}"));
        }

        fn warning(&self, msg: &str) {
            self.0.borrow_mut().push(format!("warning:{msg}"));
        }

        fn error(&self, msg: &str) {
            self.0.borrow_mut().push(format!("error:{msg}"));
        }
    }

    #[test]
    fn logger_bridge_forwards_by_severity() {
        let recorder = Rc::new(Recorder(RefCell::new(Vec::new())));

        Python::attach(|py| {
            let bridge = Bound::new(py, LoggerBridge::new(recorder.clone())).unwrap();
            bridge.call_method1("debug", ("a",)).unwrap();
            bridge.call_method1("warning", ("b",)).unwrap();
            bridge.call_method1("error", ("c",)).unwrap();
        });

        assert_eq!(
            *recorder.0.borrow(),
            vec!["debug:a", "warning:b", "error:c"]
        );
    }
}
