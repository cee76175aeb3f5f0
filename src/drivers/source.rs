use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use crate::drivers::PlotError;
/// Something that can hand out text lines without blocking for long.
pub trait LineSource {
    /// Returns the next line if one becomes available within `timeout`.
    fn poll_line(&mut self, timeout: Duration) -> Option<String>;
}
/// Lines read on a background thread and handed over through a channel.
/// The thread only forwards lines, in order; all parsing and plotting
/// happens on the side that polls.
pub struct ChannelSource {
    rx: Receiver<String>,
    closed: bool,
}
impl ChannelSource {
    pub fn stdin() -> Result<Self, PlotError> {
        // the lock is not Send, so it is taken on the reader thread
        Self::spawn_with(|| std::io::stdin().lock())
    }
    pub fn spawn<R: BufRead + Send + 'static>(reader: R) -> Result<Self, PlotError> {
        Self::spawn_with(move || reader)
    }
    fn spawn_with<R, F>(open: F) -> Result<Self, PlotError>
    where
        R: BufRead + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("line-reader".to_owned())
            .spawn(move || {
                for line in open().lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            log::error!("failed to read input line: {err}");
                            break;
                        }
                    }
                }
                log::debug!("line reader finished");
            })?;
        Ok(Self { rx, closed: false })
    }
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
impl LineSource for ChannelSource {
    fn poll_line(&mut self, timeout: Duration) -> Option<String> {
        match self.rx.recv_timeout(timeout) {
            Ok(line) => Some(line),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                if !self.closed {
                    log::info!("input stream closed; waiting for the window to be closed");
                    self.closed = true;
                }
                None
            }
        }
    }
}
/// In-memory source useful for tests and deterministic playback.
#[derive(Debug, Default)]
pub struct ManualSource {
    queue: VecDeque<String>,
}
impl ManualSource {
    pub fn new<L: Into<String>>(lines: impl IntoIterator<Item = L>) -> Self {
        Self {
            queue: lines.into_iter().map(Into::into).collect(),
        }
    }
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.queue.push_back(line.into());
    }
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
impl LineSource for ManualSource {
    fn poll_line(&mut self, _timeout: Duration) -> Option<String> {
        self.queue.pop_front()
    }
}
/// Collects every line that is ready right now.
pub struct StreamReader<S: LineSource> {
    source: S,
    poll_timeout: Duration,
}
impl<S: LineSource> StreamReader<S> {
    pub fn new(source: S, poll_timeout: Duration) -> Self {
        Self {
            source,
            poll_timeout,
        }
    }
    /// Returns as soon as a poll comes back empty; never waits longer than
    /// one `poll_timeout` per collected line plus one.
    pub fn drain(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.source.poll_line(self.poll_timeout) {
            lines.push(line.trim_end_matches(['\r', '\n']).to_owned());
        }
        lines
    }
    pub fn source(&self) -> &S {
        &self.source
    }
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
