//! Shared test support
//!
//! A scripted transport standing in for a DICT server: replies are queued
//! per command, every write is recorded, and a write issued before the
//! previous reply was fully drained fails the test.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use lexiconn::{DictError, Result, Transport};

#[derive(Debug, Default)]
struct MockInner {
    /// Lines the server currently has in flight, in emission order
    pending: VecDeque<String>,

    /// Scripted replies, consumed one per command write
    replies: VecDeque<Vec<String>>,

    /// Every command line the session wrote
    writes: Vec<String>,

    /// When set, every read fails with this I/O error kind
    read_error: Option<std::io::ErrorKind>,

    /// When set, a write with undrained reply lines is tolerated
    /// (for tests that abort a reply mid-stream and then close)
    allow_desync: bool,

    /// Number of shutdown calls observed
    shutdowns: usize,
}

/// Cloneable handle to a scripted transport; clones share state so tests
/// can inspect traffic after the session has taken ownership.
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockInner>>,
}

impl MockTransport {
    /// A transport whose server has already sent a standard greeting
    pub fn with_greeting() -> Self {
        let mock = Self::default();
        mock.inner
            .lock()
            .pending
            .push_back("220 dict.example.org dictd 1.12 <100@dict.example.org>".to_string());
        mock
    }

    /// A transport with custom greeting lines
    pub fn with_greeting_lines(lines: &[&str]) -> Self {
        let mock = Self::default();
        mock.inner
            .lock()
            .pending
            .extend(lines.iter().map(|l| l.to_string()));
        mock
    }

    /// Queue the reply for the next command write
    pub fn queue_reply(&self, lines: &[&str]) {
        self.inner
            .lock()
            .replies
            .push_back(lines.iter().map(|l| l.to_string()).collect());
    }

    /// Make every subsequent read fail with an I/O error
    pub fn fail_reads(&self) {
        self.inner.lock().read_error = Some(std::io::ErrorKind::ConnectionReset);
    }

    /// Tolerate a command written before the previous reply was drained.
    /// Needed when a test aborts a reply mid-stream and still closes.
    pub fn allow_desync(&self) {
        self.inner.lock().allow_desync = true;
    }

    /// Command lines written so far
    pub fn writes(&self) -> Vec<String> {
        self.inner.lock().writes.clone()
    }

    /// Number of shutdown calls observed
    pub fn shutdown_count(&self) -> usize {
        self.inner.lock().shutdowns
    }
}

impl Transport for MockTransport {
    fn read_line(&mut self) -> Result<String> {
        let mut inner = self.inner.lock();
        if let Some(kind) = inner.read_error {
            return Err(DictError::Io(std::io::Error::new(
                kind,
                "scripted read failure",
            )));
        }
        inner
            .pending
            .pop_front()
            .ok_or_else(|| DictError::Connection("mock reply script exhausted".to_string()))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        assert!(
            inner.pending.is_empty() || inner.allow_desync,
            "command {:?} written before the previous reply was fully drained",
            line
        );
        inner.writes.push(line.to_string());
        if let Some(reply) = inner.replies.pop_front() {
            inner.pending = reply.into();
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.inner.lock().shutdowns += 1;
        Ok(())
    }
}
