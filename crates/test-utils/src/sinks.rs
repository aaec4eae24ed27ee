//! Sinks with test-only behaviour.

use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use compilerun::exec::sink::{OutputSink, SinkFuture};

/// Records every chunk it receives, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    chunks: Mutex<Vec<Vec<u8>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunks(&self) -> Vec<Vec<u8>> {
        self.chunks.lock().unwrap().clone()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.chunks().concat()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    pub fn count_byte(&self, b: u8) -> usize {
        self.bytes().iter().filter(|&&x| x == b).count()
    }
}

impl OutputSink for RecordingSink {
    fn write_chunk<'a>(&'a self, chunk: &'a [u8]) -> SinkFuture<'a> {
        Box::pin(async move {
            self.chunks.lock().unwrap().push(chunk.to_vec());
            Ok(())
        })
    }
}

/// Fails every write with `BrokenPipe`, counting the attempts.
#[derive(Debug, Default)]
pub struct FailingSink {
    attempts: AtomicUsize,
}

impl FailingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl OutputSink for FailingSink {
    fn write_chunk<'a>(&'a self, _chunk: &'a [u8]) -> SinkFuture<'a> {
        Box::pin(async move {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        })
    }
}
