// src/exec/sink.rs

//! Output sinks shared by the two drain tasks.
//!
//! Both drains hold the same [`SharedSink`] and may call
//! [`OutputSink::write_chunk`] at the same time. The runner adds no locking of
//! its own, so every implementation is responsible for its own
//! synchronisation. A single call is the unit of atomicity: bytes from one
//! chunk are never interleaved with bytes from another.

use std::future::Future;
use std::io;
use std::path::Path;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncWrite, AsyncWriteExt};

pub type SinkFuture<'a> = Pin<Box<dyn Future<Output = io::Result<()>> + Send + 'a>>;

/// Destination for the child's output.
pub trait OutputSink: Send + Sync {
    /// Write one chunk of output in full.
    ///
    /// Must tolerate concurrent callers and must not block indefinitely;
    /// a stalled sink stalls both drains and therefore the whole run.
    fn write_chunk<'a>(&'a self, chunk: &'a [u8]) -> SinkFuture<'a>;
}

pub type SharedSink = Arc<dyn OutputSink>;

/// Sink over any async writer, serialised by an async mutex.
///
/// Every chunk is flushed so a terminal or log file sees output live.
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: tokio::sync::Mutex<W>,
}

impl<W> WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            inner: tokio::sync::Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

impl WriterSink<tokio::fs::File> {
    /// Create (or truncate) a file and write the child's output into it.
    pub async fn create_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = tokio::fs::File::create(path).await?;
        Ok(Self::new(file))
    }
}

impl WriterSink<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> OutputSink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    fn write_chunk<'a>(&'a self, chunk: &'a [u8]) -> SinkFuture<'a> {
        Box::pin(async move {
            let mut writer = self.inner.lock().await;
            writer.write_all(chunk).await?;
            writer.flush().await
        })
    }
}

/// In-memory sink; useful for callers that want the transcript afterwards.
#[derive(Debug, Default)]
pub struct MemorySink {
    buf: Mutex<Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        match self.buf.lock() {
            Ok(buf) => buf.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }
}

impl OutputSink for MemorySink {
    fn write_chunk<'a>(&'a self, chunk: &'a [u8]) -> SinkFuture<'a> {
        Box::pin(async move {
            let mut buf = self
                .buf
                .lock()
                .map_err(|_| io::Error::other("memory sink lock poisoned"))?;
            buf.extend_from_slice(chunk);
            Ok(())
        })
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl OutputSink for DiscardSink {
    fn write_chunk<'a>(&'a self, _chunk: &'a [u8]) -> SinkFuture<'a> {
        Box::pin(async { Ok(()) })
    }
}
