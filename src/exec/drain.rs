// src/exec/drain.rs

//! Drain tasks: one per child output stream.
//!
//! A drain reads its pipe until EOF, relaying each chunk to the shared sink
//! and appending it to a private accumulator. If the sink fails, the drain
//! stops relaying but keeps reading, so the child can never block on a pipe
//! nobody empties. The first error is kept and reported once the pipe closes.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, trace, warn};

use crate::errors::ExecError;
use crate::exec::sink::SharedSink;
use crate::types::StreamKind;

const CHUNK_SIZE: usize = 8 * 1024;

/// What a finished drain hands back to the runner.
#[derive(Debug)]
pub struct DrainOutcome {
    pub stream: StreamKind,
    pub captured: Vec<u8>,
    pub error: Option<io::Error>,
}

impl DrainOutcome {
    /// The captured bytes, or the first local I/O error seen while draining.
    pub fn into_result(self) -> Result<Vec<u8>, ExecError> {
        match self.error {
            None => Ok(self.captured),
            Some(source) => Err(ExecError::Stream {
                stream: self.stream,
                source,
            }),
        }
    }
}

/// Spawn a drain as its own Tokio task.
pub fn spawn_drain<R>(stream: StreamKind, reader: R, sink: SharedSink) -> JoinHandle<DrainOutcome>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(drain(stream, reader, sink))
}

/// Read `reader` to EOF, teeing every chunk into `sink` and the accumulator.
pub async fn drain<R>(stream: StreamKind, mut reader: R, sink: SharedSink) -> DrainOutcome
where
    R: AsyncRead + Unpin,
{
    let mut captured = Vec::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut error: Option<io::Error> = None;

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(%stream, error = %e, "reading child output failed");
                if error.is_none() {
                    error = Some(e);
                }
                break;
            }
        };

        let chunk = &buf[..n];
        trace!(%stream, bytes = n, "relaying chunk");

        if error.is_none() {
            if let Err(e) = sink.write_chunk(chunk).await {
                warn!(
                    %stream,
                    error = %e,
                    "sink write failed; draining the rest without relaying"
                );
                error = Some(e);
            }
        }

        captured.extend_from_slice(chunk);
    }

    debug!(%stream, bytes = captured.len(), failed = error.is_some(), "stream drained");

    DrainOutcome {
        stream,
        captured,
        error,
    }
}

/// Turn a joined drain task into the runner's view of it.
///
/// A drain task that panicked is reported as a stream failure on its stream.
pub fn settle(
    stream: StreamKind,
    joined: Result<DrainOutcome, JoinError>,
) -> Result<Vec<u8>, ExecError> {
    match joined {
        Ok(outcome) => outcome.into_result(),
        Err(e) => Err(ExecError::Stream {
            stream,
            source: io::Error::other(e),
        }),
    }
}
