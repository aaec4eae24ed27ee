use std::fmt;

/// Which of the child's two output streams a piece of state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Stdout => "stdout",
            StreamKind::Stderr => "stderr",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the binary front end sends the child's output.
///
/// - `File`: create/truncate a file and append every chunk to it.
/// - `Stdout`: relay live to our own stdout (verbose runs).
/// - `Discard`: drop the bytes; the error message repeats stderr instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    File(String),
    Stdout,
    Discard,
}

impl SinkTarget {
    /// Pick the sink for a run: an explicit output path always wins,
    /// otherwise verbose runs stream to stdout and quiet runs discard.
    pub fn resolve(output: Option<&str>, verbose: bool) -> Self {
        match output {
            Some(path) => SinkTarget::File(path.to_string()),
            None if verbose => SinkTarget::Stdout,
            None => SinkTarget::Discard,
        }
    }
}
