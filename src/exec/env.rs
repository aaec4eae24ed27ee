// src/exec/env.rs

//! Environment handling for compiler processes.
//!
//! The child never inherits our environment implicitly. Instead, an
//! [`AmbientEnv`] snapshot is merged with the invocation's `KEY=VALUE`
//! overrides and the result is handed to the child verbatim. Production code
//! captures the snapshot from the running process; tests inject their own.

use std::ffi::{OsStr, OsString};
use std::io;

/// Snapshot of the environment the child starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientEnv {
    vars: Vec<(OsString, OsString)>,
}

impl AmbientEnv {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os().collect(),
        }
    }

    /// An empty environment; the child sees only the overrides.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn vars(&self) -> &[(OsString, OsString)] {
        &self.vars
    }

    /// Apply `KEY=VALUE` overrides on top of this snapshot.
    ///
    /// Later entries win over earlier ones and over ambient values with the
    /// same key. Position is kept from the first occurrence of a key.
    pub fn merge(&self, overrides: &[String]) -> io::Result<Vec<(OsString, OsString)>> {
        let mut merged = self.vars.clone();

        for entry in overrides {
            let (key, value) = split_override(entry)?;
            let key = OsStr::new(key);

            match merged.iter_mut().find(|(k, _)| same_key(k, key)) {
                Some(slot) => slot.1 = OsString::from(value),
                None => merged.push((key.to_os_string(), OsString::from(value))),
            }
        }

        Ok(merged)
    }
}

/// Split a `KEY=VALUE` override into its parts.
///
/// A leading `=` belongs to the key (Windows keeps per-drive working
/// directories as `=C:=C:\...`), so the separator search starts after it.
/// Entries with no separator or containing NUL bytes cannot be passed to a
/// process and are rejected.
pub fn split_override(entry: &str) -> io::Result<(&str, &str)> {
    if entry.contains('\0') {
        return Err(invalid_override(entry, "contains a NUL byte"));
    }

    let skip = usize::from(entry.starts_with('='));
    match entry[skip..].find('=') {
        Some(idx) => {
            let idx = idx + skip;
            Ok((&entry[..idx], &entry[idx + 1..]))
        }
        None => Err(invalid_override(entry, "expected KEY=VALUE")),
    }
}

fn invalid_override(entry: &str, reason: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid environment override {entry:?}: {reason}"),
    )
}

#[cfg(windows)]
fn same_key(a: &OsStr, b: &OsStr) -> bool {
    a.to_string_lossy()
        .eq_ignore_ascii_case(&b.to_string_lossy())
}

#[cfg(not(windows))]
fn same_key(a: &OsStr, b: &OsStr) -> bool {
    a == b
}
