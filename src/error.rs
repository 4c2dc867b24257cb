use std::io;
use std::time::Duration;

use thiserror::Error;

/// Failures raised by a single probe: either the external command could not
/// be executed, or its output did not contain the expected data.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to launch {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("i/o error while waiting for {command}: {source}")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{command} exited with status {code:?}")]
    Exit { command: String, code: Option<i32> },

    #[error("{command} did not finish within {limit:?}")]
    Timeout { command: String, limit: Duration },

    #[error("{command} produced no output")]
    NoOutput { command: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{fact} not found in {command} output")]
    MissingFact {
        command: &'static str,
        fact: &'static str,
    },

    #[error("{command} reported {fact} = {value:?}, which is not usable")]
    BadValue {
        command: &'static str,
        fact: &'static str,
        value: String,
    },
}

impl ProbeError {
    /// True when the command ran but the expected data was not in its
    /// output, as opposed to the command itself failing.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            ProbeError::MissingFact { .. } | ProbeError::BadValue { .. }
        )
    }
}

/// A facet probe failed while composing an inventory snapshot. No snapshot
/// is produced; the facet name tells the caller what was missing.
#[derive(Error, Debug)]
#[error("inventory assembly failed: {facet} probe failed: {source}")]
pub struct AssemblyError {
    pub facet: &'static str,
    #[source]
    pub source: ProbeError,
}

impl AssemblyError {
    pub fn new(facet: &'static str, source: ProbeError) -> Self {
        Self { facet, source }
    }
}

/// Delivery failures from a publisher.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("store returned HTTP {status} for {url}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to render payload: {0}")]
    Render(#[from] serde_json::Error),
}
