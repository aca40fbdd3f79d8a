use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to serialize structured export: {source}")]
    SerializeStructured {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to parse structured export: {source}")]
    ParseStructured {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write export '{path}': {source}")]
    WriteExport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
