use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Refresh loop requires a running Tokio runtime: {source}")]
    NoRuntime {
        #[source]
        source: tokio::runtime::TryCurrentError,
    },
    #[error("Failed to set up presenter surface: {source}")]
    SurfaceSetup {
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to draw presenter surface: {source}")]
    SurfaceDraw {
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
