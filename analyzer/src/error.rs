//! Hard-failure errors for the analysis boundary.
//!
//! Structural problems inside an input are reported as issue values on the
//! analysis result, never as errors. Only conditions that leave nothing to
//! analyze — unreadable input bytes — surface through [`AnalyzeError`].

use thiserror::Error;

/// Errors that abort analysis before any parser runs.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),
    /// Input could not be read.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
