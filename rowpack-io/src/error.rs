//! Error types for the transport pipeline

use thiserror::Error;

type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Pipeline error types
///
/// Every failure is wrapped with the phase it occurred in; the original
/// cause stays reachable through `source()` for diagnostics.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Packing, JSON encoding, or gzip compression failed.
    #[error("compression failed: {0}")]
    Compress(#[source] Cause),
    /// Gzip decompression, JSON decoding, or unpacking failed.
    #[error("decompression failed: {0}")]
    Decompress(#[source] Cause),
}

impl PipelineError {
    pub(crate) fn compress<E: Into<Cause>>(cause: E) -> Self {
        Self::Compress(cause.into())
    }

    pub(crate) fn decompress<E: Into<Cause>>(cause: E) -> Self {
        Self::Decompress(cause.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PipelineError>;
