//! Error types for the rowpack codec

use thiserror::Error;

/// rowpack codec error types
#[derive(Debug, Error)]
pub enum PackError {
    /// An array element sits where a record object is required.
    #[error("array element at index {0} is not a record object")]
    NotARecord(usize),
    /// A record's key sequence differs from the first record's.
    #[error("record at index {index} does not match the first record's keys (expected [{expected}], found [{found}])")]
    HeterogeneousRecords {
        /// Index of the offending record in the input array.
        index: usize,
        /// Key sequence taken from the first record.
        expected: String,
        /// Key sequence found on the offending record.
        found: String,
    },
    /// Packed array header cell is not a non-negative integer.
    #[error("packed array header is not a non-negative integer")]
    InvalidHeader,
    /// Packed array key cell is not a string.
    #[error("packed array key at position {0} is not a string")]
    InvalidKey(usize),
    /// Packed array ends before the declared key list.
    #[error("packed array too short: expected at least {expected} cells, found {found}")]
    TruncatedPacked {
        /// Minimum cell count implied by the header.
        expected: usize,
        /// Cell count actually present.
        found: usize,
    },
    /// Packed array value cells do not divide into whole rows.
    #[error("packed array of {length} cells does not divide into rows of {key_count} keys")]
    MisalignedPacked {
        /// Total cell count of the packed array.
        length: usize,
        /// Key count declared by the header.
        key_count: usize,
    },
    /// Schema path string is empty or contains an empty segment.
    #[error("invalid schema path `{0}`")]
    InvalidSchemaPath(String),
    /// Schema holds no paths at all.
    #[error("schema must contain at least one path")]
    EmptySchema,
    /// Schema path segment names a property that does not exist.
    #[error("schema path `{path}`: segment `{segment}` not found")]
    PathNotFound {
        /// The full dot-path being walked.
        path: String,
        /// The segment that failed to resolve.
        segment: String,
    },
    /// Schema path segment resolved to a value that cannot be walked or packed.
    #[error("schema path `{path}`: segment `{segment}` did not resolve to an array")]
    PathNotArray {
        /// The full dot-path being walked.
        path: String,
        /// The segment that resolved to the wrong shape.
        segment: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PackError>;
