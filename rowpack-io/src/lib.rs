//! rowpack I/O - Transport pipeline for packed record arrays
//!
//! This crate layers JSON text encoding and gzip byte compression on top of
//! the columnar codec:
//!
//! - Pure `gzip`/`gunzip` byte helpers
//! - A `Pipeline` composing pack -> JSON-encode -> gzip with its inverse
//! - Pluggable JSON text codecs
//!
//! The compressed payload is the raw gzip stream of the packed value's JSON
//! text; there is no extra framing.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod gzip;
pub mod pipeline;

// Re-export commonly used types
pub use error::{PipelineError, Result};
pub use gzip::{gunzip, gzip, gzip_with};
pub use pipeline::{JsonCodec, JsonText, JsonTextPretty, Pipeline};

// The codec surface, so pipeline callers need only this crate
pub use flate2::Compression;
pub use rowpack_codec::{
    pack, pack_with, unpack, unpack_with, ByteSize, PackError, Schema, SchemaPath,
};
