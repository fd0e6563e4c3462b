//! Text + compression pipeline over the columnar transform
//!
//! `stringify` composes pack with JSON encoding; `compress` continues into
//! gzip. `parse` and `decompress` are the inverses. JSON encoding is a
//! pluggable codec value on the pipeline rather than a process-wide default.

use crate::error::{PipelineError, Result};
use crate::gzip::{gunzip, gzip_with};
use flate2::Compression;
use rowpack_codec::{pack, pack_with, unpack, unpack_with, Schema};
use serde_json::Value;

/// JSON text codec hooks used by the [`Pipeline`].
///
/// Implement this to splice custom encode/decode behavior into the pipeline
/// (the explicit replacement for overridable module-level parser defaults).
pub trait JsonCodec {
    /// Encode a value to JSON text.
    fn encode(&self, value: &Value) -> serde_json::Result<String>;
    /// Decode JSON text to a value.
    fn decode(&self, text: &str) -> serde_json::Result<Value>;
}

/// Compact JSON text, the default codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonText;

impl JsonCodec for JsonText {
    fn encode(&self, value: &Value) -> serde_json::Result<String> {
        serde_json::to_string(value)
    }

    fn decode(&self, text: &str) -> serde_json::Result<Value> {
        serde_json::from_str(text)
    }
}

/// Pretty-printed JSON text, for payloads meant to be read by people.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTextPretty;

impl JsonCodec for JsonTextPretty {
    fn encode(&self, value: &Value) -> serde_json::Result<String> {
        serde_json::to_string_pretty(value)
    }

    fn decode(&self, text: &str) -> serde_json::Result<Value> {
        serde_json::from_str(text)
    }
}

/// The transport pipeline: pack -> JSON text -> gzip, and back.
///
/// ```
/// use rowpack_io::Pipeline;
/// use serde_json::json;
///
/// let pipeline = Pipeline::new();
/// let records = json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]);
/// let payload = pipeline.compress(records.clone(), None).unwrap();
/// assert_eq!(pipeline.decompress(&payload, None).unwrap(), records);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline<C = JsonText> {
    codec: C,
    level: Compression,
}

impl Pipeline<JsonText> {
    /// Pipeline with compact JSON text and the default gzip level.
    pub fn new() -> Self {
        Self {
            codec: JsonText,
            level: Compression::default(),
        }
    }
}

impl Default for Pipeline<JsonText> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: JsonCodec> Pipeline<C> {
    /// Pipeline with a custom JSON codec.
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            level: Compression::default(),
        }
    }

    /// Set the gzip level used by [`Pipeline::compress`].
    pub fn level(mut self, level: Compression) -> Self {
        self.level = level;
        self
    }

    /// Pack `records` (narrowed by `schema` when given) and encode the
    /// result as JSON text.
    pub fn stringify(&self, records: Value, schema: Option<&Schema>) -> Result<String> {
        let packed = apply_pack(records, schema).map_err(PipelineError::compress)?;
        self.codec.encode(&packed).map_err(PipelineError::compress)
    }

    /// Decode JSON text and unpack the result. Inverse of
    /// [`Pipeline::stringify`] under the same schema.
    pub fn parse(&self, text: &str, schema: Option<&Schema>) -> Result<Value> {
        let packed = self.codec.decode(text).map_err(PipelineError::decompress)?;
        apply_unpack(packed, schema).map_err(PipelineError::decompress)
    }

    /// Full transport encoding: gzip over the UTF-8 bytes of
    /// [`Pipeline::stringify`]'s output.
    pub fn compress(&self, records: Value, schema: Option<&Schema>) -> Result<Vec<u8>> {
        let text = self.stringify(records, schema)?;
        gzip_with(text.as_bytes(), self.level).map_err(PipelineError::compress)
    }

    /// Full transport decoding. Inverse of [`Pipeline::compress`] under the
    /// same schema.
    pub fn decompress(&self, bytes: &[u8], schema: Option<&Schema>) -> Result<Value> {
        let bytes = gunzip(bytes).map_err(PipelineError::decompress)?;
        let text = String::from_utf8(bytes).map_err(PipelineError::decompress)?;
        self.parse(&text, schema)
    }
}

fn apply_pack(value: Value, schema: Option<&Schema>) -> rowpack_codec::Result<Value> {
    match schema {
        Some(schema) => pack_with(value, schema),
        None => pack(value),
    }
}

fn apply_unpack(value: Value, schema: Option<&Schema>) -> rowpack_codec::Result<Value> {
    match schema {
        Some(schema) => unpack_with(value, schema),
        None => unpack(value),
    }
}
