//! UTF-8 byte-size measurement for strings, buffers, and JSON values

use serde_json::Value;

/// UTF-8 byte length of a value's transport representation.
///
/// Strings and byte buffers report their raw length; arrays and objects
/// report the length of their JSON text; everything else (including `null`)
/// reports zero.
pub trait ByteSize {
    /// Number of UTF-8 bytes the value occupies on the wire.
    fn byte_size(&self) -> usize;
}

impl ByteSize for str {
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for String {
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for [u8] {
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for Vec<u8> {
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for Value {
    fn byte_size(&self) -> usize {
        match self {
            Value::String(text) => text.len(),
            Value::Array(_) | Value::Object(_) => serde_json::to_string(self)
                .map(|text| text.len())
                .unwrap_or(0),
            _ => 0,
        }
    }
}
