//! rowpack codec - Columnar packing for homogeneous JSON record arrays
//!
//! This crate provides the core transform with no I/O dependencies:
//!
//! - Recursive pack/unpack between record arrays and their flat columnar form
//! - Schema paths for applying the transform at addressed locations inside a
//!   nested document
//! - A byte-size helper for measuring transport representations
//!
//! The packed layout is a plain JSON array: a header cell holding the key
//! count, the shared key list once, then every record's values row-major.
//! `[{"id":1,"name":"a"},{"id":2,"name":"b"}]` packs to
//! `[2,"id","name",1,"a",2,"b"]`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod pack;
pub mod schema;
pub mod size;

// Re-export commonly used types
pub use error::{PackError, Result};
pub use pack::{pack, unpack};
pub use schema::{pack_with, unpack_with, Schema, SchemaPath};
pub use size::ByteSize;
