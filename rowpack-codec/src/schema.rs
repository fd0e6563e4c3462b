//! Schema paths for selective packing inside nested documents
//!
//! A schema path is a dot-delimited sequence of property names addressing an
//! array of records somewhere inside a larger document, e.g. `"data.items"`.
//! Applying a schema walks the document and runs the pack or unpack
//! transform only at the addressed locations, leaving sibling members
//! untouched. Paths are parsed up front into segment lists; the walk itself
//! never splits strings.

use crate::error::{PackError, Result};
use crate::pack::{pack, unpack};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A parsed dot-delimited property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPath {
    segments: Vec<String>,
}

impl SchemaPath {
    /// Parse a dot-path such as `"a.b"`.
    ///
    /// Empty paths and empty segments (`"a..b"`, `".a"`) are rejected.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(PackError::InvalidSchemaPath(path.to_string()));
        }
        Ok(Self {
            segments: path.split('.').map(str::to_string).collect(),
        })
    }

    /// The property names this path descends through, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for SchemaPath {
    type Err = PackError;

    fn from_str(path: &str) -> Result<Self> {
        Self::parse(path)
    }
}

/// An ordered list of schema paths, applied independently, left to right.
///
/// Packing and unpacking must use the same schema (same paths, same order)
/// for the operation to be reversible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    paths: Vec<SchemaPath>,
}

impl Schema {
    /// Build a schema from dot-path strings, kept in the given order.
    ///
    /// At least one path is required; a schema with nothing to address would
    /// silently turn the transform into the identity.
    pub fn parse<I, S>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = paths
            .into_iter()
            .map(|path| SchemaPath::parse(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        if paths.is_empty() {
            return Err(PackError::EmptySchema);
        }
        Ok(Self { paths })
    }

    /// The parsed paths, in application order.
    pub fn paths(&self) -> &[SchemaPath] {
        &self.paths
    }
}

impl FromStr for Schema {
    type Err = PackError;

    /// A single dot-path parses as a one-path schema.
    fn from_str(path: &str) -> Result<Self> {
        Ok(Self {
            paths: vec![SchemaPath::parse(path)?],
        })
    }
}

impl From<SchemaPath> for Schema {
    fn from(path: SchemaPath) -> Self {
        Self { paths: vec![path] }
    }
}

/// Pack only the arrays addressed by `schema`, leaving siblings untouched.
///
/// ```
/// use rowpack_codec::Schema;
/// use serde_json::json;
///
/// let schema = Schema::parse(["contents"]).unwrap();
/// let document = json!({"label": "inbox", "contents": [{"id": 1}, {"id": 2}]});
/// let packed = rowpack_codec::pack_with(document, &schema).unwrap();
/// assert_eq!(packed, json!({"label": "inbox", "contents": [1, "id", 1, 2]}));
/// ```
pub fn pack_with(document: Value, schema: &Schema) -> Result<Value> {
    apply(document, schema, pack)
}

/// Inverse of [`pack_with`] under the same schema.
pub fn unpack_with(document: Value, schema: &Schema) -> Result<Value> {
    apply(document, schema, unpack)
}

type Transform = fn(Value) -> Result<Value>;

/// Apply every path of `schema` in order. A non-array document is wrapped
/// into a one-element list for the walk and unwrapped afterwards.
fn apply(document: Value, schema: &Schema, transform: Transform) -> Result<Value> {
    match document {
        Value::Array(items) => Ok(Value::Array(apply_paths(items, schema, transform)?)),
        other => {
            let mut items = apply_paths(vec![other], schema, transform)?;
            Ok(items.pop().unwrap_or(Value::Null))
        }
    }
}

fn apply_paths(mut items: Vec<Value>, schema: &Schema, transform: Transform) -> Result<Vec<Value>> {
    for path in schema.paths() {
        items = items
            .into_iter()
            .map(|item| walk(item, path, path.segments(), transform))
            .collect::<Result<_>>()?;
    }
    Ok(items)
}

/// Descend one path segment at a time. The member at the terminal segment is
/// transformed whole; an array met earlier is mapped element-wise with the
/// remaining suffix; an object met earlier is descended into.
fn walk(item: Value, path: &SchemaPath, segments: &[String], transform: Transform) -> Result<Value> {
    let (segment, rest) = match segments.split_first() {
        Some(split) => split,
        None => return Ok(item),
    };

    let mut map = match item {
        Value::Object(map) => map,
        _ => {
            return Err(PackError::PathNotArray {
                path: path.to_string(),
                segment: segment.clone(),
            })
        }
    };

    // take the member out in place so sibling order is preserved
    let member = match map.get_mut(segment) {
        Some(member) => std::mem::take(member),
        None => {
            return Err(PackError::PathNotFound {
                path: path.to_string(),
                segment: segment.clone(),
            })
        }
    };

    let replaced = match member {
        Value::Array(items) if rest.is_empty() => transform(Value::Array(items))?,
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|element| walk(element, path, rest, transform))
                .collect::<Result<_>>()?,
        ),
        Value::Object(_) if !rest.is_empty() => walk(member, path, rest, transform)?,
        _ => {
            return Err(PackError::PathNotArray {
                path: path.to_string(),
                segment: segment.clone(),
            })
        }
    };

    if let Some(slot) = map.get_mut(segment) {
        *slot = replaced;
    }
    Ok(Value::Object(map))
}
