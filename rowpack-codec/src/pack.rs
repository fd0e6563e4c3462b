//! Recursive columnar pack/unpack transform
//!
//! An array of same-shaped records is flattened into a single positional
//! array: a header cell with the key count, the shared key list once, then
//! every record's values in row-major order. `unpack` is the exact inverse.
//!
//! Homogeneity is a checked precondition: every record must carry the first
//! record's keys in the first record's order. Violations fail with
//! [`PackError::HeterogeneousRecords`] rather than producing silently
//! misaligned output.

use crate::error::{PackError, Result};
use serde_json::{Map, Value};

/// Pack a value into its columnar form.
///
/// Arrays columnar-pack as a whole; plain objects have their array-valued
/// members columnar-packed in place; scalars and `null` pass through.
///
/// ```
/// use serde_json::json;
///
/// let records = json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]);
/// let packed = rowpack_codec::pack(records).unwrap();
/// assert_eq!(packed, json!([2, "id", "name", 1, "a", 2, "b"]));
/// ```
pub fn pack(value: Value) -> Result<Value> {
    match value {
        Value::Array(records) => pack_records(records),
        Value::Object(map) => pack_object(map),
        scalar => Ok(scalar),
    }
}

/// Unpack a columnar value back into its record form.
///
/// Exact inverse of [`pack`]. Malformed packed arrays (non-integer header,
/// non-string key cells, value cells that do not divide into whole rows)
/// fail with a descriptive error.
pub fn unpack(value: Value) -> Result<Value> {
    match value {
        Value::Array(packed) => unpack_records(packed),
        Value::Object(map) => unpack_object(map),
        scalar => Ok(scalar),
    }
}

fn pack_records(records: Vec<Value>) -> Result<Value> {
    let keys: Vec<String> = match records.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        Some(_) => return Err(PackError::NotARecord(0)),
        None => Vec::new(),
    };

    let mut packed = Vec::with_capacity(1 + keys.len() + records.len() * keys.len());
    packed.push(Value::from(keys.len()));
    packed.extend(keys.iter().cloned().map(Value::String));

    for (index, record) in records.into_iter().enumerate() {
        let mut record = match record {
            Value::Object(map) => map,
            _ => return Err(PackError::NotARecord(index)),
        };
        check_homogeneous(index, &keys, &record)?;
        for key in &keys {
            // present after the homogeneity check
            let cell = record.remove(key).unwrap_or(Value::Null);
            packed.push(pack_cell(cell)?);
        }
    }
    Ok(Value::Array(packed))
}

fn check_homogeneous(index: usize, keys: &[String], record: &Map<String, Value>) -> Result<()> {
    if record.len() == keys.len() && record.keys().zip(keys).all(|(found, expected)| found == expected)
    {
        return Ok(());
    }
    Err(PackError::HeterogeneousRecords {
        index,
        expected: keys.join(", "),
        found: record.keys().cloned().collect::<Vec<_>>().join(", "),
    })
}

/// Pack one value cell of a record.
///
/// Array cells map each member through [`pack`], so member arrays columnar-pack
/// while a plain array of scalars is left untouched. Object cells pack in
/// place.
fn pack_cell(value: Value) -> Result<Value> {
    match value {
        Value::Array(members) => Ok(Value::Array(
            members.into_iter().map(pack).collect::<Result<_>>()?,
        )),
        Value::Object(map) => pack_object(map),
        scalar => Ok(scalar),
    }
}

/// Mirror of [`pack_cell`].
fn unpack_cell(value: Value) -> Result<Value> {
    match value {
        Value::Array(members) => Ok(Value::Array(
            members.into_iter().map(unpack).collect::<Result<_>>()?,
        )),
        Value::Object(map) => unpack_object(map),
        scalar => Ok(scalar),
    }
}

fn pack_object(map: Map<String, Value>) -> Result<Value> {
    let mut out = Map::with_capacity(map.len());
    for (key, member) in map {
        let member = match member {
            Value::Array(_) => pack(member)?,
            other => other,
        };
        out.insert(key, member);
    }
    Ok(Value::Object(out))
}

fn unpack_object(map: Map<String, Value>) -> Result<Value> {
    let mut out = Map::with_capacity(map.len());
    for (key, member) in map {
        let member = match member {
            Value::Array(_) => unpack(member)?,
            other => other,
        };
        out.insert(key, member);
    }
    Ok(Value::Object(out))
}

fn unpack_records(packed: Vec<Value>) -> Result<Value> {
    let header = packed.first().ok_or(PackError::TruncatedPacked {
        expected: 1,
        found: 0,
    })?;
    let declared = header.as_u64().ok_or(PackError::InvalidHeader)?;

    // An empty key set encodes the empty record list; guard it here so the
    // row arithmetic below never divides by zero.
    if declared == 0 {
        return if packed.len() == 1 {
            Ok(Value::Array(Vec::new()))
        } else {
            Err(PackError::MisalignedPacked {
                length: packed.len(),
                key_count: 0,
            })
        };
    }

    // bound the declared key count against the cells actually present before
    // doing any arithmetic with it; a header can claim up to u64::MAX keys
    if declared > packed.len() as u64 - 1 {
        return Err(PackError::TruncatedPacked {
            expected: usize::try_from(declared).map_or(usize::MAX, |count| count.saturating_add(1)),
            found: packed.len(),
        });
    }
    let key_count = declared as usize;

    let length = packed.len();
    let mut cells = packed.into_iter();
    cells.next(); // header

    let mut keys = Vec::with_capacity(key_count);
    for position in 1..=key_count {
        match cells.next() {
            Some(Value::String(key)) => keys.push(key),
            _ => return Err(PackError::InvalidKey(position)),
        }
    }

    if cells.len() % key_count != 0 {
        return Err(PackError::MisalignedPacked { length, key_count });
    }

    let mut records = Vec::with_capacity(cells.len() / key_count);
    while cells.len() != 0 {
        let mut record = Map::with_capacity(key_count);
        for key in &keys {
            let cell = cells.next().unwrap_or(Value::Null);
            record.insert(key.clone(), unpack_cell(cell)?);
        }
        records.push(Value::Object(record));
    }
    Ok(Value::Array(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pack_two_records() {
        let records = json!([
            {"id": 1, "name": "a"},
            {"id": 2, "name": "b"}
        ]);
        let packed = pack(records).unwrap();
        assert_eq!(packed, json!([2, "id", "name", 1, "a", 2, "b"]));
    }

    #[test]
    fn test_unpack_two_records() {
        let packed = json!([2, "id", "name", 1, "a", 2, "b"]);
        let records = unpack(packed).unwrap();
        assert_eq!(
            records,
            json!([
                {"id": 1, "name": "a"},
                {"id": 2, "name": "b"}
            ])
        );
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(pack(json!([])).unwrap(), json!([0]));
        assert_eq!(unpack(json!([0])).unwrap(), json!([]));
    }

    #[test]
    fn test_scalar_passthrough() {
        assert_eq!(pack(json!(42)).unwrap(), json!(42));
        assert_eq!(pack(json!("x")).unwrap(), json!("x"));
        assert_eq!(pack(Value::Null).unwrap(), Value::Null);
        assert_eq!(unpack(json!(42)).unwrap(), json!(42));
    }

    #[test]
    fn test_object_members_packed_in_place() {
        let document = json!({
            "total": 2,
            "items": [{"id": 1}, {"id": 2}]
        });
        let packed = pack(document).unwrap();
        assert_eq!(packed, json!({"total": 2, "items": [1, "id", 1, 2]}));
        let unpacked = unpack(packed).unwrap();
        assert_eq!(
            unpacked,
            json!({"total": 2, "items": [{"id": 1}, {"id": 2}]})
        );
    }

    #[test]
    fn test_scalar_array_cells_left_untouched() {
        let records = json!([
            {"id": 1, "tags": ["a", "b"]},
            {"id": 2, "tags": []}
        ]);
        let packed = pack(records.clone()).unwrap();
        assert_eq!(packed, json!([2, "id", "tags", 1, ["a", "b"], 2, []]));
        assert_eq!(unpack(packed).unwrap(), records);
    }

    #[test]
    fn test_nested_record_array_cells_round_trip() {
        let records = json!([
            {"id": 1, "rows": [[{"x": 1}, {"x": 2}]]},
            {"id": 2, "rows": [[{"x": 3}]]}
        ]);
        let packed = pack(records.clone()).unwrap();
        // member arrays of a cell array columnar-pack
        assert_eq!(
            packed,
            json!([2, "id", "rows", 1, [[1, "x", 1, 2]], 2, [[1, "x", 3]]])
        );
        assert_eq!(unpack(packed).unwrap(), records);
    }

    #[test]
    fn test_object_cells_round_trip() {
        let records = json!([
            {"id": 1, "meta": {"inner": [{"k": "v"}], "plain": true}},
            {"id": 2, "meta": {"inner": [{"k": "w"}], "plain": false}}
        ]);
        let packed = pack(records.clone()).unwrap();
        assert_eq!(unpack(packed).unwrap(), records);
    }

    #[test]
    fn test_object_members_of_array_cells_round_trip() {
        // both directions must descend into object members of array cells
        let records = json!([
            {"id": 1, "batch": [{"inner": [{"k": 1}]}]}
        ]);
        let packed = pack(records.clone()).unwrap();
        assert_eq!(packed, json!([2, "id", "batch", 1, [{"inner": [1, "k", 1]}]]));
        assert_eq!(unpack(packed).unwrap(), records);
    }

    #[test]
    fn test_heterogeneous_extra_key() {
        let records = json!([
            {"id": 1},
            {"id": 2, "name": "b"}
        ]);
        let err = pack(records).unwrap_err();
        assert!(matches!(
            err,
            PackError::HeterogeneousRecords { index: 1, .. }
        ));
    }

    #[test]
    fn test_heterogeneous_reordered_keys() {
        let records = json!([
            {"id": 1, "name": "a"},
            {"name": "b", "id": 2}
        ]);
        let err = pack(records).unwrap_err();
        assert!(matches!(
            err,
            PackError::HeterogeneousRecords { index: 1, .. }
        ));
    }

    #[test]
    fn test_non_record_element() {
        assert!(matches!(
            pack(json!([1, 2, 3])).unwrap_err(),
            PackError::NotARecord(0)
        ));
        assert!(matches!(
            pack(json!([{"id": 1}, 2])).unwrap_err(),
            PackError::NotARecord(1)
        ));
    }

    #[test]
    fn test_unpack_invalid_header() {
        assert!(matches!(
            unpack(json!(["two", "id"])).unwrap_err(),
            PackError::InvalidHeader
        ));
        assert!(matches!(
            unpack(json!([-1])).unwrap_err(),
            PackError::InvalidHeader
        ));
    }

    #[test]
    fn test_unpack_invalid_key() {
        assert!(matches!(
            unpack(json!([2, "id", 7, 1, "a"])).unwrap_err(),
            PackError::InvalidKey(2)
        ));
    }

    #[test]
    fn test_unpack_misaligned_rows() {
        assert!(matches!(
            unpack(json!([2, "id", "name", 1])).unwrap_err(),
            PackError::MisalignedPacked {
                length: 4,
                key_count: 2
            }
        ));
    }

    #[test]
    fn test_unpack_huge_header() {
        // a header claiming u64::MAX keys must error, not overflow
        assert!(matches!(
            unpack(json!([u64::MAX])).unwrap_err(),
            PackError::TruncatedPacked { .. }
        ));
        assert!(matches!(
            unpack(json!([8, "a", "b"])).unwrap_err(),
            PackError::TruncatedPacked {
                expected: 9,
                found: 3
            }
        ));
    }

    #[test]
    fn test_unpack_truncated() {
        assert!(matches!(
            unpack(json!([3, "id"])).unwrap_err(),
            PackError::TruncatedPacked {
                expected: 4,
                found: 2
            }
        ));
    }

    #[test]
    fn test_null_cells_round_trip() {
        let records = json!([
            {"id": 1, "note": null},
            {"id": 2, "note": "x"}
        ]);
        let packed = pack(records.clone()).unwrap();
        assert_eq!(packed, json!([2, "id", "note", 1, null, 2, "x"]));
        assert_eq!(unpack(packed).unwrap(), records);
    }
}
