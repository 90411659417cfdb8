//! JSON decoding for chart input.

use super::dataset::DataPoint;
use super::named::Record;
use crate::error::{ChartError, ChartResult};
use serde_json::Value;

fn coordinate(value: &Value) -> Option<u32> {
    let n = value.as_f64()?;
    (n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64).then_some(n as u32)
}

/// Decode `[[row, col, value], ...]` or `[[row, col, value, time], ...]`.
///
/// Any tuple of another arity, a negative or fractional coordinate, or a
/// non-numeric value rejects the whole payload.
pub fn decode_tuples(json: &str) -> ChartResult<Vec<DataPoint>> {
    let tuples: Vec<Vec<Value>> = serde_json::from_str(json)?;
    if tuples.is_empty() {
        return Err(ChartError::EmptyInput { what: "tuples" });
    }

    tuples
        .iter()
        .enumerate()
        .map(|(index, tuple)| {
            let malformed = || ChartError::MalformedTuple {
                index,
                arity: tuple.len(),
            };
            if !(3..=4).contains(&tuple.len()) {
                tracing::warn!("Tuple {} has {} elements", index, tuple.len());
                return Err(malformed());
            }

            let row = coordinate(&tuple[0]).ok_or_else(malformed)?;
            let col = coordinate(&tuple[1]).ok_or_else(malformed)?;
            let value = tuple[2].as_f64().ok_or_else(malformed)? as f32;
            let mut point = DataPoint::new(row, col, value);
            if let Some(time) = tuple.get(3) {
                point = point.with_time(time.as_f64().ok_or_else(malformed)? as f32);
            }
            Ok(point)
        })
        .collect()
}

/// Decode an array of objects for named-object loading.
pub fn decode_records(json: &str) -> ChartResult<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    if records.is_empty() {
        return Err(ChartError::EmptyInput { what: "records" });
    }
    Ok(records)
}

/// Decode a `{"category": value, ...}` object, keeping key order.
pub fn decode_categories(json: &str) -> ChartResult<Vec<(String, f32)>> {
    let object: Record = serde_json::from_str(json)?;
    object
        .into_iter()
        .enumerate()
        .map(|(index, (category, value))| {
            let value = value.as_f64().ok_or(ChartError::MissingField {
                field: category.clone(),
                record: index,
            })?;
            Ok((category, value as f32))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_three_and_four_tuples() {
        let points = decode_tuples("[[0, 1, 2.5], [1, 0, 4, 12.0]]").unwrap();
        assert_eq!(points[0], DataPoint::new(0, 1, 2.5));
        assert_eq!(points[1], DataPoint::new(1, 0, 4.0).with_time(12.0));
    }

    #[test]
    fn test_wrong_arity_rejects_payload() {
        let err = decode_tuples("[[0, 1, 2], [0, 1]]").unwrap_err();
        assert!(matches!(err, ChartError::MalformedTuple { index: 1, arity: 2 }));
    }

    #[test]
    fn test_negative_coordinate_is_malformed() {
        assert!(matches!(
            decode_tuples("[[-1, 0, 2]]"),
            Err(ChartError::MalformedTuple { index: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(decode_tuples("[[0, 1,"), Err(ChartError::Json { .. })));
        assert!(matches!(decode_tuples("[]"), Err(ChartError::EmptyInput { .. })));
    }

    #[test]
    fn test_decode_categories_keeps_order() {
        let values = decode_categories(r#"{"zeta": 3, "alpha": 1.5}"#).unwrap();
        assert_eq!(values, vec![("zeta".to_string(), 3.0), ("alpha".to_string(), 1.5)]);
    }

    #[test]
    fn test_decode_records() {
        let records = decode_records(r#"[{"Row": 1, "Col": "a", "Value": 2}]"#).unwrap();
        assert_eq!(records[0].get("Col").and_then(Value::as_str), Some("a"));
    }
}
