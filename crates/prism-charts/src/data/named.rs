//! Record-oriented input with configurable field names.
//!
//! Records carry no row or column numbering of their own. The distinct
//! values of the X and Y fields are collected, sorted and given dense
//! indices, and those indices become the grid coordinates.

use super::dataset::{ChartDataset, DataPoint};
use crate::error::{ChartError, ChartResult};
use prism_core::alloc::{HashMap, OrderedMap, ordered_map};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// One input record: field name to JSON value.
pub type Record = serde_json::Map<String, Value>;

/// Field names used to read records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyMapping {
    pub time: String,
    pub x: String,
    pub y: String,
    pub z: String,
    pub category: String,
    pub value: String,
}

impl Default for PropertyMapping {
    fn default() -> Self {
        Self {
            time: "Time".to_string(),
            x: "Row".to_string(),
            y: "Col".to_string(),
            z: "Value".to_string(),
            category: "Category".to_string(),
            value: "Value".to_string(),
        }
    }
}

impl PropertyMapping {
    pub fn with_axes(
        mut self,
        x: impl Into<String>,
        y: impl Into<String>,
        z: impl Into<String>,
    ) -> Self {
        self.x = x.into();
        self.y = y.into();
        self.z = z.into();
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>, value: impl Into<String>) -> Self {
        self.category = category.into();
        self.value = value.into();
        self
    }
}

/// Sorted distinct values of the X and Y fields, in index order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisCategories {
    /// Row titles (distinct X field values).
    pub rows: Vec<String>,
    /// Column titles (distinct Y field values).
    pub cols: Vec<String>,
}

/// Text key of a scalar JSON value. Null and containers have no key.
fn key_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numeric reading of a JSON value; numeric strings count.
fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn field<'a>(record: &'a Record, name: &str, index: usize) -> ChartResult<&'a Value> {
    match record.get(name) {
        Some(Value::Null) | None => Err(ChartError::MissingField {
            field: name.to_string(),
            record: index,
        }),
        Some(value) => Ok(value),
    }
}

/// Sort distinct keys numerically if every key parses as a number,
/// lexicographically otherwise.
fn sort_distinct(keys: &mut [String]) {
    let numeric: Option<Vec<f64>> = keys.iter().map(|k| k.trim().parse().ok()).collect();
    match numeric {
        Some(_) => keys.sort_by(|a, b| {
            let a: f64 = a.trim().parse().unwrap_or(0.0);
            let b: f64 = b.trim().parse().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }),
        None => keys.sort(),
    }
}

fn distinct_index(
    records: &[Record],
    name: &str,
) -> ChartResult<(Vec<String>, HashMap<String, u32>)> {
    let mut seen: OrderedMap<String, ()> = ordered_map();
    for (i, record) in records.iter().enumerate() {
        let value = field(record, name, i)?;
        let key = key_of(value).ok_or_else(|| ChartError::MissingField {
            field: name.to_string(),
            record: i,
        })?;
        seen.insert(key, ());
    }

    let mut keys: Vec<String> = seen.into_keys().collect();
    sort_distinct(&mut keys);
    let index = keys
        .iter()
        .enumerate()
        .map(|(i, k)| (k.clone(), i as u32))
        .collect();
    Ok((keys, index))
}

/// Convert records to grid points, synthesizing row and column indices.
///
/// Fails without producing points if any record lacks the X, Y or Z field
/// or has a non-numeric Z.
pub fn named_objects_to_points(
    records: &[Record],
    mapping: &PropertyMapping,
) -> ChartResult<(Vec<DataPoint>, AxisCategories)> {
    if records.is_empty() {
        return Err(ChartError::EmptyInput { what: "records" });
    }

    let (row_keys, row_index) = distinct_index(records, &mapping.x)?;
    let (col_keys, col_index) = distinct_index(records, &mapping.y)?;

    let mut points = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let missing = |field: &str| ChartError::MissingField {
            field: field.to_string(),
            record: i,
        };

        let row = key_of(field(record, &mapping.x, i)?)
            .and_then(|k| row_index.get(&k).copied())
            .ok_or_else(|| missing(&mapping.x))?;
        let col = key_of(field(record, &mapping.y, i)?)
            .and_then(|k| col_index.get(&k).copied())
            .ok_or_else(|| missing(&mapping.y))?;
        let value = number_of(field(record, &mapping.z, i)?).ok_or_else(|| missing(&mapping.z))?;

        let mut point = DataPoint::new(row, col, value as f32);
        if let Some(time) = record.get(&mapping.time).and_then(number_of) {
            point = point.with_time(time as f32);
        }
        points.push(point);
    }

    Ok((
        points,
        AxisCategories {
            rows: row_keys,
            cols: col_keys,
        },
    ))
}

/// Sum the category/value fields of records, keeping first-seen order.
pub fn named_objects_to_categories(
    records: &[Record],
    mapping: &PropertyMapping,
) -> ChartResult<Vec<(String, f32)>> {
    if records.is_empty() {
        return Err(ChartError::EmptyInput { what: "records" });
    }

    let mut totals: OrderedMap<String, f32> = ordered_map();
    for (i, record) in records.iter().enumerate() {
        let category = key_of(field(record, &mapping.category, i)?).ok_or_else(|| {
            ChartError::MissingField {
                field: mapping.category.clone(),
                record: i,
            }
        })?;
        let value = number_of(field(record, &mapping.value, i)?).ok_or_else(|| {
            ChartError::MissingField {
                field: mapping.value.clone(),
                record: i,
            }
        })?;
        *totals.entry(category).or_insert(0.0) += value as f32;
    }
    Ok(totals.into_iter().collect())
}

impl ChartDataset {
    /// Load record-oriented input through a property mapping.
    ///
    /// Returns the sorted axis categories the synthesized indices refer to.
    pub fn load_named_objects(
        &mut self,
        records: &[Record],
        mapping: &PropertyMapping,
    ) -> ChartResult<AxisCategories> {
        let (points, categories) = named_objects_to_points(records, mapping).inspect_err(|e| {
            tracing::warn!("Named object load rejected: {}", e);
        })?;
        self.load(&points)?;
        Ok(categories)
    }
}
