//! In-memory tabular data and its conversion to chart input.

use super::dataset::DataPoint;
use crate::error::{ChartError, ChartResult};
use prism_core::alloc::{OrderedMap, ordered_map};

/// Text table with named columns, as produced by a CSV or sheet reader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub column_names: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(column_names: Vec<String>) -> Self {
        Self {
            column_names,
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn column_index(&self, name: &str) -> ChartResult<usize> {
        self.column_names
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| ChartError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Grid points from three columns: `(row = y, col = x, value = z)`.
    ///
    /// Cell text is parsed as an integer; unparsable cells read as 0. Rows
    /// too short to hold every needed column are skipped.
    pub fn to_grid_points(&self, x_col: &str, y_col: &str, z_col: &str) -> ChartResult<Vec<DataPoint>> {
        let x = self.column_index(x_col)?;
        let y = self.column_index(y_col)?;
        let z = self.column_index(z_col)?;
        let needed = x.max(y).max(z);

        let parse = |text: &str| -> i64 { text.trim().parse().unwrap_or(0) };

        let points = self
            .rows
            .iter()
            .filter(|row| row.len() > needed)
            .map(|row| {
                DataPoint::new(
                    parse(&row[y]).max(0) as u32,
                    parse(&row[x]).max(0) as u32,
                    parse(&row[z]) as f32,
                )
            })
            .collect();
        Ok(points)
    }

    /// Category totals from a label column and a value column.
    ///
    /// Duplicate labels are summed; labels keep first-seen order.
    pub fn to_category_values(&self, label_col: &str, value_col: &str) -> ChartResult<Vec<(String, f32)>> {
        let label = self.column_index(label_col)?;
        let value = self.column_index(value_col)?;
        let needed = label.max(value);

        let mut totals: OrderedMap<String, f32> = ordered_map();
        for row in self.rows.iter().filter(|row| row.len() > needed) {
            let amount: f32 = row[value].trim().parse().unwrap_or(0.0);
            *totals.entry(row[label].clone()).or_insert(0.0) += amount;
        }
        Ok(totals.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        let mut table = DataTable::new(vec!["X".into(), "Y".into(), "Z".into()]);
        table.push_row(["0", "1", "5"]);
        table.push_row(["2", "0", "abc"]);
        table.push_row(["1"]);
        table
    }

    #[test]
    fn test_grid_points_swap_axes() {
        let points = table().to_grid_points("X", "Y", "Z").unwrap();
        assert_eq!(points, vec![DataPoint::new(1, 0, 5.0), DataPoint::new(0, 2, 0.0)]);
    }

    #[test]
    fn test_missing_column() {
        assert!(matches!(
            table().to_grid_points("X", "Y", "W"),
            Err(ChartError::ColumnNotFound { name }) if name == "W"
        ));
    }

    #[test]
    fn test_category_values_sum_duplicates() {
        let mut table = DataTable::new(vec!["Name".into(), "Amount".into()]);
        table.push_row(["b", "1.5"]);
        table.push_row(["a", "2"]);
        table.push_row(["b", "1"]);
        let values = table.to_category_values("Name", "Amount").unwrap();
        assert_eq!(values, vec![("b".to_string(), 2.5), ("a".to_string(), 2.0)]);
    }
}
