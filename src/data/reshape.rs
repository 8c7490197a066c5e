//! Long-to-wide reshaping into row × month matrices

use crate::error::{PlotError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Dense matrix indexed by a categorical row key and calendar month.
///
/// Rows are sorted ascending by their key, columns hold every month that
/// appeared in the input in calendar order. A `None` cell renders blank.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthMatrix {
    pub row_labels: Vec<String>,
    pub months: Vec<u32>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl MonthMatrix {
    /// Pivot `(row key, month, value)` triples into a matrix.
    ///
    /// Fails with [`PlotError::DuplicateCell`] when a (row, month) pair
    /// repeats.
    pub fn pivot<K, I>(entries: I) -> Result<Self>
    where
        K: Ord + ToString,
        I: IntoIterator<Item = (K, u32, Option<f64>)>,
    {
        let mut rows: BTreeMap<K, BTreeMap<u32, Option<f64>>> = BTreeMap::new();
        let mut months = BTreeSet::new();

        for (key, month, value) in entries {
            months.insert(month);
            match rows.get_mut(&key) {
                Some(row) => {
                    if row.insert(month, value).is_some() {
                        return Err(PlotError::DuplicateCell {
                            row: key.to_string(),
                            month,
                        });
                    }
                }
                None => {
                    rows.insert(key, BTreeMap::from([(month, value)]));
                }
            }
        }

        let months: Vec<u32> = months.into_iter().collect();
        let (row_labels, cells) = rows
            .into_iter()
            .map(|(key, row)| {
                let cells = months
                    .iter()
                    .map(|m| row.get(m).copied().flatten())
                    .collect();
                (key.to_string(), cells)
            })
            .unzip();

        Ok(Self {
            row_labels,
            months,
            cells,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn n_cols(&self) -> usize {
        self.months.len()
    }

    /// Number of blank cells
    pub fn blank_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_none()).count()
    }

    /// Smallest and largest present value
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Iterate `(row index, column index, value)` over present cells
    pub fn present_cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, v)| v.map(|v| (r, c, v)))
        })
    }
}

#[cfg(test)]
impl MonthMatrix {
    /// Look up a cell by row label and month
    pub fn get(&self, row_label: &str, month: u32) -> Option<f64> {
        let r = self.row_labels.iter().position(|l| l == row_label)?;
        let c = self.months.iter().position(|&m| m == month)?;
        self.cells[r][c]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pivot_sorts_rows_and_months() {
        let matrix = MonthMatrix::pivot(vec![
            ("Chicago", 3, Some(40.0)),
            ("Auckland", 12, Some(70.0)),
            ("Auckland", 3, Some(66.0)),
        ])
        .unwrap();

        assert_eq!(matrix.row_labels, vec!["Auckland", "Chicago"]);
        assert_eq!(matrix.months, vec![3, 12]);
        assert_eq!(matrix.get("Auckland", 12), Some(70.0));
        assert_eq!(matrix.get("Chicago", 12), None);
        assert_eq!(matrix.blank_cells(), 1);
        assert_eq!(matrix.value_range(), Some((40.0, 70.0)));
    }

    #[test]
    fn test_pivot_orders_numeric_keys_numerically() {
        let matrix = MonthMatrix::pivot(vec![(1990, 1, Some(0.4)), (885, 1, Some(-0.2))]).unwrap();
        assert_eq!(matrix.row_labels, vec!["885", "1990"]);
    }

    #[test]
    fn test_pivot_rejects_duplicate_cell() {
        let err = MonthMatrix::pivot(vec![("Auckland", 1, Some(1.0)), ("Auckland", 1, Some(2.0))])
            .unwrap_err();
        assert!(matches!(
            err,
            PlotError::DuplicateCell { ref row, month: 1 } if row == "Auckland"
        ));
    }

    #[test]
    fn test_present_cells_skips_blanks() {
        let matrix = MonthMatrix::pivot(vec![("a", 1, Some(1.0)), ("a", 2, None), ("b", 2, Some(3.0))])
            .unwrap();
        let present: Vec<_> = matrix.present_cells().collect();
        assert_eq!(present, vec![(0, 0, 1.0), (1, 1, 3.0)]);
    }
}
