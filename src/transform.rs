//! Column-wise transformations: mean-centering and min-max scaling

use ndarray::ArrayView1;

use crate::data::Table;
use crate::error::ValidationError;

/// Per-column summary statistics, computed once and reused.
#[derive(Debug, Clone, Copy)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Compute min, max and mean of a column in one pass.
pub fn column_stats(column: ArrayView1<'_, f64>) -> ColumnStats {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in column.iter() {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    ColumnStats {
        min,
        max,
        mean: sum / column.len() as f64,
    }
}

/// Subtract each column's arithmetic mean from every value in it.
///
/// Infallible: every column has at least one value by construction.
pub fn center(table: &Table) -> Table {
    let mut values = table.values().clone();
    for mut column in values.columns_mut() {
        let stats = column_stats(column.view());
        column.mapv_inplace(|v| v - stats.mean);
    }
    table.with_values(values)
}

/// Linearly remap each column's range onto `[new_min, new_max]`.
///
/// A degenerate column (max == min) maps to `new_min` everywhere, which
/// avoids the divide-by-zero in the remap formula.
///
/// # Arguments
/// * `new_min` - target minimum, must be strictly below `new_max`
/// * `new_max` - target maximum
pub fn scale(table: &Table, new_min: f64, new_max: f64) -> Result<Table, ValidationError> {
    if new_min >= new_max {
        return Err(ValidationError::InvalidRange {
            min: new_min,
            max: new_max,
        });
    }

    let mut values = table.values().clone();
    for mut column in values.columns_mut() {
        let stats = column_stats(column.view());
        let span = stats.max - stats.min;
        if span == 0.0 {
            column.fill(new_min);
        } else {
            column.mapv_inplace(|v| (v - stats.min) / span * (new_max - new_min) + new_min);
        }
    }
    Ok(table.with_values(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_table;

    const TOL: f64 = 1e-9;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_column_stats() {
        let table = build_table(&strings(&["X"]), &strings(&["2 8 5"])).unwrap();
        let stats = column_stats(table.values().column(0));
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 8.0);
        assert!((stats.mean - 5.0).abs() < TOL);
    }

    #[test]
    fn test_center_known_values() {
        let table = build_table(&strings(&["X", "Y"]), &strings(&["1 2 3", "4 5 6"])).unwrap();
        let centered = center(&table);
        let expected = [[-1.0, -1.0], [0.0, 0.0], [1.0, 1.0]];
        for i in 0..3 {
            for j in 0..2 {
                assert!((centered.values()[[i, j]] - expected[i][j]).abs() < TOL);
            }
        }
    }

    #[test]
    fn test_center_columns_have_zero_mean() {
        let table = build_table(
            &strings(&["A", "B", "C"]),
            &strings(&["3.5 -1 0 12", "100 200 300 400", "7 7 7 7"]),
        )
        .unwrap();
        let centered = center(&table);
        for column in centered.values().columns() {
            let stats = column_stats(column);
            assert!(stats.mean.abs() < TOL);
        }
    }

    #[test]
    fn test_scale_known_values() {
        let table = build_table(&strings(&["X"]), &strings(&["0,5,10"])).unwrap();
        let scaled = scale(&table, 0.0, 1.0).unwrap();
        let expected = [0.0, 0.5, 1.0];
        for (i, &e) in expected.iter().enumerate() {
            assert!((scaled.values()[[i, 0]] - e).abs() < TOL);
        }
    }

    #[test]
    fn test_scale_hits_target_range() {
        let table = build_table(&strings(&["X", "Y"]), &strings(&["-3 4 9", "2 2.5 8"])).unwrap();
        let scaled = scale(&table, -1.0, 2.0).unwrap();
        for column in scaled.values().columns() {
            let stats = column_stats(column);
            assert!((stats.min + 1.0).abs() < TOL);
            assert!((stats.max - 2.0).abs() < TOL);
        }
    }

    #[test]
    fn test_scale_degenerate_column_maps_to_new_min() {
        let table = build_table(&strings(&["K", "X"]), &strings(&["7 7 7", "1 2 3"])).unwrap();
        let scaled = scale(&table, 0.25, 0.75).unwrap();
        for i in 0..3 {
            assert!((scaled.values()[[i, 0]] - 0.25).abs() < TOL);
        }
        assert!((scaled.values()[[2, 1]] - 0.75).abs() < TOL);
    }

    #[test]
    fn test_scale_invalid_range() {
        let table = build_table(&strings(&["X"]), &strings(&["1 2"])).unwrap();
        let err = scale(&table, 1.0, 1.0).unwrap_err();
        assert_eq!(err, ValidationError::InvalidRange { min: 1.0, max: 1.0 });
        let err = scale(&table, 2.0, -2.0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidRange {
                min: 2.0,
                max: -2.0
            }
        );
    }
}
