//! Input parsing and table validation

use ndarray::{Array2, ArrayView1};

use crate::error::ValidationError;

/// A validated rectangular numeric table.
///
/// Columns are named variables, rows are data points labeled `Point 1..N`.
/// Every value is finite and every column has the same length by
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    names: Vec<String>,
    /// Shape (n_points, n_vars); row i holds point i across all variables.
    values: Array2<f64>,
    labels: Vec<String>,
}

impl Table {
    pub(crate) fn new(names: Vec<String>, values: Array2<f64>) -> Self {
        let labels = (1..=values.nrows()).map(|i| format!("Point {i}")).collect();
        Self {
            names,
            values,
            labels,
        }
    }

    /// Number of data points (rows).
    pub fn n_points(&self) -> usize {
        self.values.nrows()
    }

    /// Number of variables (columns).
    pub fn n_vars(&self) -> usize {
        self.values.ncols()
    }

    /// Variable names, in input order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Stable row labels (`Point 1`, `Point 2`, ...).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The numeric values, shape (n_points, n_vars).
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Point i as a vector across all variables.
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.values.row(i)
    }

    /// A table of the same shape and names with replacement values.
    pub(crate) fn with_values(&self, values: Array2<f64>) -> Self {
        debug_assert_eq!(values.dim(), self.values.dim());
        Self {
            names: self.names.clone(),
            values,
            labels: self.labels.clone(),
        }
    }
}

/// Parse parallel name/value string pairs into a validated [`Table`].
///
/// Pairs are considered when either side is non-blank after trimming.
/// Value strings split on whitespace and commas; every token must parse as
/// a finite number, and all variables must have the same number of values.
///
/// # Arguments
/// * `columns` - raw variable names, positionally paired with `values`
/// * `values` - raw value strings; missing trailing entries count as blank
pub fn build_table(columns: &[String], values: &[String]) -> Result<Table, ValidationError> {
    let mut names: Vec<String> = Vec::new();
    let mut series: Vec<Vec<f64>> = Vec::new();

    for (i, raw_name) in columns.iter().enumerate() {
        let name = raw_name.trim();
        let raw_values = values.get(i).map(|s| s.trim()).unwrap_or("");

        if name.is_empty() && raw_values.is_empty() {
            continue;
        }
        if name.is_empty() {
            return Err(ValidationError::EmptyVariableName);
        }

        let parsed = parse_values(name, raw_values)?;
        if parsed.is_empty() {
            return Err(ValidationError::EmptyValues {
                variable: name.to_string(),
            });
        }

        if let Some(first) = series.first() {
            if parsed.len() != first.len() {
                return Err(ValidationError::InconsistentLength {
                    variable: name.to_string(),
                    expected: first.len(),
                    found: parsed.len(),
                });
            }
        }
        if names.iter().any(|n| n == name) {
            return Err(ValidationError::DuplicateVariableName {
                variable: name.to_string(),
            });
        }

        names.push(name.to_string());
        series.push(parsed);
    }

    if series.is_empty() {
        return Err(ValidationError::NoData);
    }

    let n_points = series[0].len();
    let n_vars = series.len();
    let mut data = Array2::zeros((n_points, n_vars));
    for (j, column) in series.iter().enumerate() {
        for (i, &v) in column.iter().enumerate() {
            data[[i, j]] = v;
        }
    }

    Ok(Table::new(names, data))
}

/// Tokenize one value string; commas and whitespace both separate tokens.
fn parse_values(name: &str, raw: &str) -> Result<Vec<f64>, ValidationError> {
    let mut parsed = Vec::new();
    for token in raw.replace(',', " ").split_whitespace() {
        let v: f64 = token.parse().map_err(|_| ValidationError::NonNumericValue {
            variable: name.to_string(),
        })?;
        if !v.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                variable: name.to_string(),
            });
        }
        parsed.push(v);
    }
    Ok(parsed)
}
