//! Request/response payloads and display formatting

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::{build_table, Table};
use crate::model::{cluster, DistanceMatrix};
use crate::{transform, viz};

/// The three supported analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    /// Subtract each column's mean.
    Centering,
    /// Remap each column onto a new [min, max] range.
    Scaling,
    /// Pairwise Euclidean distances + single-linkage dendrogram.
    Euclidean,
}

/// Logical request payload: positionally paired raw column/value strings
/// plus the scaling target range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub analysis_type: AnalysisType,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
    /// New minimum for scaling; defaults to 0.
    #[serde(default)]
    pub minnew: Option<f64>,
    /// New maximum for scaling; defaults to 1.
    #[serde(default)]
    pub maxnew: Option<f64>,
}

/// A table rendered for display: row labels plus formatted value strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTable {
    pub columns: Vec<String>,
    pub rows: Vec<DisplayRow>,
}

/// One display row: label and formatted values, one per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub label: String,
    pub values: Vec<String>,
}

impl DisplayTable {
    /// Display form of a numeric table.
    pub fn from_table(table: &Table) -> Self {
        let rows = table
            .labels()
            .iter()
            .enumerate()
            .map(|(i, label)| DisplayRow {
                label: label.clone(),
                values: table.row(i).iter().map(|&v| format_value(v)).collect(),
            })
            .collect();
        Self {
            columns: table.names().to_vec(),
            rows,
        }
    }

    /// Display form of a distance matrix (point labels on both axes).
    pub fn from_matrix(matrix: &DistanceMatrix) -> Self {
        let rows = matrix
            .labels()
            .iter()
            .enumerate()
            .map(|(i, label)| DisplayRow {
                label: label.clone(),
                values: (0..matrix.n()).map(|j| format_value(matrix.get(i, j))).collect(),
            })
            .collect();
        Self {
            columns: matrix.labels().to_vec(),
            rows,
        }
    }
}

/// Logical response payload.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub analysis_type: AnalysisType,
    pub input_table: DisplayTable,
    pub result_table: DisplayTable,
    /// Base64-encoded dendrogram PNG, euclidean analysis only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_png_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_matrix: Option<DisplayTable>,
    pub generated_at: DateTime<Utc>,
}

/// Everything one request produces: the serializable payload plus the raw
/// plot bytes for writing to disk.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub response: AnalysisResponse,
    pub plot_png: Option<Vec<u8>>,
}

/// Run one analysis request end to end.
///
/// Parses and validates the raw strings, applies the requested analysis
/// and packages the result. Validation failures carry a
/// [`crate::ValidationError`] naming the offending variable where one
/// applies; anything else is an unexpected internal failure.
pub fn handle_request(request: &AnalysisRequest) -> crate::Result<AnalysisOutcome> {
    let table = build_table(&request.columns, &request.values)?;

    let (result, matrix, png) = match request.analysis_type {
        AnalysisType::Centering => (transform::center(&table), None, None),
        AnalysisType::Scaling => {
            let new_min = request.minnew.unwrap_or(0.0);
            let new_max = request.maxnew.unwrap_or(1.0);
            (transform::scale(&table, new_min, new_max)?, None, None)
        }
        AnalysisType::Euclidean => {
            let hierarchy = cluster(&table)?;
            let layout = viz::dendrogram_layout(&hierarchy.merges, table.labels());
            let png = match layout {
                Some(layout) => Some(viz::render_dendrogram(&layout)?),
                None => None,
            };
            // The original app echoes the input as the result table here.
            (table.clone(), Some(hierarchy.matrix), png)
        }
    };

    let response = assemble(
        request.analysis_type,
        &table,
        &result,
        png.as_deref(),
        matrix.as_ref(),
    );
    Ok(AnalysisOutcome {
        response,
        plot_png: png,
    })
}

/// Package engine outputs into the response payload.
pub fn assemble(
    analysis_type: AnalysisType,
    input: &Table,
    result: &Table,
    plot_png: Option<&[u8]>,
    matrix: Option<&DistanceMatrix>,
) -> AnalysisResponse {
    AnalysisResponse {
        analysis_type,
        input_table: DisplayTable::from_table(input),
        result_table: DisplayTable::from_table(result),
        plot_png_base64: plot_png
            .map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes)),
        distance_matrix: matrix.map(DisplayTable::from_matrix),
        generated_at: Utc::now(),
    }
}

/// Format one value for display: integers without a decimal point,
/// everything else rounded to at most 3 fractional digits.
pub fn format_value(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let mut s = format!("{v:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Print a display table to the console with aligned columns.
pub fn print_table(title: &str, table: &DisplayTable) {
    println!("\n=== {title} ===");

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.len()).collect();
    let mut label_width = 0;
    for row in &table.rows {
        label_width = label_width.max(row.label.len());
        for (j, value) in row.values.iter().enumerate() {
            widths[j] = widths[j].max(value.len());
        }
    }

    print!("{:label_width$}", "");
    for (column, &width) in table.columns.iter().zip(&widths) {
        print!(" | {column:>width$}");
    }
    println!();

    for row in &table.rows {
        print!("{:label_width$}", row.label);
        for (value, &width) in row.values.iter().zip(&widths) {
            print!(" | {value:>width$}");
        }
        println!();
    }
}
