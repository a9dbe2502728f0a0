//! Command-line interface definitions and argument parsing

use clap::Parser;

use crate::response::{AnalysisRequest, AnalysisType};

/// Table statistics CLI: centering, scaling and single-linkage clustering
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Analysis to run on the table
    #[arg(short, long, value_enum, default_value = "centering")]
    pub analysis: AnalysisType,

    /// Variable name; repeat to add columns, paired positionally with --values
    #[arg(short, long = "column")]
    pub columns: Vec<String>,

    /// Values for the matching --column, numbers separated by spaces or commas
    /// Example: --column X --values "1 2 3" --column Y --values "4,5,6"
    #[arg(long = "values")]
    pub values: Vec<String>,

    /// Read the whole request from a JSON file instead of flags
    #[arg(short, long)]
    pub request: Option<String>,

    /// New minimum for scaling
    #[arg(long, default_value_t = 0.0)]
    pub min_new: f64,

    /// New maximum for scaling
    #[arg(long, default_value_t = 1.0)]
    pub max_new: f64,

    /// Output path for the dendrogram plot (euclidean analysis)
    #[arg(short, long, default_value = "dendrogram.png")]
    pub plot: String,

    /// Write the full response payload as JSON to this path
    #[arg(short, long)]
    pub json: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the analysis request, either from the `--request` JSON file or
    /// from the inline column/value flags.
    pub fn to_request(&self) -> crate::Result<AnalysisRequest> {
        if let Some(path) = &self.request {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("cannot read request file {path}: {e}"))?;
            let request = serde_json::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("invalid request JSON in {path}: {e}"))?;
            Ok(request)
        } else {
            Ok(AnalysisRequest {
                analysis_type: self.analysis,
                columns: self.columns.clone(),
                values: self.values.clone(),
                minnew: Some(self.min_new),
                maxnew: Some(self.max_new),
            })
        }
    }
}
