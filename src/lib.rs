//! StatForge: table statistics with dendrogram plots
//!
//! Takes a small user-supplied numeric table (named variables with
//! positionally paired value strings) and applies one of three analyses:
//! mean-centering, min-max scaling, or Euclidean single-linkage
//! hierarchical clustering with a distance matrix and a rendered
//! dendrogram.

pub mod cli;
pub mod data;
pub mod error;
pub mod model;
pub mod response;
pub mod transform;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{build_table, Table};
pub use error::ValidationError;
pub use model::{cluster, distance_matrix, single_linkage, DistanceMatrix, Hierarchy, MergeStep};
pub use response::{
    handle_request, AnalysisOutcome, AnalysisRequest, AnalysisResponse, AnalysisType, DisplayTable,
};
pub use transform::{center, scale};
pub use viz::{dendrogram_layout, render_dendrogram, DendrogramLayout};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
