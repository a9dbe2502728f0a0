//! Validation errors surfaced to the user

use thiserror::Error;

/// User-correctable input errors detected during parsing, transformation or
/// clustering. Anything else is an unexpected internal failure and travels
/// through `anyhow` instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A filled data row has values but no variable name.
    #[error("variable name must not be blank for a filled data row")]
    EmptyVariableName,

    /// A value token failed to parse as a number.
    #[error("values for variable \"{variable}\" must be numbers separated by spaces or commas")]
    NonNumericValue {
        /// Name of the offending variable.
        variable: String,
    },

    /// A named variable has no values at all.
    #[error("values for variable \"{variable}\" must not be empty")]
    EmptyValues {
        /// Name of the offending variable.
        variable: String,
    },

    /// A variable's value count differs from the first variable's.
    #[error("variable \"{variable}\" has {found} values, inconsistent with the other variables ({expected}); all variables must have the same number of values")]
    InconsistentLength {
        /// Name of the offending variable.
        variable: String,
        /// Value count established by the first variable.
        expected: usize,
        /// Value count found for this variable.
        found: usize,
    },

    /// The same variable name appears twice.
    #[error("duplicate variable name \"{variable}\"")]
    DuplicateVariableName {
        /// The repeated name.
        variable: String,
    },

    /// No usable name/value pair was supplied.
    #[error("no valid data was entered; fill in at least one variable row")]
    NoData,

    /// Scaling target range is empty or reversed.
    #[error("the new minimum ({min}) must be smaller than the new maximum ({max}) for scaling")]
    InvalidRange {
        /// Requested new minimum.
        min: f64,
        /// Requested new maximum.
        max: f64,
    },

    /// Clustering needs at least two points.
    #[error("euclidean analysis requires at least 2 data points, got {found}")]
    InsufficientPoints {
        /// Number of points in the table.
        found: usize,
    },

    /// A value is NaN or infinite.
    #[error("variable \"{variable}\" contains a non-finite value")]
    NonFiniteValue {
        /// Name of the offending variable.
        variable: String,
    },
}
