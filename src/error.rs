//! Error types for schema resolution, encoding and loading.

use std::io;

/// Errors raised while resolving a schema description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A column declared a kind code outside `{0 = Numeric, 1 = Categorical, 2 = Meta}`.
    #[error("unknown column kind {code} for column '{column}'")]
    UnknownColumnKind { column: String, code: i64 },

    /// The schema has no columns, so there is no target column.
    #[error("schema must contain at least one column")]
    Empty,
}

/// Errors raised by dimension, translation and encoding operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A logical or physical row index falls outside the table.
    #[error("row index {index} out of range for {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    /// A caller-supplied buffer is shorter than the encoded width.
    #[error("{buffer} buffer too small: expected at least {expected}, got {got}")]
    BufferTooSmall {
        buffer: &'static str,
        expected: usize,
        got: usize,
    },

    /// A row has fewer fields than the schema has columns.
    #[error("row has {fields} fields, schema requires {required}")]
    RowTooShort { fields: usize, required: usize },

    /// Strict parsing only: a numeric cell could not be parsed.
    #[error("malformed token '{token}' in column '{column}'")]
    MalformedToken { column: String, token: String },

    /// Strict parsing only: a categorical code is not in `1..=cardinality`.
    #[error("category code {code} out of range 1..={cardinality} in column '{column}'")]
    CategoryOutOfRange {
        column: String,
        code: i64,
        cardinality: usize,
    },

    /// A persisted feature layout does not match the current schema.
    #[error("feature layout mismatch: expected {expected} slots, got {got}")]
    LayoutMismatch { expected: usize, got: usize },

    /// Two layouts disagree at slot `index`.
    #[error("feature layout mismatch at slot {index}: expected '{expected}', got '{got}'")]
    LayoutSlotMismatch {
        index: usize,
        expected: String,
        got: String,
    },

    /// Two layouts predict different target columns.
    #[error("feature layout target mismatch: expected '{expected}', got '{got}'")]
    LayoutTargetMismatch { expected: String, got: String },

    /// Encoded buffers could not be shaped into an array.
    #[error("array shape error: {0}")]
    Shape(String),
}

/// Errors raised by the schema and table loaders.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("schema JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_kind() {
        let err = SchemaError::UnknownColumnKind {
            column: "weight".to_string(),
            code: 7,
        };
        assert_eq!(err.to_string(), "unknown column kind 7 for column 'weight'");
    }

    #[test]
    fn test_error_display_index_out_of_range() {
        let err = EncodeError::IndexOutOfRange { index: 5, len: 3 };
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_schema_error_is_transparent() {
        let err: EncodeError = SchemaError::Empty.into();
        assert_eq!(err.to_string(), SchemaError::Empty.to_string());
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: LoadError = io_err.into();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = EncodeError::RowTooShort {
            fields: 2,
            required: 4,
        };
        let _: &dyn std::error::Error = &err;
    }
}
