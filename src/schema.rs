//! Column schema definitions.
//!
//! A [`SchemaDefinition`] is an ordered list of [`SchemaColumn`]s. The last
//! column is always the target and is read as a float whatever its declared
//! kind; every column before it is a candidate input.

use crate::error::SchemaError;
use crate::expansion::Expansion;
use serde::{Deserialize, Serialize};

/// Kind code for numeric columns in schema files.
pub const KIND_NUMERIC: i64 = 0;
/// Kind code for categorical columns in schema files.
pub const KIND_CATEGORICAL: i64 = 1;
/// Kind code for meta columns in schema files.
pub const KIND_META: i64 = 2;

/// How a column contributes to the input vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// A single float slot.
    Numeric,

    /// One-hot expanded over `values`.
    ///
    /// Raw cells hold 1-based codes: code `v` activates slot `v - 1`.
    Categorical { values: Vec<String> },

    /// Present in the raw data but never fed to the learner (e.g. an identifier).
    Meta,
}

impl ColumnKind {
    /// Resolve a kind code from a schema file.
    ///
    /// `values` is only kept for categorical columns.
    pub fn from_code(column: &str, code: i64, values: Vec<String>) -> Result<Self, SchemaError> {
        match code {
            KIND_NUMERIC => Ok(ColumnKind::Numeric),
            KIND_CATEGORICAL => Ok(ColumnKind::Categorical { values }),
            KIND_META => Ok(ColumnKind::Meta),
            _ => Err(SchemaError::UnknownColumnKind {
                column: column.to_string(),
                code,
            }),
        }
    }

    /// The kind code used in schema files.
    pub fn code(&self) -> i64 {
        match self {
            ColumnKind::Numeric => KIND_NUMERIC,
            ColumnKind::Categorical { .. } => KIND_CATEGORICAL,
            ColumnKind::Meta => KIND_META,
        }
    }

    /// Number of input slots a column of this kind occupies.
    #[inline]
    pub fn contribution_width(&self) -> usize {
        match self {
            ColumnKind::Numeric => 1,
            ColumnKind::Categorical { values } => values.len(),
            ColumnKind::Meta => 0,
        }
    }

    #[inline]
    pub fn is_categorical(&self) -> bool {
        matches!(self, ColumnKind::Categorical { .. })
    }

    #[inline]
    pub fn is_meta(&self) -> bool {
        matches!(self, ColumnKind::Meta)
    }
}

/// A single named column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaColumn {
    pub name: String,
    pub kind: ColumnKind,
}

impl SchemaColumn {
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Numeric,
        }
    }

    pub fn categorical<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: ColumnKind::Categorical {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn meta(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Meta,
        }
    }

    /// Category labels in one-hot order; empty for non-categorical columns.
    pub fn category_values(&self) -> &[String] {
        match &self.kind {
            ColumnKind::Categorical { values } => values,
            _ => &[],
        }
    }

    /// Label for a 1-based categorical code, if the code is in range.
    pub fn category_label(&self, code: i64) -> Option<&str> {
        let index = usize::try_from(code.checked_sub(1)?).ok()?;
        self.category_values().get(index).map(String::as_str)
    }
}

/// Ordered, non-empty list of columns whose last entry is the target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SchemaColumn>", into = "Vec<SchemaColumn>")]
pub struct SchemaDefinition {
    columns: Vec<SchemaColumn>,
}

impl TryFrom<Vec<SchemaColumn>> for SchemaDefinition {
    type Error = SchemaError;

    fn try_from(columns: Vec<SchemaColumn>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<SchemaDefinition> for Vec<SchemaColumn> {
    fn from(schema: SchemaDefinition) -> Self {
        schema.columns
    }
}

impl SchemaDefinition {
    /// Build a schema; fails if `columns` is empty.
    pub fn new(columns: Vec<SchemaColumn>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }
        Ok(Self { columns })
    }

    /// Total number of columns, target included.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false: a schema holds at least the target column.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[SchemaColumn] {
        &self.columns
    }

    pub fn get(&self, index: usize) -> Option<&SchemaColumn> {
        self.columns.get(index)
    }

    /// Index of the target column.
    #[inline]
    pub fn target_index(&self) -> usize {
        self.columns.len() - 1
    }

    pub fn target(&self) -> &SchemaColumn {
        &self.columns[self.target_index()]
    }

    /// Every column before the target, `Meta` included.
    pub fn inputs(&self) -> &[SchemaColumn] {
        &self.columns[..self.target_index()]
    }

    /// Position of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Walk the input columns as expanded slot ranges.
    ///
    /// Encoding, scale flags, dimensions and the feature layout are all
    /// derived from this iterator.
    pub fn expansion(&self) -> Expansion<'_> {
        Expansion::new(self)
    }

    /// Width of the encoded input vector.
    pub fn input_width(&self) -> usize {
        self.expansion().map(|slots| slots.width).sum()
    }

    pub fn has_categorical(&self) -> bool {
        self.inputs().iter().any(|c| c.kind.is_categorical())
    }
}
