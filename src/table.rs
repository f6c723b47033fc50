//! Raw string tables.

use crate::error::EncodeError;
use log::warn;

/// One row of raw string tokens, positionally aligned with the schema.
pub type RawRow = Vec<String>;

/// Ordered collection of raw rows.
///
/// Every retained row has at least `min_fields` tokens; shorter records are
/// dropped when the table is built and never reach the encoder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<RawRow>,
    dropped: usize,
}

impl RawTable {
    /// Build a table from rows that are already known to be long enough.
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows, dropped: 0 }
    }

    /// Build a table, dropping records with fewer than `min_fields` tokens.
    pub fn from_records<I>(records: I, min_fields: usize) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut rows = Vec::new();
        let mut dropped = 0;
        for record in records {
            if record.len() < min_fields {
                dropped += 1;
                continue;
            }
            rows.push(record);
        }
        if dropped > 0 {
            warn!(
                "dropped {dropped} rows with fewer than {min_fields} fields ({} kept)",
                rows.len()
            );
        }
        Self { rows, dropped }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of records rejected by [`RawTable::from_records`].
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Row at physical index `index`.
    pub fn row(&self, index: usize) -> Result<&RawRow, EncodeError> {
        self.rows.get(index).ok_or(EncodeError::IndexOutOfRange {
            index,
            len: self.rows.len(),
        })
    }

    /// Raw token at (`row`, `column`), if both exist.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}

impl FromIterator<RawRow> for RawTable {
    fn from_iter<T: IntoIterator<Item = RawRow>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
