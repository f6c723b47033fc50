//! Column-expansion iterator shared by every per-slot traversal.
//!
//! The encoder, the scale-flag generator, the dimension calculator and the
//! feature layout all consume [`Expansion`], so slot `k` means the same
//! column position everywhere.

use crate::schema::{SchemaColumn, SchemaDefinition};
use std::ops::Range;

/// The input slots produced by one schema column.
#[derive(Clone, Copy, Debug)]
pub struct ColumnSlots<'a> {
    /// Position of the column in the schema (and in each raw row).
    pub column_index: usize,
    pub column: &'a SchemaColumn,
    /// First input slot written for this column.
    pub offset: usize,
    /// Number of slots, `1` for numeric and `|values|` for categorical.
    pub width: usize,
}

impl ColumnSlots<'_> {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.width
    }
}

/// Iterator over the non-target, non-`Meta` columns of a schema.
#[derive(Clone, Debug)]
pub struct Expansion<'a> {
    inputs: std::iter::Enumerate<std::slice::Iter<'a, SchemaColumn>>,
    cursor: usize,
}

impl<'a> Expansion<'a> {
    pub(crate) fn new(schema: &'a SchemaDefinition) -> Self {
        Self {
            inputs: schema.inputs().iter().enumerate(),
            cursor: 0,
        }
    }

    /// Slots consumed so far; equals the input width once exhausted.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<'a> Iterator for Expansion<'a> {
    type Item = ColumnSlots<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (column_index, column) in self.inputs.by_ref() {
            if column.kind.is_meta() {
                continue;
            }
            let width = column.kind.contribution_width();
            let slots = ColumnSlots {
                column_index,
                column,
                offset: self.cursor,
                width,
            };
            self.cursor += width;
            return Some(slots);
        }
        None
    }
}
