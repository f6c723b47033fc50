//! Encoder façade over a loaded schema and table.
//!
//! [`EncodedDataset`] owns the immutable inputs of a training session. Each
//! training run works through a [`Fold`], which carries its own
//! [`LeaveOneOut`] value and exposes the consumer surface: dimensions, row
//! encoding, scale flags and batch materialization.
//!
//! # Example
//!
//! ```rust
//! use tabular_features::{EncodedDataset, EncoderConfig, LeaveOneOut, RawTable};
//! use tabular_features::schema::{SchemaColumn, SchemaDefinition};
//!
//! let schema = SchemaDefinition::new(vec![
//!     SchemaColumn::numeric("age"),
//!     SchemaColumn::categorical("color", ["red", "green", "blue"]),
//!     SchemaColumn::meta("id"),
//!     SchemaColumn::numeric("score"),
//! ])
//! .unwrap();
//! let rows = vec![
//!     vec!["30".to_string(), "2".to_string(), "x123".to_string(), "0.75".to_string()],
//!     vec!["41".to_string(), "3".to_string(), "x124".to_string(), "0.20".to_string()],
//! ];
//! let dataset = EncodedDataset::new(schema, RawTable::new(rows), EncoderConfig::default());
//!
//! let fold = dataset.fold(LeaveOneOut::Exclude(1)).unwrap();
//! let dims = fold.dimensions();
//! assert_eq!((dims.num_data, dims.num_input, dims.num_output), (1, 4, 1));
//!
//! let mut input = vec![0.0; dims.num_input];
//! let mut output = [0.0];
//! fold.encode_row(0, &mut input, &mut output).unwrap();
//! assert_eq!(input, vec![30.0, 0.0, 1.0, 0.0]);
//! ```

use crate::config::EncoderConfig;
use crate::dimensions::Dimensions;
use crate::encoder::{parse_category_code, RowEncoder};
use crate::error::EncodeError;
use crate::layout::FeatureLayout;
use crate::leave_one_out::LeaveOneOut;
use crate::scale_flags::compute_scale_flags;
use crate::schema::{ColumnKind, SchemaDefinition};
use crate::table::{RawRow, RawTable};
use log::debug;
use ndarray::{Array1, Array2};
use std::ops::Range;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A source of encoded `(X, y)` batches.
///
/// `X` has shape `(n_rows, n_features)` and `y` has shape `(n_rows,)`.
pub trait Dataset {
    type Error: std::fmt::Debug + 'static;

    /// Number of rows available to [`Dataset::get_batch`].
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode the rows in `range`.
    fn get_batch(&self, range: Range<usize>) -> Result<(Array2<f32>, Array1<f32>), Self::Error>;

    /// Consecutive batches of `batch_size` rows; the last may be shorter.
    fn batches(&self, batch_size: usize) -> BatchIter<'_, Self>
    where
        Self: Sized,
    {
        BatchIter {
            dataset: self,
            batch_size: batch_size.max(1),
            current: 0,
        }
    }
}

/// Iterator over dataset batches, created by [`Dataset::batches`].
pub struct BatchIter<'d, D: ?Sized> {
    dataset: &'d D,
    batch_size: usize,
    current: usize,
}

impl<D: Dataset> Iterator for BatchIter<'_, D> {
    type Item = Result<(Array2<f32>, Array1<f32>), D::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.dataset.len();
        if self.current >= total {
            return None;
        }

        let end = (self.current + self.batch_size).min(total);
        let range = self.current..end;
        self.current = end;
        Some(self.dataset.get_batch(range))
    }
}

/// Schema, raw rows and configuration of one training session.
#[derive(Clone, Debug)]
pub struct EncodedDataset {
    schema: SchemaDefinition,
    table: RawTable,
    config: EncoderConfig,
}

impl EncodedDataset {
    pub fn new(schema: SchemaDefinition, table: RawTable, config: EncoderConfig) -> Self {
        Self {
            schema,
            table,
            config,
        }
    }

    /// Build from unchecked records, dropping those shorter than the schema.
    pub fn from_records<I>(schema: SchemaDefinition, records: I, config: EncoderConfig) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        let table = RawTable::from_records(records, schema.len());
        Self::new(schema, table, config)
    }

    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    pub fn table(&self) -> &RawTable {
        &self.table
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Number of physical rows.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Training view with the given exclusion.
    pub fn fold(&self, leave_one_out: LeaveOneOut) -> Result<Fold<'_>, EncodeError> {
        let mut fold = Fold {
            dataset: self,
            encoder: RowEncoder::new(&self.schema, self.config.parse_policy),
            leave_one_out: LeaveOneOut::None,
        };
        fold.set_leave_one_out(leave_one_out.excluded())?;
        Ok(fold)
    }

    /// Training view over every row.
    pub fn training(&self) -> Fold<'_> {
        Fold {
            dataset: self,
            encoder: RowEncoder::new(&self.schema, self.config.parse_policy),
            leave_one_out: LeaveOneOut::None,
        }
    }

    /// One fold per physical row, each holding that row out.
    pub fn leave_one_out_folds(&self) -> impl Iterator<Item = Fold<'_>> + '_ {
        LeaveOneOut::folds(self.len()).map(move |leave_one_out| Fold {
            dataset: self,
            encoder: RowEncoder::new(&self.schema, self.config.parse_policy),
            leave_one_out,
        })
    }

    pub fn layout(&self) -> FeatureLayout {
        FeatureLayout::from_schema(&self.schema)
    }

    /// Column name for display headers.
    pub fn header(&self, column: usize) -> Option<&str> {
        self.schema.get(column).map(|c| c.name.as_str())
    }

    /// Human-readable cell value.
    ///
    /// Categorical codes map to their label; anything else, including an
    /// out-of-range code, is returned as the raw token.
    pub fn display_value(&self, row: usize, column: usize) -> Option<&str> {
        let token = self.table.cell(row, column)?;
        let schema_column = self.schema.get(column)?;
        if let ColumnKind::Categorical { .. } = schema_column.kind {
            let label = parse_category_code(token).and_then(|c| schema_column.category_label(c));
            if let Some(label) = label {
                return Some(label);
            }
        }
        Some(token)
    }
}

/// One training run over an [`EncodedDataset`].
#[derive(Clone, Debug)]
pub struct Fold<'a> {
    dataset: &'a EncodedDataset,
    encoder: RowEncoder<'a>,
    leave_one_out: LeaveOneOut,
}

impl<'a> Fold<'a> {
    pub fn dataset(&self) -> &'a EncodedDataset {
        self.dataset
    }

    pub fn leave_one_out(&self) -> LeaveOneOut {
        self.leave_one_out
    }

    /// Hold out physical row `excluded`, or clear the exclusion with `None`.
    pub fn set_leave_one_out(&mut self, excluded: Option<usize>) -> Result<(), EncodeError> {
        if let Some(index) = excluded {
            let len = self.dataset.len();
            if index >= len {
                return Err(EncodeError::IndexOutOfRange { index, len });
            }
        }
        self.leave_one_out.set_excluded(excluded);
        debug!("leave-one-out set to {:?}", self.leave_one_out);
        Ok(())
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::compute(
            &self.dataset.schema,
            self.dataset.len(),
            self.leave_one_out,
        )
    }

    /// Physical row behind logical row `logical_row`.
    pub fn physical_row(&self, logical_row: usize) -> Result<usize, EncodeError> {
        self.leave_one_out
            .translate(logical_row, self.dataset.len())
    }

    /// Encode logical row `logical_row` into caller-owned buffers.
    pub fn encode_row(
        &self,
        logical_row: usize,
        input: &mut [f32],
        output: &mut [f32],
    ) -> Result<(), EncodeError> {
        let physical = self.physical_row(logical_row)?;
        let row = self.dataset.table.row(physical)?;
        self.encoder.encode(row, input, output)
    }

    /// Encode the held-out row, returning its physical index.
    ///
    /// Returns `Ok(None)` and leaves the buffers untouched when no row is
    /// excluded.
    pub fn held_out_row(
        &self,
        input: &mut [f32],
        output: &mut [f32],
    ) -> Result<Option<usize>, EncodeError> {
        let Some(excluded) = self.leave_one_out.excluded() else {
            return Ok(None);
        };
        let row = self.dataset.table.row(excluded)?;
        self.encoder.encode(row, input, output)?;
        Ok(Some(excluded))
    }

    pub fn scale_flags(&self, flags: &mut [bool]) -> Result<(), EncodeError> {
        compute_scale_flags(&self.dataset.schema, flags)
    }

    /// Encode every logical row into a `num_data x num_input` matrix and a
    /// target vector.
    pub fn to_arrays(&self) -> Result<(Array2<f32>, Array1<f32>), EncodeError> {
        let num_data = self.dimensions().num_data;
        debug!(
            "materializing {num_data} rows ({:?})",
            self.leave_one_out
        );
        self.encode_range(0..num_data)
    }

    fn encode_range(&self, range: Range<usize>) -> Result<(Array2<f32>, Array1<f32>), EncodeError> {
        let num_data = self.dimensions().num_data;
        if range.end > num_data {
            return Err(EncodeError::IndexOutOfRange {
                index: range.end - 1,
                len: num_data,
            });
        }

        let n_rows = range.len();
        let width = self.encoder.num_input();
        let mut input = vec![0.0f32; n_rows * width];
        let mut output = vec![0.0f32; n_rows];
        self.encode_rows_into(range.start, width, &mut input, &mut output)?;

        let x = Array2::from_shape_vec((n_rows, width), input)
            .map_err(|e| EncodeError::Shape(e.to_string()))?;
        Ok((x, Array1::from_vec(output)))
    }

    /// Rows are independent: each writes only its own slice of `input`
    /// and its own element of `output`.
    fn encode_rows_into(
        &self,
        first: usize,
        width: usize,
        input: &mut [f32],
        output: &mut [f32],
    ) -> Result<(), EncodeError> {
        if width == 0 {
            return output.iter_mut().enumerate().try_for_each(|(i, out)| {
                self.encode_row(first + i, &mut [], std::slice::from_mut(out))
            });
        }

        self.encode_chunks(first, width, input, output)
    }

    #[cfg(feature = "parallel")]
    fn encode_chunks(
        &self,
        first: usize,
        width: usize,
        input: &mut [f32],
        output: &mut [f32],
    ) -> Result<(), EncodeError> {
        input
            .par_chunks_mut(width)
            .zip(output.par_iter_mut())
            .enumerate()
            .try_for_each(|(i, (row, out))| {
                self.encode_row(first + i, row, std::slice::from_mut(out))
            })
    }

    #[cfg(not(feature = "parallel"))]
    fn encode_chunks(
        &self,
        first: usize,
        width: usize,
        input: &mut [f32],
        output: &mut [f32],
    ) -> Result<(), EncodeError> {
        input
            .chunks_mut(width)
            .zip(output.iter_mut())
            .enumerate()
            .try_for_each(|(i, (row, out))| {
                self.encode_row(first + i, row, std::slice::from_mut(out))
            })
    }
}

impl Dataset for Fold<'_> {
    type Error = EncodeError;

    fn len(&self) -> usize {
        self.dimensions().num_data
    }

    fn get_batch(&self, range: Range<usize>) -> Result<(Array2<f32>, Array1<f32>), Self::Error> {
        self.encode_range(range)
    }
}
