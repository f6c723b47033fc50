//! Row encoding.
//!
//! Turns one raw row into an input vector and a single-value output vector.
//! Slots are laid out by [`SchemaDefinition::expansion`]:
//!
//! ```text
//! schema: [age: Numeric, color: Categorical(red, green, blue), id: Meta, score: target]
//! row:    ["30", "2", "x123", "0.75"]
//! input:  [30.0, 0.0, 1.0, 0.0]
//! output: [0.75]
//! ```

use crate::config::ParsePolicy;
use crate::error::EncodeError;
use crate::schema::{ColumnKind, SchemaColumn, SchemaDefinition};

/// Parse a float cell, `None` if the token is not a finite `f32`.
///
/// Values outside the `f32` range (`"1e40"`) and `inf`/`nan` count as
/// malformed.
#[inline]
pub fn parse_numeric(token: &str) -> Option<f32> {
    token
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse a 1-based categorical code, `None` if the token is not an integer.
#[inline]
pub fn parse_category_code(token: &str) -> Option<i64> {
    token.trim().parse::<i64>().ok()
}

/// Encodes rows of one schema with a fixed parse policy.
#[derive(Clone, Debug)]
pub struct RowEncoder<'a> {
    schema: &'a SchemaDefinition,
    policy: ParsePolicy,
    num_input: usize,
}

impl<'a> RowEncoder<'a> {
    pub fn new(schema: &'a SchemaDefinition, policy: ParsePolicy) -> Self {
        Self {
            schema,
            policy,
            num_input: schema.input_width(),
        }
    }

    pub fn schema(&self) -> &'a SchemaDefinition {
        self.schema
    }

    /// Width of the input vector written by [`RowEncoder::encode`].
    #[inline]
    pub fn num_input(&self) -> usize {
        self.num_input
    }

    /// Encode `row` into `input[..num_input]` and `output[0]`.
    ///
    /// Buffers are left in an unspecified state when an error is returned.
    pub fn encode(
        &self,
        row: &[String],
        input: &mut [f32],
        output: &mut [f32],
    ) -> Result<(), EncodeError> {
        if row.len() < self.schema.len() {
            return Err(EncodeError::RowTooShort {
                fields: row.len(),
                required: self.schema.len(),
            });
        }
        if input.len() < self.num_input {
            return Err(EncodeError::BufferTooSmall {
                buffer: "input",
                expected: self.num_input,
                got: input.len(),
            });
        }
        if output.is_empty() {
            return Err(EncodeError::BufferTooSmall {
                buffer: "output",
                expected: 1,
                got: 0,
            });
        }

        for slots in self.schema.expansion() {
            let token = &row[slots.column_index];
            match &slots.column.kind {
                ColumnKind::Numeric => {
                    input[slots.offset] = self.numeric(slots.column, token)?;
                }
                ColumnKind::Categorical { values } => {
                    let code = self.category_code(slots.column, values.len(), token)?;
                    for (j, slot) in input[slots.range()].iter_mut().enumerate() {
                        *slot = if code == Some(j as i64 + 1) { 1.0 } else { 0.0 };
                    }
                }
                ColumnKind::Meta => {}
            }
        }

        let target = self.schema.target();
        output[0] = self.numeric(target, &row[self.schema.target_index()])?;
        Ok(())
    }

    /// Encode into freshly allocated vectors.
    pub fn encode_to_vec(&self, row: &[String]) -> Result<(Vec<f32>, f32), EncodeError> {
        let mut input = vec![0.0; self.num_input];
        let mut output = [0.0];
        self.encode(row, &mut input, &mut output)?;
        Ok((input, output[0]))
    }

    fn numeric(&self, column: &SchemaColumn, token: &str) -> Result<f32, EncodeError> {
        match (parse_numeric(token), self.policy) {
            (Some(value), _) => Ok(value),
            (None, ParsePolicy::Lenient) => Ok(0.0),
            (None, ParsePolicy::Strict) => Err(EncodeError::MalformedToken {
                column: column.name.clone(),
                token: token.to_string(),
            }),
        }
    }

    /// Returns the code if it activates a slot, `None` otherwise.
    fn category_code(
        &self,
        column: &SchemaColumn,
        cardinality: usize,
        token: &str,
    ) -> Result<Option<i64>, EncodeError> {
        let Some(code) = parse_category_code(token) else {
            return match self.policy {
                ParsePolicy::Lenient => Ok(None),
                ParsePolicy::Strict => Err(EncodeError::MalformedToken {
                    column: column.name.clone(),
                    token: token.to_string(),
                }),
            };
        };

        if code >= 1 && code as u64 <= cardinality as u64 {
            return Ok(Some(code));
        }
        match self.policy {
            ParsePolicy::Lenient => Ok(None),
            ParsePolicy::Strict => Err(EncodeError::CategoryOutOfRange {
                column: column.name.clone(),
                code,
                cardinality,
            }),
        }
    }
}

/// Encode a single row with the given policy.
///
/// Prefer [`RowEncoder`] when encoding many rows of the same schema.
pub fn encode_row(
    schema: &SchemaDefinition,
    row: &[String],
    input: &mut [f32],
    output: &mut [f32],
    policy: ParsePolicy,
) -> Result<(), EncodeError> {
    RowEncoder::new(schema, policy).encode(row, input, output)
}
