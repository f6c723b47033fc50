//! Training shape computation.

use crate::leave_one_out::LeaveOneOut;
use crate::schema::SchemaDefinition;

/// Shape of the encoded training data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Number of logical training rows.
    pub num_data: usize,
    /// Width of each input vector.
    pub num_input: usize,
    /// Width of each output vector; always 1.
    pub num_output: usize,
}

impl Dimensions {
    /// Single target column.
    pub const NUM_OUTPUT: usize = 1;

    /// Derive the shape from the schema, the table size and the exclusion.
    ///
    /// `num_input` depends only on the schema; `num_data` drops one row when
    /// a row is held out.
    pub fn compute(
        schema: &SchemaDefinition,
        table_len: usize,
        leave_one_out: LeaveOneOut,
    ) -> Self {
        Self {
            num_data: leave_one_out.num_data(table_len),
            num_input: schema.input_width(),
            num_output: Self::NUM_OUTPUT,
        }
    }

    /// Number of input cells in a `num_data x num_input` matrix.
    pub fn input_len(&self) -> usize {
        self.num_data * self.num_input
    }
}
