//! Per-feature scaling flags.
//!
//! One flag per input slot: numeric slots may be rescaled by the learner,
//! one-hot slots never are.

use crate::error::EncodeError;
use crate::schema::{ColumnKind, SchemaDefinition};

/// Write one flag per input slot into `flags[..num_input]`.
pub fn compute_scale_flags(
    schema: &SchemaDefinition,
    flags: &mut [bool],
) -> Result<(), EncodeError> {
    let num_input = schema.input_width();
    if flags.len() < num_input {
        return Err(EncodeError::BufferTooSmall {
            buffer: "flags",
            expected: num_input,
            got: flags.len(),
        });
    }

    for slots in schema.expansion() {
        let scale = matches!(slots.column.kind, ColumnKind::Numeric);
        flags[slots.range()].fill(scale);
    }
    Ok(())
}

/// Scale flags as an exact-size vector.
pub fn scale_flags(schema: &SchemaDefinition) -> Vec<bool> {
    schema
        .expansion()
        .flat_map(|slots| {
            let scale = matches!(slots.column.kind, ColumnKind::Numeric);
            std::iter::repeat(scale).take(slots.width)
        })
        .collect()
}
