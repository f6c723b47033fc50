//! Leave-one-out row selection.
//!
//! [`LeaveOneOut`] is a plain value: each training run owns its own copy, so
//! folds never observe each other's exclusions.

use crate::error::EncodeError;

/// Which physical row, if any, is held out of the training view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LeaveOneOut {
    /// Every row is a training row.
    #[default]
    None,
    /// The physical row at this index is skipped.
    Exclude(usize),
}

impl LeaveOneOut {
    pub fn new(excluded: Option<usize>) -> Self {
        match excluded {
            Some(index) => LeaveOneOut::Exclude(index),
            None => LeaveOneOut::None,
        }
    }

    /// Record the physical row to skip, or clear the exclusion with `None`.
    pub fn set_excluded(&mut self, excluded: Option<usize>) {
        *self = Self::new(excluded);
    }

    pub fn excluded(&self) -> Option<usize> {
        match *self {
            LeaveOneOut::Exclude(index) => Some(index),
            LeaveOneOut::None => None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, LeaveOneOut::Exclude(_))
    }

    /// Number of logical training rows for a table of `table_len` rows.
    #[inline]
    pub fn num_data(&self, table_len: usize) -> usize {
        if self.is_active() {
            table_len.saturating_sub(1)
        } else {
            table_len
        }
    }

    /// Map a logical training row to its physical table row.
    ///
    /// Logical rows at or past the excluded index shift up by one, giving a
    /// contiguous view that skips the held-out row.
    pub fn translate(&self, logical_row: usize, table_len: usize) -> Result<usize, EncodeError> {
        let num_data = self.num_data(table_len);
        if logical_row >= num_data {
            return Err(EncodeError::IndexOutOfRange {
                index: logical_row,
                len: num_data,
            });
        }

        match *self {
            LeaveOneOut::Exclude(excluded) if excluded >= table_len => {
                Err(EncodeError::IndexOutOfRange {
                    index: excluded,
                    len: table_len,
                })
            }
            LeaveOneOut::Exclude(excluded) if logical_row >= excluded => Ok(logical_row + 1),
            _ => Ok(logical_row),
        }
    }

    /// Physical indices of the training view, in ascending order.
    pub fn training_rows(&self, table_len: usize) -> impl Iterator<Item = usize> {
        let excluded = self.excluded();
        (0..table_len).filter(move |&row| Some(row) != excluded)
    }

    /// One exclusion per physical row: `Exclude(0)`, `Exclude(1)`, ...
    pub fn folds(table_len: usize) -> impl Iterator<Item = LeaveOneOut> {
        (0..table_len).map(LeaveOneOut::Exclude)
    }
}

impl From<Option<usize>> for LeaveOneOut {
    fn from(excluded: Option<usize>) -> Self {
        Self::new(excluded)
    }
}
