// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Rectangular input tables for row-displacement compression.
//!
//! A [`Table`] is an immutable view over a flat sequence of integers with a
//! fixed row length and a designated empty-sentinel value. Cells equal to the
//! sentinel are treated as holding no data.

use crate::error::Error;
use crate::error::ErrorKind;

/// The sentinel value classifying a cell as empty, unless overridden.
pub const DEFAULT_EMPTY_VALUE: i64 = 0;

/// An immutable rectangular table of integers backed by a flat sequence.
///
/// # Examples
///
/// ```
/// use rowpack::table::Table;
///
/// let table = Table::new(vec![1, 0, 0, 0, 2, 0], 3).unwrap();
/// assert_eq!(table.num_rows(), 2);
/// assert_eq!(table.num_cols(), 3);
/// assert_eq!(table.get(1, 1), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    entries: Vec<i64>,
    row_len: usize,
    empty_value: i64,
}

impl Table {
    /// Creates a table with the default empty sentinel.
    pub fn new(entries: Vec<i64>, row_len: usize) -> Result<Self, Error> {
        Self::builder(entries, row_len).build()
    }

    /// Returns a builder for a table over `entries` with rows of `row_len`
    /// columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use rowpack::table::Table;
    ///
    /// let table = Table::builder(vec![-1, 5, -1, -1], 2)
    ///     .empty_value(-1)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(table.empty_value(), -1);
    /// ```
    pub fn builder(entries: Vec<i64>, row_len: usize) -> TableBuilder {
        TableBuilder {
            entries,
            row_len,
            empty_value: DEFAULT_EMPTY_VALUE,
        }
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.entries.len() / self.row_len
    }

    /// Number of columns per row.
    pub fn num_cols(&self) -> usize {
        self.row_len
    }

    /// The sentinel value classifying a cell as empty.
    pub fn empty_value(&self) -> i64 {
        self.empty_value
    }

    /// Returns the entry at `(row, col)`, or `None` if either coordinate is
    /// out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        if row >= self.num_rows() || col >= self.row_len {
            return None;
        }
        Some(self.entries[row * self.row_len + col])
    }

    /// Returns row `row` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_rows()`.
    pub fn row(&self, row: usize) -> &[i64] {
        let start = row * self.row_len;
        &self.entries[start..start + self.row_len]
    }

    pub(crate) fn entries(&self) -> &[i64] {
        &self.entries
    }
}

/// Builder for [`Table`].
#[derive(Debug, Clone)]
pub struct TableBuilder {
    entries: Vec<i64>,
    row_len: usize,
    empty_value: i64,
}

impl TableBuilder {
    /// Overrides the empty-sentinel value (default 0).
    pub fn empty_value(mut self, empty_value: i64) -> Self {
        self.empty_value = empty_value;
        self
    }

    /// Validates the shape and builds the table.
    ///
    /// Fails with [`ErrorKind::InvalidShape`] if the entry sequence is empty,
    /// the row length is zero, or the entry count is not a multiple of the
    /// row length.
    pub fn build(self) -> Result<Table, Error> {
        if self.entries.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidShape,
                "table must have at least one entry",
            ));
        }
        if self.row_len == 0 {
            return Err(Error::new(
                ErrorKind::InvalidShape,
                "row length must be at least 1",
            ));
        }
        if self.entries.len() % self.row_len != 0 {
            return Err(Error::new(
                ErrorKind::InvalidShape,
                "entry count must be a multiple of the row length",
            )
            .with_context("entries", self.entries.len())
            .with_context("row_len", self.row_len));
        }
        Ok(Table {
            entries: self.entries,
            row_len: self.row_len,
            empty_value: self.empty_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_shape() {
        let table = Table::new(vec![1, 2, 3, 4, 5, 6], 3).unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_cols(), 3);
        assert_eq!(table.empty_value(), DEFAULT_EMPTY_VALUE);
        assert_eq!(table.row(1), &[4, 5, 6]);
    }

    #[test]
    fn test_empty_entries_rejected() {
        let err = Table::new(vec![], 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidShape);
    }

    #[test]
    fn test_zero_row_len_rejected() {
        let err = Table::new(vec![1, 2, 3], 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidShape);
    }

    #[test]
    fn test_ragged_shape_rejected() {
        let err = Table::new(vec![1, 2, 3, 4, 5], 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidShape);
    }

    #[test]
    fn test_get_in_and_out_of_range() {
        let table = Table::new(vec![1, 0, 0, 2], 2).unwrap();
        assert_eq!(table.get(0, 0), Some(1));
        assert_eq!(table.get(1, 1), Some(2));
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.get(0, 2), None);
    }

    #[test]
    fn test_custom_empty_value() {
        let table = Table::builder(vec![0, -1, -1, 0], 2)
            .empty_value(-1)
            .build()
            .unwrap();
        assert_eq!(table.empty_value(), -1);
        assert_eq!(table.get(0, 0), Some(0));
    }
}
