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

use crate::error::Error;
use crate::error::ErrorKind;

/// Ownership of a slot in the packed array.
///
/// Overlapping rows share the packed array, so a slot holding the empty
/// sentinel is not enough to tell "originally empty" from "claimed by another
/// row". The ownership stamp resolves that: a lookup only trusts a slot whose
/// owner is the row being queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOwner {
    /// The slot holds a value placed for this original row.
    Row(usize),
    /// No row claims this slot.
    Unowned,
}

/// The result of row-displacement compression: a packed one-dimensional
/// layout that answers point lookups against the original two-dimensional
/// coordinates.
///
/// Immutable once constructed. Concurrent lookups from multiple readers need
/// no synchronization.
///
/// # Examples
///
/// ```
/// use rowpack::rowdisp::RowDisplacementCompressor;
/// use rowpack::table::Table;
///
/// let table = Table::new(vec![1, 0, 0, 0, 2, 0, 0, 0, 3], 3).unwrap();
/// let compressed = RowDisplacementCompressor::new().compress(&table).unwrap();
///
/// assert!(compressed.packed_len() <= 9);
/// assert_eq!(compressed.lookup(1, 1).unwrap(), 2);
/// assert_eq!(compressed.lookup(1, 0).unwrap(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedTable {
    orig_rows: usize,
    orig_cols: usize,
    empty_value: i64,
    entries: Vec<i64>,
    bounds: Vec<SlotOwner>,
    row_displacement: Vec<usize>,
}

impl CompressedTable {
    pub(crate) fn from_parts(
        orig_rows: usize,
        orig_cols: usize,
        empty_value: i64,
        entries: Vec<i64>,
        bounds: Vec<SlotOwner>,
        row_displacement: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(entries.len(), bounds.len());
        debug_assert_eq!(row_displacement.len(), orig_rows);
        Self {
            orig_rows,
            orig_cols,
            empty_value,
            entries,
            bounds,
            row_displacement,
        }
    }

    /// Number of rows in the original table.
    pub fn num_rows(&self) -> usize {
        self.orig_rows
    }

    /// Number of columns in the original table.
    pub fn num_cols(&self) -> usize {
        self.orig_cols
    }

    /// The empty-sentinel value carried from the original table.
    pub fn empty_value(&self) -> i64 {
        self.empty_value
    }

    /// Length of the packed array. At most `num_rows() * num_cols()`.
    pub fn packed_len(&self) -> usize {
        self.entries.len()
    }

    /// The packed value array.
    pub fn entries(&self) -> &[i64] {
        &self.entries
    }

    /// Base offset into the packed array for each original row.
    pub fn row_displacement(&self) -> &[usize] {
        &self.row_displacement
    }

    /// Returns the original row owning packed slot `slot`, or `None` if the
    /// slot is unowned or out of range.
    pub fn owner(&self, slot: usize) -> Option<usize> {
        match self.bounds.get(slot) {
            Some(SlotOwner::Row(row)) => Some(*row),
            _ => None,
        }
    }

    /// True if the original table had no non-empty cells.
    pub fn is_empty(&self) -> bool {
        self.bounds.iter().all(|b| *b == SlotOwner::Unowned)
    }

    /// Returns the value the original table held at `(row, col)`.
    ///
    /// Cells that were empty in the original table yield the empty sentinel.
    /// Fails with [`ErrorKind::OutOfRange`] if either coordinate falls
    /// outside the original table's extent; callers that want the sentinel
    /// even then can use `lookup(row, col).unwrap_or(empty_value)`.
    pub fn lookup(&self, row: usize, col: usize) -> Result<i64, Error> {
        if row >= self.orig_rows || col >= self.orig_cols {
            return Err(Error::new(
                ErrorKind::OutOfRange,
                "coordinates outside the original table",
            )
            .with_context("rows", self.orig_rows)
            .with_context("cols", self.orig_cols)
            .with_context("row", row)
            .with_context("col", col));
        }
        let slot = self.row_displacement[row] + col;
        match self.bounds[slot] {
            SlotOwner::Row(owner) if owner == row => Ok(self.entries[slot]),
            _ => Ok(self.empty_value),
        }
    }

    pub(crate) fn bounds(&self) -> &[SlotOwner] {
        &self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompressedTable {
        // Packed form of the 2x3 table [[0, 7, 0], [0, 0, 0]] with
        // displacement 0 for both rows.
        CompressedTable::from_parts(
            2,
            3,
            0,
            vec![0, 7, 0],
            vec![SlotOwner::Unowned, SlotOwner::Row(0), SlotOwner::Unowned],
            vec![0, 0],
        )
    }

    #[test]
    fn test_lookup_owned_slot() {
        assert_eq!(sample().lookup(0, 1).unwrap(), 7);
    }

    #[test]
    fn test_lookup_unowned_slot_yields_sentinel() {
        let compressed = sample();
        assert_eq!(compressed.lookup(0, 0).unwrap(), 0);
        // Row 1 shares displacement 0 but owns nothing, including the slot
        // that row 0 claimed.
        assert_eq!(compressed.lookup(1, 1).unwrap(), 0);
    }

    #[test]
    fn test_lookup_out_of_range() {
        let compressed = sample();
        assert_eq!(compressed.lookup(2, 0).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(compressed.lookup(0, 3).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_owner_accessor() {
        let compressed = sample();
        assert_eq!(compressed.owner(1), Some(0));
        assert_eq!(compressed.owner(0), None);
        assert_eq!(compressed.owner(99), None);
    }
}
