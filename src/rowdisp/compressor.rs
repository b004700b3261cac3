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
use crate::rowdisp::compressed::CompressedTable;
use crate::rowdisp::compressed::SlotOwner;
use crate::table::Table;

/// Compresses sparse tables by overlapping their rows into a single packed
/// array.
///
/// Rows are placed densest-first at the lowest offset where none of their
/// non-empty columns collide with an already-placed value. The output layout
/// is deterministic for a given input table.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowDisplacementCompressor;

/// Per-row occupancy gathered in one pass over the table.
struct RowProfile {
    row: usize,
    non_empty_count: usize,
    non_empty_cols: Vec<usize>,
}

impl RowDisplacementCompressor {
    pub fn new() -> Self {
        Self
    }

    /// Packs `table` into a [`CompressedTable`].
    ///
    /// Every `(row, col)` lookup on the result reproduces exactly the value
    /// the original table held there. Fails with [`ErrorKind::EmptyTable`] if
    /// the table somehow carries no entries; [`Table`] construction already
    /// rules that out.
    pub fn compress(&self, table: &Table) -> Result<CompressedTable, Error> {
        if table.entries().is_empty() {
            return Err(Error::new(
                ErrorKind::EmptyTable,
                "cannot compress a table with no entries",
            ));
        }

        let num_rows = table.num_rows();
        let row_len = table.num_cols();
        let empty_value = table.empty_value();
        let total = table.entries().len();

        let mut profiles: Vec<RowProfile> = (0..num_rows)
            .map(|row| RowProfile {
                row,
                non_empty_count: 0,
                non_empty_cols: Vec::new(),
            })
            .collect();
        for (pos, &value) in table.entries().iter().enumerate() {
            if value != empty_value {
                let profile = &mut profiles[pos / row_len];
                profile.non_empty_count += 1;
                profile.non_empty_cols.push(pos % row_len);
            }
        }

        // Densest rows are the hardest to place, so they claim low offsets
        // first. The sort must be stable: ties keep original row order, which
        // makes the output layout deterministic.
        profiles.sort_by(|a, b| b.non_empty_count.cmp(&a.non_empty_count));

        // The original size is an upper bound on the packed extent: the
        // cursor advances at most once per placed row, so no displacement can
        // exceed the number of rows already placed.
        let mut entries = vec![empty_value; total];
        let mut bounds = vec![SlotOwner::Unowned; total];
        let mut row_displacement = vec![0usize; num_rows];
        let mut packed_extent = row_len;

        let mut cursor = 0usize;
        for profile in &profiles {
            if profile.non_empty_count == 0 {
                // Nothing to place. The row's displacement stays 0 and every
                // lookup in it fails the ownership check, resolving to empty.
                continue;
            }
            loop {
                let collides = profile
                    .non_empty_cols
                    .iter()
                    .any(|&col| bounds[cursor + col] != SlotOwner::Unowned);
                if collides {
                    // The whole row moves as a unit; retry from its first
                    // column at the next offset.
                    cursor += 1;
                    continue;
                }
                row_displacement[profile.row] = cursor;
                for &col in &profile.non_empty_cols {
                    entries[cursor + col] = table.entries()[profile.row * row_len + col];
                    bounds[cursor + col] = SlotOwner::Row(profile.row);
                }
                packed_extent = packed_extent.max(cursor + row_len);
                cursor += 1;
                break;
            }
        }

        entries.truncate(packed_extent);
        bounds.truncate(packed_extent);

        Ok(CompressedTable::from_parts(
            num_rows,
            row_len,
            empty_value,
            entries,
            bounds,
            row_displacement,
        ))
    }
}
