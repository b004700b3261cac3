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

//! Binary serialization for compressed tables.
//!
//! Layout, all multi-byte fields little-endian:
//!
//! | bytes        | field                                    |
//! |--------------|------------------------------------------|
//! | 0            | serial version (1)                       |
//! | 1            | family id (21)                           |
//! | 2            | flags                                    |
//! | 3            | reserved (0)                             |
//! | 4..12        | original row count (u64)                 |
//! | 12..20       | original column count (u64)              |
//! | 20..28       | packed length (u64)                      |
//! | 28..36       | empty sentinel (i64)                     |
//! | then         | packed entries, packed length × i64      |
//! | then         | slot owners, packed length × u64         |
//! | then         | row displacements, row count × u64       |
//!
//! In-memory slot ownership is a tagged variant; only on the wire is it
//! flattened to a raw integer, with [`UNOWNED_SLOT`] marking unowned slots.

use crate::codec::TableBytes;
use crate::codec::TableSlice;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::rowdisp::compressed::CompressedTable;
use crate::rowdisp::compressed::SlotOwner;

/// Serial format version.
const SERIAL_VERSION: u8 = 1;

/// Family id for row-displacement compressed tables.
const ROWDISP_FAMILY_ID: u8 = 21;

/// Flag set when the original table had no non-empty cells.
const FLAG_EMPTY: u8 = 1 << 0;

/// Preamble size in bytes, ahead of the three arrays.
const PREAMBLE_BYTES: usize = 36;

/// Wire marker for a packed slot no row owns. No legitimate row index may
/// take this value.
pub const UNOWNED_SLOT: u64 = u64::MAX;

/// Largest row index representable on the wire, one below [`UNOWNED_SLOT`].
pub const MAX_BOUNDS_INDEX: u64 = u64::MAX - 1;

impl CompressedTable {
    /// Serializes this table to its compact binary form.
    ///
    /// The produced bytes are deterministic for a given table.
    pub fn serialize(&self) -> Vec<u8> {
        let packed_len = self.packed_len();
        let size = PREAMBLE_BYTES + 8 * (2 * packed_len + self.num_rows());
        let mut bytes = TableBytes::with_capacity(size);

        bytes.write_u8(SERIAL_VERSION);
        bytes.write_u8(ROWDISP_FAMILY_ID);
        bytes.write_u8(if self.is_empty() { FLAG_EMPTY } else { 0 });
        bytes.write_u8(0);
        bytes.write_u64_le(self.num_rows() as u64);
        bytes.write_u64_le(self.num_cols() as u64);
        bytes.write_u64_le(packed_len as u64);
        bytes.write_i64_le(self.empty_value());

        for &entry in self.entries() {
            bytes.write_i64_le(entry);
        }
        for owner in self.bounds() {
            bytes.write_u64_le(match owner {
                SlotOwner::Row(row) => *row as u64,
                SlotOwner::Unowned => UNOWNED_SLOT,
            });
        }
        for &displacement in self.row_displacement() {
            bytes.write_u64_le(displacement as u64);
        }

        bytes.into_bytes()
    }

    /// Deserializes a table previously produced by [`serialize`].
    ///
    /// Fails with [`ErrorKind::MalformedDeserializeData`] on truncated input,
    /// an unknown version or family id, or data violating the packed-layout
    /// invariants (an owner that is no valid row, or a displacement reaching
    /// past the packed extent).
    ///
    /// [`serialize`]: CompressedTable::serialize
    pub fn deserialize(bytes: &[u8]) -> Result<CompressedTable, Error> {
        fn make_error(field: &'static str) -> impl FnOnce(std::io::Error) -> Error {
            move |_| Error::insufficient_data(field)
        }

        let mut cursor = TableSlice::new(bytes);
        let serial_version = cursor.read_u8().map_err(make_error("serial_version"))?;
        let family_id = cursor.read_u8().map_err(make_error("family_id"))?;
        let _flags = cursor.read_u8().map_err(make_error("flags"))?;
        let _reserved = cursor.read_u8().map_err(make_error("reserved"))?;

        if serial_version != SERIAL_VERSION {
            return Err(Error::new(
                ErrorKind::MalformedDeserializeData,
                format!("unsupported serial version {serial_version}"),
            ));
        }
        if family_id != ROWDISP_FAMILY_ID {
            return Err(Error::new(
                ErrorKind::MalformedDeserializeData,
                format!("unexpected family id {family_id}"),
            ));
        }

        let orig_rows = cursor.read_u64_le().map_err(make_error("orig_rows"))? as usize;
        let orig_cols = cursor.read_u64_le().map_err(make_error("orig_cols"))? as usize;
        let packed_len = cursor.read_u64_le().map_err(make_error("packed_len"))? as usize;
        let empty_value = cursor.read_i64_le().map_err(make_error("empty_value"))?;

        if orig_rows == 0 || orig_cols == 0 {
            return Err(Error::new(
                ErrorKind::MalformedDeserializeData,
                "table dimensions must be non-zero",
            )
            .with_context("rows", orig_rows)
            .with_context("cols", orig_cols));
        }
        if packed_len < orig_cols {
            return Err(Error::new(
                ErrorKind::MalformedDeserializeData,
                "packed length shorter than one row",
            )
            .with_context("packed_len", packed_len)
            .with_context("cols", orig_cols));
        }
        // The packed form never exceeds the original table.
        if orig_rows
            .checked_mul(orig_cols)
            .is_none_or(|total| packed_len > total)
        {
            return Err(Error::new(
                ErrorKind::MalformedDeserializeData,
                "packed length exceeds the original table size",
            )
            .with_context("packed_len", packed_len)
            .with_context("rows", orig_rows)
            .with_context("cols", orig_cols));
        }

        let mut entries = Vec::with_capacity(packed_len);
        for _ in 0..packed_len {
            entries.push(cursor.read_i64_le().map_err(make_error("entries"))?);
        }

        let mut bounds = Vec::with_capacity(packed_len);
        for _ in 0..packed_len {
            let raw = cursor.read_u64_le().map_err(make_error("bounds"))?;
            bounds.push(if raw == UNOWNED_SLOT {
                SlotOwner::Unowned
            } else if (raw as usize) < orig_rows {
                SlotOwner::Row(raw as usize)
            } else {
                return Err(Error::new(
                    ErrorKind::MalformedDeserializeData,
                    "slot owner is not a valid row",
                )
                .with_context("owner", raw)
                .with_context("rows", orig_rows));
            });
        }

        let mut row_displacement = Vec::with_capacity(orig_rows);
        for _ in 0..orig_rows {
            let displacement =
                cursor.read_u64_le().map_err(make_error("row_displacement"))? as usize;
            // packed_len >= orig_cols was checked above, so this cannot wrap.
            if displacement > packed_len - orig_cols {
                return Err(Error::new(
                    ErrorKind::MalformedDeserializeData,
                    "row displacement reaches past the packed extent",
                )
                .with_context("displacement", displacement)
                .with_context("packed_len", packed_len));
            }
            row_displacement.push(displacement);
        }

        Ok(CompressedTable::from_parts(
            orig_rows,
            orig_cols,
            empty_value,
            entries,
            bounds,
            row_displacement,
        ))
    }
}
