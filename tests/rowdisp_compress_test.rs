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

use rowpack::error::ErrorKind;
use rowpack::rowdisp::CompressedTable;
use rowpack::rowdisp::RowDisplacementCompressor;
use rowpack::table::Table;

fn assert_roundtrip(entries: Vec<i64>, row_len: usize, empty_value: i64) -> CompressedTable {
    let table = Table::builder(entries, row_len)
        .empty_value(empty_value)
        .build()
        .unwrap();
    let compressed = RowDisplacementCompressor::new().compress(&table).unwrap();

    assert!(
        compressed.packed_len() <= table.num_rows() * table.num_cols(),
        "packed length {} exceeds original size",
        compressed.packed_len()
    );
    for row in 0..table.num_rows() {
        for col in 0..table.num_cols() {
            assert_eq!(
                compressed.lookup(row, col).unwrap(),
                table.get(row, col).unwrap(),
                "mismatch at ({row}, {col})"
            );
        }
    }
    compressed
}

#[test]
fn test_roundtrip_diagonal() {
    let compressed = assert_roundtrip(
        vec![
            1, 0, 0, //
            0, 1, 0, //
            0, 0, 1, //
        ],
        3,
        0,
    );
    assert!(compressed.packed_len() < 9);
}

#[test]
fn test_roundtrip_shared_first_column() {
    assert_roundtrip(
        vec![
            1, 0, 0, //
            1, 0, 0, //
            1, 0, 0, //
        ],
        3,
        0,
    );
}

#[test]
fn test_roundtrip_lower_triangular() {
    assert_roundtrip(
        vec![
            1, 0, 0, //
            1, 1, 0, //
            1, 1, 1, //
        ],
        3,
        0,
    );
}

#[test]
fn test_roundtrip_dense_worst_case() {
    let compressed = assert_roundtrip(vec![1; 9], 3, 0);
    // No overlap is possible; the packed form is exactly the original.
    assert_eq!(compressed.packed_len(), 9);
}

#[test]
fn test_all_empty_table() {
    let compressed = assert_roundtrip(vec![0; 12], 4, 0);
    assert!(compressed.is_empty());
    assert_eq!(compressed.packed_len(), 4);
    assert_eq!(compressed.row_displacement(), &[0, 0, 0]);
}

#[test]
fn test_single_occupied_row_among_empties() {
    let compressed = assert_roundtrip(
        vec![
            0, 0, 0, 0, //
            0, 3, 0, 4, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
        ],
        4,
        0,
    );
    assert_eq!(compressed.packed_len(), 4);
    assert_eq!(compressed.lookup(1, 1).unwrap(), 3);
    assert_eq!(compressed.lookup(0, 1).unwrap(), 0);
    assert_eq!(compressed.lookup(3, 3).unwrap(), 0);
}

#[test]
fn test_roundtrip_custom_sentinel() {
    // -1 marks empty, so 0 is ordinary data and must round-trip.
    assert_roundtrip(
        vec![
            0, 1, -1, //
            -1, -1, 0, //
            -1, -1, 1, //
        ],
        3,
        -1,
    );
}

#[test]
fn test_roundtrip_wide_sparse_table() {
    let row_len = 16;
    let num_rows = 24;
    let mut entries = vec![0i64; row_len * num_rows];
    // One value per row, drifting across columns.
    for row in 0..num_rows {
        entries[row * row_len + (row * 5) % row_len] = (row + 1) as i64;
    }
    let compressed = assert_roundtrip(entries, row_len, 0);
    assert!(compressed.packed_len() < row_len * num_rows);
}

#[test]
fn test_lookup_out_of_range() {
    let table = Table::new(vec![1, 0, 0, 2], 2).unwrap();
    let compressed = RowDisplacementCompressor::new().compress(&table).unwrap();

    let err = compressed.lookup(2, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    let err = compressed.lookup(0, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);

    // Callers that ignore the error still get a safe default.
    assert_eq!(
        compressed.lookup(5, 5).unwrap_or(compressed.empty_value()),
        0
    );
}

#[test]
fn test_deterministic_output() {
    let entries = vec![
        0, 2, 0, 0, 5, //
        1, 0, 0, 0, 0, //
        0, 0, 3, 0, 0, //
        0, 2, 0, 0, 5, //
    ];
    let table = Table::new(entries, 5).unwrap();
    let compressor = RowDisplacementCompressor::new();
    let first = compressor.compress(&table).unwrap();
    let second = compressor.compress(&table).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.serialize(), second.serialize());
}

#[test]
fn test_dimensions_and_sentinel_carried() {
    let table = Table::builder(vec![9, -1, -1, -1, -1, -1], 3)
        .empty_value(-1)
        .build()
        .unwrap();
    let compressed = RowDisplacementCompressor::new().compress(&table).unwrap();
    assert_eq!(compressed.num_rows(), 2);
    assert_eq!(compressed.num_cols(), 3);
    assert_eq!(compressed.empty_value(), -1);
}
