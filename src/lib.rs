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

//! Row-displacement compression for sparse integer lookup tables.
//!
//! Given a rectangular table where most cells hold a designated empty
//! sentinel, this crate packs the rows into a one-dimensional array whose
//! size approaches the number of non-empty cells, while point lookups against
//! the original coordinates keep their exact semantics.
//!
//! Build a [`table::Table`], hand it to
//! [`rowdisp::RowDisplacementCompressor`], and query the resulting
//! [`rowdisp::CompressedTable`]:
//!
//! ```rust
//! use rowpack::rowdisp::RowDisplacementCompressor;
//! use rowpack::table::Table;
//!
//! let table = Table::new(
//!     vec![
//!         0, 4, 0, 0, //
//!         0, 0, 0, 0, //
//!         7, 0, 0, 9, //
//!     ],
//!     4,
//! )
//! .unwrap();
//!
//! let compressed = RowDisplacementCompressor::new().compress(&table).unwrap();
//! assert!(compressed.packed_len() <= 12);
//! for row in 0..table.num_rows() {
//!     for col in 0..table.num_cols() {
//!         assert_eq!(compressed.lookup(row, col).unwrap(), table.get(row, col).unwrap());
//!     }
//! }
//! ```

mod codec;
pub mod error;
pub mod rowdisp;
pub mod table;
