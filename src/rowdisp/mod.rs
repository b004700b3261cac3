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

//! Row-displacement compression of sparse tables.
//!
//! Row displacement is the packing technique classically used for compiler
//! parser action/goto tables: the rows of a sparse two-dimensional table are
//! overlapped into a single one-dimensional array so that no two non-empty
//! cells collide, shrinking storage toward the number of non-empty cells. A
//! parallel ownership array records which original row claims each packed
//! slot, so lookups can tell an originally-empty cell from a slot another
//! row happens to occupy.
//!
//! # Usage
//!
//! ```rust
//! use rowpack::rowdisp::RowDisplacementCompressor;
//! use rowpack::table::Table;
//!
//! let table = Table::new(
//!     vec![
//!         1, 0, 0, //
//!         0, 2, 0, //
//!         0, 0, 3, //
//!     ],
//!     3,
//! )
//! .unwrap();
//!
//! let compressed = RowDisplacementCompressor::new().compress(&table).unwrap();
//! assert_eq!(compressed.lookup(2, 2).unwrap(), 3);
//! assert_eq!(compressed.lookup(2, 0).unwrap(), 0);
//! ```
//!
//! # Notes
//!
//! - Placement is a greedy densest-first heuristic: fast and deterministic,
//!   not guaranteed minimal.
//! - A [`CompressedTable`] is immutable; recompress to reflect any change in
//!   the source table.

mod compressed;
mod compressor;
mod serialization;

pub use self::compressed::CompressedTable;
pub use self::compressed::SlotOwner;
pub use self::compressor::RowDisplacementCompressor;
pub use self::serialization::MAX_BOUNDS_INDEX;
pub use self::serialization::UNOWNED_SLOT;
