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

//! Crate-private byte codec used by the compressed-table wire format.
//!
//! Only the widths the format needs are provided; all multi-byte values are
//! little-endian.

use std::io;
use std::io::{Cursor, Read};

/// A growable byte buffer with typed little-endian writers.
pub(crate) struct TableBytes {
    bytes: Vec<u8>,
}

impl TableBytes {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn write(&mut self, buf: &[u8]) {
        self.bytes.extend_from_slice(buf);
    }

    pub fn write_u8(&mut self, n: u8) {
        self.bytes.push(n);
    }

    pub fn write_u64_le(&mut self, n: u64) {
        self.write(&n.to_le_bytes());
    }

    pub fn write_i64_le(&mut self, n: i64) {
        self.write(&n.to_le_bytes());
    }
}

/// A cursor over a byte slice with typed little-endian readers.
pub(crate) struct TableSlice<'a> {
    slice: Cursor<&'a [u8]>,
}

impl TableSlice<'_> {
    pub fn new(slice: &[u8]) -> TableSlice<'_> {
        TableSlice {
            slice: Cursor::new(slice),
        }
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.slice.read_exact(buf)
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u64_le(&mut self) -> io::Result<u64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    pub fn read_i64_le(&mut self) -> io::Result<i64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(i64::from_le_bytes(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_roundtrip() {
        let mut bytes = TableBytes::with_capacity(32);
        bytes.write_u8(0x2a);
        bytes.write_u64_le(u64::MAX - 1);
        bytes.write_i64_le(-17);
        let buf = bytes.into_bytes();

        let mut cursor = TableSlice::new(&buf);
        assert_eq!(cursor.read_u8().unwrap(), 0x2a);
        assert_eq!(cursor.read_u64_le().unwrap(), u64::MAX - 1);
        assert_eq!(cursor.read_i64_le().unwrap(), -17);
        assert!(cursor.read_u8().is_err());
    }
}
