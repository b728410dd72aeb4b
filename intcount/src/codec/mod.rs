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

//! Binary framing shared by maps, distributions and entries.
//!
//! Every structure is written as a big-endian entry count followed by that many flat
//! `(key, value)` pairs:
//!
//! ```text
//! [i32 entry_count] ([i32 key][i32 | i64 value])*
//! ```
//!
//! Only the observable contents are persisted; table layout and capacity are rebuilt on read.

pub(crate) mod assert;

use std::io;
use std::io::Read;
use std::io::Write;

use crate::error::Error;

/// Number of entries preallocated when decoding, regardless of the declared count.
///
/// The declared count is untrusted until the pairs have actually been read.
pub(crate) const PREALLOCATE_LIMIT: usize = 1 << 16;

/// A structure with a fixed big-endian wire format.
pub trait BinaryCodec: Sized {
    /// Writes the structure to `writer`.
    ///
    /// Errors from the writer are reported as [`ErrorKind::Io`](crate::error::ErrorKind::Io).
    fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), Error>;

    /// Reads one structure from `reader`, leaving it positioned right after the structure.
    ///
    /// Truncated or malformed input fails with
    /// [`ErrorKind::InvalidData`](crate::error::ErrorKind::InvalidData); nothing partially
    /// decoded is returned.
    fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self, Error>;

    /// Returns the exact number of bytes [`BinaryCodec::write_to`] produces.
    fn serialized_size_bytes(&self) -> usize;

    /// Serializes the structure into a freshly allocated byte vector.
    fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.serialized_size_bytes());
        self.write_to(&mut bytes)
            .expect("writing to a Vec<u8> never fails");
        bytes
    }

    /// Deserializes a structure that occupies the whole of `bytes`.
    ///
    /// Unlike [`BinaryCodec::read_from`], trailing bytes are rejected.
    fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let mut slice = bytes;
        let decoded = Self::read_from(&mut slice)?;
        assert::ensure_fully_consumed(slice)?;
        Ok(decoded)
    }
}

/// Sequential big-endian reader over a caller-supplied source.
pub(crate) struct ByteReader<'a, R: Read + ?Sized> {
    inner: &'a mut R,
}

impl<'a, R: Read + ?Sized> ByteReader<'a, R> {
    pub fn new(inner: &'a mut R) -> Self {
        Self { inner }
    }

    pub fn read_i32_be(&mut self) -> io::Result<i32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }

    pub fn read_i64_be(&mut self) -> io::Result<i64> {
        let mut buf = [0u8; 8];
        self.inner.read_exact(&mut buf)?;
        Ok(i64::from_be_bytes(buf))
    }
}

/// Sequential big-endian writer over a caller-supplied sink.
pub(crate) struct ByteWriter<'a, W: Write + ?Sized> {
    inner: &'a mut W,
}

impl<'a, W: Write + ?Sized> ByteWriter<'a, W> {
    pub fn new(inner: &'a mut W) -> Self {
        Self { inner }
    }

    pub fn write_i32_be(&mut self, value: i32) -> io::Result<()> {
        self.inner.write_all(&value.to_be_bytes())
    }

    pub fn write_i64_be(&mut self, value: i64) -> io::Result<()> {
        self.inner.write_all(&value.to_be_bytes())
    }
}
