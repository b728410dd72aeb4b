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

use std::fmt;
use std::io;
use std::io::Read;
use std::io::Write;

use crate::codec::ByteReader;
use crate::codec::ByteWriter;

mod private {
    // Sealed trait to prevent external implementations of MapValue.
    pub trait Sealed {}
}

/// Value type stored in an [`IntMap`](crate::map::IntMap).
///
/// Implemented for `i32` and `i64`; the width also fixes the serialized value width.
pub trait MapValue: private::Sealed + Copy + Ord + Default + fmt::Debug + fmt::Display {
    /// Zero value, returned for absent keys.
    const ZERO: Self;

    /// One value for unit increments.
    const ONE: Self;

    /// Number of bytes a value occupies on the wire.
    const WIDTH: usize;

    /// Name of the type, used in error messages.
    const NAME: &'static str;

    /// Performs the + operation, returning `None` on overflow.
    fn checked_add(self, other: Self) -> Option<Self>;

    /// Performs the - operation, returning `None` on overflow.
    fn checked_sub(self, other: Self) -> Option<Self>;

    /// Widens into `i64`.
    fn to_i64(self) -> i64;


    /// Converts into `f64`.
    fn to_f64(self) -> f64;

    /// Writes the value big-endian.
    fn write_be<W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()>;

    /// Reads a big-endian value.
    fn read_be<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self>;
}

impl private::Sealed for i32 {}

impl MapValue for i32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const WIDTH: usize = 4;
    const NAME: &'static str = "i32";

    #[inline(always)]
    fn checked_add(self, other: Self) -> Option<Self> {
        i32::checked_add(self, other)
    }

    #[inline(always)]
    fn checked_sub(self, other: Self) -> Option<Self> {
        i32::checked_sub(self, other)
    }

    #[inline(always)]
    fn to_i64(self) -> i64 {
        self as i64
    }


    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn write_be<W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
        ByteWriter::new(writer).write_i32_be(self)
    }

    fn read_be<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        ByteReader::new(reader).read_i32_be()
    }
}

impl private::Sealed for i64 {}

impl MapValue for i64 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const WIDTH: usize = 8;
    const NAME: &'static str = "i64";

    #[inline(always)]
    fn checked_add(self, other: Self) -> Option<Self> {
        i64::checked_add(self, other)
    }

    #[inline(always)]
    fn checked_sub(self, other: Self) -> Option<Self> {
        i64::checked_sub(self, other)
    }

    #[inline(always)]
    fn to_i64(self) -> i64 {
        self
    }


    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn write_be<W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
        ByteWriter::new(writer).write_i64_be(self)
    }

    fn read_be<R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        ByteReader::new(reader).read_i64_be()
    }
}
