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

//! Key mixing for the open-addressed tables.
//!
//! Keys are spread with the MurmurHash3 32-bit finalizer. It is a bijection on `u32`, so
//! distinct keys never collide before masking, and it scatters sequential keys (the common case
//! for event ids) across the whole table.

/// Applies the MurmurHash3 `fmix32` avalanche step to `key`.
#[inline]
pub(crate) fn mix_i32(key: i32) -> u32 {
    let mut h = key as u32;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
