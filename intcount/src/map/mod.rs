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

//! Hash maps from `i32` keys to primitive integer values.
//!
//! # Overview
//!
//! [`IntMap`] stores keys and values unboxed in parallel arrays and resolves collisions with
//! linear probing. It is meant for accumulating counts over very many distinct integer keys
//! inside a single task, where a boxed map would spend most of its time allocating.
//!
//! * Reading an absent key yields zero; absence is never an error.
//! * The table doubles before its load would exceed 3/4, and deletion shifts later cluster
//!   members back instead of leaving tombstones.
//! * Arithmetic is checked: [`IntMap::increment`], [`IntMap::plus`] and [`IntMap::dot`] report
//!   overflow instead of wrapping, and never leave the map half-updated.
//! * Maps built in separate shards can be combined with [`IntMap::plus`].
//!
//! Two instantiations cover the supported value widths: [`IntIntMap`] and [`IntLongMap`].
//!
//! # Examples
//!
//! ```
//! # use intcount::map::IntLongMap;
//! let mut map = IntLongMap::new();
//! map.put(1, i32::MAX as i64 + 5).unwrap();
//! map.increment(2, 3).unwrap();
//! map.increment(2, 4).unwrap();
//! assert_eq!(map.get(2), 7);
//! assert_eq!(map.get(3), 0);
//!
//! let top = map.top_k_by_value(1);
//! assert_eq!(top[0].key(), 1);
//! ```
//!
//! # Serialization
//!
//! ```
//! # use intcount::codec::BinaryCodec;
//! # use intcount::map::IntIntMap;
//! let mut map = IntIntMap::new();
//! map.put(7, 42).unwrap();
//!
//! let bytes = map.serialize();
//! assert_eq!(bytes, vec![0u8, 0, 0, 1, 0, 0, 0, 7, 0, 0, 0, 42]);
//! let decoded = IntIntMap::deserialize(&bytes).unwrap();
//! assert_eq!(decoded, map);
//! ```

mod int_map;
mod value;

pub use self::int_map::IntMap;
pub use self::int_map::Iter;
pub use self::value::MapValue;

/// Map from `i32` keys to `i32` values.
pub type IntIntMap = IntMap<i32>;

/// Map from `i32` keys to `i64` values.
pub type IntLongMap = IntMap<i64>;
