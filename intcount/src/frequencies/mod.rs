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

//! Exact frequency distributions over integer events.
//!
//! # Overview
//!
//! A [`FrequencyDistribution`] counts occurrences of `i32` events on top of an
//! [`IntMap`](crate::map::IntMap). Besides the per-event counts it maintains two aggregates
//! incrementally, so reading them is `O(1)`:
//!
//! * the number of events, i.e. distinct events with a positive count;
//! * the sum of counts over all events.
//!
//! From these it derives relative and log-relative frequencies, and it can list its entries in
//! any [`Order`](crate::entry::Order), optionally truncated to the first `k`.
//!
//! Decrementing is strict: decrementing an absent event, or by more than its count, fails with
//! [`ErrorKind::Underflow`](crate::error::ErrorKind::Underflow) and changes nothing. Callers that
//! want clamping should check [`FrequencyDistribution::get`] first.
//!
//! Distributions accumulated in separate shards can be combined with
//! [`FrequencyDistribution::plus`].
//!
//! # Examples
//!
//! ```
//! # use intcount::entry::Order;
//! # use intcount::frequencies::IntIntFrequencyDistribution;
//! let mut fd = IntIntFrequencyDistribution::new();
//! for event in [1, 1, 1, 2, 2, 3] {
//!     fd.increment(event).unwrap();
//! }
//! assert_eq!(fd.number_of_events(), 3);
//! assert_eq!(fd.sum_of_counts(), 6);
//!
//! fd.decrement(1).unwrap();
//! assert_eq!(fd.get(1), 2);
//! assert_eq!(fd.relative_frequency(2), 2.0 / 5.0);
//!
//! let top = fd.entries_top_k(Order::ByValueDescending, 2);
//! assert_eq!(top.iter().map(|e| e.key()).collect::<Vec<_>>(), vec![1, 2]);
//! ```
//!
//! # Serialization
//!
//! ```
//! # use intcount::codec::BinaryCodec;
//! # use intcount::frequencies::IntLongFrequencyDistribution;
//! let mut fd = IntLongFrequencyDistribution::new();
//! fd.increment_by(42, 1 << 40).unwrap();
//!
//! let bytes = fd.serialize();
//! let decoded = IntLongFrequencyDistribution::deserialize(&bytes).unwrap();
//! assert_eq!(decoded.sum_of_counts(), 1 << 40);
//! ```

mod distribution;

pub use self::distribution::FrequencyDistribution;

/// Distribution with `i32` counts.
pub type IntIntFrequencyDistribution = FrequencyDistribution<i32>;

/// Distribution with `i64` counts.
pub type IntLongFrequencyDistribution = FrequencyDistribution<i64>;
