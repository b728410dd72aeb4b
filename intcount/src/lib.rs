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

//! # intcount
//!
//! Compact containers for counting integer-keyed events.
//!
//! * [`map`]: open-addressed hash maps from `i32` keys to `i32` or `i64` values, with checked
//!   increments, merging, dot products and top-k extraction by value.
//! * [`frequencies`]: exact frequency distributions layered on those maps, tracking the number of
//!   events and the sum of counts.
//! * [`codec`]: the shared big-endian wire format.
//!
//! All structures are single-owner accumulators. To count in parallel, give every task its own
//! instance and merge them afterwards with `plus`.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]

pub mod codec;
pub mod entry;
pub mod error;
pub mod frequencies;
pub mod map;

mod hash;
