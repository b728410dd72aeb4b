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

//! Exact frequency distribution over `i32` events.

use std::fmt;
use std::io::Read;
use std::io::Write;

use crate::codec::BinaryCodec;
use crate::entry::Entry;
use crate::entry::Order;
use crate::error::Error;
use crate::map::IntMap;
use crate::map::Iter;
use crate::map::MapValue;

/// Counts of `i32` events, with the number of events and the sum of counts kept up to date.
///
/// Every stored count is positive: an event whose count reaches zero is removed.
///
/// See [`crate::frequencies`] for an overview.
#[derive(Clone)]
pub struct FrequencyDistribution<V> {
    counts: IntMap<V>,
    sum_of_counts: i64,
}

impl<V: MapValue> Default for FrequencyDistribution<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: MapValue> FrequencyDistribution<V> {
    /// Creates an empty distribution.
    pub fn new() -> Self {
        Self {
            counts: IntMap::new(),
            sum_of_counts: 0,
        }
    }

    /// Creates an empty distribution that holds `expected_events` without growing.
    pub fn with_capacity(expected_events: usize) -> Self {
        Self {
            counts: IntMap::with_capacity(expected_events),
            sum_of_counts: 0,
        }
    }

    /// Returns the count of `event`, or zero if it was never observed.
    pub fn get(&self, event: i32) -> V {
        self.counts.get(event)
    }

    /// Returns true if `event` has a positive count.
    pub fn contains(&self, event: i32) -> bool {
        self.counts.contains_key(event)
    }

    /// Returns the number of distinct events with a positive count.
    pub fn number_of_events(&self) -> usize {
        self.counts.len()
    }

    /// Returns the sum of all counts.
    pub fn sum_of_counts(&self) -> i64 {
        self.sum_of_counts
    }

    /// Returns true if no event has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the counts as a read-only map.
    pub fn as_map(&self) -> &IntMap<V> {
        &self.counts
    }

    /// Counts one occurrence of `event` and returns its new count.
    pub fn increment(&mut self, event: i32) -> Result<V, Error> {
        self.increment_by(event, V::ONE)
    }

    /// Counts `delta` occurrences of `event` and returns its new count.
    ///
    /// A `delta` of zero is a no-op. Negative deltas are rejected; use
    /// [`FrequencyDistribution::decrement_by`] instead.
    pub fn increment_by(&mut self, event: i32, delta: V) -> Result<V, Error> {
        ensure_not_negative(delta, "delta")?;
        if delta == V::ZERO {
            return Ok(self.get(event));
        }
        let sum_of_counts = self.checked_sum_add(delta.to_i64())?;
        let count = self.counts.increment(event, delta)?;
        self.sum_of_counts = sum_of_counts;
        Ok(count)
    }

    /// Removes one occurrence of `event` and returns its remaining count.
    pub fn decrement(&mut self, event: i32) -> Result<V, Error> {
        self.decrement_by(event, V::ONE)
    }

    /// Removes `delta` occurrences of `event` and returns its remaining count.
    ///
    /// Fails with [`ErrorKind::Underflow`](crate::error::ErrorKind::Underflow) if the event is
    /// absent or its count is smaller than `delta`; the distribution is left unchanged. An event
    /// whose count reaches zero is removed.
    pub fn decrement_by(&mut self, event: i32, delta: V) -> Result<V, Error> {
        ensure_not_negative(delta, "delta")?;
        if !self.counts.contains_key(event) {
            return Err(Error::underflow("event not found").with_context("event", event));
        }
        let count = self.counts.get(event);
        if delta > count {
            return Err(Error::underflow("decrement exceeds the current count")
                .with_context("event", event)
                .with_context("count", count)
                .with_context("delta", delta));
        }
        let remaining = self.counts.decrement(event, delta)?;
        self.sum_of_counts -= delta.to_i64();
        Ok(remaining)
    }

    /// Sets the count of `event` and returns the previous count.
    ///
    /// A count of zero removes the event.
    pub fn set(&mut self, event: i32, count: V) -> Result<V, Error> {
        ensure_not_negative(count, "count")?;
        let previous = self.counts.get(event);
        let sum_of_counts = self.checked_sum_add(count.to_i64() - previous.to_i64())?;
        if count == V::ZERO {
            self.counts.remove(event);
        } else {
            self.counts.put(event, count)?;
        }
        self.sum_of_counts = sum_of_counts;
        Ok(previous)
    }

    /// Returns `count(event) / sum_of_counts`.
    ///
    /// Absent events, and every event of an empty distribution, have a relative frequency of
    /// `0.0`.
    pub fn relative_frequency(&self, event: i32) -> f64 {
        if self.sum_of_counts == 0 {
            return 0.0;
        }
        self.get(event).to_f64() / self.sum_of_counts as f64
    }

    /// Returns the natural logarithm of [`FrequencyDistribution::relative_frequency`].
    ///
    /// Absent events, and every event of an empty distribution, yield [`f64::NEG_INFINITY`].
    pub fn log_relative_frequency(&self, event: i32) -> f64 {
        self.relative_frequency(event).ln()
    }

    /// Returns all `(event, count)` entries sorted under `order`.
    pub fn entries(&self, order: Order) -> Vec<Entry<V>> {
        self.counts.sorted_entries(order)
    }

    /// Returns the first `k` entries under `order`.
    ///
    /// The result is a prefix of [`FrequencyDistribution::entries`] of length
    /// `min(k, number_of_events)`.
    pub fn entries_top_k(&self, order: Order, k: usize) -> Vec<Entry<V>> {
        self.counts.sorted_entries_top_k(order, k)
    }

    /// Returns an iterator over the entries in no particular order.
    pub fn iter(&self) -> Iter<'_, V> {
        self.counts.iter()
    }

    /// Adds every count of `other` into this distribution.
    ///
    /// On failure this distribution is left unchanged.
    pub fn plus(&mut self, other: &Self) -> Result<(), Error> {
        let sum_of_counts = self.checked_sum_add(other.sum_of_counts)?;
        self.counts.plus(&other.counts)?;
        self.sum_of_counts = sum_of_counts;
        Ok(())
    }

    /// Resets to the empty distribution.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.sum_of_counts = 0;
    }

    fn checked_sum_add(&self, delta: i64) -> Result<i64, Error> {
        self.sum_of_counts
            .checked_add(delta)
            .ok_or_else(|| Error::overflow("sum of counts overflowed i64"))
    }
}

impl<V: MapValue> PartialEq for FrequencyDistribution<V> {
    fn eq(&self, other: &Self) -> bool {
        self.sum_of_counts == other.sum_of_counts && self.counts == other.counts
    }
}

impl<V: MapValue> Eq for FrequencyDistribution<V> {}

impl<V: MapValue> fmt::Debug for FrequencyDistribution<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencyDistribution")
            .field("number_of_events", &self.number_of_events())
            .field("sum_of_counts", &self.sum_of_counts)
            .field("counts", &self.counts)
            .finish()
    }
}

impl<'a, V: MapValue> IntoIterator for &'a FrequencyDistribution<V> {
    type Item = Entry<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: MapValue> BinaryCodec for FrequencyDistribution<V> {
    fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), Error> {
        self.counts.write_to(writer)
    }

    fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self, Error> {
        let counts = IntMap::<V>::read_from(reader)?;
        let mut sum_of_counts = 0i64;
        for entry in counts.iter() {
            if entry.value() <= V::ZERO {
                tracing::debug!(
                    event = entry.key(),
                    count = entry.value().to_i64(),
                    "Rejected serialized frequency distribution with non-positive count."
                );
                return Err(Error::deserial("non-positive count in serialized distribution")
                    .with_context("event", entry.key())
                    .with_context("count", entry.value()));
            }
            sum_of_counts = sum_of_counts
                .checked_add(entry.value().to_i64())
                .ok_or_else(|| Error::deserial("sum of serialized counts overflows i64"))?;
        }
        Ok(Self {
            counts,
            sum_of_counts,
        })
    }

    fn serialized_size_bytes(&self) -> usize {
        self.counts.serialized_size_bytes()
    }
}

fn ensure_not_negative<V: MapValue>(value: V, name: &'static str) -> Result<(), Error> {
    if value < V::ZERO {
        Err(Error::invalid_argument(format!("{name} must not be negative")).with_context(name, value))
    } else {
        Ok(())
    }
}
