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

//! Open-addressed hash map from `i32` keys to primitive integer values.
//!
//! Keys, values and per-slot states live in three parallel arrays. A state of zero marks an
//! empty slot; any other state is the 1-based distance of the entry from its home slot. The
//! distance lets deletion shift later members of a cluster back into the freed slot, so the
//! table never needs tombstones.

use std::fmt;
use std::io::Read;
use std::io::Write;
use std::iter::FusedIterator;

use crate::codec::BinaryCodec;
use crate::codec::ByteReader;
use crate::codec::ByteWriter;
use crate::codec::PREALLOCATE_LIMIT;
use crate::codec::assert::ensure_entry_count_valid;
use crate::codec::assert::ensure_key_unique;
use crate::codec::assert::insufficient_data;
use crate::entry::Entry;
use crate::entry::Order;
use crate::entry::top_k;
use crate::error::Error;
use crate::hash::mix_i32;
use crate::map::MapValue;

const LOAD_FACTOR_NUMERATOR: usize = 3;
const LOAD_FACTOR_DENOMINATOR: usize = 4;
const LG_MIN_LENGTH: u8 = 3;
const LG_DEFAULT_LENGTH: u8 = 4;
const LG_MAX_LENGTH: u8 = 30;

/// Hash map from `i32` keys to `i32` or `i64` values with no per-entry allocation.
///
/// Absent keys read as zero. Zero is nevertheless a valid stored value: occupancy is tracked
/// by slot state, not by a sentinel value.
///
/// See [`crate::map`] for an overview.
#[derive(Clone)]
pub struct IntMap<V> {
    lg_length: u8,
    load_threshold: usize,
    keys: Vec<i32>,
    values: Vec<V>,
    states: Vec<u32>,
    num_active: usize,
}

impl<V: MapValue> Default for IntMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: MapValue> IntMap<V> {
    /// Creates an empty map with the default number of slots.
    pub fn new() -> Self {
        Self::with_lg_length(LG_DEFAULT_LENGTH)
    }

    /// Creates an empty map that holds `expected_entries` without growing.
    ///
    /// Requests beyond the maximum table size are clamped to it.
    pub fn with_capacity(expected_entries: usize) -> Self {
        Self::with_lg_length(lg_length_for(expected_entries).unwrap_or(LG_MAX_LENGTH))
    }

    /// Builds a map from `(key, value)` pairs; later pairs overwrite earlier ones.
    pub fn try_from_entries<I>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (i32, V)>,
    {
        let entries = entries.into_iter();
        let mut map = Self::with_capacity(entries.size_hint().0);
        for (key, value) in entries {
            map.put(key, value)?;
        }
        Ok(map)
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.num_active
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.num_active == 0
    }

    /// Returns the number of entries the map holds before it has to grow.
    pub fn capacity(&self) -> usize {
        self.load_threshold
    }

    /// Returns the value for `key`, or zero if the key is not present.
    pub fn get(&self, key: i32) -> V {
        match self.find(key) {
            (probe, true) => self.values[probe],
            (_, false) => V::ZERO,
        }
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: i32) -> bool {
        self.find(key).1
    }

    /// Associates `value` with `key`, replacing any previous value.
    pub fn put(&mut self, key: i32, value: V) -> Result<(), Error> {
        match self.find(key) {
            (probe, true) => {
                self.values[probe] = value;
                Ok(())
            }
            (_, false) => self.insert_new(key, value),
        }
    }

    /// Removes `key`, returning its value or zero if it was absent.
    pub fn remove(&mut self, key: i32) -> V {
        match self.find(key) {
            (probe, true) => {
                let value = self.values[probe];
                self.delete_slot(probe);
                value
            }
            (_, false) => V::ZERO,
        }
    }

    /// Adds one to the value of `key`, inserting it if absent.
    pub fn increment_by_one(&mut self, key: i32) -> Result<V, Error> {
        self.increment(key, V::ONE)
    }

    /// Adds `delta` to the value of `key`, inserting it if absent, and returns the new value.
    ///
    /// Fails with [`ErrorKind::Overflow`](crate::error::ErrorKind::Overflow) without changing
    /// the map if the sum does not fit.
    pub fn increment(&mut self, key: i32, delta: V) -> Result<V, Error> {
        match self.find(key) {
            (probe, true) => {
                let updated = self.values[probe]
                    .checked_add(delta)
                    .ok_or_else(|| overflow(key, "increment"))?;
                self.values[probe] = updated;
                Ok(updated)
            }
            (_, false) => {
                self.insert_new(key, delta)?;
                Ok(delta)
            }
        }
    }

    /// Subtracts `delta` from the value of `key` and returns the value now stored.
    ///
    /// The key must be present, otherwise this fails with
    /// [`ErrorKind::Underflow`](crate::error::ErrorKind::Underflow). A result of zero or less
    /// removes the key, exactly as if it had been removed, and zero is returned.
    pub fn decrement(&mut self, key: i32, delta: V) -> Result<V, Error> {
        let (probe, found) = self.find(key);
        if !found {
            return Err(Error::key_not_found(key));
        }
        let updated = self.values[probe]
            .checked_sub(delta)
            .ok_or_else(|| overflow(key, "decrement"))?;
        if updated > V::ZERO {
            self.values[probe] = updated;
            Ok(updated)
        } else {
            self.delete_slot(probe);
            Ok(V::ZERO)
        }
    }

    /// Adds every entry of `other` into this map.
    ///
    /// Values of shared keys are summed and keys only in `other` are copied. The whole merge
    /// is checked for overflow and capacity up front, so a failure leaves this map unchanged.
    pub fn plus(&mut self, other: &Self) -> Result<(), Error> {
        let mut new_keys = 0usize;
        for entry in other.iter() {
            match self.find(entry.key()) {
                (probe, true) => {
                    self.values[probe]
                        .checked_add(entry.value())
                        .ok_or_else(|| overflow(entry.key(), "plus"))?;
                }
                (_, false) => new_keys += 1,
            }
        }
        self.reserve(new_keys)?;
        for entry in other.iter() {
            match self.find(entry.key()) {
                (probe, true) => {
                    self.values[probe] = self.values[probe]
                        .checked_add(entry.value())
                        .ok_or_else(|| overflow(entry.key(), "plus"))?;
                }
                (_, false) => self.insert_vacant(entry.key(), entry.value()),
            }
        }
        Ok(())
    }

    /// Returns the sum of `self[key] * other[key]` over the keys present in both maps.
    ///
    /// Products and the sum are accumulated in `i64`.
    pub fn dot(&self, other: &Self) -> Result<i64, Error> {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut sum = 0i64;
        for entry in small.iter() {
            let (probe, found) = large.find(entry.key());
            if !found {
                continue;
            }
            sum = entry
                .value()
                .to_i64()
                .checked_mul(large.values[probe].to_i64())
                .and_then(|product| sum.checked_add(product))
                .ok_or_else(|| overflow(entry.key(), "dot"))?;
        }
        Ok(sum)
    }

    /// Returns all entries sorted by value descending, ties broken by ascending key.
    ///
    /// An empty map yields an empty vector.
    pub fn entries_sorted_by_value(&self) -> Vec<Entry<V>> {
        self.sorted_entries(Order::ByValueDescending)
    }

    /// Returns at most `k` entries with the largest values, in the order of
    /// [`IntMap::entries_sorted_by_value`].
    pub fn top_k_by_value(&self, k: usize) -> Vec<Entry<V>> {
        self.sorted_entries_top_k(Order::ByValueDescending, k)
    }

    /// Returns all entries sorted under `order`.
    pub fn sorted_entries(&self, order: Order) -> Vec<Entry<V>> {
        let mut entries: Vec<_> = self.iter().collect();
        order.sort(&mut entries);
        entries
    }

    /// Returns the first `k` entries under `order`.
    pub fn sorted_entries_top_k(&self, order: Order, k: usize) -> Vec<Entry<V>> {
        top_k(self.iter(), order, k)
    }

    /// Returns an iterator over the entries in table order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            map: self,
            index: 0,
            remaining: self.num_active,
        }
    }

    /// Returns an iterator over the keys in table order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = i32> + '_ {
        self.iter().map(|entry| entry.key())
    }

    /// Returns an iterator over the values in table order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = V> + '_ {
        self.iter().map(|entry| entry.value())
    }

    /// Ensures `additional` more entries fit without growing.
    pub fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        let needed = self
            .num_active
            .checked_add(additional)
            .ok_or_else(|| Error::capacity_exceeded(1 << LG_MAX_LENGTH))?;
        if needed <= self.load_threshold {
            return Ok(());
        }
        let lg_length =
            lg_length_for(needed).ok_or_else(|| Error::capacity_exceeded(1 << LG_MAX_LENGTH))?;
        self.resize(lg_length);
        Ok(())
    }

    /// Removes all entries, keeping the allocated table.
    pub fn clear(&mut self) {
        self.states.fill(0);
        self.num_active = 0;
    }

    /// Returns the largest number of entries any map can hold.
    pub(crate) fn max_entries() -> usize {
        load_threshold_for(LG_MAX_LENGTH)
    }

    fn with_lg_length(lg_length: u8) -> Self {
        let length = 1usize << lg_length;
        Self {
            lg_length,
            load_threshold: load_threshold_for(lg_length),
            keys: vec![0; length],
            values: vec![V::ZERO; length],
            states: vec![0; length],
            num_active: 0,
        }
    }

    #[inline]
    fn mask(&self) -> usize {
        (1usize << self.lg_length) - 1
    }

    /// Returns the slot holding `key` and `true`, or the empty slot ending its probe sequence
    /// and `false`.
    fn find(&self, key: i32) -> (usize, bool) {
        let mask = self.mask();
        let mut probe = (mix_i32(key) as usize) & mask;
        while self.states[probe] != 0 {
            if self.keys[probe] == key {
                return (probe, true);
            }
            probe = (probe + 1) & mask;
        }
        (probe, false)
    }

    fn insert_new(&mut self, key: i32, value: V) -> Result<(), Error> {
        if self.num_active >= self.load_threshold {
            self.reserve(1)?;
        }
        self.insert_vacant(key, value);
        Ok(())
    }

    /// Inserts a key known to be absent. Capacity must already be ensured by the caller.
    fn insert_vacant(&mut self, key: i32, value: V) {
        let mask = self.mask();
        let mut probe = (mix_i32(key) as usize) & mask;
        let mut drift: u32 = 1;
        while self.states[probe] != 0 {
            probe = (probe + 1) & mask;
            drift += 1;
        }
        self.keys[probe] = key;
        self.values[probe] = value;
        self.states[probe] = drift;
        self.num_active += 1;
    }

    fn delete_slot(&mut self, mut delete_probe: usize) {
        self.states[delete_probe] = 0;
        self.num_active -= 1;
        let mask = self.mask();
        let mut drift: u32 = 1;
        let mut probe = (delete_probe + 1) & mask;
        while self.states[probe] != 0 {
            if self.states[probe] > drift {
                self.keys[delete_probe] = self.keys[probe];
                self.values[delete_probe] = self.values[probe];
                self.states[delete_probe] = self.states[probe] - drift;
                self.states[probe] = 0;
                drift = 0;
                delete_probe = probe;
            }
            probe = (probe + 1) & mask;
            drift += 1;
        }
    }

    fn resize(&mut self, lg_length: u8) {
        let length = 1usize << lg_length;
        let old_keys = std::mem::replace(&mut self.keys, vec![0; length]);
        let old_values = std::mem::replace(&mut self.values, vec![V::ZERO; length]);
        let old_states = std::mem::replace(&mut self.states, vec![0; length]);
        tracing::debug!(
            old_slots = old_states.len(),
            new_slots = length,
            num_active = self.num_active,
            "Resizing int map table."
        );
        self.lg_length = lg_length;
        self.load_threshold = load_threshold_for(lg_length);
        self.num_active = 0;
        for i in 0..old_states.len() {
            if old_states[i] > 0 {
                self.insert_vacant(old_keys[i], old_values[i]);
            }
        }
    }
}

impl<V: MapValue> PartialEq for IntMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|entry| {
                let (probe, found) = other.find(entry.key());
                found && other.values[probe] == entry.value()
            })
    }
}

impl<V: MapValue> Eq for IntMap<V> {}

impl<V: MapValue> fmt::Debug for IntMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|entry| (entry.key(), entry.value())))
            .finish()
    }
}

impl<'a, V: MapValue> IntoIterator for &'a IntMap<V> {
    type Item = Entry<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of an [`IntMap`] in table order.
pub struct Iter<'a, V> {
    map: &'a IntMap<V>,
    index: usize,
    remaining: usize,
}

impl<V: MapValue> Iterator for Iter<'_, V> {
    type Item = Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        while self.map.states[self.index] == 0 {
            self.index += 1;
        }
        let entry = Entry::new(self.map.keys[self.index], self.map.values[self.index]);
        self.index += 1;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V: MapValue> ExactSizeIterator for Iter<'_, V> {}

impl<V: MapValue> FusedIterator for Iter<'_, V> {}

impl<V: MapValue> BinaryCodec for IntMap<V> {
    fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), Error> {
        ByteWriter::new(writer)
            .write_i32_be(self.num_active as i32)
            .map_err(Error::io)?;
        for entry in self.iter() {
            entry.write_to(writer)?;
        }
        Ok(())
    }

    fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self, Error> {
        let count = ByteReader::new(reader)
            .read_i32_be()
            .map_err(insufficient_data("entry count"))?;
        let count = ensure_entry_count_valid(count, Self::max_entries())?;
        let mut map = Self::with_capacity(count.min(PREALLOCATE_LIMIT));
        for _ in 0..count {
            let entry = Entry::<V>::read_from(reader)?;
            ensure_key_unique(map.contains_key(entry.key()), entry.key())?;
            map.put(entry.key(), entry.value())?;
        }
        Ok(map)
    }

    fn serialized_size_bytes(&self) -> usize {
        4 + self.num_active * (4 + V::WIDTH)
    }
}

fn load_threshold_for(lg_length: u8) -> usize {
    (1usize << lg_length) * LOAD_FACTOR_NUMERATOR / LOAD_FACTOR_DENOMINATOR
}

/// Returns the smallest table size (log2) whose load threshold admits `entries`.
fn lg_length_for(entries: usize) -> Option<u8> {
    (LG_MIN_LENGTH..=LG_MAX_LENGTH).find(|lg| load_threshold_for(*lg) >= entries)
}

fn overflow(key: i32, operation: &'static str) -> Error {
    Error::overflow(format!("{operation} overflowed the value width")).with_context("key", key)
}
