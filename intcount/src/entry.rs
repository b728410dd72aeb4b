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

//! Entry pairs reported by maps and distributions, and the orders they can be sorted in.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::io::Read;
use std::io::Write;

use crate::codec::BinaryCodec;
use crate::codec::ByteReader;
use crate::codec::ByteWriter;
use crate::codec::assert::insufficient_data;
use crate::error::Error;
use crate::map::MapValue;

/// A `(key, value)` observation.
///
/// Entries are snapshots: mutating the map they came from does not affect them. The natural
/// order compares keys first and values second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Entry<V> {
    key: i32,
    value: V,
}

/// An entry of an `i32` valued structure.
pub type PairOfInts = Entry<i32>;

/// An entry of an `i64` valued structure.
pub type PairOfIntLong = Entry<i64>;

impl<V: Copy> Entry<V> {
    /// Creates a new entry.
    pub fn new(key: i32, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key (the left element).
    pub fn key(&self) -> i32 {
        self.key
    }

    /// Returns the value (the right element).
    pub fn value(&self) -> V {
        self.value
    }
}

impl<V> From<(i32, V)> for Entry<V> {
    fn from((key, value): (i32, V)) -> Self {
        Self { key, value }
    }
}

impl<V> From<Entry<V>> for (i32, V) {
    fn from(entry: Entry<V>) -> Self {
        (entry.key, entry.value)
    }
}

impl<V: MapValue> BinaryCodec for Entry<V> {
    fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), Error> {
        ByteWriter::new(writer)
            .write_i32_be(self.key)
            .map_err(Error::io)?;
        self.value.write_be(writer).map_err(Error::io)
    }

    fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self, Error> {
        let key = ByteReader::new(reader)
            .read_i32_be()
            .map_err(insufficient_data("entry key"))?;
        let value = V::read_be(reader).map_err(insufficient_data("entry value"))?;
        Ok(Self { key, value })
    }

    fn serialized_size_bytes(&self) -> usize {
        4 + V::WIDTH
    }
}

/// Total orders over entries.
///
/// Orders on the value break ties by ascending key, so every order is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Ascending by key (the left element).
    ByKeyAscending,
    /// Descending by key (the left element).
    ByKeyDescending,
    /// Ascending by value (the right element), ties by ascending key.
    ByValueAscending,
    /// Descending by value (the right element), ties by ascending key.
    ByValueDescending,
}

impl Order {
    /// Compares two entries under this order.
    pub fn compare<V: Ord>(self, a: &Entry<V>, b: &Entry<V>) -> Ordering {
        match self {
            Order::ByKeyAscending => a.key.cmp(&b.key),
            Order::ByKeyDescending => b.key.cmp(&a.key),
            Order::ByValueAscending => a.value.cmp(&b.value).then(a.key.cmp(&b.key)),
            Order::ByValueDescending => b.value.cmp(&a.value).then(a.key.cmp(&b.key)),
        }
    }

    /// Sorts `entries` in place under this order.
    ///
    /// Keys are unique within a map, so an unstable sort yields the same result as a stable one.
    pub fn sort<V: Ord>(self, entries: &mut [Entry<V>]) {
        entries.sort_unstable_by(|a, b| self.compare(a, b));
    }
}

/// Selects the first `k` entries under `order` from `entries`.
///
/// When `k` is small relative to the input, a bounded max-heap keeps the `k` best entries seen
/// so far, which is `O(n log k)` instead of a full sort.
pub(crate) fn top_k<V, I>(entries: I, order: Order, k: usize) -> Vec<Entry<V>>
where
    V: Ord + Copy,
    I: ExactSizeIterator<Item = Entry<V>>,
{
    if k == 0 {
        return vec![];
    }
    if k >= entries.len() {
        let mut all: Vec<_> = entries.collect();
        order.sort(&mut all);
        return all;
    }

    // The heap's maximum is the worst entry kept so far under `order`.
    struct Ranked<V> {
        entry: Entry<V>,
        order: Order,
    }
    impl<V: Ord> PartialEq for Ranked<V> {
        fn eq(&self, other: &Self) -> bool {
            self.cmp(other) == Ordering::Equal
        }
    }
    impl<V: Ord> Eq for Ranked<V> {}
    impl<V: Ord> PartialOrd for Ranked<V> {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl<V: Ord> Ord for Ranked<V> {
        fn cmp(&self, other: &Self) -> Ordering {
            self.order.compare(&self.entry, &other.entry)
        }
    }

    let mut heap = BinaryHeap::with_capacity(k + 1);
    for entry in entries {
        if heap.len() < k {
            heap.push(Ranked { entry, order });
            continue;
        }
        let replaces_worst = heap
            .peek()
            .is_some_and(|worst| order.compare(&entry, &worst.entry) == Ordering::Less);
        if replaces_worst {
            heap.pop();
            heap.push(Ranked { entry, order });
        }
    }
    heap.into_sorted_vec()
        .into_iter()
        .map(|ranked| ranked.entry)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(i32, i64)]) -> Vec<Entry<i64>> {
        pairs.iter().copied().map(Entry::from).collect()
    }

    #[test]
    fn test_natural_order_is_key_first() {
        let mut list = entries(&[(3, 1), (1, 9), (2, 4), (1, 2)]);
        list.sort();
        let keys: Vec<_> = list.iter().map(|e| (e.key(), e.value())).collect();
        assert_eq!(keys, vec![(1, 2), (1, 9), (2, 4), (3, 1)]);
    }

    #[test]
    fn test_value_orders_break_ties_by_ascending_key() {
        let mut list = entries(&[(5, 2), (1, 5), (4, 2), (3, 5), (6, 1), (2, 5)]);
        Order::ByValueDescending.sort(&mut list);
        let keys: Vec<_> = list.iter().map(Entry::key).collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5, 6]);

        Order::ByValueAscending.sort(&mut list);
        let keys: Vec<_> = list.iter().map(Entry::key).collect();
        assert_eq!(keys, vec![6, 4, 5, 1, 2, 3]);
    }

    #[test]
    fn test_top_k_matches_prefix_of_full_sort() {
        let list = entries(&[
            (10, 7),
            (-3, 7),
            (4, 1),
            (8, 9),
            (0, 3),
            (2, 7),
            (7, 3),
        ]);
        for order in [
            Order::ByKeyAscending,
            Order::ByKeyDescending,
            Order::ByValueAscending,
            Order::ByValueDescending,
        ] {
            let mut full = list.clone();
            order.sort(&mut full);
            for k in 0..=list.len() + 1 {
                let top = top_k(list.iter().copied(), order, k);
                assert_eq!(top, full[..k.min(list.len())], "order {order:?}, k {k}");
            }
        }
    }
}
