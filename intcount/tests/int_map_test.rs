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

use googletest::assert_that;
use googletest::prelude::eq;
use intcount::entry::Entry;
use intcount::error::ErrorKind;
use intcount::map::IntIntMap;
use intcount::map::IntLongMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

const MAX_INT: i64 = i32::MAX as i64;

fn pairs<V: Copy>(entries: &[Entry<V>]) -> Vec<(i32, V)> {
    entries.iter().map(|e| (e.key(), e.value())).collect()
}

#[test]
fn test_random_insert() {
    let size = 100_000;
    let mut rng = StdRng::seed_from_u64(17);
    let mut expected = vec![0i64; size];

    let mut map = IntLongMap::new();
    for i in 0..size {
        let k: i64 = rng.random_range(0..size as i64);
        map.put(i as i32, k * MAX_INT).unwrap();
        expected[i] = k * MAX_INT;
    }

    assert_eq!(map.len(), size);
    for i in 0..size {
        assert_eq!(map.get(i as i32), expected[i]);
        assert!(map.contains_key(i as i32));
    }
}

#[test]
fn test_random_update() {
    let size = 100_000;
    let mut rng = StdRng::seed_from_u64(29);
    let mut expected = vec![0i64; size];

    let mut map = IntLongMap::new();
    for i in 0..size {
        let k: i64 = rng.random_range(0..size as i64);
        map.put(i as i32, k + MAX_INT).unwrap();
        expected[i] = k + MAX_INT;
    }
    assert_eq!(map.len(), size);

    for i in 0..size {
        map.put(i as i32, expected[i] + MAX_INT).unwrap();
    }
    assert_eq!(map.len(), size);

    for i in 0..size {
        assert_eq!(map.get(i as i32), expected[i] + MAX_INT);
        assert!(map.contains_key(i as i32));
    }
}

#[test]
fn test_random_remove_keeps_other_keys_reachable() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut map = IntIntMap::new();
    let mut reference = std::collections::HashMap::new();
    for _ in 0..50_000 {
        let key = rng.random_range(-2_000..2_000);
        if rng.random_bool(0.3) {
            let expected = reference.remove(&key).unwrap_or(0);
            assert_eq!(map.remove(key), expected);
        } else {
            let value = rng.random_range(-100..100);
            map.put(key, value).unwrap();
            reference.insert(key, value);
        }
    }
    assert_eq!(map.len(), reference.len());
    for key in -2_000..2_000 {
        assert_eq!(map.get(key), reference.get(&key).copied().unwrap_or(0));
        assert_eq!(map.contains_key(key), reference.contains_key(&key));
    }
}

#[test]
fn test_basic() {
    let mut map = IntLongMap::new();
    map.put(1, MAX_INT + 5).unwrap();
    map.put(2, MAX_INT + 22).unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(1), MAX_INT + 5);

    assert_eq!(map.remove(1), MAX_INT + 5);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(1), 0);
    assert!(!map.contains_key(1));
    assert_eq!(map.get(2), MAX_INT + 22);

    assert_eq!(map.remove(1), 0);
    assert_eq!(map.len(), 1);
}

#[test]
fn test_zero_is_a_stored_value() {
    let mut map = IntIntMap::new();
    map.put(4, 0).unwrap();
    assert!(map.contains_key(4));
    assert_eq!(map.get(4), 0);
    assert_eq!(map.len(), 1);
}

#[test]
fn test_plus() {
    let mut m1 = IntLongMap::new();
    m1.put(1, MAX_INT + 5).unwrap();
    m1.put(2, MAX_INT + 22).unwrap();
    m1.put(i32::MAX, MAX_INT).unwrap();

    let mut m2 = IntLongMap::new();
    m2.put(1, 4).unwrap();
    m2.put(3, MAX_INT + 5).unwrap();
    m2.put(i32::MAX, MAX_INT).unwrap();

    m1.plus(&m2).unwrap();

    assert_eq!(m1.len(), 4);
    assert_eq!(m1.get(1), MAX_INT + 9);
    assert_eq!(m1.get(2), MAX_INT + 22);
    assert_eq!(m1.get(3), MAX_INT + 5);
    assert_eq!(m1.get(i32::MAX), 2 * MAX_INT);
    assert_eq!(m2.len(), 3);
}

#[test]
fn test_plus_into_empty_copies_everything() {
    let mut source = IntIntMap::new();
    for key in 0..1_000 {
        source.put(key, key * 2).unwrap();
    }
    let mut target = IntIntMap::new();
    target.plus(&source).unwrap();
    assert_eq!(target, source);
}

#[test]
fn test_plus_overflow_is_reported() {
    let mut m1 = IntIntMap::new();
    m1.put(1, i32::MAX).unwrap();
    let mut m2 = IntIntMap::new();
    m2.put(1, 1).unwrap();
    m2.put(2, 1).unwrap();

    let err = m1.plus(&m2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Overflow);
    assert_eq!(m1.len(), 1);
    assert_eq!(m1.get(1), i32::MAX);
    assert!(!m1.contains_key(2));
}

#[test]
fn test_dot() {
    let mut m1 = IntLongMap::new();
    m1.put(1, 2).unwrap();
    m1.put(2, 1).unwrap();
    m1.put(3, 3).unwrap();
    m1.put(i32::MAX, MAX_INT).unwrap();

    let mut m2 = IntLongMap::new();
    m2.put(1, 1).unwrap();
    m2.put(2, 4).unwrap();
    m2.put(4, 5).unwrap();
    m2.put(i32::MAX, MAX_INT).unwrap();

    let s = m1.dot(&m2).unwrap();
    assert!(s > MAX_INT);
    assert_eq!(s, MAX_INT * MAX_INT + 6);
    assert_eq!(m2.dot(&m1).unwrap(), s);
}

#[test]
fn test_dot_widens_int_values() {
    let mut m1 = IntIntMap::new();
    m1.put(1, i32::MAX).unwrap();
    m1.put(2, i32::MIN).unwrap();
    let mut m2 = IntIntMap::new();
    m2.put(1, i32::MAX).unwrap();
    m2.put(2, i32::MIN).unwrap();
    m2.put(3, 9).unwrap();

    let expected = MAX_INT * MAX_INT + (i32::MIN as i64) * (i32::MIN as i64);
    assert_eq!(m1.dot(&m2).unwrap(), expected);
    assert_eq!(m2.dot(&m1).unwrap(), expected);
}

#[test]
fn test_dot_overflow_is_reported() {
    let mut m1 = IntLongMap::new();
    m1.put(1, i64::MAX).unwrap();
    let mut m2 = IntLongMap::new();
    m2.put(1, 2).unwrap();
    assert_eq!(m1.dot(&m2).unwrap_err().kind(), ErrorKind::Overflow);
}

#[test]
fn test_dot_disjoint_is_zero() {
    let mut m1 = IntIntMap::new();
    m1.put(1, 5).unwrap();
    let mut m2 = IntIntMap::new();
    m2.put(2, 5).unwrap();
    assert_eq!(m1.dot(&m2).unwrap(), 0);
    assert_eq!(IntIntMap::new().dot(&m1).unwrap(), 0);
}

#[test]
fn test_increment() {
    let mut map = IntLongMap::new();
    assert_eq!(map.get(1), 0);

    map.increment(1, 1).unwrap();
    assert_eq!(map.get(1), 1);

    map.increment(1, 1).unwrap();
    map.increment(2, 0).unwrap();
    map.increment(3, -1).unwrap();

    assert_eq!(map.get(1), 2);
    assert_eq!(map.get(2), 0);
    assert_eq!(map.get(3), -1);

    map.increment(i32::MAX, MAX_INT).unwrap();
    assert_eq!(map.get(i32::MAX), MAX_INT);

    map.increment_by_one(i32::MAX).unwrap();
    assert_eq!(map.get(i32::MAX), 1 + MAX_INT);
}

#[test]
fn test_increment_overflow_is_reported() {
    let mut map = IntIntMap::new();
    map.put(7, i32::MAX - 1).unwrap();
    assert_eq!(map.increment_by_one(7).unwrap(), i32::MAX);
    let err = map.increment_by_one(7).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Overflow);
    assert_eq!(map.get(7), i32::MAX);
}

#[test]
fn test_decrement() {
    let mut map = IntIntMap::new();
    map.increment(1, 5).unwrap();
    assert_eq!(map.decrement(1, 2).unwrap(), 3);
    assert_eq!(map.get(1), 3);

    assert_eq!(map.decrement(1, 3).unwrap(), 0);
    assert!(!map.contains_key(1));
    assert!(map.is_empty());

    let err = map.decrement(1, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Underflow);
    assert!(map.is_empty());

    map.increment(2, 1).unwrap();
    assert_eq!(map.decrement(2, 4).unwrap(), 0);
    assert!(!map.contains_key(2));
}

#[test]
fn test_sorted_entries_1() {
    let mut map = IntLongMap::new();
    map.put(1, 5).unwrap();
    map.put(2, 2).unwrap();
    map.put(3, 3).unwrap();
    map.put(4, 3).unwrap();
    map.put(5, 1).unwrap();

    let entries = map.entries_sorted_by_value();
    assert_eq!(pairs(&entries), vec![(1, 5), (3, 3), (4, 3), (2, 2), (5, 1)]);
}

#[test]
fn test_sorted_entries_2() {
    let mut map = IntLongMap::new();
    map.put(1, 5).unwrap();
    map.put(2, 2).unwrap();
    map.put(3, 3).unwrap();
    map.put(4, 3).unwrap();
    map.put(5, 1).unwrap();

    let entries = map.top_k_by_value(2);
    assert_eq!(pairs(&entries), vec![(1, 5), (3, 3)]);
}

#[test]
fn test_sorted_entries_3() {
    let mut map = IntLongMap::new();
    map.put(1, 5).unwrap();
    map.put(2, 2).unwrap();

    let entries = map.top_k_by_value(5);
    assert_eq!(pairs(&entries), vec![(1, 5), (2, 2)]);
}

#[test]
fn test_sorted_entries_4() {
    let map = IntLongMap::new();
    assert!(map.entries_sorted_by_value().is_empty());
    assert!(map.top_k_by_value(3).is_empty());
}

#[test]
fn test_top_k_by_value_on_large_map() {
    let mut map = IntIntMap::new();
    for key in 0..10_000 {
        map.put(key, key % 100).unwrap();
    }
    let top = map.top_k_by_value(5);
    assert_eq!(
        pairs(&top),
        vec![(99, 99), (199, 99), (299, 99), (399, 99), (499, 99)]
    );
    assert_eq!(top, map.entries_sorted_by_value()[..5]);
}

#[test]
fn test_iteration_is_restartable() {
    let map = IntIntMap::try_from_entries((0..100).map(|key| (key, key * key))).unwrap();
    let first: Vec<_> = map.iter().collect();
    let second: Vec<_> = (&map).into_iter().collect();
    assert_eq!(first, second);
    assert_that!(map.iter().len(), eq(100));

    let mut sorted = first.clone();
    sorted.sort();
    for (i, entry) in sorted.iter().enumerate() {
        assert_eq!(entry.key(), i as i32);
        assert_eq!(entry.value(), (i * i) as i32);
    }

    let mut keys: Vec<_> = map.keys().collect();
    keys.sort_unstable();
    assert_eq!(keys, (0..100).collect::<Vec<_>>());
    let value_sum: i32 = map.values().sum();
    assert_that!(value_sum, eq((0..100).map(|k| k * k).sum::<i32>()));
}

#[test]
fn test_try_from_entries_last_wins() {
    let map = IntLongMap::try_from_entries([(1, 1), (2, 2), (1, 3)]).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(1), 3);
}

#[test]
fn test_reserve_and_clear() {
    let mut map = IntIntMap::new();
    map.reserve(1_000).unwrap();
    assert!(map.capacity() >= 1_000);
    for key in 0..1_000 {
        map.put(key, 1).unwrap();
    }
    assert!(map.capacity() >= 1_000);
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.get(10), 0);
    assert_eq!(map.reserve(usize::MAX).unwrap_err().kind(), ErrorKind::CapacityExceeded);
}
