#![cfg(test)]

use super::*;
use crate::collections::tree::Unbalanced;

#[test]
fn test_insert_and_in_order_iteration() {
    let mut map = TreeMap::new();
    for key in [5, 3, 7, 1, 9] {
        map.insert(key, key * 10);
    }

    assert_eq!(map.len(), 5);
    assert!(map.is_valid());
    assert_eq!(
        map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
        [(1, 10), (3, 30), (5, 50), (7, 70), (9, 90)],
        "In-order iteration should visit keys in ascending order regardless of insertion order."
    );
}

#[test]
fn test_construction_paths_for_both_modes() {
    // An unannotated new() must infer the red-black default.
    let mut inferred = TreeMap::new();
    inferred.insert(1, "default mode");
    assert!(inferred.is_valid());

    let explicit: TreeMap<u32, &str, Unbalanced> = TreeMap::default();
    assert!(explicit.is_empty());
}

#[test]
fn test_borrowed_keys_and_values() {
    // K and V borrow from different locals, so the node accessors have to hand each out under its
    // own lifetime.
    let keys = [String::from("b"), String::from("a"), String::from("c")];
    let values = [String::from("beta"), String::from("alpha"), String::from("gamma")];

    let mut map: TreeMap<&str, &str> = TreeMap::new();
    for (key, value) in keys.iter().zip(&values) {
        map.insert(key, value);
    }

    assert_eq!(map.get("a"), Some(&"alpha"));
    assert_eq!(map.first_entry(), Some((&"a", &"alpha")));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
}

#[test]
fn test_duplicate_insert_overwrites_in_place() {
    let mut map = TreeMap::new();
    assert_eq!(map.insert("key", 1), None);
    assert_eq!(
        map.insert("key", 2),
        Some(1),
        "Inserting an existing key should return the previous value."
    );

    assert_eq!(map.len(), 1, "Inserting an existing key should never grow the map.");
    assert_eq!(map.get("key"), Some(&2));
    assert!(map.is_valid());
}

#[test]
fn test_remove_leaf_one_child_and_two_children() {
    let mut map = TreeMap::new();
    for key in [50, 30, 70, 20, 40, 60, 80] {
        map.insert(key, ());
    }
    assert!(map.is_valid());

    // 20 is a leaf.
    assert_eq!(map.remove(&20), Some(()));
    assert_eq!(map.len(), 6);
    assert!(!map.contains(&20));
    assert!(map.is_valid());

    // 30 now has a single child (40).
    assert_eq!(map.remove(&30), Some(()));
    assert_eq!(map.len(), 5);
    assert!(map.is_valid());

    // 70 has two children; its in-order successor (80) takes its place.
    assert_eq!(map.remove(&70), Some(()));
    assert_eq!(map.len(), 4);
    assert!(!map.contains(&70));
    assert!(map.contains(&80));
    assert!(map.is_valid());

    assert_eq!(map.remove(&70), None, "Removing a missing key is not an error.");
    assert_eq!(map.len(), 4);
}

#[test]
fn test_checked_access_on_missing_key() {
    let mut map: TreeMap<u32, &str> = TreeMap::new();
    map.insert(1, "one");

    assert!(map.try_at(&999).is_err());
    assert_eq!(map.len(), 1, "A failed lookup should leave the map untouched.");
    assert_eq!(*map.at(&1), "one");
    assert_eq!(map[&1], "one");
}

#[test]
#[should_panic(expected = "Key not found")]
fn test_at_panics_on_missing_key() {
    let map: TreeMap<u32, u32> = TreeMap::new();
    map.at(&999);
}

#[test]
fn test_ascending_inserts_stay_balanced() {
    let mut map = TreeMap::new();
    for key in 0..1000 {
        map.insert(key, key);
    }

    assert_eq!(map.len(), 1000);
    assert!(map.is_valid());
    // 2 * ceil(log2(1001)) = 20.
    assert!(
        map.height() <= 20,
        "A red-black tree with 1000 entries should have height <= 20, found {}.",
        map.height()
    );
    assert!(map.iter().map(|(k, _)| *k).eq(0..1000));
}

#[test]
fn test_unbalanced_mode_degenerates_into_a_list() {
    let mut map: TreeMap<u32, (), Unbalanced> = TreeMap::default();
    for key in 0..100 {
        map.insert(key, ());
    }

    assert_eq!(
        map.height(),
        100,
        "Sequential insertion into an unbalanced tree should produce a height-n list."
    );
    assert!(map.is_valid());

    let mut balanced: TreeMap<u32, ()> = TreeMap::new();
    for key in 0..100 {
        balanced.insert(key, ());
    }
    // 2 * ceil(log2(101)) = 14.
    assert!(balanced.height() <= 14);
}

#[test]
fn test_invariants_hold_after_every_operation() {
    // 73 and 31 are coprime with 199, so these index maps are permutations of 0..199.
    let mut map = TreeMap::new();
    for i in 0..199_u32 {
        let key = (i * 73) % 199;
        map.insert(key, i);
        assert!(map.is_valid(), "Invariants broken after inserting {key}.");
        assert_eq!(map.len(), i as usize + 1);
    }
    assert!(map.black_height().is_some());

    for i in 0..199_u32 {
        let key = (i * 31) % 199;
        assert!(map.remove(&key).is_some());
        assert!(map.is_valid(), "Invariants broken after removing {key}.");
        assert_eq!(map.len(), 198 - i as usize);
    }
    assert!(map.is_empty());
}

#[test]
fn test_insert_remove_round_trip_restores_the_empty_tree() {
    let mut map = TreeMap::new();
    map.insert(42, "answer");
    assert_eq!(map.remove(&42), Some("answer"));

    assert!(map.is_empty());
    assert!(map.is_valid());
    assert_eq!(map.first_entry(), None);
    assert_eq!(map.height(), 0);
}

#[test]
fn test_unbalanced_remove_replaces_nodes_without_touching_keys() {
    let mut map: TreeMap<u32, u32, Unbalanced> = TreeMap::default();
    for key in [50, 30, 70, 20, 40, 60, 80] {
        map.insert(key, key);
    }

    // The root has two children; its successor node (60) is moved into its place.
    assert_eq!(map.remove(&50), Some(50));
    assert_eq!(map.len(), 6);
    assert!(map.is_valid());
    assert_eq!(
        map.keys().copied().collect::<Vec<_>>(),
        [20, 30, 40, 60, 70, 80]
    );
}

#[test]
fn test_get_or_insert_default_counts() {
    let mut counts: TreeMap<&str, u32> = TreeMap::new();
    for word in ["the", "cat", "the", "hat", "the"] {
        *counts.get_or_insert_default(word) += 1;
    }

    assert_eq!(counts.len(), 3);
    assert_eq!(counts.get("the"), Some(&3));
    assert_eq!(counts.get("cat"), Some(&1));
    assert_eq!(counts.get("hat"), Some(&1));
}

#[test]
fn test_clone_is_a_deep_copy() {
    let mut map: TreeMap<u32, String> = (0..50).map(|i| (i, i.to_string())).collect();
    let clone = map.clone();

    assert_eq!(map, clone);
    assert!(clone.is_valid());

    map.insert(100, "new".into());
    map.remove(&0);
    assert_eq!(clone.len(), 50, "Mutating the original should never affect the clone.");
    assert_eq!(clone.get(&0), Some(&String::from("0")));
    assert!(clone.is_valid());
}

#[test]
fn test_first_and_last_access() {
    let mut map = TreeMap::new();
    assert_eq!(map.first_entry(), None);
    assert_eq!(map.last_entry(), None);
    assert_eq!(map.take_first_entry(), None);

    for key in [4, 2, 8, 1, 6] {
        map.insert(key, key * 2);
    }

    assert_eq!(map.first_entry(), Some((&1, &2)));
    assert_eq!(map.last_entry(), Some((&8, &16)));

    assert_eq!(map.take_first_entry(), Some((1, 2)));
    assert_eq!(map.take_last_entry(), Some((8, 16)));
    assert_eq!(map.len(), 3);
    assert!(map.is_valid());
}

#[test]
fn test_owned_iteration_is_ordered() {
    let map: TreeMap<u32, u32> = [(3, 30), (1, 10), (2, 20)].into();

    assert_eq!(
        map.into_iter().collect::<Vec<_>>(),
        [(1, 10), (2, 20), (3, 30)]
    );
}

#[test]
fn test_iter_mut_only_exposes_values() {
    let mut map: TreeMap<u32, u32> = (0..10).map(|i| (i, i)).collect();

    for (key, value) in map.iter_mut() {
        *value = key * 2;
    }

    assert!(map.iter().all(|(k, v)| *v == k * 2));
    assert!(map.is_valid());
}

#[test]
fn test_clear_releases_everything() {
    let mut map: TreeMap<u32, u32> = (0..100).map(|i| (i, i)).collect();
    map.clear();

    assert!(map.is_empty());
    assert_eq!(map.height(), 0);
    assert!(map.is_valid());

    map.insert(1, 1);
    assert_eq!(map.len(), 1, "A cleared map should be ready for reuse.");
}

#[test]
fn test_iterator_length_reporting() {
    let map: TreeMap<u32, u32> = (0..25).map(|i| (i, i)).collect();

    let mut iter = map.iter();
    assert_eq!(iter.len(), 25);
    iter.next();
    assert_eq!(iter.len(), 24);

    assert_eq!(map.keys().len(), 25);
    assert_eq!(map.values().len(), 25);
}
