#![cfg(test)]

use super::*;
use crate::collections::tree::Unbalanced;

#[test]
fn test_insert_reports_new_items() {
    let mut set = TreeSet::new();
    assert!(set.insert("a"));
    assert!(set.insert("b"));
    assert!(
        !set.insert("a"),
        "Inserting a duplicate should report that the item was already present."
    );

    assert_eq!(set.len(), 2);
    assert!(set.is_valid());
}

#[test]
fn test_construction_paths_for_both_modes() {
    // An unannotated new() must infer the red-black default.
    let mut inferred = TreeSet::new();
    assert!(inferred.insert(1));

    let explicit: TreeSet<u32, Unbalanced> = TreeSet::default();
    assert!(explicit.is_empty());
}

#[test]
fn test_iteration_is_ordered() {
    let set: TreeSet<u32> = [8, 3, 5, 1, 9, 2].into();

    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 5, 8, 9]);
    assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 2, 3, 5, 8, 9]);
}

#[test]
fn test_remove_and_contains() {
    let mut set: TreeSet<u32> = (0..10).collect();

    assert!(set.contains(&4));
    assert_eq!(set.remove(&4), Some(4));
    assert!(!set.contains(&4));
    assert_eq!(set.remove(&4), None);
    assert_eq!(set.len(), 9);
    assert!(set.is_valid());
}

#[test]
fn test_first_and_last() {
    let mut set: TreeSet<u32> = [5, 1, 9, 3].into();

    assert_eq!(set.first(), Some(&1));
    assert_eq!(set.last(), Some(&9));
    assert_eq!(set.take_first(), Some(1));
    assert_eq!(set.take_last(), Some(9));
    assert_eq!(set.len(), 2);

    set.clear();
    assert_eq!(set.first(), None);
    assert_eq!(set.take_last(), None);
}

#[test]
fn test_set_algebra_iterators() {
    let a: TreeSet<u32> = [1, 2, 3, 4].into();
    let b: TreeSet<u32> = [3, 4, 5, 6].into();

    assert_eq!(a.difference(&b).copied().collect::<Vec<_>>(), [1, 2]);
    assert_eq!(a.intersection(&b).copied().collect::<Vec<_>>(), [3, 4]);
    assert_eq!(
        a.union(&b).copied().collect::<TreeSet<u32>>(),
        [1, 2, 3, 4, 5, 6].into()
    );
    assert_eq!(
        a.symmetric_difference(&b).copied().collect::<TreeSet<u32>>(),
        [1, 2, 5, 6].into()
    );
}

#[test]
fn test_set_operators() {
    let a: TreeSet<u32> = [1, 2, 3].into();
    let b: TreeSet<u32> = [3, 4].into();

    assert_eq!(&a | &b, [1, 2, 3, 4].into());
    assert_eq!(&a & &b, [3].into());
    assert_eq!(&a ^ &b, [1, 2, 4].into());
    assert_eq!(&a - &b, [1, 2].into());

    let mut c = a.clone();
    c |= b.clone();
    assert_eq!(c, [1, 2, 3, 4].into());

    let mut c = a.clone();
    c &= b.clone();
    assert_eq!(c, [3].into());

    let mut c = a.clone();
    c ^= b.clone();
    assert_eq!(c, [1, 2, 4].into());

    let mut c = a.clone();
    c -= b.clone();
    assert_eq!(c, [1, 2].into());
}

#[test]
fn test_subset_and_superset() {
    let small: TreeSet<u32> = [2, 3].into();
    let large: TreeSet<u32> = [1, 2, 3, 4].into();
    let other: TreeSet<u32> = [2, 9].into();

    assert!(small.is_subset(&large));
    assert!(large.is_superset(&small));
    assert!(!small.is_subset(&other));
    assert!(TreeSet::<u32>::new().is_subset(&small));
}

#[test]
fn test_balancing_applies_to_sets() {
    let balanced: TreeSet<u32> = (0..1000).collect();
    assert!(balanced.is_valid());
    assert!(balanced.height() <= 20);

    let unbalanced: TreeSet<u32, Unbalanced> = (0..100).collect();
    assert!(unbalanced.is_valid());
    assert_eq!(unbalanced.height(), 100);
}

#[test]
fn test_display_lists_items_in_order() {
    let set: TreeSet<u32> = [3, 1, 2].into();

    assert_eq!(format!("{set}"), "{1, 2, 3}");
    assert_eq!(format!("{}", TreeSet::<u32>::new()), "{}");
}
