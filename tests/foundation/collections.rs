//! Integration tests for persistent collections
//!
//! Tests `PVec` immutability and structural sharing.

use phrasebook_foundation::PVec;

fn items<T: Copy>(v: &PVec<T>) -> Vec<T> {
    v.iter().copied().collect()
}

#[test]
fn vector_empty() {
    let v: PVec<u32> = PVec::new();
    assert!(v.is_empty());
    assert_eq!(v.len(), 0);
    assert_eq!(v.iter().next(), None);
}

#[test]
fn vector_push_back() {
    let v = PVec::new().push_back(1).push_back(2);
    assert_eq!(v.len(), 2);
    assert_eq!(items(&v), vec![1, 2]);
}

#[test]
fn vector_immutability() {
    let v1 = PVec::new().push_back("a");
    let v2 = v1.push_back("b");

    // v1 is unchanged
    assert_eq!(items(&v1), vec!["a"]);
    assert_eq!(items(&v2), vec!["a", "b"]);
}

#[test]
fn vector_branches_share_a_prefix() {
    let base: PVec<u32> = (0..1000).collect();
    let left = base.push_back(1000);
    let right = base.push_back(2000);

    assert_eq!(base.len(), 1000);
    assert_eq!(left.iter().last(), Some(&1000));
    assert_eq!(right.iter().last(), Some(&2000));
    assert!(left.iter().zip(right.iter()).take(1000).all(|(l, r)| l == r));
}

#[test]
fn vector_equality_and_iteration() {
    let a: PVec<u32> = (1..=3).collect();
    let b = PVec::new().push_back(1).push_back(2).push_back(3);
    assert_eq!(a, b);
    assert_eq!((&a).into_iter().sum::<u32>(), 6);
    assert_eq!(a.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
}
