//! Tests for the XOR metric and contact ranking.

use primitive_types::U256;
use proptest::collection::vec;
use proptest::prelude::*;

use super::*;
use crate::domain::{Contact, Distance, Guid, RoutingError};

#[test]
fn test_distance_of_identical_ids_is_zero() {
    assert!(distance("aaaa", "aaaa").unwrap().is_zero());
    assert!(distance("a".repeat(256), "a".repeat(256)).unwrap().is_zero());
    assert!(!distance("abcd", "dcba").unwrap().is_zero());
}

#[test]
fn test_distance_matches_known_values() {
    assert_eq!(distance("2", "3").unwrap().to_u128(), Some(1));
    assert_eq!(distance("2", "8").unwrap().to_u128(), Some(10));
    assert_eq!(
        distance("aaaaaaaa", "zzzzzzzz").unwrap().to_u128(),
        Some(1_953_184_666_628_070_171)
    );
}

#[test]
fn test_distance_is_symmetric() {
    assert_eq!(
        distance("aaaa", "bbbb").unwrap(),
        distance("bbbb", "aaaa").unwrap()
    );
}

#[test]
fn test_distance_rejects_length_mismatch() {
    assert_eq!(
        distance("aaaa", "aaa"),
        Err(RoutingError::IdLengthMismatch { left: 4, right: 3 })
    );
}

#[test]
fn test_distance_is_representation_invariant() {
    let baseline = distance("a", "b").unwrap();

    assert_eq!(distance(String::from("a"), "b").unwrap(), baseline);
    assert_eq!(distance("a", String::from("b")).unwrap(), baseline);
    assert_eq!(distance(Guid::new("a"), "b").unwrap(), baseline);
    assert_eq!(distance("a", Guid::new("b")).unwrap(), baseline);
    assert_eq!(distance(b"a".as_slice(), b"b".as_slice()).unwrap(), baseline);
    assert_eq!(
        distance(Contact::from("a"), Contact::from("b")).unwrap(),
        baseline
    );
}

#[test]
fn test_closest_contacts_ranks_and_truncates() {
    let candidates = vec![
        (U256::from(8u32), Contact::from(vec![8u8])),
        (U256::from(1u32), Contact::from(vec![1u8])),
        (U256::from(3u32), Contact::from(vec![3u8])),
    ];

    let closest = closest_contacts(candidates, U256::zero(), 2);
    assert_eq!(
        closest,
        vec![Contact::from(vec![1u8]), Contact::from(vec![3u8])]
    );
}

#[test]
fn test_closest_contacts_measures_from_target() {
    let candidates = vec![
        (U256::from(0u32), Contact::from(vec![0u8])),
        (U256::from(7u32), Contact::from(vec![7u8])),
    ];

    // 7 xor 7 = 0, 0 xor 7 = 7
    let closest = closest_contacts(candidates, U256::from(7u32), 2);
    assert_eq!(
        closest,
        vec![Contact::from(vec![7u8]), Contact::from(vec![0u8])]
    );
}

fn equal_length_pairs() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (1usize..64).prop_flat_map(|len| (vec(any::<u8>(), len), vec(any::<u8>(), len)))
}

proptest! {
    #[test]
    fn prop_distance_to_self_is_zero(id in vec(any::<u8>(), 1..64)) {
        prop_assert!(distance(id.clone(), id).unwrap().is_zero());
    }

    #[test]
    fn prop_distance_is_symmetric((a, b) in equal_length_pairs()) {
        prop_assert_eq!(
            distance(a.clone(), b.clone()).unwrap(),
            distance(b, a).unwrap()
        );
    }

    #[test]
    fn prop_distance_zero_implies_equal((a, b) in equal_length_pairs()) {
        let d = distance(a.clone(), b.clone()).unwrap();
        prop_assert_eq!(d == Distance::from(0u128), a == b);
    }
}
