//! Differential tests: every operation is mirrored on a
//! `BTreeMap<K, usize>` and the two must agree after each step.

use counted_btree::CountedBTree;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

fn assert_matches_reference(tree: &CountedBTree<u32>, reference: &BTreeMap<u32, usize>) {
    assert_eq!(tree.len(), reference.len());
    let items: Vec<(u32, usize)> = tree.iter().map(|(k, c)| (*k, c)).collect();
    let expected: Vec<(u32, usize)> = reference.iter().map(|(k, c)| (*k, *c)).collect();
    assert_eq!(items, expected);
}

fn run_mixed_workload(degree: usize, ops: usize, key_space: u32, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree = CountedBTree::new(degree).unwrap();
    let mut reference: BTreeMap<u32, usize> = BTreeMap::new();
    let mut inserts = 0u64;

    for step in 0..ops {
        let key = rng.gen_range(0..key_space);
        match rng.gen_range(0..10) {
            0..=5 => {
                let is_new = tree.insert(key);
                let count = reference.entry(key).or_insert(0);
                assert_eq!(is_new, *count == 0, "step {}: insert {}", step, key);
                *count += 1;
                inserts += 1;
            }
            6..=8 => {
                let removed = tree.remove(&key);
                let expected = match reference.get_mut(&key) {
                    Some(count) if *count > 1 => {
                        *count -= 1;
                        true
                    }
                    Some(_) => {
                        reference.remove(&key);
                        true
                    }
                    None => false,
                };
                assert_eq!(removed, expected, "step {}: remove {}", step, key);
            }
            _ => {
                assert_eq!(
                    tree.search(&key),
                    reference.get(&key).copied(),
                    "step {}: search {}",
                    step,
                    key
                );
            }
        }

        if let Err(e) = tree.validate() {
            panic!("step {}: invariants violated: {}", step, e);
        }
    }

    assert_matches_reference(&tree, &reference);
    assert_eq!(tree.total_insertions(), inserts);
    assert_eq!(tree.total_count(), reference.values().sum::<usize>());

    // Drain everything; the tree must end as one empty leaf.
    let keys: Vec<u32> = reference.keys().copied().collect();
    for key in keys {
        let count = reference[&key];
        for _ in 0..count {
            assert!(tree.remove(&key));
        }
        assert!(!tree.remove(&key));
        assert!(tree.check_invariants());
    }
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.node_count(), 1);
}

macro_rules! mixed_workload_tests {
    ($($degree:literal),*) => {
        paste::paste! {
            $(
                #[test]
                fn [<test_mixed_workload_degree_ $degree>]() {
                    run_mixed_workload($degree, 4000, 300, 0xB7EE + $degree);
                }
            )*
        }
    };
}

mixed_workload_tests!(2, 3, 4, 7, 16, 50);

#[test]
fn test_descending_and_interleaved_orders() {
    for degree in [2, 3, 5] {
        let mut tree = CountedBTree::new(degree).unwrap();
        let mut reference = BTreeMap::new();

        for k in (0..500u32).rev() {
            tree.insert(k);
            *reference.entry(k).or_insert(0) += 1;
        }
        // Remove odd keys from the middle outwards.
        for k in (0..250u32).rev().chain(250..500).filter(|k| k % 2 == 1) {
            assert!(tree.remove(&k));
            reference.remove(&k);
        }
        assert!(tree.check_invariants());
        assert_matches_reference(&tree, &reference);
    }
}

#[test]
fn test_remove_all_matches_reference() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut tree = CountedBTree::new(4).unwrap();
    let mut reference: BTreeMap<u32, usize> = BTreeMap::new();

    for _ in 0..3000 {
        let key = rng.gen_range(0..200);
        tree.insert(key);
        *reference.entry(key).or_insert(0) += 1;
    }

    for key in (0..200).step_by(3) {
        assert_eq!(tree.remove_all(&key), reference.remove(&key));
        assert!(tree.check_invariants());
    }
    assert_matches_reference(&tree, &reference);
}
