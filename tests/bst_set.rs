use std::collections::BTreeSet;

use bst_map::{BstSet, Traversal};
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

/// Generates values in a range that ensures collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -20_000i64..20_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Take(i64),
    Contains(i64),
    Get(i64),
    First,
    Last,
    PopFirst,
    PopLast,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        3 => value_strategy().prop_map(SetOp::Remove),
        1 => value_strategy().prop_map(SetOp::Take),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => value_strategy().prop_map(SetOp::Get),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
        1 => Just(SetOp::PopFirst),
        1 => Just(SetOp::PopLast),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both BstSet and BTreeSet
    /// and asserts identical results at every step.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut bst: BstSet<i64> = BstSet::new();
        let mut bt: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    prop_assert_eq!(bst.insert(*v), bt.insert(*v), "insert({})", v);
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(bst.remove(v), bt.remove(v), "remove({})", v);
                }
                SetOp::Take(v) => {
                    prop_assert_eq!(bst.take(v), bt.take(v), "take({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(bst.contains(v), bt.contains(v), "contains({})", v);
                }
                SetOp::Get(v) => {
                    prop_assert_eq!(bst.get(v), bt.get(v), "get({})", v);
                }
                SetOp::First => {
                    prop_assert_eq!(bst.first(), bt.first());
                }
                SetOp::Last => {
                    prop_assert_eq!(bst.last(), bt.last());
                }
                SetOp::PopFirst => {
                    prop_assert_eq!(bst.pop_first(), bt.pop_first());
                }
                SetOp::PopLast => {
                    prop_assert_eq!(bst.pop_last(), bt.pop_last());
                }
            }
            prop_assert_eq!(bst.len(), bt.len());
        }

        prop_assert!(bst.iter().eq(bt.iter()));
    }

    #[test]
    fn iter_matches_btreeset(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let bst: BstSet<i64> = values.iter().copied().collect();
        let bt: BTreeSet<i64> = values.iter().copied().collect();

        prop_assert_eq!(bst.iter().len(), bt.len());
        prop_assert!(bst.iter().eq(bt.iter()));
        prop_assert!(bst.iter().rev().eq(bt.iter().rev()));
        prop_assert!(bst.iter_in(Traversal::Inorder).eq(bt.iter()));
        prop_assert!((&bst).into_iter().eq(&bt));
        prop_assert!(bst.into_iter().eq(bt));
    }

    #[test]
    fn retain_matches_btreeset(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let mut bst: BstSet<i64> = values.iter().copied().collect();
        let mut bt: BTreeSet<i64> = values.iter().copied().collect();
        bst.retain(|v| v % 3 != 0);
        bt.retain(|v| v % 3 != 0);
        prop_assert!(bst.iter().eq(bt.iter()));
    }

    #[test]
    fn extend_matches_btreeset(
        first in proptest::collection::vec(value_strategy(), TEST_SIZE / 2),
        second in proptest::collection::vec(value_strategy(), TEST_SIZE / 2),
    ) {
        let mut bst: BstSet<i64> = first.iter().copied().collect();
        let mut bt: BTreeSet<i64> = first.iter().copied().collect();
        bst.extend(second.iter());
        bt.extend(second.iter());
        prop_assert!(bst.iter().eq(bt.iter()));
    }

    #[test]
    fn clone_and_eq_match_btreeset(
        a in proptest::collection::vec(0i64..50, 0..40),
        b in proptest::collection::vec(0i64..50, 0..40),
    ) {
        let (bst_a, bst_b): (BstSet<i64>, BstSet<i64>) =
            (a.iter().copied().collect(), b.iter().copied().collect());
        let (bt_a, bt_b): (BTreeSet<i64>, BTreeSet<i64>) =
            (a.iter().copied().collect(), b.iter().copied().collect());

        let copy = bst_a.clone();
        prop_assert_eq!(&copy, &bst_a);
        prop_assert!(copy.iter_in(Traversal::Preorder).eq(bst_a.iter_in(Traversal::Preorder)));
        prop_assert_eq!(bst_a == bst_b, bt_a == bt_b);
    }

    #[test]
    fn height_bounds(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let bst: BstSet<i64> = values.iter().copied().collect();
        let n = isize::try_from(bst.len()).unwrap();
        prop_assert!(bst.height() <= n - 1);
        prop_assert!(bst.height() >= -1);
    }

    #[test]
    fn clear_empties_set(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let mut bst: BstSet<i64> = values.iter().copied().collect();
        bst.clear();
        prop_assert!(bst.is_empty());
        prop_assert_eq!(bst.height(), -1);
        prop_assert_eq!(bst.first(), None);
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

#[test]
fn traversal_orders() {
    let set = BstSet::from([5, 3, 8, 1, 4, 7, 9]);
    let keys = |order| set.iter_in(order).copied().collect::<Vec<_>>();
    assert_eq!(keys(Traversal::Preorder), [5, 3, 1, 4, 8, 7, 9]);
    assert_eq!(keys(Traversal::Inorder), [1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(keys(Traversal::Postorder), [1, 4, 3, 7, 9, 8, 5]);
    assert_eq!(set.height(), 2);
}

#[test]
fn strings_by_borrowed_str() {
    let mut set: BstSet<String> = ["the", "a", "of"].into_iter().map(String::from).collect();
    assert!(set.contains("the"));
    assert_eq!(set.get("a").map(String::as_str), Some("a"));
    assert!(set.remove("of"));
    assert!(!set.remove("of"));
    assert_eq!(set.take("the").as_deref(), Some("the"));
    assert_eq!(set.len(), 1);
}
