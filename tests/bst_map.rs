use std::collections::BTreeMap;

use bst_map::{BstMap, Traversal};
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

/// Generates keys from a range small enough to cause collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -20_000i64..20_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    RemoveEntry(i64),
    Get(i64),
    ContainsKey(i64),
    GetKeyValue(i64),
    FirstKeyValue,
    LastKeyValue,
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        1 => key_strategy().prop_map(MapOp::RemoveEntry),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => key_strategy().prop_map(MapOp::GetKeyValue),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

// ─── Reference tree for checking shape ───────────────────────────────────────

/// A recursive binary search tree with the same insertion and removal rules.
#[derive(Default)]
struct ShapeModel {
    root: Option<Box<ModelNode>>,
}

struct ModelNode {
    key: i64,
    left: Option<Box<ModelNode>>,
    right: Option<Box<ModelNode>>,
}

impl ShapeModel {
    fn insert(&mut self, key: i64) {
        fn go(link: &mut Option<Box<ModelNode>>, key: i64) {
            match link {
                None => {
                    *link = Some(Box::new(ModelNode {
                        key,
                        left: None,
                        right: None,
                    }));
                }
                Some(node) if key < node.key => go(&mut node.left, key),
                Some(node) if key > node.key => go(&mut node.right, key),
                Some(_) => {}
            }
        }
        go(&mut self.root, key);
    }

    fn remove(&mut self, key: i64) {
        fn min_key(node: &ModelNode) -> i64 {
            node.left.as_ref().map_or(node.key, |left| min_key(left))
        }
        fn go(link: Option<Box<ModelNode>>, key: i64) -> Option<Box<ModelNode>> {
            let mut node = link?;
            if key < node.key {
                node.left = go(node.left.take(), key);
                Some(node)
            } else if key > node.key {
                node.right = go(node.right.take(), key);
                Some(node)
            } else {
                match (node.left.take(), node.right.take()) {
                    (None, child) | (child, None) => child,
                    (left, Some(right)) => {
                        let successor = min_key(&right);
                        node.key = successor;
                        node.left = left;
                        node.right = go(Some(right), successor);
                        Some(node)
                    }
                }
            }
        }
        self.root = go(self.root.take(), key);
    }

    fn height(&self) -> isize {
        fn go(link: &Option<Box<ModelNode>>) -> isize {
            link.as_ref().map_or(-1, |node| 1 + go(&node.left).max(go(&node.right)))
        }
        go(&self.root)
    }

    fn preorder(&self) -> Vec<i64> {
        fn go(link: &Option<Box<ModelNode>>, out: &mut Vec<i64>) {
            if let Some(node) = link {
                out.push(node.key);
                go(&node.left, out);
                go(&node.right, out);
            }
        }
        let mut out = Vec::new();
        go(&self.root, &mut out);
        out
    }

    fn postorder(&self) -> Vec<i64> {
        fn go(link: &Option<Box<ModelNode>>, out: &mut Vec<i64>) {
            if let Some(node) = link {
                go(&node.left, out);
                go(&node.right, out);
                out.push(node.key);
            }
        }
        let mut out = Vec::new();
        go(&self.root, &mut out);
        out
    }
}

fn collect(map: &BstMap<i64, i64>, order: Traversal) -> Vec<i64> {
    map.keys_in(order).copied().collect()
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both BstMap and BTreeMap
    /// and asserts identical results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut bst: BstMap<i64, i64> = BstMap::new();
        let mut bt: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(bst.insert(*k, *v), bt.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(bst.remove(k), bt.remove(k), "remove({})", k);
                }
                MapOp::RemoveEntry(k) => {
                    prop_assert_eq!(bst.remove_entry(k), bt.remove_entry(k), "remove_entry({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(bst.get(k), bt.get(k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(bst.contains_key(k), bt.contains_key(k), "contains_key({})", k);
                }
                MapOp::GetKeyValue(k) => {
                    prop_assert_eq!(bst.get_key_value(k), bt.get_key_value(k), "get_key_value({})", k);
                }
                MapOp::FirstKeyValue => {
                    prop_assert_eq!(bst.first_key_value(), bt.first_key_value());
                }
                MapOp::LastKeyValue => {
                    prop_assert_eq!(bst.last_key_value(), bt.last_key_value());
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(bst.pop_first(), bt.pop_first());
                }
                MapOp::PopLast => {
                    prop_assert_eq!(bst.pop_last(), bt.pop_last());
                }
            }
            prop_assert_eq!(bst.len(), bt.len());
        }

        prop_assert!(bst.iter().eq(bt.iter()));
    }

    /// Keys come out of an in-order walk strictly ascending, after any mix of
    /// inserts and removals.
    #[test]
    fn inorder_is_strictly_ascending(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut bst: BstMap<i64, i64> = BstMap::new();
        for op in &ops {
            match op {
                MapOp::Insert(k, v) => { bst.insert(*k, *v); }
                MapOp::Remove(k) | MapOp::RemoveEntry(k) => { bst.remove(k); }
                MapOp::PopFirst => { bst.pop_first(); }
                MapOp::PopLast => { bst.pop_last(); }
                _ => {}
            }
        }
        let keys = collect(&bst, Traversal::Inorder);
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(keys.len(), bst.len());
    }

    /// Overwriting an existing key never changes the size.
    #[test]
    fn distinct_inserts_set_len(keys in proptest::collection::btree_set(key_strategy(), 0..TEST_SIZE)) {
        let mut bst = BstMap::new();
        for (i, &k) in keys.iter().enumerate() {
            prop_assert_eq!(bst.insert(k, 0), None);
            prop_assert_eq!(bst.len(), i + 1);
        }
        for &k in &keys {
            prop_assert_eq!(bst.insert(k, 1), Some(0));
        }
        prop_assert_eq!(bst.len(), keys.len());
        prop_assert!(bst.values().all(|&v| v == 1));
    }

    /// Removing a key drops the size by exactly one iff it was present and
    /// leaves every other entry untouched.
    #[test]
    fn removal_only_affects_its_key(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE),
        victims in proptest::collection::vec(key_strategy(), 1..200),
    ) {
        let mut bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let mut bt: BTreeMap<i64, i64> = entries.iter().copied().collect();

        for k in &victims {
            let before = bst.len();
            let was_present = bst.contains_key(k);
            prop_assert_eq!(bst.remove(k), bt.remove(k));
            prop_assert!(!bst.contains_key(k));
            prop_assert_eq!(bst.len(), if was_present { before - 1 } else { before });
        }
        for (k, v) in &bt {
            prop_assert_eq!(bst.get(k), Some(v));
        }
    }

    /// `-1 <= height <= n - 1`, and no binary tree with n nodes is shorter
    /// than `floor(log2(n))`.
    #[test]
    fn height_bounds(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut bst: BstMap<i64, i64> = BstMap::new();
        for op in &ops {
            match op {
                MapOp::Insert(k, v) => { bst.insert(*k, *v); }
                MapOp::Remove(k) => { bst.remove(k); }
                _ => continue,
            }
            let n = isize::try_from(bst.len()).unwrap();
            let height = bst.height();
            prop_assert!(height <= n - 1);
            if n == 0 {
                prop_assert_eq!(height, -1);
            } else {
                prop_assert!(height >= isize::try_from(n.ilog2()).unwrap());
            }
        }
    }
}

// ─── Tree shape and traversals ───────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Preorder, postorder and height agree with a recursive reference tree
    /// that follows the same insertion and successor-removal rules.
    #[test]
    fn shape_matches_reference_tree(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut bst: BstMap<i64, i64> = BstMap::new();
        let mut model = ShapeModel::default();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    bst.insert(*k, *v);
                    model.insert(*k);
                }
                MapOp::Remove(k) | MapOp::RemoveEntry(k) => {
                    bst.remove(k);
                    model.remove(*k);
                }
                _ => {}
            }
        }

        prop_assert_eq!(collect(&bst, Traversal::Preorder), model.preorder());
        prop_assert_eq!(collect(&bst, Traversal::Postorder), model.postorder());
        prop_assert_eq!(bst.height(), model.height());
    }

    /// Re-inserting the preorder keys into an empty map rebuilds the same shape.
    #[test]
    fn preorder_rebuilds_shape(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let rebuilt: BstMap<i64, i64> = bst.preorder_keys().map(|&k| (k, 0)).collect();
        prop_assert_eq!(collect(&rebuilt, Traversal::Preorder), collect(&bst, Traversal::Preorder));
        prop_assert_eq!(collect(&rebuilt, Traversal::Postorder), collect(&bst, Traversal::Postorder));
        prop_assert_eq!(rebuilt.height(), bst.height());
    }

    /// Every traversal visits each key exactly once and reports its length up front.
    #[test]
    fn traversals_are_permutations(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let expected: Vec<i64> = bst.keys().copied().collect();
        for order in [Traversal::Preorder, Traversal::Inorder, Traversal::Postorder] {
            let iter = bst.keys_in(order);
            prop_assert_eq!(iter.len(), bst.len());
            let mut keys: Vec<i64> = iter.copied().collect();
            keys.sort_unstable();
            prop_assert_eq!(&keys, &expected);
        }
    }

    /// The root is the first key in preorder and the last in postorder.
    #[test]
    fn root_brackets_pre_and_postorder(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let root = entries[0].0;
        prop_assert_eq!(bst.preorder_keys().next(), Some(&root));
        prop_assert_eq!(bst.postorder_keys().last(), Some(&root));
    }
}

// ─── Iteration and conveniences ──────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn iter_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let bt: BTreeMap<i64, i64> = entries.iter().copied().collect();

        prop_assert!(bst.iter().eq(bt.iter()));
        prop_assert!(bst.iter().rev().eq(bt.iter().rev()));
        prop_assert!(bst.keys().eq(bt.keys()));
        prop_assert!(bst.values().eq(bt.values()));
        prop_assert!(bst.clone().into_iter().eq(bt.clone()));
        prop_assert!(bst.clone().into_keys().eq(bt.clone().into_keys()));
        prop_assert!(bst.into_values().eq(bt.into_values()));
    }

    /// Alternating `next` and `next_back` visits every entry exactly once.
    #[test]
    fn iter_size_and_double_ended(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let bt: BTreeMap<i64, i64> = entries.iter().copied().collect();

        let mut bst_iter = bst.iter();
        let mut bt_iter = bt.iter();
        let mut front = true;
        loop {
            prop_assert_eq!(bst_iter.len(), bt_iter.len());
            let (a, b) = if front {
                (bst_iter.next(), bt_iter.next())
            } else {
                (bst_iter.next_back(), bt_iter.next_back())
            };
            prop_assert_eq!(a, b);
            if a.is_none() {
                break;
            }
            front = !front;
        }
    }

    #[test]
    fn iter_mut_and_values_mut_match(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let mut bt: BTreeMap<i64, i64> = entries.iter().copied().collect();

        for ((_, a), (_, b)) in bst.iter_mut().zip(bt.iter_mut()) {
            *a = a.wrapping_mul(3);
            *b = b.wrapping_mul(3);
        }
        for (a, b) in bst.values_mut().zip(bt.values_mut()) {
            *a = a.wrapping_sub(1);
            *b = b.wrapping_sub(1);
        }
        prop_assert!(bst.iter().eq(bt.iter()));
    }

    #[test]
    fn get_mut_matches_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
        probes in proptest::collection::vec(key_strategy(), 100),
    ) {
        let mut bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let mut bt: BTreeMap<i64, i64> = entries.iter().copied().collect();
        for k in &probes {
            match (bst.get_mut(k), bt.get_mut(k)) {
                (Some(a), Some(b)) => {
                    *a = a.wrapping_add(1);
                    *b = b.wrapping_add(1);
                }
                (a, b) => {
                    prop_assert_eq!(a.is_none(), b.is_none(), "get_mut({})", k);
                }
            }
        }
        prop_assert!(bst.iter().eq(bt.iter()));
    }

    #[test]
    fn retain_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let mut bt: BTreeMap<i64, i64> = entries.iter().copied().collect();
        bst.retain(|k, v| (k + *v % 7) % 3 != 0);
        bt.retain(|k, v| (k + *v % 7) % 3 != 0);
        prop_assert!(bst.iter().eq(bt.iter()));
        prop_assert_eq!(bst.len(), bt.len());
    }

    #[test]
    fn extend_matches_btreemap(
        first in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE / 2),
        second in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE / 2),
    ) {
        let mut bst: BstMap<i64, i64> = first.iter().copied().collect();
        let mut bt: BTreeMap<i64, i64> = first.iter().copied().collect();
        bst.extend(second.iter().copied());
        bt.extend(second.iter().copied());
        bst.extend(second.iter().map(|(k, v)| (k, v)));
        prop_assert!(bst.iter().eq(bt.iter()));
    }

    #[test]
    fn clone_eq_and_ord_match_btreemap(
        a in proptest::collection::vec((0i64..50, 0i64..4), 0..40),
        b in proptest::collection::vec((0i64..50, 0i64..4), 0..40),
    ) {
        let (bst_a, bst_b): (BstMap<i64, i64>, BstMap<i64, i64>) =
            (a.iter().copied().collect(), b.iter().copied().collect());
        let (bt_a, bt_b): (BTreeMap<i64, i64>, BTreeMap<i64, i64>) =
            (a.iter().copied().collect(), b.iter().copied().collect());

        prop_assert_eq!(bst_a.clone(), bst_a.clone());
        prop_assert_eq!(bst_a == bst_b, bt_a == bt_b);
        prop_assert_eq!(bst_a.cmp(&bst_b), bt_a.cmp(&bt_b));
        prop_assert_eq!(bst_a.partial_cmp(&bst_b), bt_a.partial_cmp(&bt_b));
    }

    #[test]
    fn index_by_key_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let bt: BTreeMap<i64, i64> = entries.iter().copied().collect();
        for k in bt.keys() {
            prop_assert_eq!(bst[k], bt[k]);
        }
    }

    #[test]
    fn clear_empties_map(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut bst: BstMap<i64, i64> = entries.iter().copied().collect();
        bst.clear();
        prop_assert!(bst.is_empty());
        prop_assert_eq!(bst.height(), -1);
        prop_assert_eq!(bst.iter().next(), None);
        bst.insert(1, 1);
        prop_assert_eq!(bst.len(), 1);
    }
}

// ─── Hash consistency ────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Maps with the same entries hash equally, whatever their shape.
    #[test]
    fn hash_consistent_for_equal_maps(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        use std::hash::{BuildHasher, RandomState};

        let forward: BstMap<i64, i64> = entries.iter().copied().collect();
        let reversed: BstMap<i64, i64> = forward.iter().rev().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&forward, &reversed);

        let state = RandomState::new();
        prop_assert_eq!(state.hash_one(&forward), state.hash_one(&reversed));
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

#[test]
fn two_child_root_removal() {
    let mut map: BstMap<i32, ()> = [5, 3, 8, 1, 4, 7, 9].into_iter().map(|k| (k, ())).collect();
    assert_eq!(map.remove(&5), Some(()));
    assert_eq!(map.inorder_keys().copied().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
    assert_eq!(map.preorder_keys().next(), Some(&7));
    assert_eq!(map.len(), 6);
}

#[test]
fn three_puts() {
    let mut map = BstMap::new();
    map.insert(5, "a");
    map.insert(3, "b");
    map.insert(8, "c");
    assert_eq!(map.inorder_keys().copied().collect::<Vec<_>>(), [3, 5, 8]);
    assert_eq!(map.height(), 1);
    assert_eq!(map.len(), 3);
}

#[test]
fn empty_map() {
    let map: BstMap<String, i32> = BstMap::new();
    assert_eq!(map.len(), 0);
    assert_eq!(map.height(), -1);
    assert_eq!(map.inorder_keys().count(), 0);
    assert_eq!(map.get("x"), None);
    assert!(!map.contains_key("x"));
}

#[test]
fn overwrite_keeps_size() {
    let mut map = BstMap::new();
    assert_eq!(map.insert("x".to_owned(), 1), None);
    assert_eq!(map.insert("x".to_owned(), 2), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("x"), Some(&2));
}

#[test]
fn sorted_inserts_degenerate_to_a_chain() {
    let map: BstMap<u32, u32> = (0..2_000).map(|k| (k, k)).collect();
    assert_eq!(map.height(), 1_999);
    assert!(map.preorder_keys().copied().eq(0..2_000));
    assert!(map.postorder_keys().copied().eq((0..2_000).rev()));
    assert!(map.iter().rev().map(|(&k, _)| k).eq((0..2_000).rev()));
}

/// Removes, pops and clones at the bottom of a sorted-insert chain.
fn chain_ends_survive_removal(n: u32) {
    let mut map: BstMap<u32, u32> = (0..n).map(|k| (k, k)).collect();
    assert_eq!(map.remove(&(n - 1)), Some(n - 1));
    assert_eq!(map.remove_entry(&(n / 2)), Some((n / 2, n / 2)));
    assert_eq!(map.pop_last(), Some((n - 2, n - 2)));
    assert_eq!(map.pop_first(), Some((0, 0)));
    assert_eq!(map.len(), usize::try_from(n).unwrap() - 4);
    assert_eq!(map.height(), isize::try_from(n).unwrap() - 5);

    let cloned = map.clone();
    assert_eq!(cloned, map);
    assert_eq!(cloned.height(), map.height());
    assert!(cloned.preorder_keys().eq(map.preorder_keys()));

    map.retain(|k, _| k % 3 != 0);
    assert!(map.keys().all(|k| k % 3 != 0));
    assert_eq!(cloned.len(), usize::try_from(n).unwrap() - 4);
}

#[test]
fn sorted_chain_removes_pops_and_clones() {
    chain_ends_survive_removal(2_000);
}

#[test]
#[ignore = "stress test: quadratic build of a 100k-deep chain, run with --ignored --release"]
fn deep_sorted_chain_removes_pops_and_clones() {
    chain_ends_survive_removal(100_000);
}
