use alloc::boxed::Box;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use smallvec::SmallVec;

use super::node::{Link, Node, take_leftmost, take_rightmost};

/// Work stack used by the non-recursive walks. Sized for a reasonably shaped tree;
/// degenerate trees spill to the heap.
type Stack<T> = SmallVec<[T; 32]>;

/// The core binary search tree backing `BstMap`.
pub(crate) struct RawBstMap<K, V> {
    /// The root of the tree, if the tree is non-empty.
    root: Link<K, V>,
    /// Total number of key-value pairs (nodes) in the tree.
    len: usize,
}

impl<K, V> RawBstMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the root node, if any.
    pub(crate) fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Returns the root node mutably, if any.
    pub(crate) fn root_mut(&mut self) -> Option<&mut Node<K, V>> {
        self.root.as_deref_mut()
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        release(self.root.take());
        self.len = 0;
    }

    /// Returns the height of the tree: -1 when empty, 0 for a single node.
    pub(crate) fn height(&self) -> isize {
        let mut height = -1;
        let mut stack: Stack<(&Node<K, V>, isize)> = SmallVec::new();
        stack.extend(self.root().map(|root| (root, 0)));

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        height
    }

    /// Returns the minimum key-value pair.
    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        self.root().map(Node::leftmost).map(|node| (&node.key, &node.value))
    }

    /// Returns the maximum key-value pair.
    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        self.root().map(Node::rightmost).map(|node| (&node.key, &node.value))
    }

    /// Removes and returns the minimum key-value pair.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let first = take_leftmost(&mut self.root)?;
        self.len -= 1;
        Some(first.into_entry())
    }

    /// Removes and returns the maximum key-value pair.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let last = take_rightmost(&mut self.root)?;
        self.len -= 1;
        Some(last.into_entry())
    }

    /// Drains all key-value pairs in ascending key order.
    /// Walks the tree with an explicit stack, so the depth of the tree does not matter.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut result = Vec::with_capacity(self.len);
        let mut spine: Vec<Box<Node<K, V>>> = Vec::new();
        let mut current = self.root.take();

        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                spine.push(node);
            }
            let Some(mut node) = spine.pop() else {
                break;
            };
            current = node.right.take();
            result.push(node.into_entry());
        }

        self.len = 0;
        result
    }

    /// Keeps only the entries for which `f` returns true. `f` sees entries in ascending key order.
    pub(crate) fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut removed = 0;
        self.root = retain_in(self.root.take(), &mut f, &mut removed);
        self.len -= removed;
    }
}

impl<K: Ord, V> RawBstMap<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key was present.
    /// The stored key is left untouched on overwrite.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut link = &mut self.root;
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
            }
        }
        *link = Some(Node::boxed(key, value));
        self.len += 1;
        None
    }

    /// Returns the node holding `key`.
    fn search<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    /// Returns the node holding `key`, mutably.
    fn search_mut<Q>(&mut self, key: &Q) -> Option<&mut Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root_mut();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    /// Returns a reference to the value for `key`.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|node| &node.value)
    }

    /// Returns the stored key and the value for `key`.
    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|node| (&node.key, &node.value))
    }

    /// Returns a mutable reference to the value for `key`.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search_mut(key).map(|node| &mut node.value)
    }

    /// Returns true if the tree contains `key`.
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Removes `key`, returning its value if it was present.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and value if it was present.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let removed = remove_from(&mut self.root, key);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }
}

impl<K: Clone, V: Clone> Clone for RawBstMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: clone_tree(&self.root),
            len: self.len,
        }
    }
}

impl<K, V> Drop for RawBstMap<K, V> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

/// Removes `key` from the subtree in `link`, splicing the replacement subtree
/// into the same slot. Returns the removed entry.
fn remove_from<K, V, Q>(mut link: &mut Link<K, V>, key: &Q) -> Option<(K, V)>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    loop {
        let ordering = key.cmp(link.as_deref()?.key.borrow());
        if ordering == Ordering::Equal {
            break;
        }
        let Some(node) = link else {
            return None;
        };
        link = if ordering == Ordering::Less { &mut node.left } else { &mut node.right };
    }

    let (rest, removed) = unlink(link.take()?);
    *link = rest;
    Some(removed)
}

/// Removes `node` from its position, returning the subtree that replaces it and
/// the node's entry.
///
/// With two children the node stays in place and takes over the entry of its
/// in-order successor, which is detached from the right subtree.
fn unlink<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, (K, V)) {
    if node.left.is_none() {
        let right = node.right.take();
        return (right, node.into_entry());
    }
    match take_leftmost(&mut node.right) {
        None => {
            let left = node.left.take();
            (left, node.into_entry())
        }
        Some(successor) => {
            let (key, value) = successor.into_entry();
            let removed = (mem::replace(&mut node.key, key), mem::replace(&mut node.value, value));
            (Some(node), removed)
        }
    }
}

enum RetainStep<K, V> {
    /// Subtree not yet visited.
    Enter(Link<K, V>),
    /// Left subtree done; the node's own entry is next.
    Visit(Box<Node<K, V>>),
    /// Right subtree done; unlink the node unless it was kept.
    Leave(Box<Node<K, V>>, bool),
}

/// Filters the subtree in-order, unlinking each rejected node once both of its
/// subtrees are filtered. Finished subtrees wait on `done` until their parent
/// picks them up.
fn retain_in<K, V, F>(link: Link<K, V>, f: &mut F, removed: &mut usize) -> Link<K, V>
where
    F: FnMut(&K, &mut V) -> bool,
{
    let mut steps = alloc::vec![RetainStep::Enter(link)];
    let mut done: Vec<Link<K, V>> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            RetainStep::Enter(None) => done.push(None),
            RetainStep::Enter(Some(mut node)) => {
                let left = node.left.take();
                steps.push(RetainStep::Visit(node));
                steps.push(RetainStep::Enter(left));
            }
            RetainStep::Visit(mut node) => {
                node.left = done.pop().flatten();
                let keep = f(&node.key, &mut node.value);
                let right = node.right.take();
                steps.push(RetainStep::Leave(node, keep));
                steps.push(RetainStep::Enter(right));
            }
            RetainStep::Leave(mut node, keep) => {
                node.right = done.pop().flatten();
                if keep {
                    done.push(Some(node));
                } else {
                    *removed += 1;
                    done.push(unlink(node).0);
                }
            }
        }
    }

    done.pop().flatten()
}

/// Copies a subtree node by node, keeping its shape. Each pending pair is a
/// source node and the empty slot its copy goes into.
fn clone_tree<K: Clone, V: Clone>(root: &Link<K, V>) -> Link<K, V> {
    let mut cloned = None;
    let mut pending: Stack<(&Node<K, V>, &mut Link<K, V>)> = SmallVec::new();
    if let Some(node) = root.as_deref() {
        pending.push((node, &mut cloned));
    }

    while let Some((source, slot)) = pending.pop() {
        let node = slot.insert(Node::boxed(source.key.clone(), source.value.clone()));
        let Node { left, right, .. } = &mut **node;
        if let Some(source_left) = source.left.as_deref() {
            pending.push((source_left, left));
        }
        if let Some(source_right) = source.right.as_deref() {
            pending.push((source_right, right));
        }
    }

    drop(pending);
    cloned
}

/// Frees a subtree without recursing once per level.
fn release<K, V>(link: Link<K, V>) {
    let mut pending: Vec<_> = link.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

#[cfg(test)]
impl<K: Ord, V> RawBstMap<K, V> {
    /// Asserts the BST ordering property and that `len` matches the node count.
    pub(crate) fn check_invariants(&self) {
        let mut count = 0;
        let mut previous: Option<&K> = None;
        let mut spine: Vec<&Node<K, V>> = Vec::new();
        let mut current = self.root();

        loop {
            while let Some(node) = current {
                spine.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = spine.pop() else {
                break;
            };
            if let Some(previous) = previous {
                assert!(previous < &node.key, "in-order keys are not strictly ascending");
            }
            previous = Some(&node.key);
            count += 1;
            current = node.right.as_deref();
        }

        assert_eq!(count, self.len, "`len` does not match the number of reachable nodes");
    }
}
