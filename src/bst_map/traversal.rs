use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::{BstMap, SPINE};
use crate::Traversal;
use crate::raw::Node;

enum Step<'a, K, V> {
    /// A subtree that has not been expanded yet.
    Descend(&'a Node<K, V>),
    /// A key whose turn has come.
    Yield(&'a K),
}

impl<K, V> Clone for Step<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Step<'_, K, V> {}

/// An iterator over the keys of a `BstMap` in a chosen [`Traversal`] order.
///
/// This `struct` is created by [`BstMap::keys_in`], [`BstMap::preorder_keys`],
/// [`BstMap::inorder_keys`] and [`BstMap::postorder_keys`]. Every call starts a fresh walk
/// from the root, so a traversal can be restarted at any time.
///
/// # Examples
///
/// ```
/// use bst_map::BstMap;
///
/// let map = BstMap::from([(5, ()), (3, ()), (8, ())]);
/// let mut keys = map.postorder_keys();
/// assert_eq!(keys.len(), 3);
/// assert_eq!(keys.next(), Some(&3));
/// assert_eq!(keys.next(), Some(&8));
/// assert_eq!(keys.next(), Some(&5));
/// assert_eq!(keys.next(), None);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct TraversalKeys<'a, K, V> {
    order: Traversal,
    stack: SmallVec<[Step<'a, K, V>; SPINE]>,
    remaining: usize,
}

impl<K, V> BstMap<K, V> {
    /// Gets an iterator over the keys of the map in the given traversal order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::{BstMap, Traversal};
    ///
    /// let map = BstMap::from([(5, "a"), (3, "b"), (8, "c"), (1, "d")]);
    /// let keys: Vec<_> = map.keys_in(Traversal::Preorder).copied().collect();
    /// assert_eq!(keys, [5, 3, 1, 8]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; O(n) to exhaust it. The iterator holds at most O(h)
    /// pending nodes.
    pub fn keys_in(&self, order: Traversal) -> TraversalKeys<'_, K, V> {
        let mut stack = SmallVec::new();
        stack.extend(self.raw.root().map(Step::Descend));
        TraversalKeys {
            order,
            stack,
            remaining: self.len(),
        }
    }

    /// Gets an iterator over the keys in preorder: each node before its left subtree,
    /// then its right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map = BstMap::from([(5, ()), (3, ()), (8, ()), (1, ()), (4, ())]);
    /// let keys: Vec<_> = map.preorder_keys().copied().collect();
    /// assert_eq!(keys, [5, 3, 1, 4, 8]);
    /// ```
    pub fn preorder_keys(&self) -> TraversalKeys<'_, K, V> {
        self.keys_in(Traversal::Preorder)
    }

    /// Gets an iterator over the keys in inorder: left subtree, node, right subtree.
    ///
    /// The keys come out in strictly ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map = BstMap::from([(5, ()), (3, ()), (8, ()), (1, ()), (4, ())]);
    /// let keys: Vec<_> = map.inorder_keys().copied().collect();
    /// assert_eq!(keys, [1, 3, 4, 5, 8]);
    /// ```
    pub fn inorder_keys(&self) -> TraversalKeys<'_, K, V> {
        self.keys_in(Traversal::Inorder)
    }

    /// Gets an iterator over the keys in postorder: left subtree, right subtree, then the node.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map = BstMap::from([(5, ()), (3, ()), (8, ()), (1, ()), (4, ())]);
    /// let keys: Vec<_> = map.postorder_keys().copied().collect();
    /// assert_eq!(keys, [1, 4, 3, 8, 5]);
    /// ```
    pub fn postorder_keys(&self) -> TraversalKeys<'_, K, V> {
        self.keys_in(Traversal::Postorder)
    }
}

impl<K, V> TraversalKeys<'_, K, V> {
    /// Returns the order this iterator walks in.
    #[must_use]
    pub fn order(&self) -> Traversal {
        self.order
    }
}

impl<'a, K, V> Iterator for TraversalKeys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = match self.stack.pop()? {
                Step::Yield(key) => {
                    self.remaining -= 1;
                    return Some(key);
                }
                Step::Descend(node) => node,
            };

            // The stack is LIFO: push in reverse visiting order.
            let left = node.left.as_deref().map(Step::Descend);
            let right = node.right.as_deref().map(Step::Descend);
            match self.order {
                Traversal::Preorder => {
                    self.stack.extend(right);
                    self.stack.extend(left);
                    self.remaining -= 1;
                    return Some(&node.key);
                }
                Traversal::Inorder => {
                    self.stack.extend(right);
                    self.stack.push(Step::Yield(&node.key));
                    self.stack.extend(left);
                }
                Traversal::Postorder => {
                    self.stack.push(Step::Yield(&node.key));
                    self.stack.extend(right);
                    self.stack.extend(left);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for TraversalKeys<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for TraversalKeys<'_, K, V> {}

impl<K, V> Clone for TraversalKeys<'_, K, V> {
    fn clone(&self) -> Self {
        TraversalKeys {
            order: self.order,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> Default for TraversalKeys<'_, K, V> {
    /// Creates an empty in-order `bst_map::TraversalKeys`.
    ///
    /// ```
    /// # use bst_map::bst_map;
    /// let iter: bst_map::TraversalKeys<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        TraversalKeys {
            order: Traversal::default(),
            stack: SmallVec::new(),
            remaining: 0,
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for TraversalKeys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
