use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use smallvec::SmallVec;

use crate::raw::{Node, RawBstMap};

mod traversal;

pub use crate::Traversal;
pub use traversal::TraversalKeys;

/// Inline capacity of the iterator stacks; deeper trees spill to the heap.
const SPINE: usize = 16;

type Spine<'a, K, V> = SmallVec<[&'a Node<K, V>; SPINE]>;

/// An entry whose left subtree has been visited but which has not been yielded yet,
/// together with its right subtree.
type PendingMut<'a, K, V> = (&'a K, &'a mut V, Option<&'a mut Node<K, V>>);

/// An ordered map based on an unbalanced [binary search tree].
///
/// Given a key type with a [total order], an ordered map stores its entries in key order.
/// That means that keys must be of a type that implements the [`Ord`] trait,
/// such that two keys can always be compared to determine their [`Ordering`].
/// Examples of keys with a total order are strings with lexicographical order,
/// and numbers with their natural order.
///
/// Iterators obtained from functions such as [`BstMap::iter`], [`BstMap::into_iter`],
/// [`BstMap::values`], or [`BstMap::keys`] produce their items in key order. The tree shape
/// itself can be observed through [`BstMap::preorder_keys`], [`BstMap::postorder_keys`] and
/// [`BstMap::height`].
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `BstMap` that observed the logic error and not result in undefined behavior. This could
/// include panics, incorrect results, memory leaks, and non-termination.
///
/// # Examples
///
/// ```
/// use bst_map::BstMap;
///
/// // type inference lets us omit an explicit type signature (which
/// // would be `BstMap<&str, &str>` in this example).
/// let mut movie_reviews = BstMap::new();
///
/// // review some movies.
/// movie_reviews.insert("Office Space",       "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction",       "Masterpiece.");
/// movie_reviews.insert("The Godfather",      "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// // check for a specific one.
/// if !movie_reviews.contains_key("Les Miserables") {
///     println!("We've got {} reviews, but Les Miserables ain't one.",
///              movie_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// movie_reviews.remove("The Blues Brothers");
///
/// // look up the values associated with some keys.
/// let to_find = ["Up!", "Office Space"];
/// for movie in &to_find {
///     match movie_reviews.get(movie) {
///        Some(review) => println!("{movie}: {review}"),
///        None => println!("{movie} is unreviewed.")
///     }
/// }
///
/// // Look up the value for a key (will panic if the key is not found).
/// println!("Movie review: {}", movie_reviews["Office Space"]);
///
/// // iterate over everything.
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
/// ```
///
/// A `BstMap` with a known list of items can be initialized from an array:
///
/// ```
/// use bst_map::BstMap;
///
/// let solar_distance = BstMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// ```
///
/// # Background
///
/// Every entry lives in its own heap-allocated node, and each node owns its left and right
/// subtrees outright. Searches, insertions and removals walk a single root-to-leaf path, so they
/// cost O(h) comparisons where h is the [height](BstMap::height) of the tree.
///
/// The tree is never rebalanced. Keys inserted in random order give an expected height of
/// O(log n); keys inserted in sorted order degenerate the tree into a list of height n - 1.
/// Every operation walks the tree with a cursor or an explicit stack, so a degenerate tree
/// costs time but never exhausts the call stack.
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
pub struct BstMap<K, V> {
    raw: RawBstMap<K, V>,
}

/// An iterator over the entries of a `BstMap`.
///
/// This `struct` is created by the [`iter`] method on [`BstMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use bst_map::BstMap;
///
/// let map = BstMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: BstMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    // Ancestors still to be yielded by a forward walk.
    front: Spine<'a, K, V>,
    // Ancestors still to be yielded by a backward walk.
    back: Spine<'a, K, V>,
    remaining: usize,
}

/// A mutable iterator over the entries of a `BstMap`.
///
/// This `struct` is created by the [`iter_mut`] method on [`BstMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use bst_map::BstMap;
///
/// let mut map = BstMap::from([(1, 10), (2, 20)]);
/// for (_, value) in map.iter_mut() {
///     *value += 1;
/// }
/// let values: Vec<_> = map.values().copied().collect();
/// assert_eq!(values, [11, 21]);
/// ```
///
/// [`iter_mut`]: BstMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    stack: SmallVec<[PendingMut<'a, K, V>; SPINE]>,
    remaining: usize,
}

/// An owning iterator over the entries of a `BstMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`BstMap`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// # Examples
///
/// ```
/// use bst_map::BstMap;
///
/// let map = BstMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.into_iter();
/// assert_eq!(iter.next(), Some((1, "a")));
/// assert_eq!(iter.next_back(), Some((2, "b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `BstMap`, in ascending order.
///
/// This `struct` is created by the [`keys`] method on [`BstMap`]. See its
/// documentation for more.
///
/// [`keys`]: BstMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `BstMap`, in order by key.
///
/// This `struct` is created by the [`values`] method on [`BstMap`]. See its
/// documentation for more.
///
/// [`values`]: BstMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of a `BstMap`, in order by key.
///
/// This `struct` is created by the [`values_mut`] method on [`BstMap`]. See its
/// documentation for more.
///
/// [`values_mut`]: BstMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

/// An owning iterator over the keys of a `BstMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`BstMap`].
///
/// [`into_keys`]: BstMap::into_keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of a `BstMap`.
///
/// This `struct` is created by the [`into_values`] method on [`BstMap`].
///
/// [`into_values`]: BstMap::into_values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> BstMap<K, V> {
    /// Makes a new, empty `BstMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> BstMap<K, V> {
        BstMap { raw: RawBstMap::new() }
    }

    /// Clears the map, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// assert_eq!(a.height(), -1);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the value corresponding to the key, or `None` if
    /// the key is not present.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// The returned key is the one stored in the map, which matters for key
    /// types where non-identical keys can be considered equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(String::from("rain"), 3);
    /// assert_eq!(map.get_key_value("rain"), Some((&String::from("rain"), &3)));
    /// assert_eq!(map.get_key_value("snow"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    #[allow(clippy::must_use_candidate)]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first_key_value()
    }

    /// Removes and returns the first element in the map.
    /// The key of this element is the minimum key that was in the map.
    ///
    /// # Examples
    ///
    /// Draining elements in ascending order, while keeping a usable map each iteration.
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_first() {
    ///     assert!(map.iter().all(|(k, _v)| *k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_first()
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.last_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    #[allow(clippy::must_use_candidate)]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last_key_value()
    }

    /// Removes and returns the last element in the map.
    /// The key of this element is the maximum key that was in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_last() {
    ///     assert!(map.iter().all(|(k, _v)| *k < key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_last()
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.contains_key(&1), true);
    /// assert_eq!(map.contains_key(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, a new leaf is linked in where the
    /// search ended and `None` is returned.
    ///
    /// If the map did have this key present, the value is updated in place, and the old
    /// value is returned. The key is not updated, though; this matters for
    /// types that can be `==` without being identical. The tree shape does not change.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// assert_eq!(map.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        self.raw.insert(key, value)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// A node with at most one child is replaced by that child. A node with two
    /// children stays in place and takes over the entry of its in-order successor,
    /// the leftmost node of its right subtree, which is unlinked instead.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map: BstMap<_, _> = [5, 3, 8, 1, 4, 7, 9].into_iter().map(|k| (k, ())).collect();
    /// assert_eq!(map.remove(&5), Some(()));
    /// assert_eq!(map.remove(&5), None);
    ///
    /// let keys: Vec<_> = map.inorder_keys().copied().collect();
    /// assert_eq!(keys, [1, 3, 4, 7, 8, 9]);
    /// assert_eq!(map.preorder_keys().next(), Some(&7));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all pairs `(k, v)` for which `f(&k, &mut v)` returns `false`.
    /// The elements are visited in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map: BstMap<i32, i32> = (0..8).map(|x| (x, x*10)).collect();
    /// // Keep only the elements with even-numbered keys.
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.raw.retain(f);
    }

    /// Returns the height of the tree.
    ///
    /// The height of an empty map is -1 and a map with a single entry has height 0.
    /// Otherwise it is the number of edges on the longest path from the root to a leaf,
    /// so `-1 <= height <= len - 1` always holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.height(), -1);
    /// map.insert(5, "a");
    /// assert_eq!(map.height(), 0);
    /// map.insert(3, "b");
    /// map.insert(8, "c");
    /// assert_eq!(map.height(), 1);
    ///
    /// // Sorted insertion degenerates the tree.
    /// let chain: BstMap<i32, ()> = (0..10).map(|k| (k, ())).collect();
    /// assert_eq!(chain.height(), 9);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> isize {
        self.raw.height()
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    /// The map cannot be used after calling this.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<i32> = a.into_keys().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys { inner: self.into_iter() }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    /// The map cannot be used after calling this.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.into_values().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues { inner: self.into_iter() }
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h) to create the iterator; O(1) amortized per iteration step.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter::default();
        push_left(&mut iter.front, self.raw.root());
        push_right(&mut iter.back, self.raw.root());
        iter.remaining = self.raw.len();
        iter
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::from([
    ///    ("a", 1),
    ///    ("b", 2),
    ///    ("c", 3),
    /// ]);
    ///
    /// // add 10 to the value if the key isn't "a"
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map[&"b"], 12);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h) to create the iterator; O(1) amortized per iteration step.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let remaining = self.raw.len();
        let mut iter = IterMut {
            stack: SmallVec::new(),
            remaining,
        };
        push_left_mut(&mut iter.stack, self.raw.root_mut());
        iter
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// This is the same sequence as [`BstMap::inorder_keys`], but double-ended.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<_> = a.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.insert(1, String::from("hello"));
    /// a.insert(2, String::from("goodbye"));
    ///
    /// for value in a.values_mut() {
    ///     value.push_str("!");
    /// }
    ///
    /// let values: Vec<String> = a.values().cloned().collect();
    /// assert_eq!(values, [String::from("hello!"),
    ///                     String::from("goodbye!")]);
    /// ```
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

#[cfg(test)]
impl<K: Ord, V> BstMap<K, V> {
    pub(crate) fn check_invariants(&self) {
        self.raw.check_invariants();
    }
}

fn push_left<'a, K, V>(spine: &mut Spine<'a, K, V>, mut link: Option<&'a Node<K, V>>) {
    while let Some(node) = link {
        spine.push(node);
        link = node.left.as_deref();
    }
}

fn push_right<'a, K, V>(spine: &mut Spine<'a, K, V>, mut link: Option<&'a Node<K, V>>) {
    while let Some(node) = link {
        spine.push(node);
        link = node.right.as_deref();
    }
}

fn push_left_mut<'a, K, V>(
    stack: &mut SmallVec<[PendingMut<'a, K, V>; SPINE]>,
    mut link: Option<&'a mut Node<K, V>>,
) {
    while let Some(node) = link {
        let Node { key, value, left, right } = node;
        stack.push((&*key, value, right.as_deref_mut()));
        link = left.as_deref_mut();
    }
}

impl<K: Clone, V: Clone> Clone for BstMap<K, V> {
    /// Clones the map node by node, so the clone has the same shape
    /// (and therefore the same height and traversal orders) as the original.
    fn clone(&self) -> Self {
        BstMap { raw: self.raw.clone() }
    }
}

impl<K: Hash, V: Hash> Hash for BstMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for BstMap<K, V> {
    /// Two maps are equal when they hold the same entries, whatever their shapes.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for BstMap<K, V> {}

impl<K: PartialOrd, V: PartialOrd> PartialOrd for BstMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord> Ord for BstMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BstMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for BstMap<K, V> {
    fn default() -> Self {
        BstMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = BstMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for BstMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for BstMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a BstMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut BstMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for BstMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map = BstMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        let entries: Vec<(K, V)> = self.raw.drain_to_vec();
        IntoIter {
            inner: entries.into_iter(),
        }
    }
}

impl<K, Q, V> Index<&Q> for BstMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `BstMap`. Use [`BstMap::get`]
    /// for a non-panicking lookup.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BstMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.front.pop()?;
        push_left(&mut self.front, node.right.as_deref());
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.back.pop()?;
        push_right(&mut self.back, node.left.as_deref());
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

impl<K, V> Default for Iter<'_, K, V> {
    /// Creates an empty `bst_map::Iter`.
    ///
    /// ```
    /// # use bst_map::bst_map;
    /// let iter: bst_map::Iter<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: 0,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value, right) = self.stack.pop()?;
        push_left_mut(&mut self.stack, right);
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.remaining).finish()
    }
}

impl<K, V> Default for IterMut<'_, K, V> {
    /// Creates an empty `bst_map::IterMut`.
    ///
    /// ```
    /// # use bst_map::bst_map;
    /// let iter: bst_map::IterMut<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IterMut {
            stack: SmallVec::new(),
            remaining: 0,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    fn default() -> Self {
        IntoIter {
            inner: Vec::new().into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Default for Keys<'_, K, V> {
    fn default() -> Self {
        Keys { inner: Iter::default() }
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Default for Values<'_, K, V> {
    fn default() -> Self {
        Values { inner: Iter::default() }
    }
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("remaining", &self.inner.remaining).finish()
    }
}

impl<K, V> Default for ValuesMut<'_, K, V> {
    fn default() -> Self {
        ValuesMut {
            inner: IterMut::default(),
        }
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for IntoKeys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(k, _)| k)).finish()
    }
}

impl<K, V> Default for IntoKeys<K, V> {
    fn default() -> Self {
        IntoKeys {
            inner: IntoIter::default(),
        }
    }
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoValues<K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for IntoValues<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(_, v)| v)).finish()
    }
}

impl<K, V> Default for IntoValues<K, V> {
    fn default() -> Self {
        IntoValues {
            inner: IntoIter::default(),
        }
    }
}
