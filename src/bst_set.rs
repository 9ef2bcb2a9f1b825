use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::BstMap;
use crate::bst_map::{IntoKeys, Keys, TraversalKeys};
use crate::Traversal;

/// An ordered set based on an unbalanced binary search tree.
///
/// See [`BstMap`]'s documentation for a discussion of this collection's performance
/// characteristics; a `BstSet<T>` is a `BstMap<T, ()>` underneath.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use bst_map::BstSet;
///
/// // Type inference lets us omit an explicit type signature (which
/// // would be `BstSet<&str>` in this example).
/// let mut stopwords = BstSet::new();
///
/// stopwords.insert("the");
/// stopwords.insert("and");
/// stopwords.insert("a");
///
/// if !stopwords.contains("movie") {
///     println!("{} stopwords, and \"movie\" is not one of them.", stopwords.len());
/// }
///
/// stopwords.remove("a");
///
/// for word in &stopwords {
///     println!("{word}");
/// }
/// ```
///
/// A `BstSet` with a known list of items can be initialized from an array:
///
/// ```
/// use bst_map::BstSet;
///
/// let set = BstSet::from([1, 2, 3]);
/// ```
pub struct BstSet<T> {
    map: BstMap<T, ()>,
}

/// An iterator over the items of a `BstSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`BstSet`].
///
/// # Examples
///
/// ```
/// use bst_map::BstSet;
///
/// let set = BstSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// ```
///
/// [`iter`]: BstSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: Keys<'a, T, ()>,
}

/// An owning iterator over the items of a `BstSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`BstSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: BstSet#method.into_iter
pub struct IntoIter<T> {
    inner: IntoKeys<T, ()>,
}

impl<T> BstSet<T> {
    /// Makes a new, empty `BstSet`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let mut set: BstSet<i32> = BstSet::new();
    /// ```
    #[must_use]
    pub const fn new() -> BstSet<T> {
        BstSet { map: BstMap::new() }
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let mut v = BstSet::new();
    /// v.insert(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// The value may be any borrowed form of the set's element type,
    /// but the ordering on the borrowed form *must* match the
    /// ordering on the element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let set = BstSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.contains_key(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal to
    /// the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let set = BstSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.get_key_value(value).map(|(k, ())| k)
    }

    /// Returns a reference to the first element in the set, if any.
    /// This element is always the minimum of all elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, ())| k)
    }

    /// Returns a reference to the last element in the set, if any.
    /// This element is always the maximum of all elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// assert_eq!(set.last(), None);
    /// set.insert(1);
    /// assert_eq!(set.last(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.last(), Some(&2));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(k, ())| k)
    }

    /// Removes the first element from the set and returns it, if any.
    /// The first element is always the minimum element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let mut set = BstSet::new();
    ///
    /// set.insert(1);
    /// while let Some(n) = set.pop_first() {
    ///     assert_eq!(n, 1);
    /// }
    /// assert!(set.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        self.map.pop_first().map(|(k, ())| k)
    }

    /// Removes the last element from the set and returns it, if any.
    /// The last element is always the maximum element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let mut set = BstSet::new();
    ///
    /// set.insert(1);
    /// while let Some(n) = set.pop_last() {
    ///     assert_eq!(n, 1);
    /// }
    /// assert!(set.is_empty());
    /// ```
    pub fn pop_last(&mut self) -> Option<T> {
        self.map.pop_last().map(|(k, ())| k)
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal value, `true` is
    ///   returned.
    /// - If the set already contained an equal value, `false` is returned, and
    ///   the entry is not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let mut set = BstSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        self.map.insert(value, ()).is_none()
    }

    /// If the set contains an element equal to the value, removes it from the
    /// set and drops it. Returns whether such an element was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the value in the set, if any, that is equal to the given one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// set.insert(2);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.map.remove_entry(value).map(|(k, ())| k)
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` for which `f(&e)` returns `false`.
    /// The elements are visited in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let mut set: BstSet<i32> = (0..8).collect();
    /// // Keep only the elements with even-numbered values.
    /// set.retain(|&k| k % 2 == 0);
    /// assert!(set.into_iter().eq(vec![0, 2, 4, 6]));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.map.retain(|k, ()| f(k));
    }

    /// Returns the height of the underlying tree: -1 for an empty set, 0 for a single element.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let set = BstSet::from([2, 1, 3]);
    /// assert_eq!(set.height(), 1);
    /// ```
    #[must_use]
    pub fn height(&self) -> isize {
        self.map.height()
    }

    /// Gets an iterator over the elements in the given traversal order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::{BstSet, Traversal};
    ///
    /// let set = BstSet::from([2, 1, 3]);
    /// let post: Vec<_> = set.iter_in(Traversal::Postorder).copied().collect();
    /// assert_eq!(post, [1, 3, 2]);
    /// ```
    pub fn iter_in(&self, order: Traversal) -> TraversalKeys<'_, T, ()> {
        self.map.keys_in(order)
    }

    /// Gets an iterator over the elements in preorder. See [`BstMap::preorder_keys`].
    pub fn preorder(&self) -> TraversalKeys<'_, T, ()> {
        self.map.preorder_keys()
    }

    /// Gets an iterator over the elements in inorder, which is ascending order.
    pub fn inorder(&self) -> TraversalKeys<'_, T, ()> {
        self.map.inorder_keys()
    }

    /// Gets an iterator over the elements in postorder. See [`BstMap::postorder_keys`].
    pub fn postorder(&self) -> TraversalKeys<'_, T, ()> {
        self.map.postorder_keys()
    }

    /// Gets an iterator that visits the elements in the `BstSet` in ascending
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let set = BstSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), Some(&3));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.map.keys() }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let mut v = BstSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let mut v = BstSet::new();
    /// assert!(v.is_empty());
    /// v.insert(1);
    /// assert!(!v.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<T: Hash> Hash for BstSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl<T: PartialEq> PartialEq for BstSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T: Eq> Eq for BstSet<T> {}

impl<T: Clone> Clone for BstSet<T> {
    fn clone(&self) -> Self {
        BstSet { map: self.map.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for BstSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for BstSet<T> {
    fn default() -> Self {
        BstSet::new()
    }
}

impl<T: Ord> FromIterator<T> for BstSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = BstSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for BstSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for BstSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for BstSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for BstSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `BstSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstSet;
    ///
    /// let set = BstSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.map.into_keys(),
        }
    }
}

impl<'a, T> IntoIterator for &'a BstSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.inner.clone()).finish()
    }
}

impl<T> Default for Iter<'_, T> {
    /// Creates an empty `bst_set::Iter`.
    ///
    /// ```
    /// # use bst_map::bst_set;
    /// let iter: bst_set::Iter<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter { inner: Keys::default() }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<T> Default for IntoIter<T> {
    fn default() -> Self {
        IntoIter {
            inner: IntoKeys::default(),
        }
    }
}
