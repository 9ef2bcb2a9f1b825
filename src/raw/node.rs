use alloc::boxed::Box;

/// An owned, possibly empty subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

// Every key in `left` is less than `key`, every key in `right` is greater.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a new leaf node.
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    /// Returns a boxed leaf, ready to be linked into a parent slot.
    pub(crate) fn boxed(key: K, value: V) -> Box<Self> {
        Box::new(Self::new(key, value))
    }

    /// Returns the leftmost (minimum) node of this subtree.
    pub(crate) fn leftmost(&self) -> &Self {
        let mut current = self;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        current
    }

    /// Returns the rightmost (maximum) node of this subtree.
    pub(crate) fn rightmost(&self) -> &Self {
        let mut current = self;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        current
    }

    /// Consumes the node, returning its entry.
    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Detaches the leftmost node of the subtree in `link`.
///
/// The detached node's right child takes its place; the returned node has no links.
/// Walks down with a cursor, so the depth of the subtree does not matter.
pub(crate) fn take_leftmost<K, V>(mut link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    while link.as_ref().is_some_and(|node| node.left.is_some()) {
        match link {
            Some(node) => link = &mut node.left,
            None => break,
        }
    }
    let mut leftmost = link.take()?;
    *link = leftmost.right.take();
    Some(leftmost)
}

/// Detaches the rightmost node of the subtree in `link`.
///
/// Mirror image of [`take_leftmost`].
pub(crate) fn take_rightmost<K, V>(mut link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    while link.as_ref().is_some_and(|node| node.right.is_some()) {
        match link {
            Some(node) => link = &mut node.right,
            None => break,
        }
    }
    let mut rightmost = link.take()?;
    *link = rightmost.left.take();
    Some(rightmost)
}
