/// The order in which a depth-first walk visits the nodes of a tree.
///
/// Only [`Traversal::Inorder`] is tied to key order; the other two expose the
/// shape of the tree and change with insertion order.
///
/// # Examples
///
/// ```
/// use bst_map::{BstMap, Traversal};
///
/// let map = BstMap::from([(2, 'b'), (1, 'a'), (3, 'c')]);
///
/// let preorder: Vec<_> = map.keys_in(Traversal::Preorder).copied().collect();
/// let inorder: Vec<_> = map.keys_in(Traversal::Inorder).copied().collect();
/// let postorder: Vec<_> = map.keys_in(Traversal::Postorder).copied().collect();
///
/// assert_eq!(preorder, [2, 1, 3]);
/// assert_eq!(inorder, [1, 2, 3]);
/// assert_eq!(postorder, [1, 3, 2]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Traversal {
    /// Node, then left subtree, then right subtree.
    Preorder,
    /// Left subtree, then node, then right subtree. Yields keys in ascending order.
    #[default]
    Inorder,
    /// Left subtree, then right subtree, then node.
    Postorder,
}
