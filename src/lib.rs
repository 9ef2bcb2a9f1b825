//! Unbalanced binary search tree collections for Rust.
//!
//! This crate provides [`BstMap`] and [`BstSet`], ordered collections whose API mirrors the
//! standard library's `BTreeMap` and `BTreeSet`, backed by a plain binary search tree:
//! one heap node per entry, each node owning its left and right subtrees.
//!
//! On top of the familiar map operations, the tree shape is observable:
//!
//! - [`height`](BstMap::height) - Longest root-to-leaf path, `-1` for an empty map
//! - [`preorder_keys`](BstMap::preorder_keys), [`inorder_keys`](BstMap::inorder_keys),
//!   [`postorder_keys`](BstMap::postorder_keys) - Depth-first walks in each [`Traversal`] order
//!
//! # Example
//!
//! ```
//! use bst_map::BstMap;
//!
//! let mut word_counts = BstMap::new();
//! word_counts.insert("movie", 1);
//! word_counts.insert("great", 1);
//! word_counts.insert("plot", 1);
//!
//! // Overwriting keeps the size unchanged.
//! word_counts.insert("movie", 2);
//! assert_eq!(word_counts.len(), 3);
//! assert_eq!(word_counts.get("movie"), Some(&2));
//! assert_eq!(word_counts.get("boring"), None);
//!
//! // "movie" was inserted first, so it is the root.
//! assert_eq!(word_counts.height(), 1);
//! assert_eq!(word_counts.preorder_keys().next(), Some(&"movie"));
//!
//! // In-order traversal is always sorted.
//! let sorted: Vec<_> = word_counts.inorder_keys().copied().collect();
//! assert_eq!(sorted, ["great", "movie", "plot"]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Familiar API** - Mirrors `std::collections::BTreeMap`/`BTreeSet`
//! - **No rebalancing** - The shape is fully determined by the order of insertions and removals
//!
//! # Implementation
//!
//! Lookups and insertions walk down from the root. Removal of a node with two children
//! moves its in-order successor (the leftmost node of its right subtree) into its place.
//! Removal, cloning, iteration, height, and teardown use cursors or explicit stacks
//! instead of recursion.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod raw;
mod traversal;

pub mod bst_map;
pub mod bst_set;

pub use bst_map::BstMap;
pub use bst_set::BstSet;
pub use traversal::Traversal;
