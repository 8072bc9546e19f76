//! This crate exposes a Binary Search Tree (BST) of ordered items that can be rebuilt at minimal
//! height on demand, along with the order-statistics queries a sorted collection needs.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! add, find, and remove stored items. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores an item
//! and will sometimes have child `Node`s. The most important invariants
//! of this BST are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have an item
//!    less than or equal to its own item.
//! 2. For every `Node`, all the `Node`s in its right subtree have an item
//!    greater than or equal to its own item. Equal items are kept, not merged.
//!
//! Adding an item equal to a stored one always sends it right. An equal item only lands on
//! the left when a removal promotes one of several duplicates (see [`OrderedTree::remove`]).
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! items in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). The tree doesn't balance itself
//! as items are added: adding already sorted items builds a chain whose height is
//! `N - 1`. [`OrderedTree::rebalance`] rebuilds it so the height is `O(lg N)` again.
//! BSTs also naturally support sorted iteration by visiting the left subtree, then
//! the subtree root, then the right subtree.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree: OrderedTree<_> = (1..=7).collect();
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.successor(&4), Some(&5));
//! assert_eq!(tree.range_find(&2, &4), [&2, &3, &4]);
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod iter;
pub mod ordered;


pub use error::{Result, TreeError};
pub use iter::{InOrder, Iter};
pub use ordered::OrderedTree;
