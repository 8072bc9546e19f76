//! A mutable, node-linked BST that stays sorted and rebalances on demand.
//!
//! Items act as their own keys. Items that compare equal are all kept: a new item equal to an
//! existing one is routed into that node's right subtree. Nothing is rebalanced automatically;
//! call [`OrderedTree::rebalance`] to rebuild the tree at minimal height.
//!
//! Removing a node with two children moves the largest item of its left subtree up into it. If
//! that item has duplicates, one of them stays behind in the left subtree, so a left subtree
//! may hold items *equal* to its parent. Searches are unaffected: they only go left for items
//! strictly less than the node.
//!
//! Every walk over the tree (insertion, search, removal, traversal, drop, ...) is iterative so a
//! degenerate tree, e.g. one built from already sorted input, can't overflow the stack.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{OrderedTree, TreeError};
//!
//! let mut tree: OrderedTree<_> = [5, 3, 8, 1, 4].into_iter().collect();
//!
//! assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
//! assert_eq!(tree.find(&4), Some(&4));
//! assert_eq!(tree.find(&9), None);
//!
//! // Removing an item hands it back.
//! assert_eq!(tree.remove(&3), Ok(3));
//! assert_eq!(tree.len(), 4);
//!
//! // Removing it again fails and leaves the tree alone.
//! assert_eq!(tree.remove(&3), Err(TreeError::NotFound));
//! assert_eq!(tree.len(), 4);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::{debug, trace};

use crate::error::{Result, TreeError};
use crate::iter::{InOrder, Iter};

type Link<T> = Option<Box<Node<T>>>;

/// A Binary Search Tree of totally ordered items. This can be used for adding, finding, and
/// removing items, for walking them in order, and for neighbor and range queries.
///
/// The left subtree of every node holds items less than or equal to the node's item and the
/// right subtree holds items greater than or equal to it. Adding only ever puts equal items on
/// the right; they end up on the left only through [`remove`][Self::remove].
pub struct OrderedTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OrderedTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> OrderedTree<T> {
    /// Generates a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns `true` if the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns how many items are in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes every item from the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = (0..10).collect();
    /// tree.clear();
    ///
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.len(), 0);
    /// ```
    pub fn clear(&mut self) {
        // Unlink nodes one at a time so dropping a long chain doesn't recurse.
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }

        if self.len > 0 {
            trace!("cleared {} items", self.len);
        }
        self.len = 0;
    }

    /// Returns a preorder iterator: each node's item, then its left subtree, then its right
    /// subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [2, 1, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Returns an iterator over the items in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [2, 3, 1, 2].into_iter().collect();
    ///
    /// assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 2, 2, 3]);
    /// ```
    pub fn inorder(&self) -> InOrder<'_, T> {
        InOrder::new(self.root.as_deref(), self.len)
    }

    /// Gets the height of the tree: the largest number of edges between the root and a leaf.
    /// A tree with a single item has a height of `0`. An empty tree has no height.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.height(), None);
    ///
    /// tree.add(1);
    /// assert_eq!(tree.height(), Some(0));
    ///
    /// tree.add(2);
    /// assert_eq!(tree.height(), Some(1));
    /// ```
    pub fn height(&self) -> Option<usize> {
        let root = self.root.as_deref()?;

        let mut height = 0;
        let mut stack = vec![(root, 0)];
        while let Some((node, depth)) = stack.pop() {
            if node.is_leaf() {
                height = height.max(depth);
            }
            stack.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            stack.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }

        Some(height)
    }

    /// Returns `true` if the tree is shallow enough to count as balanced, i.e. its height is
    /// less than `2 * log2(len + 1) - 1`. This is a global check, looser than an AVL tree's
    /// per-node balance factor. An empty tree is balanced.
    pub fn is_balanced(&self) -> bool {
        match self.height() {
            None => true,
            Some(height) => (height as f64) < 2.0 * ((self.len + 1) as f64).log2() - 1.0,
        }
    }

    /// Consumes the tree, returning its items in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.len);
        let mut stack: Vec<Box<Node<T>>> = Vec::new();
        let mut cursor = self.root.take();
        self.len = 0;

        loop {
            while let Some(mut node) = cursor {
                cursor = node.left.take();
                stack.push(node);
            }
            let Some(node) = stack.pop() else {
                break;
            };
            let Node { item, right, .. } = *node;
            items.push(item);
            cursor = right;
        }

        items
    }
}

impl<T: Ord> OrderedTree<T> {
    /// Finds the stored item equal to the given one. If no item compares equal, `None` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = ["pear", "apple"].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&"apple"), Some(&"apple"));
    /// assert_eq!(tree.find(&"plum"), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            match item.cmp(&node.item) {
                Ordering::Less => cursor = node.left.as_deref(),
                Ordering::Equal => return Some(&node.item),
                Ordering::Greater => cursor = node.right.as_deref(),
            }
        }
        None
    }

    /// Returns `true` if an item equal to the given one is in the tree.
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }

    /// Adds the item to the tree. Duplicates are kept: an item equal to one already stored goes
    /// into that item's right subtree. The tree is not rebalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.add(1);
    /// tree.add(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.find(&1), Some(&1));
    /// ```
    pub fn add(&mut self, item: T) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if item < node.item {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Node::new_boxed(item));
        self.len += 1;
    }

    /// Removes the item equal to the given one and returns it. Among duplicates, the one closest
    /// to the root is removed.
    ///
    /// If the matching node has two children, the largest item of its left subtree moves up
    /// into it and that item's node is unlinked instead. When that largest item is duplicated,
    /// the copy left behind sits in the left subtree of an equal item.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if no stored item is equal. The tree is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{OrderedTree, TreeError};
    ///
    /// let mut tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&2), Ok(2));
    /// assert_eq!(tree.remove(&2), Err(TreeError::NotFound));
    /// assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T> {
        let mut slot = &mut self.root;
        loop {
            let ordering = match slot.as_deref() {
                Some(node) => item.cmp(&node.item),
                None => {
                    trace!("remove missed, {} items untouched", self.len);
                    return Err(TreeError::NotFound);
                }
            };
            if ordering == Ordering::Equal {
                break;
            }
            if let Some(node) = slot {
                slot = match ordering {
                    Ordering::Less => &mut node.left,
                    _ => &mut node.right,
                };
            }
        }

        let removed = Node::unlink(slot).expect("search stopped on the matching node");
        self.len -= 1;
        Ok(removed)
    }

    /// Overwrites the stored item equal to `item` with `new_item`, returning the old one. If no
    /// item compares equal, nothing changes and `None` is returned.
    ///
    /// The node is overwritten in place and the tree is **not** re-sorted. The caller must make
    /// sure `new_item` sorts between the node's neighbors, otherwise later searches may miss
    /// items. [`is_ordered`][Self::is_ordered] can check this afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&20, 25), Some(20));
    /// assert_eq!(tree.replace(&99, 100), None);
    /// assert!(tree.is_ordered());
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T> {
        self.find_mut(item)
            .map(|slot| mem::replace(slot, new_item))
    }

    /// Returns every item `x` with `low <= x <= high`, in ascending order.
    ///
    /// This filters a full in-order walk, so it costs `O(n)` whatever the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = (1..=10).collect();
    ///
    /// assert_eq!(tree.range_find(&3, &6), [&3, &4, &5, &6]);
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T> {
        self.inorder()
            .filter(|item| low <= *item && *item <= high)
            .collect()
    }

    /// Rebuilds the tree at minimal height. The items are drained in sorted order and added
    /// back median first, then the median of each half, and so on.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// // Sorted input gives a chain.
    /// let mut tree: OrderedTree<_> = (1..=7).collect();
    /// assert_eq!(tree.height(), Some(6));
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.height(), Some(2));
    /// assert!(tree.inorder().copied().eq(1..=7));
    /// ```
    pub fn rebalance(&mut self) {
        let height_before = self.height();
        let mut items: Vec<Option<T>> = mem::take(self)
            .into_sorted_vec()
            .into_iter()
            .map(Some)
            .collect();

        // Half-open ranges of `items` still to be added.
        let mut ranges = vec![(0, items.len())];
        while let Some((low, high)) = ranges.pop() {
            if low >= high {
                continue;
            }
            let middle = low + (high - low) / 2;
            if let Some(item) = items[middle].take() {
                self.add(item);
            }
            ranges.push((middle + 1, high));
            ranges.push((low, middle));
        }

        debug!(
            "rebalanced {} items, height {:?} -> {:?}",
            self.len,
            height_before,
            self.height()
        );
    }

    /// Returns the smallest item strictly greater than the given one, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&20), Some(&30));
    /// assert_eq!(tree.successor(&15), Some(&20));
    /// assert_eq!(tree.successor(&30), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T> {
        self.inorder().find(|stored| *stored > item)
    }

    /// Returns the largest item strictly less than the given one, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&20), Some(&10));
    /// assert_eq!(tree.predecessor(&25), Some(&20));
    /// assert_eq!(tree.predecessor(&10), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T> {
        let ascending: Vec<&T> = self.inorder().collect();
        ascending.into_iter().rev().find(|stored| *stored < item)
    }

    /// Returns `true` if every node's left subtree holds only smaller or equal items and its
    /// right subtree only greater or equal ones. This only fails after a careless
    /// [`replace`][Self::replace].
    pub fn is_ordered(&self) -> bool {
        // Each node carries the bounds its ancestors impose: `lower <= item <= upper`.
        let mut stack: Vec<(&Node<T>, Option<&T>, Option<&T>)> = self
            .root
            .as_deref()
            .map(|root| (root, None, None))
            .into_iter()
            .collect();

        while let Some((node, lower, upper)) = stack.pop() {
            if lower.is_some_and(|lower| node.item < *lower)
                || upper.is_some_and(|upper| node.item > *upper)
            {
                return false;
            }
            stack.extend(
                node.left
                    .as_deref()
                    .map(|left| (left, lower, Some(&node.item))),
            );
            stack.extend(
                node.right
                    .as_deref()
                    .map(|right| (right, Some(&node.item), upper)),
            );
        }

        true
    }

    fn find_mut(&mut self, item: &T) -> Option<&mut T> {
        let mut cursor = self.root.as_deref_mut();
        while let Some(node) = cursor {
            match item.cmp(&node.item) {
                Ordering::Less => cursor = node.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.item),
                Ordering::Greater => cursor = node.right.as_deref_mut(),
            }
        }
        None
    }
}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    /// Builds a tree by adding each item in iteration order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for OrderedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Copies node by node so the clone has exactly the same shape, including any duplicates a
/// removal left in a left subtree.
impl<T: Clone> Clone for OrderedTree<T> {
    fn clone(&self) -> Self {
        // Walking node, right, left and reversing gives left, right, node: every node comes
        // after both of its subtrees.
        let mut postorder = Vec::with_capacity(self.len);
        let mut pending: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            postorder.push(node);
            pending.extend(node.left.as_deref());
            pending.extend(node.right.as_deref());
        }

        // Finished subtrees, the most recent on top.
        let mut built: Vec<Box<Node<T>>> = Vec::new();
        for node in postorder.into_iter().rev() {
            let right = node
                .right
                .as_ref()
                .map(|_| built.pop().expect("right subtree is built before its parent"));
            let left = node
                .left
                .as_ref()
                .map(|_| built.pop().expect("left subtree is built before its parent"));
            built.push(Box::new(Node {
                item: node.item.clone(),
                left,
                right,
            }));
        }

        Self {
            root: built.pop(),
            len: self.len,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inorder()).finish()
    }
}

/// Draws the tree on its side: the right subtree above each node and the left subtree below,
/// one line per item, indented with a `| ` per level.
///
/// ```text
/// | 8
/// 5
/// | | 4
/// | 3
/// | | 1
/// ```
impl<T: fmt::Display> fmt::Display for OrderedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Vec::new();
        let mut cursor = self.root.as_deref().map(|root| (root, 0));
        loop {
            while let Some((node, level)) = cursor {
                stack.push((node, level));
                cursor = node.right.as_deref().map(|right| (right, level + 1));
            }
            let Some((node, level)) = stack.pop() else {
                break;
            };
            writeln!(f, "{}{}", "| ".repeat(level), node.item)?;
            cursor = node.left.as_deref().map(|left| (left, level + 1));
        }
        Ok(())
    }
}

/// A `Node` holds one item and owns its (optional) children.
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(item: T) -> Box<Self> {
        Box::new(Self {
            item,
            left: None,
            right: None,
        })
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Removes the node in `slot` from the tree, returning its item, or `None` if the slot is
    /// empty.
    ///
    /// A node with two children isn't unlinked itself. It takes the largest item of its left
    /// subtree, and that item's node is unlinked instead.
    fn unlink(slot: &mut Link<T>) -> Option<T> {
        if let Some(node) = slot
            .as_mut()
            .filter(|node| node.left.is_some() && node.right.is_some())
        {
            let predecessor =
                Self::pop_max(&mut node.left).expect("two-child node has a left child");
            return Some(mem::replace(&mut node.item, predecessor));
        }

        // At most one child, which takes this node's place.
        let node = slot.take()?;
        let Node { item, left, right } = *node;
        *slot = left.or(right);
        Some(item)
    }

    /// Removes the largest node of the subtree in `slot` and returns its item. That node has no
    /// right child so its left child (if any) takes its place.
    fn pop_max(mut slot: &mut Link<T>) -> Option<T> {
        while slot.as_ref().is_some_and(|node| node.right.is_some()) {
            if let Some(node) = slot {
                slot = &mut node.right;
            }
        }

        let node = slot.take()?;
        let Node { item, left, .. } = *node;
        *slot = left;
        Some(item)
    }
}
