//! The public red-black tree and its read-only node view.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::ptr;

use crate::raw::{Color, Handle, RawRbTree};

/// A self-balancing ordered multiset based on a [red-black tree].
///
/// Values are kept sorted by an injected ordering function, a predicate
/// `ge(a, b)` that is true iff `a ≥ b` under the desired total order. Trees
/// over [`Ord`] values get the natural order via [`RbTree::new`]; any other
/// order is supplied through [`RbTree::with_ordering`] or
/// [`RbTree::set_ordering`] *before* the first insert.
///
/// Equal values are stored as distinct nodes — inserting a value twice
/// yields a length of two, and each copy takes its own [`remove`] call.
/// Ties route into the right subtree, so duplicates keep a deterministic
/// placement relative to insertion order.
///
/// Lookups match on strict value equality (`==`): the ordering function
/// only steers the descent. A value the ordering considers equal to a
/// stored one but which is not `==` to it will not be found — intentional,
/// so that values distinguished only by fields outside the ordering stay
/// distinguishable.
///
/// The ordering function must be a consistent total order; the tree does
/// not validate this, and an inconsistent predicate yields unspecified (but
/// memory-safe) search and traversal results.
///
/// # Examples
///
/// ```
/// use carmine_tree::RbTree;
///
/// let mut heights = RbTree::new();
/// heights.insert(184).insert(151).insert(170);
///
/// assert_eq!(heights.len(), 3);
/// assert_eq!(heights.min_value(), Some(&151));
/// assert_eq!(heights.max_value(), Some(&184));
/// assert_eq!(heights.in_order(), [&151, &170, &184]);
///
/// assert!(heights.remove(&170));
/// assert!(!heights.contains(&170));
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RbTree<V> {
    raw: RawRbTree<V>,
}

impl<V: Ord + 'static> RbTree<V> {
    /// Creates an empty tree ordered by the natural [`Ord`] order.
    ///
    /// # Examples
    ///
    /// ```
    /// use carmine_tree::RbTree;
    ///
    /// let tree: RbTree<i32> = RbTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            raw: RawRbTree::new(Box::new(|a, b| a >= b)),
        }
    }

    /// Creates an empty naturally-ordered tree with room for `capacity`
    /// nodes before the arena reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: RawRbTree::with_capacity(capacity, Box::new(|a, b| a >= b)),
        }
    }
}

impl<V: Ord + 'static> Default for RbTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RbTree<V> {
    /// Creates an empty tree ordered by a caller-supplied predicate.
    ///
    /// `ge(a, b)` must return true iff `a ≥ b` under a consistent total
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use carmine_tree::RbTree;
    ///
    /// let mut tree = RbTree::with_ordering(|a: &&str, b: &&str| a.len() >= b.len());
    /// tree.insert("ccc").insert("a").insert("bb");
    /// assert_eq!(tree.in_order(), [&"a", &"bb", &"ccc"]);
    /// ```
    pub fn with_ordering<F>(ge: F) -> Self
    where
        F: Fn(&V, &V) -> bool + 'static,
    {
        Self {
            raw: RawRbTree::new(Box::new(ge)),
        }
    }

    /// Replaces the ordering function, returning the tree for chaining.
    ///
    /// Call this before the first insert: nodes already placed under the
    /// previous order are not re-sorted, and mixing orders breaks search.
    pub fn set_ordering<F>(&mut self, ge: F) -> &mut Self
    where
        F: Fn(&V, &V) -> bool + 'static,
    {
        self.raw.set_ordering(Box::new(ge));
        self
    }

    /// Inserts a value, returning the tree for chaining.
    ///
    /// Duplicates are kept: every insert grows [`len`](Self::len) by one.
    /// O(log n).
    ///
    /// # Examples
    ///
    /// ```
    /// use carmine_tree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(2).insert(2).insert(1);
    /// assert_eq!(tree.len(), 3);
    /// ```
    pub fn insert(&mut self, value: V) -> &mut Self {
        self.raw.insert(value);
        self
    }

    /// Removes one node equal (`==`) to `value`, returning whether a node
    /// was removed. Absent values are a no-op, not an error. O(log n).
    pub fn remove(&mut self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.raw.remove(value)
    }

    /// Returns true if a node equal (`==`) to `value` is present. O(log n).
    #[must_use]
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.raw.search(value).is_some()
    }

    /// Finds the node holding a value equal (`==`) to `value`.
    ///
    /// The returned [`NodeRef`] exposes read access to the node's value,
    /// color, and neighbors; prefer [`contains`](Self::contains) and the
    /// value accessors unless the structure itself is of interest.
    #[must_use]
    pub fn find(&self, value: &V) -> Option<NodeRef<'_, V>>
    where
        V: PartialEq,
    {
        self.raw.search(value).map(|handle| NodeRef { raw: &self.raw, handle })
    }

    /// Returns the root node, or `None` for an empty tree.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, V>> {
        self.raw.root().map(|handle| NodeRef { raw: &self.raw, handle })
    }

    /// Returns the node holding the smallest value, or `None` when empty.
    #[must_use]
    pub fn min(&self) -> Option<NodeRef<'_, V>> {
        self.root().map(|root| root.min())
    }

    /// Returns the node holding the largest value, or `None` when empty.
    #[must_use]
    pub fn max(&self) -> Option<NodeRef<'_, V>> {
        self.root().map(|root| root.max())
    }

    /// Returns the smallest value, or `None` when empty. O(log n).
    #[must_use]
    pub fn min_value(&self) -> Option<&V> {
        self.min().map(|node| node.value())
    }

    /// Returns the largest value, or `None` when empty. O(log n).
    #[must_use]
    pub fn max_value(&self) -> Option<&V> {
        self.max().map(|node| node.value())
    }

    /// Materializes the full ascending value sequence (ascending under the
    /// active ordering). O(n).
    #[must_use]
    pub fn in_order(&self) -> Vec<&V> {
        self.raw.in_order_from(self.raw.root())
    }

    /// Returns the number of values currently present, duplicates counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the tree contains no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Returns the number of nodes the arena can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Releases every node and resets the length to zero. The ordering
    /// function is kept.
    pub fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<V: fmt::Debug> fmt::Debug for RbTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.in_order()).finish()
    }
}

impl<V: Ord + 'static> FromIterator<V> for RbTree<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<V> Extend<V> for RbTree<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// A read-only view of a single tree node.
///
/// Obtained from [`RbTree::find`], [`RbTree::root`], [`RbTree::min`], or
/// [`RbTree::max`], and navigated through [`left`](NodeRef::left),
/// [`right`](NodeRef::right), [`parent`](NodeRef::parent), and
/// [`successor`](NodeRef::successor). A `NodeRef` borrows the tree, so no
/// view can coexist with a mutation.
///
/// # Examples
///
/// ```
/// use carmine_tree::{Color, RbTree};
///
/// let mut tree = RbTree::new();
/// tree.insert(2).insert(1).insert(3);
///
/// let root = tree.root().unwrap();
/// assert_eq!(root.color(), Color::Black);
/// assert_eq!(root.left().unwrap().value(), &1);
/// assert_eq!(root.min().value(), &1);
/// ```
pub struct NodeRef<'a, V> {
    raw: &'a RawRbTree<V>,
    handle: Handle,
}

impl<'a, V> NodeRef<'a, V> {
    /// Returns the node's value.
    #[must_use]
    pub fn value(&self) -> &'a V {
        self.raw.node(self.handle).value()
    }

    /// Returns the node's color tag.
    #[must_use]
    pub fn color(&self) -> Color {
        self.raw.node(self.handle).color()
    }

    /// Returns true if the node is red.
    #[must_use]
    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    /// Returns true if the node is black.
    #[must_use]
    pub fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    /// Returns the left child, if present.
    #[must_use]
    pub fn left(&self) -> Option<NodeRef<'a, V>> {
        self.raw.node(self.handle).left().map(|handle| NodeRef { raw: self.raw, handle })
    }

    /// Returns the right child, if present.
    #[must_use]
    pub fn right(&self) -> Option<NodeRef<'a, V>> {
        self.raw.node(self.handle).right().map(|handle| NodeRef { raw: self.raw, handle })
    }

    /// Returns the parent, or `None` when this node is the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a, V>> {
        self.raw.node(self.handle).parent().map(|handle| NodeRef { raw: self.raw, handle })
    }

    /// Returns the node holding the smallest value in this subtree.
    #[must_use]
    pub fn min(&self) -> NodeRef<'a, V> {
        NodeRef {
            raw: self.raw,
            handle: self.raw.min_from(self.handle),
        }
    }

    /// Returns the node holding the largest value in this subtree.
    #[must_use]
    pub fn max(&self) -> NodeRef<'a, V> {
        NodeRef {
            raw: self.raw,
            handle: self.raw.max_from(self.handle),
        }
    }

    /// Returns the in-order successor within the whole tree, or `None` when
    /// this node holds the largest value.
    #[must_use]
    pub fn successor(&self) -> Option<NodeRef<'a, V>> {
        self.raw.successor(self.handle).map(|handle| NodeRef { raw: self.raw, handle })
    }

    /// Materializes the ascending value sequence of this subtree. O(n).
    #[must_use]
    pub fn in_order(&self) -> Vec<&'a V> {
        self.raw.in_order_from(Some(self.handle))
    }
}

impl<V> Clone for NodeRef<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NodeRef<'_, V> {}

/// Node identity: two views are equal iff they point at the same node of
/// the same tree, independent of the values held.
impl<V> PartialEq for NodeRef<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.raw, other.raw) && self.handle == other.handle
    }
}

impl<V> Eq for NodeRef<'_, V> {}

impl<V: fmt::Debug> fmt::Debug for NodeRef<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", self.value())
            .field("color", &self.color())
            .finish_non_exhaustive()
    }
}
