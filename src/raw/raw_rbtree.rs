use alloc::boxed::Box;
use alloc::vec::Vec;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node};

/// Ordering predicate: `ge(a, b)` is true iff `a` is greater than or equal
/// to `b` under the tree's total order.
pub(crate) type OrderFn<V> = Box<dyn Fn(&V, &V) -> bool>;

/// Type alias for the explicit traversal stack.
///
/// The inline capacity covers the maximum height of trees up to tens of
/// thousands of nodes without spilling to the heap.
type TraversalStack = SmallVec<[Handle; 32]>;

/// The balancing engine backing `RbTree`.
///
/// Invariants, holding after every completed public operation:
/// 1. the root is black (or the tree is empty);
/// 2. no red node has a red child;
/// 3. every root-to-nil path crosses the same number of black nodes,
///    counting absent children as black;
/// 4. `parent` links are the exact inverse of the owning child links.
///
/// A state that contradicts these mid-fix-up indicates a bug in the engine
/// itself and panics with a tagged message rather than being tolerated.
pub(crate) struct RawRbTree<V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of values currently present (duplicates counted).
    len: usize,
    /// The injected ordering; ties route into the right subtree.
    ge: OrderFn<V>,
}

impl<V> RawRbTree<V> {
    pub(crate) fn new(ge: OrderFn<V>) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            ge,
        }
    }

    pub(crate) fn with_capacity(capacity: usize, ge: OrderFn<V>) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            ge,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Replaces the ordering function. Only meaningful on an empty tree;
    /// nodes already placed under the previous order are not re-sorted.
    pub(crate) fn set_ordering(&mut self, ge: OrderFn<V>) {
        self.ge = ge;
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<V> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<V> {
        self.nodes.get_mut(handle)
    }

    /// True when the slot holds a red node. Absent children are black.
    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.node(h).is_red())
    }

    /// True when the slot is absent or holds a black node.
    #[inline]
    fn black_or_nil(&self, handle: Option<Handle>) -> bool {
        !self.is_red(handle)
    }

    /// Leftmost node of the subtree rooted at `handle`.
    pub(crate) fn min_from(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left() {
            handle = left;
        }
        handle
    }

    /// Rightmost node of the subtree rooted at `handle`.
    pub(crate) fn max_from(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right() {
            handle = right;
        }
        handle
    }

    /// In-order successor: leftmost of the right subtree, else the nearest
    /// ancestor of which the node lies in the left subtree.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.node(handle).right() {
            return Some(self.min_from(right));
        }
        let mut child = handle;
        let mut ancestor = self.node(child).parent();
        while let Some(above) = ancestor {
            if self.node(above).right() != Some(child) {
                break;
            }
            child = above;
            ancestor = self.node(above).parent();
        }
        ancestor
    }

    /// Materializes the ascending value sequence of the subtree at `start`.
    ///
    /// Iterative with an explicit stack, so tree depth never translates
    /// into call-stack depth.
    pub(crate) fn in_order_from(&self, start: Option<Handle>) -> Vec<&V> {
        let mut out = Vec::new();
        let mut stack = TraversalStack::new();
        let mut cursor = start;
        while cursor.is_some() || !stack.is_empty() {
            while let Some(handle) = cursor {
                stack.push(handle);
                cursor = self.node(handle).left();
            }
            if let Some(handle) = stack.pop() {
                out.push(self.node(handle).value());
                cursor = self.node(handle).right();
            }
        }
        out
    }
}

impl<V> RawRbTree<V> {
    /// Finds a node holding a value strictly equal to `value`.
    ///
    /// Equality (`==`) decides the match; the ordering function only routes
    /// the descent (≥ goes right, otherwise left). A value that is
    /// ordering-equal to a stored one but not `==` is therefore not found.
    pub(crate) fn search(&self, value: &V) -> Option<Handle>
    where
        V: PartialEq,
    {
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.node(handle);
            if *node.value() == *value {
                return Some(handle);
            }
            cursor = if (self.ge)(value, node.value()) { node.right() } else { node.left() };
        }
        None
    }

    /// Inserts `value`, keeping duplicates as distinct nodes.
    pub(crate) fn insert(&mut self, value: V) {
        let Some(mut cursor) = self.root else {
            // First node: created black, trivially satisfying the root rule.
            debug_assert!(self.nodes.is_empty());
            let root = self.nodes.alloc(Node::new(value, Color::Black));
            self.root = Some(root);
            self.len = 1;
            return;
        };

        // Descend to a free slot; greater-or-equal routes right, so equal
        // values land in the right subtree in insertion order.
        loop {
            let goes_right = (self.ge)(&value, self.node(cursor).value());
            let next = if goes_right { self.node(cursor).right() } else { self.node(cursor).left() };
            match next {
                Some(child) => cursor = child,
                None => {
                    let leaf = self.nodes.alloc(Node::new(value, Color::Red));
                    self.node_mut(leaf).set_parent(Some(cursor));
                    if goes_right {
                        self.node_mut(cursor).set_right(Some(leaf));
                    } else {
                        self.node_mut(cursor).set_left(Some(leaf));
                    }
                    self.insert_fixup(leaf);
                    self.len += 1;
                    debug_assert_eq!(self.nodes.len(), self.len);
                    return;
                }
            }
        }
    }

    /// Restores the invariants after attaching a red leaf.
    ///
    /// Walks the red-red violation upward: a red uncle recolors and pushes
    /// the violation to the grandparent; a black uncle resolves it with at
    /// most two rotations (one to straighten a zig-zag, one terminal).
    fn insert_fixup(&mut self, mut cursor: Handle) {
        while let Some(parent) = self.node(cursor).parent() {
            if self.node(parent).is_black() {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let grandparent = self
                .node(parent)
                .parent()
                .expect("`insert_fixup()` - red parent has no grandparent!");

            if self.node(grandparent).left() == Some(parent) {
                match self.node(grandparent).right() {
                    Some(uncle) if self.node(uncle).is_red() => {
                        self.node_mut(parent).set_color(Color::Black);
                        self.node_mut(uncle).set_color(Color::Black);
                        self.node_mut(grandparent).set_color(Color::Red);
                        cursor = grandparent;
                    }
                    _ => {
                        if self.node(parent).right() == Some(cursor) {
                            // Zig-zag: rotate into the straight shape first.
                            cursor = parent;
                            self.left_rotate(cursor);
                        } else {
                            // Straight shape: the parent turns black, so the
                            // loop terminates on the next check.
                            self.node_mut(parent).set_color(Color::Black);
                            self.node_mut(grandparent).set_color(Color::Red);
                            self.right_rotate(grandparent);
                        }
                    }
                }
            } else {
                match self.node(grandparent).left() {
                    Some(uncle) if self.node(uncle).is_red() => {
                        self.node_mut(parent).set_color(Color::Black);
                        self.node_mut(uncle).set_color(Color::Black);
                        self.node_mut(grandparent).set_color(Color::Red);
                        cursor = grandparent;
                    }
                    _ => {
                        if self.node(parent).left() == Some(cursor) {
                            cursor = parent;
                            self.right_rotate(cursor);
                        } else {
                            self.node_mut(parent).set_color(Color::Black);
                            self.node_mut(grandparent).set_color(Color::Red);
                            self.left_rotate(grandparent);
                        }
                    }
                }
            }
        }
        // Idempotent safety net for the root rule.
        if let Some(root) = self.root {
            self.node_mut(root).set_color(Color::Black);
        }
    }

    /// Removes one node holding `value`, returning false when absent.
    pub(crate) fn remove(&mut self, value: &V) -> bool
    where
        V: PartialEq,
    {
        let Some(target) = self.search(value) else {
            return false;
        };

        // Excise the target itself when it has at most one child, otherwise
        // its in-order successor (the leftmost node of the right subtree,
        // which never has a left child).
        let excised = match (self.node(target).left(), self.node(target).right()) {
            (Some(_), Some(right)) => self.min_from(right),
            _ => target,
        };

        // Splice the excised node's single child (possibly absent) into its
        // place, transferring the parent link.
        let child = match self.node_mut(excised).take_left() {
            Some(left) => Some(left),
            None => self.node_mut(excised).take_right(),
        };
        let excised_parent = self.node(excised).parent();

        if let Some(child) = child {
            self.node_mut(child).set_parent(excised_parent);
        }
        match excised_parent {
            None => self.root = child,
            Some(parent) => {
                if self.node(parent).left() == Some(excised) {
                    self.node_mut(parent).set_left(child);
                } else {
                    self.node_mut(parent).set_right(child);
                }
            }
        }

        let excised_was_black = self.node(excised).is_black();
        let removed = self.nodes.take(excised);
        if excised != target {
            // The successor's payload moves into the target node; the
            // target keeps its position and color.
            self.node_mut(target).set_value(removed.into_value());
        }

        // Removing a black node shortens one path's black-height.
        if excised_was_black {
            self.delete_fixup(child, excised_parent);
        }
        self.len -= 1;
        debug_assert_eq!(self.nodes.len(), self.len);
        true
    }

    /// Restores the invariants after splicing out a black node.
    ///
    /// `cursor` (possibly absent) occupies the excised slot under `parent`
    /// and carries one extra unit of blackness; the loop walks it upward
    /// until a red node or the root can absorb it. Missing siblings in any
    /// non-terminal state would contradict the black-height invariant, so
    /// they panic instead of being skipped.
    fn delete_fixup(&mut self, mut cursor: Option<Handle>, mut parent: Option<Handle>) {
        while cursor != self.root && self.black_or_nil(cursor) {
            if let Some(handle) = cursor {
                parent = self.node(handle).parent();
            }
            let above = parent.expect("`delete_fixup()` - non-root cursor has no parent!");

            if self.node(above).left() == cursor {
                let mut sibling = self.node(above).right();
                if let Some(red) = sibling.filter(|&s| self.node(s).is_red()) {
                    // Red sibling: rotate it above the parent, exposing a
                    // black sibling for the cases below.
                    self.node_mut(red).set_color(Color::Black);
                    self.node_mut(above).set_color(Color::Red);
                    self.left_rotate(above);
                    sibling = self.node(above).right();
                }
                let mut sibling = sibling.expect("`delete_fixup()` - cursor has no sibling!");

                if self.black_or_nil(self.node(sibling).left()) && self.black_or_nil(self.node(sibling).right()) {
                    // Both nephews black: push the extra blackness up.
                    self.node_mut(sibling).set_color(Color::Red);
                    cursor = Some(above);
                } else {
                    if self.black_or_nil(self.node(sibling).right()) {
                        // Near nephew red, far black: rotate the red onto
                        // the far side.
                        let near = self
                            .node(sibling)
                            .left()
                            .expect("`delete_fixup()` - near nephew is absent!");
                        self.node_mut(near).set_color(Color::Black);
                        self.node_mut(sibling).set_color(Color::Red);
                        self.right_rotate(sibling);
                        sibling = self
                            .node(above)
                            .right()
                            .expect("`delete_fixup()` - cursor has no sibling!");
                    }
                    // Far nephew red: one terminal rotation repairs the
                    // black-height deficit.
                    let above_color = self.node(above).color();
                    self.node_mut(sibling).set_color(above_color);
                    self.node_mut(above).set_color(Color::Black);
                    if let Some(far) = self.node(sibling).right() {
                        self.node_mut(far).set_color(Color::Black);
                    }
                    self.left_rotate(above);
                    cursor = self.root;
                }
            } else {
                let mut sibling = self.node(above).left();
                if let Some(red) = sibling.filter(|&s| self.node(s).is_red()) {
                    self.node_mut(red).set_color(Color::Black);
                    self.node_mut(above).set_color(Color::Red);
                    self.right_rotate(above);
                    sibling = self.node(above).left();
                }
                let mut sibling = sibling.expect("`delete_fixup()` - cursor has no sibling!");

                if self.black_or_nil(self.node(sibling).left()) && self.black_or_nil(self.node(sibling).right()) {
                    self.node_mut(sibling).set_color(Color::Red);
                    cursor = Some(above);
                } else {
                    if self.black_or_nil(self.node(sibling).left()) {
                        let near = self
                            .node(sibling)
                            .right()
                            .expect("`delete_fixup()` - near nephew is absent!");
                        self.node_mut(near).set_color(Color::Black);
                        self.node_mut(sibling).set_color(Color::Red);
                        self.left_rotate(sibling);
                        sibling = self
                            .node(above)
                            .left()
                            .expect("`delete_fixup()` - cursor has no sibling!");
                    }
                    let above_color = self.node(above).color();
                    self.node_mut(sibling).set_color(above_color);
                    self.node_mut(above).set_color(Color::Black);
                    if let Some(far) = self.node(sibling).left() {
                        self.node_mut(far).set_color(Color::Black);
                    }
                    self.right_rotate(above);
                    cursor = self.root;
                }
            }
        }
        if let Some(handle) = cursor {
            self.node_mut(handle).set_color(Color::Black);
        }
    }

    /// Pivots `x`'s right child `y` into `x`'s position:
    ///
    /// ```text
    ///   x                y
    ///  / \              / \
    /// a   y    ==>     x   r
    ///    / \          / \
    ///   b   r        a   b
    /// ```
    ///
    /// O(1); only local links and, when `x` was the root, the root pointer
    /// change. Rotations are the sole structural primitive of both fix-ups.
    fn left_rotate(&mut self, x: Handle) {
        let y = self
            .node(x)
            .right()
            .expect("`left_rotate()` - pivot has no right child!");
        let b = self.node(y).left();
        let parent = self.node(x).parent();

        self.node_mut(y).set_parent(parent);
        self.node_mut(y).set_left(Some(x));
        match parent {
            None => self.root = Some(y),
            Some(parent) => {
                if self.node(parent).left() == Some(x) {
                    self.node_mut(parent).set_left(Some(y));
                } else {
                    self.node_mut(parent).set_right(Some(y));
                }
            }
        }

        self.node_mut(x).set_parent(Some(y));
        self.node_mut(x).set_right(b);
        if let Some(b) = b {
            self.node_mut(b).set_parent(Some(x));
        }
    }

    /// Exact mirror of [`left_rotate`](Self::left_rotate), pivoting on the
    /// left child.
    fn right_rotate(&mut self, y: Handle) {
        let x = self
            .node(y)
            .left()
            .expect("`right_rotate()` - pivot has no left child!");
        let b = self.node(x).right();
        let parent = self.node(y).parent();

        self.node_mut(x).set_parent(parent);
        self.node_mut(x).set_right(Some(y));
        match parent {
            None => self.root = Some(x),
            Some(parent) => {
                if self.node(parent).left() == Some(y) {
                    self.node_mut(parent).set_left(Some(x));
                } else {
                    self.node_mut(parent).set_right(Some(x));
                }
            }
        }

        self.node_mut(y).set_parent(Some(x));
        self.node_mut(y).set_left(b);
        if let Some(b) = b {
            self.node_mut(b).set_parent(Some(y));
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec::Vec;

    use super::*;

    fn natural<V: Ord + 'static>() -> OrderFn<V> {
        Box::new(|a, b| a >= b)
    }

    fn values(tree: &RawRbTree<i32>) -> Vec<i32> {
        tree.in_order_from(tree.root()).into_iter().copied().collect()
    }

    #[test]
    fn first_insert_becomes_black_root() {
        let mut tree = RawRbTree::new(natural());
        tree.insert(5);
        let root = tree.root().unwrap();
        assert!(tree.node(root).is_black());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn red_uncle_recolors_up_to_the_root() {
        // 10, 5, 15 then 3: the red uncle (15) forces a recolor, and the
        // safety net keeps the root black.
        let mut tree = RawRbTree::new(natural());
        for v in [10, 5, 15, 3] {
            tree.insert(v);
        }
        let root = tree.root().unwrap();
        assert!(tree.node(root).is_black());
        assert_eq!(*tree.node(root).value(), 10);
        let left = tree.node(root).left().unwrap();
        assert!(tree.node(left).is_black());
        assert!(tree.node(tree.node(left).left().unwrap()).is_red());
    }

    #[test]
    fn ascending_inserts_rotate_into_balance() {
        // 1, 2, 3 is the minimal left-rotation case: 2 must end up as the
        // black root with red children.
        let mut tree = RawRbTree::new(natural());
        for v in [1, 2, 3] {
            tree.insert(v);
        }
        let root = tree.root().unwrap();
        assert_eq!(*tree.node(root).value(), 2);
        assert!(tree.node(root).is_black());
        let left = tree.node(root).left().unwrap();
        let right = tree.node(root).right().unwrap();
        assert!(tree.node(left).is_red());
        assert!(tree.node(right).is_red());
        assert_eq!(tree.node(left).parent(), Some(root));
        assert_eq!(tree.node(right).parent(), Some(root));
    }

    #[test]
    fn remove_absent_value_is_a_no_op() {
        let mut tree = RawRbTree::new(natural());
        tree.insert(1);
        assert!(!tree.remove(&2));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn remove_two_child_node_splices_the_successor() {
        let mut tree = RawRbTree::new(natural());
        for v in [10, 5, 15, 12, 20] {
            tree.insert(v);
        }
        assert!(tree.remove(&10));
        // 12 (the successor) takes over 10's slot.
        assert_eq!(values(&tree), [5, 12, 15, 20]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn successor_ascends_when_there_is_no_right_subtree() {
        let mut tree = RawRbTree::new(natural());
        for v in [10, 5, 15, 7] {
            tree.insert(v);
        }
        let seven = tree.search(&7).unwrap();
        let ten = tree.successor(seven).unwrap();
        assert_eq!(*tree.node(ten).value(), 10);
        let fifteen = tree.search(&15).unwrap();
        assert_eq!(tree.successor(fifteen), None);
    }

    #[test]
    fn in_order_walk_is_sorted_for_an_adversarial_order() {
        let mut tree = RawRbTree::new(natural());
        for v in (0..100).rev() {
            tree.insert(v);
        }
        let walked = values(&tree);
        let expected: Vec<i32> = (0..100).collect();
        assert_eq!(walked, expected);
    }

    #[test]
    fn clear_resets_the_tree() {
        let mut tree = RawRbTree::new(natural());
        for v in 0..10 {
            tree.insert(v);
        }
        tree.clear();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.root(), None);
        assert!(tree.in_order_from(tree.root()).is_empty());
        tree.insert(1);
        assert_eq!(tree.len(), 1);
    }
}
