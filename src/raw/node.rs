use super::handle::Handle;

/// Red-black invariant tag.
///
/// An absent child counts as [`Black`](Color::Black) for invariant purposes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A single tree vertex: payload, color tag, and links.
///
/// `left` and `right` own their subtrees (through the arena); `parent` is
/// the non-owning back-reference, always the exact inverse of the owning
/// child link except transiently inside a rotation. A `Node` is a pure data
/// holder; all algorithmic behavior lives in `RawRbTree`.
pub(crate) struct Node<V> {
    value: V,
    color: Color,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
}

impl<V> Node<V> {
    pub(crate) const fn new(value: V, color: Color) -> Self {
        Self {
            value,
            color,
            left: None,
            right: None,
            parent: None,
        }
    }

    #[inline]
    pub(crate) const fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn set_value(&mut self, value: V) {
        self.value = value;
    }

    /// Moves the payload out of a spliced-out node.
    pub(crate) fn into_value(self) -> V {
        self.value
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    pub(crate) const fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) const fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    /// Nulls the left link, returning the detached child.
    pub(crate) const fn take_left(&mut self) -> Option<Handle> {
        self.left.take()
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) const fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    /// Nulls the right link, returning the detached child.
    pub(crate) const fn take_right(&mut self) -> Option<Handle> {
        self.right.take()
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) const fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }
}
