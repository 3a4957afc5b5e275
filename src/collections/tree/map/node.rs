use std::ptr::NonNull;

use derive_more::IsVariant;

pub(crate) type Link<K, V> = Option<NodeRef<K, V>>;

/// The color bit of a node. [`Color::None`] is what unbalanced trees store; they never consult
/// the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub(crate) enum Color {
    None,
    Red,
    Black,
}

/// Returns true if the link points at a red node. Null links count as black.
pub(crate) fn is_red<K, V>(link: Link<K, V>) -> bool {
    link.is_some_and(|node| node.color().is_red())
}

pub(crate) struct Node<K, V> {
    pub key: K,
    pub value: V,
    // The parent link is pure bookkeeping for rotations and fixups; only left and right carry
    // ownership.
    pub parent: Link<K, V>,
    pub left: Link<K, V>,
    pub right: Link<K, V>,
    pub color: Color,
}

// NOTE: This implementation uses Box<T> rather than alloc to allocate space on the heap, because
// Box<T> has the special property that dereferencing it allows a value to be moved out of the heap.

#[derive(Debug)]
pub(crate) struct NodeRef<K, V>(pub NonNull<Node<K, V>>);

impl<K, V> NodeRef<K, V> {
    pub fn from_node(node: Node<K, V>) -> NodeRef<K, V> {
        NodeRef(NonNull::from(Box::leak(Box::new(node))))
    }

    /// Moves the node back out of the heap, releasing its allocation.
    ///
    /// # Safety
    /// The caller must ensure that this is the last live handle to the node, i.e. that the node
    /// has been unlinked from the tree.
    pub unsafe fn take_node(self) -> Node<K, V> {
        // SAFETY: The pointer was produced by from_node, and the caller guarantees exclusive
        // access.
        unsafe { *Box::from_raw(self.0.as_ptr()) }
    }

    // The raw deref (rather than NonNull::as_ref) matters for key and value: as_ref would demand
    // that both K and V outlive 'a, even though each accessor only hands out one of them.
    pub const fn key<'a>(&self) -> &'a K {
        // SAFETY: The pointer is valid for as long as the node is linked into a live tree.
        unsafe { &(*self.0.as_ptr()).key }
    }

    pub const fn value<'a>(&self) -> &'a V {
        // SAFETY: As for key.
        unsafe { &(*self.0.as_ptr()).value }
    }

    pub fn value_mut<'a>(&mut self) -> &'a mut V {
        // SAFETY: As for key.
        unsafe { &mut (*self.0.as_ptr()).value }
    }

    pub const fn entry<'a>(&self) -> (&'a K, &'a V) {
        (self.key(), self.value())
    }

    pub fn entry_mut<'a>(&mut self) -> (&'a K, &'a mut V) {
        // SAFETY: As for key. The key stays shared; mutating it in place would break the search
        // order.
        (self.key(), unsafe { &mut (*self.0.as_ptr()).value })
    }

    pub fn left<'a>(&self) -> &'a Link<K, V> {
        // SAFETY: As for key.
        unsafe { &(*self.0.as_ptr()).left }
    }

    #[allow(clippy::mut_from_ref)]
    pub fn left_mut<'a>(&self) -> &'a mut Link<K, V> {
        // SAFETY: As for key.
        unsafe { &mut (*self.0.as_ptr()).left }
    }

    pub fn right<'a>(&self) -> &'a Link<K, V> {
        // SAFETY: As for key.
        unsafe { &(*self.0.as_ptr()).right }
    }

    #[allow(clippy::mut_from_ref)]
    pub fn right_mut<'a>(&self) -> &'a mut Link<K, V> {
        // SAFETY: As for key.
        unsafe { &mut (*self.0.as_ptr()).right }
    }

    pub fn parent<'a>(&self) -> &'a Link<K, V> {
        // SAFETY: As for key.
        unsafe { &(*self.0.as_ptr()).parent }
    }

    #[allow(clippy::mut_from_ref)]
    pub fn parent_mut<'a>(&self) -> &'a mut Link<K, V> {
        // SAFETY: As for key.
        unsafe { &mut (*self.0.as_ptr()).parent }
    }

    pub fn color(&self) -> Color {
        // SAFETY: As for key.
        unsafe { (*self.0.as_ptr()).color }
    }

    #[allow(clippy::mut_from_ref)]
    pub fn color_mut<'a>(&self) -> &'a mut Color {
        // SAFETY: As for key.
        unsafe { &mut (*self.0.as_ptr()).color }
    }
}

impl<K, V> Clone for NodeRef<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<K, V> {}

impl<K, V> PartialEq for NodeRef<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
