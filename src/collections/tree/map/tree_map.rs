use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};

use super::{
    Color, IntoKeys, IntoValues, Iter, IterMut, KeyNotFound, Keys, Link, Node, NodeRef, Values,
    ValuesMut, is_red,
};
use crate::collections::tree::{Balance, RedBlack};
use crate::util::fmt::DebugRaw;
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;

/// A map of keys to values which relies on the keys implementing [`Ord`], kept in key order by a
/// binary search tree.
///
/// The third type parameter selects the balancing mode once, at the type level: with
/// [`RedBlack`] (the default) the tree maintains the red-black invariants, with
/// [`Unbalanced`](crate::collections::tree::Unbalanced) it performs no rebalancing at all. See
/// the [module docs](crate::collections::tree) for when each is appropriate.
///
/// It is a logic error for keys in a TreeMap to be manipulated in a way that changes their
/// ordering. Because of this, TreeMap's API prevents mutable access to its keys.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the TreeMap.
/// - `h`: The height of the tree: `O(log n)` in red-black mode, up to `n` in unbalanced mode.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(h)` |
/// | `get` | `O(h)` |
/// | `remove` | `O(h)` |
/// | `contains` | `O(h)` |
/// | `first/last` | `O(h)` |
/// | `clear` | `O(n)` |
/// | iteration | `O(n)` total |
///
/// A red-black insertion performs at most two rotations and `O(log n)` recolorings; a removal
/// performs at most three rotations.
pub struct TreeMap<K: Ord, V, M: Balance = RedBlack> {
    pub(crate) root: Link<K, V>,
    pub(crate) len: usize,
    pub(crate) _mode: PhantomData<(K, V, M)>,
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Creates a new red-black TreeMap with no entries.
    ///
    /// This is only provided for the default mode because defaulted type parameters take no part
    /// in inference; an [`Unbalanced`](crate::collections::tree::Unbalanced) map is constructed
    /// through [`Default`] with the mode named in the binding's type.
    pub const fn new() -> TreeMap<K, V> {
        TreeMap {
            root: None,
            len: 0,
            _mode: PhantomData,
        }
    }
}

impl<K: Ord, V, M: Balance> TreeMap<K, V, M> {
    /// Returns the number of entries in the TreeMap.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the TreeMap contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts the provided `key`-`value` pair into the TreeMap. If the key was already associated
    /// with a value, the previous value is returned and the length doesn't change.
    ///
    /// As with the standard library, the key isn't changed if it already exists.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_node(key, value).1
    }

    /// Returns a reference to the value associated with the provided `key` or None if the map
    /// contains no value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(|node| node.value())
    }

    /// Returns a mutable reference to the value associated with the provided `key` or None if the
    /// map contains no value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(|mut node| node.value_mut())
    }

    /// Returns the entry for the provided `key` as a key-value pair or None if there is no entry.
    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(|node| node.entry())
    }

    /// Returns true if there is a value associated with the provided `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Returns a reference to the value associated with the provided `key`, panicking on a
    /// failure.
    ///
    /// The same functionality can be achieved using the [`Index`] operator.
    ///
    /// # Panics
    /// Panics if the map contains no value for `key`.
    pub fn at<Q>(&self, key: &Q) -> &V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.try_at(key).throw()
    }

    /// Returns a reference to the value associated with the provided `key`, returning an [`Err`]
    /// on a failure rather than panicking.
    pub fn try_at<Q>(&self, key: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with the provided `key`, panicking on
    /// a failure.
    ///
    /// The same functionality can be achieved using the [`IndexMut`] operator.
    ///
    /// # Panics
    /// Panics if the map contains no value for `key`.
    pub fn at_mut<Q>(&mut self, key: &Q) -> &mut V
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.try_at_mut(key).throw()
    }

    /// Returns a mutable reference to the value associated with the provided `key`, returning an
    /// [`Err`] on a failure rather than panicking.
    pub fn try_at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with `key`, first inserting the result
    /// of `default` if there is no entry yet.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let mut node = match self.find_node(&key) {
            Some(node) => node,
            None => self.insert_node(key, default()).0,
        };
        node.value_mut()
    }

    /// Returns a mutable reference to the value associated with `key`, first inserting
    /// `V::default()` if there is no entry yet. This mirrors the find-or-insert indexing operator
    /// that some other standard libraries provide on their ordered maps.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Removes the entry associated with `key`, returning it if it exists.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.find_node(key)?;
        Some(self.remove_node(node))
    }

    /// Removes the entry associated with `key`, returning the value if it exists. Removing a
    /// missing key is not an error; it simply returns None.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|e| e.1)
    }

    /// Removes every entry, releasing all of the tree's nodes.
    pub fn clear(&mut self) {
        let mut stack = Vec::new();
        if let Some(root) = self.root.take() {
            stack.push(root);
        }
        while let Some(node) = stack.pop() {
            // SAFETY: Each node is pushed exactly once, from its (already unlinked) parent, so
            // this is the last handle to it.
            let node = unsafe { node.take_node() };
            if let Some(left) = node.left {
                stack.push(left);
            }
            if let Some(right) = node.right {
                stack.push(right);
            }
        }
        self.len = 0;
    }

    /// Returns the entry with the smallest key, if the map isn't empty.
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.root.map(|root| Self::min_node(root).entry())
    }

    /// Returns the value of the entry with the smallest key, if the map isn't empty.
    pub fn first(&self) -> Option<&V> {
        self.first_entry().map(|e| e.1)
    }

    /// Removes and returns the entry with the smallest key, if the map isn't empty.
    pub fn take_first_entry(&mut self) -> Option<(K, V)> {
        let node = Self::min_node(self.root?);
        Some(self.remove_node(node))
    }

    /// Removes and returns the value of the entry with the smallest key, if the map isn't empty.
    pub fn take_first(&mut self) -> Option<V> {
        self.take_first_entry().map(|e| e.1)
    }

    /// Returns the entry with the largest key, if the map isn't empty.
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.root.map(|root| Self::max_node(root).entry())
    }

    /// Returns the value of the entry with the largest key, if the map isn't empty.
    pub fn last(&self) -> Option<&V> {
        self.last_entry().map(|e| e.1)
    }

    /// Removes and returns the entry with the largest key, if the map isn't empty.
    pub fn take_last_entry(&mut self) -> Option<(K, V)> {
        let node = Self::max_node(self.root?);
        Some(self.remove_node(node))
    }

    /// Removes and returns the value of the entry with the largest key, if the map isn't empty.
    pub fn take_last(&mut self) -> Option<V> {
        self.take_last_entry().map(|e| e.1)
    }

    /// Returns an iterator over all key-value pairs in the TreeMap in key order, as references.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all key-value pairs in the TreeMap in key order, with mutable
    /// references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all keys in the TreeMap in order, as references.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Returns an iterator over all values in the TreeMap in key order, as references.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Returns an iterator over all values in the TreeMap in key order, as mutable references.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.iter_mut())
    }

    /// Consumes self and returns an iterator over all contained keys, in order.
    pub fn into_keys(self) -> IntoKeys<K, V, M> {
        IntoKeys(self.into_iter())
    }

    /// Consumes self and returns an iterator over all contained values, in key order.
    pub fn into_values(self) -> IntoValues<K, V, M> {
        IntoValues(self.into_iter())
    }

    /// Returns the height of the tree: the number of nodes on the longest root-to-leaf path, with
    /// 0 for an empty tree.
    ///
    /// In red-black mode this is at most `2 * log2(n + 1)`; in unbalanced mode it can reach `n`.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            height = usize::max(height, depth);
            if let Some(left) = *node.left() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = *node.right() {
                stack.push((right, depth + 1));
            }
        }
        height
    }

    /// Returns the number of black nodes on any root-to-null path, or None if the paths disagree
    /// or a red node has a red child. Only meaningful in red-black mode; an unbalanced tree
    /// reports Some(0) because it colors nothing.
    pub fn black_height(&self) -> Option<usize> {
        let mut expected = None;
        if Self::check_paths(self.root, 0, &mut expected) {
            expected.or(Some(0))
        } else {
            None
        }
    }

    /// Checks the tree's structural invariants: key ordering always, and in red-black mode a
    /// black root, no red node with a red child and an equal black count on every root-to-null
    /// path.
    ///
    /// This is a diagnostic for tests and debugging. If the fixup logic is correct it can never
    /// return false through the public API.
    pub fn is_valid(&self) -> bool {
        if !self.is_ordered() {
            return false;
        }
        if M::BALANCED {
            if is_red(self.root) {
                return false;
            }
            return self.black_height().is_some();
        }
        true
    }
}

impl<K: Ord, V, M: Balance> TreeMap<K, V, M> {
    /// Standard iterative BST descent to the node holding `key`, or None.
    pub(crate) fn find_node<Q>(&self, key: &Q) -> Link<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(node) = curr {
            match key.cmp(node.key().borrow()) {
                Ordering::Less => curr = *node.left(),
                Ordering::Greater => curr = *node.right(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    /// Inserts `key` and `value`, returning the node now holding them and the previous value if
    /// the key already existed.
    pub(crate) fn insert_node(&mut self, key: K, value: V) -> (NodeRef<K, V>, Option<V>) {
        let mut parent = None;
        let mut curr = self.root;

        // Descend to the insertion point, or to the node holding an equal key.
        while let Some(mut node) = curr {
            parent = Some(node);
            match key.cmp(node.key()) {
                Ordering::Less => curr = *node.left(),
                Ordering::Greater => curr = *node.right(),
                // Duplicate keys never create a second node, so the length doesn't change.
                Ordering::Equal => return (node, Some(mem::replace(node.value_mut(), value))),
            }
        }

        let node = NodeRef::from_node(Node {
            key,
            value,
            parent,
            left: None,
            right: None,
            color: Color::None,
        });

        match parent {
            None => self.root = Some(node),
            Some(p) => {
                if node.key() < p.key() {
                    *p.left_mut() = Some(node);
                } else {
                    *p.right_mut() = Some(node);
                }
            },
        }
        self.len += 1;

        if M::BALANCED {
            self.insert_fixup(node);
        }

        (node, None)
    }

    /// Restores the red-black invariants after `node` has been linked in as a leaf.
    ///
    /// The new node enters red, which can only violate the no-red-red rule. While the parent is
    /// red, either recolor (red uncle) and push the violation two levels up, or rotate it away
    /// (black uncle): an inner child is first rotated to the outer position, then one rotation at
    /// the grandparent resolves the violation and ends the loop.
    fn insert_fixup(&mut self, mut node: NodeRef<K, V>) {
        *node.color_mut() = Color::Red;

        while let Some(mut parent) = *node.parent()
            && parent.color().is_red()
        {
            // UNREACHABLE: The parent is red, so it can't be the root and the grandparent exists.
            let grandparent = unsafe { (*parent.parent()).unreachable() };

            if *grandparent.left() == Some(parent) {
                let uncle = *grandparent.right();
                if is_red(uncle) {
                    // UNREACHABLE: is_red only passes for Some.
                    let uncle = unsafe { uncle.unreachable() };
                    *parent.color_mut() = Color::Black;
                    *uncle.color_mut() = Color::Black;
                    *grandparent.color_mut() = Color::Red;
                    node = grandparent;
                } else {
                    if *parent.right() == Some(node) {
                        // Inner child: rotate down to the outer case.
                        node = parent;
                        self.rotate_left(node);
                        // UNREACHABLE: The rotation made the old parent a child of the pivot.
                        parent = unsafe { (*node.parent()).unreachable() };
                    }
                    *parent.color_mut() = Color::Black;
                    *grandparent.color_mut() = Color::Red;
                    self.rotate_right(grandparent);
                }
            } else {
                // Mirror image of the branch above.
                let uncle = *grandparent.left();
                if is_red(uncle) {
                    // UNREACHABLE: is_red only passes for Some.
                    let uncle = unsafe { uncle.unreachable() };
                    *parent.color_mut() = Color::Black;
                    *uncle.color_mut() = Color::Black;
                    *grandparent.color_mut() = Color::Red;
                    node = grandparent;
                } else {
                    if *parent.left() == Some(node) {
                        node = parent;
                        self.rotate_right(node);
                        // UNREACHABLE: The rotation made the old parent a child of the pivot.
                        parent = unsafe { (*node.parent()).unreachable() };
                    }
                    *parent.color_mut() = Color::Black;
                    *grandparent.color_mut() = Color::Red;
                    self.rotate_left(grandparent);
                }
            }
        }

        // The loop can leave the root red (either transiently recolored or freshly inserted).
        if let Some(root) = self.root {
            *root.color_mut() = Color::Black;
        }
    }

    /// Unlinks `z` from the tree and returns its entry, preserving the red-black invariants in
    /// balanced mode.
    ///
    /// Nodes with at most one child are spliced out directly. A node with two children has its
    /// in-order successor moved (as a whole node, keys are never overwritten in place) into its
    /// position, taking over its color; the successor's old position is what was structurally
    /// removed. If the structurally removed color was black, one subtree is now short a black
    /// node and the fixup repairs it.
    pub(crate) fn remove_node(&mut self, z: NodeRef<K, V>) -> (K, V) {
        let mut removed_color = z.color();
        let x: Link<K, V>;
        let x_parent: Link<K, V>;

        if z.left().is_none() {
            x = *z.right();
            x_parent = *z.parent();
            self.transplant(z, *z.right());
        } else if z.right().is_none() {
            x = *z.left();
            x_parent = *z.parent();
            self.transplant(z, *z.left());
        } else {
            // UNREACHABLE: This branch requires both children.
            let y = Self::min_node(unsafe { (*z.right()).unreachable() });
            removed_color = y.color();
            x = *y.right();

            if *y.parent() == Some(z) {
                x_parent = Some(y);
            } else {
                x_parent = *y.parent();
                self.transplant(y, *y.right());
                *y.right_mut() = *z.right();
                // UNREACHABLE: y came from z's right subtree, which still exists.
                *unsafe { (*y.right()).unreachable() }.parent_mut() = Some(y);
            }

            self.transplant(z, Some(y));
            *y.left_mut() = *z.left();
            // UNREACHABLE: This branch requires both children.
            *unsafe { (*y.left()).unreachable() }.parent_mut() = Some(y);
            // The successor takes over z's color, keeping the black counts above it intact.
            *y.color_mut() = z.color();
        }

        // SAFETY: z is fully unlinked at this point, so this is the last handle to it.
        let node = unsafe { z.take_node() };
        self.len -= 1;

        // Splicing out a black node leaves one subtree short a black; unbalanced trees skip this
        // because they never color anything.
        if M::BALANCED && removed_color.is_black() {
            self.remove_fixup(x, x_parent);
        }

        (node.key, node.value)
    }

    /// Replaces the subtree rooted at `u` with the one rooted at `v` in `u`'s parent. `u`'s own
    /// child links are left untouched for the caller to reuse.
    fn transplant(&mut self, u: NodeRef<K, V>, v: Link<K, V>) {
        match *u.parent() {
            None => self.root = v,
            Some(parent) => {
                if *parent.left() == Some(u) {
                    *parent.left_mut() = v;
                } else {
                    *parent.right_mut() = v;
                }
            },
        }
        if let Some(v) = v {
            *v.parent_mut() = *u.parent();
        }
    }

    /// Restores the red-black invariants after a black node was spliced out, leaving the
    /// (possibly null) node `x` under `x_parent` one black short.
    ///
    /// The deficiency travels up until it reaches the root or a red node (which absorbs it by
    /// turning black). At each step the sibling decides the case: a red sibling is rotated into a
    /// black one; a black sibling with black children is recolored red, moving the deficiency to
    /// the parent; a black sibling with a red far child resolves the deficiency with one rotation
    /// at the parent (a red near child is first rotated into the far position).
    fn remove_fixup(&mut self, mut x: Link<K, V>, mut x_parent: Link<K, V>) {
        while x != self.root && !is_red(x) {
            // UNREACHABLE: x isn't the root, so its parent exists.
            let parent = unsafe { x_parent.unreachable() };

            if x == *parent.left() {
                // UNREACHABLE: A black deficiency on this side means the sibling subtree can't be
                // empty.
                let mut w = unsafe { (*parent.right()).unreachable() };

                if w.color().is_red() {
                    *w.color_mut() = Color::Black;
                    *parent.color_mut() = Color::Red;
                    self.rotate_left(parent);
                    // UNREACHABLE: As above; the rotation gave x a new black sibling.
                    w = unsafe { (*parent.right()).unreachable() };
                }

                if !is_red(*w.left()) && !is_red(*w.right()) {
                    *w.color_mut() = Color::Red;
                    x = Some(parent);
                    x_parent = *parent.parent();
                } else {
                    if !is_red(*w.right()) {
                        if let Some(left) = *w.left() {
                            *left.color_mut() = Color::Black;
                        }
                        *w.color_mut() = Color::Red;
                        self.rotate_right(w);
                        // UNREACHABLE: The rotation moved w's red left child above it.
                        w = unsafe { (*parent.right()).unreachable() };
                    }
                    *w.color_mut() = parent.color();
                    *parent.color_mut() = Color::Black;
                    if let Some(right) = *w.right() {
                        *right.color_mut() = Color::Black;
                    }
                    self.rotate_left(parent);
                    x = self.root;
                    x_parent = None;
                }
            } else {
                // Mirror image of the branch above.
                // UNREACHABLE: A black deficiency on this side means the sibling subtree can't be
                // empty.
                let mut w = unsafe { (*parent.left()).unreachable() };

                if w.color().is_red() {
                    *w.color_mut() = Color::Black;
                    *parent.color_mut() = Color::Red;
                    self.rotate_right(parent);
                    // UNREACHABLE: As above; the rotation gave x a new black sibling.
                    w = unsafe { (*parent.left()).unreachable() };
                }

                if !is_red(*w.left()) && !is_red(*w.right()) {
                    *w.color_mut() = Color::Red;
                    x = Some(parent);
                    x_parent = *parent.parent();
                } else {
                    if !is_red(*w.left()) {
                        if let Some(right) = *w.right() {
                            *right.color_mut() = Color::Black;
                        }
                        *w.color_mut() = Color::Red;
                        self.rotate_left(w);
                        // UNREACHABLE: The rotation moved w's red right child above it.
                        w = unsafe { (*parent.left()).unreachable() };
                    }
                    *w.color_mut() = parent.color();
                    *parent.color_mut() = Color::Black;
                    if let Some(left) = *w.left() {
                        *left.color_mut() = Color::Black;
                    }
                    self.rotate_right(parent);
                    x = self.root;
                    x_parent = None;
                }
            }
        }

        if let Some(x) = x {
            *x.color_mut() = Color::Black;
        }
    }

    /// Rotates left at `node`, lifting its right child into its position while preserving the
    /// in-order sequence.
    fn rotate_left(&mut self, node: NodeRef<K, V>) {
        // UNREACHABLE: Rotating left is only requested when the right child exists.
        let pivot = unsafe { (*node.right()).unreachable() };

        *node.right_mut() = *pivot.left();
        if let Some(inner) = *pivot.left() {
            *inner.parent_mut() = Some(node);
        }

        *pivot.parent_mut() = *node.parent();
        match *node.parent() {
            None => self.root = Some(pivot),
            Some(parent) => {
                if *parent.left() == Some(node) {
                    *parent.left_mut() = Some(pivot);
                } else {
                    *parent.right_mut() = Some(pivot);
                }
            },
        }

        *pivot.left_mut() = Some(node);
        *node.parent_mut() = Some(pivot);
    }

    /// Rotates right at `node`, lifting its left child into its position while preserving the
    /// in-order sequence.
    fn rotate_right(&mut self, node: NodeRef<K, V>) {
        // UNREACHABLE: Rotating right is only requested when the left child exists.
        let pivot = unsafe { (*node.left()).unreachable() };

        *node.left_mut() = *pivot.right();
        if let Some(inner) = *pivot.right() {
            *inner.parent_mut() = Some(node);
        }

        *pivot.parent_mut() = *node.parent();
        match *node.parent() {
            None => self.root = Some(pivot),
            Some(parent) => {
                if *parent.left() == Some(node) {
                    *parent.left_mut() = Some(pivot);
                } else {
                    *parent.right_mut() = Some(pivot);
                }
            },
        }

        *pivot.right_mut() = Some(node);
        *node.parent_mut() = Some(pivot);
    }

    /// Descends to the smallest key in the subtree rooted at `node`.
    pub(crate) fn min_node(mut node: NodeRef<K, V>) -> NodeRef<K, V> {
        while let Some(left) = *node.left() {
            node = left;
        }
        node
    }

    /// Descends to the largest key in the subtree rooted at `node`.
    pub(crate) fn max_node(mut node: NodeRef<K, V>) -> NodeRef<K, V> {
        while let Some(right) = *node.right() {
            node = right;
        }
        node
    }

    /// Confirms that in-order traversal visits keys in strictly ascending order.
    fn is_ordered(&self) -> bool {
        let mut prev: Option<&K> = None;
        for (key, _) in self.iter() {
            if let Some(prev) = prev
                && prev >= key
            {
                return false;
            }
            prev = Some(key);
        }
        true
    }

    /// Walks the subtree under `link` carrying the black count so far, recording the count of the
    /// first null reached in `expected` and comparing every other null against it. Also fails on
    /// a red node with a red child.
    ///
    /// Recursion is fine here: this only runs on demand as a diagnostic, not on any operation
    /// path.
    fn check_paths(link: Link<K, V>, blacks: usize, expected: &mut Option<usize>) -> bool {
        match link {
            None => match *expected {
                None => {
                    *expected = Some(blacks);
                    true
                },
                Some(count) => count == blacks,
            },
            Some(node) => {
                if node.color().is_red() && (is_red(*node.left()) || is_red(*node.right())) {
                    return false;
                }
                let blacks = blacks + usize::from(node.color().is_black());
                Self::check_paths(*node.left(), blacks, expected)
                    && Self::check_paths(*node.right(), blacks, expected)
            },
        }
    }
}

impl<K: Ord, V, M: Balance> Default for TreeMap<K, V, M> {
    fn default() -> Self {
        TreeMap {
            root: None,
            len: 0,
            _mode: PhantomData,
        }
    }
}

impl<K: Ord, V, M: Balance> Drop for TreeMap<K, V, M> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Ord + Clone, V: Clone, M: Balance> Clone for TreeMap<K, V, M> {
    /// Performs a full structural deep copy: new nodes, copied colors and rebuilt parent links.
    /// The clone never aliases the original.
    fn clone(&self) -> Self {
        let mut clone = TreeMap::default();

        if let Some(root) = self.root {
            let new_root = NodeRef::from_node(Node {
                key: root.key().clone(),
                value: root.value().clone(),
                parent: None,
                left: None,
                right: None,
                color: root.color(),
            });
            clone.root = Some(new_root);

            // Pre-order copy with an explicit stack, so a degenerate unbalanced tree can't
            // overflow the call stack.
            let mut stack = vec![(root, new_root)];
            while let Some((source, copy)) = stack.pop() {
                if let Some(left) = *source.left() {
                    let new_left = NodeRef::from_node(Node {
                        key: left.key().clone(),
                        value: left.value().clone(),
                        parent: Some(copy),
                        left: None,
                        right: None,
                        color: left.color(),
                    });
                    *copy.left_mut() = Some(new_left);
                    stack.push((left, new_left));
                }
                if let Some(right) = *source.right() {
                    let new_right = NodeRef::from_node(Node {
                        key: right.key().clone(),
                        value: right.value().clone(),
                        parent: Some(copy),
                        left: None,
                        right: None,
                        color: right.color(),
                    });
                    *copy.right_mut() = Some(new_right);
                    stack.push((right, new_right));
                }
            }
        }

        clone.len = self.len;
        clone
    }
}

impl<K: Ord, V, M: Balance> Extend<(K, V)> for TreeMap<K, V, M> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, M: Balance> FromIterator<(K, V)> for TreeMap<K, V, M> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMap::default();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V, M: Balance, const N: usize> From<[(K, V); N]> for TreeMap<K, V, M> {
    fn from(value: [(K, V); N]) -> Self {
        Self::from_iter(value)
    }
}

impl<K, Q, V, M> Index<&Q> for TreeMap<K, V, M>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
    M: Balance,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.at(key)
    }
}

impl<K, Q, V, M> IndexMut<&Q> for TreeMap<K, V, M>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
    M: Balance,
{
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        self.at_mut(key)
    }
}

impl<K: Ord, V: PartialEq, M: Balance> PartialEq for TreeMap<K, V, M> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V: Eq, M: Balance> Eq for TreeMap<K, V, M> {}

impl<K: Ord + Hash, V: Hash, M: Balance> Hash for TreeMap<K, V, M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}

impl<K: Ord + Debug, V: Debug, M: Balance> Debug for TreeMap<K, V, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeMap")
            .field("nodes", &DebugRaw(format!("\n{:?}\n", DebugBranch(self.root))))
            .field("len", &self.len)
            .finish()
    }
}

impl<K: Ord + Debug, V: Debug, M: Balance> Display for TreeMap<K, V, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders a subtree sideways, one node per line, with `┌`/`└` prefixes marking the left and
/// right subtrees and the color appended in red-black mode.
struct DebugBranch<K, V>(Link<K, V>);

impl<K: Debug, V: Debug> Debug for DebugBranch<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(node) => write!(
                f,
                "{}\n({:?}: {:?}){}\n{}",
                format!("{:?}", DebugBranch(*node.left()))
                    .lines()
                    .map(|l| String::from("┌    ") + l)
                    .collect::<Vec<_>>()
                    .join("\n"),
                node.key(),
                node.value(),
                match node.color() {
                    Color::Red => " (R)",
                    Color::Black => " (B)",
                    Color::None => "",
                },
                format!("{:?}", DebugBranch(*node.right()))
                    .lines()
                    .map(|l| String::from("└    ") + l)
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            None => write!(f, "-"),
        }
    }
}
