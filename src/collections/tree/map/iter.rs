use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{Link, NodeRef, TreeMap};
use crate::collections::tree::Balance;

impl<K: Ord, V, M: Balance> IntoIterator for TreeMap<K, V, M> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V, M>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

pub struct IntoIter<K: Ord, V, M: Balance>(pub(crate) TreeMap<K, V, M>);

impl<K: Ord, V, M: Balance> Iterator for IntoIter<K, V, M> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        // Unlinking the minimum costs O(log n) per item, but it reuses the removal path
        // unchanged, fixup included, so the tree stays valid throughout.
        self.0.take_first_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<K: Ord, V, M: Balance> ExactSizeIterator for IntoIter<K, V, M> {}

impl<K: Ord, V, M: Balance> FusedIterator for IntoIter<K, V, M> {}

impl<'a, K: Ord, V, M: Balance> IntoIterator for &'a TreeMap<K, V, M> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len(),
            _phantom: PhantomData,
        };
        iter.push_left(self.root);
        iter
    }
}

/// An in-order borrowing iterator. The stack holds the path from the root to the next node to
/// yield; it grows as needed, so even a degenerate unbalanced tree has no depth ceiling.
pub struct Iter<'a, K: Ord, V> {
    pub(crate) stack: Vec<NodeRef<K, V>>,
    pub(crate) remaining: usize,
    pub(crate) _phantom: PhantomData<(&'a K, &'a V)>,
}

impl<K: Ord, V> Iter<'_, K, V> {
    /// Pushes the left spine of the subtree at `link`; the deepest node pushed holds the smallest
    /// remaining key.
    fn push_left(&mut self, mut link: Link<K, V>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = *node.left();
        }
    }
}

impl<'a, K: Ord, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(*node.right());
        self.remaining -= 1;
        Some(node.entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K: Ord, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K: Ord, V, M: Balance> IntoIterator for &'a mut TreeMap<K, V, M> {
    type Item = (&'a K, &'a mut V);

    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let mut iter = IterMut {
            stack: Vec::new(),
            remaining: self.len(),
            _phantom: PhantomData,
        };
        iter.push_left(self.root);
        iter
    }
}

/// The mutable counterpart of [`Iter`]. Keys stay shared; handing out `&mut K` would let a caller
/// break the search order.
pub struct IterMut<'a, K: Ord, V> {
    pub(crate) stack: Vec<NodeRef<K, V>>,
    pub(crate) remaining: usize,
    pub(crate) _phantom: PhantomData<(&'a K, &'a mut V)>,
}

impl<K: Ord, V> IterMut<'_, K, V> {
    fn push_left(&mut self, mut link: Link<K, V>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = *node.left();
        }
    }
}

impl<'a, K: Ord, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left(*node.right());
        self.remaining -= 1;
        Some(node.entry_mut())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K: Ord, V> FusedIterator for IterMut<'_, K, V> {}

pub struct Keys<'a, K: Ord, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K: Ord, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Ord, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K: Ord, V> FusedIterator for Keys<'_, K, V> {}

pub struct Values<'a, K: Ord, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K: Ord, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Ord, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K: Ord, V> FusedIterator for Values<'_, K, V> {}

pub struct ValuesMut<'a, K: Ord, V>(pub(crate) IterMut<'a, K, V>);

impl<'a, K: Ord, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Ord, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K: Ord, V> FusedIterator for ValuesMut<'_, K, V> {}

pub struct IntoKeys<K: Ord, V, M: Balance>(pub(crate) IntoIter<K, V, M>);

impl<K: Ord, V, M: Balance> Iterator for IntoKeys<K, V, M> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Ord, V, M: Balance> ExactSizeIterator for IntoKeys<K, V, M> {}

impl<K: Ord, V, M: Balance> FusedIterator for IntoKeys<K, V, M> {}

pub struct IntoValues<K: Ord, V, M: Balance>(pub(crate) IntoIter<K, V, M>);

impl<K: Ord, V, M: Balance> Iterator for IntoValues<K, V, M> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Ord, V, M: Balance> ExactSizeIterator for IntoValues<K, V, M> {}

impl<K: Ord, V, M: Balance> FusedIterator for IntoValues<K, V, M> {}
