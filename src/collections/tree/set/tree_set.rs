use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};

use super::{Difference, Intersection, Iter, SymmetricDifference, Union};
use crate::collections::tree::map::TreeMap;
use crate::collections::tree::{Balance, RedBlack};

/// A set of unique items which relies on the items implementing [`Ord`], kept in order by a
/// binary search tree.
///
/// This is a thin wrapper over [`TreeMap`] with `()` values, so the balancing behavior, the
/// iteration order and the complexity table are exactly the map's. The set additionally provides
/// the usual set algebra, both as iterators ([`difference`](TreeSet::difference) and friends) and
/// as the `|`, `&`, `^` and `-` operators.
pub struct TreeSet<T: Ord, M: Balance = RedBlack> {
    // Yay, we get to do the thing where unit type evaluates to a no-op.
    pub(crate) inner: TreeMap<T, (), M>,
}

impl<T: Ord> TreeSet<T> {
    /// Creates a new red-black TreeSet with no items. As with [`TreeMap::new`], an unbalanced set
    /// is constructed through [`Default`] with the mode named in the binding's type.
    pub const fn new() -> TreeSet<T> {
        TreeSet {
            inner: TreeMap::new(),
        }
    }
}

impl<T: Ord, M: Balance> TreeSet<T, M> {
    /// Returns the number of items in the TreeSet.
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the TreeSet contains no items.
    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Adds `item` to the set, returning true if it wasn't already present. An equal item that is
    /// already in the set is kept rather than replaced.
    pub fn insert(&mut self, item: T) -> bool {
        self.inner.insert(item, ()).is_none()
    }

    /// Removes `item` from the set, returning it if it was present.
    pub fn remove<Q>(&mut self, item: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.remove_entry(item).map(|e| e.0)
    }

    /// Returns true if the set contains an item equal to `item`.
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.contains(item)
    }

    /// Removes every item from the set.
    pub fn clear(&mut self) {
        self.inner.clear()
    }

    /// Returns a reference to the smallest item, if the set isn't empty.
    pub fn first(&self) -> Option<&T> {
        self.inner.first_entry().map(|e| e.0)
    }

    /// Removes and returns the smallest item, if the set isn't empty.
    pub fn take_first(&mut self) -> Option<T> {
        self.inner.take_first_entry().map(|e| e.0)
    }

    /// Returns a reference to the largest item, if the set isn't empty.
    pub fn last(&self) -> Option<&T> {
        self.inner.last_entry().map(|e| e.0)
    }

    /// Removes and returns the largest item, if the set isn't empty.
    pub fn take_last(&mut self) -> Option<T> {
        self.inner.take_last_entry().map(|e| e.0)
    }

    /// Returns an iterator over all items in the set, in order, as references.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    /// Creates a borrowed iterator over all items that are in `self` but not `other`.
    /// (`self \ other`)
    pub fn difference<'a>(&'a self, other: &'a TreeSet<T, M>) -> Difference<'a, T, M> {
        Difference {
            inner: self.iter(),
            other,
        }
    }

    /// Creates a borrowed iterator over all items that are in `self` or `other` but not both.
    /// (`self △ other`)
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a TreeSet<T, M>,
    ) -> SymmetricDifference<'a, T, M> {
        SymmetricDifference {
            inner: self.difference(other).chain(other.difference(self)),
        }
    }

    /// Creates a borrowed iterator over all items that are in both `self` and `other`.
    /// (`self ∩ other`)
    pub fn intersection<'a>(&'a self, other: &'a TreeSet<T, M>) -> Intersection<'a, T, M> {
        Intersection {
            inner: self.iter(),
            other,
        }
    }

    /// Creates a borrowed iterator over all items that are in either `self` or `other`.
    /// (`self ∪ other`)
    pub fn union<'a>(&'a self, other: &'a TreeSet<T, M>) -> Union<'a, T, M> {
        Union {
            inner: self.iter().chain(other.difference(self)),
        }
    }

    /// Returns true if `other` contains all items of `self`. (`self ⊆ other`)
    pub fn is_subset(&self, other: &TreeSet<T, M>) -> bool {
        other.is_superset(self)
    }

    /// Returns true if `self` contains all items of `other`. (`self ⊇ other`)
    pub fn is_superset(&self, other: &TreeSet<T, M>) -> bool {
        for item in other {
            if !self.contains(item) {
                return false;
            }
        }
        true
    }

    /// Returns the height of the backing tree. See [`TreeMap::height`].
    pub fn height(&self) -> usize {
        self.inner.height()
    }

    /// Checks the backing tree's structural invariants. See [`TreeMap::is_valid`].
    pub fn is_valid(&self) -> bool {
        self.inner.is_valid()
    }
}

impl<T: Ord, M: Balance> Default for TreeSet<T, M> {
    fn default() -> Self {
        TreeSet {
            inner: TreeMap::default(),
        }
    }
}

impl<T: Ord + Clone, M: Balance> Clone for TreeSet<T, M> {
    fn clone(&self) -> Self {
        TreeSet {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Ord, M: Balance> Extend<T> for TreeSet<T, M> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord, M: Balance> FromIterator<T> for TreeSet<T, M> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TreeSet::default();
        set.extend(iter);
        set
    }
}

impl<T: Ord, M: Balance, const N: usize> From<[T; N]> for TreeSet<T, M> {
    fn from(value: [T; N]) -> Self {
        Self::from_iter(value)
    }
}

impl<T: Ord, M: Balance> PartialEq for TreeSet<T, M> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Ord, M: Balance> Eq for TreeSet<T, M> {}

impl<T: Ord + Hash, M: Balance> Hash for TreeSet<T, M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<T: Ord + Clone, M: Balance> BitOr for &TreeSet<T, M> {
    type Output = TreeSet<T, M>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs).cloned().collect()
    }
}

impl<T: Ord, M: Balance> BitOrAssign for TreeSet<T, M> {
    fn bitor_assign(&mut self, rhs: Self) {
        for item in rhs {
            self.insert(item);
        }
    }
}

impl<T: Ord + Clone, M: Balance> BitAnd for &TreeSet<T, M> {
    type Output = TreeSet<T, M>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs).cloned().collect()
    }
}

impl<T: Ord, M: Balance> BitAndAssign for TreeSet<T, M> {
    fn bitand_assign(&mut self, rhs: Self) {
        // Rebuild from the old items rather than removing while iterating.
        let old = mem::take(self);
        for item in old {
            if rhs.contains(&item) {
                self.insert(item);
            }
        }
    }
}

impl<T: Ord + Clone, M: Balance> BitXor for &TreeSet<T, M> {
    type Output = TreeSet<T, M>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.symmetric_difference(rhs).cloned().collect()
    }
}

impl<T: Ord, M: Balance> BitXorAssign for TreeSet<T, M> {
    fn bitxor_assign(&mut self, rhs: Self) {
        for item in rhs {
            if self.remove(&item).is_none() {
                self.insert(item);
            }
        }
    }
}

impl<T: Ord + Clone, M: Balance> Sub for &TreeSet<T, M> {
    type Output = TreeSet<T, M>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs).cloned().collect()
    }
}

impl<T: Ord, M: Balance> SubAssign for TreeSet<T, M> {
    fn sub_assign(&mut self, rhs: Self) {
        for item in rhs {
            self.remove(&item);
        }
    }
}

impl<T: Ord + Debug, M: Balance> Debug for TreeSet<T, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeSet")
            .field("contents", &DebugContents(self))
            .field("len", &self.len())
            .finish()
    }
}

struct DebugContents<'a, T: Ord, M: Balance>(&'a TreeSet<T, M>);

impl<T: Ord + Debug, M: Balance> Debug for DebugContents<'_, T, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

impl<T: Ord + Display, M: Balance> Display for TreeSet<T, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter()
                .map(|i| format!("{i}"))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}
