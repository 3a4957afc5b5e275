use std::iter::{Chain, FusedIterator};

use super::TreeSet;
use crate::collections::tree::Balance;
use crate::collections::tree::map::{IntoKeys, Keys};

impl<T: Ord, M: Balance> IntoIterator for TreeSet<T, M> {
    type Item = T;

    type IntoIter = IntoIter<T, M>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.inner.into_keys())
    }
}

pub struct IntoIter<T: Ord, M: Balance>(pub(crate) IntoKeys<T, (), M>);

impl<T: Ord, M: Balance> Iterator for IntoIter<T, M> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T: Ord, M: Balance> ExactSizeIterator for IntoIter<T, M> {}

impl<T: Ord, M: Balance> FusedIterator for IntoIter<T, M> {}

impl<'a, T: Ord, M: Balance> IntoIterator for &'a TreeSet<T, M> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.inner.keys())
    }
}

pub struct Iter<'a, T: Ord>(pub(crate) Keys<'a, T, ()>);

impl<'a, T: Ord> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T: Ord> ExactSizeIterator for Iter<'_, T> {}

impl<T: Ord> FusedIterator for Iter<'_, T> {}

pub struct Difference<'a, T: Ord, M: Balance> {
    pub(crate) inner: Iter<'a, T>,
    pub(crate) other: &'a TreeSet<T, M>,
}

impl<'a, T: Ord, M: Balance> Iterator for Difference<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut next = self.inner.next();
        while let Some(item) = next
            && self.other.contains(item)
        {
            next = self.inner.next();
        }
        next
    }
}

impl<T: Ord, M: Balance> FusedIterator for Difference<'_, T, M> {}

pub struct SymmetricDifference<'a, T: Ord, M: Balance> {
    pub(crate) inner: Chain<Difference<'a, T, M>, Difference<'a, T, M>>,
}

impl<'a, T: Ord, M: Balance> Iterator for SymmetricDifference<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T: Ord, M: Balance> FusedIterator for SymmetricDifference<'_, T, M> {}

pub struct Intersection<'a, T: Ord, M: Balance> {
    pub(crate) inner: Iter<'a, T>,
    pub(crate) other: &'a TreeSet<T, M>,
}

impl<'a, T: Ord, M: Balance> Iterator for Intersection<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut next = self.inner.next();
        while let Some(item) = next
            && !self.other.contains(item)
        {
            next = self.inner.next();
        }
        next
    }
}

impl<T: Ord, M: Balance> FusedIterator for Intersection<'_, T, M> {}

pub struct Union<'a, T: Ord, M: Balance> {
    pub(crate) inner: Chain<Iter<'a, T>, Difference<'a, T, M>>,
}

impl<'a, T: Ord, M: Balance> Iterator for Union<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T: Ord, M: Balance> FusedIterator for Union<'_, T, M> {}
