use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::sequence::Link;
use crate::sequence::Node;
use crate::sequence::Sequence;

/// An iterator over the elements of a [`Sequence`].
///
/// This struct is created by [`Sequence::iter`]. Each call to `iter` starts a
/// fresh traversal from the front; dropping the iterator early leaves the
/// sequence untouched.
///
/// # Examples
///
/// ```
/// use linked_collection::Sequence;
///
/// let seq = Sequence::from(["a", "b", "c"]);
/// let mut iter = seq.iter();
/// assert_eq!(iter.next(), Some(&"a"));
/// assert_eq!(iter.next_back(), Some(&"c"));
/// assert_eq!(iter.len(), 1);
/// ```
pub struct Iter<'a, T> {
    pub(crate) head: Link<T>,
    pub(crate) tail: Link<T>,
    pub(crate) len: usize,
    pub(crate) _seq: PhantomData<&'a Node<T>>,
}

// SAFETY: An `Iter` only hands out `&T`, so it behaves like `&Sequence<T>`.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
// SAFETY: See above.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.len).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.head?;
        // SAFETY: len > 0, so head is a live node of a sequence we borrow for 'a.
        let node = unsafe { &*node.as_ptr() };
        self.len -= 1;
        self.head = node.next();
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.tail?;
        // SAFETY: len > 0, so tail is a live node of a sequence we borrow for 'a.
        let node = unsafe { &*node.as_ptr() };
        self.len -= 1;
        self.tail = node.prev();
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// A mutable iterator over the elements of a [`Sequence`].
///
/// This struct is created by [`Sequence::iter_mut`].
pub struct IterMut<'a, T> {
    pub(crate) head: Link<T>,
    pub(crate) tail: Link<T>,
    pub(crate) len: usize,
    pub(crate) _seq: PhantomData<&'a mut Node<T>>,
}

// SAFETY: An `IterMut` hands out disjoint `&mut T`, so it behaves like
// `&mut Sequence<T>`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
// SAFETY: Shared access to an `IterMut` exposes no element.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.len).finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.head?;
        // SAFETY: We yield each live node exactly once, and the sequence is
        // mutably borrowed for 'a.
        let node = unsafe { &mut *node.as_ptr() };
        self.len -= 1;
        self.head = node.next();
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.tail?;
        // SAFETY: See `next`. The two ends never cross because len tracks both.
        let node = unsafe { &mut *node.as_ptr() };
        self.len -= 1;
        self.tail = node.prev();
        Some(&mut node.value)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// An owning iterator over the elements of a [`Sequence`].
///
/// This struct is created by the [`into_iter`] method on [`Sequence`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
///
/// # Examples
///
/// ```
/// use linked_collection::Sequence;
///
/// let seq = Sequence::from([1, 2, 3]);
/// let doubled: Vec<_> = seq.into_iter().map(|v| v * 2).collect();
/// assert_eq!(doubled, [2, 4, 6]);
/// ```
pub struct IntoIter<T> {
    pub(crate) seq: Sequence<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.seq).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.seq.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.seq.len(), Some(self.seq.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.seq.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
