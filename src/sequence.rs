//! Linked sequence implementation.
//!
//! This module provides [`Sequence`], the doubly-linked storage underneath
//! [`Collection`](crate::Collection). Every element lives in its own heap
//! node, so nodes can be relocated between sequences without copying or
//! moving the element itself.
//!
//! # Examples
//!
//! ```
//! use linked_collection::Sequence;
//!
//! let mut seq = Sequence::new();
//! seq.push_back(2);
//! seq.push_back(3);
//! seq.push_front(1);
//!
//! let values: Vec<_> = seq.iter().copied().collect();
//! assert_eq!(values, [1, 2, 3]);
//! ```

mod cursor;
mod iter;

use alloc::boxed::Box;
use core::fmt;
use core::hash::Hash;
use core::hash::Hasher;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

pub use cursor::CursorMut;
pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::IterMut;

use crate::sort;

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// A single heap-allocated link of a [`Sequence`].
pub(crate) struct Node<T> {
    next: Link<T>,
    prev: Link<T>,
    pub(crate) value: T,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T) -> Box<Self> {
        Box::new(Node {
            next: None,
            prev: None,
            value,
        })
    }

    pub(crate) fn next(&self) -> Link<T> {
        self.next
    }

    pub(crate) fn prev(&self) -> Link<T> {
        self.prev
    }

    pub(crate) fn into_value(self: Box<Self>) -> T {
        self.value
    }
}

/// A doubly-linked list with O(1) insertion at both ends, O(1) removal of a
/// known node and O(1) splicing of a whole sequence onto its tail.
///
/// `Sequence` is the storage model for [`Collection`](crate::Collection) and
/// the structure the merge sort operates on. It has no capacity: every
/// element is a separate allocation, and relocating an element between
/// sequences only rewrites links.
///
/// # Examples
///
/// ```
/// use linked_collection::Sequence;
///
/// let mut a: Sequence<_> = ["a", "b"].into_iter().collect();
/// let mut b: Sequence<_> = ["c", "d"].into_iter().collect();
///
/// a.append(&mut b);
/// assert!(b.is_empty());
/// assert_eq!(a.iter().copied().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
/// ```
pub struct Sequence<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

// SAFETY: A sequence exclusively owns its nodes, so it is as thread-safe as
// the values it stores.
unsafe impl<T: Send> Send for Sequence<T> {}
// SAFETY: See above. Shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for Sequence<T> {}

#[cold]
#[inline(never)]
fn broken_link() -> ! {
    panic!("Sequence links are inconsistent with its length");
}

impl<T> Sequence<T> {
    /// Creates a new, empty sequence. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Sequence;
    ///
    /// let seq: Sequence<u32> = Sequence::new();
    /// assert!(seq.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Sequence {
            head: None,
            tail: None,
            len: 0,
            _owns: PhantomData,
        }
    }

    /// Returns the number of elements in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the sequence contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn head(&self) -> Link<T> {
        self.head
    }

    pub(crate) fn tail(&self) -> Link<T> {
        self.tail
    }

    /// Links a detached node as the new tail.
    pub(crate) fn push_back_node(&mut self, mut node: Box<Node<T>>) {
        node.next = None;
        node.prev = self.tail;
        let node = NonNull::from(Box::leak(node));

        match self.tail {
            // SAFETY: Our tail is a live node owned by this sequence.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Links a detached node as the new head.
    pub(crate) fn push_front_node(&mut self, mut node: Box<Node<T>>) {
        node.prev = None;
        node.next = self.head;
        let node = NonNull::from(Box::leak(node));

        match self.head {
            // SAFETY: Our head is a live node owned by this sequence.
            Some(head) => unsafe { (*head.as_ptr()).prev = Some(node) },
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        self.len += 1;
    }

    pub(crate) fn pop_front_node(&mut self) -> Option<Box<Node<T>>> {
        let head = self.head?;
        // SAFETY: The head is linked into this sequence.
        Some(unsafe { self.unlink_node(head) })
    }

    pub(crate) fn pop_back_node(&mut self) -> Option<Box<Node<T>>> {
        let tail = self.tail?;
        // SAFETY: The tail is linked into this sequence.
        Some(unsafe { self.unlink_node(tail) })
    }

    /// Detaches `node` from the sequence and hands its allocation back.
    ///
    /// # Safety
    ///
    /// `node` must be linked into `self`, not into another sequence.
    pub(crate) unsafe fn unlink_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        // SAFETY: The node belongs to this sequence per the function contract, and
        // every linked node was leaked from a `Box`.
        let mut node = unsafe { Box::from_raw(node.as_ptr()) };

        match node.prev {
            // SAFETY: Neighbours of a linked node are linked nodes of the same sequence.
            Some(prev) => unsafe { (*prev.as_ptr()).next = node.next },
            None => self.head = node.next,
        }
        match node.next {
            // SAFETY: See above.
            Some(next) => unsafe { (*next.as_ptr()).prev = node.prev },
            None => self.tail = node.prev,
        }

        node.next = None;
        node.prev = None;
        self.len -= 1;
        node
    }

    /// Links a detached node immediately after `anchor`.
    ///
    /// # Safety
    ///
    /// `anchor` must be linked into `self`.
    pub(crate) unsafe fn link_after(
        &mut self,
        anchor: NonNull<Node<T>>,
        mut node: Box<Node<T>>,
    ) -> NonNull<Node<T>> {
        // SAFETY: anchor is linked into this sequence per the function contract.
        let next = unsafe { (*anchor.as_ptr()).next };
        node.prev = Some(anchor);
        node.next = next;
        let node = NonNull::from(Box::leak(node));

        // SAFETY: anchor and its successor are live nodes of this sequence.
        unsafe {
            (*anchor.as_ptr()).next = Some(node);
            match next {
                Some(next) => (*next.as_ptr()).prev = Some(node),
                None => self.tail = Some(node),
            }
        }
        self.len += 1;
        node
    }

    /// Links a detached node immediately before `anchor`.
    ///
    /// # Safety
    ///
    /// `anchor` must be linked into `self`.
    pub(crate) unsafe fn link_before(
        &mut self,
        anchor: NonNull<Node<T>>,
        mut node: Box<Node<T>>,
    ) -> NonNull<Node<T>> {
        // SAFETY: anchor is linked into this sequence per the function contract.
        let prev = unsafe { (*anchor.as_ptr()).prev };
        node.next = Some(anchor);
        node.prev = prev;
        let node = NonNull::from(Box::leak(node));

        // SAFETY: anchor and its predecessor are live nodes of this sequence.
        unsafe {
            (*anchor.as_ptr()).prev = Some(node);
            match prev {
                Some(prev) => (*prev.as_ptr()).next = Some(node),
                None => self.head = Some(node),
            }
        }
        self.len += 1;
        node
    }

    /// Appends an element to the back of the sequence in O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// seq.push_back(1);
    /// seq.push_back(2);
    /// assert_eq!(seq.back(), Some(&2));
    /// ```
    pub fn push_back(&mut self, value: T) {
        self.push_back_node(Node::new(value));
    }

    /// Prepends an element to the front of the sequence in O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// seq.push_front(1);
    /// seq.push_front(2);
    /// assert_eq!(seq.front(), Some(&2));
    /// ```
    pub fn push_front(&mut self, value: T) {
        self.push_front_node(Node::new(value));
    }

    /// Removes the first element and returns it, or `None` if the sequence is
    /// empty.
    pub fn pop_front(&mut self) -> Option<T> {
        self.pop_front_node().map(Node::into_value)
    }

    /// Removes the last element and returns it, or `None` if the sequence is
    /// empty.
    pub fn pop_back(&mut self) -> Option<T> {
        self.pop_back_node().map(Node::into_value)
    }

    /// Returns a reference to the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        // SAFETY: head is either None or a live node owned by this sequence.
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns a mutable reference to the first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: head is either None or a live node owned by this sequence, and we
        // hold the sequence mutably.
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Returns a reference to the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        // SAFETY: tail is either None or a live node owned by this sequence.
        self.tail.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns a mutable reference to the last element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: tail is either None or a live node owned by this sequence, and we
        // hold the sequence mutably.
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Moves every element of `other` onto the back of `self` in O(1), leaving
    /// `other` empty.
    ///
    /// No element is copied or reallocated; only the links at the seam change.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Sequence;
    ///
    /// let mut a = Sequence::from([1, 2]);
    /// let mut b = Sequence::from([3]);
    /// a.append(&mut b);
    ///
    /// assert_eq!(a.len(), 3);
    /// assert!(b.is_empty());
    /// assert_eq!(a.back(), Some(&3));
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        let Some(tail) = self.tail else {
            mem::swap(self, other);
            return;
        };
        let Some(other_head) = other.head.take() else {
            return;
        };

        // SAFETY: tail is ours and other_head is other's; after this both belong to
        // self, and other gives up every pointer into them below.
        unsafe {
            (*tail.as_ptr()).next = Some(other_head);
            (*other_head.as_ptr()).prev = Some(tail);
        }
        self.tail = other.tail.take();
        self.len += mem::replace(&mut other.len, 0);
    }

    fn node_at(&self, index: usize) -> Link<T> {
        if index >= self.len {
            return None;
        }

        let (mut node, hops, forward) = if index < self.len / 2 {
            (self.head, index, true)
        } else {
            (self.tail, self.len - 1 - index, false)
        };
        for _ in 0..hops {
            let Some(current) = node else {
                broken_link();
            };
            // SAFETY: index < len, so every hop starts from a live node of this
            // sequence.
            let current = unsafe { current.as_ref() };
            node = if forward {
                current.next()
            } else {
                current.prev()
            };
        }
        node
    }

    /// Returns a reference to the element at `index`, or `None` if
    /// `index >= len()`.
    ///
    /// This is a linear scan. Positions in the back half are reached from the
    /// tail, which halves the worst case but stays O(n).
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Sequence;
    ///
    /// let seq = Sequence::from(['a', 'b', 'c', 'd']);
    /// assert_eq!(seq.get(1), Some(&'b'));
    /// assert_eq!(seq.get(3), Some(&'d'));
    /// assert_eq!(seq.get(4), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        let node = self.node_at(index)?;
        // SAFETY: node_at only returns live nodes of this sequence.
        Some(unsafe { &(*node.as_ptr()).value })
    }

    /// Returns a mutable reference to the element at `index`, or `None` if
    /// `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let node = self.node_at(index)?;
        // SAFETY: node_at only returns live nodes of this sequence, and we hold the
        // sequence mutably.
        Some(unsafe { &mut (*node.as_ptr()).value })
    }

    /// Returns a front-to-back iterator over the elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Sequence;
    ///
    /// let seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.iter().rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            tail: self.tail,
            len: self.len,
            _seq: PhantomData,
        }
    }

    /// Returns a front-to-back iterator yielding mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// for value in seq.iter_mut() {
    ///     *value *= 10;
    /// }
    /// assert_eq!(seq.iter().copied().collect::<Vec<_>>(), [10, 20, 30]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            head: self.head,
            tail: self.tail,
            len: self.len,
            _seq: PhantomData,
        }
    }

    /// Creates a cursor positioned at the first element.
    ///
    /// On an empty sequence the cursor starts at the "ghost" position.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            current: self.head,
            index: 0,
            seq: self,
        }
    }

    /// Creates a cursor positioned at the last element.
    ///
    /// On an empty sequence the cursor starts at the "ghost" position.
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            current: self.tail,
            index: self.len.saturating_sub(1),
            seq: self,
        }
    }

    /// Removes every element for which `predicate` returns `false`, keeping
    /// the survivors in their original nodes and order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3, 4, 5, 6]);
    /// seq.retain(|v| v % 2 == 0);
    /// assert_eq!(seq.iter().copied().collect::<Vec<_>>(), [2, 4, 6]);
    /// ```
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.cursor_front_mut();
        while let Some(value) = cursor.current() {
            if predicate(value) {
                cursor.move_next();
            } else {
                cursor.remove_current();
            }
        }
    }

    /// Reverses the order of the elements.
    ///
    /// Every node is relocated onto the front of a fresh sequence, which then
    /// replaces `self`. No element is moved or copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Sequence;
    ///
    /// let mut seq = Sequence::from(["a", "b", "c"]);
    /// seq.reverse();
    /// assert_eq!(seq.iter().copied().collect::<Vec<_>>(), ["c", "b", "a"]);
    /// ```
    pub fn reverse(&mut self) {
        let mut reversed = Sequence::new();
        while let Some(node) = self.pop_front_node() {
            reversed.push_front_node(node);
        }
        *self = reversed;
    }

    /// Sorts the sequence with a linked merge sort, using `less` as a strict
    /// "is ordered before" predicate.
    ///
    /// Runs in O(n log n) comparisons without any auxiliary buffer. When
    /// `less` reports neither element as smaller, the element from the right
    /// half wins, so equal elements are not guaranteed to keep their input
    /// order. Supply a comparator that breaks ties if that matters.
    ///
    /// If `less` panics, the sequence still holds every element afterwards,
    /// in an unspecified order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Sequence;
    ///
    /// let mut seq = Sequence::from([6, 11, 9, 1]);
    /// seq.sort_by(|a, b| a < b);
    /// assert_eq!(seq.iter().copied().collect::<Vec<_>>(), [1, 6, 9, 11]);
    /// ```
    pub fn sort_by<F>(&mut self, mut less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        sort::merge_sort(self, &mut less);
    }

    /// Removes and drops every element.
    pub fn clear(&mut self) {
        while self.pop_front_node().is_some() {}
    }

    #[cfg(test)]
    pub(crate) fn assert_links(&self) {
        let mut count = 0;
        let mut prev: Link<T> = None;
        let mut node = self.head;
        while let Some(current) = node {
            // SAFETY: We walk our own live nodes.
            let current_ref = unsafe { current.as_ref() };
            if current_ref.prev != prev {
                broken_link();
            }
            prev = Some(current);
            node = current_ref.next;
            count += 1;
        }
        if prev != self.tail || count != self.len {
            broken_link();
        }
    }
}

impl<T> Drop for Sequence<T> {
    fn drop(&mut self) {
        self.clear();
        debug_assert!(self.head.is_none() && self.tail.is_none());
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: Hash> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> From<alloc::vec::Vec<T>> for Sequence<T> {
    fn from(values: alloc::vec::Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T> IntoIterator for Sequence<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { seq: self }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type IntoIter = IterMut<'a, T>;
    type Item = &'a mut T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
