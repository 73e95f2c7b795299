use crate::sequence::Link;
use crate::sequence::Node;
use crate::sequence::Sequence;

#[derive(Debug)]
/// A cursor for navigating and editing a [`Sequence`].
///
/// A `CursorMut` is like an iterator, except that it can freely seek
/// back-and-forth and can remove or insert elements at its position in O(1).
/// The cursor borrows the sequence mutably, so no other traversal can observe
/// the sequence while it is being edited.
///
/// Besides the elements, the cursor has one extra "ghost" position between
/// the tail and the head. Moving next from the tail, or previous from the
/// head, lands on the ghost; moving again wraps to the other end.
///
/// # Examples
///
/// ```
/// use linked_collection::Sequence;
///
/// let mut seq = Sequence::from([1, 2, 3]);
///
/// let mut cursor = seq.cursor_front_mut();
/// cursor.move_next();
/// assert_eq!(cursor.remove_current(), Some(2));
/// assert_eq!(cursor.current(), Some(&3));
///
/// assert_eq!(seq.iter().copied().collect::<Vec<_>>(), [1, 3]);
/// ```
pub struct CursorMut<'a, T> {
    pub(crate) current: Link<T>,
    pub(crate) index: usize,
    pub(crate) seq: &'a mut Sequence<T>,
}

impl<'a, T> CursorMut<'a, T> {
    /// Returns the position of the cursor, or `None` at the ghost position.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.current.map(|_| self.index)
    }

    /// Moves the cursor to the next element.
    ///
    /// From the tail this moves to the ghost position, and from the ghost
    /// position to the head.
    #[inline]
    pub fn move_next(&mut self) {
        match self.current {
            Some(node) => {
                // SAFETY: The cursor only ever points at live nodes of its sequence.
                self.current = unsafe { node.as_ref().next() };
                self.index += 1;
            }
            None => {
                self.current = self.seq.head();
                self.index = 0;
            }
        }
    }

    /// Moves the cursor to the previous element.
    ///
    /// From the head this moves to the ghost position, and from the ghost
    /// position to the tail.
    #[inline]
    pub fn move_prev(&mut self) {
        match self.current {
            Some(node) => {
                // SAFETY: The cursor only ever points at live nodes of its sequence.
                self.current = unsafe { node.as_ref().prev() };
                self.index = self.index.checked_sub(1).unwrap_or(self.seq.len());
            }
            None => {
                self.current = self.seq.tail();
                self.index = self.seq.len().saturating_sub(1);
            }
        }
    }

    /// Returns the element at the cursor's position.
    #[inline]
    pub fn current(&self) -> Option<&T> {
        // SAFETY: The cursor only ever points at live nodes of its sequence.
        self.current.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns a mutable reference to the element at the cursor's position.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2]);
    /// let mut cursor = seq.cursor_back_mut();
    /// if let Some(value) = cursor.current_mut() {
    ///     *value = 20;
    /// }
    /// assert_eq!(seq.back(), Some(&20));
    /// ```
    #[inline]
    pub fn current_mut(&mut self) -> Option<&mut T> {
        // SAFETY: The cursor only ever points at live nodes of its sequence, and it
        // holds the sequence mutably.
        self.current.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Returns the element after the cursor's position without moving.
    ///
    /// At the ghost position this is the head.
    pub fn peek_next(&self) -> Option<&T> {
        let next = match self.current {
            // SAFETY: The cursor only ever points at live nodes of its sequence.
            Some(node) => unsafe { node.as_ref().next() },
            None => self.seq.head(),
        };
        // SAFETY: Neighbours of a live node are live nodes of the same sequence.
        next.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns the element before the cursor's position without moving.
    ///
    /// At the ghost position this is the tail.
    pub fn peek_prev(&self) -> Option<&T> {
        let prev = match self.current {
            // SAFETY: The cursor only ever points at live nodes of its sequence.
            Some(node) => unsafe { node.as_ref().prev() },
            None => self.seq.tail(),
        };
        // SAFETY: Neighbours of a live node are live nodes of the same sequence.
        prev.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Removes the element at the cursor's position and returns it. The cursor
    /// moves to the following element, or to the ghost position if the tail
    /// was removed.
    ///
    /// Returns `None` at the ghost position.
    pub fn remove_current(&mut self) -> Option<T> {
        let node = self.current?;
        // SAFETY: The cursor only ever points at live nodes of its sequence.
        self.current = unsafe { node.as_ref().next() };
        // SAFETY: See above.
        let node = unsafe { self.seq.unlink_node(node) };
        Some(node.into_value())
    }

    /// Inserts `value` after the cursor's position without moving the cursor.
    ///
    /// At the ghost position the value becomes the new head.
    pub fn insert_after(&mut self, value: T) {
        match self.current {
            Some(node) => {
                // SAFETY: The cursor only ever points at live nodes of its sequence.
                unsafe { self.seq.link_after(node, Node::new(value)) };
            }
            None => {
                self.seq.push_front(value);
                self.index += 1;
            }
        }
    }

    /// Inserts `value` before the cursor's position without moving the
    /// cursor.
    ///
    /// At the ghost position the value becomes the new tail.
    pub fn insert_before(&mut self, value: T) {
        match self.current {
            Some(node) => {
                // SAFETY: The cursor only ever points at live nodes of its sequence.
                unsafe { self.seq.link_before(node, Node::new(value)) };
            }
            None => self.seq.push_back(value),
        }
        self.index += 1;
    }

    /// Returns a read-only view of the sequence the cursor is editing.
    #[inline]
    pub fn as_sequence(&self) -> &Sequence<T> {
        &*self.seq
    }
}
