//! Merge sort over a [`Sequence`].
//!
//! The sort never leaves the linked representation. Splitting and merging
//! relocate whole nodes between sequences, so an element is never copied or
//! moved in memory and no indexable buffer is allocated. Recursion depth is
//! O(log n).

use core::mem;

use crate::sequence::Sequence;

#[cfg(feature = "sort-checks")]
#[cold]
#[inline(never)]
fn comparator_not_strict() -> ! {
    panic!("sort comparator reported each of two elements as less than the other");
}

/// Sorts `seq` in place with `less` as the "is ordered before" predicate.
///
/// Sequences of length 0 or 1 are left untouched. If `less` panics, every
/// node is back in `seq` by the time the panic leaves this function, in an
/// unspecified order.
pub(crate) fn merge_sort<T, F>(seq: &mut Sequence<T>, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if seq.len() <= 1 {
        return;
    }

    let left = split(seq);
    debug_assert!(left.len() <= seq.len());

    let mut merge = Merge {
        merged: Sequence::new(),
        left,
        right: seq,
    };
    merge_sort(&mut merge.left, less);
    merge_sort(&mut *merge.right, less);
    merge.run(less);
}

/// Moves the front half of `seq` into a new sequence and returns it, using a
/// slow and a fast cursor.
///
/// The fast cursor takes two steps for every node the slow cursor hands over.
/// The slow node is always the current front of `seq`, so handing it over is
/// a pop-front/push-back relocation. When the fast cursor runs off the end,
/// the returned half holds `⌊n/2⌋` nodes and `seq` keeps the other `⌈n/2⌉`.
pub(crate) fn split<T>(seq: &mut Sequence<T>) -> Sequence<T> {
    let mut left = Sequence::new();
    let mut fast = seq.head();

    while let Some(node) = fast {
        // SAFETY: fast only ever points at live nodes still linked into seq. It is
        // always strictly ahead of the front node relocated below.
        fast = unsafe { node.as_ref().next() };
        let Some(node) = fast else {
            break;
        };

        let Some(slow) = seq.pop_front_node() else {
            break;
        };
        left.push_back_node(slow);

        // SAFETY: See above.
        fast = unsafe { node.as_ref().next() };
    }

    left
}

/// Merges two sorted sequences, consuming both, and returns the result.
#[cfg(test)]
pub(crate) fn merge<T, F>(
    left: Sequence<T>,
    mut right: Sequence<T>,
    less: &mut F,
) -> Sequence<T>
where
    F: FnMut(&T, &T) -> bool,
{
    Merge {
        merged: Sequence::new(),
        left,
        right: &mut right,
    }
    .run(less);
    right
}

/// An in-progress merge of two sorted halves into `right`.
///
/// Dropping the merge splices `merged`, then whatever is left of `left`, then
/// whatever is left of `right` back into `right`. After a completed run at
/// most one half is non-empty, so this is the final O(1) splice. After a
/// panic it keeps every node.
struct Merge<'a, T> {
    merged: Sequence<T>,
    left: Sequence<T>,
    right: &'a mut Sequence<T>,
}

impl<T> Merge<'_, T> {
    /// Relocates the smaller front node until either half runs out.
    ///
    /// The front of `left` is taken only when `less(left, right)` holds, so
    /// ties go to `right`.
    fn run<F>(mut self, less: &mut F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        while let (Some(l), Some(r)) = (self.left.front(), self.right.front()) {
            let take_left = less(l, r);

            #[cfg(feature = "sort-checks")]
            if take_left && less(r, l) {
                comparator_not_strict();
            }

            let source = if take_left {
                &mut self.left
            } else {
                &mut *self.right
            };
            if let Some(node) = source.pop_front_node() {
                self.merged.push_back_node(node);
            }
        }
    }
}

impl<T> Drop for Merge<'_, T> {
    fn drop(&mut self) {
        self.merged.append(&mut self.left);
        self.merged.append(self.right);
        mem::swap(self.right, &mut self.merged);
    }
}
