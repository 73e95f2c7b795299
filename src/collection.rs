//! The ordered collection façade.
//!
//! [`Collection`] owns a single [`Sequence`] and layers the bulk operations on
//! top of it. Operations that restructure the collection (`filter`, `sort`,
//! `reverse`, `merge`) relocate nodes and never copy elements.

use alloc::vec::Vec;
use core::fmt;
use core::iter::Enumerate;

use crate::element::Element;
use crate::element::ElementKind;
use crate::sequence::IntoIter;
use crate::sequence::Iter;
use crate::sequence::Sequence;

/// An ordered collection backed by a doubly-linked [`Sequence`].
///
/// The element classification ([`ElementKind`]) is read from `T::KIND` once
/// at construction and kept for the lifetime of the collection. It tells the
/// caller whether [`each`](Self::each) can have any observable effect: only
/// [shared](ElementKind::Shared) elements can be mutated through a `&T`.
///
/// Chaining methods return `&mut Self` (or `&Self` for `each`), so a pipeline
/// reads left to right:
///
/// ```
/// use linked_collection::Collection;
///
/// let mut prices = Collection::new([6, 11, 9, 1, 4]);
/// prices.filter(|p| *p > 2).sort(|a, b| a < b).reverse();
///
/// assert_eq!(prices.to_vec(), [11, 9, 6, 4]);
/// assert_eq!(prices.peek(-1), Some(&4));
/// ```
pub struct Collection<T> {
    seq: Sequence<T>,
    kind: ElementKind,
}

impl<T: Element> Collection<T> {
    /// Creates a collection holding `items` in iteration order.
    ///
    /// Each element gets its own node, so this is O(n) with one allocation per
    /// element.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Collection;
    ///
    /// let letters = Collection::new(vec!["a", "b", "c"]);
    /// assert_eq!(letters.len(), 3);
    /// assert!(letters.is_shared());
    /// ```
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_sequence(items.into_iter().collect())
    }

    fn from_sequence(seq: Sequence<T>) -> Self {
        Collection { seq, kind: T::KIND }
    }
}

/// Splices the elements `filter` has kept back onto the unvisited prefix when
/// it is dropped, including when the predicate unwinds.
struct FilterGuard<'a, T> {
    unvisited: &'a mut Sequence<T>,
    kept: Sequence<T>,
}

impl<T> Drop for FilterGuard<'_, T> {
    fn drop(&mut self) {
        self.unvisited.append(&mut self.kept);
    }
}

impl<T> Collection<T> {
    /// Creates a collection holding `items` in iteration order, classified as
    /// `kind`.
    ///
    /// Unlike [`new`](Self::new) this places no [`Element`] bound on `T`, so it
    /// accepts foreign types this crate has no impl for.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Collection;
    /// use linked_collection::ElementKind;
    ///
    /// struct Foreign(u32);
    ///
    /// let collection = Collection::with_kind([Foreign(1), Foreign(2)], ElementKind::Owned);
    /// assert_eq!(collection.len(), 2);
    /// assert!(!collection.is_shared());
    /// ```
    pub fn with_kind<I>(items: I, kind: ElementKind) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Collection {
            seq: items.into_iter().collect(),
            kind,
        }
    }

    /// Returns the element classification recorded at construction.
    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Returns `true` if the elements are references to data owned elsewhere.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.kind.is_shared()
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Returns `true` if the collection holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Calls `f` on every element, front to back.
    ///
    /// Nothing is written back. For shared elements, changes made through the
    /// referent are visible afterwards; owned elements cannot be changed here
    /// (use [`map`](Self::map) instead).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// use linked_collection::Collection;
    ///
    /// let counters = Collection::new([1, 2, 3].map(|v| Rc::new(RefCell::new(v))));
    /// counters.each(|c| *c.borrow_mut() += 1);
    ///
    /// let values: Vec<i32> = counters.values().map(|c| *c.borrow()).collect();
    /// assert_eq!(values, [2, 3, 4]);
    /// ```
    pub fn each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&T),
    {
        self.seq.iter().for_each(&mut f);
        self
    }

    /// Replaces every element with `f(element)`, front to back, in place.
    ///
    /// Length, order and node allocations are unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Collection;
    ///
    /// let mut prices = Collection::new([2, 3, 4]);
    /// prices.map(|p| p * 10);
    /// assert_eq!(prices.to_vec(), [20, 30, 40]);
    /// ```
    pub fn map<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&T) -> T,
    {
        for value in self.seq.iter_mut() {
            let mapped = f(value);
            *value = mapped;
        }
        self
    }

    /// Keeps exactly the elements for which `predicate` returns `true`, in
    /// their original relative order, and drops the rest.
    ///
    /// The predicate is called once per element, back to front. Kept elements
    /// stay in their original nodes. If the predicate panics, the element it
    /// was called on and every element not yet visited are kept along with
    /// the ones it already accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Collection;
    ///
    /// let mut numbers = Collection::new(1..=6);
    /// numbers.filter(|n| n % 2 == 1);
    /// assert_eq!(numbers.to_vec(), [1, 3, 5]);
    /// ```
    pub fn filter<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&T) -> bool,
    {
        let mut guard = FilterGuard {
            unvisited: &mut self.seq,
            kept: Sequence::new(),
        };
        while let Some(value) = guard.unvisited.back() {
            let keep = predicate(value);
            let Some(node) = guard.unvisited.pop_back_node() else {
                break;
            };
            if keep {
                guard.kept.push_front_node(node);
            }
        }
        drop(guard);
        self
    }

    /// Moves the contents of every collection in `others` onto the back of
    /// `self`, in argument order. Each source is left empty.
    ///
    /// Every source is spliced on in O(1), regardless of its length. An empty
    /// `others` is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Collection;
    ///
    /// let mut a = Collection::new(["a", "b", "c"]);
    /// let mut b = Collection::new(["d", "e", "f"]);
    /// let mut c = Collection::new(["d", "e", "f"]);
    ///
    /// a.merge([&mut b, &mut c]);
    /// assert_eq!(a.to_vec(), ["a", "b", "c", "d", "e", "f", "d", "e", "f"]);
    /// assert!(b.is_empty() && c.is_empty());
    /// ```
    pub fn merge<'a, I>(&mut self, others: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a mut Collection<T>>,
        T: 'a,
    {
        for other in others {
            self.seq.append(&mut other.seq);
        }
        self
    }

    /// Moves the contents of `other` onto the back of `self` in O(1), leaving
    /// `other` empty.
    pub fn append(&mut self, other: &mut Collection<T>) -> &mut Self {
        self.seq.append(&mut other.seq);
        self
    }

    /// Sorts the collection with a linked merge sort, using `less` as the
    /// "is ordered before" predicate.
    ///
    /// `less` should be a strict weak ordering. When it reports neither of two
    /// elements as smaller, the one from the later half of the input is placed
    /// first, so the sort is not stable for ties. With a comparator that is
    /// not a strict weak ordering the sort still terminates but the resulting
    /// order is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Collection;
    ///
    /// let mut numbers = Collection::new([6, 11, 9, 1]);
    /// numbers.sort(|a, b| a < b);
    /// assert_eq!(numbers.to_vec(), [1, 6, 9, 11]);
    ///
    /// numbers.sort(|a, b| a > b);
    /// assert_eq!(numbers.to_vec(), [11, 9, 6, 1]);
    /// ```
    pub fn sort<F>(&mut self, less: F) -> &mut Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.seq.sort_by(less);
        self
    }

    /// Reverses the order of the elements.
    pub fn reverse(&mut self) -> &mut Self {
        self.seq.reverse();
        self
    }

    fn resolve(&self, index: isize) -> Option<usize> {
        let len = self.seq.len();
        let position = if index < 0 {
            len.checked_sub(index.unsigned_abs())?
        } else {
            index.unsigned_abs()
        };
        (position < len).then_some(position)
    }

    /// Returns the element at `index`, or `None` if there is none.
    ///
    /// Negative indices count back from the end, so `-1` is the last element.
    /// Positions in the back half are reached by walking from the tail.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Collection;
    ///
    /// let letters = Collection::new(['a', 'b', 'c', 'd']);
    /// assert_eq!(letters.peek(0), Some(&'a'));
    /// assert_eq!(letters.peek(-1), Some(&'d'));
    /// assert_eq!(letters.peek(-4), Some(&'a'));
    /// assert_eq!(letters.peek(4), None);
    /// assert_eq!(letters.peek(-5), None);
    /// ```
    pub fn peek(&self, index: isize) -> Option<&T> {
        self.seq.get(self.resolve(index)?)
    }

    /// Like [`peek`](Self::peek), but returns a clone of the element, or
    /// `T::default()` if there is none.
    pub fn peek_or_default(&self, index: isize) -> T
    where
        T: Clone + Default,
    {
        self.peek(index).cloned().unwrap_or_default()
    }

    /// Returns a lazy front-to-back iterator over `(index, &element)` pairs.
    ///
    /// Every call starts over from the front. Dropping the iterator early has
    /// no effect on the collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_collection::Collection;
    ///
    /// let letters = Collection::new(["a", "b", "c"]);
    /// for (i, letter) in letters.all() {
    ///     assert_eq!(letters.peek(i as isize), Some(letter));
    /// }
    /// ```
    #[inline]
    pub fn all(&self) -> Enumerate<Iter<'_, T>> {
        self.seq.iter().enumerate()
    }

    /// Returns a lazy front-to-back iterator over the elements.
    #[inline]
    pub fn values(&self) -> Iter<'_, T> {
        self.seq.iter()
    }

    /// Returns the elements as a `Vec`, in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.seq.iter().cloned().collect()
    }

    /// Returns the underlying sequence.
    #[inline]
    pub fn as_sequence(&self) -> &Sequence<T> {
        &self.seq
    }

    /// Consumes the collection and returns the underlying sequence.
    #[inline]
    pub fn into_sequence(self) -> Sequence<T> {
        self.seq
    }
}

impl<T: Element> Default for Collection<T> {
    fn default() -> Self {
        Self::from_sequence(Sequence::new())
    }
}

impl<T: Clone> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Collection {
            seq: self.seq.clone(),
            kind: self.kind,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("kind", &self.kind)
            .field("len", &self.seq.len())
            .field("values", &self.seq)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<T: Eq> Eq for Collection<T> {}

impl<T: Element> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.seq.extend(iter);
    }
}

impl<T: Element> From<Vec<T>> for Collection<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl<T: Element, const N: usize> From<[T; N]> for Collection<T> {
    fn from(values: [T; N]) -> Self {
        Self::new(values)
    }
}

impl<T: Element> From<Sequence<T>> for Collection<T> {
    fn from(seq: Sequence<T>) -> Self {
        Self::from_sequence(seq)
    }
}

impl<T> IntoIterator for Collection<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.seq.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.seq.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use core::cell::RefCell;
    use core::iter;

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Book {
        name: &'static str,
        price: u32,
    }

    impl Element for Book {}

    fn book(name: &'static str, price: u32) -> Book {
        Book { name, price }
    }

    fn books() -> Vec<Book> {
        vec![book("a", 2), book("b", 3), book("c", 4)]
    }

    fn names<'a>(values: impl IntoIterator<Item = &'a Book>) -> Vec<&'static str> {
        values.into_iter().map(|b| b.name).collect()
    }

    fn alphabet() -> Collection<char> {
        Collection::new('a'..='p')
    }

    #[test]
    fn test_new_records_kind() {
        let owned = Collection::new(books());
        assert_eq!(owned.kind(), ElementKind::Owned);
        assert!(!owned.is_shared());
        assert_eq!(owned.len(), 3);

        let shared = Collection::new(books().into_iter().map(|b| Rc::new(RefCell::new(b))));
        assert_eq!(shared.kind(), ElementKind::Shared);
        assert!(shared.is_shared());

        let empty: Collection<Book> = Collection::default();
        assert!(empty.is_empty());
        assert_eq!(empty.kind(), ElementKind::Owned);
    }

    #[test]
    fn test_all_yields_indices_in_order() {
        let letters = Collection::new(["a", "b", "c"]);
        let pairs: Vec<(usize, &str)> = letters.all().map(|(i, v)| (i, *v)).collect();
        assert_eq!(pairs, [(0, "a"), (1, "b"), (2, "c")]);

        // Each call starts over.
        assert_eq!(letters.all().next(), Some((0, &"a")));
        assert_eq!(letters.all().count(), 3);
    }

    #[test]
    fn test_values() {
        let letters = Collection::new(["a", "b", "c"]);
        assert_eq!(letters.values().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(letters.to_vec(), ["a", "b", "c"]);
    }

    #[test]
    fn test_filter() {
        let mut collection = Collection::new(books());
        collection.filter(|b| b.price >= 3);
        assert_eq!(names(collection.values()), ["b", "c"]);
        assert_eq!(collection.len(), 2);
        collection.as_sequence().assert_links();
    }

    #[test]
    fn test_filter_shared() {
        let mut collection = Collection::new(books().into_iter().map(|b| Rc::new(RefCell::new(b))));
        collection.filter(|b| b.borrow().price >= 3);
        let kept: Vec<&str> = collection.values().map(|b| b.borrow().name).collect();
        assert_eq!(kept, ["b", "c"]);
    }

    #[test]
    fn test_filter_keeps_nodes() {
        let mut collection = Collection::new([1, 2, 3]);
        let tail = collection.as_sequence().tail();
        collection.filter(|v| *v != 2);
        assert_eq!(collection.as_sequence().tail(), tail);
        assert_eq!(collection.to_vec(), [1, 3]);
    }

    #[test]
    fn test_filter_visits_back_to_front() {
        let mut collection = Collection::new([1, 2, 3]);
        let mut seen = Vec::new();
        collection.filter(|v| {
            seen.push(*v);
            true
        });
        assert_eq!(seen, [3, 2, 1]);
        assert_eq!(collection.to_vec(), [1, 2, 3]);
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_filter_keeps_everything_when_predicate_panics() {
        use std::panic;
        use std::panic::AssertUnwindSafe;

        let mut collection = Collection::new([1, 2, 3, 4, 5]);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            collection.filter(|v| {
                assert_ne!(*v, 2, "rejecting 2");
                *v != 4
            });
        }));

        assert!(result.is_err());
        // 4 was already rejected, 2 and 1 were never decided.
        assert_eq!(collection.to_vec(), [1, 2, 3, 5]);
        collection.as_sequence().assert_links();

        collection.filter(|v| v % 2 == 1);
        assert_eq!(collection.to_vec(), [1, 3, 5]);
    }

    #[test]
    fn test_with_kind_accepts_any_type() {
        struct Foreign(u32);

        let mut collection = Collection::with_kind([Foreign(3), Foreign(1)], ElementKind::Owned);
        assert_eq!(collection.kind(), ElementKind::Owned);
        collection.sort(|a, b| a.0 < b.0);
        assert_eq!(collection.peek(0).map(|f| f.0), Some(1));

        let shared = Collection::with_kind([Foreign(1)], ElementKind::Shared);
        assert!(shared.is_shared());
    }

    #[test]
    fn test_tuple_elements() {
        let mut pairs = Collection::new([(2, 'b'), (1, 'a'), (3, 'c')]);
        assert_eq!(pairs.kind(), ElementKind::Owned);
        pairs.sort(|a, b| a.0 < b.0);
        assert_eq!(pairs.to_vec(), [(1, 'a'), (2, 'b'), (3, 'c')]);
    }

    #[test]
    fn test_filter_everything_and_nothing() {
        let mut collection = Collection::new(books());
        collection.filter(|_| true);
        assert_eq!(collection.len(), 3);
        collection.filter(|_| false);
        assert!(collection.is_empty());
        collection.as_sequence().assert_links();
    }

    #[test]
    fn test_each_through_shared_elements() {
        let collection = Collection::new(books().into_iter().map(|b| Rc::new(RefCell::new(b))));
        collection.each(|b| b.borrow_mut().price += 1);

        let prices: Vec<u32> = collection.values().map(|b| b.borrow().price).collect();
        assert_eq!(prices, [3, 4, 5]);
    }

    #[test]
    fn test_each_through_references() {
        let cells = [Cell::new(1), Cell::new(2)];
        let collection = Collection::new(cells.iter());
        assert!(collection.is_shared());

        collection.each(|c| c.set(c.get() * 10)).each(|c| c.set(c.get() + 1));
        assert_eq!(cells[0].get(), 11);
        assert_eq!(cells[1].get(), 21);
    }

    #[test]
    fn test_each_visits_in_order() {
        let collection = Collection::new(books());
        let mut visited = Vec::new();
        collection.each(|b| visited.push(b.name));
        assert_eq!(visited, ["a", "b", "c"]);
        assert_eq!(collection.peek(0), Some(&book("a", 2)));
    }

    #[test]
    fn test_map_writes_back() {
        let mut collection = Collection::new(books());
        let head = collection.as_sequence().head();
        collection.map(|b| Book {
            price: b.price * 2,
            ..b.clone()
        });

        let prices: Vec<u32> = collection.values().map(|b| b.price).collect();
        assert_eq!(prices, [4, 6, 8]);
        assert_eq!(collection.as_sequence().head(), head);
    }

    #[test]
    fn test_merge() {
        let mut a = Collection::new(["a", "b", "c"]);
        let mut b = Collection::new(["d", "e", "f"]);
        let mut c = Collection::new(["d", "e", "f"]);

        a.merge([&mut b, &mut c]);
        assert_eq!(a.to_vec(), ["a", "b", "c", "d", "e", "f", "d", "e", "f"]);
        assert_eq!(a.len(), 9);
        assert!(b.is_empty());
        assert!(c.is_empty());
        a.as_sequence().assert_links();

        // Drained sources stay usable.
        b.extend(["g"]);
        a.append(&mut b);
        assert_eq!(a.peek(-1), Some(&"g"));
    }

    #[test]
    fn test_merge_without_arguments() {
        let mut a = Collection::new(["a", "b"]);
        a.merge(iter::empty());
        assert_eq!(a.to_vec(), ["a", "b"]);
    }

    #[test]
    fn test_merge_into_empty() {
        let mut a: Collection<u8> = Collection::default();
        let mut b = Collection::new([1, 2]);
        let mut c = Collection::default();
        let mut d = Collection::new([3]);

        a.merge(vec![&mut b, &mut c, &mut d]);
        assert_eq!(a.to_vec(), [1, 2, 3]);
        a.as_sequence().assert_links();
    }

    #[test]
    fn test_sort_books() {
        let mut collection = Collection::new([
            book("a", 6),
            book("b", 11),
            book("c", 9),
            book("d", 1),
        ]);
        collection.sort(|i, j| i.price < j.price);
        let prices: Vec<u32> = collection.values().map(|b| b.price).collect();
        assert_eq!(prices, [1, 6, 9, 11]);
        assert_eq!(names(&collection), ["d", "a", "c", "b"]);
    }

    #[test]
    #[cfg(not(feature = "sort-checks"))]
    fn test_sort_with_non_strict_comparator() {
        let mut collection = Collection::new([9, 11, 9, 1]);
        collection.sort(|i, j| i >= j);
        assert_eq!(collection.to_vec(), [11, 9, 9, 1]);
    }

    #[test]
    fn test_sort_sixteen_descending() {
        let mut collection = Collection::new((1..=16).map(|p| book("x", p)));
        collection.sort(|i, j| i.price > j.price);
        let prices: Vec<u32> = collection.values().map(|b| b.price).collect();
        assert_eq!(prices, (1..=16).rev().collect::<Vec<_>>());
        collection.as_sequence().assert_links();
    }

    #[test]
    fn test_sort_ties_favor_later_half() {
        let mut collection = Collection::new([book("first", 1), book("second", 1)]);
        collection.sort(|i, j| i.price < j.price);
        assert_eq!(names(&collection), ["second", "first"]);
    }

    #[test]
    fn test_peek() {
        let letters = alphabet();
        assert_eq!(letters.len(), 16);
        assert_eq!(letters.peek(0), Some(&'a'));
        assert_eq!(letters.peek(9), Some(&'j'));
        assert_eq!(letters.peek(15), Some(&'p'));
        assert_eq!(letters.peek(-1), Some(&'p'));
        assert_eq!(letters.peek(-2), Some(&'o'));
        assert_eq!(letters.peek(-16), Some(&'a'));
    }

    #[test]
    fn test_peek_out_of_range() {
        let letters = alphabet();
        assert_eq!(letters.peek(16), None);
        assert_eq!(letters.peek(17), None);
        assert_eq!(letters.peek(-17), None);
        assert_eq!(letters.peek(-27), None);
        assert_eq!(letters.peek(isize::MAX), None);
        assert_eq!(letters.peek(isize::MIN), None);

        let empty: Collection<char> = Collection::default();
        assert_eq!(empty.peek(0), None);
        assert_eq!(empty.peek(-1), None);
    }

    #[test]
    fn test_peek_or_default() {
        let collection = Collection::new(books());
        assert_eq!(collection.peek_or_default(1), book("b", 3));
        assert_eq!(collection.peek_or_default(3), Book::default());
        assert_eq!(collection.peek_or_default(-4), Book::default());
    }

    #[test]
    fn test_reverse() {
        let mut collection = Collection::new(books());
        collection.reverse();
        assert_eq!(names(&collection), ["c", "b", "a"]);
        collection.reverse();
        assert_eq!(names(&collection), ["a", "b", "c"]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Collection::new(books());
        let cloned = original.clone();
        assert_eq!(cloned, original);

        original.filter(|b| b.price > 3).sort(|i, j| i.price > j.price);
        original.map(|b| book(b.name, 0));

        assert_eq!(cloned.to_vec(), books());
        assert_eq!(original.to_vec(), [book("c", 0)]);
        assert_eq!(cloned.kind(), original.kind());
    }

    #[test]
    fn test_clone_shares_referents() {
        let mut original = Collection::new(books().into_iter().map(|b| Rc::new(RefCell::new(b))));
        let cloned = original.clone();

        cloned.each(|b| b.borrow_mut().price += 10);
        original.filter(|b| b.borrow().name != "a");

        let prices: Vec<u32> = original.values().map(|b| b.borrow().price).collect();
        assert_eq!(prices, [13, 14]);
        assert_eq!(cloned.len(), 3);
        assert_eq!(cloned.peek(0).map(|b| b.borrow().price), Some(12));
    }

    #[test]
    fn test_conversions() {
        let from_vec: Collection<i32> = vec![1, 2, 3].into();
        let from_array = Collection::from([1, 2, 3]);
        let collected: Collection<i32> = (1..=3).collect();
        let from_sequence = Collection::from(Sequence::from([1, 2, 3]));

        assert_eq!(from_vec, from_array);
        assert_eq!(from_array, collected);
        assert_eq!(collected, from_sequence);
        assert_eq!(from_sequence.into_sequence(), Sequence::from([1, 2, 3]));

        let owned: Vec<i32> = from_vec.into_iter().rev().collect();
        assert_eq!(owned, [3, 2, 1]);
    }

    #[test]
    fn test_debug() {
        let collection = Collection::new([String::from("x")]);
        assert_eq!(
            format!("{:?}", collection),
            r#"Collection { kind: Owned, len: 1, values: ["x"] }"#
        );
    }
}

// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use super::*;

    fn values() -> impl Strategy<Value = Vec<i32>> {
        prop::collection::vec(-50i32..50, 0..64)
    }

    proptest! {
        #[test]
        fn construction_keeps_input(input in values()) {
            let collection = Collection::new(input.clone());
            prop_assert_eq!(collection.len(), input.len());
            prop_assert_eq!(collection.to_vec(), input);
        }

        #[test]
        fn filter_keeps_matching(input in values(), threshold in -50i32..50) {
            let mut collection = Collection::new(input.clone());
            collection.filter(|v| *v >= threshold);

            let expected: Vec<i32> = input.into_iter().filter(|v| *v >= threshold).collect();
            prop_assert_eq!(collection.len(), expected.len());
            prop_assert_eq!(collection.to_vec(), expected);
        }

        #[test]
        fn merge_concatenates(first in values(), second in values(), third in values()) {
            let mut a = Collection::new(first.clone());
            let mut b = Collection::new(second.clone());
            let mut c = Collection::new(third.clone());
            a.merge([&mut b, &mut c]);

            prop_assert_eq!(a.len(), first.len() + second.len() + third.len());
            prop_assert!(b.is_empty() && c.is_empty());
            let expected: Vec<i32> = first.into_iter().chain(second).chain(third).collect();
            prop_assert_eq!(a.to_vec(), expected);
        }

        #[test]
        fn sort_orders_adjacent_pairs(input in values()) {
            let mut collection = Collection::new(input.clone());
            collection.sort(|a, b| a < b);
            prop_assert_eq!(collection.len(), input.len());

            let sorted = collection.to_vec();
            for pair in sorted.windows(2) {
                prop_assert!(!(pair[1] < pair[0]));
            }

            let mut expected = input;
            expected.sort();
            prop_assert_eq!(sorted, expected);
            collection.as_sequence().assert_links();
        }

        #[test]
        fn reverse_twice_is_identity(input in values()) {
            let mut collection = Collection::new(input.clone());
            collection.reverse();
            prop_assert_eq!(collection.len(), input.len());
            collection.reverse();
            prop_assert_eq!(collection.to_vec(), input);
        }

        #[test]
        fn peek_matches_slice_indexing(input in values(), index in -80isize..80) {
            let collection = Collection::new(input.clone());
            let len = input.len() as isize;

            let expected = if (0..len).contains(&index) {
                input.get(index as usize)
            } else if (-len..0).contains(&index) {
                input.get((len + index) as usize)
            } else {
                None
            };
            prop_assert_eq!(collection.peek(index), expected);
            prop_assert_eq!(collection.peek(-1), collection.peek(len - 1));
            prop_assert_eq!(collection.peek(len), None);
            prop_assert_eq!(collection.peek(-len - 1), None);
        }

        #[test]
        fn clone_survives_changes_to_original(input in values()) {
            let mut original = Collection::new(input.clone());
            let cloned = original.clone();
            original.filter(|v| v % 2 == 0).sort(|a, b| a > b).reverse();
            prop_assert_eq!(cloned.to_vec(), input);
        }
    }
}
