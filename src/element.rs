//! Element classification.
//!
//! A [`Collection`](crate::Collection) records, once at construction, whether
//! its element type owns its data or only refers to data owned elsewhere. The
//! classification decides which mutations are visible to the caller:
//!
//! - [`ElementKind::Owned`] elements are independent values. The only way to
//!   change one in place is to write it back, e.g. with
//!   [`Collection::map`](crate::Collection::map).
//! - [`ElementKind::Shared`] elements are references. Anything mutated through
//!   the referent (usually via interior mutability) is observed by every holder
//!   of the reference, including the collection and its clones.

use alloc::borrow::Cow;
use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::collections::BTreeSet;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cell::RefCell;
use core::cmp::Ordering;
use core::cmp::Reverse;
use core::num::NonZeroI8;
use core::num::NonZeroI16;
use core::num::NonZeroI32;
use core::num::NonZeroI64;
use core::num::NonZeroI128;
use core::num::NonZeroIsize;
use core::num::NonZeroU8;
use core::num::NonZeroU16;
use core::num::NonZeroU32;
use core::num::NonZeroU64;
use core::num::NonZeroU128;
use core::num::NonZeroUsize;
use core::num::Wrapping;
use core::ptr::NonNull;
use core::time::Duration;

/// Whether an element type owns its data or refers to data owned elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A self-contained value. Copies are independent of each other.
    Owned,
    /// A pointer-like value. Copies share the same referent.
    Shared,
}

impl ElementKind {
    /// Returns `true` for [`ElementKind::Shared`].
    #[inline]
    pub const fn is_shared(self) -> bool {
        matches!(self, ElementKind::Shared)
    }
}

/// Types that can be stored in a [`Collection`](crate::Collection).
///
/// The associated constant defaults to [`ElementKind::Owned`], so plain data
/// types opt in with an empty impl. Pointer-like types override it.
///
/// Tuples of up to twelve elements are owned. Foreign types this crate does
/// not cover can still be stored with
/// [`Collection::with_kind`](crate::Collection::with_kind).
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use linked_collection::Element;
/// use linked_collection::ElementKind;
///
/// struct Book {
///     price: u32,
/// }
///
/// impl Element for Book {}
///
/// assert_eq!(Book::KIND, ElementKind::Owned);
/// assert_eq!(<Rc<RefCell<Book>>>::KIND, ElementKind::Shared);
/// assert_eq!(<&str>::KIND, ElementKind::Shared);
/// ```
pub trait Element {
    /// The classification of this type.
    const KIND: ElementKind = ElementKind::Owned;
}

macro_rules! owned_elements {
    ($($ty:ty),* $(,)?) => {
        $(impl Element for $ty {})*
    };
}

owned_elements!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    Duration,
    Ordering,
    NonZeroU8,
    NonZeroU16,
    NonZeroU32,
    NonZeroU64,
    NonZeroU128,
    NonZeroUsize,
    NonZeroI8,
    NonZeroI16,
    NonZeroI32,
    NonZeroI64,
    NonZeroI128,
    NonZeroIsize,
);

macro_rules! tuple_elements {
    ($($name:ident)+) => {
        impl<$($name),+> Element for ($($name,)+) {}
    };
}

tuple_elements!(A);
tuple_elements!(A B);
tuple_elements!(A B C);
tuple_elements!(A B C D);
tuple_elements!(A B C D E);
tuple_elements!(A B C D E F);
tuple_elements!(A B C D E F G);
tuple_elements!(A B C D E F G H);
tuple_elements!(A B C D E F G H I);
tuple_elements!(A B C D E F G H I J);
tuple_elements!(A B C D E F G H I J K);
tuple_elements!(A B C D E F G H I J K L);

impl<T: ?Sized> Element for Box<T> {}
impl<T> Element for Vec<T> {}
impl<T> Element for VecDeque<T> {}
impl<K, V> Element for BTreeMap<K, V> {}
impl<T> Element for BTreeSet<T> {}
impl<T, const N: usize> Element for [T; N] {}
impl<T: ?Sized> Element for Cell<T> {}
impl<T: ?Sized> Element for RefCell<T> {}
impl<T> Element for Wrapping<T> {}
impl<B: ToOwned + ?Sized> Element for Cow<'_, B> {}

impl<T: Element> Element for Reverse<T> {
    const KIND: ElementKind = T::KIND;
}

impl<T: Element> Element for Option<T> {
    const KIND: ElementKind = T::KIND;
}

macro_rules! shared_elements {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: ?Sized> Element for $ty {
                const KIND: ElementKind = ElementKind::Shared;
            }
        )*
    };
}

shared_elements!(
    &T,
    &mut T,
    *const T,
    *mut T,
    NonNull<T>,
    Rc<T>,
    alloc::rc::Weak<T>,
    Arc<T>,
    alloc::sync::Weak<T>,
);

#[cfg(feature = "std")]
mod std_impls {
    use std::collections::HashMap;
    use std::collections::HashSet;
    use std::ffi::OsString;
    use std::path::PathBuf;

    use super::Element;

    impl<K, V, S> Element for HashMap<K, V, S> {}
    impl<T, S> Element for HashSet<T, S> {}
    impl Element for PathBuf {}
    impl Element for OsString {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Element for Plain {}

    #[test]
    fn test_default_kind_is_owned() {
        assert_eq!(Plain::KIND, ElementKind::Owned);
        assert_eq!(u32::KIND, ElementKind::Owned);
        assert_eq!(String::KIND, ElementKind::Owned);
        assert_eq!(<Box<Plain>>::KIND, ElementKind::Owned);
        assert_eq!(<RefCell<Plain>>::KIND, ElementKind::Owned);
    }

    #[test]
    fn test_references_are_shared() {
        assert_eq!(<&Plain>::KIND, ElementKind::Shared);
        assert_eq!(<&mut Plain>::KIND, ElementKind::Shared);
        assert_eq!(<&str>::KIND, ElementKind::Shared);
        assert_eq!(<Rc<RefCell<Plain>>>::KIND, ElementKind::Shared);
        assert_eq!(<Arc<Plain>>::KIND, ElementKind::Shared);
        assert_eq!(<NonNull<Plain>>::KIND, ElementKind::Shared);
    }

    #[test]
    fn test_option_follows_inner_kind() {
        assert_eq!(<Option<u8>>::KIND, ElementKind::Owned);
        assert_eq!(<Option<Rc<u8>>>::KIND, ElementKind::Shared);
    }

    #[test]
    fn test_tuples_are_owned() {
        assert_eq!(<(i32,)>::KIND, ElementKind::Owned);
        assert_eq!(<(i32, char)>::KIND, ElementKind::Owned);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8)>::KIND,
            ElementKind::Owned
        );
    }

    #[test]
    fn test_core_value_types_are_owned() {
        assert_eq!(Duration::KIND, ElementKind::Owned);
        assert_eq!(Ordering::KIND, ElementKind::Owned);
        assert_eq!(NonZeroU32::KIND, ElementKind::Owned);
        assert_eq!(NonZeroIsize::KIND, ElementKind::Owned);
        assert_eq!(<Wrapping<u8>>::KIND, ElementKind::Owned);
        assert_eq!(<Cow<'static, str>>::KIND, ElementKind::Owned);
        assert_eq!(<Reverse<u64>>::KIND, ElementKind::Owned);
        assert_eq!(<Reverse<&u64>>::KIND, ElementKind::Shared);
    }

    #[test]
    fn test_is_shared() {
        assert!(ElementKind::Shared.is_shared());
        assert!(!ElementKind::Owned.is_shared());
    }
}
