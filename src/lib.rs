#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod collection;
mod element;
pub mod sequence;
mod sort;

extern crate alloc;

pub use collection::Collection;
pub use element::Element;
pub use element::ElementKind;
pub use sequence::CursorMut;
pub use sequence::IntoIter;
pub use sequence::Iter;
pub use sequence::IterMut;
pub use sequence::Sequence;
