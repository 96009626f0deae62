//! # `uniq` - Exclusive-Ownership Heap Pointer
//!
//! [`UniquePtr<T>`] is a move-only pointer that is either null or the single
//! owner of one heap allocation: a sized value, a slice, a string or a trait
//! object. [`wrap_unique`] turns a raw allocation result into such an owner.
//!
//! ## Guarantees
//!
//! - **One owner**: a `UniquePtr` is never cloned, and two of them cannot be
//!   compared with each other. Equality exists only against raw pointers.
//! - **Kind-correct deletion**: the pointee's [`Pointee::Kind`] selects how it
//!   is destroyed (one value, every element of a slice, or through a vtable).
//! - **`Box` compatible**: allocations use the global allocator with the layouts
//!   `Box` uses, so ownership can move between the two in either direction.
//! - **Checked where it matters**: null dereference panics; the unchecked
//!   accessors only assert in debug builds.
//!
//! ## Compile-time rejections
//!
//! - comparing two `UniquePtr`s,
//! - indexing a pointer to a non-slice,
//! - converting moves that are not coercions (see [`upcast!`]).
//!
//! ## Example
//!
//! ```rust
//! use uniq::{wrap_unique, UniquePtr};
//!
//! let mut p = unsafe { wrap_unique(Box::into_raw(Box::new(5))) };
//! assert_eq!(*p, 5);
//!
//! p.clear();
//! assert!(p.is_null());
//!
//! let values = UniquePtr::from_vec(vec![1, 2, 3]);
//! assert_eq!((values[0], values[1], values[2]), (1, 2, 3));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod alloc;
pub mod deleter;
pub mod meta;
pub mod ptr;

pub use alloc::AllocError;
pub use meta::{Array, Dynamic, Pointee, PointeeKind, Scalar};
pub use ptr::{get_ptr, move_unique, swap, wrap_box, wrap_unique, UniquePtr};

// Compile-time assertions for memory layout optimizations
const _: () = {
    use core::mem;

    // The null state lives in the pointer's niche.
    assert!(mem::size_of::<UniquePtr<u64>>() == mem::size_of::<*mut u64>());
    assert!(mem::size_of::<UniquePtr<[u64]>>() == mem::size_of::<*mut [u64]>());
    assert!(mem::size_of::<UniquePtr<dyn core::any::Any>>() == mem::size_of::<*mut dyn core::any::Any>());

    // Kind tags are markers only.
    assert!(mem::size_of::<Scalar>() == 0);
    assert!(mem::size_of::<Array>() == 0);
};
