//! The [`Pointee`] trait and its implementations.

use super::kind::{Array, PointeeKind, Scalar};
use crate::deleter;
use core::ptr::NonNull;

/// Anything a [`UniquePtr`](crate::UniquePtr) can own.
///
/// `Element` is the type a single indexed access yields (the pointee itself for
/// scalars and trait objects), `Kind` selects the deleter.
///
/// Implemented for every sized type, for `[T]`, for `str`, and for the common
/// standard trait objects. Other trait objects opt in through
/// [`impl_dyn_pointee!`](crate::impl_dyn_pointee).
///
/// # Safety
///
/// `delete` must release a pointer produced by the global allocator with the
/// layout of the pointed-to value, exactly as `Box<Self>` would on drop.
pub unsafe trait Pointee {
    /// The element type of an array pointee, or `Self` otherwise.
    type Element: ?Sized;

    /// Which deletion path destroys this pointee.
    type Kind: PointeeKind;

    /// Number of elements behind `ptr`: 1 for scalars and trait objects.
    fn element_count(ptr: NonNull<Self>) -> usize;

    /// Destroys the value behind `ptr` and frees its allocation.
    ///
    /// # Safety
    ///
    /// `ptr` must be live, uniquely owned and allocated the way `Box<Self>`
    /// allocates. It must not be used afterwards.
    unsafe fn delete(ptr: NonNull<Self>);
}

unsafe impl<T> Pointee for T {
    type Element = T;
    type Kind = Scalar;

    #[inline]
    fn element_count(_ptr: NonNull<Self>) -> usize {
        1
    }

    #[inline]
    unsafe fn delete(ptr: NonNull<Self>) {
        deleter::delete_scalar(ptr);
    }
}

unsafe impl<T> Pointee for [T] {
    type Element = T;
    type Kind = Array;

    #[inline]
    fn element_count(ptr: NonNull<Self>) -> usize {
        ptr.len()
    }

    #[inline]
    unsafe fn delete(ptr: NonNull<Self>) {
        deleter::delete_array(ptr);
    }
}

unsafe impl Pointee for str {
    type Element = u8;
    type Kind = Array;

    #[inline]
    fn element_count(ptr: NonNull<Self>) -> usize {
        as_bytes(ptr).len()
    }

    #[inline]
    unsafe fn delete(ptr: NonNull<Self>) {
        // `str` has the layout of `[u8]` and bytes have no drop glue.
        deleter::delete_array(as_bytes(ptr));
    }
}

#[inline]
fn as_bytes(ptr: NonNull<str>) -> NonNull<[u8]> {
    // SAFETY: the cast keeps the address and length of a non-null pointer.
    unsafe { NonNull::new_unchecked(ptr.as_ptr() as *mut [u8]) }
}

/// Makes trait objects ownable by [`UniquePtr`](crate::UniquePtr).
///
/// ```
/// use uniq::{impl_dyn_pointee, upcast, UniquePtr};
///
/// trait Shape {
///     fn area(&self) -> f64;
/// }
///
/// struct Square(f64);
///
/// impl Shape for Square {
///     fn area(&self) -> f64 {
///         self.0 * self.0
///     }
/// }
///
/// impl_dyn_pointee!(dyn Shape);
///
/// let shape: UniquePtr<dyn Shape> = upcast!(UniquePtr::new(Square(3.0)) => dyn Shape);
/// assert_eq!(shape.area(), 9.0);
/// ```
#[macro_export]
macro_rules! impl_dyn_pointee {
    ($($dyn:ty),+ $(,)?) => {
        $(
            // SAFETY: trait objects report their own layout through the vtable.
            unsafe impl $crate::meta::Pointee for $dyn {
                type Element = Self;
                type Kind = $crate::meta::Dynamic;

                #[inline]
                fn element_count(_ptr: ::core::ptr::NonNull<Self>) -> usize {
                    1
                }

                #[inline]
                unsafe fn delete(ptr: ::core::ptr::NonNull<Self>) {
                    $crate::deleter::delete_dynamic(ptr);
                }
            }
        )+
    };
}

impl_dyn_pointee!(
    dyn core::any::Any,
    dyn core::any::Any + Send,
    dyn core::any::Any + Send + Sync,
    dyn core::fmt::Debug,
    dyn core::fmt::Debug + Send + Sync,
    dyn core::fmt::Display,
    dyn std::error::Error,
    dyn std::error::Error + Send + Sync,
);

/// Whether `T` is owned as a runtime-sized array.
pub const fn is_array<T: ?Sized + Pointee>() -> bool {
    <T::Kind as PointeeKind>::IS_ARRAY
}

/// The deletion kind name of `T`, as used in trace output.
pub const fn kind_name<T: ?Sized + Pointee>() -> &'static str {
    <T::Kind as PointeeKind>::NAME
}
