//! Free functions over [`UniquePtr`].

use super::unique_ptr::UniquePtr;
use crate::meta::Pointee;
use core::ptr::NonNull;

/// Takes ownership of a raw allocation result.
///
/// This is the entry point for code that receives pointers from
/// `Box::into_raw`, `Vec::into_boxed_slice` or foreign code handing memory
/// back. The caller must not use `raw` directly afterwards.
///
/// ```
/// use uniq::wrap_unique;
///
/// let raw = Box::into_raw(Box::new(5));
/// let owner = unsafe { wrap_unique(raw) };
/// assert!(owner == raw);
/// assert_eq!(*owner, 5);
/// ```
///
/// # Safety
///
/// See [`UniquePtr::from_raw`].
#[inline]
pub unsafe fn wrap_unique<T: ?Sized + Pointee>(raw: *mut T) -> UniquePtr<T> {
    UniquePtr::from_raw(raw)
}

/// The factory over the standard library's own owning pointer.
///
/// # Safety
///
/// `raw` must be non-null and satisfy the contract of [`Box::from_raw`].
#[inline]
pub unsafe fn wrap_box<T: ?Sized>(raw: *mut T) -> Box<T> {
    debug_assert!(!raw.is_null(), "wrapped a null pointer into a Box");
    Box::from_raw(raw)
}

/// The managed address of `owner`. Ownership is unchanged.
#[inline]
pub fn get_ptr<T: ?Sized + Pointee>(owner: &UniquePtr<T>) -> Option<NonNull<T>> {
    owner.get()
}

/// Moves ownership out of `owner`, leaving it null.
///
/// Identical to [`UniquePtr::take`]; kept for call sites written as an
/// explicit move.
#[inline]
pub fn move_unique<T: ?Sized + Pointee>(owner: &mut UniquePtr<T>) -> UniquePtr<T> {
    owner.take()
}

/// Exchanges the addresses of two owners.
#[inline]
pub fn swap<T: ?Sized + Pointee>(a: &mut UniquePtr<T>, b: &mut UniquePtr<T>) {
    a.swap(b);
}
