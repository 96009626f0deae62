//! Address comparison between owners and raw pointers.
//!
//! Only addresses are compared; slice lengths and vtables are ignored. A null
//! owner equals every null raw pointer.

use super::unique_ptr::UniquePtr;
use crate::meta::Pointee;
use core::ptr::{self, NonNull};

#[inline]
fn owns_address<T: ?Sized + Pointee>(owner: &UniquePtr<T>, raw: *const T) -> bool {
    match owner.get() {
        Some(ptr) => ptr::addr_eq(ptr.as_ptr(), raw),
        None => raw.is_null(),
    }
}

impl<T: ?Sized + Pointee> PartialEq<*mut T> for UniquePtr<T> {
    #[inline]
    fn eq(&self, other: &*mut T) -> bool {
        owns_address(self, *other)
    }
}

impl<T: ?Sized + Pointee> PartialEq<*const T> for UniquePtr<T> {
    #[inline]
    fn eq(&self, other: &*const T) -> bool {
        owns_address(self, *other)
    }
}

impl<T: ?Sized + Pointee> PartialEq<NonNull<T>> for UniquePtr<T> {
    #[inline]
    fn eq(&self, other: &NonNull<T>) -> bool {
        owns_address(self, other.as_ptr())
    }
}

impl<T: ?Sized + Pointee> PartialEq<UniquePtr<T>> for *mut T {
    #[inline]
    fn eq(&self, other: &UniquePtr<T>) -> bool {
        owns_address(other, *self)
    }
}

impl<T: ?Sized + Pointee> PartialEq<UniquePtr<T>> for *const T {
    #[inline]
    fn eq(&self, other: &UniquePtr<T>) -> bool {
        owns_address(other, *self)
    }
}

impl<T: ?Sized + Pointee> PartialEq<UniquePtr<T>> for NonNull<T> {
    #[inline]
    fn eq(&self, other: &UniquePtr<T>) -> bool {
        owns_address(other, self.as_ptr())
    }
}
