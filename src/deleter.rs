//! Destruction of owned allocations.
//!
//! Each [`Pointee`](crate::meta::Pointee) selects one of these paths through its
//! `Kind`:
//!
//! | Kind      | Drops                         | Frees with                 |
//! |-----------|-------------------------------|----------------------------|
//! | `Scalar`  | the single value              | `Layout::new::<T>()`       |
//! | `Array`   | every element, front to back  | the layout of the slice    |
//! | `Dynamic` | the value, through its vtable | the layout it reports      |
//!
//! All three free exactly what `Box` would free for the same pointer, so
//! allocations may move freely between `Box` and `UniquePtr`. Zero-sized
//! layouts were never allocated and are not freed.

use core::alloc::Layout;
use core::ptr::{self, NonNull};
use std::alloc::dealloc;

/// Drops and frees a single sized value.
///
/// # Safety
///
/// `ptr` must be a live, uniquely owned allocation of `Layout::new::<T>()`
/// from the global allocator (or dangling, for zero-sized `T`).
pub unsafe fn delete_scalar<T>(ptr: NonNull<T>) {
    #[cfg(feature = "tracing")]
    tracing::trace!(kind = "scalar", addr = ?ptr, "deleting owned value");

    ptr::drop_in_place(ptr.as_ptr());

    let layout = Layout::new::<T>();
    if layout.size() != 0 {
        dealloc(ptr.as_ptr().cast::<u8>(), layout);
    }
}

/// Drops every element of a slice and frees its block.
///
/// # Safety
///
/// `ptr` must be a live, uniquely owned allocation of `Layout::array::<T>(len)`
/// from the global allocator (or dangling, when that layout is zero-sized).
pub unsafe fn delete_array<T>(ptr: NonNull<[T]>) {
    #[cfg(feature = "tracing")]
    tracing::trace!(kind = "array", addr = ?ptr, len = ptr.len(), "deleting owned slice");

    // The layout must be read while the elements are still alive.
    let layout = Layout::for_value(ptr.as_ref());
    ptr::drop_in_place(ptr.as_ptr());

    if layout.size() != 0 {
        dealloc(ptr.as_ptr().cast::<u8>(), layout);
    }
}

/// Drops and frees an unsized value, typically a trait object.
///
/// # Safety
///
/// `ptr` must be a live, uniquely owned allocation whose layout is
/// `Layout::for_value(&*ptr)`, from the global allocator.
pub unsafe fn delete_dynamic<T: ?Sized>(ptr: NonNull<T>) {
    #[cfg(feature = "tracing")]
    tracing::trace!(kind = "dynamic", addr = ?ptr.cast::<u8>(), "deleting owned object");

    let layout = Layout::for_value(ptr.as_ref());
    ptr::drop_in_place(ptr.as_ptr());

    if layout.size() != 0 {
        dealloc(ptr.as_ptr().cast::<u8>(), layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Tally(Rc<Cell<usize>>);

    impl Drop for Tally {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_delete_scalar_drops_once() {
        let drops = Rc::new(Cell::new(0));
        let raw = Box::into_raw(Box::new(Tally(drops.clone())));

        unsafe { delete_scalar(NonNull::new_unchecked(raw)) };
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_delete_array_drops_every_element() {
        let drops = Rc::new(Cell::new(0));
        let boxed: Box<[Tally]> = (0..4).map(|_| Tally(drops.clone())).collect();
        let raw = Box::into_raw(boxed);

        unsafe { delete_array(NonNull::new_unchecked(raw)) };
        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn test_delete_zero_sized() {
        let raw = Box::into_raw(Box::new(()));
        unsafe { delete_scalar(NonNull::new_unchecked(raw)) };

        let empty: Box<[u64]> = Vec::new().into_boxed_slice();
        unsafe { delete_array(NonNull::new_unchecked(Box::into_raw(empty))) };
    }

    #[test]
    fn test_delete_dynamic() {
        let drops = Rc::new(Cell::new(0));
        let boxed: Box<dyn core::any::Any> = Box::new(Tally(drops.clone()));

        unsafe { delete_dynamic(NonNull::new_unchecked(Box::into_raw(boxed))) };
        assert_eq!(drops.get(), 1);
    }
}
