//! Raw allocation for owned values and slices.
//!
//! Blocks come from the global allocator with exactly the layout `Box` uses, so
//! the deleters in [`crate::deleter`] can release them and `Box::from_raw` can
//! adopt them.

use super::error::AllocError;
use core::alloc::Layout;
use core::ptr::{self, NonNull};
use std::alloc::{alloc, dealloc, handle_alloc_error};

/// Allocates a block for `layout`, or a dangling pointer if it is zero-sized.
fn allocate(layout: Layout) -> Result<NonNull<u8>, AllocError> {
    if layout.size() == 0 {
        // SAFETY: alignment is a non-zero power of two.
        return Ok(unsafe { NonNull::new_unchecked(layout.align() as *mut u8) });
    }

    // SAFETY: the layout has a non-zero size.
    NonNull::new(unsafe { alloc(layout) }).ok_or(AllocError)
}

/// Moves `value` to the heap, returning `AllocError` on exhaustion.
pub(crate) fn try_alloc_value<T>(value: T) -> Result<NonNull<T>, AllocError> {
    let raw = allocate(Layout::new::<T>())?.cast::<T>();

    // SAFETY: `raw` is valid for writes of one `T`.
    unsafe { raw.as_ptr().write(value) };
    Ok(raw)
}

/// Moves `value` to the heap, aborting through `handle_alloc_error` on exhaustion.
pub(crate) fn alloc_value<T>(value: T) -> NonNull<T> {
    let layout = Layout::new::<T>();
    match allocate(layout) {
        Ok(raw) => {
            let raw = raw.cast::<T>();
            // SAFETY: `raw` is valid for writes of one `T`.
            unsafe { raw.as_ptr().write(value) };
            raw
        }
        Err(AllocError) => handle_alloc_error(layout),
    }
}

/// Allocates a slice of `len` elements, filling slot `i` with `init(i)`.
///
/// If `init` panics the elements written so far are dropped and the block is
/// freed.
pub(crate) fn try_alloc_slice_with<T, F>(len: usize, mut init: F) -> Result<NonNull<[T]>, AllocError>
where
    F: FnMut(usize) -> T,
{
    let layout = Layout::array::<T>(len).map_err(|_| AllocError)?;
    let base = allocate(layout)?.cast::<T>();

    let mut guard = PartialSlice {
        base,
        layout,
        written: 0,
    };
    while guard.written < len {
        let value = init(guard.written);
        // SAFETY: `written < len`, so the slot lies inside the block.
        unsafe { base.as_ptr().add(guard.written).write(value) };
        guard.written += 1;
    }
    core::mem::forget(guard);

    Ok(NonNull::slice_from_raw_parts(base, len))
}

/// Cleans up a partially initialised slice when an initialiser unwinds.
struct PartialSlice<T> {
    base: NonNull<T>,
    layout: Layout,
    written: usize,
}

impl<T> Drop for PartialSlice<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `written` leading slots were initialised.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.base.as_ptr(), self.written));
            if self.layout.size() != 0 {
                dealloc(self.base.as_ptr().cast::<u8>(), self.layout);
            }
        }
    }
}
