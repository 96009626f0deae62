//! The owning pointer type.

use crate::alloc::{raw, AllocError};
use crate::meta::Pointee;
use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop};
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::ptr::{self, NonNull};
use std::alloc::handle_alloc_error;

/// A move-only pointer that exclusively owns one heap value, slice or trait object.
///
/// The pointer is either null or the sole owner of its allocation. Dropping it,
/// resetting it or assigning over it destroys the owned value with the deleter
/// its [`Pointee`] kind selects: one value for sized types, every element for
/// slices, the vtable's drop for trait objects.
///
/// Allocations are interchangeable with `Box`: the same global allocator and
/// the same layouts are used on both sides.
///
/// # Comparing two owners
///
/// Two live `UniquePtr`s never share an address, so they have no equality.
/// Comparisons against raw pointers are available instead.
///
/// ```compile_fail
/// use uniq::UniquePtr;
///
/// let a = UniquePtr::new(1);
/// let b = UniquePtr::new(1);
/// let _ = a == b;
/// ```
///
/// # Indexing
///
/// Only slice owners can be indexed.
///
/// ```compile_fail
/// use uniq::UniquePtr;
///
/// let scalar = UniquePtr::new(3u8);
/// let _ = scalar[0];
/// ```
pub struct UniquePtr<T: ?Sized + Pointee> {
    ptr: Option<NonNull<T>>,
    _owns: PhantomData<T>,
}

// SAFETY: `UniquePtr<T>` owns its `T` exactly like `Box<T>`.
unsafe impl<T: ?Sized + Pointee + Send> Send for UniquePtr<T> {}
unsafe impl<T: ?Sized + Pointee + Sync> Sync for UniquePtr<T> {}

impl<T: ?Sized + Pointee> UniquePtr<T> {
    /// Creates an empty pointer.
    #[inline]
    pub const fn null() -> Self {
        Self {
            ptr: None,
            _owns: PhantomData,
        }
    }

    /// Takes ownership of `raw`. A null `raw` yields an empty pointer.
    ///
    /// # Safety
    ///
    /// `raw` must be null or a live allocation made the way `Box<T>` makes them
    /// (for example by [`Box::into_raw`]) that nothing else owns. The caller must
    /// not use or free `raw` afterwards.
    #[inline]
    pub unsafe fn from_raw(raw: *mut T) -> Self {
        Self {
            ptr: NonNull::new(raw),
            _owns: PhantomData,
        }
    }

    /// Takes ownership of `ptr`.
    ///
    /// # Safety
    ///
    /// Same contract as [`from_raw`](Self::from_raw).
    #[inline]
    pub unsafe fn from_non_null(ptr: NonNull<T>) -> Self {
        Self {
            ptr: Some(ptr),
            _owns: PhantomData,
        }
    }

    /// Adopts the allocation of a `Box`.
    #[inline]
    pub fn from_box(boxed: Box<T>) -> Self {
        // SAFETY: `Box::into_raw` is never null and hands over sole ownership.
        unsafe { Self::from_non_null(NonNull::new_unchecked(Box::into_raw(boxed))) }
    }

    /// Hands the allocation to a `Box`, or `None` if empty.
    #[inline]
    pub fn into_box(self) -> Option<Box<T>> {
        // SAFETY: the allocation has the layout `Box<T>` expects.
        self.into_raw().map(|ptr| unsafe { Box::from_raw(ptr.as_ptr()) })
    }

    /// The managed address, without affecting ownership.
    #[inline]
    pub const fn get(&self) -> Option<NonNull<T>> {
        self.ptr
    }

    /// `true` if this pointer owns nothing.
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// `true` if this pointer owns a value.
    #[inline]
    pub const fn is_some(&self) -> bool {
        self.ptr.is_some()
    }

    /// Borrows the owned value, if any.
    #[inline]
    pub fn as_ref(&self) -> Option<&T> {
        // SAFETY: a present pointer is live and uniquely owned by `self`.
        self.ptr.map(|ptr| unsafe { &*ptr.as_ptr() })
    }

    /// Mutably borrows the owned value, if any.
    #[inline]
    pub fn as_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as above, and `&mut self` guarantees exclusivity.
        self.ptr.map(|ptr| unsafe { &mut *ptr.as_ptr() })
    }

    /// Borrows the owned value without a null check in release builds.
    ///
    /// # Safety
    ///
    /// The pointer must not be null.
    #[inline]
    pub unsafe fn as_ref_unchecked(&self) -> &T {
        debug_assert!(self.ptr.is_some(), "dereferenced a null UniquePtr");
        &*self.ptr.unwrap_unchecked().as_ptr()
    }

    /// Mutably borrows the owned value without a null check in release builds.
    ///
    /// # Safety
    ///
    /// The pointer must not be null.
    #[inline]
    pub unsafe fn as_mut_unchecked(&mut self) -> &mut T {
        debug_assert!(self.ptr.is_some(), "dereferenced a null UniquePtr");
        &mut *self.ptr.unwrap_unchecked().as_ptr()
    }

    /// Gives up ownership without destroying anything. `self` becomes null.
    #[inline]
    pub fn release(&mut self) -> Option<NonNull<T>> {
        #[cfg(feature = "tracing")]
        if let Some(ptr) = self.ptr {
            tracing::trace!(addr = ?ptr.cast::<u8>(), "releasing ownership");
        }

        self.ptr.take()
    }

    /// Consumes the pointer and returns its address without destroying anything.
    #[inline]
    pub fn into_raw(self) -> Option<NonNull<T>> {
        let mut this = ManuallyDrop::new(self);
        this.release()
    }

    /// Takes ownership of `raw` and destroys the previously owned value.
    ///
    /// The new address is installed before the old value is destroyed, so a
    /// destructor that observes this pointer sees the new state.
    ///
    /// # Safety
    ///
    /// Same contract as [`from_raw`](Self::from_raw). In particular `raw` must
    /// not be the address already owned; debug builds assert this.
    #[inline]
    pub unsafe fn reset(&mut self, raw: *mut T) {
        self.install(NonNull::new(raw));
    }

    /// Destroys the owned value, if any, and leaves the pointer null.
    #[inline]
    pub fn clear(&mut self) {
        // SAFETY: installing null cannot alias anything.
        unsafe { self.install(None) };
    }

    /// Move-assigns `other` into `self`, destroying the value `self` owned.
    ///
    /// The old value is destroyed after `other`'s address is installed.
    #[inline]
    pub fn assign(&mut self, mut other: Self) {
        let incoming = other.release();
        // SAFETY: `incoming` was uniquely owned by `other`.
        unsafe { self.install(incoming) };
    }

    /// Moves the owned value out into a new pointer, leaving `self` null.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Exchanges the owned addresses. Nothing is destroyed.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
    }

    /// Moves ownership into a pointer of another pointee type.
    ///
    /// Prefer [`upcast!`](crate::upcast), which only admits coercions.
    ///
    /// # Safety
    ///
    /// `convert` must return a non-null pointer to the same allocation, typed
    /// so that `U`'s deleter frees it correctly.
    #[inline]
    pub unsafe fn convert_with<U, F>(self, convert: F) -> UniquePtr<U>
    where
        U: ?Sized + Pointee,
        F: FnOnce(*mut T) -> *mut U,
    {
        match self.into_raw() {
            Some(ptr) => {
                let converted = convert(ptr.as_ptr());
                debug_assert!(ptr::addr_eq(ptr.as_ptr(), converted), "conversion moved the address");
                UniquePtr::from_raw(converted)
            }
            None => UniquePtr::null(),
        }
    }

    /// Number of owned elements: 0 when null, 1 for scalars and trait objects.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.ptr.map_or(0, T::element_count)
    }

    /// Installs `incoming`, then destroys the previously owned value.
    ///
    /// # Safety
    ///
    /// `incoming` must be null or uniquely owned and Box-compatible.
    unsafe fn install(&mut self, incoming: Option<NonNull<T>>) {
        let previous = mem::replace(&mut self.ptr, incoming);

        if let (Some(old), Some(new)) = (previous, incoming) {
            debug_assert!(!ptr::addr_eq(old.as_ptr(), new.as_ptr()), "reset a UniquePtr to the address it already owns");
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            replaced = previous.is_some(),
            null = incoming.is_none(),
            "resetting owner"
        );

        if let Some(old) = previous {
            T::delete(old);
        }
    }
}

impl<T> UniquePtr<T> {
    /// Moves `value` to the heap and owns it.
    ///
    /// Aborts through `handle_alloc_error` if the allocation fails.
    #[inline]
    pub fn new(value: T) -> Self {
        // SAFETY: freshly allocated with the layout of `T`.
        unsafe { Self::from_non_null(raw::alloc_value(value)) }
    }

    /// Moves `value` to the heap and owns it.
    ///
    /// # Errors
    /// Returns `AllocError` if the allocation fails.
    #[inline]
    pub fn try_new(value: T) -> Result<Self, AllocError> {
        // SAFETY: freshly allocated with the layout of `T`.
        raw::try_alloc_value(value).map(|ptr| unsafe { Self::from_non_null(ptr) })
    }

    /// The managed address as a raw pointer, null when empty.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// Moves the owned value back out of the heap.
    #[inline]
    pub fn into_inner(self) -> Option<T> {
        self.into_box().map(|boxed| *boxed)
    }

    /// A non-null address no allocation can have, for tables keyed by owned
    /// addresses to mark removed slots. Never dereference or free it.
    #[inline]
    pub fn deleted_marker() -> *mut T {
        usize::MAX as *mut T
    }
}

impl<T> UniquePtr<[T]> {
    /// Owns the elements of `vec` as a slice, shrinking its capacity to fit.
    #[inline]
    pub fn from_vec(vec: Vec<T>) -> Self {
        Self::from_box(vec.into_boxed_slice())
    }

    /// Owns a slice of `len` elements where slot `i` holds `init(i)`.
    ///
    /// Aborts through `handle_alloc_error` if the allocation fails.
    pub fn new_slice<F>(len: usize, init: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        match Self::try_new_slice(len, init) {
            Ok(owner) => owner,
            Err(AllocError) => match Layout::array::<T>(len) {
                Ok(layout) => handle_alloc_error(layout),
                Err(_) => panic!("capacity overflow"),
            },
        }
    }

    /// Owns a slice of `len` elements where slot `i` holds `init(i)`.
    ///
    /// # Errors
    /// Returns `AllocError` if the size overflows or the allocation fails.
    pub fn try_new_slice<F>(len: usize, init: F) -> Result<Self, AllocError>
    where
        F: FnMut(usize) -> T,
    {
        // SAFETY: freshly allocated with the layout of `[T]`.
        raw::try_alloc_slice_with(len, init).map(|ptr| unsafe { Self::from_non_null(ptr) })
    }

    /// Number of owned elements, 0 when null.
    #[inline]
    pub fn len(&self) -> usize {
        self.element_count()
    }

    /// `true` when null or owning an empty slice.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The owned elements, empty when null.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.as_ref().unwrap_or(&[])
    }

    /// The owned elements, mutably, empty when null.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.as_mut().unwrap_or(&mut [])
    }

    /// Pointer to the first element, null when empty.
    #[inline]
    pub fn as_mut_ptr(&self) -> *mut T {
        self.ptr.map_or(ptr::null_mut(), |ptr| ptr.as_ptr().cast::<T>())
    }

    /// Element `index` without bounds or null checks in release builds.
    ///
    /// # Safety
    ///
    /// The pointer must not be null and `index` must be below [`len`](Self::len).
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(self.ptr.is_some(), "indexed a null UniquePtr");
        debug_assert!(index < self.len(), "index {index} out of bounds");
        &*self.as_mut_ptr().add(index)
    }

    /// Element `index` mutably, without bounds or null checks in release builds.
    ///
    /// # Safety
    ///
    /// The pointer must not be null and `index` must be below [`len`](Self::len).
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(self.ptr.is_some(), "indexed a null UniquePtr");
        debug_assert!(index < self.len(), "index {index} out of bounds");
        &mut *self.as_mut_ptr().add(index)
    }
}

impl UniquePtr<str> {
    /// Owns the contents of `s`.
    #[inline]
    pub fn from_string(s: String) -> Self {
        Self::from_box(s.into_boxed_str())
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn null_deref() -> ! {
    panic!("dereferenced a null UniquePtr")
}

impl<T: ?Sized + Pointee> Deref for UniquePtr<T> {
    type Target = T;

    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        match self.as_ref() {
            Some(value) => value,
            None => null_deref(),
        }
    }
}

impl<T: ?Sized + Pointee> DerefMut for UniquePtr<T> {
    #[inline]
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.as_mut() {
            Some(value) => value,
            None => null_deref(),
        }
    }
}

impl<T> Index<usize> for UniquePtr<[T]> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        &(**self)[index]
    }
}

impl<T> IndexMut<usize> for UniquePtr<[T]> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut (**self)[index]
    }
}

impl<T: ?Sized + Pointee> Drop for UniquePtr<T> {
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: `ptr` is live, uniquely owned and Box-compatible.
            unsafe { T::delete(ptr) };
        }
    }
}

impl<T: ?Sized + Pointee> Default for UniquePtr<T> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized + Pointee> From<Box<T>> for UniquePtr<T> {
    #[inline]
    fn from(boxed: Box<T>) -> Self {
        Self::from_box(boxed)
    }
}

impl<T> From<Vec<T>> for UniquePtr<[T]> {
    #[inline]
    fn from(vec: Vec<T>) -> Self {
        Self::from_vec(vec)
    }
}

impl<T: ?Sized + Pointee + fmt::Debug> fmt::Debug for UniquePtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ref() {
            Some(value) => f.debug_tuple("UniquePtr").field(&value).finish(),
            None => f.write_str("UniquePtr(null)"),
        }
    }
}

impl<T: ?Sized + Pointee> fmt::Pointer for UniquePtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ptr {
            Some(ptr) => fmt::Pointer::fmt(&ptr, f),
            None => fmt::Pointer::fmt(&ptr::null::<u8>(), f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct Tally(Rc<Cell<usize>>);

    impl Drop for Tally {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_layout_matches_raw_pointer() {
        assert_eq!(mem::size_of::<UniquePtr<u64>>(), mem::size_of::<*mut u64>());
        assert_eq!(mem::size_of::<UniquePtr<[u64]>>(), mem::size_of::<*mut [u64]>());
    }

    #[test]
    fn test_null_state() {
        let p: UniquePtr<i32> = UniquePtr::null();
        assert!(p.is_null());
        assert!(!p.is_some());
        assert!(p.as_ptr().is_null());
        assert_eq!(p.element_count(), 0);
        assert_eq!(format!("{p:?}"), "UniquePtr(null)");
    }

    #[test]
    fn test_assign_destroys_previous_and_keeps_incoming() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let mut owner = UniquePtr::new(Tally(first.clone()));
        let incoming = UniquePtr::new(Tally(second.clone()));
        let incoming_addr = incoming.as_ptr();

        owner.assign(incoming);
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
        assert_eq!(owner.as_ptr(), incoming_addr);

        drop(owner);
        assert_eq!(second.get(), 1);
    }

    #[test]
    #[should_panic(expected = "dereferenced a null UniquePtr")]
    fn test_null_deref_panics() {
        let p: UniquePtr<u8> = UniquePtr::default();
        let _value: u8 = *p;
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "reset a UniquePtr to the address it already owns")]
    fn test_self_reset_asserts() {
        let mut p = UniquePtr::new(Tally(Rc::new(Cell::new(0))));
        let same = p.as_ptr();
        unsafe { p.reset(same) };
    }

    #[test]
    fn test_element_count_by_kind() {
        assert_eq!(UniquePtr::new(1u8).element_count(), 1);
        assert_eq!(UniquePtr::from_vec(vec![1, 2, 3]).element_count(), 3);
        assert_eq!(UniquePtr::from_string("abcd".into()).element_count(), 4);
    }

    #[test]
    fn test_clear_drops_once() {
        let drops = Rc::new(Cell::new(0));
        let mut p = UniquePtr::new(Tally(drops.clone()));
        p.clear();
        p.clear();
        assert_eq!(drops.get(), 1);
        assert!(p.is_null());
    }
}
