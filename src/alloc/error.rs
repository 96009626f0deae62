//! Fallible-allocation error type.

/// The error type for allocation failures.
///
/// Returned by the fallible constructors
/// ([`UniquePtr::try_new`](crate::UniquePtr::try_new),
/// [`UniquePtr::try_new_slice`](crate::UniquePtr::try_new_slice)) when the
/// global allocator returns null or the requested size overflows `isize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError;

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("memory allocation failed")
    }
}

impl std::error::Error for AllocError {}
