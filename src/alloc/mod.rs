//! Heap allocation backing [`UniquePtr`](crate::UniquePtr) constructors.

pub mod error;
pub(crate) mod raw;

pub use error::AllocError;
