//! [`UniquePtr`] and the free functions around it.

pub mod cmp;
pub mod functions;
pub mod unique_ptr;

pub use functions::{get_ptr, move_unique, swap, wrap_box, wrap_unique};
pub use unique_ptr::UniquePtr;
