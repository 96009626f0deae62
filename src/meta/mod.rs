//! Compile-time support for [`UniquePtr`](crate::UniquePtr).
//!
//! - [`Pointee`]: what can be owned, its element type and its deletion kind.
//! - [`Scalar`], [`Array`], [`Dynamic`]: type-level kind tags carrying
//!   compile-time booleans.
//! - [`upcast!`](crate::upcast): converting moves gated by coercion.

pub mod convert;
pub mod kind;
pub mod pointee;

pub use kind::{Array, Dynamic, PointeeKind, Scalar};
pub use pointee::{is_array, kind_name, Pointee};
