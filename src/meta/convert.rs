//! Converting moves between compatible pointees.
//!
//! A converting move is accepted only when the compiler would coerce
//! `*mut Source` into `*mut Target` on its own: concrete types into the trait
//! objects they implement, and fixed-size arrays into slices. Anything else,
//! including the reverse direction, is a type error.
//!
//! ```compile_fail
//! use core::fmt::Debug;
//! use uniq::{upcast, UniquePtr};
//!
//! let erased: UniquePtr<dyn Debug> = upcast!(UniquePtr::new(1u32) => dyn Debug);
//! // There is no coercion from a trait object back to a concrete type.
//! let _concrete = upcast!(erased => u32);
//! ```
//!
//! ```compile_fail
//! use uniq::{upcast, UniquePtr};
//!
//! // Pointer casts between unrelated sized types are not coercions.
//! let _bits = upcast!(UniquePtr::new(1.0f32) => u32);
//! ```

/// Moves ownership into a `UniquePtr` of a compatible pointee.
///
/// The address is preserved and the source is consumed.
///
/// ```
/// use core::fmt::Debug;
/// use uniq::{upcast, UniquePtr};
///
/// let concrete = UniquePtr::new(5u8);
/// let addr = concrete.as_ptr();
/// let erased: UniquePtr<dyn Debug> = upcast!(concrete => dyn Debug);
/// assert!(erased == addr as *const dyn Debug);
///
/// let fixed: UniquePtr<[i32; 3]> = UniquePtr::new([1, 2, 3]);
/// let slice: UniquePtr<[i32]> = upcast!(fixed => [i32]);
/// assert_eq!(slice.len(), 3);
/// ```
#[macro_export]
macro_rules! upcast {
    ($ptr:expr => $target:ty) => {{
        let source = $ptr;
        // SAFETY: the closure body is an implicit coercion, which keeps the
        // address and admits only conversions the compiler proves sound.
        unsafe { $crate::UniquePtr::convert_with(source, |raw| -> *mut $target { raw }) }
    }};
}
