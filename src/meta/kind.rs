//! Type-level deletion kinds.
//!
//! Each [`Pointee`](super::Pointee) names one of these zero-sized tags as its
//! `Kind`. The tags double as compile-time booleans: an impl bounded on
//! `Pointee<Kind = Array>` exists only for slice-shaped pointees.

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Scalar {}
    impl Sealed for super::Array {}
    impl Sealed for super::Dynamic {}
}

/// A compile-time description of how a pointee is laid out and destroyed.
pub trait PointeeKind: sealed::Sealed {
    /// `true` for contiguous, runtime-sized sequences of elements.
    const IS_ARRAY: bool;

    /// Short name used in trace output.
    const NAME: &'static str;
}

/// A single sized value. Destroyed with the layout of `T`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Scalar;

/// A slice of elements. Destroyed element by element, then freed as one block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Array;

/// A trait object. Destroyed through its vtable with the layout it reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Dynamic;

impl PointeeKind for Scalar {
    const IS_ARRAY: bool = false;
    const NAME: &'static str = "scalar";
}

impl PointeeKind for Array {
    const IS_ARRAY: bool = true;
    const NAME: &'static str = "array";
}

impl PointeeKind for Dynamic {
    const IS_ARRAY: bool = false;
    const NAME: &'static str = "dynamic";
}
