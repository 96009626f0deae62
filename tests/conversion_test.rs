use std::any::Any;
use std::cell::Cell;
use std::fmt::{Debug, Display};
use std::rc::Rc;
use uniq::{upcast, UniquePtr};

struct Tally(Rc<Cell<usize>>);

impl Drop for Tally {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn test_upcast_preserves_address() {
    let concrete = UniquePtr::new(17u32);
    let addr = concrete.as_ptr();

    let erased: UniquePtr<dyn Debug> = upcast!(concrete => dyn Debug);
    assert!(erased == addr as *const dyn Debug);
    assert_eq!(format!("{:?}", &*erased), "17");
}

#[test]
fn test_upcast_to_any_drops_concrete_value() {
    let drops = Rc::new(Cell::new(0));
    let erased: UniquePtr<dyn Any> = upcast!(UniquePtr::new(Tally(drops.clone())) => dyn Any);

    assert!(erased.is::<Tally>());
    drop(erased);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_upcast_of_null_stays_null() {
    let null: UniquePtr<String> = UniquePtr::null();
    let erased: UniquePtr<dyn Display> = upcast!(null => dyn Display);
    assert!(erased.is_null());
}

#[test]
fn test_fixed_array_to_slice() {
    let fixed = UniquePtr::new([10u16, 20, 30]);
    let slice: UniquePtr<[u16]> = upcast!(fixed => [u16]);

    assert_eq!(slice.len(), 3);
    assert_eq!(slice[1], 20);
}

#[test]
fn test_trait_object_roundtrip_through_box() {
    let boxed: Box<dyn Any + Send> = Box::new(String::from("boxed"));
    let owner = UniquePtr::from_box(boxed);
    let back = owner.into_box().unwrap();
    assert_eq!(back.downcast_ref::<String>().map(String::as_str), Some("boxed"));
}
