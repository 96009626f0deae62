use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use uniq::UniquePtr;

struct Tally(Rc<Cell<usize>>);

impl Drop for Tally {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[derive(Debug, Clone)]
enum Operation {
    Fill,
    Clear,
    Release,
    Take,
    Swap,
}

proptest! {
    #[test]
    fn test_every_value_dropped_exactly_once(ops in proptest::collection::vec(
        prop_oneof![
            Just(Operation::Fill),
            Just(Operation::Clear),
            Just(Operation::Release),
            Just(Operation::Take),
            Just(Operation::Swap),
        ],
        1..64
    )) {
        let drops = Rc::new(Cell::new(0));
        let mut created = 0usize;
        let mut a: UniquePtr<Tally> = UniquePtr::null();
        let mut b: UniquePtr<Tally> = UniquePtr::null();
        let mut released = Vec::new();

        for op in ops {
            match op {
                Operation::Fill => {
                    created += 1;
                    a.assign(UniquePtr::new(Tally(drops.clone())));
                }
                Operation::Clear => a.clear(),
                Operation::Release => {
                    if let Some(ptr) = a.release() {
                        released.push(ptr);
                    }
                    prop_assert!(a.is_null());
                }
                Operation::Take => {
                    let addr = a.get();
                    let moved = a.take();
                    prop_assert!(a.is_null());
                    prop_assert_eq!(moved.get(), addr);
                    b.assign(moved);
                }
                Operation::Swap => {
                    let (before_a, before_b) = (a.get(), b.get());
                    a.swap(&mut b);
                    prop_assert_eq!(a.get(), before_b);
                    prop_assert_eq!(b.get(), before_a);
                }
            }

            let live = usize::from(a.is_some()) + usize::from(b.is_some());
            prop_assert_eq!(drops.get() + live + released.len(), created);
        }

        drop(a);
        drop(b);
        for ptr in released.drain(..) {
            // SAFETY: each released address was allocated by `UniquePtr::new`.
            drop(unsafe { UniquePtr::from_non_null(ptr) });
        }
        prop_assert_eq!(drops.get(), created);
    }

    #[test]
    fn test_slice_matches_vec(values in proptest::collection::vec(any::<i32>(), 0..128)) {
        let owner = UniquePtr::from_vec(values.clone());
        prop_assert_eq!(owner.len(), values.len());
        prop_assert_eq!(owner.as_slice(), values.as_slice());

        for (i, v) in values.iter().enumerate() {
            prop_assert_eq!(owner[i], *v);
        }
    }
}
