//! Helpers shared by the unit tests: a value type that counts its lifecycle events, and proptest
//! strategies that produce values for every alternative of a test catalog.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use proptest::strategy::Strategy;
use quickcheck_macros::quickcheck;

use crate::Variant;

/// Shared counters for every [`Tracked`] created from them.
#[derive(Debug, Default, Clone)]
pub struct Counters {
    created: Rc<Cell<usize>>,
    clones: Rc<Cell<usize>>,
    drops: Rc<Cell<usize>>,
}

impl Counters {
    pub fn created(&self) -> usize {
        self.created.get()
    }

    pub fn clones(&self) -> usize {
        self.clones.get()
    }

    pub fn drops(&self) -> usize {
        self.drops.get()
    }

    /// Every value that was created or cloned has been dropped.
    pub fn balanced(&self) -> bool {
        self.created() + self.clones() == self.drops()
    }
}

#[derive(Debug)]
pub struct Tracked {
    pub tag: i32,
    counters: Counters,
    panic_on_clone: bool,
}

impl Tracked {
    pub fn new(tag: i32, counters: &Counters) -> Self {
        counters.created.set(counters.created.get() + 1);
        Tracked {
            tag,
            counters: counters.clone(),
            panic_on_clone: false,
        }
    }

    /// A [`Tracked`] whose `clone` panics.
    pub fn panicking(tag: i32, counters: &Counters) -> Self {
        let mut tracked = Tracked::new(tag, counters);
        tracked.panic_on_clone = true;
        tracked
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if self.panic_on_clone {
            panic!("cloning Tracked({}) failed", self.tag);
        }
        self.counters.clones.set(self.counters.clones.get() + 1);
        Tracked {
            tag: self.tag,
            counters: self.counters.clone(),
            panic_on_clone: false,
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counters.drops.set(self.counters.drops.get() + 1);
    }
}

pub type Mixed = (i32, String, Vec<u8>, bool);

/// One value for every alternative of [`Mixed`].
#[derive(Debug, Clone, PartialEq)]
pub enum Alternative {
    Int(i32),
    Text(String),
    Bytes(Vec<u8>),
    Flag(bool),
}

impl Alternative {
    pub fn position(&self) -> usize {
        match self {
            Alternative::Int(_) => 0,
            Alternative::Text(_) => 1,
            Alternative::Bytes(_) => 2,
            Alternative::Flag(_) => 3,
        }
    }

    pub fn into_variant(self) -> Variant<Mixed> {
        match self {
            Alternative::Int(value) => Variant::new(value),
            Alternative::Text(value) => Variant::new(value),
            Alternative::Bytes(value) => Variant::new(value),
            Alternative::Flag(value) => Variant::new(value),
        }
    }

    /// The variant holds exactly this value, and nothing else can be read out of it.
    pub fn matches(&self, variant: &Variant<Mixed>) -> bool {
        let held = match self {
            Alternative::Int(value) => variant.get::<i32, _>() == Ok(value),
            Alternative::Text(value) => variant.get::<String, _>() == Ok(value),
            Alternative::Bytes(value) => variant.get::<Vec<u8>, _>() == Ok(value),
            Alternative::Flag(value) => variant.get::<bool, _>() == Ok(value),
        };
        let readable = [
            variant.downcast_ref::<i32, _>().is_some(),
            variant.downcast_ref::<String, _>().is_some(),
            variant.downcast_ref::<Vec<u8>, _>().is_some(),
            variant.downcast_ref::<bool, _>().is_some(),
        ];

        held && readable.iter().filter(|r| **r).count() == 1 && readable[self.position()]
    }
}

// generates random unicode strings, upto 80 chars long
pub fn rand_unicode() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::char::any(), 0..80).prop_map(|v| v.into_iter().collect())
}

pub fn rand_alternative() -> impl Strategy<Value = Alternative> {
    prop_oneof![
        any::<i32>().prop_map(Alternative::Int),
        rand_unicode().prop_map(Alternative::Text),
        proptest::collection::vec(any::<u8>(), 0..64).prop_map(Alternative::Bytes),
        any::<bool>().prop_map(Alternative::Flag),
    ]
}

proptest! {
    #[test]
    #[cfg_attr(miri, ignore)]
    fn proptest_reassignment(first in rand_alternative(), second in rand_alternative()) {
        let mut variant = first.clone().into_variant();
        prop_assert!(first.matches(&variant));

        let copy = variant.clone();
        variant = second.clone().into_variant();

        prop_assert!(second.matches(&variant));
        prop_assert!(first.matches(&copy));
    }
}

/// Runs a sequence of operations, chosen by `ops`, against variants holding [`Tracked`] values
/// and checks that every created value is dropped exactly once.
#[quickcheck]
#[cfg_attr(miri, ignore)]
fn quickcheck_drops_balance(ops: Vec<u8>) -> bool {
    let counters = Counters::default();
    {
        let mut current = Variant::<(i32, Tracked, String)>::empty();
        let mut stash = Variant::<(i32, Tracked, String)>::empty();

        for (i, op) in ops.into_iter().enumerate() {
            let tag = i as i32;
            match op % 8 {
                0 => current.set(Tracked::new(tag, &counters)),
                1 => current.set(tag),
                2 => current.set_converted("text"),
                3 => current.clear(),
                4 => stash = current.clone(),
                5 => stash = current.take(),
                6 => std::mem::swap(&mut current, &mut stash),
                _ => {
                    let _ = current.take_value::<Tracked, _>();
                }
            }
        }
    }
    counters.balanced()
}
