use std::cell::Cell;

use arbitrary::Arbitrary;
use inline_variant::Variant;

mod actions;
mod creation;

pub use actions::Action;
pub use creation::Creation;

/// The catalog every fuzzed [`Variant`] is built over.
pub type Fuzzed = (u8, i64, String, Vec<u8>, bool, Live);

thread_local! {
    static LIVE: Cell<isize> = Cell::new(0);
}

/// Number of [`Live`] values that currently exist on this thread.
pub fn live_count() -> isize {
    LIVE.with(Cell::get)
}

/// An alternative that keeps count of its own instances, so we can assert that every value the
/// variant creates is dropped exactly once.
#[derive(Debug, PartialEq)]
pub struct Live(pub u32);

impl Live {
    pub fn new(id: u32) -> Self {
        LIVE.with(|live| live.set(live.get() + 1));
        Live(id)
    }
}

impl Clone for Live {
    fn clone(&self) -> Self {
        Live::new(self.0)
    }
}

impl Drop for Live {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
    }
}

/// A value for one of the alternatives of [`Fuzzed`], kept next to the variant as the "control".
#[derive(Arbitrary, Debug, Clone, PartialEq)]
pub enum Value {
    Small(u8),
    Int(i64),
    Text(String),
    Bytes(Vec<u8>),
    Flag(bool),
    Live(u32),
}

impl Value {
    pub fn position(&self) -> usize {
        match self {
            Value::Small(_) => 0,
            Value::Int(_) => 1,
            Value::Text(_) => 2,
            Value::Bytes(_) => 3,
            Value::Flag(_) => 4,
            Value::Live(_) => 5,
        }
    }

    pub fn to_variant(&self) -> Variant<Fuzzed> {
        match self.clone() {
            Value::Small(v) => Variant::new(v),
            Value::Int(v) => Variant::new(v),
            Value::Text(v) => Variant::new(v),
            Value::Bytes(v) => Variant::new(v),
            Value::Flag(v) => Variant::new(v),
            Value::Live(id) => Variant::new(Live::new(id)),
        }
    }

    pub fn store_in(&self, variant: &mut Variant<Fuzzed>) {
        match self.clone() {
            Value::Small(v) => variant.set(v),
            Value::Int(v) => variant.set(v),
            Value::Text(v) => variant.set(v),
            Value::Bytes(v) => variant.set(v),
            Value::Flag(v) => variant.set(v),
            Value::Live(id) => variant.set(Live::new(id)),
        }
    }

    /// Returns `true` if `variant` holds exactly this value.
    pub fn is_held_by(&self, variant: &Variant<Fuzzed>) -> bool {
        match self {
            Value::Small(v) => variant.get::<u8, _>() == Ok(v),
            Value::Int(v) => variant.get::<i64, _>() == Ok(v),
            Value::Text(v) => variant.get::<String, _>() == Ok(v),
            Value::Bytes(v) => variant.get::<Vec<u8>, _>() == Ok(v),
            Value::Flag(v) => variant.get::<bool, _>() == Ok(v),
            Value::Live(id) => variant.get::<Live, _>().map(|live| live.0) == Ok(*id),
        }
    }

    /// What `{:?}` prints for a variant holding this value.
    pub fn debug_repr(&self) -> String {
        let inner = match self {
            Value::Small(v) => format!("{:?}", v),
            Value::Int(v) => format!("{:?}", v),
            Value::Text(v) => format!("{:?}", v),
            Value::Bytes(v) => format!("{:?}", v),
            Value::Flag(v) => format!("{:?}", v),
            Value::Live(id) => format!("Live({})", id),
        };
        format!("Variant({}, {})", self.position(), inner)
    }
}

/// A framework to generate a [`Variant`] and a control `Option<Value>`, run a series of actions
/// on both, and assert they agree.
///
/// Used for fuzz testing
#[derive(Arbitrary, Debug)]
pub struct Scenario<'a> {
    pub creation: Creation<'a>,
    pub actions: Vec<Action<'a>>,
}

impl Scenario<'_> {
    /// Run the provided scenario, asserting for correct behavior
    pub fn run(self) {
        let baseline = live_count();
        {
            let (mut variant, mut control) = self.creation.create();
            assert_agree(&variant, &control);

            self.actions
                .into_iter()
                .for_each(|action| action.perform(&mut control, &mut variant));

            assert_agree(&variant, &control);
        }
        // every `Live` the variant made has been dropped again
        assert_eq!(live_count(), baseline);
    }
}

/// Asserts that `variant` and `control` hold the same thing.
pub fn assert_agree(variant: &Variant<Fuzzed>, control: &Option<Value>) {
    match control {
        Some(value) => {
            assert_eq!(variant.index(), Some(value.position()));
            assert!(value.is_held_by(variant), "{:?} != {:?}", variant, value);
            assert_eq!(format!("{:?}", variant), value.debug_repr());
        }
        None => {
            assert!(variant.is_empty());
            assert_eq!(variant.index(), None);
            assert_eq!(variant.type_name(), None);
            assert_eq!(format!("{:?}", variant), "Variant(<empty>)");
        }
    }
}
