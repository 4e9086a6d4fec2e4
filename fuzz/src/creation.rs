//! Different ways in which we can create a [`Variant`] and a "control" `Option<Value>`. Once we
//! have the pair, we run various actions on them, which are defined in the [`super::actions`]
//! module.

use arbitrary::Arbitrary;
use inline_variant::Variant;

use crate::{
    Fuzzed,
    Live,
    Value,
};

#[derive(Arbitrary, Debug)]
pub enum Creation<'a> {
    /// Create using [`Variant::empty`]
    Empty,
    /// Create using `Default`
    Default,
    /// Create using [`Variant::new`]
    New(Value),
    /// Create using [`Variant::convert`], an `i32` only converts into the `i64` alternative
    ConvertInt(i32),
    /// Create using [`Variant::convert_at`] into the `String` alternative
    ConvertText(&'a str),
    /// Create using [`Variant::convert_at`] into the `Vec<u8>` alternative
    ConvertBytes(&'a [u8]),
    /// Create a variant, then clone it
    Cloned(Value),
    /// Create a variant, then move it out with [`Variant::take`]
    Taken(Value),
}

impl Creation<'_> {
    pub fn create(self) -> (Variant<Fuzzed>, Option<Value>) {
        use Creation::*;

        match self {
            Empty => (Variant::empty(), None),
            Default => (Variant::default(), None),
            New(value) => (value.to_variant(), Some(value)),
            ConvertInt(int) => (Variant::convert(int), Some(Value::Int(int.into()))),
            ConvertText(text) => {
                let variant = Variant::<Fuzzed>::convert_at::<2, _>(text);
                (variant, Some(Value::Text(text.to_string())))
            }
            ConvertBytes(bytes) => {
                let variant = Variant::<Fuzzed>::convert_at::<3, _>(bytes);
                (variant, Some(Value::Bytes(bytes.to_vec())))
            }
            Cloned(value) => {
                let original = value.to_variant();
                let clone = original.clone();

                assert_eq!(original, clone);
                drop(original);

                (clone, Some(value))
            }
            Taken(value) => {
                let mut original = value.to_variant();
                let taken = original.take();

                assert!(original.is_empty());
                assert!(original.get::<Live, _>().is_err());

                (taken, Some(value))
            }
        }
    }
}
