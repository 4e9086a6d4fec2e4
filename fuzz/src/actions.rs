//! Various actions we take on a [`Variant`] and "control" `Option<Value>`, asserting invariants
//! along the way.

use arbitrary::Arbitrary;
use inline_variant::Variant;

use crate::{
    assert_agree,
    Fuzzed,
    Live,
    Value,
};

#[derive(Arbitrary, Debug)]
pub enum Action<'a> {
    /// Replace the held value using [`Variant::set`]
    Set(Value),
    /// Replace the held value using [`Variant::set_converted`]
    SetConverted(i32),
    /// Replace the held value using [`Variant::set_at`] into the `String` alternative
    SetText(&'a str),
    /// Destroy the held value
    Clear,
    /// Move the whole variant out, then either put it back or drop it
    Take { restore: bool },
    /// Move the held value out with [`Variant::take_value`], asking for the alternative at the
    /// given position
    TakeValue(u8),
    /// Overwrite the variant with a clone of another one using `Clone::clone_from`
    CloneFrom(Option<Value>),
    /// Swap the variant with another one
    Swap(Option<Value>),
    /// Append to the `String` alternative through [`Variant::get_mut`], if it's held
    PushStr(&'a str),
    /// Bump the integer alternative through [`Variant::get_at_mut`], if it's held
    Increment(i64),
    /// Compare the variant against one built from a value
    Compare(Option<Value>),
}

fn build(value: &Option<Value>) -> Variant<Fuzzed> {
    value.as_ref().map(Value::to_variant).unwrap_or_default()
}

impl Action<'_> {
    pub fn perform(self, control: &mut Option<Value>, variant: &mut Variant<Fuzzed>) {
        use Action::*;

        match self {
            Set(value) => {
                value.store_in(variant);
                *control = Some(value);
            }
            SetConverted(int) => {
                variant.set_converted(int);
                *control = Some(Value::Int(int.into()));
            }
            SetText(text) => {
                variant.set_at::<2, _>(text);
                *control = Some(Value::Text(text.to_string()));
            }
            Clear => {
                variant.clear();
                *control = None;
            }
            Take { restore } => {
                let taken = variant.take();
                assert_agree(variant, &None);
                assert_agree(&taken, control);

                if restore {
                    *variant = taken;
                } else {
                    *control = None;
                }
            }
            TakeValue(position) => {
                let position = usize::from(position) % Variant::<Fuzzed>::LEN;
                let holds = variant.index() == Some(position);

                let taken = match position {
                    0 => variant.take_value::<u8, _>().map(Value::Small),
                    1 => variant.take_value::<i64, _>().map(Value::Int),
                    2 => variant.take_value::<String, _>().map(Value::Text),
                    3 => variant.take_value::<Vec<u8>, _>().map(Value::Bytes),
                    4 => variant.take_value::<bool, _>().map(Value::Flag),
                    _ => variant.take_value::<Live, _>().map(|live| Value::Live(live.0)),
                };

                match taken {
                    Ok(value) => {
                        assert!(holds);
                        assert_eq!(Some(value), control.take());
                    }
                    Err(err) => {
                        assert!(!holds);
                        assert_eq!(err.requested_index(), position);
                        assert_eq!(err.active_index(), control.as_ref().map(Value::position));
                    }
                }
            }
            CloneFrom(source) => {
                let other = build(&source);
                variant.clone_from(&other);

                assert_agree(&other, &source);
                *control = source;
            }
            Swap(other_value) => {
                let mut other = build(&other_value);
                std::mem::swap(variant, &mut other);

                assert_agree(&other, control);
                *control = other_value;
            }
            PushStr(s) => {
                let pushed = variant.get_mut::<String, _>().map(|text| text.push_str(s));

                match control {
                    Some(Value::Text(text)) => {
                        assert!(pushed.is_ok());
                        text.push_str(s);
                    }
                    _ => assert!(pushed.is_err()),
                }
            }
            Increment(by) => {
                let bumped = variant
                    .get_at_mut::<1>()
                    .map(|int| *int = int.wrapping_add(by));

                match control {
                    Some(Value::Int(int)) => {
                        assert!(bumped.is_ok());
                        *int = int.wrapping_add(by);
                    }
                    _ => assert!(bumped.is_err()),
                }
            }
            Compare(value) => {
                let other = build(&value);
                assert_eq!(*variant == other, *control == value);
            }
        }

        assert_agree(variant, control);
    }
}
