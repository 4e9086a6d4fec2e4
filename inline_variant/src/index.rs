//! Zero sized markers naming a position in a catalog.
//!
//! They only ever appear as the second parameter of [`Member`](crate::Member) and
//! [`Accepts`](crate::Accepts), where the compiler infers them: a type that occurs exactly once
//! in a catalog has exactly one marker that satisfies the bound. Callers rarely write them out,
//! `_` is enough.

macro_rules! positions {
    ($($name:ident = $pos:literal),+ $(,)?) => {
        $(
            #[doc = concat!("Marks position ", stringify!($pos), " of a catalog.")]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
            pub struct $name;

            impl crate::catalog::private::Sealed for $name {}

            impl Position for $name {
                const INDEX: usize = $pos;
            }
        )+
    };
}

/// A marker type standing for a fixed catalog position.
pub trait Position: crate::catalog::private::Sealed {
    const INDEX: usize;
}

positions!(
    I0 = 0,
    I1 = 1,
    I2 = 2,
    I3 = 3,
    I4 = 4,
    I5 = 5,
    I6 = 6,
    I7 = 7,
    I8 = 8,
    I9 = 9,
    I10 = 10,
    I11 = 11,
    I12 = 12,
    I13 = 13,
    I14 = 14,
    I15 = 15,
);
