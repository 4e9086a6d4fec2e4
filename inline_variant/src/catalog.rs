//! Catalogs: the fixed, ordered list of alternatives a [`Variant`](crate::Variant) can hold.
//!
//! A catalog is a tuple of 1 to 16 types. Implementing [`Catalog`] for a tuple provides the
//! storage union the variant keeps its value in and a set of static dispatch tables, one entry
//! per alternative, that the variant indexes with its tag to destroy, clone, format or compare the
//! live value without knowing its type.

use core::fmt;
use core::mem::ManuallyDrop;

use crate::index::{
    Position,
    I0,
    I1,
    I10,
    I11,
    I12,
    I13,
    I14,
    I15,
    I2,
    I3,
    I4,
    I5,
    I6,
    I7,
    I8,
    I9,
};

pub(crate) mod private {
    pub trait Sealed {}

    pub trait SealedMember<C, I> {}
}

pub type DropFn = unsafe fn(*mut u8);
pub type CloneFn = unsafe fn(*const u8, *mut u8);
pub type DebugFn = unsafe fn(*const u8, &mut fmt::Formatter<'_>) -> fmt::Result;
pub type EqFn = unsafe fn(*const u8, *const u8) -> bool;

/// The per-alternative entry of a catalog's lifecycle table.
#[derive(Clone, Copy)]
pub struct Lifecycle {
    name: fn() -> &'static str,
    drop: DropFn,
}

impl Lifecycle {
    #[inline]
    pub const fn of<T>() -> Self {
        Lifecycle {
            name: core::any::type_name::<T>,
            drop: drop_erased::<T>,
        }
    }

    #[inline]
    pub(crate) fn name(&self) -> &'static str {
        (self.name)()
    }

    #[inline]
    pub(crate) fn drop_fn(&self) -> DropFn {
        self.drop
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("name", &self.name())
            .finish()
    }
}

/// An ordered list of alternative types.
///
/// Implemented for tuples `(A,)` through `(A, B, ..., P)`; it cannot be implemented outside of
/// this crate.
pub trait Catalog: private::Sealed + Sized {
    /// A `#[repr(C)]` union of every alternative, sized and aligned for the largest of them.
    type Storage;

    /// Number of alternatives.
    const LEN: usize;

    #[doc(hidden)]
    const LIFECYCLE: &'static [Lifecycle];
}

/// A catalog whose alternatives are all [`Clone`].
pub trait CloneCatalog: Catalog {
    #[doc(hidden)]
    const CLONE: &'static [CloneFn];
}

/// A catalog whose alternatives are all [`Debug`](fmt::Debug).
pub trait DebugCatalog: Catalog {
    #[doc(hidden)]
    const DEBUG: &'static [DebugFn];
}

/// A catalog whose alternatives are all [`PartialEq`].
pub trait PartialEqCatalog: Catalog {
    #[doc(hidden)]
    const EQ: &'static [EqFn];
}

/// `Self` is the alternative at position `I` of catalog `C`.
///
/// The position is inferred: a type that appears once in a catalog satisfies this bound for
/// exactly one marker, and a type that does not appear at all satisfies it for none, which turns
/// storing a foreign type into a compile error.
pub trait Member<C: Catalog, I: Position>: private::SealedMember<C, I> {}

/// Names the alternative at position `N`.
pub trait At<const N: usize>: Catalog {
    type Output;
}

/// Catalog `Self` can hold a `V` by converting it into the alternative at position `I`.
///
/// If more than one alternative can be built from a `V`, the position is ambiguous and has to
/// be named, either through the marker or with the indexed constructors.
pub trait Accepts<V, I: Position>: Catalog {
    type Target: Member<Self, I>;

    fn accept(value: V) -> Self::Target;
}

unsafe fn drop_erased<T>(ptr: *mut u8) {
    core::ptr::drop_in_place(ptr.cast::<T>())
}

unsafe fn clone_erased<T: Clone>(src: *const u8, dst: *mut u8) {
    let value = (*src.cast::<T>()).clone();
    dst.cast::<T>().write(value);
}

unsafe fn debug_erased<T: fmt::Debug>(ptr: *const u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(&*ptr.cast::<T>(), f)
}

unsafe fn eq_erased<T: PartialEq>(a: *const u8, b: *const u8) -> bool {
    *a.cast::<T>() == *b.cast::<T>()
}

catalog!(Storage1 { a: A = 0 @ I0 });
catalog!(Storage2 { a: A = 0 @ I0, b: B = 1 @ I1 });
catalog!(Storage3 { a: A = 0 @ I0, b: B = 1 @ I1, c: C = 2 @ I2 });
catalog!(Storage4 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
});
catalog!(Storage5 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
    e: E = 4 @ I4,
});
catalog!(Storage6 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
    e: E = 4 @ I4,
    f: F = 5 @ I5,
});
catalog!(Storage7 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
    e: E = 4 @ I4,
    f: F = 5 @ I5,
    g: G = 6 @ I6,
});
catalog!(Storage8 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
    e: E = 4 @ I4,
    f: F = 5 @ I5,
    g: G = 6 @ I6,
    h: H = 7 @ I7,
});
catalog!(Storage9 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
    e: E = 4 @ I4,
    f: F = 5 @ I5,
    g: G = 6 @ I6,
    h: H = 7 @ I7,
    i: I = 8 @ I8,
});
catalog!(Storage10 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
    e: E = 4 @ I4,
    f: F = 5 @ I5,
    g: G = 6 @ I6,
    h: H = 7 @ I7,
    i: I = 8 @ I8,
    j: J = 9 @ I9,
});
catalog!(Storage11 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
    e: E = 4 @ I4,
    f: F = 5 @ I5,
    g: G = 6 @ I6,
    h: H = 7 @ I7,
    i: I = 8 @ I8,
    j: J = 9 @ I9,
    k: K = 10 @ I10,
});
catalog!(Storage12 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
    e: E = 4 @ I4,
    f: F = 5 @ I5,
    g: G = 6 @ I6,
    h: H = 7 @ I7,
    i: I = 8 @ I8,
    j: J = 9 @ I9,
    k: K = 10 @ I10,
    l: L = 11 @ I11,
});
catalog!(Storage13 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
    e: E = 4 @ I4,
    f: F = 5 @ I5,
    g: G = 6 @ I6,
    h: H = 7 @ I7,
    i: I = 8 @ I8,
    j: J = 9 @ I9,
    k: K = 10 @ I10,
    l: L = 11 @ I11,
    m: M = 12 @ I12,
});
catalog!(Storage14 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
    e: E = 4 @ I4,
    f: F = 5 @ I5,
    g: G = 6 @ I6,
    h: H = 7 @ I7,
    i: I = 8 @ I8,
    j: J = 9 @ I9,
    k: K = 10 @ I10,
    l: L = 11 @ I11,
    m: M = 12 @ I12,
    n: N = 13 @ I13,
});
catalog!(Storage15 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
    e: E = 4 @ I4,
    f: F = 5 @ I5,
    g: G = 6 @ I6,
    h: H = 7 @ I7,
    i: I = 8 @ I8,
    j: J = 9 @ I9,
    k: K = 10 @ I10,
    l: L = 11 @ I11,
    m: M = 12 @ I12,
    n: N = 13 @ I13,
    o: O = 14 @ I14,
});
catalog!(Storage16 {
    a: A = 0 @ I0,
    b: B = 1 @ I1,
    c: C = 2 @ I2,
    d: D = 3 @ I3,
    e: E = 4 @ I4,
    f: F = 5 @ I5,
    g: G = 6 @ I6,
    h: H = 7 @ I7,
    i: I = 8 @ I8,
    j: J = 9 @ I9,
    k: K = 10 @ I10,
    l: L = 11 @ I11,
    m: M = 12 @ I12,
    n: N = 13 @ I13,
    o: O = 14 @ I14,
    p: P = 15 @ I15,
});

#[cfg(test)]
mod tests {
    use core::mem;

    use static_assertions::{
        assert_eq_align,
        assert_eq_size,
        const_assert_eq,
    };

    use super::{
        At,
        Catalog,
    };

    #[allow(dead_code)]
    #[repr(align(128))]
    struct Wide([u8; 128]);

    type Mixed = (u8, u64, [u8; 3]);

    assert_eq_size!(<Mixed as Catalog>::Storage, u64);
    assert_eq_align!(<Mixed as Catalog>::Storage, u64);
    assert_eq_size!(<(char, Wide) as Catalog>::Storage, Wide);
    assert_eq_align!(<(char, Wide) as Catalog>::Storage, Wide);
    assert_eq_size!(<(String, [u8; 40]) as Catalog>::Storage, [u64; 5]);

    const_assert_eq!(<(u8,) as Catalog>::LEN, 1);
    const_assert_eq!(<Mixed as Catalog>::LEN, 3);

    #[test]
    fn test_position_types() {
        fn output_size<C: At<N>, const N: usize>() -> usize {
            mem::size_of::<<C as At<N>>::Output>()
        }

        assert_eq!(output_size::<Mixed, 0>(), 1);
        assert_eq!(output_size::<Mixed, 1>(), 8);
        assert_eq!(output_size::<Mixed, 2>(), 3);
    }

    #[test]
    fn test_lifecycle_names() {
        let names: Vec<_> = <Mixed as Catalog>::LIFECYCLE
            .iter()
            .map(|entry| entry.name())
            .collect();

        assert_eq!(names, ["u8", "u64", "[u8; 3]"]);
    }
}
