#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use core::fmt;
use core::marker::PhantomData;

#[macro_use]
mod macros;
#[macro_use]
mod trace;

mod catalog;
mod error;
pub mod index;
mod slot;

pub use catalog::{
    Accepts,
    At,
    Catalog,
    CloneCatalog,
    DebugCatalog,
    Member,
    PartialEqCatalog,
};
pub use error::BadAccess;
use index::Position;
use slot::Slot;

#[cfg(test)]
mod tests;

/// A [`Variant`] holds at most one value, whose type is one of the alternatives of the catalog
/// `C`, inline and without allocating.
///
/// The catalog is a tuple of types, e.g. `Variant<(i32, String, Vec<u8>)>`. The variant stores
/// its value in a union sized and aligned for the largest alternative, next to a one byte tag
/// naming the alternative that is currently live.
///
/// ## Using `Variant`
/// ```
/// use inline_variant::Variant;
///
/// // an empty variant holds nothing
/// let mut value: Variant<(i32, String)> = Variant::empty();
/// assert!(value.is_empty());
/// assert_eq!(value.index(), None);
///
/// // storing a value selects the alternative of the same type
/// value.set(String::from("hello"));
/// assert_eq!(value.index(), Some(1));
/// assert_eq!(value.get::<String, _>().unwrap(), "hello");
///
/// // asking for any other alternative fails
/// assert!(value.get::<i32, _>().is_err());
/// assert_eq!(value.downcast_ref::<i32, _>(), None);
///
/// // alternatives can be addressed by position too
/// value.set(7);
/// assert_eq!(*value.get_at::<0>().unwrap(), 7);
/// ```
pub struct Variant<C: Catalog> {
    slot: Slot<C::Storage>,
    _catalog: PhantomData<C>,
}

// one tag byte after the largest alternative, rounded up to its alignment
static_assertions::assert_eq_size!(Variant<(u8,)>, [u8; 2]);
static_assertions::assert_eq_size!(Variant<(&str, [usize; 3])>, [usize; 4]);
static_assertions::assert_eq_align!(Variant<(u8, u64)>, u64);

impl<C: Catalog> Variant<C> {
    /// Number of alternatives in the catalog.
    pub const LEN: usize = C::LEN;

    /// Creates a [`Variant`] that holds no value.
    #[inline]
    pub const fn empty() -> Self {
        Variant {
            slot: Slot::vacant(),
            _catalog: PhantomData,
        }
    }

    /// Creates a [`Variant`] holding `value`, as the alternative whose type is exactly `T`.
    ///
    /// The position is resolved at compile time. Conversions are never considered here, so a
    /// value is stored as its own type even if another alternative could be built from it.
    ///
    /// # Examples
    /// ```
    /// use inline_variant::Variant;
    ///
    /// let float = Variant::<(i32, f64)>::new(5.0);
    /// assert_eq!(float.index(), Some(1));
    ///
    /// let int = Variant::<(i32, f64)>::new(5);
    /// assert_eq!(int.index(), Some(0));
    /// ```
    ///
    /// A type that isn't part of the catalog doesn't compile:
    /// ```compile_fail
    /// use inline_variant::Variant;
    ///
    /// let _ = Variant::<(i32, f64)>::new("hello");
    /// ```
    #[inline]
    pub fn new<T, I>(value: T) -> Self
    where
        T: Member<C, I>,
        I: Position,
    {
        Variant {
            // SAFETY: `T` is the alternative at `I::INDEX`
            slot: unsafe { Slot::occupied(I::INDEX, value) },
            _catalog: PhantomData,
        }
    }

    /// Creates a [`Variant`] from a value that converts into exactly one of the alternatives.
    ///
    /// # Examples
    /// ```
    /// use inline_variant::Variant;
    ///
    /// let text = Variant::<(i32, String)>::convert("Hello");
    /// assert_eq!(text.get::<String, _>().unwrap(), "Hello");
    /// ```
    ///
    /// There is no positional tie-break: if several alternatives can be built from the value,
    /// the call is ambiguous and fails to compile. Name the position with
    /// [`Variant::convert_at`] instead:
    /// ```compile_fail
    /// use inline_variant::Variant;
    ///
    /// // a `u8` converts into both `u32` and `u64`
    /// let _ = Variant::<(u32, u64)>::convert(1_u8);
    /// ```
    #[inline]
    pub fn convert<V, I>(value: V) -> Self
    where
        C: Accepts<V, I>,
        I: Position,
    {
        Self::new::<<C as Accepts<V, I>>::Target, I>(C::accept(value))
    }

    /// Creates a [`Variant`] holding the alternative at position `N`, built from `value`.
    ///
    /// # Examples
    /// ```
    /// use inline_variant::Variant;
    ///
    /// let wide = Variant::<(u32, u64)>::convert_at::<1, _>(1_u8);
    /// assert_eq!(wide.get::<u64, _>(), Ok(&1));
    /// ```
    #[inline]
    pub fn convert_at<const N: usize, V>(value: V) -> Self
    where
        C: At<N>,
        V: Into<<C as At<N>>::Output>,
    {
        let value: <C as At<N>>::Output = value.into();
        Variant {
            // SAFETY: `At<N>::Output` is the alternative at `N`
            slot: unsafe { Slot::occupied(N, value) },
            _catalog: PhantomData,
        }
    }

    /// Replaces the held value, if any, with `value`, stored as the alternative of type `T`.
    ///
    /// The previous value is destroyed before the new one is installed.
    #[inline]
    pub fn set<T, I>(&mut self, value: T)
    where
        T: Member<C, I>,
        I: Position,
    {
        self.clear();
        // SAFETY: `T` is the alternative at `I::INDEX` and `clear` left the slot vacant
        unsafe { self.slot.allocate(I::INDEX, value) };
    }

    /// Replaces the held value, if any, with `value` converted into the one alternative that
    /// accepts it. See [`Variant::convert`].
    #[inline]
    pub fn set_converted<V, I>(&mut self, value: V)
    where
        C: Accepts<V, I>,
        I: Position,
    {
        self.clear();
        let value = C::accept(value);
        // SAFETY: `Accepts::Target` is the alternative at `I::INDEX` and the slot is vacant
        unsafe { self.slot.allocate(I::INDEX, value) };
    }

    /// Replaces the held value, if any, with the alternative at position `N` built from `value`.
    #[inline]
    pub fn set_at<const N: usize, V>(&mut self, value: V)
    where
        C: At<N>,
        V: Into<<C as At<N>>::Output>,
    {
        self.clear();
        let value: <C as At<N>>::Output = value.into();
        // SAFETY: `At<N>::Output` is the alternative at `N` and the slot is vacant
        unsafe { self.slot.allocate(N, value) };
    }

    /// Destroys the held value, leaving the [`Variant`] empty. Does nothing if it already is.
    #[inline]
    pub fn clear(&mut self) {
        if let Some(tag) = self.slot.tag() {
            let lifecycle = &C::LIFECYCLE[tag];
            trace_lifecycle!(tag, lifecycle, "destroying alternative");
            // SAFETY: the lifecycle entry at `tag` belongs to the live alternative
            unsafe { self.slot.deallocate(lifecycle.drop_fn()) };
        }
    }

    /// Returns `true` if the [`Variant`] holds no value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot.is_vacant()
    }

    /// Returns the catalog position of the held value, or `None` if the [`Variant`] is empty.
    ///
    /// # Examples
    /// ```
    /// use inline_variant::Variant;
    ///
    /// let mut value = Variant::<(i32, char, String)>::new('x');
    /// assert_eq!(value.index(), Some(1));
    ///
    /// value.clear();
    /// assert_eq!(value.index(), None);
    /// ```
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.slot.tag()
    }

    /// Returns the type name of the held value, or `None` if the [`Variant`] is empty.
    #[inline]
    pub fn type_name(&self) -> Option<&'static str> {
        self.slot.tag().map(|tag| C::LIFECYCLE[tag].name())
    }

    /// Returns `true` if the held value is a `T`.
    #[inline]
    pub fn holds<T, I>(&self) -> bool
    where
        T: Member<C, I>,
        I: Position,
    {
        self.slot.tag() == Some(I::INDEX)
    }

    /// Returns a reference to the held value if it is a `T`, or a [`BadAccess`] describing what
    /// the [`Variant`] holds instead.
    ///
    /// # Examples
    /// ```
    /// use inline_variant::Variant;
    ///
    /// let value = Variant::<(i32, f64)>::new(5.0);
    ///
    /// assert_eq!(value.get::<f64, _>(), Ok(&5.0));
    /// assert!(value.get::<i32, _>().is_err());
    /// ```
    #[inline]
    pub fn get<T, I>(&self) -> Result<&T, BadAccess>
    where
        T: Member<C, I>,
        I: Position,
    {
        self.check::<T>(I::INDEX)?;
        // SAFETY: we checked the tag to make sure the slot holds a `T`
        Ok(unsafe { self.slot.get::<T>() })
    }

    /// Returns a mutable reference to the held value if it is a `T`.
    #[inline]
    pub fn get_mut<T, I>(&mut self) -> Result<&mut T, BadAccess>
    where
        T: Member<C, I>,
        I: Position,
    {
        self.check::<T>(I::INDEX)?;
        // SAFETY: we checked the tag to make sure the slot holds a `T`
        Ok(unsafe { self.slot.get_mut::<T>() })
    }

    /// Returns a reference to the held value if it is a `T`, `None` otherwise.
    #[inline]
    pub fn downcast_ref<T, I>(&self) -> Option<&T>
    where
        T: Member<C, I>,
        I: Position,
    {
        if self.holds::<T, I>() {
            // SAFETY: we checked the tag to make sure the slot holds a `T`
            Some(unsafe { self.slot.get::<T>() })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the held value if it is a `T`, `None` otherwise.
    #[inline]
    pub fn downcast_mut<T, I>(&mut self) -> Option<&mut T>
    where
        T: Member<C, I>,
        I: Position,
    {
        if self.holds::<T, I>() {
            // SAFETY: we checked the tag to make sure the slot holds a `T`
            Some(unsafe { self.slot.get_mut::<T>() })
        } else {
            None
        }
    }

    /// Returns a reference to the held value if it is the alternative at position `N`.
    ///
    /// # Examples
    /// ```
    /// use inline_variant::Variant;
    ///
    /// let value = Variant::<(i32, String)>::new(3);
    /// assert_eq!(value.get_at::<0>(), Ok(&3));
    /// assert!(value.get_at::<1>().is_err());
    /// ```
    ///
    /// Positions past the end of the catalog don't compile:
    /// ```compile_fail
    /// use inline_variant::Variant;
    ///
    /// let value = Variant::<(i32, String)>::new(3);
    /// let _ = value.get_at::<2>();
    /// ```
    #[inline]
    pub fn get_at<const N: usize>(&self) -> Result<&<C as At<N>>::Output, BadAccess>
    where
        C: At<N>,
    {
        self.check::<<C as At<N>>::Output>(N)?;
        // SAFETY: we checked the tag to make sure the slot holds the alternative at `N`
        Ok(unsafe { self.slot.get() })
    }

    /// Returns a mutable reference to the held value if it is the alternative at position `N`.
    #[inline]
    pub fn get_at_mut<const N: usize>(&mut self) -> Result<&mut <C as At<N>>::Output, BadAccess>
    where
        C: At<N>,
    {
        self.check::<<C as At<N>>::Output>(N)?;
        // SAFETY: we checked the tag to make sure the slot holds the alternative at `N`
        Ok(unsafe { self.slot.get_mut() })
    }

    /// Returns a reference to the held value if it is the alternative at position `N`, `None`
    /// otherwise.
    #[inline]
    pub fn downcast_at<const N: usize>(&self) -> Option<&<C as At<N>>::Output>
    where
        C: At<N>,
    {
        match self.slot.tag() {
            // SAFETY: we checked the tag to make sure the slot holds the alternative at `N`
            Some(tag) if tag == N => Some(unsafe { self.slot.get() }),
            _ => None,
        }
    }

    /// Returns a mutable reference to the held value if it is the alternative at position `N`,
    /// `None` otherwise.
    #[inline]
    pub fn downcast_at_mut<const N: usize>(&mut self) -> Option<&mut <C as At<N>>::Output>
    where
        C: At<N>,
    {
        match self.slot.tag() {
            // SAFETY: we checked the tag to make sure the slot holds the alternative at `N`
            Some(tag) if tag == N => Some(unsafe { self.slot.get_mut() }),
            _ => None,
        }
    }

    /// Moves the whole [`Variant`] out, leaving `self` empty.
    ///
    /// # Examples
    /// ```
    /// use inline_variant::Variant;
    ///
    /// let mut source = Variant::<(i32, Box<i32>)>::new(Box::new(1));
    /// let destination = source.take();
    ///
    /// assert!(source.is_empty());
    /// assert_eq!(destination.index(), Some(1));
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        core::mem::replace(self, Self::empty())
    }

    /// Moves the held value out if it is a `T`, leaving the [`Variant`] empty.
    ///
    /// On mismatch the [`Variant`] is left untouched.
    #[inline]
    pub fn take_value<T, I>(&mut self) -> Result<T, BadAccess>
    where
        T: Member<C, I>,
        I: Position,
    {
        self.check::<T>(I::INDEX)?;
        trace_lifecycle!(I::INDEX, C::LIFECYCLE[I::INDEX], "moving alternative out");
        // SAFETY: we checked the tag to make sure the slot holds a `T`
        Ok(unsafe { self.slot.take::<T>() })
    }

    /// Consumes the [`Variant`], returning the held value if it is a `T`, or the [`Variant`]
    /// itself otherwise.
    ///
    /// # Examples
    /// ```
    /// use inline_variant::Variant;
    ///
    /// let value = Variant::<(i32, String)>::convert("owned");
    /// let value = value.into_inner::<i32, _>().unwrap_err();
    ///
    /// assert_eq!(value.into_inner::<String, _>().unwrap(), "owned");
    /// ```
    #[inline]
    pub fn into_inner<T, I>(mut self) -> Result<T, Self>
    where
        T: Member<C, I>,
        I: Position,
    {
        if self.holds::<T, I>() {
            // SAFETY: we checked the tag to make sure the slot holds a `T`, the slot is vacant
            // afterwards so dropping `self` doesn't touch the value again
            Ok(unsafe { self.slot.take::<T>() })
        } else {
            Err(self)
        }
    }

    #[inline]
    fn check<T>(&self, position: usize) -> Result<(), BadAccess> {
        match self.slot.tag() {
            Some(tag) if tag == position => Ok(()),
            active => Err(BadAccess::new(
                core::any::type_name::<T>(),
                position,
                active.map(|tag| (tag, C::LIFECYCLE[tag].name())),
            )),
        }
    }
}

impl<C: Catalog> Default for Variant<C> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<C: Catalog> Drop for Variant<C> {
    #[inline]
    fn drop(&mut self) {
        self.clear();
    }
}

impl<C: CloneCatalog> Clone for Variant<C> {
    #[inline]
    fn clone(&self) -> Self {
        let mut clone = Self::empty();
        clone.clone_from(self);
        clone
    }

    /// Destroys the held value, then clones the alternative `source` holds.
    ///
    /// If cloning panics, `self` is left empty.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        if let Some(tag) = source.slot.tag() {
            trace_lifecycle!(tag, C::LIFECYCLE[tag], "cloning alternative");
            // SAFETY: the clone entry at `tag` belongs to the alternative `source` holds, and
            // `self` is vacant so the clone doesn't overwrite a live value. The tag is only set
            // once the clone has been written
            unsafe {
                (C::CLONE[tag])(source.slot.as_ptr(), self.slot.as_mut_ptr());
                self.slot.set_tag(tag);
            }
        }
    }
}

impl<C: PartialEqCatalog> PartialEq for Variant<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self.slot.tag(), other.slot.tag()) {
            (None, None) => true,
            // SAFETY: both slots hold the alternative at `a`
            (Some(a), Some(b)) if a == b => unsafe {
                (C::EQ[a])(self.slot.as_ptr(), other.slot.as_ptr())
            },
            _ => false,
        }
    }
}

impl<C: DebugCatalog> fmt::Debug for Variant<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Active<'a, C: DebugCatalog>(&'a Variant<C>, usize);

        impl<C: DebugCatalog> fmt::Debug for Active<'_, C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // SAFETY: `Active` is only built with the tag of the live alternative
                unsafe { (C::DEBUG[self.1])(self.0.slot.as_ptr(), f) }
            }
        }

        match self.slot.tag() {
            Some(tag) => f.debug_tuple("Variant").field(&tag).field(&Active(self, tag)).finish(),
            None => f.write_str("Variant(<empty>)"),
        }
    }
}
