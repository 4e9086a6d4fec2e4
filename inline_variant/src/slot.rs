//! The untyped storage behind a [`Variant`](crate::Variant).
//!
//! A [`Slot`] is a region of memory sized and aligned for a storage union `S`, plus a one byte
//! tag recording which alternative currently lives in it. It knows nothing about the catalog the
//! union was built from: every typed operation is `unsafe` and trusts the caller to name the type
//! that matches the tag.

use core::mem::MaybeUninit;

/// Tag value of a slot that holds no live value.
const VACANT: u8 = u8::MAX;

pub struct Slot<S> {
    storage: MaybeUninit<S>,
    tag: u8,
}

impl<S> Slot<S> {
    #[inline]
    pub const fn vacant() -> Self {
        Slot {
            storage: MaybeUninit::uninit(),
            tag: VACANT,
        }
    }

    /// Creates a slot that holds `value` under `tag`.
    ///
    /// # Safety
    /// * `T` must be the alternative at position `tag` of the catalog that built `S`
    #[inline]
    pub unsafe fn occupied<T>(tag: usize, value: T) -> Self {
        let mut slot = Self::vacant();
        slot.allocate(tag, value);
        slot
    }

    #[inline(always)]
    pub fn tag(&self) -> Option<usize> {
        match self.tag {
            VACANT => None,
            tag => Some(tag as usize),
        }
    }

    #[inline(always)]
    pub fn is_vacant(&self) -> bool {
        self.tag == VACANT
    }

    /// Writes `value` into the slot and marks it as alternative `tag`.
    ///
    /// # Safety
    /// * The slot must be vacant, otherwise the live value leaks
    /// * `T` must be the alternative at position `tag` of the catalog that built `S`
    #[inline]
    pub unsafe fn allocate<T>(&mut self, tag: usize, value: T) {
        debug_assert!(self.is_vacant(), "allocating into an occupied slot");
        debug_assert!(tag < VACANT as usize);
        debug_assert!(core::mem::size_of::<T>() <= core::mem::size_of::<S>());
        debug_assert!(core::mem::align_of::<T>() <= core::mem::align_of::<S>());

        self.as_mut_ptr().cast::<T>().write(value);
        self.tag = tag as u8;
    }

    /// Marks an already initialized region as alternative `tag`.
    ///
    /// # Safety
    /// * The region must hold a live value of the alternative at position `tag`
    #[inline]
    pub unsafe fn set_tag(&mut self, tag: usize) {
        debug_assert!(tag < VACANT as usize);
        self.tag = tag as u8;
    }

    /// Destroys the live value, if any, with `drop`.
    ///
    /// The tag is cleared before `drop` runs, so a destructor that panics leaves a vacant slot
    /// behind instead of one that would be destroyed a second time.
    ///
    /// # Safety
    /// * `drop` must be the destructor of the alternative the slot currently holds
    #[inline]
    pub unsafe fn deallocate(&mut self, drop: unsafe fn(*mut u8)) {
        if !self.is_vacant() {
            self.tag = VACANT;
            drop(self.as_mut_ptr());
        }
    }

    /// Moves the live value out, leaving the slot vacant.
    ///
    /// # Safety
    /// * The slot must currently hold a `T`
    #[inline]
    pub unsafe fn take<T>(&mut self) -> T {
        debug_assert!(!self.is_vacant());
        self.tag = VACANT;
        self.as_ptr().cast::<T>().read()
    }

    /// # Safety
    /// * The slot must currently hold a `T`
    #[inline(always)]
    pub unsafe fn get<T>(&self) -> &T {
        &*self.as_ptr().cast::<T>()
    }

    /// # Safety
    /// * The slot must currently hold a `T`
    #[inline(always)]
    pub unsafe fn get_mut<T>(&mut self) -> &mut T {
        &mut *self.as_mut_ptr().cast::<T>()
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const u8 {
        self.storage.as_ptr().cast()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.storage.as_mut_ptr().cast()
    }
}

#[cfg(test)]
mod tests {
    use core::mem::ManuallyDrop;

    use super::Slot;

    #[repr(C)]
    union Storage {
        small: ManuallyDrop<u8>,
        text: ManuallyDrop<String>,
    }

    unsafe fn drop_string(ptr: *mut u8) {
        core::ptr::drop_in_place(ptr.cast::<String>())
    }

    #[test]
    fn test_vacant() {
        let slot = Slot::<Storage>::vacant();
        assert!(slot.is_vacant());
        assert_eq!(slot.tag(), None);
    }

    #[test]
    fn test_allocate_and_get() {
        let mut slot = unsafe { Slot::<Storage>::occupied(1, String::from("hello")) };
        assert_eq!(slot.tag(), Some(1));
        assert_eq!(unsafe { slot.get::<String>() }, "hello");

        unsafe { slot.get_mut::<String>().push_str(" world") };
        assert_eq!(unsafe { slot.get::<String>() }, "hello world");

        unsafe { slot.deallocate(drop_string) };
        assert!(slot.is_vacant());

        // a second deallocate is a no-op
        unsafe { slot.deallocate(drop_string) };
        assert!(slot.is_vacant());
    }

    #[test]
    fn test_take() {
        let mut slot = unsafe { Slot::<Storage>::occupied(0, 42_u8) };
        let value = unsafe { slot.take::<u8>() };

        assert_eq!(value, 42);
        assert!(slot.is_vacant());
    }

    #[test]
    fn test_storage_pointer_is_aligned() {
        let slot = Slot::<Storage>::vacant();
        let align = core::mem::align_of::<String>();
        assert_eq!(slot.as_ptr() as usize % align, 0);
    }
}
