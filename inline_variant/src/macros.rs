/// Implements [`Catalog`](crate::Catalog) and its companion traits for one tuple arity.
///
/// Each alternative is written as `field: Generic = position @ Marker`. The tuple's generics are
/// carried along as a group while the per-position impls are generated one alternative at a time,
/// since `macro_rules!` can't nest the full generic list inside a repetition over a single one.
macro_rules! catalog {
    (@positions [$($all:ident),+]) => {};

    (
        @positions [$($all:ident),+]
        $ty:ident = $pos:tt @ $marker:ident
        $(, $rest:ident = $rest_pos:tt @ $rest_marker:ident)*
    ) => {
        impl<$($all),+> private::SealedMember<($($all,)+), $marker> for $ty {}

        impl<$($all),+> Member<($($all,)+), $marker> for $ty {}

        impl<$($all),+> At<$pos> for ($($all,)+) {
            type Output = $ty;
        }

        impl<Arg, $($all),+> Accepts<Arg, $marker> for ($($all,)+)
        where
            Arg: Into<$ty>,
        {
            type Target = $ty;

            #[inline]
            fn accept(value: Arg) -> $ty {
                value.into()
            }
        }

        catalog!(@positions [$($all),+] $($rest = $rest_pos @ $rest_marker),*);
    };

    ($storage:ident { $($field:ident: $ty:ident = $pos:tt @ $marker:ident),+ $(,)? }) => {
        #[doc = concat!("Storage union for the catalog `(", stringify!($($ty),+), ")`.")]
        #[doc(hidden)]
        #[allow(dead_code)]
        #[repr(C)]
        pub union $storage<$($ty),+> {
            $($field: ManuallyDrop<$ty>,)+
        }

        impl<$($ty),+> private::Sealed for ($($ty,)+) {}

        impl<$($ty),+> Catalog for ($($ty,)+) {
            type Storage = $storage<$($ty),+>;

            const LEN: usize = [$($pos),+].len();
            const LIFECYCLE: &'static [Lifecycle] = &[$(Lifecycle::of::<$ty>()),+];
        }

        impl<$($ty: Clone),+> CloneCatalog for ($($ty,)+) {
            const CLONE: &'static [CloneFn] = &[$(clone_erased::<$ty> as CloneFn),+];
        }

        impl<$($ty: fmt::Debug),+> DebugCatalog for ($($ty,)+) {
            const DEBUG: &'static [DebugFn] = &[$(debug_erased::<$ty> as DebugFn),+];
        }

        impl<$($ty: PartialEq),+> PartialEqCatalog for ($($ty,)+) {
            const EQ: &'static [EqFn] = &[$(eq_erased::<$ty> as EqFn),+];
        }

        catalog!(@positions [$($ty),+] $($ty = $pos @ $marker),+);
    };
}
