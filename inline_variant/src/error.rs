use core::fmt;

/// The error returned when a [`Variant`](crate::Variant) is accessed as an alternative it does
/// not currently hold, or while it is empty.
///
/// # Examples
/// ```
/// use inline_variant::Variant;
///
/// let number = Variant::<(i32, String)>::new(5);
/// let err = number.get::<String, _>().unwrap_err();
///
/// assert_eq!(err.requested_index(), 1);
/// assert_eq!(err.active_index(), Some(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadAccess {
    requested: &'static str,
    requested_index: usize,
    active: Option<(usize, &'static str)>,
}

impl BadAccess {
    #[inline]
    pub(crate) fn new(
        requested: &'static str,
        requested_index: usize,
        active: Option<(usize, &'static str)>,
    ) -> Self {
        BadAccess {
            requested,
            requested_index,
            active,
        }
    }

    /// Name of the type that was asked for.
    #[inline]
    pub fn requested(&self) -> &'static str {
        self.requested
    }

    /// Catalog position of the type that was asked for.
    #[inline]
    pub fn requested_index(&self) -> usize {
        self.requested_index
    }

    /// Name of the alternative the variant held, `None` if it was empty.
    #[inline]
    pub fn active(&self) -> Option<&'static str> {
        self.active.map(|(_, name)| name)
    }

    /// Catalog position of the alternative the variant held, `None` if it was empty.
    #[inline]
    pub fn active_index(&self) -> Option<usize> {
        self.active.map(|(index, _)| index)
    }

    /// Returns `true` if the access failed because the variant was empty.
    #[inline]
    pub fn was_empty(&self) -> bool {
        self.active.is_none()
    }
}

impl fmt::Display for BadAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bad variant access: requested `{}` (alternative {})",
            self.requested, self.requested_index
        )?;
        match self.active {
            Some((index, name)) => {
                write!(f, " but the variant holds `{}` (alternative {})", name, index)
            }
            None => f.write_str(" but the variant is empty"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BadAccess {}
