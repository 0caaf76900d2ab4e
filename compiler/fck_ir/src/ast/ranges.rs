//! Arena range types.
//!
//! Compact `start` + `len` handles into the arena's side tables.

/// Macro to define range types for arena-allocated data.
///
/// Each generated type has:
/// - `start: u32` and `len: u16` fields
/// - `EMPTY` constant
/// - `new()`, `is_empty()`, `len()` methods
/// - `Debug` implementation showing the range as `TypeName(start..end)`
macro_rules! define_range {
    ($($name:ident),* $(,)?) => { $(
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        #[repr(C)]
        pub struct $name {
            pub start: u32,
            pub len: u16,
        }

        impl $name {
            pub const EMPTY: Self = Self { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u16) -> Self {
                Self { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }

            #[inline]
            pub(crate) fn as_range(self) -> ::std::ops::Range<usize> {
                let start = self.start as usize;
                start..start + self.len()
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let end = self.start + u32::from(self.len);
                write!(f, "{}({}..{})", stringify!($name), self.start, end)
            }
        }
    )* };
}

define_range!(
    ExprRange,
    ParamRange,
    CallArgRange,
    IndexSpecRange,
    IfBranchRange,
    CaseArmRange,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ranges() {
        assert!(ExprRange::EMPTY.is_empty());
        assert_eq!(ParamRange::EMPTY.len(), 0);
        assert!(CaseArmRange::default().is_empty());
    }

    #[test]
    fn debug_shows_bounds() {
        assert_eq!(format!("{:?}", ExprRange::new(3, 4)), "ExprRange(3..7)");
        assert_eq!(CallArgRange::new(3, 4).as_range(), 3..7);
    }
}
