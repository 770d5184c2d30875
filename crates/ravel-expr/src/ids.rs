//! Label newtypes for variable and constraint instances.
//!
//! Labels are assigned once at creation time and stay stable across solves.
//! The value -1 is the sentinel for missing/masked instances.

/// Maps a label to its dense axis position in a label-indexed matrix.
///
/// Returns `None` for the missing sentinel, so reindexing can skip masked
/// rows and columns without special cases at the call site.
pub trait LabelIndex: Copy {
    fn slot(self) -> Option<usize>;
}

macro_rules! define_label_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Sentinel denoting a missing or masked instance.
            pub const SENTINEL: $name = $name(-1);

            /// Create a label from a raw i64 value.
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the inner i64 value.
            pub fn inner(self) -> i64 {
                self.0
            }

            /// Whether this label is the missing sentinel.
            pub fn is_missing(self) -> bool {
                self.0 < 0
            }
        }

        impl LabelIndex for $name {
            fn slot(self) -> Option<usize> {
                if self.is_missing() {
                    None
                } else {
                    Some(self.0 as usize)
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_label_type!(VarLabel);
define_label_type!(ConLabel);
