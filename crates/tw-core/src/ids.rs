//! Strongly typed, zero-cost identifier wrappers.
//!
//! An `ActorId` is assigned by the world when an actor is created and stays
//! stable for the actor's whole life — across scheduling, removal, and
//! re-insertion.  The scheduler treats it as fully opaque: it is only ever
//! compared, hashed, and carried around.  The inner integer is `pub` to let
//! applications mint IDs from their own counters, but most code should treat
//! the value as a token.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the inner max.
            pub const INVALID: $name = $name(<$inner>::MAX);
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// Stable identity of a world actor.  `u64` so an application can mint
    /// IDs monotonically for the lifetime of a save without ever reusing one.
    pub struct ActorId(u64);
}
