//! Vertex and agent identifiers.
//!
//! Both are plain `u32` newtypes: `Copy + Ord + Hash`, so they work as heap
//! entries, map keys and reservation pairs directly.  Per-node tables are
//! `Vec`s indexed with [`NodeId::index`].

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident, $prefix:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Placeholder for "no such id" (`u32::MAX`).
            pub const INVALID: $name = $name(u32::MAX);

            /// Build an id from a table index, `None` if it does not fit.
            pub fn from_index(index: usize) -> Option<$name> {
                u32::try_from(index).ok().map($name)
            }

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// The `INVALID` placeholder.
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($prefix, "{}"), self.0)
                } else {
                    f.write_str(concat!($prefix, "?"))
                }
            }
        }
    };
}

typed_id! {
    /// Position of an agent in the team's priority order (0 plans first).
    AgentId, "a"
}

typed_id! {
    /// Graph vertex, `0..node_count`.
    NodeId, "n"
}
