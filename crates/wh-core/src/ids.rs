//! Strongly typed, zero-cost identifier wrappers.
//!
//! Every entity in the warehouse is referred to by a stable arena index
//! instead of a pointer, so robots, rails, nodes, and boxes can name each
//! other without ownership cycles.  All IDs are `Copy + Ord + Hash`; the inner
//! integer is `pub` for direct `Vec` indexing via `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
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

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a carrier robot.  Robots and rails are paired one-to-one.
    pub struct RobotId(u32);
}

typed_id! {
    /// Index of a rail (a robot's fixed lane), in declaration order.
    pub struct RailId(u32);
}

typed_id! {
    /// Global arena index of a node (area).  Distinct from the per-kind
    /// index that external commands use.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a box, in creation order.  External commands refer to boxes
    /// by this number.
    pub struct BoxId(u32);
}

typed_id! {
    /// Index of a junction (lane-crossing point).
    pub struct JunctionId(u16);
}
