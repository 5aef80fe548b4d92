//! Wire identifiers.
//!
//! A circuit has exactly one quantum register `q` and one classical
//! register `c`, so an id is just the position within that register.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! wire_id {
    ($(#[$meta:meta])* $name:ident, $register:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($register, "[{}]"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(index: u32) -> Self {
                Self(index)
            }
        }
    };
}

wire_id!(
    /// Position in the quantum register, shown as `q[i]`.
    QubitId,
    "q"
);

wire_id!(
    /// Position in the classical register, shown as `c[i]`.
    ClbitId,
    "c"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_register_name() {
        assert_eq!(QubitId(0).to_string(), "q[0]");
        assert_eq!(QubitId(12).to_string(), "q[12]");
        assert_eq!(ClbitId(3).to_string(), "c[3]");
    }

    #[test]
    fn test_sorts_by_index() {
        let mut ids: Vec<QubitId> = [2, 0, 1].into_iter().map(QubitId::from).collect();
        ids.sort();
        assert_eq!(ids, [QubitId(0), QubitId(1), QubitId(2)]);
    }
}
