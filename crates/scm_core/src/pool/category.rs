//! Entity categories backed by a host pool.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The closed set of entity tables a pool can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityCategory {
    /// Cars, bikes, boats, aircraft.
    Vehicle,
    /// Peds, including the player.
    Character,
    /// Placeable world objects.
    Object,
}

impl EntityCategory {
    /// All categories, in binding order.
    pub const ALL: [Self; 3] = [Self::Vehicle, Self::Character, Self::Object];

    /// Key of this category in a build layout's `pools` table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vehicle => "vehicle",
            Self::Character => "character",
            Self::Object => "object",
        }
    }

    /// Dense index for per-category arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vehicle" | "car" => Ok(Self::Vehicle),
            "character" | "char" | "ped" => Ok(Self::Character),
            "object" => Ok(Self::Object),
            _ => Err(CoreError::UnknownCategory(s.to_owned())),
        }
    }
}
