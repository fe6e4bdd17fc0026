//! # CLEO Version Gate
//!
//! The runtime refuses to start on a CLEO build older than
//! [`MIN_CLEO_VERSION`](crate::constants::MIN_CLEO_VERSION).

use std::fmt;
use std::str::FromStr;

use crate::error::SharedError;

/// A `major.minor.patch` runtime version.
///
/// Ordering is lexicographic over `(major, minor, patch)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CleoVersion {
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Patch component.
    pub patch: u32,
}

impl CleoVersion {
    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Parses `major.minor.patch`.
    ///
    /// # Errors
    ///
    /// [`SharedError::MalformedVersion`] if the string does not have exactly
    /// three numeric components.
    pub fn parse(s: &str) -> Result<Self, SharedError> {
        let malformed = || SharedError::MalformedVersion(s.to_owned());
        let mut parts = s.trim().split('.');
        let mut next = || -> Result<u32, SharedError> {
            parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or_else(malformed)
        };
        let version = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(version)
    }

    /// Checks that `self` is at least `minimum`.
    ///
    /// # Errors
    ///
    /// [`SharedError::VersionTooOld`] otherwise.
    pub fn require(self, minimum: Self) -> Result<(), SharedError> {
        if self < minimum {
            return Err(SharedError::VersionTooOld {
                required: minimum.to_string(),
                found: self.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for CleoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for CleoVersion {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
