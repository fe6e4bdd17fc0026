//! # Host Variants
//!
//! Every offset table in the workspace is keyed by the host build. The host
//! identifier is supplied once at startup by the embedding runtime.

use std::fmt;
use std::str::FromStr;

use crate::error::SharedError;

/// A host build the runtime may be loaded into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Host {
    /// GTA III, original executable.
    Gta3,
    /// re3 reverse-engineered GTA III.
    Re3,
    /// GTA III Definitive Edition.
    Gta3Unreal,
    /// Vice City, original executable.
    Vc,
    /// reVC reverse-engineered Vice City.
    ReVc,
    /// Vice City Definitive Edition.
    VcUnreal,
    /// San Andreas, original executable.
    Sa,
    /// San Andreas Definitive Edition.
    SaUnreal,
}

impl Host {
    /// Every host identifier understood by [`Host::from_str`].
    pub const ALL: [Self; 8] = [
        Self::Re3,
        Self::Gta3,
        Self::Gta3Unreal,
        Self::ReVc,
        Self::Vc,
        Self::VcUnreal,
        Self::Sa,
        Self::SaUnreal,
    ];

    /// The identifier the runtime reports for this host.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gta3 => "gta3",
            Self::Re3 => "re3",
            Self::Gta3Unreal => "gta3_unreal",
            Self::Vc => "vc",
            Self::ReVc => "reVC",
            Self::VcUnreal => "vc_unreal",
            Self::Sa => "sa",
            Self::SaUnreal => "sa_unreal",
        }
    }

    /// GTA III family.
    #[must_use]
    pub const fn is_gta3(self) -> bool {
        matches!(self, Self::Gta3 | Self::Re3 | Self::Gta3Unreal)
    }

    /// Vice City family.
    #[must_use]
    pub const fn is_vc(self) -> bool {
        matches!(self, Self::Vc | Self::ReVc | Self::VcUnreal)
    }

    /// San Andreas family.
    #[must_use]
    pub const fn is_sa(self) -> bool {
        matches!(self, Self::Sa | Self::SaUnreal)
    }

    /// Reverse-engineered builds assert inside the script variable accessor
    /// and need the bootstrap patch before globals can be addressed freely.
    #[must_use]
    pub const fn needs_script_var_patch(self) -> bool {
        matches!(self, Self::Re3 | Self::ReVc)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Host {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|host| host.as_str() == s)
            .ok_or_else(|| SharedError::UnsupportedHost { host: s.to_owned() })
    }
}
