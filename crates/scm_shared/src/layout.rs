//! # Build Layouts
//!
//! Per-host symbol names and record sizes, loaded once at startup from a
//! TOML document. The built-in table covers the five supported hosts; an
//! embedding runtime may supply its own document for other builds.
//!
//! ```toml
//! [gta3]
//! script_space = "CTheScripts::ScriptSpace"
//! pools.vehicle = { symbol = "CPools::ms_pVehiclePool", entity_size = 0x5A8 }
//! text = { slots = "...", index = "...", stride = 0x414, capacity = 48 }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SharedError;
use crate::host::Host;
use crate::math::Vec2;

/// Layout document shipped with the crate.
const BUILTIN_LAYOUTS: &str = include_str!("../data/layouts.toml");

/// Where one entity pool lives for a given build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolLayout {
    /// Symbol whose address holds a pointer to the pool header.
    pub symbol: String,
    /// Size of one entity record in bytes.
    pub entity_size: u32,
}

/// The ring of drawable text slots the host renders each frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRingLayout {
    /// Symbol of the first slot.
    pub slots: String,
    /// Symbol of the `u16` current-slot counter.
    pub index: String,
    /// Distance between two slots in bytes.
    pub stride: u32,
    /// Number of slots in the ring.
    pub capacity: u16,
}

/// Reference dimensions percentages are resolved against.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenLayout {
    /// Width reference for x positions and wrap widths.
    pub width: f32,
    /// Height reference for y positions.
    pub height: f32,
}

impl ScreenLayout {
    /// The 640x448 virtual screen every supported host scripts against.
    pub const VIRTUAL: Self = Self {
        width: 640.0,
        height: 448.0,
    };

    /// Returns the dimensions as a vector.
    #[must_use]
    pub const fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::VIRTUAL
    }
}

/// Everything the runtime needs to know about one host build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildLayout {
    /// Symbol of the script global variable space.
    pub script_space: String,
    /// Symbol of the script variable accessor patched on reversed builds.
    #[serde(default)]
    pub script_var_accessor: Option<String>,
    /// Entity pools keyed by category name.
    pub pools: BTreeMap<String, PoolLayout>,
    /// Drawable text slot ring.
    pub text: TextRingLayout,
    /// Screen reference dimensions.
    #[serde(default)]
    pub screen: ScreenLayout,
}

/// All known build layouts, keyed by host identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutTable {
    builds: BTreeMap<String, BuildLayout>,
}

impl LayoutTable {
    /// Loads the layout document shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only if the embedded document is broken, which the tests rule out.
    pub fn builtin() -> Result<Self, SharedError> {
        Self::from_toml_str(BUILTIN_LAYOUTS)
    }

    /// Parses and validates a layout document.
    ///
    /// # Errors
    ///
    /// [`SharedError::InvalidLayout`] on syntax errors, unknown host keys,
    /// zero-sized records or an empty text ring.
    pub fn from_toml_str(source: &str) -> Result<Self, SharedError> {
        let table: Self =
            toml::from_str(source).map_err(|e| SharedError::InvalidLayout(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), SharedError> {
        for (key, build) in &self.builds {
            let host: Host = key
                .parse()
                .map_err(|_| SharedError::InvalidLayout(format!("unknown host key {key:?}")))?;
            if let Some((name, _)) = build.pools.iter().find(|(_, p)| p.entity_size == 0) {
                return Err(SharedError::InvalidLayout(format!(
                    "{host}: pool {name:?} has a zero entity size"
                )));
            }
            if build.text.capacity == 0 || build.text.stride == 0 {
                return Err(SharedError::InvalidLayout(format!(
                    "{host}: text ring must have a non-zero stride and capacity"
                )));
            }
            if host.needs_script_var_patch() && build.script_var_accessor.is_none() {
                return Err(SharedError::InvalidLayout(format!(
                    "{host}: script_var_accessor is required on reversed builds"
                )));
            }
        }
        Ok(())
    }

    /// Returns the layout for `host`.
    ///
    /// # Errors
    ///
    /// [`SharedError::UnsupportedHost`] if the table has no entry for it.
    pub fn get(&self, host: Host) -> Result<&BuildLayout, SharedError> {
        self.builds
            .get(host.as_str())
            .ok_or_else(|| SharedError::UnsupportedHost {
                host: host.as_str().to_owned(),
            })
    }

    /// Hosts covered by this table.
    pub fn hosts(&self) -> impl Iterator<Item = Host> + '_ {
        self.builds.keys().filter_map(|k| k.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_five_supported_hosts() {
        let table = LayoutTable::builtin().unwrap();
        let mut hosts: Vec<_> = table.hosts().collect();
        hosts.sort();
        assert_eq!(
            hosts,
            vec![Host::Gta3, Host::Re3, Host::Vc, Host::ReVc, Host::Sa]
        );
    }

    #[test]
    fn test_definitive_editions_are_unsupported() {
        let table = LayoutTable::builtin().unwrap();
        for host in [Host::Gta3Unreal, Host::VcUnreal, Host::SaUnreal] {
            assert!(matches!(
                table.get(host),
                Err(SharedError::UnsupportedHost { .. })
            ));
        }
    }

    #[test]
    fn test_builtin_has_three_pools_per_host() {
        let table = LayoutTable::builtin().unwrap();
        for host in table.hosts() {
            let build = table.get(host).unwrap();
            let names: Vec<_> = build.pools.keys().map(String::as_str).collect();
            assert_eq!(names, vec!["character", "object", "vehicle"], "{host}");
        }
    }

    #[test]
    fn test_hex_entity_sizes_parse() {
        let table = LayoutTable::builtin().unwrap();
        let sa = table.get(Host::Sa).unwrap();
        assert_eq!(sa.pools["vehicle"].entity_size, 0xA18);
        assert_eq!(sa.text.capacity, 96);
        assert_eq!(sa.screen, ScreenLayout::VIRTUAL);
    }

    #[test]
    fn test_unknown_host_key_rejected() {
        let doc = r#"
            [gta4]
            script_space = "x"
            pools = {}
            text = { slots = "a", index = "b", stride = 4, capacity = 1 }
        "#;
        assert!(matches!(
            LayoutTable::from_toml_str(doc),
            Err(SharedError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_reversed_build_requires_accessor() {
        let doc = r#"
            [re3]
            script_space = "x"
            pools = {}
            text = { slots = "a", index = "b", stride = 4, capacity = 1 }
        "#;
        let err = LayoutTable::from_toml_str(doc).unwrap_err();
        assert!(err.to_string().contains("script_var_accessor"));
    }

    #[test]
    fn test_screen_defaults_when_omitted() {
        let doc = r#"
            [vc]
            script_space = "x"
            pools = { vehicle = { symbol = "v", entity_size = 8 } }
            text = { slots = "a", index = "b", stride = 4, capacity = 1 }
        "#;
        let table = LayoutTable::from_toml_str(doc).unwrap();
        assert_eq!(table.get(Host::Vc).unwrap().screen, ScreenLayout::VIRTUAL);
    }
}
