//! # Runtime Configuration
//!
//! ```toml
//! min_cleo_version = "2.0.0"
//! layouts = """
//! [gta3]
//! ...
//! """
//! ```

use serde::{Deserialize, Serialize};

use scm_shared::{CleoVersion, LayoutTable, MIN_CLEO_VERSION};

use crate::error::RuntimeError;

/// Startup options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Oldest CLEO the scripts accept.
    pub min_cleo_version: String,
    /// Layout document replacing the built-in one.
    pub layouts: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            min_cleo_version: MIN_CLEO_VERSION.to_owned(),
            layouts: None,
        }
    }
}

impl RuntimeConfig {
    /// Parses a TOML config document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::InvalidConfig`] on syntax or type errors.
    pub fn from_toml_str(source: &str) -> Result<Self, RuntimeError> {
        toml::from_str(source).map_err(|e| RuntimeError::InvalidConfig(e.to_string()))
    }

    /// The minimum version as a comparable value.
    ///
    /// # Errors
    ///
    /// [`scm_shared::SharedError::MalformedVersion`] if it does not parse.
    pub fn min_version(&self) -> Result<CleoVersion, RuntimeError> {
        Ok(CleoVersion::parse(&self.min_cleo_version)?)
    }

    /// The override layout table, or the built-in one.
    ///
    /// # Errors
    ///
    /// [`scm_shared::SharedError::InvalidLayout`] if the document is broken.
    pub fn layout_table(&self) -> Result<LayoutTable, RuntimeError> {
        let table = match &self.layouts {
            Some(source) => LayoutTable::from_toml_str(source)?,
            None => LayoutTable::builtin()?,
        };
        Ok(table)
    }
}
