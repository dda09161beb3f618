//! Options for the overload passes, read from the `[specialize]` table of
//! a `tessera.toml` project file.
//!
//! ```toml
//! [specialize]
//! intrinsic_name = "isType"
//! char_type_names = ["char"]
//! tie_break = true
//! ```

use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpecializeOptions {
    /// Callee name of the type-equality intrinsic
    pub intrinsic_name: String,
    /// Type reference names that denote a single character
    pub char_type_names: Vec<String>,
    /// Re-pick call-site overloads by char/string argument syntax
    pub tie_break: bool,
}

impl Default for SpecializeOptions {
    fn default() -> Self {
        Self {
            intrinsic_name: "isType".to_string(),
            char_type_names: vec!["char".to_string()],
            tie_break: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ProjectFile {
    #[serde(default)]
    specialize: SpecializeOptions,
}

impl SpecializeOptions {
    /// Parse options from the contents of a project file
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ProjectFile = toml::from_str(contents)
            .map_err(|e| anyhow!("Invalid [specialize] configuration: {}", e))?;
        Ok(file.specialize)
    }

    /// Load options from a project file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml_str(&contents).map_err(|e| anyhow!("{}: {}", path.display(), e))
    }

    pub fn is_char_type_name(&self, name: &str) -> bool {
        self.char_type_names.iter().any(|n| n == name)
    }
}
