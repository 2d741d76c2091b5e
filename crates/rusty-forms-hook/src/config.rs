// File: src/config.rs
// Purpose: Controller options, parsed from a [form] table in TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options for one form controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOptions {
    /// Name recorded on the controller's log span
    #[serde(default = "default_name")]
    pub name: String,

    /// Include field values in log events (default: false)
    #[serde(default = "default_false")]
    pub log_values: bool,

    /// Run the validator on change (default: true)
    #[serde(default = "default_true")]
    pub validate_on_change: bool,

    /// Run the validator on blur (default: true)
    #[serde(default = "default_true")]
    pub validate_on_blur: bool,
}

#[derive(Debug, Deserialize)]
struct OptionsFile {
    #[serde(default)]
    form: FormOptions,
}

fn default_name() -> String {
    "form".to_string()
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_values: default_false(),
            validate_on_change: default_true(),
            validate_on_blur: default_true(),
        }
    }
}

impl FormOptions {
    /// Options with a custom form name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse options from the `[form]` table of a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: OptionsFile =
            toml::from_str(content).context("Failed to parse form options")?;
        Ok(file.form)
    }

    /// Load options from a TOML file
    ///
    /// A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no form options file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form options: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid form options in {}", path.display()))
    }
}
