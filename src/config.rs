//! Field mask configuration
//!
//! Named field definitions live in `masks.yaml` (see [`crate::config_paths`]):
//!
//! ```yaml
//! fields:
//!   phone:
//!     mask: "+1 ([000]) [000]-[0000]"
//!   card:
//!     mask: "[0000] [0000] [0000] [0000]"
//!     affine_formats: ["[0000] [000000] [00000]"]
//!     affinity_strategy: prefix
//!   amount:
//!     mask: "[000] [000] [000]"
//!     right_to_left: true
//!   phone_focus:
//!     mask: "+1 ([000]) [000]-[0000]"
//!     autocomplete_on_focus: true
//!     autoskip: true
//!   color:
//!     mask: "#[HHHHHH]"
//!     autocomplete: false
//!     notations:
//!       - symbol: "H"
//!         characters: "0123456789abcdefABCDEF"
//! ```
//!
//! Every pattern is compiled while parsing, so a bad mask is reported once
//! at setup instead of on the first keystroke.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::affine::{pick_mask, AffinityStrategy};
use crate::error::MaskSyntaxError;
use crate::field::MaskedField;
use crate::mask::{Mask, Notation};

/// Root structure of a masks YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaskConfig {
    #[serde(default)]
    pub fields: BTreeMap<String, FieldConfig>,
}

/// One named field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Primary mask pattern
    pub mask: String,
    #[serde(default)]
    pub affine_formats: Vec<String>,
    #[serde(default)]
    pub affinity_strategy: AffinityStrategy,
    #[serde(default = "default_autocomplete")]
    pub autocomplete: bool,
    #[serde(default)]
    pub notations: Vec<Notation>,
    /// Fill slots from the end of the mask
    #[serde(default)]
    pub right_to_left: bool,
    /// Backspace deletes through literal runs
    #[serde(default)]
    pub autoskip: bool,
    /// Show leading literals when an empty field gains focus
    #[serde(default)]
    pub autocomplete_on_focus: bool,
}

fn default_autocomplete() -> bool {
    true
}

/// A field definition with every pattern compiled
#[derive(Debug, Clone)]
pub struct CompiledField {
    pub primary: Arc<Mask>,
    pub affine: Vec<Arc<Mask>>,
    pub strategy: AffinityStrategy,
    pub autoskip: bool,
    pub autocomplete_on_focus: bool,
}

impl FieldConfig {
    /// A field with just a primary pattern and default options
    pub fn new(mask: impl Into<String>) -> Self {
        Self {
            mask: mask.into(),
            affine_formats: Vec::new(),
            affinity_strategy: AffinityStrategy::default(),
            autocomplete: default_autocomplete(),
            notations: Vec::new(),
            right_to_left: false,
            autoskip: false,
            autocomplete_on_focus: false,
        }
    }

    /// Compile the primary and affine patterns
    pub fn compile(&self) -> Result<CompiledField, MaskSyntaxError> {
        let compile = |pattern: &str| {
            Mask::compile_with_notations(pattern, &self.notations)
                .map(|m| {
                    Arc::new(
                        m.with_autocomplete(self.autocomplete)
                            .with_right_to_left(self.right_to_left),
                    )
                })
        };

        Ok(CompiledField {
            primary: compile(self.mask.as_str())?,
            affine: self
                .affine_formats
                .iter()
                .map(|p| compile(p.as_str()))
                .collect::<Result<_, _>>()?,
            strategy: self.affinity_strategy,
            autoskip: self.autoskip,
            autocomplete_on_focus: self.autocomplete_on_focus,
        })
    }
}

impl CompiledField {
    /// Start an editing session for this field
    pub fn session(&self) -> MaskedField {
        MaskedField::with_affine(
            Arc::clone(&self.primary),
            self.affine.clone(),
            self.strategy,
        )
        .with_autoskip(self.autoskip)
        .with_autocomplete_on_focus(self.autocomplete_on_focus)
    }

    /// Best mask for formatting `text` in one shot
    pub fn pick(&self, text: &str) -> &Mask {
        pick_mask::<Arc<Mask>>(&self.primary, &self.affine[..], text, self.strategy).as_ref()
    }
}

impl MaskConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::masks_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Masks file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match load_config_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded masks from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load masks at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name)
    }
}

/// Load field definitions from a YAML file
pub fn load_config_file(path: &Path) -> Result<MaskConfig, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    parse_config_yaml(&content)
}

/// Parse field definitions from a YAML string
pub fn parse_config_yaml(yaml: &str) -> Result<MaskConfig, ConfigError> {
    let config: MaskConfig =
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    for (name, field) in &config.fields {
        field.compile().map_err(|error| ConfigError::InvalidMask {
            field: name.clone(),
            error,
        })?;
    }

    Ok(config)
}

/// Errors that can occur when loading field definitions
#[derive(Debug, Clone)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    InvalidMask {
        field: String,
        error: MaskSyntaxError,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidMask { field, error } => {
                write!(f, "Invalid mask for field '{}': {}", field, error)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
