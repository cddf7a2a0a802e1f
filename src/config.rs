use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "SearchConfig::default_result_limit")]
    pub result_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "ValidationConfig::default_sample")]
    pub default_sample: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecorationConfig {
    #[serde(default = "DecorationConfig::default_shape_root")]
    pub shape_root: String,
    #[serde(default = "DecorationConfig::default_material")]
    pub default_material: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutlinerConfig {
    #[serde(default = "OutlinerConfig::default_actor_type_limit")]
    pub actor_type_limit: usize,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProvisionConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub decoration: DecorationConfig,
    #[serde(default)]
    pub outliner: OutlinerConfig,
    /// Extra short names, each mapped to a built-in type name.
    #[serde(default)]
    pub type_aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub search_limit: Option<usize>,
    pub validation_sample: Option<usize>,
}

impl SearchConfig {
    const fn default_result_limit() -> usize {
        50
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { result_limit: Self::default_result_limit() }
    }
}

impl ValidationConfig {
    const fn default_sample() -> usize {
        100
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { default_sample: Self::default_sample() }
    }
}

impl DecorationConfig {
    fn default_shape_root() -> String {
        "/Engine/BasicShapes".to_string()
    }

    fn default_material() -> String {
        "/Engine/BasicShapes/BasicShapeMaterial".to_string()
    }
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self { shape_root: Self::default_shape_root(), default_material: Self::default_material() }
    }
}

impl OutlinerConfig {
    const fn default_actor_type_limit() -> usize {
        15
    }
}

impl Default for OutlinerConfig {
    fn default() -> Self {
        Self { actor_type_limit: Self::default_actor_type_limit() }
    }
}

impl ProvisionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("Config load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(limit) = overrides.search_limit {
            self.search.result_limit = limit;
        }
        if let Some(sample) = overrides.validation_sample {
            self.validation.default_sample = sample;
        }
    }
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.search_limit.is_none() && self.validation_sample.is_none()
    }

    pub fn applied_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.search_limit.is_some() {
            fields.push("search_limit");
        }
        if self.validation_sample.is_some() {
            fields.push("validation_sample");
        }
        fields
    }
}
