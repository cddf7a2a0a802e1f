use anyhow::Result;
use serde::Serialize;

use crate::error::{HostContext, ProvisionResult};
use crate::host::{SceneHost, ASSET_FILE_SIZE_TAG};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidAsset {
    pub path: String,
    pub class: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidAsset {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid(ValidAsset),
    Invalid(InvalidAsset),
}

impl ValidationOutcome {
    fn invalid(path: &str, error: impl Into<String>) -> Self {
        ValidationOutcome::Invalid(InvalidAsset { path: path.to_string(), error: error.into() })
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub valid_count: usize,
    pub invalid_count: usize,
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub total_validated: usize,
    pub valid_assets: Vec<ValidAsset>,
    pub invalid_assets: Vec<InvalidAsset>,
    pub validation_summary: ValidationSummary,
}

impl ValidationReport {
    fn from_outcomes(outcomes: Vec<ValidationOutcome>) -> Self {
        let total_validated = outcomes.len();
        let mut valid_assets = Vec::new();
        let mut invalid_assets = Vec::new();
        for outcome in outcomes {
            match outcome {
                ValidationOutcome::Valid(asset) => valid_assets.push(asset),
                ValidationOutcome::Invalid(asset) => invalid_assets.push(asset),
            }
        }
        let validation_summary = ValidationSummary {
            valid_count: valid_assets.len(),
            invalid_count: invalid_assets.len(),
            success_rate: success_rate(valid_assets.len(), total_validated),
        };
        Self { total_validated, valid_assets, invalid_assets, validation_summary }
    }
}

pub fn success_rate(valid: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = valid as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

/// `None` samples the index; an explicit empty list is an empty batch.
pub fn validate(
    host: &dyn SceneHost,
    paths: Option<&[String]>,
    default_sample: usize,
) -> ProvisionResult<ValidationReport> {
    let sampled;
    let paths = match paths {
        Some(paths) => paths,
        None => {
            let index = host.asset_index().during("validate assets")?;
            sampled = index.iter().take(default_sample).map(|record| record.object_path()).collect::<Vec<_>>();
            &sampled[..]
        }
    };
    let outcomes = paths.iter().map(|path| validate_one(host, path)).collect();
    Ok(ValidationReport::from_outcomes(outcomes))
}

pub fn validate_one(host: &dyn SceneHost, path: &str) -> ValidationOutcome {
    check(host, path).unwrap_or_else(|err| ValidationOutcome::invalid(path, format!("{err:#}")))
}

fn check(host: &dyn SceneHost, path: &str) -> Result<ValidationOutcome> {
    if !host.asset_exists(path)? {
        return Ok(ValidationOutcome::invalid(path, "Asset does not exist"));
    }
    let Some(asset) = host.load_asset(path)? else {
        return Ok(ValidationOutcome::invalid(path, "Failed to load asset"));
    };
    let Some(metadata) = host.asset_metadata(path)? else {
        return Ok(ValidationOutcome::invalid(path, "Asset data is invalid"));
    };
    let size = metadata.tag(ASSET_FILE_SIZE_TAG).unwrap_or("Unknown").to_string();
    Ok(ValidationOutcome::Valid(ValidAsset { path: path.to_string(), class: asset.class_name, size }))
}
