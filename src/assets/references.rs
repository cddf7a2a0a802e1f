use serde::Serialize;

use crate::error::{HostContext, ProvisionError, ProvisionResult};
use crate::host::SceneHost;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Referencer {
    pub name: String,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetReferences {
    pub asset_path: String,
    pub total_referencers: usize,
    pub referencers: Vec<Referencer>,
}

pub fn asset_references(host: &dyn SceneHost, path: &str) -> ProvisionResult<AssetReferences> {
    let referencers: Vec<Referencer> = host
        .asset_referencers(path)
        .during("get asset references")?
        .ok_or_else(|| ProvisionError::AssetNotFound(path.to_string()))?
        .into_iter()
        .map(|record| Referencer { name: record.object_path(), class: record.class_name })
        .collect();
    Ok(AssetReferences { asset_path: path.to_string(), total_referencers: referencers.len(), referencers })
}
