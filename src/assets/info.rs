use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{HostContext, ProvisionError, ProvisionResult};
use crate::host::SceneHost;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetInfo {
    pub name: String,
    pub class: String,
    pub path: String,
    pub package: String,
    pub package_path: String,
    pub is_loaded: bool,
    pub tags: BTreeMap<String, String>,
}

pub fn describe(host: &dyn SceneHost, path: &str) -> ProvisionResult<AssetInfo> {
    const OPERATION: &str = "get asset info";
    let record = host
        .asset_index()
        .during(OPERATION)?
        .into_iter()
        .find(|record| record.object_path() == path || record.package_name == path)
        .ok_or_else(|| ProvisionError::AssetNotFound(path.to_string()))?;
    let loaded = host.load_asset(path).during(OPERATION)?;
    let tags = host.asset_metadata(path).during(OPERATION)?.map(|metadata| metadata.tags).unwrap_or_default();
    Ok(AssetInfo {
        class: loaded.as_ref().map_or_else(|| record.class_name.clone(), |asset| asset.class_name.clone()),
        path: record.object_path(),
        package: record.package_name,
        package_path: record.package_path,
        name: record.name,
        is_loaded: loaded.is_some(),
        tags,
    })
}
