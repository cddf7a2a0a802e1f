use serde::Serialize;

use crate::error::{HostContext, ProvisionError, ProvisionResult};
use crate::host::SceneHost;

pub const DEFAULT_LIST_ROOT: &str = "/Game";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetListing {
    pub root: String,
    pub recursive: bool,
    pub total_assets: usize,
    pub assets: Vec<String>,
}

pub fn list_assets(host: &dyn SceneHost, root: &str, recursive: bool) -> ProvisionResult<AssetListing> {
    let root = root.trim();
    if !root.starts_with('/') {
        return Err(ProvisionError::InvalidRequest(format!("asset root must be a package path, got '{root}'")));
    }
    let assets = host.list_assets(root, recursive).during("list assets")?;
    Ok(AssetListing { root: root.to_string(), recursive, total_assets: assets.len(), assets })
}
