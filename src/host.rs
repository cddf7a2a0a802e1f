use std::collections::BTreeMap;

use anyhow::Result;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::transform::{Rotator, Transform};

pub const MESH_ACTOR_TYPE: &str = "StaticMeshActor";

pub const ASSET_FILE_SIZE_TAG: &str = "AssetFileSize";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeHandle {
    name: String,
    path: String,
}

impl TypeHandle {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self { name: name.into(), path: path.into() }
    }

    pub fn builtin(name: &str) -> Self {
        Self::new(name, format!("/Script/Engine.{name}"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_mesh_actor(&self) -> bool {
        self.name == MESH_ACTOR_TYPE
    }
}

/// `name` is unique; `label` is what users see and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub name: String,
    pub label: String,
    pub type_name: String,
}

impl EntityRef {
    pub fn is_mesh_actor(&self) -> bool {
        self.type_name == MESH_ACTOR_TYPE
    }

    pub fn matches(&self, key: &str) -> bool {
        self.name == key || self.label == key
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetHandle {
    pub path: String,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub name: String,
    #[serde(rename = "path")]
    pub package_path: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub package_name: String,
}

impl AssetRecord {
    pub fn new(name: impl Into<String>, package_path: impl Into<String>, class_name: impl Into<String>) -> Self {
        let name = name.into();
        let package_path = package_path.into();
        let package_name = format!("{package_path}/{name}");
        Self { name, package_path, class_name: class_name.into(), package_name }
    }

    pub fn object_path(&self) -> String {
        format!("{}/{}", self.package_path, self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDetails {
    pub is_hidden: bool,
    pub folder_path: Option<String>,
    pub components: Vec<String>,
}

impl AssetMetadata {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyWrite {
    Applied,
    Missing,
}

pub trait SceneHost {
    fn world_name(&self) -> Option<String>;

    fn world_path(&self) -> Option<String>;

    fn streaming_levels(&self) -> Result<Vec<String>>;

    fn is_world_loaded(&self) -> bool {
        self.world_name().is_some()
    }

    fn find_entity(&self, name: &str) -> Result<Option<EntityRef>>;

    fn list_entities(&self) -> Result<Vec<EntityRef>>;

    /// Spawns an entity; `Ok(None)` means the host declined (abstract type, bad placement).
    fn spawn(&mut self, ty: &TypeHandle, location: DVec3, rotation: Rotator) -> Result<Option<EntityRef>>;

    fn destroy(&mut self, entity: &EntityRef) -> Result<bool>;

    fn transform(&self, entity: &EntityRef) -> Result<Transform>;

    fn entity_details(&self, entity: &EntityRef) -> Result<EntityDetails>;

    fn set_location(&mut self, entity: &EntityRef, location: DVec3) -> Result<()>;

    fn set_rotation(&mut self, entity: &EntityRef, rotation: Rotator) -> Result<()>;

    fn set_scale(&mut self, entity: &EntityRef, scale: DVec3) -> Result<()>;

    fn set_label(&mut self, entity: &EntityRef, label: &str) -> Result<()>;

    fn property(&self, entity: &EntityRef, name: &str) -> Result<Option<Value>>;

    fn set_property(&mut self, entity: &EntityRef, name: &str, value: &Value) -> Result<PropertyWrite>;

    /// `Ok(false)` when the entity has no mesh component. Same for `set_material`.
    fn set_mesh(&mut self, entity: &EntityRef, mesh: &AssetHandle) -> Result<bool>;

    fn set_material(&mut self, entity: &EntityRef, slot: usize, material: &AssetHandle) -> Result<bool>;

    fn load_asset(&self, path: &str) -> Result<Option<AssetHandle>>;

    fn asset_exists(&self, path: &str) -> Result<bool>;

    fn asset_index(&self) -> Result<Vec<AssetRecord>>;

    fn asset_metadata(&self, path: &str) -> Result<Option<AssetMetadata>>;

    fn list_assets(&self, root: &str, recursive: bool) -> Result<Vec<String>>;

    /// Assets that depend on the one at `path`. `Ok(None)` when `path` is not in the index.
    fn asset_referencers(&self, path: &str) -> Result<Option<Vec<AssetRecord>>>;

    fn load_native_type(&self, path: &str) -> Result<Option<TypeHandle>>;

    fn find_type(&self, name: &str) -> Result<Option<TypeHandle>>;

    fn load_blueprint_type(&self, path: &str) -> Result<Option<TypeHandle>>;
}
