use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::host::{
    AssetHandle, AssetMetadata, AssetRecord, EntityDetails, EntityRef, PropertyWrite, SceneHost, TypeHandle,
    MESH_ACTOR_TYPE,
};
use crate::transform::{Rotator, Transform, TransformData};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneEntityId(String);

impl SceneEntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SceneEntityId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub streaming_levels: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneTypeKind {
    #[default]
    Native,
    Blueprint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneTypeDef {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub kind: SceneTypeKind,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub mesh_component: bool,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl SceneTypeDef {
    pub fn native(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: SceneTypeKind::Native,
            is_abstract: false,
            mesh_component: false,
            properties: Map::new(),
        }
    }

    pub fn blueprint(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self { kind: SceneTypeKind::Blueprint, ..Self::native(name, path) }
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_mesh_component(mut self) -> Self {
        self.mesh_component = true;
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    fn handle(&self) -> TypeHandle {
        TypeHandle::new(self.name.clone(), self.path.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshComponentData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<String>,
    #[serde(default)]
    pub materials: SmallVec<[Option<String>; 4]>,
}

impl MeshComponentData {
    pub fn material(&self, slot: usize) -> Option<&str> {
        self.materials.get(slot).and_then(|material| material.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEntity {
    #[serde(default)]
    pub id: SceneEntityId,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "class")]
    pub type_name: String,
    #[serde(default)]
    pub transform: TransformData,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshComponentData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
}

impl SceneEntity {
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef { name: self.name.clone(), label: self.label.clone(), type_name: self.type_name.clone() }
    }

    pub fn transform(&self) -> Transform {
        self.transform.clone().into()
    }

    pub fn is_hidden(&self) -> bool {
        self.properties.get("bHidden").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn details(&self) -> EntityDetails {
        let components = if self.components.is_empty() {
            builtin_components(&self.type_name, self.mesh.is_some())
        } else {
            self.components.clone()
        };
        EntityDetails { is_hidden: self.is_hidden(), folder_path: self.folder_path.clone(), components }
    }
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneAsset {
    pub name: String,
    #[serde(rename = "path")]
    pub package_path: String,
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(default = "default_true")]
    pub loadable: bool,
    #[serde(default = "default_true")]
    pub metadata_valid: bool,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Object paths this asset depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl SceneAsset {
    pub fn new(package_path: impl Into<String>, name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_path: package_path.into(),
            class_name: class_name.into(),
            loadable: true,
            metadata_valid: true,
            tags: BTreeMap::new(),
            references: Vec::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn referencing(mut self, path: impl Into<String>) -> Self {
        self.references.push(path.into());
        self
    }

    pub fn unloadable(mut self) -> Self {
        self.loadable = false;
        self
    }

    pub fn without_metadata(mut self) -> Self {
        self.metadata_valid = false;
        self
    }

    pub fn object_path(&self) -> String {
        format!("{}/{}", self.package_path, self.name)
    }

    fn record(&self) -> AssetRecord {
        AssetRecord::new(self.name.clone(), self.package_path.clone(), self.class_name.clone())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub metadata: SceneMetadata,
    #[serde(default)]
    pub types: Vec<SceneTypeDef>,
    #[serde(default)]
    pub entities: Vec<SceneEntity>,
    #[serde(default)]
    pub assets: Vec<SceneAsset>,
}

fn builtin_properties(type_name: &str) -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert("bHidden".to_string(), json!(false));
    properties.insert("Tags".to_string(), json!([]));
    match type_name {
        MESH_ACTOR_TYPE => {
            properties.insert("CastShadow".to_string(), json!(true));
            properties.insert("Mobility".to_string(), json!("Static"));
        }
        "DirectionalLight" => {
            properties.insert("Intensity".to_string(), json!(10.0));
        }
        "PointLight" | "SpotLight" => {
            properties.insert("Intensity".to_string(), json!(5000.0));
            properties.insert("AttenuationRadius".to_string(), json!(1000.0));
        }
        "CameraActor" => {
            properties.insert("FieldOfView".to_string(), json!(90.0));
        }
        _ => {}
    }
    properties
}

fn builtin_components(type_name: &str, mesh_component: bool) -> Vec<String> {
    let mut components: Vec<String> = match type_name {
        MESH_ACTOR_TYPE => vec!["StaticMeshComponent"],
        "DirectionalLight" => vec!["DirectionalLightComponent", "ArrowComponent"],
        "PointLight" => vec!["PointLightComponent"],
        "SpotLight" => vec!["SpotLightComponent", "ArrowComponent"],
        "CameraActor" => vec!["CameraComponent"],
        "PlayerStart" => vec!["CapsuleComponent", "ArrowComponent"],
        _ => vec!["SceneComponent"],
    }
    .into_iter()
    .map(String::from)
    .collect();
    if mesh_component && !components.iter().any(|component| component == "StaticMeshComponent") {
        components.push("StaticMeshComponent".to_string());
    }
    components
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

impl Scene {
    pub fn with_world(world_name: impl Into<String>) -> Self {
        let metadata = SceneMetadata { world_name: Some(world_name.into()), ..Default::default() };
        Self { metadata, ..Default::default() }
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("Reading scene file {}", path.display()))?;
        let scene = serde_json::from_slice::<Scene>(&bytes)
            .with_context(|| format!("Parsing scene file {}", path.display()))?;
        Ok(scene)
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Creating scene directory {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json.as_bytes()).with_context(|| format!("Writing scene file {}", path.display()))?;
        Ok(())
    }

    pub fn unload_world(&mut self) {
        self.metadata.world_name = None;
    }

    pub fn add_type(&mut self, def: SceneTypeDef) -> &mut Self {
        self.types.push(def);
        self
    }

    pub fn add_asset(&mut self, asset: SceneAsset) -> &mut Self {
        self.assets.push(asset);
        self
    }

    pub fn entity(&self, key: &str) -> Option<&SceneEntity> {
        self.entities.iter().find(|entity| entity.name == key || entity.label == key)
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&SceneEntity> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    fn entity_mut(&mut self, entity: &EntityRef) -> Result<&mut SceneEntity> {
        self.entities
            .iter_mut()
            .find(|candidate| candidate.name == entity.name)
            .ok_or_else(|| anyhow!("entity '{}' is not in the scene", entity.name))
    }

    fn live_entity(&self, entity: &EntityRef) -> Result<&SceneEntity> {
        self.entity_by_name(&entity.name).ok_or_else(|| anyhow!("entity '{}' is not in the scene", entity.name))
    }

    fn type_def(&self, name: &str) -> Option<&SceneTypeDef> {
        self.types.iter().find(|def| def.name == name)
    }

    fn asset(&self, path: &str) -> Option<&SceneAsset> {
        self.assets.iter().find(|asset| asset.object_path() == path)
    }

    fn unique_name(&self, type_name: &str) -> String {
        (0..)
            .map(|serial| format!("{type_name}_{serial}"))
            .find(|candidate| self.entity_by_name(candidate).is_none())
            .unwrap_or_else(|| format!("{type_name}_{}", Uuid::new_v4().simple()))
    }
}

impl SceneHost for Scene {
    fn world_name(&self) -> Option<String> {
        self.metadata.world_name.clone()
    }

    fn world_path(&self) -> Option<String> {
        let name = self.metadata.world_name.as_deref()?;
        // Unsaved levels live under /Temp until they get a package.
        Some(self.metadata.map_path.clone().unwrap_or_else(|| format!("/Temp/{name}.{name}")))
    }

    fn streaming_levels(&self) -> Result<Vec<String>> {
        Ok(self.metadata.streaming_levels.clone())
    }

    fn find_entity(&self, name: &str) -> Result<Option<EntityRef>> {
        Ok(self.entity_by_name(name).map(SceneEntity::entity_ref))
    }

    fn list_entities(&self) -> Result<Vec<EntityRef>> {
        Ok(self.entities.iter().map(SceneEntity::entity_ref).collect())
    }

    fn spawn(&mut self, ty: &TypeHandle, location: DVec3, rotation: Rotator) -> Result<Option<EntityRef>> {
        let def = self.type_def(ty.name());
        if def.is_some_and(|def| def.is_abstract) {
            return Ok(None);
        }
        if !location.is_finite() {
            return Ok(None);
        }
        let mut properties = builtin_properties(ty.name());
        let mut mesh_component = ty.is_mesh_actor();
        if let Some(def) = def {
            properties.extend(def.properties.clone());
            mesh_component |= def.mesh_component;
        }
        let name = self.unique_name(ty.name());
        let transform = Transform { location, rotation, scale: DVec3::ONE };
        let entity = SceneEntity {
            id: SceneEntityId::new(),
            label: name.clone(),
            name,
            type_name: ty.name().to_string(),
            transform: transform.into(),
            properties,
            mesh: mesh_component.then(MeshComponentData::default),
            folder_path: None,
            components: builtin_components(ty.name(), mesh_component),
        };
        let entity_ref = entity.entity_ref();
        self.entities.push(entity);
        Ok(Some(entity_ref))
    }

    fn destroy(&mut self, entity: &EntityRef) -> Result<bool> {
        let before = self.entities.len();
        self.entities.retain(|candidate| candidate.name != entity.name);
        Ok(self.entities.len() < before)
    }

    fn transform(&self, entity: &EntityRef) -> Result<Transform> {
        Ok(self.live_entity(entity)?.transform())
    }

    fn entity_details(&self, entity: &EntityRef) -> Result<EntityDetails> {
        Ok(self.live_entity(entity)?.details())
    }

    fn set_location(&mut self, entity: &EntityRef, location: DVec3) -> Result<()> {
        self.entity_mut(entity)?.transform.location = location.into();
        Ok(())
    }

    fn set_rotation(&mut self, entity: &EntityRef, rotation: Rotator) -> Result<()> {
        self.entity_mut(entity)?.transform.rotation = rotation;
        Ok(())
    }

    fn set_scale(&mut self, entity: &EntityRef, scale: DVec3) -> Result<()> {
        self.entity_mut(entity)?.transform.scale = scale.into();
        Ok(())
    }

    fn set_label(&mut self, entity: &EntityRef, label: &str) -> Result<()> {
        self.entity_mut(entity)?.label = label.to_string();
        Ok(())
    }

    fn property(&self, entity: &EntityRef, name: &str) -> Result<Option<Value>> {
        Ok(self.live_entity(entity)?.properties.get(name).cloned())
    }

    fn set_property(&mut self, entity: &EntityRef, name: &str, value: &Value) -> Result<PropertyWrite> {
        let live = self.entity_mut(entity)?;
        let Some(current) = live.properties.get_mut(name) else {
            return Ok(PropertyWrite::Missing);
        };
        if !current.is_null() && !value.is_null() && value_kind(current) != value_kind(value) {
            bail!("property '{name}' expects a {} value, got {}", value_kind(current), value_kind(value));
        }
        *current = value.clone();
        Ok(PropertyWrite::Applied)
    }

    fn set_mesh(&mut self, entity: &EntityRef, mesh: &AssetHandle) -> Result<bool> {
        let Some(component) = self.entity_mut(entity)?.mesh.as_mut() else {
            return Ok(false);
        };
        component.mesh = Some(mesh.path.clone());
        Ok(true)
    }

    fn set_material(&mut self, entity: &EntityRef, slot: usize, material: &AssetHandle) -> Result<bool> {
        let Some(component) = self.entity_mut(entity)?.mesh.as_mut() else {
            return Ok(false);
        };
        if component.materials.len() <= slot {
            component.materials.resize(slot + 1, None);
        }
        component.materials[slot] = Some(material.path.clone());
        Ok(true)
    }

    fn load_asset(&self, path: &str) -> Result<Option<AssetHandle>> {
        Ok(self
            .asset(path)
            .filter(|asset| asset.loadable)
            .map(|asset| AssetHandle { path: asset.object_path(), class_name: asset.class_name.clone() }))
    }

    fn asset_exists(&self, path: &str) -> Result<bool> {
        Ok(self.asset(path).is_some())
    }

    fn asset_index(&self) -> Result<Vec<AssetRecord>> {
        Ok(self.assets.iter().map(SceneAsset::record).collect())
    }

    fn asset_metadata(&self, path: &str) -> Result<Option<AssetMetadata>> {
        Ok(self
            .asset(path)
            .filter(|asset| asset.metadata_valid)
            .map(|asset| AssetMetadata { tags: asset.tags.clone() }))
    }

    fn list_assets(&self, root: &str, recursive: bool) -> Result<Vec<String>> {
        let root = root.trim_end_matches('/');
        let nested = format!("{root}/");
        let mut paths: Vec<String> = self
            .assets
            .iter()
            .filter(|asset| asset.package_path == root || (recursive && asset.package_path.starts_with(&nested)))
            .map(SceneAsset::object_path)
            .collect();
        paths.sort();
        Ok(paths)
    }

    fn asset_referencers(&self, path: &str) -> Result<Option<Vec<AssetRecord>>> {
        if self.asset(path).is_none() {
            return Ok(None);
        }
        Ok(Some(
            self.assets
                .iter()
                .filter(|asset| asset.references.iter().any(|reference| reference == path))
                .map(SceneAsset::record)
                .collect(),
        ))
    }

    fn load_native_type(&self, path: &str) -> Result<Option<TypeHandle>> {
        Ok(self
            .types
            .iter()
            .find(|def| def.kind == SceneTypeKind::Native && def.path == path)
            .map(SceneTypeDef::handle))
    }

    fn find_type(&self, name: &str) -> Result<Option<TypeHandle>> {
        Ok(self
            .types
            .iter()
            .find(|def| def.kind == SceneTypeKind::Native && def.name == name)
            .map(SceneTypeDef::handle))
    }

    fn load_blueprint_type(&self, path: &str) -> Result<Option<TypeHandle>> {
        Ok(self
            .types
            .iter()
            .find(|def| def.kind == SceneTypeKind::Blueprint && def.path == path)
            .map(SceneTypeDef::handle))
    }
}
