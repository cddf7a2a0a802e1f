#![allow(dead_code)]

use anyhow::{anyhow, Result};
use glam::DVec3;
use scene_provision::host::{
    AssetHandle, AssetMetadata, AssetRecord, EntityDetails, EntityRef, PropertyWrite, SceneHost, TypeHandle,
};
use scene_provision::scene::{Scene, SceneAsset, SceneTypeDef};
use scene_provision::transform::{Rotator, Transform};
use serde_json::Value;
use std::cell::Cell;

pub const FIXTURE_SCENE: &str = "tests/fixtures/scenes/editor_level.json";

/// Scene with the basic shapes and default material the decoration step binds.
pub fn editor_scene() -> Scene {
    let mut scene = Scene::with_world("TestLevel");
    for shape in ["Cube", "Sphere", "Cylinder", "Cone", "Plane"] {
        scene.add_asset(SceneAsset::new("/Engine/BasicShapes", shape, "StaticMesh"));
    }
    scene.add_asset(SceneAsset::new("/Engine/BasicShapes", "BasicShapeMaterial", "Material"));
    scene
        .add_type(SceneTypeDef::native("TriggerBox", "/Script/Engine.TriggerBox"))
        .add_type(SceneTypeDef::blueprint("BP_Door_C", "/Game/Blueprints/BP_Door.BP_Door_C").with_mesh_component())
        .add_type(SceneTypeDef::native("Volume", "/Script/Engine.Volume").abstract_type());
    scene
}

/// Wraps a [`Scene`] and injects host failures on demand.
pub struct FaultyHost {
    pub scene: Scene,
    pub fail_native: bool,
    pub fail_registry: bool,
    pub fail_blueprint: bool,
    pub fail_metadata: bool,
    pub fail_index: bool,
    pub fail_streaming: bool,
    /// Entity removed behind the engine's back on the next `find_entity` call.
    pub vanish_on_find: Option<String>,
    pub native_calls: Cell<usize>,
}

impl FaultyHost {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            fail_native: false,
            fail_registry: false,
            fail_blueprint: false,
            fail_metadata: false,
            fail_index: false,
            fail_streaming: false,
            vanish_on_find: None,
            native_calls: Cell::new(0),
        }
    }

    pub fn failing_lookups(scene: Scene) -> Self {
        Self { fail_native: true, fail_registry: true, fail_blueprint: true, ..Self::new(scene) }
    }
}

impl SceneHost for FaultyHost {
    fn world_name(&self) -> Option<String> {
        self.scene.world_name()
    }

    fn world_path(&self) -> Option<String> {
        self.scene.world_path()
    }

    fn streaming_levels(&self) -> Result<Vec<String>> {
        if self.fail_streaming {
            return Err(anyhow!("level streaming query crashed"));
        }
        self.scene.streaming_levels()
    }

    fn find_entity(&self, name: &str) -> Result<Option<EntityRef>> {
        if self.vanish_on_find.as_deref() == Some(name) {
            return Ok(None);
        }
        self.scene.find_entity(name)
    }

    fn list_entities(&self) -> Result<Vec<EntityRef>> {
        self.scene.list_entities()
    }

    fn spawn(&mut self, ty: &TypeHandle, location: DVec3, rotation: Rotator) -> Result<Option<EntityRef>> {
        self.scene.spawn(ty, location, rotation)
    }

    fn destroy(&mut self, entity: &EntityRef) -> Result<bool> {
        self.scene.destroy(entity)
    }

    fn transform(&self, entity: &EntityRef) -> Result<Transform> {
        self.scene.transform(entity)
    }

    fn entity_details(&self, entity: &EntityRef) -> Result<EntityDetails> {
        self.scene.entity_details(entity)
    }

    fn set_location(&mut self, entity: &EntityRef, location: DVec3) -> Result<()> {
        self.scene.set_location(entity, location)
    }

    fn set_rotation(&mut self, entity: &EntityRef, rotation: Rotator) -> Result<()> {
        self.scene.set_rotation(entity, rotation)
    }

    fn set_scale(&mut self, entity: &EntityRef, scale: DVec3) -> Result<()> {
        self.scene.set_scale(entity, scale)
    }

    fn set_label(&mut self, entity: &EntityRef, label: &str) -> Result<()> {
        self.scene.set_label(entity, label)
    }

    fn property(&self, entity: &EntityRef, name: &str) -> Result<Option<Value>> {
        self.scene.property(entity, name)
    }

    fn set_property(&mut self, entity: &EntityRef, name: &str, value: &Value) -> Result<PropertyWrite> {
        self.scene.set_property(entity, name, value)
    }

    fn set_mesh(&mut self, entity: &EntityRef, mesh: &AssetHandle) -> Result<bool> {
        self.scene.set_mesh(entity, mesh)
    }

    fn set_material(&mut self, entity: &EntityRef, slot: usize, material: &AssetHandle) -> Result<bool> {
        self.scene.set_material(entity, slot, material)
    }

    fn load_asset(&self, path: &str) -> Result<Option<AssetHandle>> {
        self.scene.load_asset(path)
    }

    fn asset_exists(&self, path: &str) -> Result<bool> {
        self.scene.asset_exists(path)
    }

    fn asset_index(&self) -> Result<Vec<AssetRecord>> {
        if self.fail_index {
            return Err(anyhow!("asset registry unavailable"));
        }
        self.scene.asset_index()
    }

    fn asset_metadata(&self, path: &str) -> Result<Option<AssetMetadata>> {
        if self.fail_metadata {
            return Err(anyhow!("metadata query crashed"));
        }
        self.scene.asset_metadata(path)
    }

    fn list_assets(&self, root: &str, recursive: bool) -> Result<Vec<String>> {
        if self.fail_index {
            return Err(anyhow!("asset registry unavailable"));
        }
        self.scene.list_assets(root, recursive)
    }

    fn asset_referencers(&self, path: &str) -> Result<Option<Vec<AssetRecord>>> {
        if self.fail_index {
            return Err(anyhow!("asset registry unavailable"));
        }
        self.scene.asset_referencers(path)
    }

    fn load_native_type(&self, path: &str) -> Result<Option<TypeHandle>> {
        self.native_calls.set(self.native_calls.get() + 1);
        if self.fail_native {
            return Err(anyhow!("native load exploded"));
        }
        self.scene.load_native_type(path)
    }

    fn find_type(&self, name: &str) -> Result<Option<TypeHandle>> {
        if self.fail_registry {
            return Err(anyhow!("registry scan exploded"));
        }
        self.scene.find_type(name)
    }

    fn load_blueprint_type(&self, path: &str) -> Result<Option<TypeHandle>> {
        if self.fail_blueprint {
            return Err(anyhow!("blueprint load exploded"));
        }
        self.scene.load_blueprint_type(path)
    }
}
