use anyhow::Result;
use serde::Serialize;

use crate::config::DecorationConfig;
use crate::host::{EntityRef, SceneHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Sphere,
    Cylinder,
    Cone,
    Plane,
    Cube,
}

impl Primitive {
    /// Picks a shape from substrings of `name`, first match wins; cube otherwise.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("sphere") || lower.contains("ball") {
            Primitive::Sphere
        } else if lower.contains("cylinder") {
            Primitive::Cylinder
        } else if lower.contains("cone") {
            Primitive::Cone
        } else if lower.contains("plane") {
            Primitive::Plane
        } else {
            Primitive::Cube
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Primitive::Sphere => "Sphere",
            Primitive::Cylinder => "Cylinder",
            Primitive::Cone => "Cone",
            Primitive::Plane => "Plane",
            Primitive::Cube => "Cube",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decoration {
    pub primitive: Primitive,
    pub mesh_bound: bool,
    pub material_bound: bool,
}

#[derive(Debug, Clone)]
pub struct DecorationRule {
    shape_root: String,
    default_material: String,
}

impl Default for DecorationRule {
    fn default() -> Self {
        Self::from_config(&DecorationConfig::default())
    }
}

impl DecorationRule {
    pub fn from_config(config: &DecorationConfig) -> Self {
        Self {
            shape_root: config.shape_root.trim_end_matches('/').to_string(),
            default_material: config.default_material.clone(),
        }
    }

    pub fn shape_path(&self, primitive: Primitive) -> String {
        format!("{}/{}", self.shape_root, primitive.label())
    }

    pub fn default_material(&self) -> &str {
        &self.default_material
    }

    pub fn decorate(&self, host: &mut dyn SceneHost, entity: &EntityRef, name: &str) -> Decoration {
        let primitive = Primitive::from_name(name);
        let mesh_bound = self.bind_mesh(host, entity, &self.shape_path(primitive)).unwrap_or_else(|err| {
            log::debug!("[decoration] shape for '{}' not bound: {err:#}", entity.name);
            false
        });
        let material_bound = self.bind_material(host, entity).unwrap_or_else(|err| {
            log::debug!("[decoration] material for '{}' not bound: {err:#}", entity.name);
            false
        });
        Decoration { primitive, mesh_bound, material_bound }
    }

    fn bind_mesh(&self, host: &mut dyn SceneHost, entity: &EntityRef, path: &str) -> Result<bool> {
        match host.load_asset(path)? {
            Some(mesh) => host.set_mesh(entity, &mesh),
            None => Ok(false),
        }
    }

    fn bind_material(&self, host: &mut dyn SceneHost, entity: &EntityRef) -> Result<bool> {
        match host.load_asset(&self.default_material)? {
            Some(material) => host.set_material(entity, 0, &material),
            None => Ok(false),
        }
    }
}
