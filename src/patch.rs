use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::events::ProvisionEvent;
use crate::host::{EntityRef, PropertyWrite, SceneHost};

pub type PropertyPatch = Map<String, Value>;

pub const STATIC_MESH_PROPERTY: &str = "StaticMesh";
pub const MATERIAL_PROPERTY: &str = "Material";
pub const MATERIALS_PROPERTY: &str = "Materials";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedProperty {
    pub property: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub attempted: usize,
    pub applied: usize,
    pub skipped: Vec<SkippedProperty>,
}

impl PatchReport {
    pub fn all_applied(&self) -> bool {
        self.applied == self.attempted
    }

    pub fn events(&self, entity: &EntityRef, patch: &PropertyPatch) -> Vec<ProvisionEvent> {
        let mut events = Vec::with_capacity(self.attempted);
        for name in patch.keys() {
            match self.skipped.iter().find(|skip| &skip.property == name) {
                Some(skip) => events.push(ProvisionEvent::PropertySkipped {
                    entity: entity.name.clone(),
                    property: name.clone(),
                    reason: skip.reason.clone(),
                }),
                None => events
                    .push(ProvisionEvent::PropertyApplied { entity: entity.name.clone(), property: name.clone() }),
            }
        }
        events
    }
}

pub fn apply_patch(host: &mut dyn SceneHost, entity: &EntityRef, patch: &PropertyPatch) -> PatchReport {
    let mut report = PatchReport::default();
    for (name, value) in patch {
        report.attempted += 1;
        match apply_property(host, entity, name, value) {
            Ok(()) => report.applied += 1,
            Err(err) => {
                report.skipped.push(SkippedProperty { property: name.clone(), reason: format!("{err:#}") })
            }
        }
    }
    report
}

fn apply_property(host: &mut dyn SceneHost, entity: &EntityRef, name: &str, value: &Value) -> Result<()> {
    if entity.is_mesh_actor() {
        match name {
            STATIC_MESH_PROPERTY => return bind_mesh(host, entity, value),
            MATERIAL_PROPERTY => return bind_material(host, entity, 0, value),
            MATERIALS_PROPERTY => {
                if let Value::Array(slots) = value {
                    return bind_materials(host, entity, slots);
                }
            }
            _ => {}
        }
    }
    match host.set_property(entity, name, value)? {
        PropertyWrite::Applied => Ok(()),
        PropertyWrite::Missing => bail!("'{}' has no settable field named '{name}'", entity.type_name),
    }
}

fn asset_path(value: &Value) -> Result<&str> {
    value.as_str().ok_or_else(|| anyhow!("expected an asset path string, got {value}"))
}

fn bind_mesh(host: &mut dyn SceneHost, entity: &EntityRef, value: &Value) -> Result<()> {
    let path = asset_path(value)?;
    let mesh = host.load_asset(path)?.ok_or_else(|| anyhow!("asset '{path}' could not be loaded"))?;
    if !host.set_mesh(entity, &mesh)? {
        bail!("entity has no mesh component");
    }
    Ok(())
}

fn bind_material(host: &mut dyn SceneHost, entity: &EntityRef, slot: usize, value: &Value) -> Result<()> {
    let path = asset_path(value)?;
    let material = host.load_asset(path)?.ok_or_else(|| anyhow!("asset '{path}' could not be loaded"))?;
    if !host.set_material(entity, slot, &material)? {
        bail!("entity has no mesh component");
    }
    Ok(())
}

/// Slot `i` takes element `i`. Null or empty entries and unloadable assets leave their slot alone.
fn bind_materials(host: &mut dyn SceneHost, entity: &EntityRef, slots: &[Value]) -> Result<()> {
    let mut bound = 0;
    for (slot, value) in slots.iter().enumerate() {
        let path = match value {
            Value::Null => continue,
            Value::String(path) if path.is_empty() => continue,
            other => asset_path(other)?,
        };
        let Some(material) = host.load_asset(path)? else {
            log::debug!("[patch] material slot {slot} of '{}' skipped: '{path}' not loadable", entity.name);
            continue;
        };
        if !host.set_material(entity, slot, &material)? {
            bail!("entity has no mesh component");
        }
        bound += 1;
    }
    if bound == 0 {
        bail!("no material slot could be bound");
    }
    Ok(())
}
