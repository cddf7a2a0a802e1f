use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{HostContext, ProvisionError, ProvisionResult};
use crate::host::{EntityRef, SceneHost};
use crate::provision::EntitySnapshot;

const LIGHTMASS_VOLUME_TYPE: &str = "LightmassImportanceVolume";
const COMPONENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineEntry {
    #[serde(flatten)]
    pub snapshot: EntitySnapshot,
    pub is_hidden: bool,
    pub folder_path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
}

impl OutlineEntry {
    fn capture(host: &dyn SceneHost, entity: &EntityRef) -> anyhow::Result<Self> {
        let snapshot = EntitySnapshot::capture(host, entity)?;
        let details = host.entity_details(entity)?;
        let mut components = details.components;
        components.truncate(COMPONENT_LIMIT);
        Ok(Self { snapshot, is_hidden: details.is_hidden, folder_path: details.folder_path, components })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldOutline {
    pub world_name: String,
    pub total_actors: usize,
    pub actors: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LightingSummary {
    pub has_lightmass_importance_volume: bool,
    pub directional_lights: usize,
    pub point_lights: usize,
    pub spot_lights: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapInfo {
    pub map_name: String,
    pub map_path: String,
    pub total_actors: usize,
    pub actor_types: Map<String, Value>,
    pub lighting: LightingSummary,
    pub streaming_levels: usize,
    pub streaming_level_names: Vec<String>,
}

/// Entities the host cannot describe are left out of `actors` but still counted in `total_actors`.
pub fn outliner(host: &dyn SceneHost) -> ProvisionResult<WorldOutline> {
    let world_name = host.world_name().ok_or(ProvisionError::NoWorld)?;
    let entities = host.list_entities().during("list actors")?;
    let total_actors = entities.len();
    let mut actors: Vec<OutlineEntry> = entities
        .iter()
        .filter_map(|entity| match OutlineEntry::capture(host, entity) {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::debug!("[outliner] skipping '{}': {err:#}", entity.name);
                None
            }
        })
        .collect();
    actors.sort_by(|a, b| a.snapshot.name.cmp(&b.snapshot.name));
    Ok(WorldOutline { world_name, total_actors, actors })
}

/// Histogram ties keep first-seen order.
pub fn map_info(host: &dyn SceneHost, type_limit: usize) -> ProvisionResult<MapInfo> {
    let map_name = host.world_name().ok_or(ProvisionError::NoWorld)?;
    let entities = host.list_entities().during("read map info")?;

    let mut histogram: Vec<(String, usize)> = Vec::new();
    let mut lighting = LightingSummary::default();
    for entity in &entities {
        match histogram.iter_mut().find(|(type_name, _)| type_name == &entity.type_name) {
            Some((_, count)) => *count += 1,
            None => histogram.push((entity.type_name.clone(), 1)),
        }
        match entity.type_name.as_str() {
            "DirectionalLight" => lighting.directional_lights += 1,
            "PointLight" => lighting.point_lights += 1,
            "SpotLight" => lighting.spot_lights += 1,
            LIGHTMASS_VOLUME_TYPE => lighting.has_lightmass_importance_volume = true,
            _ => {}
        }
    }
    histogram.sort_by(|a, b| b.1.cmp(&a.1));
    let actor_types =
        histogram.into_iter().take(type_limit).map(|(type_name, count)| (type_name, Value::from(count))).collect();

    let streaming_level_names = host.streaming_levels().unwrap_or_else(|err| {
        log::warn!("[map_info] streaming levels unavailable: {err:#}");
        Vec::new()
    });
    let map_path = host.world_path().unwrap_or_else(|| map_name.clone());

    Ok(MapInfo {
        map_name,
        map_path,
        total_actors: entities.len(),
        actor_types,
        lighting,
        streaming_levels: streaming_level_names.len(),
        streaming_level_names,
    })
}
