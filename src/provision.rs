use serde::{Deserialize, Serialize};

use crate::config::ProvisionConfig;
use crate::decoration::{Decoration, DecorationRule};
use crate::error::{HostContext, ProvisionError, ProvisionResult};
use crate::events::{EventBus, ProvisionEvent};
use crate::host::{EntityRef, SceneHost};
use crate::patch::{apply_patch, PatchReport, PropertyPatch};
use crate::resolver::TypeResolver;
use crate::response::Response;
use crate::transform::{Transform, TransformData, TransformPatch};

const CREATE: &str = "create object";
const UPDATE: &str = "update object";
const DELETE: &str = "delete object";
const LOOKUP: &str = "find actor";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateRequest {
    #[serde(alias = "object_class")]
    pub type_id: String,
    #[serde(default, alias = "object_name")]
    pub name: String,
    #[serde(flatten)]
    pub transform: TransformPatch,
    #[serde(default)]
    pub properties: Option<PropertyPatch>,
}

impl CreateRequest {
    pub fn new(type_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { type_id: type_id.into(), name: name.into(), ..Default::default() }
    }

    pub fn with_transform(mut self, transform: TransformPatch) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_properties(mut self, properties: PropertyPatch) -> Self {
        self.properties = Some(properties);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateRequest {
    #[serde(alias = "actor_name")]
    pub target: String,
    #[serde(flatten)]
    pub transform: TransformPatch,
    #[serde(default)]
    pub properties: Option<PropertyPatch>,
    #[serde(default)]
    pub new_name: Option<String>,
}

impl UpdateRequest {
    pub fn new(target: impl Into<String>) -> Self {
        Self { target: target.into(), ..Default::default() }
    }

    pub fn with_transform(mut self, transform: TransformPatch) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_properties(mut self, properties: PropertyPatch) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_new_name(mut self, new_name: impl Into<String>) -> Self {
        self.new_name = Some(new_name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    #[serde(rename = "actor_name")]
    pub name: String,
    #[serde(rename = "actor_label")]
    pub label: String,
    #[serde(rename = "class")]
    pub type_name: String,
    #[serde(flatten)]
    pub transform: TransformData,
}

impl EntitySnapshot {
    pub fn capture(host: &dyn SceneHost, entity: &EntityRef) -> anyhow::Result<Self> {
        let transform = host.transform(entity)?;
        Ok(Self {
            name: entity.name.clone(),
            label: entity.label.clone(),
            type_name: entity.type_name.clone(),
            transform: transform.into(),
        })
    }

    pub fn transform(&self) -> Transform {
        self.transform.clone().into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Created {
    #[serde(flatten)]
    pub snapshot: EntitySnapshot,
    #[serde(skip)]
    pub resolved_via: &'static str,
    #[serde(skip)]
    pub decoration: Option<Decoration>,
    #[serde(skip)]
    pub properties: Option<PatchReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Updated {
    #[serde(flatten)]
    pub snapshot: EntitySnapshot,
    #[serde(skip)]
    pub properties: Option<PatchReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Deleted {
    pub message: String,
    pub deleted_actor: EntitySnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteBatch {
    pub total_requested: usize,
    pub results: Vec<Response>,
}

impl DeleteBatch {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|result| result.is_success()).count()
    }
}

/// First entity whose internal name or label equals `key`, in host enumeration order.
pub fn locate(host: &dyn SceneHost, key: &str) -> ProvisionResult<EntityRef> {
    host.list_entities()
        .during(LOOKUP)?
        .into_iter()
        .find(|entity| entity.matches(key))
        .ok_or_else(|| ProvisionError::EntityNotFound(key.to_string()))
}

pub struct Provisioner {
    resolver: TypeResolver,
    decoration: DecorationRule,
    events: EventBus,
}

impl Default for Provisioner {
    fn default() -> Self {
        Self::new(TypeResolver::default(), DecorationRule::default())
    }
}

impl Provisioner {
    pub fn new(resolver: TypeResolver, decoration: DecorationRule) -> Self {
        Self { resolver, decoration, events: EventBus::default() }
    }

    pub fn from_config(config: &ProvisionConfig) -> Self {
        Self::new(
            TypeResolver::with_extra_aliases(&config.type_aliases),
            DecorationRule::from_config(&config.decoration),
        )
    }

    pub fn resolver(&self) -> &TypeResolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut TypeResolver {
        &mut self.resolver
    }

    pub fn events(&self) -> &[ProvisionEvent] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<ProvisionEvent> {
        self.events.drain()
    }

    pub fn create(&mut self, host: &mut dyn SceneHost, request: &CreateRequest) -> ProvisionResult<Created> {
        if !host.is_world_loaded() {
            return Err(ProvisionError::NoWorld);
        }
        let resolution = self.resolver.resolve(host, &request.type_id)?;
        self.events.push(ProvisionEvent::TypeResolved {
            identifier: request.type_id.clone(),
            type_name: resolution.handle.name().to_string(),
            strategy: resolution.strategy,
        });

        let placement = request.transform.resolve_for_spawn();
        let spawned = host.spawn(&resolution.handle, placement.location, placement.rotation).during(CREATE)?;
        let Some(mut entity) = spawned else {
            log::warn!("[provision] host declined to spawn {}", resolution.handle.path());
            return Err(ProvisionError::SpawnFailed(resolution.handle.name().to_string()));
        };
        if !request.name.is_empty() {
            host.set_label(&entity, &request.name).during(CREATE)?;
            entity.label = request.name.clone();
        }
        // Scale is not part of spawn-time placement on the host side.
        host.set_scale(&entity, placement.scale).during(CREATE)?;
        self.events.push(ProvisionEvent::EntitySpawned {
            name: entity.name.clone(),
            label: entity.label.clone(),
            type_name: entity.type_name.clone(),
        });

        let mut decoration = None;
        let mut properties = None;
        match &request.properties {
            None if entity.is_mesh_actor() => {
                let applied = self.decoration.decorate(host, &entity, &request.name);
                self.events.push(ProvisionEvent::EntityDecorated {
                    name: entity.name.clone(),
                    primitive: applied.primitive,
                    mesh_bound: applied.mesh_bound,
                    material_bound: applied.material_bound,
                });
                decoration = Some(applied);
            }
            None => {}
            Some(patch) => properties = Some(self.apply_properties(host, &entity, patch)),
        }

        let snapshot = EntitySnapshot::capture(host, &entity).during(CREATE)?;
        Ok(Created { snapshot, resolved_via: resolution.strategy, decoration, properties })
    }

    pub fn update(&mut self, host: &mut dyn SceneHost, request: &UpdateRequest) -> ProvisionResult<Updated> {
        if !host.is_world_loaded() {
            return Err(ProvisionError::NoWorld);
        }
        let mut entity = locate(host, &request.target)?;

        let patch = &request.transform;
        if !patch.is_empty() {
            let current = host.transform(&entity).during(UPDATE)?;
            let merged = patch.resolve_over(&current);
            if patch.location.is_some() {
                host.set_location(&entity, merged.location).during(UPDATE)?;
            }
            if patch.rotation.is_some() {
                host.set_rotation(&entity, merged.rotation).during(UPDATE)?;
            }
            if patch.scale.is_some() {
                host.set_scale(&entity, merged.scale).during(UPDATE)?;
            }
        }
        if let Some(new_name) = request.new_name.as_deref().filter(|name| !name.is_empty()) {
            host.set_label(&entity, new_name).during(UPDATE)?;
            entity.label = new_name.to_string();
        }
        let properties = request.properties.as_ref().map(|patch| self.apply_properties(host, &entity, patch));
        self.events.push(ProvisionEvent::EntityUpdated { name: entity.name.clone() });

        let snapshot = EntitySnapshot::capture(host, &entity).during(UPDATE)?;
        Ok(Updated { snapshot, properties })
    }

    pub fn delete(&mut self, host: &mut dyn SceneHost, target: &str) -> ProvisionResult<Deleted> {
        if !host.is_world_loaded() {
            return Err(ProvisionError::NoWorld);
        }
        let entity = locate(host, target)?;
        let snapshot = EntitySnapshot::capture(host, &entity).during(DELETE)?;

        // The entity may have gone away between lookup and destroy.
        let Some(live) = host.find_entity(&entity.name).during(DELETE)? else {
            return Err(ProvisionError::EntityNotFound(target.to_string()));
        };
        if !host.destroy(&live).during(DELETE)? {
            return Err(ProvisionError::DestroyFailed(target.to_string()));
        }
        self.events.push(ProvisionEvent::EntityDestroyed { name: live.name.clone(), label: live.label.clone() });
        Ok(Deleted { message: format!("Successfully deleted actor: {target}"), deleted_actor: snapshot })
    }

        pub fn delete_many(&mut self, host: &mut dyn SceneHost, targets: &[String]) -> DeleteBatch {
        let results = targets.iter().map(|target| Response::from_result(self.delete(host, target))).collect();
        DeleteBatch { total_requested: targets.len(), results }
    }

    fn apply_properties(
        &mut self,
        host: &mut dyn SceneHost,
        entity: &EntityRef,
        patch: &PropertyPatch,
    ) -> PatchReport {
        let report = apply_patch(host, entity, patch);
        self.events.extend(report.events(entity, patch));
        report
    }
}
