use std::fmt;

use crate::decoration::Primitive;

#[derive(Debug, Clone, PartialEq)]
pub enum ProvisionEvent {
    TypeResolved { identifier: String, type_name: String, strategy: &'static str },
    EntitySpawned { name: String, label: String, type_name: String },
    EntityDecorated { name: String, primitive: Primitive, mesh_bound: bool, material_bound: bool },
    PropertyApplied { entity: String, property: String },
    PropertySkipped { entity: String, property: String, reason: String },
    EntityUpdated { name: String },
    EntityDestroyed { name: String, label: String },
}

impl ProvisionEvent {
    pub fn is_skip(&self) -> bool {
        matches!(self, ProvisionEvent::PropertySkipped { .. })
    }
}

impl fmt::Display for ProvisionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionEvent::TypeResolved { identifier, type_name, strategy } => {
                write!(f, "TypeResolved identifier={identifier} type={type_name} via={strategy}")
            }
            ProvisionEvent::EntitySpawned { name, label, type_name } => {
                write!(f, "EntitySpawned name={name} label={label} type={type_name}")
            }
            ProvisionEvent::EntityDecorated { name, primitive, mesh_bound, material_bound } => {
                write!(
                    f,
                    "EntityDecorated name={} primitive={} mesh={} material={}",
                    name,
                    primitive.label(),
                    mesh_bound,
                    material_bound
                )
            }
            ProvisionEvent::PropertyApplied { entity, property } => {
                write!(f, "PropertyApplied entity={entity} property={property}")
            }
            ProvisionEvent::PropertySkipped { entity, property, reason } => {
                write!(f, "PropertySkipped entity={entity} property={property} reason={reason}")
            }
            ProvisionEvent::EntityUpdated { name } => write!(f, "EntityUpdated name={name}"),
            ProvisionEvent::EntityDestroyed { name, label } => {
                write!(f, "EntityDestroyed name={name} label={label}")
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<ProvisionEvent>,
}

impl EventBus {
    pub fn push(&mut self, event: ProvisionEvent) {
        if event.is_skip() {
            log::warn!("[provision] {event}");
        } else {
            log::debug!("[provision] {event}");
        }
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = ProvisionEvent>) {
        for event in events {
            self.push(event);
        }
    }

    pub fn events(&self) -> &[ProvisionEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<ProvisionEvent> {
        self.events.drain(..).collect()
    }
}
