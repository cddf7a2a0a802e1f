use std::collections::BTreeMap;

use anyhow::Result;

use crate::error::{ProvisionError, ProvisionResult};
use crate::host::{SceneHost, TypeHandle};

const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("StaticMeshActor", "StaticMeshActor"),
    ("SkeletalMeshActor", "SkeletalMeshActor"),
    ("DirectionalLight", "DirectionalLight"),
    ("PointLight", "PointLight"),
    ("SpotLight", "SpotLight"),
    ("Camera", "CameraActor"),
    ("CameraActor", "CameraActor"),
    ("Pawn", "Pawn"),
    ("Character", "Character"),
    ("PlayerStart", "PlayerStart"),
];

pub trait ResolveStrategy {
    fn name(&self) -> &'static str;

    fn try_resolve(&self, host: &dyn SceneHost, identifier: &str) -> Result<Option<TypeHandle>>;
}

#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: BTreeMap<String, TypeHandle>,
}

impl AliasTable {
    pub fn builtin() -> Self {
        let entries = BUILTIN_ALIASES
            .iter()
            .map(|(alias, type_name)| (alias.to_string(), TypeHandle::builtin(type_name)))
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, alias: impl Into<String>, handle: TypeHandle) {
        self.entries.insert(alias.into(), handle);
    }

    pub fn get(&self, alias: &str) -> Option<&TypeHandle> {
        self.entries.get(alias)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl ResolveStrategy for AliasTable {
    fn name(&self) -> &'static str {
        "alias"
    }

    fn try_resolve(&self, _host: &dyn SceneHost, identifier: &str) -> Result<Option<TypeHandle>> {
        Ok(self.get(identifier).cloned())
    }
}

pub struct NativeTypeLoad;

impl ResolveStrategy for NativeTypeLoad {
    fn name(&self) -> &'static str {
        "native"
    }

    fn try_resolve(&self, host: &dyn SceneHost, identifier: &str) -> Result<Option<TypeHandle>> {
        host.load_native_type(identifier)
    }
}

pub struct RegistryLookup;

impl ResolveStrategy for RegistryLookup {
    fn name(&self) -> &'static str {
        "registry"
    }

    fn try_resolve(&self, host: &dyn SceneHost, identifier: &str) -> Result<Option<TypeHandle>> {
        host.find_type(identifier)
    }
}

pub struct BlueprintLoad;

impl ResolveStrategy for BlueprintLoad {
    fn name(&self) -> &'static str {
        "blueprint"
    }

    fn try_resolve(&self, host: &dyn SceneHost, identifier: &str) -> Result<Option<TypeHandle>> {
        host.load_blueprint_type(identifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub handle: TypeHandle,
    pub strategy: &'static str,
}

pub struct TypeResolver {
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self::with_aliases(AliasTable::builtin())
    }
}

impl TypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aliases(aliases: AliasTable) -> Self {
        Self::from_strategies(vec![
            Box::new(aliases),
            Box::new(NativeTypeLoad),
            Box::new(RegistryLookup),
            Box::new(BlueprintLoad),
        ])
    }

    pub fn with_extra_aliases(extra: &BTreeMap<String, String>) -> Self {
        let mut aliases = AliasTable::builtin();
        for (alias, type_name) in extra {
            aliases.insert(alias.clone(), TypeHandle::builtin(type_name));
        }
        Self::with_aliases(aliases)
    }

    pub fn from_strategies(strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn push_strategy(&mut self, strategy: Box<dyn ResolveStrategy>) {
        self.strategies.push(strategy);
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }

    pub fn resolve(&self, host: &dyn SceneHost, identifier: &str) -> ProvisionResult<Resolution> {
        for strategy in &self.strategies {
            match strategy.try_resolve(host, identifier) {
                Ok(Some(handle)) => return Ok(Resolution { handle, strategy: strategy.name() }),
                Ok(None) => {}
                Err(err) => {
                    log::debug!("[resolver] {} lookup of '{identifier}' failed: {err:#}", strategy.name());
                }
            }
        }
        Err(ProvisionError::TypeNotFound(identifier.to_string()))
    }
}
