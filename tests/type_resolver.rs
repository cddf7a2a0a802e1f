mod common;

use common::{editor_scene, FaultyHost};
use scene_provision::error::ProvisionError;
use scene_provision::resolver::{AliasTable, TypeResolver};
use std::collections::BTreeMap;

#[test]
fn aliases_resolve_without_touching_the_host() {
    let host = FaultyHost::failing_lookups(editor_scene());
    let resolver = TypeResolver::default();
    for alias in AliasTable::builtin().aliases() {
        let resolution = resolver.resolve(&host, alias).expect("alias should resolve");
        assert_eq!(resolution.strategy, "alias");
    }
    let camera = resolver.resolve(&host, "Camera").expect("camera alias");
    assert_eq!(camera.handle.name(), "CameraActor");
    assert_eq!(camera.handle.path(), "/Script/Engine.CameraActor");
    assert_eq!(host.native_calls.get(), 0, "alias hits must not reach the host");
}

#[test]
fn unknown_identifier_is_not_found_even_when_strategies_error() {
    let host = FaultyHost::failing_lookups(editor_scene());
    let err = TypeResolver::default().resolve(&host, "NoSuchThing").unwrap_err();
    assert!(matches!(&err, ProvisionError::TypeNotFound(id) if id == "NoSuchThing"));
    assert_eq!(err.to_string(), "Could not find class: NoSuchThing");
}

#[test]
fn strategies_are_tried_in_order() {
    let host = FaultyHost::new(editor_scene());
    let resolver = TypeResolver::default();
    assert_eq!(resolver.strategy_names(), vec!["alias", "native", "registry", "blueprint"]);

    let native = resolver.resolve(&host, "/Script/Engine.TriggerBox").expect("native path");
    assert_eq!(native.strategy, "native");
    assert_eq!(native.handle.name(), "TriggerBox");

    let registry = resolver.resolve(&host, "TriggerBox").expect("registry name");
    assert_eq!(registry.strategy, "registry");

    let blueprint = resolver.resolve(&host, "/Game/Blueprints/BP_Door.BP_Door_C").expect("blueprint path");
    assert_eq!(blueprint.strategy, "blueprint");
    assert_eq!(blueprint.handle.name(), "BP_Door_C");
}

#[test]
fn failing_strategy_falls_through_to_the_next() {
    let mut host = FaultyHost::new(editor_scene());
    host.fail_native = true;
    let resolution = TypeResolver::default().resolve(&host, "TriggerBox").expect("registry fallback");
    assert_eq!(resolution.strategy, "registry");
    assert_eq!(host.native_calls.get(), 1);
}

#[test]
fn configured_aliases_extend_the_builtin_table() {
    let host = FaultyHost::failing_lookups(editor_scene());
    let mut extra = BTreeMap::new();
    extra.insert("Sun".to_string(), "DirectionalLight".to_string());
    let resolver = TypeResolver::with_extra_aliases(&extra);
    let sun = resolver.resolve(&host, "Sun").expect("configured alias");
    assert_eq!(sun.handle.name(), "DirectionalLight");
    assert!(resolver.resolve(&host, "PointLight").is_ok(), "builtin aliases survive");
}
