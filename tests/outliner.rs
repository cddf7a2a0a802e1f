mod common;

use common::{FaultyHost, FIXTURE_SCENE};
use scene_provision::outliner::{map_info, outliner};
use scene_provision::provision::{locate, Provisioner, UpdateRequest};
use scene_provision::scene::Scene;
use serde_json::json;

fn fixture() -> Scene {
    Scene::load_from_path(FIXTURE_SCENE).expect("fixture scene should load")
}

#[test]
fn outliner_lists_every_entity_sorted_by_name() {
    let scene = fixture();
    let outline = outliner(&scene).expect("outliner");
    assert_eq!(outline.world_name, "EditorLevel");
    assert_eq!(outline.total_actors, 6);
    let names: Vec<&str> = outline.actors.iter().map(|actor| actor.snapshot.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "DirectionalLight_0",
            "LightmassImportanceVolume_0",
            "PlayerStart_0",
            "PointLight_0",
            "PointLight_1",
            "StaticMeshActor_0",
        ]
    );
    let floor = outline.actors.last().expect("floor");
    assert_eq!(floor.snapshot.label, "Floor");
    assert_eq!(floor.snapshot.transform().scale.x, 10.0);
}

#[test]
fn outliner_entries_carry_editor_state() {
    let scene = fixture();
    let outline = outliner(&scene).expect("outliner");
    let entry = |name: &str| {
        outline.actors.iter().find(|actor| actor.snapshot.name == name).expect("entity in outline").clone()
    };

    let floor = entry("StaticMeshActor_0");
    assert!(!floor.is_hidden);
    assert_eq!(floor.folder_path.as_deref(), Some("Environment/Ground"));
    assert_eq!(floor.components, vec!["StaticMeshComponent".to_string()]);

    let volume = entry("LightmassImportanceVolume_0");
    assert!(volume.is_hidden);
    assert_eq!(volume.components.len(), 5, "component names are capped");
    assert_eq!(volume.components[0], "BrushComponent");

    let start = entry("PlayerStart_0");
    assert_eq!(start.folder_path, None);
    assert_eq!(start.components, vec!["CapsuleComponent".to_string(), "ArrowComponent".to_string()]);

    let body = serde_json::to_value(&volume).expect("serialize entry");
    assert_eq!(body["actor_name"], json!("LightmassImportanceVolume_0"));
    assert_eq!(body["is_hidden"], json!(true));
    assert_eq!(body["folder_path"], json!("Lighting"));
}

#[test]
fn map_info_ranks_types_and_counts_lights() {
    let scene = fixture();
    let info = map_info(&scene, 15).expect("map info");
    assert_eq!(info.map_name, "EditorLevel");
    assert_eq!(info.total_actors, 6);
    let types: Vec<&str> = info.actor_types.keys().map(String::as_str).collect();
    assert_eq!(
        types,
        vec!["PointLight", "StaticMeshActor", "DirectionalLight", "LightmassImportanceVolume", "PlayerStart"]
    );
    assert_eq!(info.actor_types["PointLight"], json!(2));
    assert_eq!(info.lighting.point_lights, 2);
    assert_eq!(info.lighting.directional_lights, 1);
    assert_eq!(info.lighting.spot_lights, 0);
    assert!(info.lighting.has_lightmass_importance_volume);
    assert_eq!(info.map_path, "/Game/Maps/EditorLevel.EditorLevel");
    assert_eq!(info.streaming_levels, 2);
    assert_eq!(info.streaming_level_names, vec!["EditorLevel_Audio", "EditorLevel_Lighting"]);

    let trimmed = map_info(&scene, 2).expect("map info");
    assert_eq!(trimmed.actor_types.len(), 2);
    assert_eq!(trimmed.total_actors, 6);
}

#[test]
fn queries_without_a_world_fail() {
    let mut scene = fixture();
    scene.unload_world();
    assert_eq!(outliner(&scene).unwrap_err().to_string(), "No world loaded");
    assert_eq!(map_info(&scene, 15).unwrap_err().to_string(), "No world loaded");
}

#[test]
fn duplicate_labels_resolve_to_the_first_enumerated_entity() {
    let mut scene = fixture();
    let first = locate(&scene, "Lamp").expect("lamp");
    assert_eq!(first.name, "PointLight_1");

    let updated = Provisioner::default()
        .update(&mut scene, &UpdateRequest::new("Lamp").with_new_name("KeyLight"))
        .expect("update first lamp");
    assert_eq!(updated.snapshot.name, "PointLight_1");
    assert_eq!(locate(&scene, "Lamp").expect("second lamp").name, "PointLight_0");
}

#[test]
fn map_info_tolerates_missing_streaming_data() {
    let mut host = FaultyHost::new(Scene::with_world("Scratch"));
    host.fail_streaming = true;
    let info = map_info(&host, 15).expect("map info");
    assert_eq!(info.map_path, "/Temp/Scratch.Scratch");
    assert_eq!(info.streaming_levels, 0);
    assert!(info.streaming_level_names.is_empty());
}
