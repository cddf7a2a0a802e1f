mod common;

use common::{FaultyHost, FIXTURE_SCENE};
use scene_provision::assets::{self, Relevance};
use scene_provision::scene::{Scene, SceneAsset};

fn fixture() -> Scene {
    Scene::load_from_path(FIXTURE_SCENE).expect("fixture scene should load")
}

#[test]
fn class_filtered_search_orders_by_relevance() {
    let scene = fixture();
    let result = assets::search(&scene, "Hero", Some("Character"), 50).expect("search");

    let names: Vec<&str> = result.assets.iter().map(|hit| hit.record.name.as_str()).collect();
    assert_eq!(names, vec!["Hero", "HeroShooter", "B_Hero_Default"]);
    let tiers: Vec<Relevance> = result.assets.iter().map(|hit| hit.relevance).collect();
    assert_eq!(tiers, vec![Relevance::Exact, Relevance::Prefix, Relevance::Substring]);
    assert!(result.assets.iter().all(|hit| hit.record.class_name.to_lowercase().contains("character")));
    assert_eq!(result.total_matches, 3);
    assert_eq!(result.asset_class_filter.as_deref(), Some("Character"));
}

#[test]
fn search_without_filter_matches_paths_too() {
    let scene = fixture();
    let result = assets::search(&scene, "hero", None, 50).expect("search");
    assert!(result.assets.iter().any(|hit| hit.record.name == "T_HeroIcon"));
    assert_eq!(result.total_matches, 4);

    let empty_filter = assets::search(&scene, "hero", Some(""), 50).expect("search");
    assert_eq!(empty_filter.total_matches, 4, "empty filter means no filter");
    assert_eq!(empty_filter.asset_class_filter.as_deref(), Some(""));

    let unfiltered = assets::search(&scene, "hero", None, 50).expect("search");
    assert_eq!(unfiltered.asset_class_filter, None);
}

#[test]
fn results_never_exceed_the_limit() {
    let mut scene = Scene::with_world("Quarry");
    for index in 0..80 {
        scene.add_asset(SceneAsset::new("/Game/Environment/Rocks", format!("SM_Rock_{index:02}"), "StaticMesh"));
    }
    let result = assets::search(&scene, "rock", None, 50).expect("search");
    assert_eq!(result.assets.len(), 50);
    assert_eq!(result.total_matches, 80);
    assert_eq!(result.assets[0].record.name, "SM_Rock_00");
}

#[test]
fn index_failure_is_a_request_error() {
    let mut host = FaultyHost::new(fixture());
    host.fail_index = true;
    let err = assets::search(&host, "Hero", None, 50).unwrap_err();
    assert_eq!(err.to_string(), "Failed to search assets: asset registry unavailable");
}

#[test]
fn asset_info_combines_index_and_metadata() {
    let scene = fixture();
    let info = assets::describe(&scene, "/Engine/BasicShapes/Cube").expect("cube info");
    assert_eq!(info.name, "Cube");
    assert_eq!(info.class, "StaticMesh");
    assert_eq!(info.package_path, "/Engine/BasicShapes");
    assert!(info.is_loaded);
    assert_eq!(info.tags.get("AssetFileSize").map(String::as_str), Some("11264"));

    let missing = assets::describe(&scene, "/Game/Nope").unwrap_err();
    assert_eq!(missing.to_string(), "Asset not found: /Game/Nope");
}

#[test]
fn catalog_summary_buckets_project_assets() {
    let scene = fixture();
    let summary = assets::summarize_catalog(&scene).expect("catalog summary");
    assert_eq!(summary.total_assets, 17);
    assert_eq!(summary.input_actions.samples, vec!["/Game/Input/Actions/IA_Jump".to_string()]);
    assert_eq!(summary.input_mappings.count, 1);
    assert_eq!(summary.game_modes.count, 1);
    assert_eq!(summary.characters.samples, vec!["/Game/Characters/Heroes/B_Hero_Default".to_string()]);
    assert_eq!(summary.maps.count, 1);
    let top = summary.asset_locations.keys().next().map(String::as_str);
    assert_eq!(top, Some("Game"));
}
