mod common;

use common::{FaultyHost, FIXTURE_SCENE};
use scene_provision::assets::{self, Referencer};
use scene_provision::scene::{Scene, SceneAsset};

fn fixture() -> Scene {
    Scene::load_from_path(FIXTURE_SCENE).expect("fixture scene should load")
}

#[test]
fn listing_the_game_root_covers_every_project_asset() {
    let scene = fixture();
    let listing = assets::list_assets(&scene, assets::DEFAULT_LIST_ROOT, true).expect("list assets");
    assert_eq!(listing.total_assets, 11);
    assert!(listing.assets.iter().all(|path| path.starts_with("/Game/")));
    assert!(listing.assets.contains(&"/Game/Input/Actions/IA_Jump".to_string()));

    let flat = assets::list_assets(&scene, "/Game/Input", false).expect("list assets");
    assert_eq!(flat.assets, vec!["/Game/Input/IMC_Default".to_string()]);
    assert!(!flat.recursive);
}

#[test]
fn referencers_report_object_path_and_class() {
    let scene = fixture();
    let references = assets::asset_references(&scene, "/Game/UI/Icons/T_HeroIcon").expect("references");
    assert_eq!(references.total_referencers, 2);
    assert_eq!(
        references.referencers,
        vec![
            Referencer { name: "/Game/Characters/Heroes/B_Hero_Default".into(), class: "Character".into() },
            Referencer { name: "/Game/Characters/Heroes/HeroShooter".into(), class: "Character".into() },
        ]
    );

    let unused = assets::asset_references(&scene, "/Game/Maps/L_Expanse").expect("references");
    assert_eq!(unused.total_referencers, 0);
}

#[test]
fn references_of_unknown_assets_are_not_found() {
    let err = assets::asset_references(&fixture(), "/Game/Nope").unwrap_err();
    assert_eq!(err.to_string(), "Asset not found: /Game/Nope");
}

#[test]
fn registry_failures_name_the_operation() {
    let mut host = FaultyHost::new(fixture());
    host.fail_index = true;
    let err = assets::list_assets(&host, "/Game", true).unwrap_err();
    assert_eq!(err.to_string(), "Failed to list assets: asset registry unavailable");
    let err = assets::asset_references(&host, "/Game/Environment/M_Rock").unwrap_err();
    assert_eq!(err.to_string(), "Failed to get asset references: asset registry unavailable");
}

#[test]
fn references_added_in_code_are_visible() {
    let mut scene = Scene::with_world("Refs");
    scene
        .add_asset(SceneAsset::new("/Game/Materials", "M_Stone", "Material"))
        .add_asset(SceneAsset::new("/Game/Meshes", "SM_Wall", "StaticMesh").referencing("/Game/Materials/M_Stone"));
    let references = assets::asset_references(&scene, "/Game/Materials/M_Stone").expect("references");
    assert_eq!(references.referencers[0].name, "/Game/Meshes/SM_Wall");
}
