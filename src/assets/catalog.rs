use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{HostContext, ProvisionResult};
use crate::host::{AssetRecord, SceneHost};

const LOCATION_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    InputAction,
    InputMapping,
    GameMode,
    Character,
    Experience,
    Weapon,
    Map,
}

impl AssetCategory {
    pub fn classify(record: &AssetRecord) -> Option<Self> {
        let name = record.name.as_str();
        let lower = name.to_lowercase();
        if name.starts_with("IA_") {
            Some(AssetCategory::InputAction)
        } else if name.starts_with("IMC_") {
            Some(AssetCategory::InputMapping)
        } else if lower.contains("gamemode") {
            Some(AssetCategory::GameMode)
        } else if (lower.contains("hero") || lower.contains("character")) && lower.contains("b_") {
            Some(AssetCategory::Character)
        } else if lower.contains("experience") && !record.package_path.to_lowercase().contains("ui") {
            Some(AssetCategory::Experience)
        } else if lower.contains("weapon") || lower.contains("wid_") {
            Some(AssetCategory::Weapon)
        } else if name.starts_with("L_") {
            Some(AssetCategory::Map)
        } else {
            None
        }
    }

    fn sample_limit(self) -> usize {
        match self {
            AssetCategory::InputAction | AssetCategory::InputMapping | AssetCategory::Weapon | AssetCategory::Map => 10,
            AssetCategory::GameMode | AssetCategory::Character | AssetCategory::Experience => 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorySample {
    pub count: usize,
    pub samples: Vec<String>,
}

impl CategorySample {
    fn record(&mut self, path: String, limit: usize) {
        self.count += 1;
        if self.samples.len() < limit {
            self.samples.push(path);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub total_assets: usize,
    pub asset_locations: Map<String, Value>,
    pub input_actions: CategorySample,
    pub input_mappings: CategorySample,
    pub game_modes: CategorySample,
    pub characters: CategorySample,
    pub experiences: CategorySample,
    pub weapons: CategorySample,
    pub maps: CategorySample,
}

impl CatalogSummary {
    fn bucket(&mut self, category: AssetCategory) -> &mut CategorySample {
        match category {
            AssetCategory::InputAction => &mut self.input_actions,
            AssetCategory::InputMapping => &mut self.input_mappings,
            AssetCategory::GameMode => &mut self.game_modes,
            AssetCategory::Character => &mut self.characters,
            AssetCategory::Experience => &mut self.experiences,
            AssetCategory::Weapon => &mut self.weapons,
            AssetCategory::Map => &mut self.maps,
        }
    }
}

pub fn summarize_catalog(host: &dyn SceneHost) -> ProvisionResult<CatalogSummary> {
    let index = host.asset_index().during("summarize asset catalog")?;
    Ok(summarize_records(&index))
}

pub(crate) fn summarize_records(index: &[AssetRecord]) -> CatalogSummary {
    let mut summary = CatalogSummary { total_assets: index.len(), ..Default::default() };
    let mut locations: Vec<(String, usize)> = Vec::new();
    for record in index {
        let location = package_root(&record.package_path);
        match locations.iter_mut().find(|(name, _)| name == location) {
            Some((_, count)) => *count += 1,
            None => locations.push((location.to_string(), 1)),
        }
        if let Some(category) = AssetCategory::classify(record) {
            summary.bucket(category).record(record.object_path(), category.sample_limit());
        }
    }
    locations.sort_by(|a, b| b.1.cmp(&a.1));
    summary.asset_locations =
        locations.into_iter().take(LOCATION_LIMIT).map(|(name, count)| (name, Value::from(count))).collect();
    summary
}

/// "/Game/Characters/Hero" -> "Game"; paths without a separator land under "Root".
fn package_root(package_path: &str) -> &str {
    if !package_path.contains('/') {
        return "Root";
    }
    package_path.split('/').nth(1).unwrap_or("Root")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_follows_rule_order() {
        let classify = |name: &str, path: &str| AssetCategory::classify(&AssetRecord::new(name, path, "Blueprint"));
        assert_eq!(classify("IA_Jump", "/Game/Input"), Some(AssetCategory::InputAction));
        assert_eq!(classify("IMC_Default", "/Game/Input"), Some(AssetCategory::InputMapping));
        assert_eq!(classify("B_GameMode_Weapon", "/Game/Modes"), Some(AssetCategory::GameMode));
        assert_eq!(classify("B_Hero_Default", "/Game/Characters"), Some(AssetCategory::Character));
        assert_eq!(classify("B_Experience", "/Game/UI/Menus"), None);
        assert_eq!(classify("WID_Pistol", "/Game/Weapons"), Some(AssetCategory::Weapon));
        assert_eq!(classify("L_Expanse", "/Game/Maps"), Some(AssetCategory::Map));
    }

    #[test]
    fn locations_are_ranked_by_count() {
        let index = vec![
            AssetRecord::new("A", "/Engine/BasicShapes", "StaticMesh"),
            AssetRecord::new("B", "/Game/Env", "StaticMesh"),
            AssetRecord::new("C", "/Game/Env", "StaticMesh"),
        ];
        let summary = summarize_records(&index);
        let keys: Vec<&String> = summary.asset_locations.keys().collect();
        assert_eq!(keys, vec!["Game", "Engine"]);
        assert_eq!(summary.total_assets, 3);
    }
}
