pub mod catalog;
pub mod info;
pub mod list;
pub mod references;
pub mod search;
pub mod validate;

pub use catalog::{summarize_catalog, CatalogSummary};
pub use info::{describe, AssetInfo};
pub use list::{list_assets, AssetListing, DEFAULT_LIST_ROOT};
pub use references::{asset_references, AssetReferences, Referencer};
pub use search::{search, Relevance, SearchHit, SearchResult};
pub use validate::{validate, InvalidAsset, ValidAsset, ValidationOutcome, ValidationReport, ValidationSummary};
