use serde::Deserialize;
use serde_json::Value;

use crate::assets;
use crate::config::ProvisionConfig;
use crate::error::ProvisionError;
use crate::host::SceneHost;
use crate::outliner;
use crate::provision::{CreateRequest, Provisioner, UpdateRequest};
use crate::response::Response;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DeleteTarget {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PathList {
    One(String),
    Many(Vec<String>),
}

impl PathList {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            PathList::One(path) => vec![path.clone()],
            PathList::Many(paths) => paths.clone(),
        }
    }
}

fn default_list_root() -> String {
    assets::DEFAULT_LIST_ROOT.to_string()
}

const fn default_recursive() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "verb", rename_all = "snake_case")]
pub enum Request {
    Create(CreateRequest),
    Update(UpdateRequest),
    Delete {
        #[serde(alias = "actor_names")]
        target: DeleteTarget,
    },
    Search {
        #[serde(alias = "search_term")]
        term: String,
        #[serde(default, alias = "asset_class")]
        class_filter: Option<String>,
    },
    Validate {
        #[serde(default, alias = "asset_paths")]
        paths: Option<PathList>,
    },
    AssetInfo {
        #[serde(alias = "asset_path")]
        path: String,
    },
    ListAssets {
        #[serde(default = "default_list_root", alias = "root_path")]
        root: String,
        #[serde(default = "default_recursive")]
        recursive: bool,
    },
    AssetReferences {
        #[serde(alias = "asset_path")]
        path: String,
    },
    Outliner,
    MapInfo,
    CatalogSummary,
}

impl Request {
    pub fn from_json(value: Value) -> Result<Self, ProvisionError> {
        serde_json::from_value(value).map_err(|err| ProvisionError::InvalidRequest(err.to_string()))
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Request::Create(_) => "create",
            Request::Update(_) => "update",
            Request::Delete { .. } => "delete",
            Request::Search { .. } => "search",
            Request::Validate { .. } => "validate",
            Request::AssetInfo { .. } => "asset_info",
            Request::ListAssets { .. } => "list_assets",
            Request::AssetReferences { .. } => "asset_references",
            Request::Outliner => "outliner",
            Request::MapInfo => "map_info",
            Request::CatalogSummary => "catalog_summary",
        }
    }
}

pub struct Dispatcher {
    config: ProvisionConfig,
    provisioner: Provisioner,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(ProvisionConfig::default())
    }
}

impl Dispatcher {
    pub fn new(config: ProvisionConfig) -> Self {
        let provisioner = Provisioner::from_config(&config);
        Self { config, provisioner }
    }

    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    pub fn provisioner(&self) -> &Provisioner {
        &self.provisioner
    }

    pub fn provisioner_mut(&mut self) -> &mut Provisioner {
        &mut self.provisioner
    }

    pub fn dispatch_json(&mut self, host: &mut dyn SceneHost, raw: Value) -> Response {
        match Request::from_json(raw) {
            Ok(request) => self.dispatch(host, &request),
            Err(err) => Response::from(err),
        }
    }

    /// Provisioner events only describe the most recent call; drain them before dispatching again.
    pub fn dispatch(&mut self, host: &mut dyn SceneHost, request: &Request) -> Response {
        log::debug!("[dispatch] {}", request.verb());
        let stale = self.provisioner.drain_events().len();
        if stale > 0 {
            log::debug!("[dispatch] discarding {stale} undrained events");
        }
        match request {
            Request::Create(create) => Response::from_result(self.provisioner.create(host, create)),
            Request::Update(update) => Response::from_result(self.provisioner.update(host, update)),
            Request::Delete { target: DeleteTarget::One(target) } => {
                Response::from_result(self.provisioner.delete(host, target))
            }
            Request::Delete { target: DeleteTarget::Many(targets) } => {
                Response::ok(&self.provisioner.delete_many(host, targets))
            }
            Request::Search { term, class_filter } => Response::from_result(assets::search(
                host,
                term,
                class_filter.as_deref(),
                self.config.search.result_limit,
            )),
            Request::Validate { paths } => {
                let paths = paths.as_ref().map(PathList::to_vec);
                Response::from_result(assets::validate(
                    host,
                    paths.as_deref(),
                    self.config.validation.default_sample,
                ))
            }
            Request::AssetInfo { path } => Response::from_result(assets::describe(host, path)),
            Request::ListAssets { root, recursive } => {
                Response::from_result(assets::list_assets(host, root, *recursive))
            }
            Request::AssetReferences { path } => Response::from_result(assets::asset_references(host, path)),
            Request::Outliner => Response::from_result(outliner::outliner(host)),
            Request::MapInfo => {
                Response::from_result(outliner::map_info(host, self.config.outliner.actor_type_limit))
            }
            Request::CatalogSummary => Response::from_result(assets::summarize_catalog(host)),
        }
    }
}
