pub mod assets;
pub mod cli;
pub mod config;
pub mod decoration;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod host;
pub mod outliner;
pub mod patch;
pub mod provision;
pub mod resolver;
pub mod response;
pub mod scene;
pub mod transform;

pub use config::ProvisionConfig;
pub use dispatch::{Dispatcher, Request};
pub use error::{ProvisionError, ProvisionResult};
pub use host::{EntityRef, SceneHost, TypeHandle};
pub use provision::Provisioner;
pub use response::Response;
pub use scene::Scene;
