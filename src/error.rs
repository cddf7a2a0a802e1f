use thiserror::Error;

pub type ProvisionResult<T> = std::result::Result<T, ProvisionError>;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("No world loaded")]
    NoWorld,

    #[error("Could not find class: {0}")]
    TypeNotFound(String),

    #[error("Failed to spawn actor")]
    SpawnFailed(String),

    #[error("Actor not found: {0}")]
    EntityNotFound(String),

    #[error("Failed to delete actor: {0}")]
    DestroyFailed(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to {operation}: {source:#}")]
    Host {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ProvisionError {
    pub fn host(operation: &'static str, source: anyhow::Error) -> Self {
        ProvisionError::Host { operation, source }
    }
}

pub(crate) trait HostContext<T> {
    fn during(self, operation: &'static str) -> ProvisionResult<T>;
}

impl<T> HostContext<T> for anyhow::Result<T> {
    fn during(self, operation: &'static str) -> ProvisionResult<T> {
        self.map_err(|source| ProvisionError::host(operation, source))
    }
}
