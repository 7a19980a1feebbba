use thiserror::Error;

use crate::domain::workload::Workload;

use super::workload_source::PagedSource;

/// Builds the clients scoped to one target.
#[async_trait::async_trait]
pub trait ComponentFactory: Send + Sync {
    async fn workload_source(
        &self,
        target: &str,
    ) -> Result<Box<dyn PagedSource<Workload>>, ComponentFactoryError>;
}

#[derive(Error, Debug)]
pub enum ComponentFactoryError {
    #[error("context {0:?} is not defined in the kubeconfig")]
    UnknownContext(String),

    #[error("unable to build the client configuration for context {context:?}: {reason}")]
    InvalidClientConfig { context: String, reason: String },

    #[error("unable to create the kubernetes client for context {context:?}: {reason}")]
    ClientCreation { context: String, reason: String },
}
