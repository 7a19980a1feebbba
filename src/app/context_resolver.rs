use std::path::{Path, PathBuf};

use thiserror::Error;

use super::component_factory::ComponentFactory;

/// Configuration source for the targets together with their names.
pub struct ResolvedContexts<F> {
    pub component_factory: F,
    pub context_names: Vec<String>,
}

pub trait ContextResolver {
    type Factory: ComponentFactory + 'static;

    fn resolve(
        &self,
        explicit_path: Option<&Path>,
    ) -> Result<ResolvedContexts<Self::Factory>, ContextResolutionError>;
}

#[derive(Error, Debug)]
pub enum ContextResolutionError {
    #[error("no kubeconfig found")]
    NotFound,

    #[error("kubeconfig {0} does not exist")]
    MissingFile(PathBuf),

    #[error("unable to load kubeconfig {path}: {reason}")]
    InvalidKubeconfig { path: PathBuf, reason: String },
}

impl ContextResolutionError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound | Self::MissingFile(_))
    }
}
