use std::path::{Path, PathBuf};

use kube::config::Kubeconfig;
use tracing::info;

use crate::app::{ContextResolutionError, ContextResolver, ResolvedContexts};

use super::kube_component_factory::KubeComponentFactory;
use super::kubeconfig_locator::KubeconfigLocator;

/// Loads the kubeconfig files found by [`KubeconfigLocator`] and exposes
/// their contexts as scan targets.
#[derive(Clone, Copy, Debug, Default)]
pub struct KubeconfigContextResolver;

impl KubeconfigContextResolver {
    fn load(paths: &[PathBuf]) -> Result<Kubeconfig, ContextResolutionError> {
        let mut merged: Option<Kubeconfig> = None;

        for path in paths {
            if !path.exists() {
                return Err(ContextResolutionError::MissingFile(path.clone()));
            }

            let kubeconfig =
                Kubeconfig::read_from(path).map_err(|e| invalid_kubeconfig(path, e))?;
            merged = Some(match merged {
                Some(current) => current
                    .merge(kubeconfig)
                    .map_err(|e| invalid_kubeconfig(path, e))?,
                None => kubeconfig,
            });
        }

        merged.ok_or(ContextResolutionError::NotFound)
    }
}

impl ContextResolver for KubeconfigContextResolver {
    type Factory = KubeComponentFactory;

    fn resolve(
        &self,
        explicit_path: Option<&Path>,
    ) -> Result<ResolvedContexts<Self::Factory>, ContextResolutionError> {
        let paths = KubeconfigLocator::resolve(explicit_path);
        info!("loading kubeconfig from: {:?}", paths);

        let kubeconfig = Self::load(&paths)?;
        let context_names: Vec<String> = kubeconfig
            .contexts
            .iter()
            .map(|context| context.name.clone())
            .collect();
        info!(
            "found {} context(s): {:?}",
            context_names.len(),
            context_names
        );

        Ok(ResolvedContexts {
            component_factory: KubeComponentFactory::new(kubeconfig),
            context_names,
        })
    }
}

fn invalid_kubeconfig(path: &Path, error: impl std::fmt::Display) -> ContextResolutionError {
    ContextResolutionError::InvalidKubeconfig {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}
