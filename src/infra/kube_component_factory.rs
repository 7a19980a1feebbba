use kube::config::{KubeConfigOptions, Kubeconfig};
use tracing::info;

use crate::app::{ComponentFactory, ComponentFactoryError, PagedSource};
use crate::domain::workload::Workload;

use super::kube_pod_source::KubePodSource;

/// Creates one kube client per context from an already loaded kubeconfig.
///
/// TLS verification follows the kubeconfig of each cluster.
#[derive(Clone, Debug)]
pub struct KubeComponentFactory {
    kubeconfig: Kubeconfig,
}

impl KubeComponentFactory {
    pub fn new(kubeconfig: Kubeconfig) -> Self {
        Self { kubeconfig }
    }

    pub fn has_context(&self, context: &str) -> bool {
        self.kubeconfig
            .contexts
            .iter()
            .any(|named| named.name == context)
    }

    async fn client_for(&self, context: &str) -> Result<kube::Client, ComponentFactoryError> {
        if !self.has_context(context) {
            return Err(ComponentFactoryError::UnknownContext(context.to_string()));
        }

        info!("creating API client for context: {context}");
        let options = KubeConfigOptions {
            context: Some(context.to_string()),
            ..Default::default()
        };
        let config = kube::Config::from_custom_kubeconfig(self.kubeconfig.clone(), &options)
            .await
            .map_err(|e| ComponentFactoryError::InvalidClientConfig {
                context: context.to_string(),
                reason: e.to_string(),
            })?;

        kube::Client::try_from(config).map_err(|e| ComponentFactoryError::ClientCreation {
            context: context.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl ComponentFactory for KubeComponentFactory {
    async fn workload_source(
        &self,
        target: &str,
    ) -> Result<Box<dyn PagedSource<Workload>>, ComponentFactoryError> {
        let client = self.client_for(target).await?;
        Ok(Box::new(KubePodSource::new(client)))
    }
}
