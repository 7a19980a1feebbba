use k8s_openapi::api::core::v1::{ContainerStatus, Pod};
use kube::Api;
use kube::api::ListParams;
use thiserror::Error;

use crate::app::{Page, PageRequest, PagedSource, SourceError};
use crate::domain::workload::{ReportedImage, Workload};

#[derive(Error, Debug)]
pub(in crate::infra) enum KubePodSourceError {
    #[error("{0}")]
    Kube(#[from] kube::Error),
}

impl From<KubePodSourceError> for SourceError {
    fn from(value: KubePodSourceError) -> Self {
        SourceError::Api(value.to_string())
    }
}

/// Lists the pods of every namespace of one cluster.
#[derive(Clone)]
pub struct KubePodSource {
    pods: Api<Pod>,
}

impl KubePodSource {
    pub fn new(client: kube::Client) -> Self {
        Self {
            pods: Api::all(client),
        }
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<Workload>, KubePodSourceError> {
        let mut params = ListParams::default();
        if let Some(limit) = request.limit {
            params = params.limit(limit);
        }
        if let Some(token) = request.continue_token.as_deref() {
            params = params.continue_token(token);
        }

        let pods = self.pods.list(&params).await?;

        Ok(Page {
            continue_token: pods.metadata.continue_,
            items: pods.items.into_iter().map(workload_from_pod).collect(),
        })
    }
}

#[async_trait::async_trait]
impl PagedSource<Workload> for KubePodSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<Workload>, SourceError> {
        match request.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.list(&request))
                .await
                .map_err(|_| SourceError::Timeout(timeout))?
                .map_err(SourceError::from),
            None => Ok(self.list(&request).await?),
        }
    }
}

fn workload_from_pod(pod: Pod) -> Workload {
    let status = pod.status.unwrap_or_default();

    Workload {
        name: pod.metadata.name,
        namespace: pod.metadata.namespace,
        container_statuses: reported_images(status.container_statuses),
        init_container_statuses: reported_images(status.init_container_statuses),
        ephemeral_container_statuses: reported_images(status.ephemeral_container_statuses),
        declared_images: pod
            .spec
            .map(|spec| {
                spec.containers
                    .into_iter()
                    .map(|container| container.image.unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn reported_images(statuses: Option<Vec<ContainerStatus>>) -> Vec<ReportedImage> {
    statuses
        .unwrap_or_default()
        .into_iter()
        .map(|status| ReportedImage::new(status.image, status.image_id))
        .collect()
}
