#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use kube_image_inventory::app::{
    ComponentFactory, ComponentFactoryError, ContextResolutionError, ContextResolver, Page,
    PageRequest, PagedSource, ResolvedContexts, SourceError,
};
use kube_image_inventory::domain::workload::{ReportedImage, Workload};

pub const SHA_A: &str = "sha256:aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const SHA_B: &str = "sha256:bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

pub fn running_pod(namespace: &str, image: &str, image_id: &str) -> Workload {
    Workload {
        name: Some(format!("{namespace}-pod")),
        namespace: Some(namespace.to_string()),
        container_statuses: vec![ReportedImage::new(image, image_id)],
        ..Default::default()
    }
}

pub fn pending_pod(namespace: &str, images: &[&str]) -> Workload {
    Workload {
        name: Some(format!("{namespace}-pending")),
        namespace: Some(namespace.to_string()),
        declared_images: images.iter().map(|image| image.to_string()).collect(),
        ..Default::default()
    }
}

/// How a fake cluster answers.
#[derive(Clone, Debug)]
pub enum ClusterBehaviour {
    /// Pages served in order, page `i > 0` is requested with token `T{i}`.
    Pages(Vec<Vec<Workload>>),
    /// Serves the pages, then fails when asked for the one after the last.
    FailAfterPages(Vec<Vec<Workload>>, String),
    /// Serves the pages forever, the last one pointing back to the first.
    Cycles(Vec<Vec<Workload>>),
    Forbidden(String),
    Panics,
}

/// Counts the list requests in flight across every fake cluster.
#[derive(Clone, Debug, Default)]
pub struct InFlightTracker {
    current: Arc<AtomicUsize>,
    max: Arc<AtomicUsize>,
    requests: Arc<AtomicUsize>,
}

impl InFlightTracker {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn max_in_flight(&self) -> usize {
        self.max.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

pub struct FakeClusterSource {
    behaviour: ClusterBehaviour,
    latency: Duration,
    tracker: InFlightTracker,
}

impl FakeClusterSource {
    fn page_index(request: &PageRequest) -> usize {
        request
            .continue_token
            .as_deref()
            .and_then(|token| token.strip_prefix('T'))
            .and_then(|index| index.parse().ok())
            .unwrap_or(0)
    }

    fn serve(pages: &[Vec<Workload>], index: usize) -> Page<Workload> {
        let next = index + 1;
        Page {
            items: pages.get(index).cloned().unwrap_or_default(),
            continue_token: (next < pages.len()).then(|| format!("T{next}")),
        }
    }
}

#[async_trait::async_trait]
impl PagedSource<Workload> for FakeClusterSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<Workload>, SourceError> {
        self.tracker.enter();
        tokio::time::sleep(self.latency).await;
        self.tracker.leave();

        let index = Self::page_index(&request);
        match &self.behaviour {
            ClusterBehaviour::Pages(pages) => Ok(Self::serve(pages, index)),
            ClusterBehaviour::FailAfterPages(pages, message) => {
                if index < pages.len() {
                    let mut page = Self::serve(pages, index);
                    page.continue_token = Some(format!("T{}", index + 1));
                    Ok(page)
                } else {
                    Err(SourceError::Api(message.clone()))
                }
            }
            ClusterBehaviour::Cycles(pages) => {
                let mut page = Self::serve(pages, index % pages.len().max(1));
                page.continue_token = Some(format!("T{}", (index + 1) % pages.len().max(1)));
                Ok(page)
            }
            ClusterBehaviour::Forbidden(message) => Err(SourceError::Api(message.clone())),
            ClusterBehaviour::Panics => panic!("malformed response"),
        }
    }
}

/// Component factory over in-memory clusters; unknown targets cannot get a
/// client.
#[derive(Clone, Debug, Default)]
pub struct FakeClusters {
    clusters: HashMap<String, ClusterBehaviour>,
    latency: Duration,
    pub tracker: InFlightTracker,
}

impl FakeClusters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, target: &str, behaviour: ClusterBehaviour) -> Self {
        self.clusters.insert(target.to_string(), behaviour);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Standalone source without latency, outside of any factory.
    pub fn source_for(behaviour: ClusterBehaviour) -> FakeClusterSource {
        FakeClusterSource {
            behaviour,
            latency: Duration::ZERO,
            tracker: InFlightTracker::default(),
        }
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.clusters.keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait::async_trait]
impl ComponentFactory for FakeClusters {
    async fn workload_source(
        &self,
        target: &str,
    ) -> Result<Box<dyn PagedSource<Workload>>, ComponentFactoryError> {
        let Some(behaviour) = self.clusters.get(target) else {
            return Err(ComponentFactoryError::UnknownContext(target.to_string()));
        };

        Ok(Box::new(FakeClusterSource {
            behaviour: behaviour.clone(),
            latency: self.latency,
            tracker: self.tracker.clone(),
        }))
    }
}

/// Resolver handing out [`FakeClusters`], or failing like a missing kubeconfig.
pub struct FakeResolver {
    pub clusters: Option<FakeClusters>,
}

impl ContextResolver for FakeResolver {
    type Factory = FakeClusters;

    fn resolve(
        &self,
        _explicit_path: Option<&Path>,
    ) -> Result<ResolvedContexts<FakeClusters>, ContextResolutionError> {
        let clusters = self
            .clusters
            .clone()
            .ok_or(ContextResolutionError::NotFound)?;

        Ok(ResolvedContexts {
            context_names: clusters.names(),
            component_factory: clusters,
        })
    }
}
