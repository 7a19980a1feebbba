use std::sync::Arc;

use itertools::Itertools;
use thiserror::Error;
use tokio::sync::{Semaphore, watch};
use tracing::{debug, error, info};

use crate::domain::image_extractor::extract_images;
use crate::domain::namespace_aggregator::NamespaceAggregator;
use crate::domain::scan_report::{
    FailureKind, ScanOutcome, ScanPhase, ScanResult, TargetFailure,
};

use super::component_factory::{ComponentFactory, ComponentFactoryError};
use super::paginated_lister::list_all;
use super::scan_options::ScanOptions;
use super::workload_source::SourceError;

#[derive(Error, Debug)]
pub enum TargetScanError {
    #[error("Kubernetes API error: {source}")]
    Source {
        target: String,
        #[source]
        source: SourceError,
    },

    #[error("Unexpected error: {source}")]
    ClientUnavailable {
        target: String,
        #[source]
        source: ComponentFactoryError,
    },

    #[error("Unexpected error: {message}")]
    Unexpected { target: String, message: String },
}

impl TargetScanError {
    pub fn target(&self) -> &str {
        match self {
            TargetScanError::Source { target, .. }
            | TargetScanError::ClientUnavailable { target, .. }
            | TargetScanError::Unexpected { target, .. } => target,
        }
    }

    pub fn into_failure(self, phase: ScanPhase) -> TargetFailure {
        TargetFailure {
            target: self.target().to_string(),
            kind: self.kind(),
            phase,
            message: self.to_string(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            TargetScanError::Source { .. } => FailureKind::Api,
            TargetScanError::ClientUnavailable { .. } | TargetScanError::Unexpected { .. } => {
                FailureKind::Unexpected
            }
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScanError {
    #[error("the number of workers must be at least 1")]
    InvalidConcurrencyLimit,
}

/// Scans targets for the images running in them.
///
/// Each target is scanned in its own task with its own lister and aggregator;
/// a target that fails only lands in the failures of the outcome.
pub struct ScanOrchestrator<F> {
    component_factory: Arc<F>,
    options: ScanOptions,
}

impl<F> Clone for ScanOrchestrator<F> {
    fn clone(&self) -> Self {
        Self {
            component_factory: self.component_factory.clone(),
            options: self.options.clone(),
        }
    }
}

impl<F> ScanOrchestrator<F>
where
    F: ComponentFactory + 'static,
{
    pub fn new(component_factory: F, options: ScanOptions) -> Self {
        Self {
            component_factory: Arc::new(component_factory),
            options,
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub async fn scan_one_target(&self, target: &str) -> Result<ScanResult, TargetScanError> {
        let (phase, _) = watch::channel(ScanPhase::NotStarted);
        self.scan_tracked(target, &phase).await
    }

    /// Scans `target`, publishing every phase it enters on `phase`. On failure
    /// `phase` keeps the last phase reached, the terminal phase is only logged.
    async fn scan_tracked(
        &self,
        target: &str,
        phase: &watch::Sender<ScanPhase>,
    ) -> Result<ScanResult, TargetScanError> {
        enter_phase(target, phase, ScanPhase::NotStarted);
        let result = self.run_scan(target, phase).await;
        match &result {
            Ok(_) => enter_phase(target, phase, ScanPhase::Done),
            Err(_) => debug!(
                "[context={target}] scan phase -> {} (during {})",
                ScanPhase::Failed,
                *phase.borrow()
            ),
        }
        result
    }

    async fn run_scan(
        &self,
        target: &str,
        phase: &watch::Sender<ScanPhase>,
    ) -> Result<ScanResult, TargetScanError> {
        let source = self
            .component_factory
            .workload_source(target)
            .await
            .map_err(|source| TargetScanError::ClientUnavailable {
                target: target.to_string(),
                source,
            })?;

        enter_phase(target, phase, ScanPhase::Listing);
        info!("[context={target}] listing pods across all namespaces");
        let workloads = list_all(&*source, self.options.page_options())
            .await
            .map_err(|source| TargetScanError::Source {
                target: target.to_string(),
                source,
            })?;
        info!("[context={target}] retrieved {} pod(s)", workloads.len());

        enter_phase(target, phase, ScanPhase::Extracting);
        let extracted = workloads
            .iter()
            .map(|workload| (workload.namespace(), extract_images(workload)))
            .collect_vec();

        enter_phase(target, phase, ScanPhase::Aggregating);
        let mut aggregator = NamespaceAggregator::default();
        for (namespace, images) in extracted {
            aggregator.add(namespace, images);
        }
        let result = aggregator.finish();

        for (namespace, images) in result.namespaces() {
            info!(
                "[context={target}] namespace={namespace} -> {} unique image(s)",
                images.len()
            );
        }

        Ok(result)
    }

    /// Scans every target, at most `max_workers` at a time, and returns once
    /// all of them have either completed or failed.
    pub async fn scan_many_targets<I, S>(&self, targets: I) -> Result<ScanOutcome, ScanError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets: Vec<String> = targets.into_iter().map(Into::into).unique().collect();
        let workers = self
            .options
            .worker_count(targets.len())
            .ok_or(ScanError::InvalidConcurrencyLimit)?;

        let mut outcome = ScanOutcome::default();
        if targets.is_empty() {
            return Ok(outcome);
        }

        info!(
            "scanning {} context(s) with up to {} worker(s)",
            targets.len(),
            workers
        );

        let semaphore = Arc::new(Semaphore::new(workers));
        let mut phases = Vec::with_capacity(targets.len());
        let tasks = targets
            .iter()
            .map(|target| {
                let orchestrator = self.clone();
                let semaphore = semaphore.clone();
                let target = target.clone();
                let (phase, watcher) = watch::channel(ScanPhase::NotStarted);
                phases.push(watcher);
                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.map_err(|e| {
                        TargetScanError::Unexpected {
                            target: target.clone(),
                            message: e.to_string(),
                        }
                    })?;
                    orchestrator.scan_tracked(&target, &phase).await
                })
            })
            .collect_vec();

        let joined = futures::future::join_all(tasks).await;

        for ((target, task_result), watcher) in targets.into_iter().zip(joined).zip(phases) {
            let scan_result = task_result.unwrap_or_else(|join_error| {
                Err(TargetScanError::Unexpected {
                    target: target.clone(),
                    message: format!("scan task did not complete: {join_error}"),
                })
            });

            match scan_result {
                Ok(result) => outcome.record_success(target, result),
                Err(scan_error) => {
                    let phase = *watcher.borrow();
                    error!("[context={target}] {scan_error} (during {phase})");
                    outcome.record_failure(scan_error.into_failure(phase));
                }
            }
        }

        Ok(outcome)
    }
}

fn enter_phase(target: &str, phase: &watch::Sender<ScanPhase>, next: ScanPhase) {
    debug!("[context={target}] scan phase -> {next}");
    phase.send_replace(next);
}
