use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;

use super::container_image::ContainerImage;

/// Images of one target, per namespace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScanResult {
    namespaces: BTreeMap<String, Vec<ContainerImage>>,
}

impl ScanResult {
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &[ContainerImage])> {
        self.namespaces
            .iter()
            .map(|(namespace, images)| (namespace.as_str(), images.as_slice()))
    }

    pub fn images_in(&self, namespace: &str) -> Option<&[ContainerImage]> {
        self.namespaces.get(namespace).map(Vec::as_slice)
    }

    pub fn image_count(&self) -> usize {
        self.namespaces.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

impl From<BTreeMap<String, Vec<ContainerImage>>> for ScanResult {
    fn from(namespaces: BTreeMap<String, Vec<ContainerImage>>) -> Self {
        Self { namespaces }
    }
}

/// Lifecycle of the scan of one target: `NotStarted -> Listing -> Extracting
/// -> Aggregating -> Done | Failed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScanPhase {
    #[default]
    NotStarted,
    Listing,
    Extracting,
    Aggregating,
    Done,
    Failed,
}

impl Display for ScanPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ScanPhase::NotStarted => "not started",
                ScanPhase::Listing => "listing",
                ScanPhase::Extracting => "extracting",
                ScanPhase::Aggregating => "aggregating",
                ScanPhase::Done => "done",
                ScanPhase::Failed => "failed",
            }
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The remote source rejected the request or could not be reached.
    Api,
    Unexpected,
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FailureKind::Api => "api",
                FailureKind::Unexpected => "unexpected",
            }
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetFailure {
    pub target: String,
    pub kind: FailureKind,
    /// Last phase the target reached before failing.
    pub phase: ScanPhase,
    pub message: String,
}

/// Results of a multi-target scan. A target is either in the results or in
/// the failures, never in both.
#[derive(Clone, Debug, Default)]
pub struct ScanOutcome {
    results: BTreeMap<String, ScanResult>,
    failures: BTreeMap<String, TargetFailure>,
}

impl ScanOutcome {
    pub fn record_success(&mut self, target: impl Into<String>, result: ScanResult) {
        let target = target.into();
        self.failures.remove(&target);
        self.results.insert(target, result);
    }

    pub fn record_failure(&mut self, failure: TargetFailure) {
        self.results.remove(&failure.target);
        self.failures.insert(failure.target.clone(), failure);
    }

    pub fn results(&self) -> &BTreeMap<String, ScanResult> {
        &self.results
    }

    pub fn failures(&self) -> &BTreeMap<String, TargetFailure> {
        &self.failures
    }

    pub fn result_for(&self, target: &str) -> Option<&ScanResult> {
        self.results.get(target)
    }

    pub fn failure_for(&self, target: &str) -> Option<&TargetFailure> {
        self.failures.get(target)
    }
}

/// Serializable report: images per target and namespace, plus one error
/// message per failed target.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub contexts: BTreeMap<String, ScanResult>,
    pub errors: BTreeMap<String, String>,
}

impl From<ScanOutcome> for ScanReport {
    fn from(outcome: ScanOutcome) -> Self {
        Self {
            contexts: outcome.results,
            errors: outcome
                .failures
                .into_iter()
                .map(|(target, failure)| (target, failure.message))
                .collect(),
        }
    }
}
