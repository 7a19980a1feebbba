use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::domain::scan_report::ScanReport;

use super::context_resolver::{ContextResolutionError, ContextResolver};
use super::scan_options::ScanOptions;
use super::scan_orchestrator::{ScanError, ScanOrchestrator};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ContextSelection {
    #[default]
    All,
    /// Falls back to every context when empty.
    Named(Vec<String>),
}

#[derive(Clone, Debug, Default)]
pub struct InventoryRequest {
    pub kubeconfig: Option<PathBuf>,
    pub contexts: ContextSelection,
    pub options: ScanOptions,
}

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error(transparent)]
    Resolution(#[from] ContextResolutionError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Resolves the contexts, scans the selected ones and returns the combined
/// report. Only failures that prevent establishing the target list are
/// returned as errors, per-context failures live in the report.
pub async fn scan_images<R>(
    resolver: &R,
    request: &InventoryRequest,
) -> Result<ScanReport, InventoryError>
where
    R: ContextResolver,
{
    let resolved = resolver.resolve(request.kubeconfig.as_deref())?;

    let targets = match &request.contexts {
        ContextSelection::Named(names) if !names.is_empty() => names.clone(),
        _ => resolved.context_names,
    };
    info!("selected {} context(s): {:?}", targets.len(), targets);

    let orchestrator = ScanOrchestrator::new(resolved.component_factory, request.options.clone());
    let outcome = orchestrator.scan_many_targets(targets).await?;

    Ok(outcome.into())
}
