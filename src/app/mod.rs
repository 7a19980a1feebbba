pub mod component_factory;
pub mod context_resolver;
mod inventory;
pub mod paginated_lister;
pub mod scan_options;
pub mod scan_orchestrator;
pub mod workload_source;

pub use component_factory::{ComponentFactory, ComponentFactoryError};
pub use context_resolver::{ContextResolutionError, ContextResolver, ResolvedContexts};
pub use inventory::{ContextSelection, InventoryError, InventoryRequest, scan_images};
pub use paginated_lister::{PageOptions, list_all};
pub use scan_options::ScanOptions;
pub use scan_orchestrator::{ScanError, ScanOrchestrator, TargetScanError};
pub use workload_source::{Page, PageRequest, PagedSource, SourceError};
