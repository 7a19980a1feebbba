mod kube_component_factory;
mod kube_pod_source;
mod kubeconfig_context_resolver;
mod kubeconfig_locator;
pub mod logging;
mod report_writer;

pub use kube_component_factory::KubeComponentFactory;
pub use kube_pod_source::KubePodSource;
pub use kubeconfig_context_resolver::KubeconfigContextResolver;
pub use kubeconfig_locator::{KUBECONFIG_ENV_VAR, KubeconfigLocator};
pub use report_writer::{
    OutputDestination, ReportWriterError, render_report, write_report,
};
