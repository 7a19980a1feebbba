use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kube_image_inventory::app::{
    ContextSelection, InventoryError, InventoryRequest, ScanOptions, scan_images,
};
use kube_image_inventory::infra::logging::{self, LogLevel};
use kube_image_inventory::infra::{KubeconfigContextResolver, OutputDestination, write_report};
use tracing::error;

/// List Kubernetes container images per namespace, with digest-aware de-duplication.
#[derive(Parser, Debug)]
#[command(name = "kube-images", version, about)]
struct Cli {
    /// Path to kubeconfig. Defaults to $KUBECONFIG or ~/.kube/config if present.
    #[arg(long)]
    kubeconfig: Option<PathBuf>,

    /// Specific context(s) to query. Can be repeated.
    #[arg(long = "context", value_name = "CONTEXT", conflicts_with = "all_contexts")]
    contexts: Vec<String>,

    /// Query all contexts in the kubeconfig (default when no context is given).
    #[arg(long)]
    all_contexts: bool,

    /// Output file path (JSON). Use '-' for stdout.
    #[arg(short, long, default_value = "-")]
    output: OutputDestination,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Max parallel contexts (default: min(32, number of contexts)).
    #[arg(long)]
    max_workers: Option<usize>,

    /// Kubernetes list page size per request (default: unlimited).
    #[arg(long)]
    limit: Option<u32>,

    /// Per-API-call timeout in seconds (default: none).
    #[arg(long)]
    timeout: Option<u64>,

    /// Logging verbosity.
    #[arg(long, value_enum, ignore_case = true, default_value = "INFO")]
    log_level: LogLevel,
}

impl Cli {
    fn inventory_request(&self) -> InventoryRequest {
        let contexts = if self.all_contexts || self.contexts.is_empty() {
            ContextSelection::All
        } else {
            ContextSelection::Named(self.contexts.clone())
        };

        InventoryRequest {
            kubeconfig: self.kubeconfig.clone(),
            contexts,
            options: ScanOptions {
                max_workers: self.max_workers,
                page_limit: self.limit,
                request_timeout_seconds: self.timeout,
            },
        }
    }
}

fn exit_code_for(inventory_error: &InventoryError) -> u8 {
    match inventory_error {
        InventoryError::Resolution(e) if e.is_not_found() => 2,
        InventoryError::Resolution(_) => 3,
        InventoryError::Scan(_) => 4,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    let report = match scan_images(&KubeconfigContextResolver, &cli.inventory_request()).await {
        Ok(report) => report,
        Err(e) => {
            match &e {
                InventoryError::Resolution(r) if r.is_not_found() => error!(
                    "kubeconfig not found ({r}), provide --kubeconfig or set $KUBECONFIG"
                ),
                _ => error!("{e}"),
            }
            return ExitCode::from(exit_code_for(&e));
        }
    };

    if let Err(e) = write_report(&report, &cli.output, cli.pretty) {
        error!("{e}");
        return ExitCode::from(4);
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_scans_every_context_by_default() {
        let cli = Cli::parse_from(["kube-images"]);

        let request = cli.inventory_request();

        assert_eq!(request.contexts, ContextSelection::All);
        assert_eq!(request.options, ScanOptions::default());
        assert_eq!(cli.output, OutputDestination::Stdout);
        assert_eq!(cli.log_level, LogLevel::Info);
    }

    #[test]
    fn it_collects_repeated_contexts_and_scan_options() {
        let cli = Cli::parse_from([
            "kube-images",
            "--context",
            "prod",
            "--context",
            "staging",
            "--max-workers",
            "4",
            "--limit",
            "500",
            "--timeout",
            "30",
            "-o",
            "images.json",
            "--log-level",
            "debug",
        ]);

        let request = cli.inventory_request();

        assert_eq!(
            request.contexts,
            ContextSelection::Named(vec!["prod".to_string(), "staging".to_string()])
        );
        assert_eq!(request.options.max_workers, Some(4));
        assert_eq!(request.options.page_limit, Some(500));
        assert_eq!(request.options.request_timeout_seconds, Some(30));
        assert_eq!(cli.output, OutputDestination::File(PathBuf::from("images.json")));
        assert_eq!(cli.log_level, LogLevel::Debug);
    }

    #[test]
    fn context_and_all_contexts_conflict() {
        let result = Cli::try_parse_from(["kube-images", "--context", "prod", "--all-contexts"]);

        assert!(result.is_err());
    }

    #[test]
    fn the_command_definition_is_valid() {
        use clap::CommandFactory;

        Cli::command().debug_assert();
    }
}
