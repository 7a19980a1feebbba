use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const KUBECONFIG_ENV_VAR: &str = "KUBECONFIG";

/// Decides which kubeconfig files to load.
pub struct KubeconfigLocator;

impl KubeconfigLocator {
    /// The explicit path when given, else every path listed in `$KUBECONFIG`,
    /// else `~/.kube/config` when it exists. Empty when nothing applies.
    pub fn resolve(explicit_path: Option<&Path>) -> Vec<PathBuf> {
        Self::resolve_with(
            explicit_path,
            std::env::var_os(KUBECONFIG_ENV_VAR),
            dirs::home_dir(),
        )
    }

    fn resolve_with(
        explicit_path: Option<&Path>,
        env_value: Option<OsString>,
        home_dir: Option<PathBuf>,
    ) -> Vec<PathBuf> {
        if let Some(path) = explicit_path.filter(|path| !path.as_os_str().is_empty()) {
            return vec![path.to_path_buf()];
        }

        let from_env: Vec<PathBuf> = env_value
            .map(|value| {
                std::env::split_paths(&value)
                    .filter(|path| !path.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if !from_env.is_empty() {
            return from_env;
        }

        home_dir
            .map(|home| home.join(".kube").join("config"))
            .filter(|default_path| default_path.exists())
            .into_iter()
            .collect()
    }
}
