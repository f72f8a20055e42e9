//! # Generator Configuration
//!
//! Options of one generation pass, loaded from an optional `rpcgate.toml`
//! that sits alongside the descriptor document (or is named with
//! `--config`). Command-line flags override file values.
//!
//! ```toml
//! runtime_crate = "rpcgate_runtime"
//! proto_module = "crate::proto::users"
//! router = "probe"
//! impl = true
//! impl_path = "service"
//! desc_path = "generated"
//! format = false
//! ```
//!
//! A missing file is not an error; every key has a default.

use crate::binding::RouterTarget;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to the descriptor document.
pub const CONFIG_FILE_NAME: &str = "rpcgate.toml";

/// Options of one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Crate path imported as `rt` in generated code
    pub runtime_crate: String,
    /// Module holding the prost/tonic generated types, imported as `pb`
    pub proto_module: String,
    /// Router capability the HTTP registration is written against
    pub router: RouterTarget,
    /// Also emit the implementation scaffold
    #[serde(rename = "impl")]
    pub emit_impl: bool,
    /// Sub-directory of the output directory for scaffold units
    pub impl_path: PathBuf,
    /// Sub-directory of the output directory for descriptor units
    pub desc_path: PathBuf,
    /// Run rustfmt over the written files
    pub format: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime_crate: "rpcgate_runtime".to_string(),
            proto_module: "super".to_string(),
            router: RouterTarget::Probe,
            emit_impl: false,
            impl_path: PathBuf::new(),
            desc_path: PathBuf::new(),
            format: false,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub runtime_crate: Option<String>,
    pub proto_module: Option<String>,
    pub router: Option<RouterTarget>,
    pub emit_impl: bool,
    pub format: bool,
}

impl GeneratorConfig {
    /// Apply command-line overrides. Boolean flags can only switch options on.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(runtime_crate) = overrides.runtime_crate {
            self.runtime_crate = runtime_crate;
        }
        if let Some(proto_module) = overrides.proto_module {
            self.proto_module = proto_module;
        }
        if let Some(router) = overrides.router {
            self.router = router;
        }
        self.emit_impl |= overrides.emit_impl;
        self.format |= overrides.format;
        self
    }
}

/// Load a configuration file.
///
/// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but
/// fails to read or parse.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(config_path).with_context(|| {
        format!("Failed to read generator config: {}", config_path.display())
    })?;
    let config: GeneratorConfig = toml::from_str(&contents).with_context(|| {
        format!("Failed to parse generator config: {}", config_path.display())
    })?;
    Ok(Some(config))
}

/// Resolve the config file path
///
/// Priority:
/// 1. Explicitly provided path (via CLI), which must exist
/// 2. `rpcgate.toml` alongside the descriptor document
/// 3. None (defaults)
pub fn resolve_config_path(
    explicit_path: Option<&Path>,
    descriptors_path: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = explicit_path {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }
    let candidate = descriptors_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CONFIG_FILE_NAME);
    Ok(candidate.exists().then_some(candidate))
}

/// Resolve, load and override in one step.
pub fn load_generator_config(
    explicit_path: Option<&Path>,
    descriptors_path: &Path,
    overrides: ConfigOverrides,
) -> anyhow::Result<GeneratorConfig> {
    let base = match resolve_config_path(explicit_path, descriptors_path)? {
        Some(path) => {
            tracing::debug!(config = %path.display(), "Loading generator config");
            load_config(&path)?.unwrap_or_default()
        }
        None => GeneratorConfig::default(),
    };
    Ok(base.with_overrides(overrides))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.runtime_crate, "rpcgate_runtime");
        assert_eq!(config.proto_module, "super");
        assert_eq!(config.router, RouterTarget::Probe);
        assert!(!config.emit_impl);
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(&dir.path().join("rpcgate.toml"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rpcgate.toml");
        fs::write(&path, "router = \"basic\"\nimpl = true\nimpl_path = \"service\"\n").unwrap();
        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.router, RouterTarget::Basic);
        assert!(config.emit_impl);
        assert_eq!(config.impl_path, PathBuf::from("service"));
        assert_eq!(config.runtime_crate, "rpcgate_runtime");
    }

    #[test]
    fn test_load_invalid_router() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rpcgate.toml");
        fs::write(&path, "router = \"fancy\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = GeneratorConfig::default().with_overrides(ConfigOverrides {
            runtime_crate: Some("crate::rt".to_string()),
            router: Some(RouterTarget::Advanced),
            emit_impl: true,
            ..Default::default()
        });
        assert_eq!(config.runtime_crate, "crate::rt");
        assert_eq!(config.router, RouterTarget::Advanced);
        assert!(config.emit_impl);
        assert_eq!(config.proto_module, "super");
    }

    #[test]
    fn test_resolve_config_path() {
        let dir = TempDir::new().unwrap();
        let descriptors = dir.path().join("api.yaml");
        assert!(resolve_config_path(None, &descriptors).unwrap().is_none());

        fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        assert_eq!(
            resolve_config_path(None, &descriptors).unwrap(),
            Some(dir.path().join(CONFIG_FILE_NAME))
        );
        assert!(resolve_config_path(Some(&dir.path().join("nope.toml")), &descriptors).is_err());
    }
}
