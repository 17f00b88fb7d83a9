use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BindgraphConfig {
    /// Manifest used when no `--manifest` is given
    pub manifest: Option<String>,
    /// Run the tree-wide hierarchy check after every build
    pub verify_hierarchy: Option<bool>,
}

impl BindgraphConfig {
    pub fn verify_hierarchy(&self) -> bool {
        self.verify_hierarchy.unwrap_or(true)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("bindgraph.toml")
}

pub fn default_manifest_path_in(base: &Path) -> PathBuf {
    base.join("bindings.toml")
}

/// Manifest named by the config, relative paths taken from the config file's directory
pub fn configured_manifest(config_path: &Path, config: &BindgraphConfig) -> Option<PathBuf> {
    let manifest = config.manifest.as_ref()?;
    let base = config_path.parent().unwrap_or_else(|| Path::new(""));
    Some(base.join(manifest))
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<BindgraphConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: BindgraphConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &BindgraphConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
