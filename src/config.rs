use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub storage: Storage,
    pub server: Server,
    pub limits: Limits,
    pub cors: Cors,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Storage {
    pub root_dir: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self { root_dir: PathBuf::from("storage") }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Server {
    pub bind_addr: String,
    pub port: u16,
    pub base_path: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            base_path: "/flowcharts".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Limits {
    pub max_request_kb: usize,
    /// Directory levels a single listing may descend.
    pub max_tree_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_request_kb: 1024, max_tree_depth: 64 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Cors {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
    pub max_age_s: u64,
}

impl Default for Cors {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: crate::errors::ALLOWED_METHODS.to_string(),
            allow_headers: "Content-Type, Authorization".to_string(),
            max_age_s: 86400,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(toml::from_str(&raw)?)
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base = &self.server.base_path;
        if !base.starts_with('/') { anyhow::bail!("base_path must start with '/': {base}"); }
        if base.len() < 2 || base.ends_with('/') {
            anyhow::bail!("base_path must name a prefix without a trailing '/': {base}");
        }
        if self.limits.max_request_kb == 0 { anyhow::bail!("max_request_kb must be > 0"); }
        if self.limits.max_tree_depth == 0 { anyhow::bail!("max_tree_depth must be > 0"); }
        crate::cors::CorsPolicy::from_config(&self.cors)?;
        Ok(())
    }
}

/// Creates the storage root if needed and returns its absolute, canonical form.
pub fn prepare_storage_root(root: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(root)?;
    let c = dunce::canonicalize(root)?;
    if !c.is_dir() {
        anyhow::bail!("storage root is not a directory: {}", c.display());
    }
    Ok(c)
}
