//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/exprtree/exprtree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `EXPRTREE_*` prefix
//!
//! Command-line flags sit on top of all of these and are applied by the
//! command that reads them.

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::errors::TreeError;
use crate::queue::QueueStrategy;
use crate::traversal::TraversalOrder;

pub const DEFAULT_FREE_LIST_PREALLOC: usize = 50;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("environment: {0}")]
    Env(#[from] config::ConfigError),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A layer named a traversal order or queue strategy that does not exist.
    #[error(transparent)]
    Invalid(#[from] TreeError),
}

/// Raw settings for intermediate parsing; `None` means "inherit".
///
/// Selector names stay strings here so they go through the same parser as
/// every other caller and fail with the same error.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub traversal_order: Option<String>,
    pub queue_strategy: Option<String>,
    pub free_list_prealloc: Option<usize>,
    pub node_limit: Option<usize>,
}

/// Unified configuration for exprtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Traversal used by `walk` (default: Levelorder)
    pub traversal_order: TraversalOrder,
    /// Queue backing level-order walks (default: LQueue)
    pub queue_strategy: QueueStrategy,
    /// Queue nodes parked on the free list at startup
    pub free_list_prealloc: usize,
    /// Upper bound on queue nodes the free list may own; unbounded if unset
    pub node_limit: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            traversal_order: TraversalOrder::default(),
            queue_strategy: QueueStrategy::default(),
            free_list_prealloc: DEFAULT_FREE_LIST_PREALLOC,
            node_limit: None,
        }
    }
}

/// Get the XDG config directory for exprtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "exprtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("exprtree.toml"))
}

/// `EXPRTREE_*` environment source, e.g. `EXPRTREE_TRAVERSAL_ORDER=Preorder`.
pub fn env_source() -> Environment {
    Environment::with_prefix("EXPRTREE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load a TOML file into RawSettings for manual merging.
pub fn load_raw_settings(path: &Path) -> Result<RawSettings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Settings {
    /// Overlay wins where it says something, otherwise keep self.
    pub fn merge_with(&self, overlay: &RawSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            traversal_order: match &overlay.traversal_order {
                Some(name) => name.parse()?,
                None => self.traversal_order,
            },
            queue_strategy: match &overlay.queue_strategy {
                Some(name) => name.parse()?,
                None => self.queue_strategy,
            },
            free_list_prealloc: overlay
                .free_list_prealloc
                .unwrap_or(self.free_list_prealloc),
            node_limit: overlay.node_limit.or(self.node_limit),
        })
    }

    /// Load settings from the standard locations plus `explicit`.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let global = global_config_path();
        Self::load_with(global.as_deref(), explicit, env_source())
    }

    /// Load settings with layered precedence from the given sources.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    #[instrument(level = "debug", skip(env))]
    pub fn load_with(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?)?;
            }
        }

        // 3. Explicit config
        if let Some(path) = explicit {
            debug!("explicit config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?)?;
        }

        // 4. Environment variables
        current = current.merge_with(&Self::env_overrides(env)?)?;

        debug!(?current, "effective settings");
        Ok(current)
    }

    /// Collect the overrides an environment source carries.
    fn env_overrides(env: Environment) -> Result<RawSettings, ConfigError> {
        let config = Config::builder().add_source(env).build()?;

        Ok(RawSettings {
            traversal_order: optional(config.get_string("traversal_order"))?,
            queue_strategy: optional(config.get_string("queue_strategy"))?,
            free_list_prealloc: optional(config.get::<usize>("free_list_prealloc"))?,
            node_limit: optional(config.get::<usize>("node_limit"))?,
        })
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# exprtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/exprtree/exprtree.toml
#   Explicit: --config <path>
#   Env:      EXPRTREE_* environment variables

# Levelorder | Preorder | Postorder | Inorder
# traversal_order = "Levelorder"

# LQueue | STLQueue (level-order only)
# queue_strategy = "LQueue"

# Queue nodes parked on the free list at startup
# free_list_prealloc = 50

# Cap on queue nodes; enqueue fails with Overflow beyond it
# node_limit = 1000
"#
        .to_string()
    }
}

/// Unset keys are fine; malformed ones are not.
fn optional<T>(value: Result<T, config::ConfigError>) -> Result<Option<T>, ConfigError> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
