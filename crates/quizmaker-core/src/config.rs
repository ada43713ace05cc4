//! quizmaker configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::{QuizStore, STORAGE_KEY};

/// Top-level quizmaker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizmakerConfig {
    /// Directory holding the storage slot.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Name of the storage slot inside `data_dir`.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Seed the sample quizzes when the collection is empty.
    #[serde(default = "default_true")]
    pub seed_samples: bool,
    /// Ask before deleting a quiz or finishing a session early.
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./.quizmaker")
}
fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}
fn default_true() -> bool {
    true
}

impl Default for QuizmakerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
            seed_samples: true,
            confirm_destructive: true,
        }
    }
}

impl QuizmakerConfig {
    /// Path of the JSON file backing the collection.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }

    /// Store backed by the configured slot.
    pub fn open_store(&self) -> QuizStore {
        QuizStore::in_dir(&self.data_dir, &self.storage_key)
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizmaker.toml` in the current directory
/// 2. `~/.config/quizmaker/config.toml`
///
/// Environment variable override: `QUIZMAKER_DATA_DIR`.
pub fn load_config() -> Result<QuizmakerConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizmakerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizmaker.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizmakerConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizmakerConfig::default(),
    };

    if let Ok(dir) = std::env::var("QUIZMAKER_DATA_DIR") {
        if !dir.trim().is_empty() {
            config.data_dir = PathBuf::from(dir);
        }
    }

    anyhow::ensure!(
        !config.storage_key.trim().is_empty(),
        "storage_key must not be empty"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizmaker"))
}

/// Starter config written by `quizmaker init`.
pub const SAMPLE_CONFIG: &str = r#"# quizmaker configuration

# Where the quiz collection is stored.
data_dir = "./.quizmaker"
storage_key = "quizmaker_quizzes"

# Add the sample quizzes when the collection is empty.
seed_samples = true

# Ask before deleting a quiz or finishing a quiz early.
confirm_destructive = true
"#;
