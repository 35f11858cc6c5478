//! Configuration loading and path resolution.
//!
//! Supports HOSTPATCH_HOME env var override for testing.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths for the hostpatch data store.
#[derive(Debug, Clone)]
pub struct Paths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub backup_dir: PathBuf,
}

impl Paths {
    /// Build paths from base directory (e.g. ProjectDirs data dir or HOSTPATCH_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        let config_dir = base.clone();
        let config_file = base.join("config.toml");
        let backup_dir = base.join("backups");
        Self {
            config_dir,
            config_file,
            backup_dir,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default hostpatch paths (respects HOSTPATCH_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var("HOSTPATCH_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("io", "hostpatch", "hostpatch") {
            dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".hostpatch")
        };
        Self::from_base(base)
    }
}

/// Ensure the store directories exist.
pub fn ensure_dirs(paths: &Paths) -> Result<()> {
    fs::create_dir_all(&paths.config_dir)?;
    fs::create_dir_all(&paths.backup_dir)?;
    Ok(())
}

fn default_timeout_secs() -> u64 {
    15
}

/// Persisted defaults for fetch behaviour (config.toml).
/// CLI flags override these per invocation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// Per-request timeout for mirror sources, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Race all mirrors concurrently instead of trying them in order.
    #[serde(default)]
    pub concurrent: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            concurrent: false,
        }
    }
}

impl Settings {
    /// Load settings from paths (with shared lock when file exists).
    pub fn load(paths: &Paths) -> Result<Settings> {
        if paths.config_file.is_file() {
            let mut file = fs::OpenOptions::new().read(true).open(&paths.config_file)?;
            fs2::FileExt::lock_shared(&file)?;
            use std::io::Read;
            let mut s = String::new();
            file.read_to_string(&mut s)?;
            let settings: Settings = toml::from_str(&s)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to paths (with exclusive lock). Creates parent dirs if needed.
    pub fn save(&self, paths: &Paths) -> Result<()> {
        if let Some(p) = paths.config_file.parent() {
            fs::create_dir_all(p)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&paths.config_file)?;
        fs2::FileExt::lock_exclusive(&file)?;
        let s = toml::to_string_pretty(self)?;
        use std::io::Write;
        file.write_all(s.as_bytes())?;
        Ok(())
    }
}
