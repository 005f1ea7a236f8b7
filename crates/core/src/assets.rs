//! Per-user directories and the bundled default config.
use once_cell::sync::Lazy;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "menu-translator";

const DEFAULT_CONFIG: &str = include_str!("../data/config.yml");

static PLATFORM_CONFIG_BASE: Lazy<Option<PathBuf>> = Lazy::new(dirs::config_dir);
static PLATFORM_DATA_BASE: Lazy<Option<PathBuf>> = Lazy::new(dirs::data_local_dir);

/// The two per-user roots the app keeps files under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseDir {
    Config,
    Data,
}

impl BaseDir {
    fn env_var(self) -> &'static str {
        match self {
            BaseDir::Config => "XDG_CONFIG_HOME",
            BaseDir::Data => "XDG_DATA_HOME",
        }
    }

    /// Home-relative location used when the platform reports nothing.
    fn home_relative(self) -> &'static str {
        match self {
            BaseDir::Config => ".config",
            BaseDir::Data => ".local/share",
        }
    }

    fn platform_base(self) -> Option<PathBuf> {
        match self {
            BaseDir::Config => PLATFORM_CONFIG_BASE.clone(),
            BaseDir::Data => PLATFORM_DATA_BASE.clone(),
        }
    }

    /// `<base>/menu-translator`. An empty XDG variable counts as unset.
    fn app_dir(self) -> PathBuf {
        let base = std::env::var_os(self.env_var())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.platform_base())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_default()
                    .join(self.home_relative())
            });
        base.join(APP_DIR_NAME)
    }
}

pub(crate) fn get_config_dir() -> PathBuf {
    BaseDir::Config.app_dir()
}

/// Application data directory, without touching the filesystem.
pub(crate) fn data_dir_path() -> PathBuf {
    BaseDir::Data.app_dir()
}

/// Application data directory, created if missing. Used for logs.
pub fn get_data_dir() -> std::io::Result<PathBuf> {
    let path = data_dir_path();
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

pub(crate) fn default_config() -> &'static str {
    DEFAULT_CONFIG
}
