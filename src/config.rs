use crate::collectors::governor::DEFAULT_GOVERNOR_PATH;
use crate::collectors::memory::DEFAULT_MEMINFO_PATH;
use crate::collectors::volume::{DEFAULT_LEVEL_CMD, DEFAULT_MUTE_CMD};
use crate::error::{Result, StatusError};
use crate::protocol::SocketName;
use crate::registry::{DATE_CMD, LOAD_CMD, TEMP_CMD, TIME_CMD};
use dirs::config_dir;
use log::debug;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Abstract-namespace socket shared by daemon and client
pub const DEFAULT_SOCKET: &str = "@statusd";

const SYSTEM_CONFIG_PATH: &str = "/usr/share/statusd/config.toml";

/// Where the rendered line goes
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SinkKind {
    /// X root window name, drawn by the window manager's bar
    #[default]
    RootWindow,
    Stdout,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub socket: String,
    pub sink: SinkKind,
    pub governor_path: PathBuf,
    pub meminfo_path: PathBuf,
    pub commands: CommandConfig,
}

/// Shell command templates, one per shell-backed field
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CommandConfig {
    pub time: String,
    pub load: String,
    pub temp: String,
    pub volume_level: String,
    pub volume_mute: String,
    pub date: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            socket: DEFAULT_SOCKET.to_string(),
            sink: SinkKind::default(),
            governor_path: PathBuf::from(DEFAULT_GOVERNOR_PATH),
            meminfo_path: PathBuf::from(DEFAULT_MEMINFO_PATH),
            commands: CommandConfig::default(),
        }
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            time: TIME_CMD.to_string(),
            load: LOAD_CMD.to_string(),
            temp: TEMP_CMD.to_string(),
            volume_level: DEFAULT_LEVEL_CMD.to_string(),
            volume_mute: DEFAULT_MUTE_CMD.to_string(),
            date: DATE_CMD.to_string(),
        }
    }
}

impl Config {
    pub fn user_config_path() -> Option<PathBuf> {
        config_dir().map(|p| p.join("statusd/config.toml"))
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_data = fs::read_to_string(path).map_err(|err| {
            StatusError::config(format!("failed to read {}: {}", path.display(), err))
        })?;
        Self::from_toml(&config_data)
    }

    /// Load the configuration.
    ///
    /// An explicit path (tilde-expanded) must exist. Otherwise the user
    /// config is tried, then the system-wide one, then built-in defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            let expanded = shellexpand::tilde(path).to_string();
            return Self::load_from(Path::new(&expanded));
        }

        match Self::user_config_path().filter(|p| p.exists()) {
            Some(path) => Self::load_from(&path),
            None if Path::new(SYSTEM_CONFIG_PATH).exists() => {
                Self::load_from(Path::new(SYSTEM_CONFIG_PATH))
            }
            None => {
                debug!("no config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn socket_name(&self) -> Result<SocketName> {
        self.socket.parse()
    }
}
