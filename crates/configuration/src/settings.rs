use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardConfig {
    pub data: DataSettings,
    pub server: ServerSettings,
    pub display: DisplaySettings,
}

/// Where the trading process drops its artifacts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataSettings {
    /// The installation root. Relative paths resolve against the working directory.
    pub install_root: PathBuf,
    /// The live data directory. Relative values resolve against `install_root`.
    pub live_dir: PathBuf,
}

/// Bind address for the HTTP dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplaySettings {
    /// How many of the latest trades the recent-trades table shows.
    pub recent_trades: usize,
    /// Page and report heading.
    pub title: String,
}

impl DataSettings {
    pub fn live_data_dir(&self) -> PathBuf {
        if self.live_dir.is_absolute() {
            self.live_dir.clone()
        } else {
            self.install_root.join(&self.live_dir)
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// --- Default Implementations ---
// These mirror the defaults registered with the config builder, so a missing
// file or section behaves exactly like an empty one.

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            install_root: PathBuf::from(DEFAULT_INSTALL_ROOT),
            live_dir: PathBuf::from(DEFAULT_LIVE_DIR),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            recent_trades: DEFAULT_RECENT_TRADES,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

pub(crate) const DEFAULT_INSTALL_ROOT: &str = ".";
pub(crate) const DEFAULT_LIVE_DIR: &str = "data/live";
pub(crate) const DEFAULT_HOST: &str = "127.0.0.1";
pub(crate) const DEFAULT_PORT: u16 = 8501;
pub(crate) const DEFAULT_RECENT_TRADES: usize = 20;
pub(crate) const DEFAULT_TITLE: &str = "Evolutis - Live Paper Trading";
