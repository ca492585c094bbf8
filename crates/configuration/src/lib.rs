use crate::error::ConfigError;
use crate::settings::{
    DEFAULT_HOST, DEFAULT_INSTALL_ROOT, DEFAULT_LIVE_DIR, DEFAULT_PORT, DEFAULT_RECENT_TRADES,
    DEFAULT_TITLE,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DashboardConfig, DataSettings, DisplaySettings, ServerSettings};

/// The file looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

/// Prefix for environment overrides, e.g. `EVOLUTIS__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "EVOLUTIS";

/// Command-line overrides, applied on top of file and environment settings.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ConfigOverrides {
    /// Path to a TOML configuration file (default: ./dashboard.toml if present).
    #[cfg_attr(feature = "clap", arg(long))]
    pub config: Option<PathBuf>,

    /// Directory holding portfolio_history.csv, trades.csv and summary.json.
    #[cfg_attr(feature = "clap", arg(long))]
    pub data_dir: Option<PathBuf>,

    /// Address to bind the HTTP dashboard to.
    #[cfg_attr(feature = "clap", arg(long))]
    pub host: Option<std::net::IpAddr>,

    /// Port to bind the HTTP dashboard to.
    #[cfg_attr(feature = "clap", arg(long))]
    pub port: Option<u16>,
}

/// Loads the dashboard configuration.
///
/// Layers, lowest priority first: built-in defaults, the TOML file, `EVOLUTIS__*`
/// environment variables, then `overrides`. An explicitly given file must exist;
/// the default `dashboard.toml` is optional.
pub fn load_config(overrides: &ConfigOverrides) -> Result<DashboardConfig, ConfigError> {
    load_config_with_env(overrides, None)
}

/// Same as [`load_config`], but reads environment overrides from `env` instead
/// of the process environment when it is `Some`.
pub fn load_config_with_env(
    overrides: &ConfigOverrides,
    env: Option<HashMap<String, String>>,
) -> Result<DashboardConfig, ConfigError> {
    let file_source = match &overrides.config {
        Some(path) => config::File::from(path.as_path()).required(true),
        None => config::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
    };

    let builder = config::Config::builder()
        .set_default("data.install_root", DEFAULT_INSTALL_ROOT)?
        .set_default("data.live_dir", DEFAULT_LIVE_DIR)?
        .set_default("server.host", DEFAULT_HOST)?
        .set_default("server.port", i64::from(DEFAULT_PORT))?
        .set_default("display.recent_trades", DEFAULT_RECENT_TRADES as i64)?
        .set_default("display.title", DEFAULT_TITLE)?
        .add_source(file_source)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    let mut config = builder.try_deserialize::<DashboardConfig>()?;
    apply_overrides(&mut config, overrides);
    validate(&config)?;

    tracing::debug!(
        live_data_dir = %config.data.live_data_dir().display(),
        bind = %config.server.socket_addr(),
        "Configuration loaded."
    );

    Ok(config)
}

fn apply_overrides(config: &mut DashboardConfig, overrides: &ConfigOverrides) {
    if let Some(dir) = &overrides.data_dir {
        // A directory given on the command line is taken as-is, relative to the
        // working directory rather than the install root.
        config.data.install_root = PathBuf::from(DEFAULT_INSTALL_ROOT);
        config.data.live_dir = dir.clone();
    }
    if let Some(host) = overrides.host {
        config.server.host = host;
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }
}

fn validate(config: &DashboardConfig) -> Result<(), ConfigError> {
    if config.display.recent_trades == 0 {
        return Err(ConfigError::ValidationError(
            "display.recent_trades must be at least 1".to_string(),
        ));
    }
    if config.data.live_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "data.live_dir must not be empty".to_string(),
        ));
    }
    Ok(())
}
