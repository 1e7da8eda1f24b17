use tracing::trace;

/// Root configuration, read from a JSON file.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub monitors: Option<Vec<MonitorEntry>>,

    /// Telegram delivery settings (token may also come from the environment)
    pub telegram: Option<TelegramConfig>,

    /// Total per-request timeout for probes, in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout: u64,

    /// Seconds between check cycles
    #[serde(default = "default_cycle_interval")]
    pub cycle_interval: u64,
}

/// One monitor as written in the config file. Ids are assigned by the loader
/// in file order.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MonitorEntry {
    pub user_id: i64,
    pub url: String,
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct TelegramConfig {
    pub token: Option<String>,
    /// Override for the Bot API endpoint, mainly for testing.
    pub api_base: Option<String>,
}

fn default_probe_timeout() -> u64 {
    10
}

fn default_cycle_interval() -> u64 {
    60
}

fn default_check_interval() -> u64 {
    300
}

fn default_active() -> bool {
    true
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|_| anyhow::anyhow!("Invalid configuration file provided!"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}
