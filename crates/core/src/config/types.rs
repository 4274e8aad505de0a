use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the orchestrator.
///
/// Every section has defaults matching the stock compose stack, so the
/// orchestrator runs with no config file at all.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// File providing the API keys, one `KEY=VALUE` per line.
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,
    /// Overall readiness timeout per service, in seconds.
    #[serde(default = "default_ready_timeout_secs")]
    pub ready_timeout_secs: u64,
    #[serde(default = "ManagerConfig::sonarr")]
    pub sonarr: ManagerConfig,
    #[serde(default = "ManagerConfig::radarr")]
    pub radarr: ManagerConfig,
    #[serde(default)]
    pub prowlarr: AggregatorConfig,
    #[serde(default)]
    pub download_client: DownloadClientConfig,
    #[serde(default)]
    pub path_mapping: PathMappingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            ready_timeout_secs: default_ready_timeout_secs(),
            sonarr: ManagerConfig::sonarr(),
            radarr: ManagerConfig::radarr(),
            prowlarr: AggregatorConfig::default(),
            download_client: DownloadClientConfig::default(),
            path_mapping: PathMappingConfig::default(),
        }
    }
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

fn default_ready_timeout_secs() -> u64 {
    60
}

/// A manager service (Sonarr or Radarr) and what to configure on it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManagerConfig {
    /// Service base URL (e.g. "http://localhost:8989").
    pub url: String,
    /// Environment key holding the service API key.
    pub api_key_var: String,
    /// Library root folder to register.
    pub root_folder: String,
    /// Download category this manager hands to the download client.
    pub category: String,
}

impl ManagerConfig {
    pub fn sonarr() -> Self {
        Self {
            url: "http://localhost:8989".to_string(),
            api_key_var: "SONARR_API_KEY".to_string(),
            root_folder: "/tv".to_string(),
            category: "sonarr".to_string(),
        }
    }

    pub fn radarr() -> Self {
        Self {
            url: "http://localhost:7878".to_string(),
            api_key_var: "RADARR_API_KEY".to_string(),
            root_folder: "/movies".to_string(),
            category: "radarr".to_string(),
        }
    }
}

/// The indexer aggregator (Prowlarr). Probed for readiness only; indexers
/// and app sync are set up by hand in its UI.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AggregatorConfig {
    pub url: String,
    pub api_key_var: String,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9696".to_string(),
            api_key_var: "PROWLARR_API_KEY".to_string(),
        }
    }
}

/// RdtClient endpoint, registered with each manager as a qBittorrent
/// download client (RdtClient speaks the qBittorrent API).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadClientConfig {
    #[serde(default = "default_client_name")]
    pub name: String,
    #[serde(default = "default_client_host")]
    pub host: String,
    #[serde(default = "default_client_port")]
    pub port: u16,
    #[serde(default)]
    pub use_ssl: bool,
}

impl Default for DownloadClientConfig {
    fn default() -> Self {
        Self {
            name: default_client_name(),
            host: default_client_host(),
            port: default_client_port(),
            use_ssl: false,
        }
    }
}

fn default_client_name() -> String {
    "RdtClient".to_string()
}

fn default_client_host() -> String {
    "rdtclient".to_string()
}

fn default_client_port() -> u16 {
    6500
}

/// Path translation between the download client's view and the managers'.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathMappingConfig {
    #[serde(default = "default_client_host")]
    pub host: String,
    #[serde(default = "default_downloads_path")]
    pub remote_path: String,
    #[serde(default = "default_downloads_path")]
    pub local_path: String,
}

impl Default for PathMappingConfig {
    fn default() -> Self {
        Self {
            host: default_client_host(),
            remote_path: default_downloads_path(),
            local_path: default_downloads_path(),
        }
    }
}

fn default_downloads_path() -> String {
    "/data/downloads".to_string()
}
