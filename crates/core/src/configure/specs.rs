//! Resource bodies for the ensure-present operations.

use serde_json::{json, Value};

use crate::config::{DownloadClientConfig, PathMappingConfig};

/// Download client registration, qBittorrent-shaped.
#[derive(Debug, Clone)]
pub struct DownloadClientSpec {
    /// Entry name; the equality key for idempotency checks.
    pub name: String,
    pub host: String,
    pub port: u16,
    pub use_ssl: bool,
    /// Category the manager tags its downloads with.
    pub category: String,
}

impl DownloadClientSpec {
    pub fn from_config(config: &DownloadClientConfig, category: &str) -> Self {
        Self {
            name: config.name.clone(),
            host: config.host.clone(),
            port: config.port,
            use_ssl: config.use_ssl,
            category: category.to_string(),
        }
    }

    /// Full creation body expected by `POST /api/v3/downloadclient`.
    pub fn body(&self) -> Value {
        json!({
            "enable": true,
            "protocol": "torrent",
            "priority": 1,
            "removeCompletedDownloads": true,
            "removeFailedDownloads": true,
            "name": self.name,
            "fields": [
                { "name": "host", "value": self.host },
                { "name": "port", "value": self.port },
                { "name": "useSsl", "value": self.use_ssl },
                { "name": "urlBase", "value": "" },
                { "name": "username", "value": "" },
                { "name": "password", "value": "" },
                { "name": "category", "value": self.category },
                { "name": "postImportCategory", "value": "" },
                { "name": "recentPriority", "value": 0 },
                { "name": "olderPriority", "value": 0 },
                { "name": "initialState", "value": 0 },
                { "name": "sequentialOrder", "value": false },
                { "name": "firstAndLast", "value": false }
            ],
            "implementationName": "qBittorrent",
            "implementation": "QBittorrent",
            "configContract": "QBittorrentSettings",
            "tags": []
        })
    }
}

/// Path translation rule between a download client host and the manager.
#[derive(Debug, Clone)]
pub struct RemotePathMapping {
    /// Download client host; the equality key for idempotency checks.
    pub host: String,
    pub remote_path: String,
    pub local_path: String,
}

impl RemotePathMapping {
    pub fn from_config(config: &PathMappingConfig) -> Self {
        Self {
            host: config.host.clone(),
            remote_path: config.remote_path.clone(),
            local_path: config.local_path.clone(),
        }
    }

    /// Creation body expected by `POST /api/v3/remotePathMapping`.
    pub fn body(&self) -> Value {
        json!({
            "host": self.host,
            "remotePath": self.remote_path,
            "localPath": self.local_path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_client_body_shape() {
        let spec = DownloadClientSpec {
            name: "RdtClient".to_string(),
            host: "rdtclient".to_string(),
            port: 6500,
            use_ssl: false,
            category: "sonarr".to_string(),
        };

        let body = spec.body();
        assert_eq!(body["name"], "RdtClient");
        assert_eq!(body["protocol"], "torrent");
        assert_eq!(body["implementation"], "QBittorrent");
        assert_eq!(body["configContract"], "QBittorrentSettings");
        assert_eq!(body["tags"], json!([]));

        let fields = body["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 13);
        let host = fields.iter().find(|f| f["name"] == "host").unwrap();
        assert_eq!(host["value"], "rdtclient");
        let port = fields.iter().find(|f| f["name"] == "port").unwrap();
        assert_eq!(port["value"], 6500);
        let category = fields.iter().find(|f| f["name"] == "category").unwrap();
        assert_eq!(category["value"], "sonarr");
    }

    #[test]
    fn test_download_client_from_config() {
        let config = crate::config::DownloadClientConfig::default();
        let spec = DownloadClientSpec::from_config(&config, "radarr");
        assert_eq!(spec.name, "RdtClient");
        assert_eq!(spec.host, "rdtclient");
        assert_eq!(spec.port, 6500);
        assert_eq!(spec.category, "radarr");
    }

    #[test]
    fn test_remote_path_mapping_body() {
        let mapping = RemotePathMapping {
            host: "rdtclient".to_string(),
            remote_path: "/data/downloads".to_string(),
            local_path: "/data/downloads".to_string(),
        };

        assert_eq!(
            mapping.body(),
            json!({
                "host": "rdtclient",
                "remotePath": "/data/downloads",
                "localPath": "/data/downloads"
            })
        );
    }
}
