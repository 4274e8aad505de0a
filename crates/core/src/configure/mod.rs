//! Idempotent ensure-present operations against one *Arr service.
//!
//! Each operation fetches the current collection, scans for an entry with
//! the kind-specific equality key, and only creates when nothing matches.
//! Re-running a completed configuration issues no mutations. There is no
//! locking; concurrent runs against the same service can double-create.

mod specs;

pub use specs::{DownloadClientSpec, RemotePathMapping};

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::api::{ApiError, ArrApi};

/// Result of a single ensure-present operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// A matching entry already existed; nothing was sent.
    AlreadyPresent,
    /// No matching entry existed and one was created.
    Created,
}

/// Ensure-present operations for one service.
pub struct Configurator<'a> {
    api: &'a dyn ArrApi,
}

impl<'a> Configurator<'a> {
    pub fn new(api: &'a dyn ArrApi) -> Self {
        Self { api }
    }

    /// Fetch the current collection at `endpoint`.
    ///
    /// A failed or malformed fetch degrades to an empty collection, so the
    /// operation proceeds to a creation attempt instead of aborting. A
    /// transient fetch error is indistinguishable from genuine absence here.
    async fn existing_entries(&self, endpoint: &str) -> Vec<Value> {
        match self.api.get(endpoint).await {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                warn!(
                    service = %self.api.name(),
                    endpoint,
                    "Expected a JSON array, treating collection as empty"
                );
                Vec::new()
            }
            Err(e) => {
                warn!(
                    service = %self.api.name(),
                    endpoint,
                    error = %e,
                    "Could not fetch existing entries, treating collection as empty"
                );
                Vec::new()
            }
        }
    }

    /// Register the download client unless one with the same name exists.
    pub async fn ensure_download_client(
        &self,
        spec: &DownloadClientSpec,
    ) -> Result<EnsureOutcome, ApiError> {
        let existing = self.existing_entries("downloadclient").await;
        let present = existing
            .iter()
            .any(|entry| entry.get("name").and_then(Value::as_str) == Some(spec.name.as_str()));
        if present {
            info!(
                service = %self.api.name(),
                client = %spec.name,
                "Download client already configured"
            );
            return Ok(EnsureOutcome::AlreadyPresent);
        }

        self.api.post("downloadclient", &spec.body()).await?;
        info!(service = %self.api.name(), client = %spec.name, "Download client added");
        Ok(EnsureOutcome::Created)
    }

    /// Register a root folder unless the exact path is already present.
    pub async fn ensure_root_folder(&self, path: &str) -> Result<EnsureOutcome, ApiError> {
        let existing = self.existing_entries("rootfolder").await;
        let present = existing
            .iter()
            .any(|entry| entry.get("path").and_then(Value::as_str) == Some(path));
        if present {
            info!(service = %self.api.name(), path, "Root folder already configured");
            return Ok(EnsureOutcome::AlreadyPresent);
        }

        self.api.post("rootfolder", &json!({ "path": path })).await?;
        info!(service = %self.api.name(), path, "Root folder added");
        Ok(EnsureOutcome::Created)
    }

    /// Register a remote path mapping unless one for the host exists.
    ///
    /// Mappings are keyed by host only; the remote/local paths of an
    /// existing entry are not compared.
    pub async fn ensure_remote_path_mapping(
        &self,
        mapping: &RemotePathMapping,
    ) -> Result<EnsureOutcome, ApiError> {
        let existing = self.existing_entries("remotePathMapping").await;
        let present = existing
            .iter()
            .any(|entry| entry.get("host").and_then(Value::as_str) == Some(mapping.host.as_str()));
        if present {
            info!(
                service = %self.api.name(),
                host = %mapping.host,
                "Remote path mapping already configured"
            );
            return Ok(EnsureOutcome::AlreadyPresent);
        }

        self.api.post("remotePathMapping", &mapping.body()).await?;
        info!(service = %self.api.name(), host = %mapping.host, "Remote path mapping added");
        Ok(EnsureOutcome::Created)
    }
}
