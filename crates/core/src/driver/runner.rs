//! Sequential run loop over the selected services.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{info, warn};

use crate::api::{ArrApi, ArrClient};
use crate::config::{Config, ManagerConfig};
use crate::configure::{Configurator, DownloadClientSpec, RemotePathMapping};

use super::types::{RunOptions, RunSummary, ServiceKind, ServiceReport, ServiceStatus};

/// Everything to ensure on one manager service, in application order.
struct ManagerPlan {
    download_client: DownloadClientSpec,
    root_folder: String,
    path_mapping: RemotePathMapping,
}

fn manager_plan(config: &Config, manager: &ManagerConfig) -> ManagerPlan {
    ManagerPlan {
        download_client: DownloadClientSpec::from_config(
            &config.download_client,
            &manager.category,
        ),
        root_folder: manager.root_folder.clone(),
        path_mapping: RemotePathMapping::from_config(&config.path_mapping),
    }
}

/// Configure every service in the selection, strictly in order.
///
/// Services are independent: a failure in one never blocks the attempt on
/// the next, and nothing is rolled back.
pub async fn run(
    config: &Config,
    env: &HashMap<String, String>,
    options: &RunOptions,
) -> RunSummary {
    let ready_timeout = Duration::from_secs(config.ready_timeout_secs);
    let mut reports = Vec::new();

    for kind in ServiceKind::all() {
        if !options.selection.includes(kind) {
            continue;
        }
        info!("=== Configuring {} ===", kind.name());

        let (url, api_key_var) = match kind {
            ServiceKind::Sonarr => (&config.sonarr.url, &config.sonarr.api_key_var),
            ServiceKind::Radarr => (&config.radarr.url, &config.radarr.api_key_var),
            ServiceKind::Prowlarr => (&config.prowlarr.url, &config.prowlarr.api_key_var),
        };

        // An empty value is as good as missing; .env templates ship the
        // keys with blank values.
        let Some(api_key) = env.get(api_key_var).filter(|k| !k.is_empty()) else {
            warn!(
                "{} not set, skipping {} configuration",
                api_key_var,
                kind.name()
            );
            warn!(
                "Get the API key from the {} UI: Settings -> General -> Security -> API Key",
                kind.name()
            );
            reports.push(ServiceReport {
                service: kind,
                status: ServiceStatus::MissingApiKey,
            });
            continue;
        };

        let client = ArrClient::new(kind.name(), url.clone(), api_key);
        let plan = match kind {
            ServiceKind::Sonarr => Some(manager_plan(config, &config.sonarr)),
            ServiceKind::Radarr => Some(manager_plan(config, &config.radarr)),
            ServiceKind::Prowlarr => None,
        };

        let status =
            configure_service(&client, plan.as_ref(), ready_timeout, options.dry_run).await;
        reports.push(ServiceReport {
            service: kind,
            status,
        });
    }

    RunSummary { reports }
}

/// Probe one service and, unless dry-running, apply its plan.
///
/// Services without a plan (the indexer aggregator) only get the readiness
/// check plus a report of the manual steps that remain.
async fn configure_service(
    api: &dyn ArrApi,
    plan: Option<&ManagerPlan>,
    ready_timeout: Duration,
    dry_run: bool,
) -> ServiceStatus {
    if !api.wait_for_ready(ready_timeout).await {
        return ServiceStatus::NotReady;
    }

    if dry_run {
        info!("[DRY RUN] Would configure {}", api.name());
        return ServiceStatus::DryRun;
    }

    match plan {
        Some(plan) => configure_manager(api, plan).await,
        None => report_aggregator(api),
    }
}

/// Apply the three ensure operations in their fixed order.
///
/// Every operation is attempted even after an earlier one fails; the
/// service is reported failed if any of them did.
async fn configure_manager(api: &dyn ArrApi, plan: &ManagerPlan) -> ServiceStatus {
    let configurator = Configurator::new(api);
    let mut failed = false;

    if configurator
        .ensure_download_client(&plan.download_client)
        .await
        .is_err()
    {
        failed = true;
    }
    if configurator
        .ensure_root_folder(&plan.root_folder)
        .await
        .is_err()
    {
        failed = true;
    }
    if configurator
        .ensure_remote_path_mapping(&plan.path_mapping)
        .await
        .is_err()
    {
        failed = true;
    }

    if failed {
        ServiceStatus::Failed
    } else {
        info!(service = %api.name(), "Configuration complete");
        ServiceStatus::Configured
    }
}

fn report_aggregator(api: &dyn ArrApi) -> ServiceStatus {
    info!(service = %api.name(), "Service is ready");
    info!("Manual steps remain:");
    info!("  1. Add indexers via the Prowlarr UI");
    info!("  2. Add the Sonarr application: Settings -> Apps -> Add -> Sonarr");
    info!("  3. Add the Radarr application: Settings -> Apps -> Add -> Radarr");
    ServiceStatus::Configured
}
