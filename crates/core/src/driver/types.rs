//! Types for the orchestration driver.

/// The services a run can operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Sonarr,
    Radarr,
    Prowlarr,
}

impl ServiceKind {
    /// Display name for logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Sonarr => "Sonarr",
            ServiceKind::Radarr => "Radarr",
            ServiceKind::Prowlarr => "Prowlarr",
        }
    }

    /// Services in the fixed processing order.
    pub fn all() -> [ServiceKind; 3] {
        [ServiceKind::Sonarr, ServiceKind::Radarr, ServiceKind::Prowlarr]
    }
}

/// Caller-selected subset of services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppSelection {
    Sonarr,
    Radarr,
    Prowlarr,
    All,
}

impl AppSelection {
    pub fn includes(self, kind: ServiceKind) -> bool {
        match self {
            AppSelection::All => true,
            AppSelection::Sonarr => kind == ServiceKind::Sonarr,
            AppSelection::Radarr => kind == ServiceKind::Radarr,
            AppSelection::Prowlarr => kind == ServiceKind::Prowlarr,
        }
    }
}

/// Options for a single run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub selection: AppSelection,
    /// Probe and report only; never issue create requests.
    pub dry_run: bool,
}

/// Terminal state of one service's configuration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    /// All ensure operations reported success.
    Configured,
    /// Readiness confirmed; mutations skipped (dry-run mode).
    DryRun,
    /// No API key in the environment mapping; service skipped.
    MissingApiKey,
    /// The service never answered the readiness probe.
    NotReady,
    /// At least one ensure operation failed.
    Failed,
}

impl ServiceStatus {
    pub fn is_success(self) -> bool {
        matches!(self, ServiceStatus::Configured | ServiceStatus::DryRun)
    }
}

/// Outcome for one service.
#[derive(Debug, Clone)]
pub struct ServiceReport {
    pub service: ServiceKind,
    pub status: ServiceStatus,
}

/// Aggregated outcome of a run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<ServiceReport>,
}

impl RunSummary {
    /// True when every selected service succeeded.
    pub fn success(&self) -> bool {
        self.reports.iter().all(|r| r.status.is_success())
    }
}
