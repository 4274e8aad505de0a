//! Orchestration driver: sequences readiness probing and configuration for
//! each selected service and aggregates the per-service results.

mod runner;
mod types;

pub use runner::run;
pub use types::{
    AppSelection, RunOptions, RunSummary, ServiceKind, ServiceReport, ServiceStatus,
};
