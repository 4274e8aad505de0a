pub mod api;
pub mod config;
pub mod configure;
pub mod driver;
pub mod envfile;
pub mod testing;

pub use api::{ApiError, ArrApi, ArrClient};
pub use config::{
    load_config, load_config_from_str, validate_config, AggregatorConfig, Config, ConfigError,
    DownloadClientConfig, ManagerConfig, PathMappingConfig,
};
pub use configure::{Configurator, DownloadClientSpec, EnsureOutcome, RemotePathMapping};
pub use driver::{
    run, AppSelection, RunOptions, RunSummary, ServiceKind, ServiceReport, ServiceStatus,
};
pub use envfile::{load_env_file, parse_env, EnvFileError};
