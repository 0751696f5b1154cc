use headerdb_core::log::LogError;
use headerdb_database::prelude::StoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Configuration: --logdir and --nologfiles cannot be used together")]
    MixedLogDirAndNoLogFiles,

    #[error("Configuration: --testnet and --regtest cannot be used together")]
    MultipleNetworks,

    #[error("Configuration: --cachesize must be positive")]
    ZeroCacheSize,
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum DaemonError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("logger initialization failed: {0}")]
    Log(#[from] LogError),

    #[error("header store failure: {0}")]
    Store(#[from] StoreError),

    #[error("invalid block hash '{0}'")]
    InvalidHash(String),
}

pub type DaemonResult<T> = std::result::Result<T, DaemonError>;
