use crate::{
    args::Args,
    errors::{ConfigError, ConfigResult, DaemonError, DaemonResult},
};
use headerdb_consensus::{ChainStore, HeaderStore};
use headerdb_consensus_core::{config::params::Params, record::HeaderRecord};
use headerdb_core::{info, log::init_logger};
use headerdb_database::prelude::{CachePolicy, ConnBuilder};
use headerdb_hashes::Hash;
use std::{
    path::{Path, PathBuf},
    process::exit,
    str::FromStr,
};

const DEFAULT_DATA_DIR: &str = "datadir";
const HEADERS_DB: &str = "headers";
const DEFAULT_LOG_DIR: &str = "logs";

fn get_home_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    return dirs::data_local_dir().unwrap_or_default();
    #[cfg(not(target_os = "windows"))]
    return dirs::home_dir().unwrap_or_default();
}

/// Get the default application directory.
pub fn get_app_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    return get_home_dir().join("headerdb");
    #[cfg(not(target_os = "windows"))]
    return get_home_dir().join(".headerdb");
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) => get_home_dir().join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(path),
    }
}

pub fn validate_args(args: &Args) -> ConfigResult<()> {
    if args.logdir.is_some() && args.no_log_files {
        return Err(ConfigError::MixedLogDirAndNoLogFiles);
    }
    if args.cache_size == 0 {
        return Err(ConfigError::ZeroCacheSize);
    }
    args.network()?;
    Ok(())
}

/// Get the application directory from the supplied [`Args`].
pub fn get_app_dir_from_args(args: &Args) -> PathBuf {
    match args.appdir.as_deref() {
        Some(app_dir) if !app_dir.is_empty() => expand_home(app_dir),
        _ => get_app_dir(),
    }
}

/// Get the log directory from the supplied [`Args`], `None` when logging to console only.
pub fn get_log_dir(args: &Args) -> ConfigResult<Option<PathBuf>> {
    if args.no_log_files {
        return Ok(None);
    }
    // Logs directory is usually under the application directory, unless otherwise specified
    Ok(Some(match args.logdir.as_deref() {
        Some(log_dir) if !log_dir.is_empty() => expand_home(log_dir),
        _ => get_app_dir_from_args(args).join(args.network()?.name()).join(DEFAULT_LOG_DIR),
    }))
}

/// Location of the header store for the network selected by `args`
pub fn get_db_dir(args: &Args) -> ConfigResult<PathBuf> {
    Ok(get_app_dir_from_args(args).join(args.network()?.name()).join(DEFAULT_DATA_DIR).join(HEADERS_DB))
}

fn get_user_approval_or_exit(message: &str, approve: bool) {
    if approve {
        return;
    }
    println!("{}", message);
    let mut input = String::new();
    match std::io::stdin().read_line(&mut input) {
        Ok(_) => {
            let answer = input.trim().to_lowercase();
            if answer != "y" && answer != "yes" {
                println!("Operation was rejected ({}), exiting..", answer);
                exit(1);
            }
        }
        Err(error) => {
            println!("Error reading from console: {error}, exiting..");
            exit(1);
        }
    }
}

/// Opens the header store described by `args`
pub fn open_store(args: &Args, db_dir: &Path) -> DaemonResult<HeaderStore> {
    let params = Params::from(args.network()?);
    let conn_builder = ConnBuilder::default().with_db_path(db_dir.to_owned()).with_files_limit(args.db_files_limit);
    Ok(HeaderStore::open_with_cache_policy(params, conn_builder, CachePolicy::Count(args.cache_size))?)
}

/// Looks up the record requested by `args`, or the chain head when none was requested.
pub fn query(store: &HeaderStore, args: &Args) -> DaemonResult<Option<HeaderRecord>> {
    match args.get.as_deref() {
        Some(hash_str) => {
            let hash = Hash::from_str(hash_str).map_err(|_| DaemonError::InvalidHash(hash_str.to_owned()))?;
            Ok(store.get(hash)?)
        }
        None => Ok(Some(store.get_chain_head()?)),
    }
}

pub fn run(args: Args) -> DaemonResult<()> {
    validate_args(&args)?;
    let log_dir = get_log_dir(&args)?;
    init_logger(log_dir.as_deref(), &args.log_level)?;

    let network = args.network()?;
    let app_dir = get_app_dir_from_args(&args);
    let db_dir = get_db_dir(&args)?;

    info!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    info!("Network: {}", network);
    info!("Application directory: {}", app_dir.display());
    info!("Data directory: {}", db_dir.display());
    match log_dir.as_ref() {
        Some(s) => {
            info!("Logs directory: {}", s.display());
        }
        None => {
            info!("Logs to console only");
        }
    }

    let store = open_store(&args, &db_dir)?;
    if args.reset_db {
        let msg = "Reset DB was requested -- this means all stored headers will be deleted,
do you confirm? (answer y/n or pass --yes to the command line to confirm all interactive questions)";
        get_user_approval_or_exit(msg, args.yes);
        store.reset()?;
    }

    match query(&store, &args)? {
        Some(record) => println!("{record}"),
        None => println!("No block {} is stored", args.get.as_deref().unwrap_or_default()),
    }
    store.close()?;
    Ok(())
}
