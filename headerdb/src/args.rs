use crate::errors::{ConfigError, ConfigResult};
use clap::{Arg, Command, arg};
use headerdb_consensus::header_store::DEFAULT_RECORDS_CACHE_SIZE;
use headerdb_consensus_core::network::NetworkType;
use serde::Deserialize;
use std::{ffi::OsString, fs};
use toml::from_str;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Args {
    // NOTE: it is best if property names match config file fields
    pub appdir: Option<String>,
    pub logdir: Option<String>,
    #[serde(rename = "nologfiles")]
    pub no_log_files: bool,
    #[serde(rename = "loglevel")]
    pub log_level: String,
    pub testnet: bool,
    pub regtest: bool,
    pub reset_db: bool,
    pub yes: bool,
    /// Hash of a record to print instead of the chain head
    pub get: Option<String>,
    #[serde(rename = "cachesize")]
    pub cache_size: usize,
    #[serde(rename = "dbfileslimit")]
    pub db_files_limit: i32,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            appdir: None,
            logdir: None,
            no_log_files: false,
            log_level: "info".into(),
            testnet: false,
            regtest: false,
            reset_db: false,
            yes: false,
            get: None,
            cache_size: DEFAULT_RECORDS_CACHE_SIZE,
            db_files_limit: 128,
        }
    }
}

impl Args {
    pub fn network(&self) -> ConfigResult<NetworkType> {
        match (self.testnet, self.regtest) {
            (false, false) => Ok(NetworkType::Mainnet),
            (true, false) => Ok(NetworkType::Testnet),
            (false, true) => Ok(NetworkType::Regtest),
            (true, true) => Err(ConfigError::MultipleNetworks),
        }
    }
}

pub fn cli() -> Command {
    let defaults: Args = Default::default();

    Command::new("headerdb")
        .about(format!("{} v{}", env!("CARGO_PKG_DESCRIPTION"), env!("CARGO_PKG_VERSION")))
        .version(env!("CARGO_PKG_VERSION"))
        .arg(arg!(-C --configfile <CONFIG_FILE> "Path of config file."))
        .arg(arg!(-b --appdir <DATA_DIR> "Directory to store data."))
        .arg(arg!(--logdir <LOG_DIR> "Directory to log output."))
        .arg(arg!(--nologfiles "Disable logging to files."))
        .arg(
            Arg::new("log_level")
                .short('d')
                .long("loglevel")
                .env("HEADERDB_LOG_LEVEL")
                .value_name("LEVEL")
                .default_value("info")
                .require_equals(true)
                .help("Logging level for all subsystems {off, error, warn, info, debug, trace}\n-- You may also specify <subsystem>=<level>,<subsystem2>=<level>,... to set the log level for individual subsystems.".to_string()),
        )
        .arg(arg!(--testnet "Use the test network"))
        .arg(arg!(--regtest "Use the regression test network"))
        .arg(arg!(--"reset-db" "Reset the header store to the network genesis before reporting."))
        .arg(arg!(--yes "Answer yes to all interactive console questions"))
        .arg(
            Arg::new("get")
                .long("get")
                .value_name("HASH")
                .require_equals(true)
                .help("Print the stored record of the block with this hash instead of the chain head."),
        )
        .arg(
            Arg::new("cachesize")
                .long("cachesize")
                .require_equals(true)
                .value_parser(clap::value_parser!(usize))
                .help(format!("Number of header records kept in the read cache (default: {}).", defaults.cache_size)),
        )
        .arg(
            Arg::new("dbfileslimit")
                .long("dbfileslimit")
                .require_equals(true)
                .value_parser(clap::value_parser!(i32))
                .help(format!("Maximum number of files the database keeps open (default: {}).", defaults.db_files_limit)),
        )
}

pub fn parse_args() -> Args {
    match Args::parse(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => {
            println!("{err}");
            std::process::exit(1);
        }
    }
}

impl Args {
    pub fn parse<I, T>(itr: I) -> Result<Args, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let m: clap::ArgMatches = cli().try_get_matches_from(itr)?;
        let mut defaults: Args = Default::default();

        if let Some(config_file) = m.get_one::<String>("configfile") {
            let config_str = fs::read_to_string(config_file)?;
            defaults = from_str(&config_str).map_err(|toml_error| {
                clap::Error::raw(
                    clap::error::ErrorKind::ValueValidation,
                    format!("failed parsing config file, reason: {}", toml_error.message()),
                )
            })?;
        }

        let args = Args {
            appdir: m.get_one::<String>("appdir").cloned().or(defaults.appdir),
            logdir: m.get_one::<String>("logdir").cloned().or(defaults.logdir),
            no_log_files: arg_match_unwrap_or::<bool>(&m, "nologfiles", defaults.no_log_files),
            log_level: arg_match_unwrap_or::<String>(&m, "log_level", defaults.log_level),
            testnet: arg_match_unwrap_or::<bool>(&m, "testnet", defaults.testnet),
            regtest: arg_match_unwrap_or::<bool>(&m, "regtest", defaults.regtest),
            reset_db: arg_match_unwrap_or::<bool>(&m, "reset-db", defaults.reset_db),
            yes: arg_match_unwrap_or::<bool>(&m, "yes", defaults.yes),
            get: m.get_one::<String>("get").cloned().or(defaults.get),
            cache_size: arg_match_unwrap_or::<usize>(&m, "cachesize", defaults.cache_size),
            db_files_limit: arg_match_unwrap_or::<i32>(&m, "dbfileslimit", defaults.db_files_limit),
        };

        Ok(args)
    }
}

use clap::parser::ValueSource::DefaultValue;
use std::marker::{Send, Sync};
fn arg_match_unwrap_or<T: Clone + Send + Sync + 'static>(m: &clap::ArgMatches, arg_id: &str, default: T) -> T {
    m.get_one::<T>(arg_id).cloned().filter(|_| m.value_source(arg_id) != Some(DefaultValue)).unwrap_or(default)
}
