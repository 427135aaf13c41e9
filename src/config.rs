use crate::clock::{UnknownZoneError, Zone, DEFAULT_ZONE};
use crate::source::{JsonFileSource, PromotionSource, RestSource, SourceError, DEFAULT_TABLE};
use log::{debug, info};
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

const CONFIG_PATH_ENV_VAR: &str = "PROMOCAL_CONFIG";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// IANA name of the timezone that decides what "today" is
    pub(crate) timezone: String,
    pub(crate) log_file: Option<PathBuf>,
    /// Linked from shared promotions that have no source URL of their own
    pub(crate) share_fallback_url: String,
    pub(crate) source: Option<SourceConfig>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            timezone: String::from(DEFAULT_ZONE),
            log_file: None,
            share_fallback_url: String::new(),
            source: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub(crate) enum SourceConfig {
    /// A JSON array of promotion rows on disk
    File { path: PathBuf },
    /// A PostgREST table
    Rest {
        url: String,
        api_key: String,
        #[serde(default = "default_table")]
        table: String,
    },
}

fn default_table() -> String {
    String::from(DEFAULT_TABLE)
}

impl Config {
    /// Loads the config file named on the command line or in
    /// `$PROMOCAL_CONFIG`, which must exist, or else the one in the user's
    /// config directory, if any
    pub(crate) fn discover(explicit: Option<PathBuf>) -> Result<Config, ConfigError> {
        let required = explicit.or_else(|| {
            env::var_os(CONFIG_PATH_ENV_VAR)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        });
        if let Some(path) = required {
            Config::load(&path)
        } else if let Some(path) = default_path() {
            Config::load_if_exists(&path)
        } else {
            Ok(Config::default())
        }
    }

    pub(crate) fn load(path: &Path) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Config::parse(path, &src)
    }

    pub(crate) fn load_if_exists(path: &Path) -> Result<Config, ConfigError> {
        match fs::read_to_string(path) {
            Ok(src) => Config::parse(path, &src),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config file at {}; using defaults", path.display());
                Ok(Config::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_owned(),
                source,
            }),
        }
    }

    fn parse(path: &Path, src: &str) -> Result<Config, ConfigError> {
        let mut config = toml::from_str::<Config>(src).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        // Relative data paths are relative to the config file
        if let Some(SourceConfig::File { path: data }) = &mut config.source {
            if let Some(dir) = path.parent().filter(|_| data.is_relative()) {
                *data = dir.join(&*data);
            }
        }
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub(crate) fn zone(&self) -> Result<Zone, ConfigError> {
        Ok(Zone::from_name(&self.timezone)?)
    }

    /// Opens the configured promotion source, or a JSON file source for
    /// `data` if given
    pub(crate) fn open_source(
        &self,
        data: Option<&Path>,
    ) -> Result<Arc<dyn PromotionSource>, ConfigError> {
        let path = match (data, &self.source) {
            (Some(path), _) => path,
            (None, Some(SourceConfig::File { path })) => path.as_path(),
            (
                None,
                Some(SourceConfig::Rest {
                    url,
                    api_key,
                    table,
                }),
            ) => {
                info!("Reading promotions from table {table:?} at {url}");
                return Ok(Arc::new(RestSource::new(url, table, api_key)?));
            }
            (None, None) => return Err(ConfigError::NoSource),
        };
        let source = JsonFileSource::new(path);
        info!("Reading promotions from {}", source.path().display());
        Ok(Arc::new(source))
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("config.toml"))
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Zone(#[from] UnknownZoneError),
    #[error("no promotion source configured; add a [source] table to the config file or pass --data")]
    NoSource,
    #[error("failed to set up promotion source")]
    Source(#[from] SourceError),
}
