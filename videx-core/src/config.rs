//! Configuration loading for Videx services.
//!
//! Configuration is resolved in layers: built-in defaults, then an optional
//! TOML file, then `VIDEX_*` environment variables. The file is discovered
//! from an explicit path, the `VIDEX_CONFIG` variable, or a small set of
//! conventional locations. A `.env` file is honoured before any variable is
//! read.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::listing::fill::{CycleFill, PageFill, ShortFill};

/// Locations probed for a config file when none is given explicitly.
static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("videx.toml"),
        PathBuf::from("config/videx.toml"),
    ]
});

const ENV_CONFIG_PATH: &str = "VIDEX_CONFIG";
const ENV_DEFAULT_LIMIT: &str = "VIDEX_LISTING_DEFAULT_LIMIT";
const ENV_MAX_LIMIT: &str = "VIDEX_LISTING_MAX_LIMIT";
const ENV_FILL: &str = "VIDEX_LISTING_FILL";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    MissingConfig(PathBuf),

    /// A config file existed but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A config file was read but is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying TOML error.
        source: toml::de::Error,
    },

    /// A fill mode string matched no known strategy.
    #[error("unknown fill mode {0:?}, expected \"cycle\" or \"short\"")]
    InvalidFill(String),

    /// A numeric override could not be parsed.
    #[error("invalid value {value:?} for {name}")]
    InvalidLimit {
        /// The variable that carried the value.
        name: &'static str,
        /// The unparseable value.
        value: String,
    },

    /// The resolved limits contradict each other.
    #[error("default limit {default_limit} exceeds max limit {max_limit}")]
    Limits {
        /// The resolved default page limit.
        default_limit: usize,
        /// The resolved maximum page limit.
        max_limit: usize,
    },
}

/// How a page that comes up short of its limit is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Repeat the short page cyclically until it reaches the limit.
    #[default]
    Cycle,
    /// Return the short page as-is.
    Short,
}

impl FillMode {
    fn parse(raw: &str) -> Result<Self, ConfigLoadError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cycle" => Ok(FillMode::Cycle),
            "short" => Ok(FillMode::Short),
            _ => Err(ConfigLoadError::InvalidFill(raw.to_string())),
        }
    }

    /// The strategy implementing this mode.
    pub fn strategy<T: Clone>(&self) -> Box<dyn PageFill<T>> {
        match self {
            FillMode::Cycle => Box::new(CycleFill),
            FillMode::Short => Box::new(ShortFill),
        }
    }
}

/// Listing behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    /// Page limit applied when a request does not carry one.
    pub default_limit: usize,
    /// Upper bound any requested limit is clamped to.
    pub max_limit: usize,
    /// Fill strategy for underfilled pages.
    pub fill: FillMode,
}

impl Default for ListingConfig {
    fn default() -> Self {
        ListingConfig {
            default_limit: 24,
            max_limit: 100,
            fill: FillMode::Cycle,
        }
    }
}

impl ListingConfig {
    /// Resolves the effective limit for a request, clamping into `1..=max`.
    pub fn clamp(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).clamp(1, self.max_limit)
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VidexConfig {
    /// Listing behaviour.
    pub listing: ListingConfig,
}

/// On-disk schema. Everything is optional; absent values keep defaults.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    listing: FileListingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FileListingConfig {
    default_limit: Option<usize>,
    max_limit: Option<usize>,
    fill: Option<FillMode>,
}

/// Where the loaded config file came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    Explicit(PathBuf),
    Environment(PathBuf),
    Discovered(PathBuf),
    Defaults,
}

impl ConfigSource {
    fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(path)
            | ConfigSource::Environment(path)
            | ConfigSource::Discovered(path) => Some(path),
            ConfigSource::Defaults => None,
        }
    }
}

/// Layered configuration loader.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    skip_env_file: bool,
}

impl ConfigLoader {
    /// A loader with default discovery behaviour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads from an explicit config file. Loading fails if it is missing.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Reads environment variables from a specific `.env` file.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Skips the `.env` pass entirely.
    pub fn skip_env_file(mut self) -> Self {
        self.skip_env_file = true;
        self
    }

    /// Resolves the full configuration.
    pub fn load(self) -> Result<VidexConfig, ConfigLoadError> {
        if !self.skip_env_file {
            self.load_env_file();
        }

        let source = self.resolve_source();
        let mut config = match source.path() {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| {
                    ConfigLoadError::Read {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                let file: FileConfig =
                    toml::from_str(&raw).map_err(|source| ConfigLoadError::Parse {
                        path: path.to_path_buf(),
                        source,
                    })?;
                info!(path = %path.display(), "loaded config file");
                merge_file(file)
            }
            None => {
                debug!("no config file found, using defaults");
                VidexConfig::default()
            }
        };

        apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
        validate(&config)?;
        Ok(config)
    }

    fn load_env_file(&self) {
        let outcome = match &self.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| ()),
            None => dotenvy::dotenv().map(|_| ()),
        };
        match outcome {
            Ok(()) => debug!("loaded .env file"),
            // A missing .env file is the common case, not a fault.
            Err(dotenvy::Error::Io(_)) => {}
            Err(err) => warn!(error = %err, "failed to process .env file"),
        }
    }

    fn resolve_source(&self) -> ConfigSource {
        if let Some(path) = &self.config_path {
            return ConfigSource::Explicit(path.clone());
        }
        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            return ConfigSource::Environment(PathBuf::from(path));
        }
        for candidate in DEFAULT_CONFIG_LOCATIONS.iter() {
            if candidate.exists() {
                return ConfigSource::Discovered(candidate.clone());
            }
        }
        ConfigSource::Defaults
    }
}

/// Loads configuration with default discovery. Convenience for binaries.
pub fn load_default() -> Result<VidexConfig, ConfigLoadError> {
    ConfigLoader::new().load()
}

fn merge_file(file: FileConfig) -> VidexConfig {
    let defaults = ListingConfig::default();
    VidexConfig {
        listing: ListingConfig {
            default_limit: file.listing.default_limit.unwrap_or(defaults.default_limit),
            max_limit: file.listing.max_limit.unwrap_or(defaults.max_limit),
            fill: file.listing.fill.unwrap_or(defaults.fill),
        },
    }
}

fn apply_env_overrides(
    config: &mut VidexConfig,
    get: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigLoadError> {
    if let Some(raw) = get(ENV_DEFAULT_LIMIT) {
        config.listing.default_limit = parse_limit(ENV_DEFAULT_LIMIT, &raw)?;
    }
    if let Some(raw) = get(ENV_MAX_LIMIT) {
        config.listing.max_limit = parse_limit(ENV_MAX_LIMIT, &raw)?;
    }
    if let Some(raw) = get(ENV_FILL) {
        config.listing.fill = FillMode::parse(&raw)?;
    }
    Ok(())
}

fn parse_limit(name: &'static str, raw: &str) -> Result<usize, ConfigLoadError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|limit| *limit > 0)
        .ok_or_else(|| ConfigLoadError::InvalidLimit {
            name,
            value: raw.to_string(),
        })
}

fn validate(config: &VidexConfig) -> Result<(), ConfigLoadError> {
    let listing = &config.listing;
    if listing.default_limit > listing.max_limit {
        return Err(ConfigLoadError::Limits {
            default_limit: listing.default_limit,
            max_limit: listing.max_limit,
        });
    }
    Ok(())
}
