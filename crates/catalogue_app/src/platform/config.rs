//! Command line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use catalogue_core::{CardSettings, DateLocale, DEFAULT_EXCERPT_LIMIT, PLACEHOLDER_IMAGE};
use catalogue_engine::{CollectionSettings, RelaySettings, DEFAULT_ENDPOINT};
use catalogue_logging::LevelFilter;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "catalogue", version, about = "Browse a paginated article collection")]
pub struct Cli {
    /// Log level: off, error, warn, info, debug or trace.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the collection in the terminal.
    Browse(BrowseArgs),
    /// Serve the image relay over HTTP.
    Relay(RelayArgs),
}

#[derive(Debug, Clone, Args)]
pub struct BrowseArgs {
    /// Collection endpoint.
    #[arg(long, env = "CATALOGUE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Address the view is opened with; `sort`, `per_page` and `page` are read from it.
    #[arg(long, env = "CATALOGUE_LOCATION", default_value = "http://localhost:3000/ideas")]
    pub location: String,

    /// Date locale tag, e.g. `id-ID` or `en`.
    #[arg(long, default_value = "id-ID")]
    pub locale: String,

    #[arg(long, default_value_t = DEFAULT_EXCERPT_LIMIT)]
    pub excerpt_limit: usize,

    /// Route card images through this relay path, e.g. `/api/image-proxy`.
    #[arg(long)]
    pub image_proxy: Option<String>,

    #[arg(long, default_value = PLACEHOLDER_IMAGE)]
    pub placeholder_image: String,

    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// The terminal is the UI, so logs go to a file.
    #[arg(long, default_value = "catalogue.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct RelayArgs {
    #[arg(long, env = "CATALOGUE_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    #[arg(long, default_value_t = 20)]
    pub timeout_secs: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid location {value:?}: {reason}")]
    InvalidLocation { value: String, reason: String },
    #[error("invalid endpoint {value:?}: {reason}")]
    InvalidEndpoint { value: String, reason: String },
    #[error("unsupported locale {0:?} (expected an `id` or `en` tag)")]
    UnknownLocale(String),
    #[error("excerpt limit must be at least 1")]
    EmptyExcerpt,
    #[error("timeout must be at least 1 second")]
    ZeroTimeout,
}

#[derive(Debug, Clone)]
pub struct BrowseConfig {
    pub collection: CollectionSettings,
    pub location: Url,
    pub cards: CardSettings,
    pub log_file: PathBuf,
}

impl TryFrom<BrowseArgs> for BrowseConfig {
    type Error = ConfigError;

    fn try_from(args: BrowseArgs) -> Result<Self, Self::Error> {
        let location = Url::parse(&args.location).map_err(|err| ConfigError::InvalidLocation {
            value: args.location.clone(),
            reason: err.to_string(),
        })?;
        Url::parse(&args.endpoint).map_err(|err| ConfigError::InvalidEndpoint {
            value: args.endpoint.clone(),
            reason: err.to_string(),
        })?;
        let locale =
            DateLocale::from_tag(&args.locale).ok_or(ConfigError::UnknownLocale(args.locale))?;
        if args.excerpt_limit == 0 {
            return Err(ConfigError::EmptyExcerpt);
        }

        Ok(Self {
            collection: CollectionSettings {
                endpoint: args.endpoint,
                request_timeout: timeout(args.timeout_secs)?,
                ..CollectionSettings::default()
            },
            location,
            cards: CardSettings {
                excerpt_limit: args.excerpt_limit,
                placeholder_image: args.placeholder_image,
                image_proxy: args.image_proxy.filter(|proxy| !proxy.trim().is_empty()),
                locale,
            },
            log_file: args.log_file,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind: SocketAddr,
    pub settings: RelaySettings,
}

impl TryFrom<RelayArgs> for RelayConfig {
    type Error = ConfigError;

    fn try_from(args: RelayArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            bind: args.bind,
            settings: RelaySettings {
                request_timeout: timeout(args.timeout_secs)?,
                ..RelaySettings::default()
            },
        })
    }
}

fn timeout(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::ZeroTimeout);
    }
    Ok(Duration::from_secs(secs))
}
