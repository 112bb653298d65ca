use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Weekday;
use color_eyre::eyre::{eyre, Result, WrapErr};
use ratatui::style::Color;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use crate::calendar::{GridOptions, GridStart};
use crate::symbols::SymbolSet;
use crate::theme::{parse_color, ThemeName};

const DEFAULT_FETCH_TIMEOUT_MS: u64 = 500;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    File,
    EventKit,
}

impl Default for ProviderKind {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            ProviderKind::EventKit
        } else {
            ProviderKind::File
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub first_day_of_week: Weekday,
    pub theme: ThemeName,
    pub symbol_set: SymbolSet,
    pub symbol_colour: Color,
    pub show_declined_events: bool,
    pub focus_on_current_week: bool,
    pub provider: ProviderKind,
    pub instances_file: Option<PathBuf>,
    pub fetch_timeout: Duration,
    pub refresh_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_day_of_week: Weekday::Mon,
            theme: ThemeName::default(),
            symbol_set: SymbolSet::default(),
            symbol_colour: Color::Cyan,
            show_declined_events: false,
            focus_on_current_week: false,
            provider: ProviderKind::default(),
            instances_file: None,
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
        }
    }
}

impl Config {
    /// Load `<config_dir>/minical/config.toml`, or defaults if absent.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                info!("no config file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading {}", path.display()))?;
        let config = Self::parse(&content).wrap_err_with(|| format!("parsing {}", path.display()))?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let config = file.into_config()?;
        debug!(?config, "config parsed");
        Ok(config)
    }

    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            first_day_of_week: self.first_day_of_week,
            start: if self.focus_on_current_week {
                GridStart::CurrentWeek
            } else {
                GridStart::NaturalMonth
            },
            include_declined: self.show_declined_events,
            ..GridOptions::default()
        }
    }

    pub fn instances_path(&self) -> Option<PathBuf> {
        self.instances_file
            .clone()
            .or_else(crate::provider::FileProvider::default_path)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("minical").join("config.toml"))
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default, deserialize_with = "deserialize_weekday")]
    first_day_of_week: Option<Weekday>,
    theme: Option<ThemeName>,
    symbol_set: Option<SymbolSet>,
    symbol_colour: Option<String>,
    show_declined_events: Option<bool>,
    focus_on_current_week: Option<bool>,
    provider: Option<ProviderKind>,
    instances_file: Option<PathBuf>,
    fetch_timeout_ms: Option<u64>,
    refresh_interval_secs: Option<u64>,
}

impl ConfigFile {
    fn into_config(self) -> Result<Config> {
        let defaults = Config::default();

        let symbol_colour = match self.symbol_colour.as_deref() {
            Some(value) => {
                parse_color(value).ok_or_else(|| eyre!("invalid symbol_colour: {value}"))?
            }
            None => defaults.symbol_colour,
        };

        let refresh_interval = match self.refresh_interval_secs {
            Some(0) => return Err(eyre!("refresh_interval_secs must be positive")),
            Some(secs) => Duration::from_secs(secs),
            None => defaults.refresh_interval,
        };

        Ok(Config {
            first_day_of_week: self.first_day_of_week.unwrap_or(defaults.first_day_of_week),
            theme: self.theme.unwrap_or(defaults.theme),
            symbol_set: self.symbol_set.unwrap_or(defaults.symbol_set),
            symbol_colour,
            show_declined_events: self
                .show_declined_events
                .unwrap_or(defaults.show_declined_events),
            focus_on_current_week: self
                .focus_on_current_week
                .unwrap_or(defaults.focus_on_current_week),
            provider: self.provider.unwrap_or(defaults.provider),
            instances_file: self.instances_file,
            fetch_timeout: self
                .fetch_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.fetch_timeout),
            refresh_interval,
        })
    }
}

fn deserialize_weekday<'de, D>(deserializer: D) -> std::result::Result<Option<Weekday>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    value
        .map(|s| {
            s.trim()
                .parse::<Weekday>()
                .map_err(|_| serde::de::Error::custom(format!("invalid weekday: {s}")))
        })
        .transpose()
}
