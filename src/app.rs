use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Local, TimeZone};
use color_eyre::eyre::{eyre, Result};
use tracing::{debug, info, warn};

use crate::calendar::{compute_window, GridOptions, MonthGrid};
use crate::config::{Config, ProviderKind};
use crate::input::Action;
use crate::provider::{fetch_instances, FileProvider, InstanceProvider, Resolver, SystemClock};
use crate::theme::Theme;

pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub access_granted: bool,
    pub config: Config,
    pub theme: Theme,
    pub grid: MonthGrid,
    resolver: Resolver,
    last_refresh: Instant,
}

impl App {
    pub fn new(config: Config, resolver: Resolver) -> Self {
        let today = resolver.today();
        let access_granted = resolver.provider.is_read_permitted();
        Self {
            running: true,
            show_help: false,
            status_message: None,
            access_granted,
            theme: Theme::preset(config.theme),
            grid: MonthGrid::build(today, &[], config.grid_options(), &Local),
            config,
            resolver,
            last_refresh: Instant::now(),
        }
    }

    pub async fn refresh(&mut self) {
        self.access_granted = self.resolver.provider.is_read_permitted();
        if !self.access_granted {
            warn!(source = self.resolver.provider.name(), "read access not granted");
        }
        self.grid = build_grid(
            &self.resolver,
            self.config.grid_options(),
            self.config.fetch_timeout,
            &Local,
        )
        .await;
        self.last_refresh = Instant::now();
        info!(
            today = %self.grid.today,
            instances = self.grid.total_instances(),
            "grid refreshed"
        );
    }

    /// Date rollover or the periodic interval elapsing.
    pub fn needs_refresh(&self) -> bool {
        self.resolver.today() != self.grid.today
            || self.last_refresh.elapsed() >= self.config.refresh_interval
    }

    pub async fn handle(&mut self, action: Action) {
        debug!(?action, "action");
        match action {
            Action::Quit => self.running = false,
            Action::Refresh => {
                self.refresh().await;
                self.status_message = Some("Refreshed".to_string());
            }
            Action::CycleSymbols => {
                self.config.symbol_set = self.config.symbol_set.next();
                self.status_message = Some(format!("Symbols: {}", self.config.symbol_set.name()));
            }
            Action::ToggleWeekFocus => {
                self.config.focus_on_current_week = !self.config.focus_on_current_week;
                self.refresh().await;
                self.status_message = Some(
                    if self.config.focus_on_current_week {
                        "Focus: current week"
                    } else {
                        "Focus: month"
                    }
                    .to_string(),
                );
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::CloseHelp => self.show_help = false,
        }
    }
}

/// One full render pass: window, bounded fetch, grid, classification, counts.
pub async fn build_grid<Tz: TimeZone>(
    resolver: &Resolver,
    options: GridOptions,
    fetch_timeout: Duration,
    local: &Tz,
) -> MonthGrid {
    let today = resolver.today();
    let window = compute_window(today, local);
    let intervals = fetch_instances(resolver.provider.clone(), window, fetch_timeout).await;
    MonthGrid::build(today, &intervals, options, local)
}

/// Wire the configured provider to the system clock.
pub fn resolver_from_config(config: &Config) -> Result<Resolver> {
    let provider: Arc<dyn InstanceProvider> = match config.provider {
        ProviderKind::File => {
            let path = config
                .instances_path()
                .ok_or_else(|| eyre!("no data directory for the instances file"))?;
            info!(path = %path.display(), "using instances file");
            Arc::new(FileProvider::new(path))
        }
        ProviderKind::EventKit => eventkit_provider()?,
    };
    Ok(Resolver::new(Arc::new(SystemClock), provider))
}

#[cfg(target_os = "macos")]
fn eventkit_provider() -> Result<Arc<dyn InstanceProvider>> {
    let provider = crate::provider::eventkit::EventKitProvider;
    provider.request_access()?;
    Ok(Arc::new(provider))
}

#[cfg(not(target_os = "macos"))]
fn eventkit_provider() -> Result<Arc<dyn InstanceProvider>> {
    Err(crate::provider::ProviderError::Unsupported(
        "eventkit is only available on macOS".to_string(),
    )
    .into())
}
