//! Calendar instance sources and the clock they are read against.
//!
//! Everything platform-bound sits behind [`Clock`] and [`InstanceProvider`]
//! so the render pipeline can be driven by fakes in tests.

#[cfg(target_os = "macos")]
pub mod eventkit;
pub mod file;

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::calendar::{EventInterval, InstanceRow, TimeSpan};

pub use file::FileProvider;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Calendar access denied")]
    AccessDenied,

    #[error("Provider not supported: {0}")]
    Unsupported(String),
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Today according to the device's local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// A device calendar able to list instances overlapping a window.
pub trait InstanceProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_read_permitted(&self) -> bool;

    fn instances(&self, window: TimeSpan) -> Result<Vec<InstanceRow>, ProviderError>;
}

/// Capabilities handed to the application instead of global accessors.
#[derive(Clone)]
pub struct Resolver {
    pub clock: Arc<dyn Clock>,
    pub provider: Arc<dyn InstanceProvider>,
}

impl Resolver {
    pub fn new(clock: Arc<dyn Clock>, provider: Arc<dyn InstanceProvider>) -> Self {
        Self { clock, provider }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

/// Query `provider` with a bounded wait.
///
/// Missing permission, provider errors and timeouts all yield an empty set;
/// the grid is then drawn without density markers.
#[instrument(skip(provider), fields(source = provider.name()))]
pub async fn fetch_instances(
    provider: Arc<dyn InstanceProvider>,
    window: TimeSpan,
    timeout: Duration,
) -> Vec<EventInterval> {
    if !provider.is_read_permitted() {
        debug!("calendar read not permitted");
        return Vec::new();
    }

    let query = tokio::task::spawn_blocking(move || provider.instances(window));
    let rows = match tokio::time::timeout(timeout, query).await {
        Ok(Ok(Ok(rows))) => rows,
        Ok(Ok(Err(err))) => {
            warn!(error = %err, "calendar provider query failed");
            return Vec::new();
        }
        Ok(Err(err)) => {
            warn!(error = %err, "calendar provider task aborted");
            return Vec::new();
        }
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "calendar provider timed out");
            return Vec::new();
        }
    };

    let intervals = to_intervals(&rows);
    debug!(rows = rows.len(), intervals = intervals.len(), "instances fetched");
    intervals
}

/// Convert provider rows, dropping (and logging) malformed ones.
pub fn to_intervals(rows: &[InstanceRow]) -> Vec<EventInterval> {
    rows.iter()
        .filter_map(|row| match EventInterval::from_row(row) {
            Ok(interval) => Some(interval),
            Err(err) => {
                warn!(error = %err, "skipping instance");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    const DEC_4: i64 = 1_543_881_600_000;
    const DAY: i64 = 86_400_000;

    struct FakeProvider {
        permitted: bool,
        delay: Duration,
        rows: Vec<InstanceRow>,
    }

    impl InstanceProvider for FakeProvider {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn is_read_permitted(&self) -> bool {
            self.permitted
        }

        fn instances(&self, _window: TimeSpan) -> Result<Vec<InstanceRow>, ProviderError> {
            thread::sleep(self.delay);
            Ok(self.rows.clone())
        }
    }

    struct FailingProvider;

    impl InstanceProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn is_read_permitted(&self) -> bool {
            true
        }

        fn instances(&self, _window: TimeSpan) -> Result<Vec<InstanceRow>, ProviderError> {
            Err(ProviderError::AccessDenied)
        }
    }

    fn window() -> TimeSpan {
        TimeSpan {
            start: DEC_4 - 45 * DAY,
            end: DEC_4 + 45 * DAY,
        }
    }

    fn rows() -> Vec<InstanceRow> {
        vec![
            InstanceRow::new(DEC_4, DEC_4 + DAY, 2_458_457, 2_458_457),
            InstanceRow::new(DEC_4, DEC_4 - 1, 2_458_457, 2_458_457),
        ]
    }

    #[tokio::test]
    async fn fetch_converts_rows_and_skips_invalid_ones() {
        let provider = Arc::new(FakeProvider {
            permitted: true,
            delay: Duration::ZERO,
            rows: rows(),
        });
        let intervals = fetch_instances(provider, window(), Duration::from_secs(5)).await;
        assert_eq!(intervals.len(), 1);
        assert!(intervals[0].is_all_day());
    }

    #[tokio::test]
    async fn fetch_without_permission_is_empty() {
        let provider = Arc::new(FakeProvider {
            permitted: false,
            delay: Duration::ZERO,
            rows: rows(),
        });
        assert!(fetch_instances(provider, window(), Duration::from_secs(5)).await.is_empty());
    }

    #[tokio::test]
    async fn fetch_that_times_out_is_empty() {
        let provider = Arc::new(FakeProvider {
            permitted: true,
            delay: Duration::from_millis(300),
            rows: rows(),
        });
        assert!(fetch_instances(provider, window(), Duration::from_millis(10)).await.is_empty());
    }

    #[tokio::test]
    async fn fetch_with_provider_error_is_empty() {
        let provider = Arc::new(FailingProvider);
        assert!(fetch_instances(provider, window(), Duration::from_secs(5)).await.is_empty());
    }

    #[test]
    fn fixed_clock_returns_its_date() {
        let date = NaiveDate::from_ymd_opt(2018, 12, 4).expect("valid date");
        let resolver = Resolver::new(
            Arc::new(FixedClock(date)),
            Arc::new(FailingProvider),
        );
        assert_eq!(resolver.today(), date);
    }
}
