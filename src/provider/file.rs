use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use super::{InstanceProvider, ProviderError};
use crate::calendar::{InstanceRow, TimeSpan};

/// Instances exported to a TOML file as `[[instance]]` tables.
///
/// ```toml
/// [[instance]]
/// begin = 1543881600000
/// end = 1543968000000
/// start_day = 2458457
/// end_day = 2458457
/// ```
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
struct InstancesFile {
    #[serde(default, rename = "instance")]
    instances: Vec<InstanceRow>,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("minical").join("instances.toml"))
    }

    pub fn load(&self) -> Result<Vec<InstanceRow>, ProviderError> {
        let content = fs::read_to_string(&self.path)?;
        let file: InstancesFile = toml::from_str(&content)?;
        Ok(file.instances)
    }
}

impl InstanceProvider for FileProvider {
    fn name(&self) -> &'static str {
        "file"
    }

    fn is_read_permitted(&self) -> bool {
        self.path.is_file()
    }

    fn instances(&self, window: TimeSpan) -> Result<Vec<InstanceRow>, ProviderError> {
        let rows: Vec<InstanceRow> = self
            .load()?
            .into_iter()
            .filter(|row| row.overlaps(&window))
            .collect();
        debug!(path = %self.path.display(), rows = rows.len(), "read instances file");
        Ok(rows)
    }
}
