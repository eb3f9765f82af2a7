use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::LedgerError;
use crate::model::cpi::CpiTable;
use crate::model::month::MonthKey;

const CONFIG_DIR_NAME: &str = ".cpiledger";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LedgerConfig {
    /// Month whose CPI defines "today's dollars".
    pub base_month: MonthKey,
    pub min_month: MonthKey,
    pub max_month: MonthKey,
    /// JSON table to load instead of the bundled snapshot.
    pub cpi_table: Option<PathBuf>,
    pub reset_ids_on_clear: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_month: MonthKey::from_static("2025-09"),
            min_month: MonthKey::from_static("1913-01"),
            max_month: MonthKey::from_static("2025-09"),
            cpi_table: None,
            reset_ids_on_clear: true,
        }
    }
}

impl LedgerConfig {
    /// `~/.cpiledger`, shared with the log file.
    pub fn default_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home_dir.join(CONFIG_DIR_NAME))
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::default_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Reads the config at `path` (or the default location), writing defaults first if it is missing.
    pub fn load_or_init(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => Self::default_path()?,
        };

        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let config = LedgerConfig::default();
            config.save(&path)?;
            info!(path = %path.display(), "wrote default configuration");
            return Ok(config);
        }

        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open config {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: LedgerConfig = serde_json::from_reader(reader)
            .with_context(|| format!("Could not parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.min_month > self.max_month {
            return Err(LedgerError::InvalidConfig(format!(
                "min_month {} is after max_month {}",
                self.min_month, self.max_month
            )));
        }
        Ok(())
    }

    /// Loads the configured table, or the bundled one when none is set.
    pub fn load_table(&self) -> Result<CpiTable> {
        match &self.cpi_table {
            Some(path) => CpiTable::from_json_file(path),
            None => Ok(CpiTable::builtin()?),
        }
    }
}
