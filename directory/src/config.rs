use crate::table::DEFAULT_TABLE_SIZE;
use serde::Deserialize;
use std::path::PathBuf;

pub const TABLE_SIZE_ENV: &str = "PHONEDIR_TABLE_SIZE";
pub const DATA_DIR_ENV: &str = "PHONEDIR_DATA";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub table_size: usize,
    pub data_dir: PathBuf,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            table_size: DEFAULT_TABLE_SIZE,
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl DirectoryConfig {
    /// Applies `PHONEDIR_TABLE_SIZE` and `PHONEDIR_DATA` on top of `self`.
    pub fn with_env(self) -> anyhow::Result<Self> {
        self.with_overrides(
            std::env::var(TABLE_SIZE_ENV).ok(),
            std::env::var(DATA_DIR_ENV).ok(),
        )
    }

    fn with_overrides(
        mut self,
        table_size: Option<String>,
        data_dir: Option<String>,
    ) -> anyhow::Result<Self> {
        if let Some(raw) = table_size {
            self.table_size = raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid {} '{}': {}", TABLE_SIZE_ENV, raw, e))?;
        }
        if let Some(dir) = data_dir {
            self.data_dir = PathBuf::from(dir);
        }
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.table_size == 0 {
            anyhow::bail!("table size must be at least 1");
        }
        Ok(())
    }
}
