use crate::errors::AppError;
use crate::models::DrinkRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub const DATA_PATH_ENV: &str = "DRINK_LOG_DATA_PATH";

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var(DATA_PATH_ENV) {
        return PathBuf::from(path);
    }

    PathBuf::from("data/drinks.json")
}

/// One entry of the log file. Entries that no longer read as a drink are
/// carried as raw JSON so a later write puts them back untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredRow {
    Drink(DrinkRecord),
    Unreadable(Value),
}

impl StoredRow {
    pub fn drink(&self) -> Option<&DrinkRecord> {
        match self {
            StoredRow::Drink(record) => Some(record),
            StoredRow::Unreadable(_) => None,
        }
    }
}

/// Reads every row of the log. A missing file is an empty log; a file that
/// cannot be read or is not a JSON array is an error so nothing overwrites
/// it.
pub async fn read_rows(path: &Path) -> Result<Vec<StoredRow>, AppError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let rows: Vec<StoredRow> = serde_json::from_slice(&bytes)?;
    for (index, row) in rows.iter().enumerate() {
        if let StoredRow::Unreadable(_) = row {
            warn!(index, "keeping unreadable drink record as-is");
        }
    }
    Ok(rows)
}

/// Reads the stored drinks for display. A missing or corrupt file reads as
/// an empty log.
pub async fn load_drinks(path: &Path) -> Vec<DrinkRecord> {
    match read_rows(path).await {
        Ok(rows) => rows
            .into_iter()
            .filter_map(|row| match row {
                StoredRow::Drink(record) => Some(record),
                StoredRow::Unreadable(_) => None,
            })
            .collect(),
        Err(err) => {
            error!("failed to load data file: {}", err.message);
            Vec::new()
        }
    }
}

pub async fn write_rows(path: &Path, rows: &[StoredRow]) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(rows)?;
    fs::write(path, payload).await?;
    Ok(())
}

pub async fn persist_drinks(path: &Path, drinks: &[DrinkRecord]) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(drinks)?;
    fs::write(path, payload).await?;
    Ok(())
}
