use crate::errors::AppError;
use crate::models::{DrinkRecord, NewDrink};
use crate::storage::{StoredRow, load_drinks, persist_drinks, read_rows, write_rows};
use chrono::{DateTime, SubsecRound, Utc};
use std::{path::Path, path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// The drink log file plus the lock that keeps each read-modify-write whole.
/// Every call reads the file fresh; nothing is cached between requests.
#[derive(Clone)]
pub struct DrinkStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl DrinkStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Vec<DrinkRecord> {
        let _guard = self.lock.lock().await;
        load_drinks(&self.path).await
    }

    pub async fn save(&self, drinks: &[DrinkRecord]) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        persist_drinks(&self.path, drinks).await
    }

    pub async fn append(&self, drink: NewDrink) -> Result<DrinkRecord, AppError> {
        self.append_at(drink, Utc::now()).await
    }

    /// Builds the record stamped with `now` and puts it at the front of the
    /// log. Ids are the creation time in milliseconds. Rows that no longer
    /// read as drinks are written back as they were; a log file that is not
    /// a JSON array is left alone and the append fails.
    pub async fn append_at(
        &self,
        drink: NewDrink,
        now: DateTime<Utc>,
    ) -> Result<DrinkRecord, AppError> {
        let kind = drink.kind;
        let details = drink.into_details().map_err(AppError::bad_request)?;
        let timestamp = now.trunc_subsecs(3);
        let record = DrinkRecord {
            id: timestamp.timestamp_millis(),
            kind,
            timestamp,
            details,
        };

        let _guard = self.lock.lock().await;
        let mut rows = read_rows(&self.path).await?;
        rows.insert(0, StoredRow::Drink(record.clone()));
        write_rows(&self.path, &rows).await?;

        info!(id = record.id, kind = %record.kind, "logged drink");
        Ok(record)
    }

    /// Drops the record with `id`. Returns false, and leaves the file alone,
    /// when no record matches.
    pub async fn remove_by_id(&self, id: i64) -> Result<bool, AppError> {
        let _guard = self.lock.lock().await;
        let mut rows = read_rows(&self.path).await?;
        let before = rows.len();
        rows.retain(|row| row.drink().is_none_or(|drink| drink.id != id));

        if rows.len() == before {
            debug!(id, "no drink to remove");
            return Ok(false);
        }

        write_rows(&self.path, &rows).await?;
        info!(id, "removed drink");
        Ok(true)
    }
}
