use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection};
use tracing::debug;

use super::is_foreign_key_violation;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::measure::{Measure, MeasureFields};
use crate::domain::repositories::MeasureRepository;

const SELECT_MEASURES: &str = "SELECT id, device_id, type, mesure_value, date FROM measures";

#[derive(Debug, FromRow)]
struct MeasureRow {
    id: i64,
    device_id: i64,
    #[sqlx(rename = "type")]
    kind: String,
    mesure_value: f64,
    date: DateTime<Utc>,
}

impl From<MeasureRow> for Measure {
    fn from(row: MeasureRow) -> Self {
        Self {
            id: row.id,
            device_id: row.device_id,
            kind: row.kind,
            value: row.mesure_value,
            recorded_at: row.date,
        }
    }
}

/// Measures belonging to one device, oldest first
pub(crate) async fn fetch_for_device(
    conn: &mut SqliteConnection,
    device_id: i64,
) -> sqlx::Result<Vec<Measure>> {
    let rows = sqlx::query_as::<_, MeasureRow>(&format!(
        "{SELECT_MEASURES} WHERE device_id = ? ORDER BY id"
    ))
    .bind(device_id)
    .fetch_all(conn)
    .await?;

    Ok(rows.into_iter().map(Measure::from).collect())
}

/// Every measure in the store, ordered by id
pub(crate) async fn fetch_all(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Measure>> {
    let rows = sqlx::query_as::<_, MeasureRow>(&format!("{SELECT_MEASURES} ORDER BY id"))
        .fetch_all(conn)
        .await?;

    Ok(rows.into_iter().map(Measure::from).collect())
}

/// SQLite implementation of MeasureRepository
///
/// Borrows the connection of an open transaction; see `UnitOfWork`.
pub struct SqliteMeasureRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteMeasureRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    async fn fetch(&mut self, id: i64) -> sqlx::Result<Option<Measure>> {
        let row = sqlx::query_as::<_, MeasureRow>(&format!("{SELECT_MEASURES} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(Measure::from))
    }

    /// Re-reads a row this transaction just wrote
    async fn reload(&mut self, id: i64) -> sqlx::Result<Measure> {
        let row = sqlx::query_as::<_, MeasureRow>(&format!("{SELECT_MEASURES} WHERE id = ?"))
            .bind(id)
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(Measure::from(row))
    }
}

#[async_trait]
impl<'c> MeasureRepository for SqliteMeasureRepository<'c> {
    async fn create(&mut self, device_id: i64, fields: &MeasureFields) -> DomainResult<Measure> {
        // Owner check and insert are one statement, so the transaction takes
        // the write lock up front instead of upgrading a read lock later.
        let result = sqlx::query(
            r#"
            INSERT INTO measures (type, date, device_id, mesure_value)
            SELECT ?, ?, ?, ?
            WHERE EXISTS (SELECT 1 FROM devices WHERE id = ?)
            "#,
        )
        .bind(fields.kind())
        .bind(Utc::now())
        .bind(device_id)
        .bind(fields.value())
        .bind(device_id)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DomainError::UnknownDevice(device_id)
            } else {
                DomainError::Database(e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::DeviceNotFound(device_id));
        }

        let id = result.last_insert_rowid();
        debug!(measure_id = id, device_id, "inserted measure");

        Ok(self.reload(id).await?)
    }

    async fn find_by_id(&mut self, id: i64) -> DomainResult<Option<Measure>> {
        Ok(self.fetch(id).await?)
    }

    async fn list(&mut self) -> DomainResult<Vec<Measure>> {
        Ok(fetch_all(&mut *self.conn).await?)
    }

    async fn update(&mut self, id: i64, fields: &MeasureFields) -> DomainResult<Measure> {
        let result = sqlx::query("UPDATE measures SET type = ?, mesure_value = ? WHERE id = ?")
            .bind(fields.kind())
            .bind(fields.value())
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MeasureNotFound(id));
        }

        Ok(self.reload(id).await?)
    }

    async fn delete(&mut self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM measures WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MeasureNotFound(id));
        }

        Ok(())
    }
}
