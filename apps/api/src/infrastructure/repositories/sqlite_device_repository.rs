use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection};
use tracing::debug;

use super::is_unique_violation;
use super::sqlite_measure_repository::{fetch_all, fetch_for_device};
use crate::domain::device::{Device, DeviceFields};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::measure::Measure;
use crate::domain::repositories::DeviceRepository;

const SELECT_DEVICES: &str = "SELECT id, nom, mac_address, location, created_at FROM devices";

#[derive(Debug, FromRow)]
struct DeviceRow {
    id: i64,
    nom: String,
    mac_address: String,
    location: Option<String>,
    created_at: DateTime<Utc>,
}

impl DeviceRow {
    fn into_device(self, measures: Vec<Measure>) -> Device {
        Device {
            id: self.id,
            name: self.nom,
            mac_address: self.mac_address,
            location: self.location,
            created_at: self.created_at,
            measures,
        }
    }
}

/// SQLite implementation of DeviceRepository
///
/// Devices are always returned with their measures loaded. Deleting a
/// device removes its measures explicitly rather than relying on the
/// schema's `ON DELETE CASCADE`, so databases created without that clause
/// behave the same way.
pub struct SqliteDeviceRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteDeviceRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    fn map_write_error(e: sqlx::Error, fields: &DeviceFields) -> DomainError {
        if is_unique_violation(&e) {
            DomainError::DuplicateMacAddress(fields.mac_address.clone())
        } else {
            DomainError::Database(e)
        }
    }
}

#[async_trait]
impl<'c> DeviceRepository for SqliteDeviceRepository<'c> {
    async fn create(&mut self, fields: &DeviceFields) -> DomainResult<Device> {
        let result = sqlx::query(
            r#"
            INSERT INTO devices (nom, mac_address, location, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.mac_address)
        .bind(fields.location.as_deref())
        .bind(Utc::now())
        .execute(&mut *self.conn)
        .await
        .map_err(|e| Self::map_write_error(e, fields))?;

        let id = result.last_insert_rowid();
        debug!(device_id = id, mac_address = %fields.mac_address, "inserted device");

        self.find_by_id(id)
            .await?
            .ok_or(DomainError::Database(sqlx::Error::RowNotFound))
    }

    async fn find_by_id(&mut self, id: i64) -> DomainResult<Option<Device>> {
        let row = sqlx::query_as::<_, DeviceRow>(&format!("{SELECT_DEVICES} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let measures = fetch_for_device(&mut *self.conn, id).await?;
        Ok(Some(row.into_device(measures)))
    }

    async fn list(&mut self) -> DomainResult<Vec<Device>> {
        let rows = sqlx::query_as::<_, DeviceRow>(&format!("{SELECT_DEVICES} ORDER BY id"))
            .fetch_all(&mut *self.conn)
            .await?;

        let mut by_device: HashMap<i64, Vec<Measure>> = HashMap::new();
        for measure in fetch_all(&mut *self.conn).await? {
            by_device.entry(measure.device_id).or_default().push(measure);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let measures = by_device.remove(&row.id).unwrap_or_default();
                row.into_device(measures)
            })
            .collect())
    }

    async fn update(&mut self, id: i64, fields: &DeviceFields) -> DomainResult<Device> {
        let result = sqlx::query(
            r#"
            UPDATE devices
            SET nom = ?, mac_address = ?, location = ?
            WHERE id = ?
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.mac_address)
        .bind(fields.location.as_deref())
        .bind(id)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| Self::map_write_error(e, fields))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::DeviceNotFound(id));
        }

        self.find_by_id(id)
            .await?
            .ok_or(DomainError::Database(sqlx::Error::RowNotFound))
    }

    async fn delete(&mut self, id: i64) -> DomainResult<u64> {
        let removed = sqlx::query("DELETE FROM measures WHERE device_id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM devices WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::DeviceNotFound(id));
        }

        Ok(removed)
    }
}
