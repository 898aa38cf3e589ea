// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces on top of SQLite

pub mod sqlite_device_repository;
pub mod sqlite_measure_repository;

pub use sqlite_device_repository::SqliteDeviceRepository;
pub use sqlite_measure_repository::SqliteMeasureRepository;

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
