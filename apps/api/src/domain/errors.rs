use thiserror::Error;

/// Errors surfaced by the domain and data access layers
///
/// Every failure a request can hit falls into one of these. Handlers map
/// them onto HTTP responses in `api::errors`.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Device not found")]
    DeviceNotFound(i64),

    #[error("Measure not found")]
    MeasureNotFound(i64),

    #[error("Device with MAC address {0} already exists")]
    DuplicateMacAddress(String),

    #[error("Device {0} does not exist")]
    UnknownDevice(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
