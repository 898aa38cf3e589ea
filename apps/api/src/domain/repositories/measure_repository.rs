use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::measure::{Measure, MeasureFields};

/// Repository trait for measures
#[async_trait]
pub trait MeasureRepository: Send {
    /// Insert a measure for `device_id`, stamping it with the current time
    ///
    /// The owner check happens in the same statement as the insert: a
    /// missing device yields `DeviceNotFound` and nothing is written.
    async fn create(&mut self, device_id: i64, fields: &MeasureFields) -> DomainResult<Measure>;

    /// Find a measure by ID
    async fn find_by_id(&mut self, id: i64) -> DomainResult<Option<Measure>>;

    /// All measures across all devices
    async fn list(&mut self) -> DomainResult<Vec<Measure>>;

    /// Replace kind and value; owner and timestamp stay untouched
    async fn update(&mut self, id: i64, fields: &MeasureFields) -> DomainResult<Measure>;

    /// Delete a single measure
    async fn delete(&mut self, id: i64) -> DomainResult<()>;
}
