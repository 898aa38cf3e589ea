use async_trait::async_trait;

use crate::domain::device::{Device, DeviceFields};
use crate::domain::errors::DomainResult;

/// Repository trait for the Device aggregate
///
/// Implementations run inside the caller's unit of work; nothing here
/// commits on its own.
#[async_trait]
pub trait DeviceRepository: Send {
    /// Insert a device, assigning its id and creation timestamp
    ///
    /// Fails with `DuplicateMacAddress` if the MAC address is taken.
    async fn create(&mut self, fields: &DeviceFields) -> DomainResult<Device>;

    /// Find a device by ID, with its measures
    async fn find_by_id(&mut self, id: i64) -> DomainResult<Option<Device>>;

    /// All devices, each with its measures
    async fn list(&mut self) -> DomainResult<Vec<Device>>;

    /// Replace name, MAC address and location of a device
    async fn update(&mut self, id: i64, fields: &DeviceFields) -> DomainResult<Device>;

    /// Delete a device and all of its measures
    ///
    /// Returns the number of measures removed along with it.
    async fn delete(&mut self, id: i64) -> DomainResult<u64>;
}
