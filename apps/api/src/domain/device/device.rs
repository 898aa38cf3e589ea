use chrono::{DateTime, Utc};

use crate::domain::measure::Measure;

/// Device aggregate root
///
/// A registered IoT endpoint together with the readings attributed to it.
///
/// # Invariants
/// - `mac_address` is unique across all devices (enforced by the store)
/// - `id` and `created_at` are assigned by the store and never change
/// - every measure in `measures` has `device_id == id`
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub mac_address: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub measures: Vec<Measure>,
}

/// The fields a client supplies when creating or replacing a device
///
/// Updates are full replacements: a missing `location` clears the stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFields {
    pub name: String,
    pub mac_address: String,
    pub location: Option<String>,
}

impl DeviceFields {
    /// Creates a new set of device fields
    ///
    /// # Example
    /// ```
    /// use iot_registry_api::domain::device::DeviceFields;
    ///
    /// let fields = DeviceFields::new("Sensor1", "AA:BB:CC:DD:EE:FF", None);
    /// assert_eq!(fields.mac_address, "AA:BB:CC:DD:EE:FF");
    /// assert!(fields.location.is_none());
    /// ```
    pub fn new(
        name: impl Into<String>,
        mac_address: impl Into<String>,
        location: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mac_address: mac_address.into(),
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_keep_location_when_given() {
        let fields = DeviceFields::new("Sensor", "00:11", Some("Roof".to_string()));
        assert_eq!(fields.location.as_deref(), Some("Roof"));
    }

    #[test]
    fn fields_without_location_clear_it() {
        let fields = DeviceFields::new("Sensor", "00:11", None);
        assert_eq!(fields, DeviceFields::new("Sensor".to_string(), "00:11".to_string(), None));
        assert!(fields.location.is_none());
    }
}
