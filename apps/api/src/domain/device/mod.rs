// Device aggregate root
// A device owns its measures; deleting a device removes all of them

#![allow(clippy::module_inception)]

pub mod device;

pub use device::{Device, DeviceFields};
