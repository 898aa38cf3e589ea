// Repository interfaces (ports)
// Implemented by the infrastructure layer

pub mod device_repository;
pub mod measure_repository;

pub use device_repository::DeviceRepository;
pub use measure_repository::MeasureRepository;
