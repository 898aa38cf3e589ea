// Domain layer module exports
// Domain is independent of infrastructure concerns

pub mod device;
pub mod errors;
pub mod measure;
pub mod repositories;
