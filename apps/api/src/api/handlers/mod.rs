pub mod devices;
pub mod health;
pub mod measures;

use serde::Serialize;

/// Acknowledgement returned by delete endpoints
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
