// Measure entity
// A single sensor reading that always belongs to exactly one device

#![allow(clippy::module_inception)]

pub mod measure;

pub use measure::{Measure, MeasureFields};
