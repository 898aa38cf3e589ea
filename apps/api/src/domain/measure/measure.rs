use chrono::{DateTime, Utc};

/// A sensor reading attributed to one device
///
/// `device_id` and `recorded_at` are fixed at insert time; only `kind`
/// and `value` can be replaced afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub id: i64,
    pub device_id: i64,
    pub kind: String,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
}

/// The mutable part of a measure
///
/// # Invariants
/// - `kind` never carries leading or trailing whitespace
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureFields {
    kind: String,
    value: f64,
}

impl MeasureFields {
    /// Creates measure fields, stripping whitespace around the kind
    ///
    /// # Example
    /// ```
    /// use iot_registry_api::domain::measure::MeasureFields;
    ///
    /// let fields = MeasureFields::new("  temp ", 21.5);
    /// assert_eq!(fields.kind(), "temp");
    /// assert_eq!(fields.value(), 21.5);
    /// ```
    pub fn new(kind: impl AsRef<str>, value: f64) -> Self {
        Self {
            kind: kind.as_ref().trim().to_string(),
            value,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_surrounding_whitespace() {
        assert_eq!(MeasureFields::new("\t humidity \n", 1.0).kind(), "humidity");
    }

    #[test]
    fn keeps_inner_whitespace() {
        assert_eq!(MeasureFields::new(" air quality ", 1.0).kind(), "air quality");
    }

    #[test]
    fn whitespace_only_kind_becomes_empty() {
        assert_eq!(MeasureFields::new("   ", 0.0).kind(), "");
    }

    #[test]
    fn value_is_kept_verbatim() {
        assert_eq!(MeasureFields::new("pressure", -1013.25).value(), -1013.25);
    }
}
