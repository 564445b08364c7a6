use serde::Serialize;

/// One entry of the system power source enumeration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PowerSourceInfo {
    /// Name reported by the power source subsystem
    pub name: String,
    /// Current capacity, in percent or in the source's own units when `max_capacity` is set
    pub current_capacity: Option<i64>,
    /// Capacity at full charge in the same units as `current_capacity`
    pub max_capacity: Option<i64>,
    pub is_charging: bool,
}

impl PowerSourceInfo {
    /// Charge level in percent, if the source reports a current capacity
    ///
    /// macOS reports `Current Capacity` against a `Max Capacity` of 100, so this is the raw current value there.
    /// Sources that report in their own units (mAh, or Linux `charge_now`/`charge_full`) are scaled by their maximum
    /// rather than taken as is.
    pub fn charge_percentage(&self) -> Option<f64> {
        let current = self.current_capacity? as f64;
        match self.max_capacity {
            Some(max) if max > 0 => Some(current / max as f64 * 100.0),
            _ => Some(current),
        }
    }
}
