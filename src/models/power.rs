// Battery reading

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryStatus {
    pub has_battery: bool,
    /// Raw charge as reported; may fall outside 0..=100 on some firmware.
    pub percent: f64,
}

impl BatteryStatus {
    pub fn absent() -> Self {
        Self {
            has_battery: false,
            percent: 0.0,
        }
    }
}
