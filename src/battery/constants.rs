/// Power source description keys (`IOPSKeys.h`)
pub mod keys {
    pub const CURRENT_CAPACITY: &str = "Current Capacity";
    pub const MAX_CAPACITY: &str = "Max Capacity";
    pub const NAME: &str = "Name";
    pub const IS_CHARGING: &str = "Is Charging";
}

/// sysfs power supply class directory
pub const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

/// `type` value of a battery power supply
pub const POWER_SUPPLY_TYPE_BATTERY: &str = "Battery";
