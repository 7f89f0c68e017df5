//! GPIO / bus assignments for the GreenHaus controller board.
//!
//! Single source of truth: configuration defaults and drivers reference
//! this module rather than hard-coding pin numbers. Change a pin here and
//! it propagates everywhere.

// ---------------------------------------------------------------------------
// Actuator relays (active-high)
// ---------------------------------------------------------------------------

/// Digital output driving the ventilation fan relay.
pub const FAN_RELAY_GPIO: i32 = 25;
/// Digital output driving the irrigation pump relay.
pub const PUMP_RELAY_GPIO: i32 = 26;
/// Digital output driving the grow-light relay.
pub const GROW_LIGHT_RELAY_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// I²C bus (BME280 + BH1750)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;

/// Standard-mode bus clock; both sensors are fine at 100 kHz.
pub const I2C_BAUDRATE_HZ: u32 = 100_000;

/// BME280 environment sensor (SDO low).
pub const BME280_I2C_ADDR: u8 = 0x76;
/// BH1750 ambient-light sensor (ADDR pin low).
pub const BH1750_I2C_ADDR: u8 = 0x23;
