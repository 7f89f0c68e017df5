//! Sensor subsystem — individual drivers and the aggregating [`EnvSensorHub`].
//!
//! The hub owns both I²C sensor drivers and produces one
//! [`SensorSnapshot`] per acquisition cycle through the
//! [`SensorPort`](crate::app::ports::SensorPort) boundary. Any bus fault
//! surfaces as a [`SensorError`] and leaves the previously published
//! snapshot in place; a flaky sensor must not take down the loop.

pub mod bh1750;

use bme280_rs::{Bme280, Configuration, Oversampling, SensorMode};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::app::ports::SensorPort;
use crate::app::snapshot::SensorSnapshot;
use crate::error::SensorError;
use bh1750::Bh1750;

/// Aggregates the BME280 (temperature / humidity / pressure) and the
/// BH1750 (illuminance) into a unified snapshot source.
pub struct EnvSensorHub<I2C1, I2C2, D> {
    bme280: Bme280<I2C1, D>,
    bh1750: Bh1750<I2C2>,
}

impl<I2C1, I2C2, D> EnvSensorHub<I2C1, I2C2, D>
where
    I2C1: I2c,
    I2C2: I2c,
    D: DelayNs,
{
    /// Construct the hub. Pass in the (shared) bus handles built in main
    /// where peripheral ownership is established.
    pub fn new(bme_i2c: I2C1, bme_addr: u8, delay: D, light_i2c: I2C2, light_addr: u8) -> Self {
        Self {
            bme280: Bme280::new_with_address(bme_i2c, bme_addr, delay),
            bh1750: Bh1750::new(light_i2c, light_addr),
        }
    }

    /// Bring both sensors into continuous sampling mode.
    ///
    /// On failure the hub is still usable: `read_all` will keep returning
    /// bus errors and the acquisition task will keep retrying.
    pub fn init(&mut self) -> Result<(), SensorError> {
        self.bme280.init().map_err(|_| SensorError::Bus)?;
        self.bme280
            .set_sampling_configuration(
                Configuration::default()
                    .with_temperature_oversampling(Oversampling::Oversample1)
                    .with_pressure_oversampling(Oversampling::Oversample1)
                    .with_humidity_oversampling(Oversampling::Oversample1)
                    .with_sensor_mode(SensorMode::Normal),
            )
            .map_err(|_| SensorError::Bus)?;
        self.bh1750.start().map_err(|_| SensorError::Bus)
    }
}

impl<I2C1, I2C2, D> SensorPort for EnvSensorHub<I2C1, I2C2, D>
where
    I2C1: I2c,
    I2C2: I2c,
    D: DelayNs,
{
    fn read_all(&mut self) -> Result<SensorSnapshot, SensorError> {
        let temperature = self
            .bme280
            .read_temperature()
            .map_err(|_| SensorError::Bus)?
            .ok_or(SensorError::NoData)?;
        let humidity = self
            .bme280
            .read_humidity()
            .map_err(|_| SensorError::Bus)?
            .ok_or(SensorError::NoData)?;
        let pressure_pa = self
            .bme280
            .read_pressure()
            .map_err(|_| SensorError::Bus)?
            .ok_or(SensorError::NoData)?;
        let light_lux = self.bh1750.read_lux().map_err(|_| SensorError::Bus)?;

        Ok(SensorSnapshot {
            temperature_c: temperature,
            humidity_pct: humidity,
            pressure_hpa: pressure_pa / 100.0,
            light_lux,
        })
    }
}
