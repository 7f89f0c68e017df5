//! BH1750 ambient-light sensor (I²C, continuous high-resolution mode).
//!
//! The device is a one-command instrument: after power-on it is switched
//! into continuous 1 lx-resolution sampling and every subsequent two-byte
//! read returns the latest raw count. Counts divide by 1.2 to yield lux.

use embedded_hal::i2c::I2c;

const CMD_POWER_ON: u8 = 0x01;
const CMD_CONTINUOUS_HIGH_RES: u8 = 0x10;

/// Datasheet scale factor for the default measurement accuracy.
const COUNTS_PER_LUX: f32 = 1.2;

pub struct Bh1750<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Bh1750<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Power the sensor up and start continuous high-resolution sampling.
    ///
    /// The first conversion takes up to 180 ms; callers sampling on a
    /// multi-second cadence never notice.
    pub fn start(&mut self) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CMD_POWER_ON])?;
        self.i2c.write(self.address, &[CMD_CONTINUOUS_HIGH_RES])
    }

    /// Read the latest illuminance measurement.
    pub fn read_lux(&mut self) -> Result<f32, I2C::Error> {
        let mut raw = [0u8; 2];
        self.i2c.read(self.address, &mut raw)?;
        Ok(f32::from(u16::from_be_bytes(raw)) / COUNTS_PER_LUX)
    }
}
