//! Blocking I²C bus splitter.
//!
//! The BME280 driver and the BH1750 driver each want to own an
//! `embedded_hal::i2c::I2c` instance, but the board has one physical bus.
//! [`SharedI2c`] hands every sensor a lightweight handle onto one
//! `RefCell`-guarded bus driver. All bus traffic happens from the
//! acquisition task, so the `RefCell` is never contended.

use core::cell::RefCell;

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};

/// A per-device handle onto the shared bus.
pub struct SharedI2c<'a, T> {
    bus: &'a RefCell<T>,
}

impl<'a, T> SharedI2c<'a, T> {
    pub fn new(bus: &'a RefCell<T>) -> Self {
        Self { bus }
    }
}

impl<T: I2c> ErrorType for SharedI2c<'_, T> {
    type Error = T::Error;
}

impl<T: I2c> I2c<SevenBitAddress> for SharedI2c<'_, T> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.bus.borrow_mut().transaction(address, operations)
    }
}
