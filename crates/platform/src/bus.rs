//! I2C port-expander transport
//!
//! The keypad matrix hangs off a PCF8574-style quasi-bidirectional expander:
//! writing a mask drives the scan lines, reading the port returns the live
//! pin levels. The bus is stateless between calls — strictly sequential
//! request/response, no transaction held across poll cycles.

use embedded_hal_async::i2c::I2c;

/// Transport to an 8-bit I2C port expander.
pub trait ExpanderBus {
    /// Error type
    type Error: core::fmt::Debug;

    /// Drive the expander port with `mask` (scan-line selection).
    fn write_mask(
        &mut self,
        address: u8,
        mask: u8,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Read the current port levels.
    fn read_port(
        &mut self,
        address: u8,
    ) -> impl core::future::Future<Output = Result<u8, Self::Error>>;

    /// Address-only transmission: succeeds iff the device ACKs.
    fn probe(
        &mut self,
        address: u8,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;
}

/// [`ExpanderBus`] implementation over any `embedded-hal-async` I2C master.
///
/// The PCF8574 has no registers: a plain one-byte write sets the port, a
/// plain one-byte read samples it.
pub struct Pcf8574Bus<I2C> {
    i2c: I2C,
}

impl<I2C> Pcf8574Bus<I2C> {
    /// Wrap an async I2C master.
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Release the underlying I2C master.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> ExpanderBus for Pcf8574Bus<I2C> {
    type Error = I2C::Error;

    async fn write_mask(&mut self, address: u8, mask: u8) -> Result<(), Self::Error> {
        self.i2c.write(address, &[mask]).await
    }

    async fn read_port(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut level = 0u8;
        self.i2c
            .read(address, core::slice::from_mut(&mut level))
            .await?;
        Ok(level)
    }

    async fn probe(&mut self, address: u8) -> Result<(), Self::Error> {
        self.i2c.write(address, &[]).await
    }
}
