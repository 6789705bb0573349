use bme280::Measurements;
use bme280::i2c::AsyncBME280;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::sensor::EnvironmentSensor;

pub struct BME280Sensor<'a, T: I2c, D: DelayNs> {
    device: AsyncBME280<&'a mut T>,
    delay: D,
    address: u8,
}

impl<'a, T: I2c, D: DelayNs> BME280Sensor<'a, T, D> {
    /// `address` is the 7-bit device address, 0x76 or 0x77 depending on SDO.
    pub fn new(i2c: &'a mut T, address: u8, delay: D) -> Self {
        Self {
            device: AsyncBME280::new(i2c, address),
            delay,
            address,
        }
    }

    /// Checks the chip id, resets the device and loads its calibration data.
    pub async fn init(&mut self) -> Result<(), bme280::Error<T::Error>> {
        info!("Initializing BME280 at address {=u8:#x}", self.address);
        self.device.init(&mut self.delay).await
    }

    async fn measure(&mut self) -> Result<Measurements<T::Error>, bme280::Error<T::Error>> {
        self.device.measure(&mut self.delay).await
    }
}

impl<T: I2c, D: DelayNs> EnvironmentSensor for BME280Sensor<'_, T, D> {
    type Error = bme280::Error<T::Error>;

    async fn read_temperature(&mut self) -> Result<f32, Self::Error> {
        Ok(self.measure().await?.temperature)
    }

    async fn read_pressure(&mut self) -> Result<f32, Self::Error> {
        let measurements = self.measure().await?;
        Ok(pascal_to_hectopascal(measurements.pressure))
    }

    async fn read_humidity(&mut self) -> Result<f32, Self::Error> {
        Ok(self.measure().await?.humidity)
    }
}

#[inline]
fn pascal_to_hectopascal(pascal: f32) -> f32 {
    pascal / 100.0
}
