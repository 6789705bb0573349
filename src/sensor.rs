/// Capability exposed by an environmental sensor driver.
///
/// Every read talks to the device; failures are whatever the driver reports.
pub trait EnvironmentSensor {
    type Error;

    /// Degrees Celsius.
    fn read_temperature(&mut self) -> impl Future<Output = Result<f32, Self::Error>>;

    /// Hectopascals.
    fn read_pressure(&mut self) -> impl Future<Output = Result<f32, Self::Error>>;

    /// Relative humidity in percent.
    fn read_humidity(&mut self) -> impl Future<Output = Result<f32, Self::Error>>;
}
