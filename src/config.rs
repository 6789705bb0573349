//! Fixed board and timing constants.

use embassy_time::Duration;

/// 7-bit I2C address of the BME280 with SDO tied to VCC.
///
/// embedded-hal addresses devices with 7 bits, so no `<< 1` shift is applied.
pub const SENSOR_ADDRESS: u8 = 0x77;

/// Pause between two emitted lines.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(10);

/// UART rate expected by the receiving monitor.
pub const UART_BAUDRATE: u32 = 9600;

/// Large enough for three `f32::MAX`-wide fields plus the template text.
pub const LINE_CAPACITY: usize = 160;
