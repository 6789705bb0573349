//! Streams BME280 readings over UART0 every 10 ms.
//!
//! Wiring (Raspberry Pi Pico):
//!
//! ```text
//! BME280 SDA -> GPIO4 (I2C0 SDA)
//! BME280 SCL -> GPIO5 (I2C0 SCL)
//! UART0 TX   -> GPIO0, 9600 baud 8N1
//! ```

#![no_std]
#![no_main]

use defmt::{Debug2Format, error, info};
use defmt_rtt as _;
use embassy_bme280_monitor::config::{SENSOR_ADDRESS, UART_BAUDRATE};
use embassy_bme280_monitor::{BME280Sensor, Monitor};
use embassy_executor::Spawner;
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::{bind_interrupts, i2c, uart};
use embassy_time::Delay;
use panic_probe as _;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    UART0_IRQ => uart::BufferedInterruptHandler<UART0>;
});

static TX_BUFFER: StaticCell<[u8; 256]> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    let sda = p.PIN_4;
    let scl = p.PIN_5;

    // Configure I2C
    let mut i2c = i2c::I2c::new_async(p.I2C0, scl, sda, Irqs, i2c::Config::default());

    // Configure UART, transmit only
    let mut config = uart::Config::default();
    config.baudrate = UART_BAUDRATE;
    let tx_buffer = &mut TX_BUFFER.init([0; 256])[..];
    let serial = uart::BufferedUartTx::new(p.UART0, Irqs, p.PIN_0, tx_buffer, config);

    // Create sensor instance
    let mut sensor = BME280Sensor::new(&mut i2c, SENSOR_ADDRESS, Delay);
    match sensor.init().await {
        Ok(()) => info!("BME280 initialized"),
        Err(e) => error!("Failed to initialize BME280: {:?}", Debug2Format(&e)),
    }

    // A failed init shows up as read errors on every iteration until reset.
    let mut monitor = Monitor::new(sensor, serial);
    match monitor.run().await {}
}
