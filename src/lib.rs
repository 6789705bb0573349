#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod bme280_sensor;
pub mod config;
mod line_decoder;
mod monitor;
mod reading;
mod sensor;

pub use bme280_sensor::BME280Sensor;
pub use line_decoder::LineDecoder;
pub use monitor::Monitor;
pub use reading::{format_line, parse_line};
pub use sensor::EnvironmentSensor;

/// One set of values taken from the sensor in a single loop iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Degrees Celsius.
    pub temperature: f32,
    /// Hectopascals.
    pub pressure: f32,
    /// Relative humidity, percent.
    pub humidity: f32,
}

/// Failure of one of the monitor's collaborators, carrying its own error value.
#[derive(Debug)]
pub enum MonitorError<S, W> {
    Sensor(S),
    Serial(W),
    Format,
}

#[cfg(feature = "defmt")]
impl<S: core::fmt::Debug, W: core::fmt::Debug> defmt::Format for MonitorError<S, W> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Sensor(e) => defmt::write!(f, "sensor: {}", defmt::Debug2Format(e)),
            Self::Serial(e) => defmt::write!(f, "serial: {}", defmt::Debug2Format(e)),
            Self::Format => defmt::write!(f, "line does not fit the buffer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    MissingField,
    InvalidNumber,
    InvalidEncoding,
    LineTooLong,
}
