//! Text form of a [`Reading`]: `"<temp> degC, <pressure> hPa, <humidity> %\n"`.

use core::fmt::Write;
use core::str::FromStr;

use heapless::String;

use crate::config::LINE_CAPACITY;
use crate::{ParseError, Reading};

const TEMPERATURE_UNIT: &str = " degC, ";
const PRESSURE_UNIT: &str = " hPa, ";
const HUMIDITY_UNIT: &str = " %";

/// Formats one output line, newline included.
///
/// Temperature and humidity get two decimals. Pressure gets two decimals and is
/// zero-padded to a minimum width of four characters.
pub fn format_line(reading: &Reading) -> Result<String<LINE_CAPACITY>, core::fmt::Error> {
    let mut line = String::new();
    writeln!(
        line,
        "{:.2}{}{:04.2}{}{:.2}{}",
        reading.temperature,
        TEMPERATURE_UNIT,
        reading.pressure,
        PRESSURE_UNIT,
        reading.humidity,
        HUMIDITY_UNIT,
    )?;
    Ok(line)
}

/// Parses a line produced by [`format_line`]. A trailing `\n` or `\r\n` is optional.
pub fn parse_line(line: &str) -> Result<Reading, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);

    let (temperature, rest) = line
        .split_once(TEMPERATURE_UNIT)
        .ok_or(ParseError::MissingField)?;
    let (pressure, rest) = rest
        .split_once(PRESSURE_UNIT)
        .ok_or(ParseError::MissingField)?;
    let humidity = rest
        .strip_suffix(HUMIDITY_UNIT)
        .ok_or(ParseError::MissingField)?;

    Ok(Reading {
        temperature: parse_value(temperature)?,
        pressure: parse_value(pressure)?,
        humidity: parse_value(humidity)?,
    })
}

fn parse_value(field: &str) -> Result<f32, ParseError> {
    f32::from_str(field).map_err(|_| ParseError::InvalidNumber)
}
