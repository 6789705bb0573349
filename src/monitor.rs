use core::convert::Infallible;
use core::fmt::Debug;

use embassy_time::Timer;
use embedded_io_async::Write;

use crate::config::SAMPLE_INTERVAL;
use crate::reading::format_line;
use crate::sensor::EnvironmentSensor;
use crate::{MonitorError, Reading};

/// Owns the sensor and the serial sink and drives the read-format-emit-wait cycle.
pub struct Monitor<S, W> {
    sensor: S,
    serial: W,
}

impl<S: EnvironmentSensor, W: Write> Monitor<S, W> {
    pub fn new(sensor: S, serial: W) -> Self {
        Self { sensor, serial }
    }

    /// Reads temperature, pressure and humidity, in that order.
    pub async fn sample(&mut self) -> Result<Reading, MonitorError<S::Error, W::Error>> {
        let temperature = self
            .sensor
            .read_temperature()
            .await
            .map_err(MonitorError::Sensor)?;
        let pressure = self
            .sensor
            .read_pressure()
            .await
            .map_err(MonitorError::Sensor)?;
        let humidity = self
            .sensor
            .read_humidity()
            .await
            .map_err(MonitorError::Sensor)?;

        Ok(Reading {
            temperature,
            pressure,
            humidity,
        })
    }

    /// Takes one reading and writes its line to the serial sink.
    pub async fn step(&mut self) -> Result<Reading, MonitorError<S::Error, W::Error>> {
        let reading = self.sample().await?;
        let line = format_line(&reading).map_err(|_| MonitorError::Format)?;
        self.serial
            .write_all(line.as_bytes())
            .await
            .map_err(MonitorError::Serial)?;
        trace!("{}", reading);
        Ok(reading)
    }

    /// Samples forever. A failed iteration is reported with the collaborator's
    /// error and the next one starts after the usual interval.
    pub async fn run(&mut self) -> Infallible
    where
        S::Error: Debug,
    {
        info!("Sampling every {=u64} ms", SAMPLE_INTERVAL.as_millis());
        loop {
            if let Err(e) = self.step().await {
                error!("Sample failed: {}", e);
            }
            Timer::after(SAMPLE_INTERVAL).await;
        }
    }

    pub fn release(self) -> (S, W) {
        (self.sensor, self.serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_futures::select::{Either, select};
    use embassy_time::{Duration, Instant};
    use embedded_io_async::{ErrorKind, ErrorType};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Temperature,
        Pressure,
        Humidity,
    }

    #[derive(Debug, PartialEq)]
    enum SensorFault {
        Bus,
    }

    struct FakeSensor {
        calls: Vec<Call>,
        fail_at: Option<usize>,
    }

    impl FakeSensor {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                fail_at: None,
            }
        }

        fn failing_at(call: usize) -> Self {
            Self {
                calls: Vec::new(),
                fail_at: Some(call),
            }
        }

        fn record(&mut self, call: Call, value: f32) -> Result<f32, SensorFault> {
            self.calls.push(call);
            if self.fail_at == Some(self.calls.len()) {
                return Err(SensorFault::Bus);
            }
            Ok(value)
        }
    }

    impl EnvironmentSensor for FakeSensor {
        type Error = SensorFault;

        async fn read_temperature(&mut self) -> Result<f32, SensorFault> {
            self.record(Call::Temperature, 23.456)
        }

        async fn read_pressure(&mut self) -> Result<f32, SensorFault> {
            self.record(Call::Pressure, 987.1)
        }

        async fn read_humidity(&mut self) -> Result<f32, SensorFault> {
            self.record(Call::Humidity, 45.0)
        }
    }

    #[derive(Default)]
    struct RecordingSerial {
        lines: Vec<(Instant, String)>,
    }

    impl ErrorType for RecordingSerial {
        type Error = Infallible;
    }

    impl Write for RecordingSerial {
        async fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
            let text = String::from_utf8_lossy(buf).into_owned();
            self.lines.push((Instant::now(), text));
            Ok(buf.len())
        }
    }

    struct BrokenSerial;

    impl ErrorType for BrokenSerial {
        type Error = ErrorKind;
    }

    impl Write for BrokenSerial {
        async fn write(&mut self, _buf: &[u8]) -> Result<usize, ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn test_step_reads_in_order_and_writes_one_line() {
        let mut monitor = Monitor::new(FakeSensor::new(), RecordingSerial::default());

        let reading = block_on(monitor.step()).unwrap();
        assert_eq!(reading.pressure, 987.1);

        let (sensor, serial) = monitor.release();
        assert_eq!(
            sensor.calls,
            [Call::Temperature, Call::Pressure, Call::Humidity]
        );
        assert_eq!(serial.lines.len(), 1);
        assert_eq!(serial.lines[0].1, "23.46 degC, 987.10 hPa, 45.00 %\n");
    }

    #[test]
    fn test_run_never_returns_and_paces_lines() {
        let mut monitor = Monitor::new(FakeSensor::new(), RecordingSerial::default());

        let outcome = block_on(select(
            monitor.run(),
            Timer::after(Duration::from_millis(65)),
        ));
        assert!(matches!(outcome, Either::Second(())));

        let (sensor, serial) = monitor.release();
        assert!(serial.lines.len() >= 3, "only {} lines", serial.lines.len());
        assert_eq!(sensor.calls.len(), serial.lines.len() * 3);
        for iteration in sensor.calls.chunks(3) {
            assert_eq!(iteration, [Call::Temperature, Call::Pressure, Call::Humidity]);
        }

        for pair in serial.lines.windows(2) {
            let gap = pair[1].0 - pair[0].0;
            assert!(gap >= SAMPLE_INTERVAL, "gap {} us", gap.as_micros());
            assert!(gap < SAMPLE_INTERVAL * 5, "gap {} us", gap.as_micros());
        }
    }

    #[test]
    fn test_step_passes_sensor_fault_through() {
        let mut monitor = Monitor::new(FakeSensor::failing_at(2), RecordingSerial::default());

        let result = block_on(monitor.step());
        assert!(matches!(result, Err(MonitorError::Sensor(SensorFault::Bus))));

        let (sensor, serial) = monitor.release();
        assert!(serial.lines.is_empty());
        assert_eq!(sensor.calls, [Call::Temperature, Call::Pressure]);
    }

    #[test]
    fn test_loop_resumes_after_sensor_fault() {
        // Only the second temperature read fails.
        let mut monitor = Monitor::new(FakeSensor::failing_at(4), RecordingSerial::default());

        let outcome = block_on(select(
            monitor.run(),
            Timer::after(Duration::from_millis(65)),
        ));
        assert!(matches!(outcome, Either::Second(())));

        let (sensor, serial) = monitor.release();
        assert!(serial.lines.len() >= 3, "only {} lines", serial.lines.len());
        assert_eq!(
            sensor.calls[..7],
            [
                Call::Temperature,
                Call::Pressure,
                Call::Humidity,
                Call::Temperature,
                Call::Temperature,
                Call::Pressure,
                Call::Humidity,
            ]
        );
        for (_, line) in &serial.lines {
            assert_eq!(line, "23.46 degC, 987.10 hPa, 45.00 %\n");
        }

        // The failed iteration still waits before the next attempt.
        let gap = serial.lines[1].0 - serial.lines[0].0;
        assert!(gap >= SAMPLE_INTERVAL * 2, "gap {} us", gap.as_micros());
    }

    #[test]
    fn test_serial_fault_is_passed_through() {
        let mut monitor = Monitor::new(FakeSensor::new(), BrokenSerial);

        let result = block_on(monitor.step());
        assert!(matches!(result, Err(MonitorError::Serial(ErrorKind::Other))));
    }

    #[test]
    fn test_loop_keeps_sampling_while_serial_fails() {
        let mut monitor = Monitor::new(FakeSensor::new(), BrokenSerial);

        let outcome = block_on(select(
            monitor.run(),
            Timer::after(Duration::from_millis(35)),
        ));
        assert!(matches!(outcome, Either::Second(())));

        let (sensor, _) = monitor.release();
        assert!(sensor.calls.len() >= 6, "only {} reads", sensor.calls.len());
    }
}
