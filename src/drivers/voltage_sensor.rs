//! Battery voltage sensing through the resistor divider

use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};

use crate::config::{VoltageDivider, VoltageLevel, VoltageThresholds};

/// One conversion, scaled and classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageReading {
    pub raw: u16,
    pub millivolts: u32,
    pub volts: f32,
    pub level: VoltageLevel,
}

/// Reads the sense pin and applies the divider and indicator thresholds.
///
/// `ADC` is the marker type the pin's [`Channel`] is defined against, which need not be
/// the converter driver `A` itself.
pub struct VoltageSensor<ADC, A, P> {
    adc: A,
    pin: P,
    divider: VoltageDivider,
    thresholds: VoltageThresholds,
    _adc: PhantomData<ADC>,
}

impl<ADC, A, P> VoltageSensor<ADC, A, P>
where
    A: OneShot<ADC, u16, P>,
    P: Channel<ADC>,
{
    pub fn new(adc: A, pin: P, divider: VoltageDivider, thresholds: VoltageThresholds) -> Self {
        Self {
            adc,
            pin,
            divider,
            thresholds,
            _adc: PhantomData,
        }
    }

    /// Starts or completes a conversion without blocking.
    pub fn read(&mut self) -> nb::Result<VoltageReading, A::Error> {
        let raw = self.adc.read(&mut self.pin)?;
        Ok(self.reading(raw))
    }

    pub fn read_blocking(&mut self) -> Result<VoltageReading, A::Error> {
        nb::block!(self.read())
    }

    pub fn reading(&self, raw: u16) -> VoltageReading {
        let millivolts = self.divider.millivolts(raw);
        VoltageReading {
            raw,
            millivolts,
            volts: self.divider.volts(raw),
            level: self.thresholds.classify_mv(millivolts),
        }
    }

    /// Mean of `samples` blocking conversions, to settle ADC noise.
    pub fn read_average(&mut self, samples: u8) -> Result<VoltageReading, A::Error> {
        let samples = samples.max(1);
        let mut sum: u32 = 0;
        for _ in 0..samples {
            sum += u32::from(nb::block!(self.adc.read(&mut self.pin))?);
        }
        Ok(self.reading((sum / u32::from(samples)) as u16))
    }

    pub fn release(self) -> (A, P) {
        (self.adc, self.pin)
    }
}

/// Counts main-loop passes between two voltage samples.
///
/// The count saturates while a conversion is still pending, so a slow read
/// cannot push the next sample a whole period further out.
#[derive(Debug, Clone, Copy)]
pub struct PollCounter {
    period: u16,
    ticks: u16,
}

impl PollCounter {
    pub const fn new(period: u16) -> Self {
        Self { period, ticks: 0 }
    }

    /// Advances one pass and reports whether a sample is due.
    pub fn tick(&mut self) -> bool {
        self.ticks = self.ticks.saturating_add(1);
        self.ticks >= self.period
    }

    /// Call once a sample has been taken.
    pub fn restart(&mut self) {
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BatteryProfile, DIVIDER};
    use embedded_hal_mock::adc::{Mock, MockAdc, MockChan0, Transaction};

    fn sensor(expectations: &[Transaction<u16>]) -> VoltageSensor<MockAdc, Mock<u16>, MockChan0> {
        VoltageSensor::new(
            Mock::new(expectations),
            MockChan0 {},
            DIVIDER,
            BatteryProfile::Volts24.thresholds(),
        )
    }

    #[test]
    fn half_scale_reads_green_on_a_24v_pack() {
        let mut sensor = sensor(&[Transaction::read(0, 512)]);
        let reading = sensor.read_blocking().unwrap();
        assert_eq!(reading.raw, 512);
        assert_eq!(reading.millivolts, 27_150);
        assert_eq!(reading.level, VoltageLevel::Green);
        sensor.release().0.done();
    }

    #[test]
    fn low_reading_is_critical() {
        // 420 counts is about 22.3V on the pack
        let mut sensor = sensor(&[Transaction::read(0, 420)]);
        let reading = sensor.read_blocking().unwrap();
        assert!((reading.volts - 22.27).abs() < 0.05, "got {}", reading.volts);
        assert_eq!(reading.level, VoltageLevel::Critical);
        sensor.release().0.done();
    }

    #[test]
    fn averaging_smooths_samples() {
        let mut sensor = sensor(&[
            Transaction::read(0, 450),
            Transaction::read(0, 452),
            Transaction::read(0, 454),
            Transaction::read(0, 456),
        ]);
        let reading = sensor.read_average(4).unwrap();
        assert_eq!(reading.raw, 453);
        sensor.release().0.done();
    }

    #[test]
    fn pending_conversion_keeps_the_sample_due() {
        let mut poll = PollCounter::new(3);
        assert!(!poll.tick());
        assert!(!poll.tick());
        assert!(poll.tick());
        // conversion never completes: far past u16::MAX passes it must stay due
        for _ in 0..70_000u32 {
            assert!(poll.tick());
        }
        poll.restart();
        assert!(!poll.tick());
    }
}
