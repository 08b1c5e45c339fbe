//! On-device self test of the configuration, reported over the console.
//!
//! Runs at boot with the `self-test` feature. The same cases run on the host in
//! the unit tests below.

use ufmt::derive::uDebug;
use ufmt::{uDebug, uWrite, uwrite, Formatter};

use crate::command::{CommandBuffer, CMD_MAX_PAYLOAD};
use crate::config::{pins, BatteryProfile, Peer, ServoChannel, I2C_ADDRESS, PIN_MAP};

pub trait TestCase {
    fn name(&self) -> &'static str;
    fn run(&self) -> TestResult;
}

#[derive(Debug, PartialEq, Eq, uDebug)]
pub enum TestResult {
    Pass,
    Fail(TestError),
}

#[derive(Debug, PartialEq, Eq)]
pub enum TestError {
    AssertionFailed(&'static str),
}

// ufmt has no `uDebug` for `str`, so the message is written out by hand.
impl uDebug for TestError {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            TestError::AssertionFailed(msg) => {
                f.write_str("AssertionFailed(\"")?;
                f.write_str(msg)?;
                f.write_str("\")")
            }
        }
    }
}

macro_rules! check {
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return TestResult::Fail(TestError::AssertionFailed($msg));
        }
    };
}

pub struct TestRunner<'a, W: uWrite> {
    out: &'a mut W,
    total_tests: u32,
    passed_tests: u32,
    current_suite: &'static str,
}

impl<'a, W: uWrite> TestRunner<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self {
            out,
            total_tests: 0,
            passed_tests: 0,
            current_suite: "",
        }
    }

    pub fn run_suite(&mut self, name: &'static str, tests: &[&dyn TestCase]) -> Result<(), W::Error> {
        self.current_suite = name;
        uwrite!(*self.out, "\r\n=== Test Suite: {} ===\r\n", name)?;

        for test in tests {
            self.total_tests += 1;
            uwrite!(*self.out, "Running {}: ", test.name())?;

            match test.run() {
                TestResult::Pass => {
                    self.passed_tests += 1;
                    self.out.write_str("PASS\r\n")?;
                }
                TestResult::Fail(err) => {
                    uwrite!(*self.out, "FAIL - {:?}\r\n", err)?;
                }
            }
        }

        self.print_summary()
    }

    pub fn passed(&self) -> u32 {
        self.passed_tests
    }

    pub fn total(&self) -> u32 {
        self.total_tests
    }

    pub fn all_passed(&self) -> bool {
        self.passed_tests == self.total_tests
    }

    fn print_summary(&mut self) -> Result<(), W::Error> {
        let percent = if self.total_tests == 0 {
            100
        } else {
            (self.passed_tests * 100) / self.total_tests
        };
        uwrite!(
            *self.out,
            "\r\nTest Summary for {}:\r\nPassed: {}/{} ({}%)\r\n",
            self.current_suite,
            self.passed_tests,
            self.total_tests,
            percent
        )
    }
}

pub struct PinMapTest;
impl TestCase for PinMapTest {
    fn name(&self) -> &'static str {
        "Pin map"
    }

    fn run(&self) -> TestResult {
        check!(pins::pins_are_unique(&PIN_MAP), "duplicate pin binding");
        check!(
            pins::analog_channel(pins::VOLTAGE_SENSE_PIN).is_some(),
            "voltage sense not analog"
        );
        TestResult::Pass
    }
}

pub struct ServoTableTest;
impl TestCase for ServoTableTest {
    fn name(&self) -> &'static str {
        "Servo table"
    }

    fn run(&self) -> TestResult {
        for channel in ServoChannel::ALL {
            let profile = channel.profile();
            check!(profile.channel == channel, "servo table out of order");
            check!(profile.is_valid(), "servo target outside pulse range");
        }
        check!(ServoChannel::try_from(6).is_err(), "channel 6 accepted");
        TestResult::Pass
    }
}

pub struct ThresholdTest;
impl TestCase for ThresholdTest {
    fn name(&self) -> &'static str {
        "Voltage thresholds"
    }

    fn run(&self) -> TestResult {
        for profile in BatteryProfile::ALL {
            let t = profile.thresholds();
            check!(t.green_mv > t.yellow_mv, "green not above yellow");
            check!(t.yellow_mv > t.red_mv, "yellow not above red");
        }
        TestResult::Pass
    }
}

pub struct BusAddressTest;
impl TestCase for BusAddressTest {
    fn name(&self) -> &'static str {
        "Bus addresses"
    }

    fn run(&self) -> TestResult {
        check!(
            I2C_ADDRESS == Peer::BodyExpander.address(),
            "own address differs from body expander"
        );
        check!(Peer::from_address(I2C_ADDRESS.get()).is_ok(), "own address unknown");
        TestResult::Pass
    }
}

pub struct CommandBoundTest;
impl TestCase for CommandBoundTest {
    fn name(&self) -> &'static str {
        "Command buffer bound"
    }

    fn run(&self) -> TestResult {
        let mut buffer = CommandBuffer::new();
        for _ in 0..CMD_MAX_PAYLOAD {
            check!(buffer.push(b'#').is_ok(), "payload byte refused");
        }
        check!(buffer.push(b'#').is_err(), "overrun accepted");
        check!(buffer.len() == CMD_MAX_PAYLOAD, "overrun changed the buffer");
        TestResult::Pass
    }
}

/// Every configuration check, in boot order.
pub fn config_suite() -> [&'static dyn TestCase; 5] {
    [
        &PinMapTest,
        &ServoTableTest,
        &ThresholdTest,
        &BusAddressTest,
        &CommandBoundTest,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sink(String);

    impl uWrite for Sink {
        type Error = core::convert::Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
            self.0.push_str(s);
            Ok(())
        }
    }

    struct AlwaysFails;
    impl TestCase for AlwaysFails {
        fn name(&self) -> &'static str {
            "Broken"
        }

        fn run(&self) -> TestResult {
            check!(false, "forced");
            TestResult::Pass
        }
    }

    #[test]
    fn configuration_suite_passes() {
        let mut sink = Sink::default();
        let mut runner = TestRunner::new(&mut sink);
        runner.run_suite("Config", &config_suite()).unwrap();
        assert!(runner.all_passed());
        assert_eq!(runner.total(), 5);
        assert!(sink.0.contains("Passed: 5/5 (100%)"));
    }

    #[test]
    fn failures_are_reported() {
        let mut sink = Sink::default();
        let mut runner = TestRunner::new(&mut sink);
        let tests: [&dyn TestCase; 2] = [&PinMapTest, &AlwaysFails];
        runner.run_suite("Mixed", &tests).unwrap();
        assert_eq!(runner.passed(), 1);
        assert!(!runner.all_passed());
        assert!(sink.0.contains("Running Broken: FAIL - AssertionFailed(\"forced\")\r\n"));
        assert!(sink.0.contains("Passed: 1/2 (50%)"));
    }

    #[test]
    fn failed_result_prints_its_message() {
        let mut sink = Sink::default();
        let result = TestResult::Fail(TestError::AssertionFailed("overrun accepted"));
        uwrite!(sink, "{:?}", result).unwrap();
        assert_eq!(sink.0, "Fail(AssertionFailed(\"overrun accepted\"))");
    }
}
