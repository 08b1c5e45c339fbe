//! Register-level drivers for the ATmega328P. Only built for AVR targets.

pub mod adc;
pub mod gpio;
pub mod twi;
pub mod uart;

pub use adc::{Adc, AnalogPin, VoltagePin};
pub use gpio::StatusLed;
pub use twi::{TwiEvent, TwiSlave};
pub use uart::Uart;
