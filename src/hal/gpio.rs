use avr_device::atmega328p::PORTB;
use core::convert::Infallible;
use embedded_hal::digital::v2::OutputPin;

use crate::config::pins::{port_bit, Port, STATUS_LED_PIN};

const STATUS_LED_BIT: u8 = match port_bit(STATUS_LED_PIN) {
    Some((Port::B, bit)) => bit,
    _ => panic!("status LED must be on port B"),
};

/// Built-in LED on the Pro Mini
pub struct StatusLed {
    port: PORTB,
}

impl StatusLed {
    pub fn new(port: PORTB) -> Self {
        unsafe {
            port.ddrb.modify(|r, w| w.bits(r.bits() | (1 << STATUS_LED_BIT)));
        }
        Self { port }
    }

    #[inline]
    pub fn toggle(&mut self) {
        // writing a one to PINx toggles the output
        unsafe { self.port.pinb.write(|w| w.bits(1 << STATUS_LED_BIT)) };
    }
}

impl OutputPin for StatusLed {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Infallible> {
        unsafe {
            self.port
                .portb
                .modify(|r, w| w.bits(r.bits() | (1 << STATUS_LED_BIT)))
        };
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        unsafe {
            self.port
                .portb
                .modify(|r, w| w.bits(r.bits() & !(1 << STATUS_LED_BIT)))
        };
        Ok(())
    }
}
