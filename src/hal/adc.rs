use avr_device::atmega328p::ADC;
use core::convert::Infallible;
use embedded_hal::adc::{Channel, OneShot};

use crate::config::pins::{analog_channel, VOLTAGE_SENSE_PIN};

// ADMUX
const REFS_AVCC: u8 = 0x40;
const MUX_MASK: u8 = 0x0F;
// ADCSRA
const ADEN: u8 = 1 << 7;
const ADSC: u8 = 1 << 6;
const PRESCALER_128: u8 = 0x07; // 125kHz @ 16MHz

/// Analog input `CH` of the multiplexer.
pub struct AnalogPin<const CH: u8>;

impl<const CH: u8> AnalogPin<CH> {
    pub const fn new() -> Self {
        AnalogPin
    }
}

impl<const CH: u8> Channel<Adc> for AnalogPin<CH> {
    type ID = u8;

    fn channel() -> u8 {
        CH
    }
}

const VOLTAGE_CHANNEL: u8 = match analog_channel(VOLTAGE_SENSE_PIN) {
    Some(channel) => channel,
    None => panic!("voltage sense pin has no ADC channel"),
};

pub type VoltagePin = AnalogPin<VOLTAGE_CHANNEL>;

/// 10-bit ADC referenced to AVcc
pub struct Adc {
    adc: ADC,
    pending: Option<u8>,
}

impl Adc {
    pub fn new(adc: ADC) -> Self {
        unsafe {
            adc.admux.write(|w| w.bits(REFS_AVCC));
            adc.adcsra.write(|w| w.bits(ADEN | PRESCALER_128));
        }
        Self { adc, pending: None }
    }

    fn start(&mut self, channel: u8) {
        unsafe {
            self.adc
                .admux
                .write(|w| w.bits(REFS_AVCC | (channel & MUX_MASK)));
            self.adc.adcsra.modify(|r, w| w.bits(r.bits() | ADSC));
        }
        self.pending = Some(channel);
    }

    fn busy(&self) -> bool {
        self.adc.adcsra.read().bits() & ADSC != 0
    }
}

impl<const CH: u8> OneShot<Adc, u16, AnalogPin<CH>> for Adc {
    type Error = Infallible;

    fn read(&mut self, _pin: &mut AnalogPin<CH>) -> nb::Result<u16, Infallible> {
        match self.pending {
            Some(channel) if channel == CH => {
                if self.busy() {
                    return Err(nb::Error::WouldBlock);
                }
                self.pending = None;
                Ok(self.adc.adc.read().bits())
            }
            // another channel is converting; let it finish first
            Some(_) => {
                if !self.busy() {
                    self.pending = None;
                }
                Err(nb::Error::WouldBlock)
            }
            None => {
                self.start(CH);
                Err(nb::Error::WouldBlock)
            }
        }
    }
}
