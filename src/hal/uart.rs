use avr_device::atmega328p::USART0;
use core::convert::Infallible;

use crate::config::serial::{ubrr_for, CPU_FREQ_HZ};

// UCSR0A
const RXC0: u8 = 1 << 7;
const UDRE0: u8 = 1 << 5;
// UCSR0B
const RXEN0: u8 = 1 << 4;
const TXEN0: u8 = 1 << 3;
// UCSR0C: asynchronous, no parity, one stop bit, 8 data bits
const FRAME_8N1: u8 = 0b0000_0110;

/// Polled USART0 driver
pub struct Uart {
    usart: USART0,
}

impl Uart {
    pub fn new(usart: USART0, baud: u32) -> Self {
        let ubrr = ubrr_for(baud, CPU_FREQ_HZ);
        unsafe {
            usart.ubrr0.write(|w| w.bits(ubrr));
            usart.ucsr0a.write(|w| w.bits(0));
            usart.ucsr0c.write(|w| w.bits(FRAME_8N1));
            usart.ucsr0b.write(|w| w.bits(RXEN0 | TXEN0));
        }
        Self { usart }
    }

    pub fn free(self) -> USART0 {
        unsafe { self.usart.ucsr0b.write(|w| w.bits(0)) };
        self.usart
    }
}

impl embedded_hal::serial::Write<u8> for Uart {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        if self.usart.ucsr0a.read().bits() & UDRE0 == 0 {
            return Err(nb::Error::WouldBlock);
        }
        unsafe { self.usart.udr0.write(|w| w.bits(byte)) };
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        if self.usart.ucsr0a.read().bits() & UDRE0 == 0 {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }
}

impl embedded_hal::serial::Read<u8> for Uart {
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<u8, Infallible> {
        if self.usart.ucsr0a.read().bits() & RXC0 == 0 {
            return Err(nb::Error::WouldBlock);
        }
        Ok(self.usart.udr0.read().bits())
    }
}
