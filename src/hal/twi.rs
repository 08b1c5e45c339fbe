//! TWI (I2C) slave receiver.
//!
//! The Stealth controller masters the body bus; this board only ever listens at
//! its own address.

use avr_device::atmega328p::TWI;

use crate::config::BusAddress;

// TWCR bits
const TWINT: u8 = 1 << 7;
const TWEA: u8 = 1 << 6;
const TWSTO: u8 = 1 << 4;
const TWEN: u8 = 1 << 2;

/// Slave receiver status codes (TWSR & 0xF8)
#[derive(Clone, Copy, PartialEq)]
#[repr(u8)]
enum TwiStatus {
    BusError = 0x00,
    OwnAddressAck = 0x60,
    ArbitrationLostAddressAck = 0x68,
    GeneralCallAck = 0x70,
    ArbitrationLostGeneralCallAck = 0x78,
    DataAck = 0x80,
    DataNack = 0x88,
    GeneralCallDataAck = 0x90,
    GeneralCallDataNack = 0x98,
    StopOrRepeatedStart = 0xA0,
}

impl TwiStatus {
    fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits & 0xF8 {
            0x00 => TwiStatus::BusError,
            0x60 => TwiStatus::OwnAddressAck,
            0x68 => TwiStatus::ArbitrationLostAddressAck,
            0x70 => TwiStatus::GeneralCallAck,
            0x78 => TwiStatus::ArbitrationLostGeneralCallAck,
            0x80 => TwiStatus::DataAck,
            0x88 => TwiStatus::DataNack,
            0x90 => TwiStatus::GeneralCallDataAck,
            0x98 => TwiStatus::GeneralCallDataNack,
            0xA0 => TwiStatus::StopOrRepeatedStart,
            _ => return None,
        })
    }
}

/// What happened on the bus since the last poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TwiEvent {
    /// A master addressed us; a new transfer begins.
    Addressed,
    Byte(u8),
    /// The master ended the transfer.
    Stop,
    /// Bus error; the interface has been reset.
    BusError,
}

pub struct TwiSlave {
    twi: TWI,
}

impl TwiSlave {
    pub fn new(twi: TWI, address: BusAddress) -> Self {
        unsafe {
            twi.twar.write(|w| w.bits(address.slave_register()));
            twi.twcr.write(|w| w.bits(TWEN | TWEA | TWINT));
        }
        Self { twi }
    }

    /// Handles at most one bus state change. Never blocks.
    pub fn poll(&mut self) -> Option<TwiEvent> {
        if self.twi.twcr.read().bits() & TWINT == 0 {
            return None;
        }

        let event = match TwiStatus::from_bits(self.twi.twsr.read().bits()) {
            Some(TwiStatus::OwnAddressAck)
            | Some(TwiStatus::ArbitrationLostAddressAck)
            | Some(TwiStatus::GeneralCallAck)
            | Some(TwiStatus::ArbitrationLostGeneralCallAck) => Some(TwiEvent::Addressed),
            Some(TwiStatus::DataAck)
            | Some(TwiStatus::DataNack)
            | Some(TwiStatus::GeneralCallDataAck)
            | Some(TwiStatus::GeneralCallDataNack) => {
                Some(TwiEvent::Byte(self.twi.twdr.read().bits()))
            }
            Some(TwiStatus::StopOrRepeatedStart) => Some(TwiEvent::Stop),
            Some(TwiStatus::BusError) => {
                // release the lines and start over
                unsafe { self.twi.twcr.write(|w| w.bits(TWEN | TWEA | TWINT | TWSTO)) };
                return Some(TwiEvent::BusError);
            }
            None => None,
        };

        // Clear TWINT and keep acknowledging our address.
        unsafe { self.twi.twcr.write(|w| w.bits(TWEN | TWEA | TWINT)) };
        event
    }
}
