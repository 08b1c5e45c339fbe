//! Arduino I/O assignments on the Pro Mini.
//!
//! Pin | Function
//! ----+----------------------------------------------
//!  2  | Left front door servo
//!  3  | Right front door servo
//!  4  | Top utility arm servo
//!  5  | Bottom utility arm servo
//!  6  | Charge bay door servo
//!  7  | Data panel door servo
//!  8  | Charge bay indicator on/off switch
//!  9  | Data panel on/off switch
//! 10  | MAX7219 data in
//! 11  | MAX7219 clock
//! 12  | MAX7219 load
//! 13  | Status LED (built in)
//! 14  | Volt meter on/off switch (A0)
//! 17  | Battery voltage sense (A3)
//!
//! The expander board silkscreen numbers servos from 1; the Arduino pin is one higher.

// ----- Servos -----
pub const LEFT_DOOR_SERVO_PIN: u8 = 2;
pub const RIGHT_DOOR_SERVO_PIN: u8 = 3;
pub const TOP_UTIL_ARM_SERVO_PIN: u8 = 4;
pub const BOTTOM_UTIL_ARM_SERVO_PIN: u8 = 5;
pub const CBI_DOOR_SERVO_PIN: u8 = 6;
pub const DATA_DOOR_SERVO_PIN: u8 = 7;

/// First Arduino pin used for servos.
pub const FIRST_SERVO_PIN: u8 = 2;

// ----- Switch inputs -----
pub const CBI_SWITCH_PIN: u8 = 8;
pub const DP_SWITCH_PIN: u8 = 9;
pub const VM_SWITCH_PIN: u8 = 14;

// ----- MAX7219 panel chain -----
pub const DATAIN_PIN: u8 = 10;
pub const CLOCK_PIN: u8 = 11;
pub const LOAD_PIN: u8 = 12;

// ----- Misc -----
pub const STATUS_LED_PIN: u8 = 13;
/// Analog input A3, wired to the voltage divider.
pub const VOLTAGE_SENSE_PIN: u8 = A3;

pub const A0: u8 = 14;
pub const A3: u8 = 17;

/// Named association between a function and a physical pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinBinding {
    pub name: &'static str,
    pub pin: u8,
}

impl PinBinding {
    pub const fn new(name: &'static str, pin: u8) -> Self {
        Self { name, pin }
    }
}

pub const PIN_MAP: [PinBinding; 14] = [
    PinBinding::new("left door servo", LEFT_DOOR_SERVO_PIN),
    PinBinding::new("right door servo", RIGHT_DOOR_SERVO_PIN),
    PinBinding::new("top utility arm servo", TOP_UTIL_ARM_SERVO_PIN),
    PinBinding::new("bottom utility arm servo", BOTTOM_UTIL_ARM_SERVO_PIN),
    PinBinding::new("charge bay door servo", CBI_DOOR_SERVO_PIN),
    PinBinding::new("data panel door servo", DATA_DOOR_SERVO_PIN),
    PinBinding::new("charge bay switch", CBI_SWITCH_PIN),
    PinBinding::new("data panel switch", DP_SWITCH_PIN),
    PinBinding::new("volt meter switch", VM_SWITCH_PIN),
    PinBinding::new("panel data in", DATAIN_PIN),
    PinBinding::new("panel clock", CLOCK_PIN),
    PinBinding::new("panel load", LOAD_PIN),
    PinBinding::new("status led", STATUS_LED_PIN),
    PinBinding::new("voltage sense", VOLTAGE_SENSE_PIN),
];

pub const fn pins_are_unique(map: &[PinBinding]) -> bool {
    let mut i = 0;
    while i < map.len() {
        let mut j = i + 1;
        while j < map.len() {
            if map[i].pin == map[j].pin {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(pins_are_unique(&PIN_MAP), "two functions bound to the same pin");

pub fn binding_for(pin: u8) -> Option<&'static PinBinding> {
    PIN_MAP.iter().find(|binding| binding.pin == pin)
}

/// ATmega328P I/O port behind an Arduino pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    B,
    C,
    D,
}

/// Port and bit for a digital pin. A6/A7 are analog only and have none.
pub const fn port_bit(pin: u8) -> Option<(Port, u8)> {
    match pin {
        0..=7 => Some((Port::D, pin)),
        8..=13 => Some((Port::B, pin - 8)),
        14..=19 => Some((Port::C, pin - 14)),
        _ => None,
    }
}

/// ADC multiplexer channel for an analog-capable pin.
pub const fn analog_channel(pin: u8) -> Option<u8> {
    match pin {
        14..=21 => Some(pin - 14),
        _ => None,
    }
}

const _: () = assert!(
    analog_channel(VOLTAGE_SENSE_PIN).is_some(),
    "voltage sense must be on an analog pin"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pin_is_bound_twice() {
        assert!(pins_are_unique(&PIN_MAP));
        let clash = [
            PinBinding::new("a", 4),
            PinBinding::new("b", 5),
            PinBinding::new("c", 4),
        ];
        assert!(!pins_are_unique(&clash));
    }

    #[test]
    fn lookup_by_pin() {
        assert_eq!(binding_for(13).map(|b| b.name), Some("status led"));
        assert_eq!(binding_for(17).map(|b| b.name), Some("voltage sense"));
        assert!(binding_for(0).is_none());
    }

    #[test]
    fn arduino_pins_map_to_ports() {
        assert_eq!(port_bit(STATUS_LED_PIN), Some((Port::B, 5)));
        assert_eq!(port_bit(LEFT_DOOR_SERVO_PIN), Some((Port::D, 2)));
        assert_eq!(port_bit(VM_SWITCH_PIN), Some((Port::C, 0)));
        assert_eq!(port_bit(20), None);
    }

    #[test]
    fn voltage_sense_is_adc_three() {
        assert_eq!(analog_channel(VOLTAGE_SENSE_PIN), Some(3));
        assert_eq!(analog_channel(A0), Some(0));
        assert_eq!(analog_channel(STATUS_LED_PIN), None);
    }
}
