//! Clock, serial and debug switches

/// CPU frequency in Hz, handed over by the build script.
pub const CPU_FREQ_HZ: u32 = parse_u32(env!("MCU_FREQ_HZ"));

/// ADC reference voltage in millivolts (AVcc on a 5V Pro Mini).
pub const ADC_VREF_MV: u16 = 5000;

/// Baud rate for JEDI devices that can keep up.
pub const FAST_BAUD: u32 = 9600;
/// The Teeces interface runs at a mind-numbingly slow 2400 only.
pub const LEGACY_BAUD: u32 = 2400;

pub const SERIAL_BAUD: u32 = if cfg!(feature = "jedi-9600") {
    FAST_BAUD
} else {
    LEGACY_BAUD
};

pub const DEBUG_ENABLED: bool = cfg!(feature = "debug");
/// Print the volt meter readings when debugging.
pub const DEBUG_VOLT_METER: bool = cfg!(feature = "debug-vm");

/// USART baud rate register value for normal-speed mode.
pub const fn ubrr_for(baud: u32, cpu_hz: u32) -> u16 {
    (cpu_hz / (16 * baud) - 1) as u16
}

const fn parse_u32(digits: &str) -> u32 {
    let bytes = digits.as_bytes();
    assert!(!bytes.is_empty(), "empty number");
    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        assert!(digit.is_ascii_digit(), "not a decimal number");
        value = value * 10 + (digit - b'0') as u32;
        i += 1;
    }
    value
}

const _: () = assert!(CPU_FREQ_HZ > 0);
const _: () = assert!(ubrr_for(SERIAL_BAUD, CPU_FREQ_HZ) > 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_values_for_a_16mhz_part() {
        assert_eq!(ubrr_for(9600, 16_000_000), 103);
        assert_eq!(ubrr_for(2400, 16_000_000), 415);
    }

    #[test]
    fn build_script_frequency_is_parsed() {
        assert_eq!(CPU_FREQ_HZ, 16_000_000);
        assert_eq!(parse_u32("2400"), 2400);
    }

    #[test]
    fn baud_follows_the_jedi_feature() {
        let expected = if cfg!(feature = "jedi-9600") { 9600 } else { 2400 };
        assert_eq!(SERIAL_BAUD, expected);
    }
}
