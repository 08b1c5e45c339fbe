//! Build-time configuration for the body servo expander.
//!
//! Values are grouped by concern in the submodules and collected into one immutable
//! [`Config`] so that consumers take a `&'static Config` rather than reaching for loose
//! constants.

pub mod battery;
pub mod bus;
pub mod leds;
pub mod pins;
pub mod serial;
pub mod servo;

pub use battery::{
    BatteryProfile, VoltageDivider, VoltageLevel, VoltageThresholds, ACTIVE_PROFILE, DIVIDER,
    THRESHOLDS,
};
pub use bus::{BusAddress, Peer, I2C_ADDRESS};
pub use leds::{Intensity, LedOptions, LedTiming, LED_OPTIONS, LED_TIMING};
pub use pins::{PinBinding, PIN_MAP};
pub use serial::SERIAL_BAUD;
pub use servo::{PulseRange, ServoChannel, ServoProfile, NBR_SERVOS, SERVOS};

/// Everything the servo, LED and voltage consumers need, resolved at build time.
#[derive(Debug)]
pub struct Config {
    pub address: BusAddress,
    pub peers: &'static [Peer],
    pub pins: &'static [PinBinding],
    pub servos: &'static [ServoProfile; NBR_SERVOS],
    pub battery: BatteryProfile,
    pub thresholds: VoltageThresholds,
    pub divider: VoltageDivider,
    pub led_timing: LedTiming,
    pub led_options: LedOptions,
    pub baud: u32,
    pub debug: bool,
}

pub static CONFIG: Config = Config {
    address: I2C_ADDRESS,
    peers: &Peer::ALL,
    pins: &PIN_MAP,
    servos: &SERVOS,
    battery: ACTIVE_PROFILE,
    thresholds: THRESHOLDS,
    divider: DIVIDER,
    led_timing: LED_TIMING,
    led_options: LED_OPTIONS,
    baud: SERIAL_BAUD,
    debug: serial::DEBUG_ENABLED,
};

#[inline]
pub fn config() -> &'static Config {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_matches_the_individual_tables() {
        let cfg = config();
        assert_eq!(cfg.address, Peer::BodyExpander.address());
        assert_eq!(cfg.servos.len(), NBR_SERVOS);
        assert_eq!(cfg.pins.len(), PIN_MAP.len());
        assert_eq!(cfg.thresholds, cfg.battery.thresholds());
        assert_eq!(cfg.debug, cfg!(feature = "debug"));
    }

    #[test]
    fn config_is_shared_by_reference() {
        assert!(core::ptr::eq(config(), &CONFIG));
    }
}
