//! MAX7219 panel chain and LED effect timing

/// Charge bay indicator, first in the chain.
pub const CBI_DEVICE: u8 = 0;
/// Data port, second in the chain.
pub const DATAPORT_DEVICE: u8 = 1;
/// Number of MAX7219 chips connected.
pub const NUM_DEVICES: u8 = 2;

/// The data port is quite dim, so it runs at maximum.
pub const DATAPORT_INTENSITY: Intensity = Intensity::new(15);
pub const CBI_INTENSITY: Intensity = Intensity::new(15);

/// MAX7219 brightness, 0..=15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Intensity(u8);

impl Intensity {
    pub const MAX: Intensity = Intensity(15);

    pub const fn new(level: u8) -> Self {
        assert!(level <= 15, "MAX7219 intensity is 0..=15");
        Self(level)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Update period of one effect, in milliseconds. Lower is faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval(u16);

impl Interval {
    pub const fn from_millis(ms: u16) -> Self {
        assert!(ms > 0, "an effect interval cannot be zero");
        Self(ms)
    }

    #[inline]
    pub const fn as_millis(self) -> u16 {
        self.0
    }

    /// True once `now` is at least one interval past `last`. Survives millisecond
    /// counter roll-over.
    #[inline]
    pub fn is_elapsed(self, last_ms: u32, now_ms: u32) -> bool {
        now_ms.wrapping_sub(last_ms) >= u32::from(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedTiming {
    pub top_block: Interval,
    pub bottom_led: Interval,
    pub red_led: Interval,
    pub blue_led: Interval,
    pub bar_graph: Interval,
    pub cbi: Interval,
}

pub const LED_TIMING: LedTiming = LedTiming {
    top_block: Interval::from_millis(70),
    bottom_led: Interval::from_millis(200),
    red_led: Interval::from_millis(500),
    blue_led: Interval::from_millis(500),
    bar_graph: Interval::from_millis(200),
    cbi: Interval::from_millis(50),
};

/// Effect options picked by Cargo features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedOptions {
    /// Light each LED in turn at startup.
    pub startup_test: bool,
    /// Old style block animation, for comparison.
    pub legacy_blocks: bool,
    /// Blue LEDs move in sync with the bar graph.
    pub blue_tracks_graph: bool,
    /// The battery voltage monitor drives the CBI indicators.
    pub monitor_vcc: bool,
}

pub const LED_OPTIONS: LedOptions = LedOptions {
    startup_test: cfg!(feature = "led-test"),
    legacy_blocks: cfg!(feature = "legacy-blocks"),
    blue_tracks_graph: cfg!(feature = "blue-led-track-graph"),
    monitor_vcc: cfg!(feature = "monitor-vcc"),
};

const _: () = assert!(CBI_DEVICE < NUM_DEVICES && DATAPORT_DEVICE < NUM_DEVICES);
const _: () = assert!(CBI_DEVICE != DATAPORT_DEVICE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_match_the_effect_table() {
        assert_eq!(LED_TIMING.top_block.as_millis(), 70);
        assert_eq!(LED_TIMING.cbi.as_millis(), 50);
        assert_eq!(LED_TIMING.bar_graph.as_millis(), 200);
    }

    #[test]
    fn interval_elapsed_across_rollover() {
        let cbi = LED_TIMING.cbi;
        assert!(!cbi.is_elapsed(1000, 1049));
        assert!(cbi.is_elapsed(1000, 1050));
        assert!(cbi.is_elapsed(u32::MAX - 10, 40));
        assert!(!cbi.is_elapsed(u32::MAX - 10, 30));
    }

    #[test]
    fn panels_run_at_full_brightness() {
        assert_eq!(DATAPORT_INTENSITY, Intensity::MAX);
        assert_eq!(CBI_INTENSITY.get(), 15);
    }

    #[test]
    #[should_panic]
    fn intensity_above_fifteen_is_rejected() {
        let _ = Intensity::new(16);
    }
}
