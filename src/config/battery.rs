//! Battery profile selection, indicator thresholds and the voltage divider.
//!
//! The profile comes from exactly one of the `battery-12v`, `battery-18v` or
//! `battery-24v` features. Thresholds are held in millivolts so they can be checked
//! in `const` context.

use super::serial::ADC_VREF_MV;

/// Steps of the 10-bit ADC.
pub const ADC_STEPS: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryProfile {
    Volts12,
    Volts18,
    Volts24,
}

impl BatteryProfile {
    pub const ALL: [BatteryProfile; 3] = [
        BatteryProfile::Volts12,
        BatteryProfile::Volts18,
        BatteryProfile::Volts24,
    ];

    pub const fn thresholds(self) -> VoltageThresholds {
        match self {
            BatteryProfile::Volts12 => VoltageThresholds::new(12_500, 12_000, 11_500),
            BatteryProfile::Volts18 => VoltageThresholds::new(18_000, 17_000, 15_000),
            BatteryProfile::Volts24 => VoltageThresholds::new(25_000, 24_000, 23_000),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BatteryProfile::Volts12 => "12V",
            BatteryProfile::Volts18 => "18V",
            BatteryProfile::Volts24 => "24V",
        }
    }
}

#[cfg(not(any(
    feature = "battery-12v",
    feature = "battery-18v",
    feature = "battery-24v"
)))]
compile_error!("select a battery profile: enable one of `battery-12v`, `battery-18v`, `battery-24v`");

#[cfg(any(
    all(feature = "battery-12v", feature = "battery-18v"),
    all(feature = "battery-12v", feature = "battery-24v"),
    all(feature = "battery-18v", feature = "battery-24v"),
))]
compile_error!("more than one battery profile enabled; keep exactly one `battery-*` feature");

#[cfg(feature = "battery-12v")]
pub const ACTIVE_PROFILE: BatteryProfile = BatteryProfile::Volts12;
#[cfg(feature = "battery-18v")]
pub const ACTIVE_PROFILE: BatteryProfile = BatteryProfile::Volts18;
#[cfg(feature = "battery-24v")]
pub const ACTIVE_PROFILE: BatteryProfile = BatteryProfile::Volts24;

pub const THRESHOLDS: VoltageThresholds = ACTIVE_PROFILE.thresholds();

/// Indicator thresholds, in millivolts. Each LED lights above its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoltageThresholds {
    pub green_mv: u32,
    pub yellow_mv: u32,
    pub red_mv: u32,
}

impl VoltageThresholds {
    pub const fn new(green_mv: u32, yellow_mv: u32, red_mv: u32) -> Self {
        assert!(
            green_mv > yellow_mv && yellow_mv > red_mv,
            "thresholds must be ordered green > yellow > red"
        );
        Self {
            green_mv,
            yellow_mv,
            red_mv,
        }
    }

    pub fn green(&self) -> f32 {
        self.green_mv as f32 / 1000.0
    }

    pub fn yellow(&self) -> f32 {
        self.yellow_mv as f32 / 1000.0
    }

    pub fn red(&self) -> f32 {
        self.red_mv as f32 / 1000.0
    }

    pub const fn classify_mv(&self, millivolts: u32) -> VoltageLevel {
        if millivolts > self.green_mv {
            VoltageLevel::Green
        } else if millivolts > self.yellow_mv {
            VoltageLevel::Yellow
        } else if millivolts > self.red_mv {
            VoltageLevel::Red
        } else {
            VoltageLevel::Critical
        }
    }

    /// Same rule as [`classify_mv`](Self::classify_mv) without rounding the reading first.
    /// NaN compares false everywhere and lands on `Critical`.
    pub fn classify(&self, volts: f32) -> VoltageLevel {
        if volts > self.green() {
            VoltageLevel::Green
        } else if volts > self.yellow() {
            VoltageLevel::Yellow
        } else if volts > self.red() {
            VoltageLevel::Red
        } else {
            VoltageLevel::Critical
        }
    }
}

/// Highest indicator a reading reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VoltageLevel {
    /// At or below the red threshold.
    Critical,
    Red,
    Yellow,
    Green,
}

/// Resistor pair scaling the battery voltage into the ADC range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoltageDivider {
    /// Upper resistor, battery side, in ohms.
    pub r1_ohms: u32,
    /// Lower resistor, ground side, in ohms.
    pub r2_ohms: u32,
}

impl VoltageDivider {
    pub const fn new(r1_ohms: u32, r2_ohms: u32) -> Self {
        assert!(r1_ohms > 0 && r2_ohms > 0, "divider resistors must be non-zero");
        Self { r1_ohms, r2_ohms }
    }

    /// Fraction of the input voltage seen by the ADC pin.
    pub fn ratio(&self) -> f32 {
        self.r2_ohms as f32 / (self.r1_ohms + self.r2_ohms) as f32
    }

    /// Battery voltage for a raw 10-bit reading.
    pub fn volts(&self, raw: u16) -> f32 {
        let vout = raw as f32 * (ADC_VREF_MV as f32 / 1000.0) / ADC_STEPS as f32;
        vout / self.ratio()
    }

    /// Battery voltage in millivolts, integer only.
    pub const fn millivolts(&self, raw: u16) -> u32 {
        let numerator = raw as u64 * ADC_VREF_MV as u64 * (self.r1_ohms + self.r2_ohms) as u64;
        let denominator = ADC_STEPS as u64 * self.r2_ohms as u64;
        (numerator / denominator) as u32
    }

    /// Input voltage that drives the ADC to full scale.
    pub const fn max_input_mv(&self) -> u32 {
        self.millivolts((ADC_STEPS - 1) as u16)
    }
}

/// Voltage divider capable of accepting up to 30V input. The more accurate these
/// values are, the more accurate the measurement will be.
pub const DIVIDER: VoltageDivider = VoltageDivider::new(98_800, 10_020);

const fn profiles_are_ordered() -> bool {
    let mut i = 0;
    while i < BatteryProfile::ALL.len() {
        let t = BatteryProfile::ALL[i].thresholds();
        if !(t.green_mv > t.yellow_mv && t.yellow_mv > t.red_mv) {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(profiles_are_ordered());
const _: () = assert!(
    DIVIDER.max_input_mv() > BatteryProfile::Volts24.thresholds().green_mv,
    "divider cannot measure the highest threshold"
);
