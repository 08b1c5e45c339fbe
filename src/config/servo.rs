//! Servo channel table: pins, pulse ranges, open/close targets and speeds.
//!
//! Channel indices address the servo array; they are not pin numbers.

use super::pins;
use crate::{Error, Result};

/// Number of servos driven by the expander.
pub const NBR_SERVOS: usize = 6;

/// Start/neutral/centre position, in degrees.
pub const NEUTRAL: u8 = 90;

// Servo speeds. 1 is super slow, 255 is fastest.
pub const UTILITY_ARMS_SPEED: u8 = 100;
pub const UTILITY_ARMS_SPEED_2: u8 = 45;
pub const UTILITY_ARMS_SPEED_3: u8 = 35;
pub const DOOR_OPEN_SPEED: u8 = 120;
pub const DOOR_CLOSE_SPEED: u8 = 100;
pub const SCREAM_SPEED: u8 = 250;

// Tweaked pulse widths in microseconds. Stock servos are usually 1000-2000 or 500-2500.
pub const ARM_PULSE: PulseRange = PulseRange::new(600, 2400);
pub const LEFT_DOOR_PULSE: PulseRange = PulseRange::new(650, 2200);
pub const RIGHT_DOOR_PULSE: PulseRange = PulseRange::new(650, 2200);
pub const CBI_DOOR_PULSE: PulseRange = PulseRange::new(650, 2200);
pub const DATA_DOOR_PULSE: PulseRange = PulseRange::new(650, 2200);

/// Index into the servo array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ServoChannel {
    LeftDoor = 0,
    RightDoor = 1,
    CbiDoor = 2,
    DataDoor = 3,
    BottomUtilArm = 4,
    TopUtilArm = 5,
}

impl ServoChannel {
    pub const ALL: [ServoChannel; NBR_SERVOS] = [
        ServoChannel::LeftDoor,
        ServoChannel::RightDoor,
        ServoChannel::CbiDoor,
        ServoChannel::DataDoor,
        ServoChannel::BottomUtilArm,
        ServoChannel::TopUtilArm,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<ServoChannel> {
        ServoChannel::ALL
            .get(index)
            .copied()
            .ok_or(Error::ChannelOutOfRange(index))
    }

    #[inline]
    pub fn profile(self) -> &'static ServoProfile {
        &SERVOS[self.index()]
    }

    pub const fn name(self) -> &'static str {
        match self {
            ServoChannel::LeftDoor => "left door",
            ServoChannel::RightDoor => "right door",
            ServoChannel::CbiDoor => "charge bay door",
            ServoChannel::DataDoor => "data panel door",
            ServoChannel::BottomUtilArm => "bottom utility arm",
            ServoChannel::TopUtilArm => "top utility arm",
        }
    }
}

impl TryFrom<u8> for ServoChannel {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        ServoChannel::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(Error::ChannelOutOfRange(usize::from(index)))
    }
}

/// Minimum/maximum pulse width of one servo, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseRange {
    pub min_us: u16,
    pub max_us: u16,
}

impl PulseRange {
    pub const fn new(min_us: u16, max_us: u16) -> Self {
        assert!(min_us < max_us, "minimum pulse must be below maximum pulse");
        Self { min_us, max_us }
    }

    #[inline]
    pub const fn contains(&self, pulse_us: u16) -> bool {
        pulse_us >= self.min_us && pulse_us <= self.max_us
    }

    pub fn clamp(&self, pulse_us: u16) -> u16 {
        pulse_us.clamp(self.min_us, self.max_us)
    }

    /// Maps 0..=180 degrees linearly onto the range, as the Arduino servo library does.
    pub fn angle_to_pulse(&self, degrees: u8) -> u16 {
        let degrees = u32::from(degrees.min(180));
        let span = u32::from(self.max_us - self.min_us);
        self.min_us + (span * degrees / 180) as u16
    }
}

/// Everything the motion engine needs to know about one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoProfile {
    pub channel: ServoChannel,
    pub pin: u8,
    pub pulse: PulseRange,
    /// Open target pulse width, in microseconds.
    pub open_us: u16,
    /// Close target pulse width, in microseconds.
    pub close_us: u16,
    pub open_speed: u8,
    pub close_speed: u8,
}

impl ServoProfile {
    pub const fn is_valid(&self) -> bool {
        self.pulse.min_us < self.pulse.max_us
            && self.pulse.contains(self.open_us)
            && self.pulse.contains(self.close_us)
            && self.open_speed > 0
            && self.close_speed > 0
    }

    pub fn neutral_us(&self) -> u16 {
        self.pulse.angle_to_pulse(NEUTRAL)
    }
}

pub const SERVOS: [ServoProfile; NBR_SERVOS] = [
    ServoProfile {
        channel: ServoChannel::LeftDoor,
        pin: pins::LEFT_DOOR_SERVO_PIN,
        pulse: LEFT_DOOR_PULSE,
        open_us: 1300,
        close_us: 750,
        open_speed: DOOR_OPEN_SPEED,
        close_speed: DOOR_CLOSE_SPEED,
    },
    ServoProfile {
        channel: ServoChannel::RightDoor,
        pin: pins::RIGHT_DOOR_SERVO_PIN,
        pulse: RIGHT_DOOR_PULSE,
        open_us: 1400,
        close_us: 2100,
        open_speed: DOOR_OPEN_SPEED,
        close_speed: DOOR_CLOSE_SPEED,
    },
    ServoProfile {
        channel: ServoChannel::CbiDoor,
        pin: pins::CBI_DOOR_SERVO_PIN,
        pulse: CBI_DOOR_PULSE,
        open_us: 1780,
        close_us: 1200,
        open_speed: DOOR_OPEN_SPEED,
        close_speed: DOOR_CLOSE_SPEED,
    },
    ServoProfile {
        channel: ServoChannel::DataDoor,
        pin: pins::DATA_DOOR_SERVO_PIN,
        pulse: DATA_DOOR_PULSE,
        open_us: 1690,
        close_us: 1000,
        open_speed: DOOR_OPEN_SPEED,
        close_speed: DOOR_CLOSE_SPEED,
    },
    ServoProfile {
        channel: ServoChannel::BottomUtilArm,
        pin: pins::BOTTOM_UTIL_ARM_SERVO_PIN,
        pulse: ARM_PULSE,
        open_us: 750,
        close_us: 1800,
        open_speed: UTILITY_ARMS_SPEED,
        close_speed: UTILITY_ARMS_SPEED,
    },
    ServoProfile {
        channel: ServoChannel::TopUtilArm,
        pin: pins::TOP_UTIL_ARM_SERVO_PIN,
        pulse: ARM_PULSE,
        open_us: 650,
        close_us: 1780,
        open_speed: UTILITY_ARMS_SPEED,
        close_speed: UTILITY_ARMS_SPEED,
    },
];

const fn table_is_consistent(table: &[ServoProfile; NBR_SERVOS]) -> bool {
    let mut i = 0;
    while i < NBR_SERVOS {
        let profile = &table[i];
        if profile.channel as usize != i || !profile.is_valid() {
            return false;
        }
        let mut j = i + 1;
        while j < NBR_SERVOS {
            if table[j].pin == profile.pin {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(NBR_SERVOS == 6);
const _: () = assert!(
    table_is_consistent(&SERVOS),
    "servo table out of order, out of range or sharing a pin"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_channel_targets_lie_within_its_range() {
        for channel in ServoChannel::ALL {
            let profile = channel.profile();
            assert_eq!(profile.channel, channel);
            assert!(profile.pulse.min_us < profile.pulse.max_us);
            assert!(profile.pulse.contains(profile.open_us), "{}", channel.name());
            assert!(profile.pulse.contains(profile.close_us), "{}", channel.name());
        }
    }

    #[test]
    fn doors_and_arms_use_different_ranges() {
        assert_eq!(ServoChannel::TopUtilArm.profile().pulse, PulseRange::new(600, 2400));
        assert_eq!(ServoChannel::LeftDoor.profile().pulse, PulseRange::new(650, 2200));
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        assert_eq!(ServoChannel::try_from(5), Ok(ServoChannel::TopUtilArm));
        assert_eq!(ServoChannel::try_from(6), Err(Error::ChannelOutOfRange(6)));
        assert_eq!(ServoChannel::from_index(3), Ok(ServoChannel::DataDoor));
        assert_eq!(
            ServoChannel::from_index(300),
            Err(Error::ChannelOutOfRange(300))
        );
    }

    #[test]
    fn channels_are_wired_to_their_named_pins() {
        assert_eq!(ServoChannel::CbiDoor.profile().pin, pins::CBI_DOOR_SERVO_PIN);
        assert_eq!(ServoChannel::TopUtilArm.profile().pin, pins::TOP_UTIL_ARM_SERVO_PIN);
    }

    #[test]
    fn angle_mapping_covers_the_range() {
        let range = ARM_PULSE;
        assert_eq!(range.angle_to_pulse(0), 600);
        assert_eq!(range.angle_to_pulse(180), 2400);
        assert_eq!(range.angle_to_pulse(NEUTRAL), 1500);
        assert_eq!(range.angle_to_pulse(255), 2400);
        assert_eq!(ServoChannel::LeftDoor.profile().neutral_us(), 1425);
    }

    #[test]
    fn clamp_holds_pulses_inside_the_range() {
        assert_eq!(LEFT_DOOR_PULSE.clamp(100), 650);
        assert_eq!(LEFT_DOOR_PULSE.clamp(3000), 2200);
        assert_eq!(LEFT_DOOR_PULSE.clamp(1000), 1000);
    }
}
