//! Error type shared by the configuration lookups and the command buffer

use core::fmt;
use ufmt::derive::uDebug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, uDebug)]
pub enum Error {
    /// Servo index outside `0..NBR_SERVOS`.
    ChannelOutOfRange(usize),
    /// No peer on the body bus answers to this address.
    UnknownPeer(u8),
    /// A write would not fit in the command buffer. Nothing was written.
    CommandTooLong { capacity: usize, attempted: usize },
    /// The command payload is not valid UTF-8.
    InvalidUtf8,
}

pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ChannelOutOfRange(index) => write!(f, "servo channel {} out of range", index),
            Error::UnknownPeer(address) => write!(f, "no peer at I2C address {}", address),
            Error::CommandTooLong { capacity, attempted } => write!(
                f,
                "command of {} bytes exceeds capacity of {}",
                attempted, capacity
            ),
            Error::InvalidUtf8 => f.write_str("command is not valid UTF-8"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_limit() {
        let err = Error::CommandTooLong {
            capacity: 63,
            attempted: 64,
        };
        assert_eq!(err.to_string(), "command of 64 bytes exceeds capacity of 63");
        assert_eq!(
            Error::ChannelOutOfRange(6).to_string(),
            "servo channel 6 out of range"
        );
    }
}
