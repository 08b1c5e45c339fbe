//! Bounded storage for an incoming command string.
//!
//! The buffer is owned by whichever routine assembles commands, and every access
//! goes through `&mut self`, so it has exactly one writer and is never re-entered.
//! Writes that do not fit are refused whole; the buffer is never truncated.

use heapless::Vec;

use crate::{Error, Result};

/// Size of a command including the terminating NUL of the wire format.
pub const CMD_MAX_LENGTH: usize = 64;
/// Longest command payload, in bytes.
pub const CMD_MAX_PAYLOAD: usize = CMD_MAX_LENGTH - 1;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandBuffer {
    bytes: Vec<u8, CMD_MAX_PAYLOAD>,
}

impl CommandBuffer {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        CMD_MAX_PAYLOAD
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        CMD_MAX_PAYLOAD - self.bytes.len()
    }

    pub fn push(&mut self, byte: u8) -> Result<()> {
        let attempted = self.len() + 1;
        self.bytes.push(byte).map_err(|_| Error::CommandTooLong {
            capacity: CMD_MAX_PAYLOAD,
            attempted,
        })
    }

    /// Appends all of `data` or nothing.
    pub fn extend_from_slice(&mut self, data: &[u8]) -> Result<()> {
        let attempted = self.len() + data.len();
        if attempted > CMD_MAX_PAYLOAD {
            return Err(Error::CommandTooLong {
                capacity: CMD_MAX_PAYLOAD,
                attempted,
            });
        }
        self.bytes.extend_from_slice(data).map_err(|_| Error::CommandTooLong {
            capacity: CMD_MAX_PAYLOAD,
            attempted,
        })
    }

    pub fn push_str(&mut self, s: &str) -> Result<()> {
        self.extend_from_slice(s.as_bytes())
    }

    /// Replaces the contents with `data`. On error the old contents are kept.
    pub fn set(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > CMD_MAX_PAYLOAD {
            return Err(Error::CommandTooLong {
                capacity: CMD_MAX_PAYLOAD,
                attempted: data.len(),
            });
        }
        self.bytes.clear();
        self.extend_from_slice(data)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_str(&self) -> Result<&str> {
        core::str::from_utf8(&self.bytes).map_err(|_| Error::InvalidUtf8)
    }

    /// Payload followed by the NUL terminator, for peers that expect C strings.
    pub fn to_terminated(&self) -> [u8; CMD_MAX_LENGTH] {
        let mut out = [0u8; CMD_MAX_LENGTH];
        out[..self.bytes.len()].copy_from_slice(&self.bytes);
        out
    }

    #[inline]
    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl TryFrom<&str> for CommandBuffer {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        let mut buffer = CommandBuffer::new();
        buffer.push_str(s)?;
        Ok(buffer)
    }
}

/// Lets outgoing commands be formatted in place with `uwrite!`.
impl ufmt::uWrite for CommandBuffer {
    type Error = Error;

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.push_str(s)
    }
}

const _: () = assert!(CMD_MAX_LENGTH == 64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_sixty_three_payload_bytes() {
        let mut buffer = CommandBuffer::new();
        assert_eq!(buffer.capacity(), 63);
        for _ in 0..63 {
            buffer.push(b'a').unwrap();
        }
        assert!(buffer.is_full());
        assert_eq!(
            buffer.push(b'a'),
            Err(Error::CommandTooLong {
                capacity: 63,
                attempted: 64
            })
        );
        assert_eq!(buffer.len(), 63);
    }

    #[test]
    fn oversized_slice_leaves_buffer_untouched() {
        let mut buffer = CommandBuffer::try_from(":OP01").unwrap();
        let long = [b'x'; 60];
        assert_eq!(
            buffer.extend_from_slice(&long),
            Err(Error::CommandTooLong {
                capacity: 63,
                attempted: 65
            })
        );
        assert_eq!(buffer.as_str(), Ok(":OP01"));
        assert_eq!(buffer.remaining(), 58);
    }

    #[test]
    fn set_replaces_or_keeps() {
        let mut buffer = CommandBuffer::try_from("old").unwrap();
        assert!(buffer.set(&[b'y'; 64]).is_err());
        assert_eq!(buffer.as_bytes(), b"old");
        buffer.set(b"new").unwrap();
        assert_eq!(buffer.as_bytes(), b"new");
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let mut buffer = CommandBuffer::new();
        buffer.extend_from_slice(&[0xff, 0xfe]).unwrap();
        assert_eq!(buffer.as_str(), Err(Error::InvalidUtf8));
    }

    #[test]
    fn terminated_copy_ends_in_nul() {
        let buffer = CommandBuffer::try_from("CL00").unwrap();
        let raw = buffer.to_terminated();
        assert_eq!(&raw[..5], b"CL00\0");

        let full = CommandBuffer::try_from(&"z".repeat(63)[..]).unwrap();
        assert_eq!(full.to_terminated()[63], 0);
    }

    #[test]
    fn formats_commands_in_place() {
        let mut buffer = CommandBuffer::new();
        ufmt::uwrite!(buffer, ":SE{}", 5u8).unwrap();
        assert_eq!(buffer.as_str(), Ok(":SE5"));
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
