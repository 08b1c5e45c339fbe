use embedded_hal::serial::{Read, Write};
use ufmt::uWrite;

/// Line-oriented text console over any `embedded-hal` serial port.
///
/// The console is the sink for the `debug_*!` macros.
pub struct SerialConsole<S> {
    serial: S,
}

impl<S> SerialConsole<S> {
    pub fn new(serial: S) -> Self {
        Self { serial }
    }

    pub fn release(self) -> S {
        self.serial
    }
}

impl<S: Write<u8>> SerialConsole<S> {
    pub fn write_byte(&mut self, byte: u8) -> Result<(), S::Error> {
        nb::block!(self.serial.write(byte))
    }

    pub fn write_line(&mut self, s: &str) -> Result<(), S::Error> {
        self.write_str(s)?;
        self.write_str("\r\n")
    }

    // Debug helper - print hex value
    pub fn write_hex(&mut self, val: u8) -> Result<(), S::Error> {
        const HEX_CHARS: [u8; 16] = *b"0123456789ABCDEF";
        self.write_byte(HEX_CHARS[(val >> 4) as usize])?;
        self.write_byte(HEX_CHARS[(val & 0xF) as usize])
    }

    /// `[DBG] msg: 0xNN` on its own line.
    pub fn debug(&mut self, msg: &str, val: u8) -> Result<(), S::Error> {
        self.write_str("[DBG] ")?;
        self.write_str(msg)?;
        self.write_str(": 0x")?;
        self.write_hex(val)?;
        self.write_str("\r\n")
    }

    pub fn flush(&mut self) -> Result<(), S::Error> {
        nb::block!(self.serial.flush())
    }
}

impl<S: Read<u8>> SerialConsole<S> {
    /// Next received byte, if one is waiting. Receive errors drop the byte.
    pub fn read_byte(&mut self) -> Option<u8> {
        self.serial.read().ok()
    }
}

impl<S: Write<u8>> uWrite for SerialConsole<S> {
    type Error = S::Error;

    fn write_str(&mut self, s: &str) -> Result<(), S::Error> {
        for byte in s.bytes() {
            nb::block!(self.serial.write(byte))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::serial::{Mock, Transaction};

    #[test]
    fn lines_end_in_crlf() {
        let expectations = [Transaction::write_many(b"Ready\r\n")];
        let mut console = SerialConsole::new(Mock::new(&expectations));
        console.write_line("Ready").unwrap();
        console.release().done();
    }

    #[test]
    fn debug_line_is_hex_formatted() {
        let expectations = [Transaction::write_many(b"[DBG] Servo: 0x2A\r\n")];
        let mut console = SerialConsole::new(Mock::new(&expectations));
        console.debug("Servo", 42).unwrap();
        console.release().done();
    }

    #[test]
    fn reads_pending_bytes() {
        let expectations = [Transaction::read(b':'), Transaction::read(b'O')];
        let mut console = SerialConsole::new(Mock::new(&expectations));
        assert_eq!(console.read_byte(), Some(b':'));
        assert_eq!(console.read_byte(), Some(b'O'));
        console.release().done();
    }

    #[test]
    fn works_as_ufmt_sink() {
        let expectations = [Transaction::write_many(b"addr 9"), Transaction::flush()];
        let mut console = SerialConsole::new(Mock::new(&expectations));
        ufmt::uwrite!(console, "addr {}", 9u8).unwrap();
        console.flush().unwrap();
        console.release().done();
    }
}
