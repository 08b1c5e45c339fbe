//! Debug output that disappears from the build when the `debug` feature is off.
//!
//! `debug_print!` and `debug_println!` take any `ufmt::uWrite` place followed by a
//! `uwrite!` format string. `debug_print_dec!` and `debug_println_dec!` print a float
//! with a fixed number of decimal places. Write errors are ignored; debug output is
//! best effort. Without the feature every macro expands to an empty block, so the
//! arguments are not evaluated at all.

use ufmt::{uDisplay, uWrite, Formatter};

#[cfg(feature = "debug")]
#[macro_export]
macro_rules! debug_print {
    ($out:expr, $($arg:tt)*) => {{
        let _ = $crate::ufmt::uwrite!($out, $($arg)*);
    }};
}

#[cfg(feature = "debug")]
#[macro_export]
macro_rules! debug_println {
    ($out:expr, $($arg:tt)*) => {{
        let _ = $crate::ufmt::uwrite!($out, $($arg)*);
        let _ = $crate::ufmt::uWrite::write_str(&mut $out, "\r\n");
    }};
}

#[cfg(feature = "debug")]
#[macro_export]
macro_rules! debug_print_dec {
    ($out:expr, $value:expr, $places:expr) => {{
        let _ = $crate::ufmt::uwrite!($out, "{}", $crate::debug::Fixed::new($value, $places));
    }};
}

#[cfg(feature = "debug")]
#[macro_export]
macro_rules! debug_println_dec {
    ($out:expr, $value:expr, $places:expr) => {{
        let _ = $crate::ufmt::uwrite!($out, "{}", $crate::debug::Fixed::new($value, $places));
        let _ = $crate::ufmt::uWrite::write_str(&mut $out, "\r\n");
    }};
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! debug_print_dec {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! debug_println_dec {
    ($($arg:tt)*) => {{}};
}

/// A float printed with `places` decimals, rounded half up the way the Arduino
/// `Print` class does it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixed {
    value: f32,
    places: u8,
}

impl Fixed {
    pub const fn new(value: f32, places: u8) -> Self {
        Self { value, places }
    }
}

impl uDisplay for Fixed {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let mut value = self.value;
        if value.is_nan() {
            return f.write_str("nan");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
        }
        if value < 0.0 {
            f.write_str("-")?;
            value = -value;
        }

        let mut rounding = 0.5f32;
        for _ in 0..self.places {
            rounding /= 10.0;
        }
        value += rounding;

        if value > u32::MAX as f32 {
            return f.write_str("ovf");
        }

        let integer = value as u32;
        uDisplay::fmt(&integer, f)?;

        if self.places > 0 {
            f.write_char('.')?;
            let mut remainder = value - integer as f32;
            for _ in 0..self.places {
                remainder *= 10.0;
                let digit = remainder as u8;
                f.write_char(char::from(b'0' + digit.min(9)))?;
                remainder -= f32::from(digit);
            }
        }
        Ok(())
    }
}
