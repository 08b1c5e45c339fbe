pub mod serial_console;
pub mod voltage_sensor;

pub use serial_console::SerialConsole;
pub use voltage_sensor::{PollCounter, VoltageReading, VoltageSensor};
