#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    firmware::run()
}

// The firmware only runs on the ATmega328P; host builds exist for the test suite.
#[cfg(not(target_arch = "avr"))]
fn main() {
    let cfg = cmb_body_expander::config();
    println!(
        "CMB body servo expander: I2C address {}, {} battery profile, {} baud",
        cfg.address.get(),
        cfg.battery.name(),
        cfg.baud
    );
    println!("build with --target avr-unknown-gnu-atmega328 to produce firmware");
}

#[cfg(target_arch = "avr")]
mod firmware {
    use avr_device::atmega328p::Peripherals;
    use embedded_hal::digital::v2::OutputPin;

    use cmb_body_expander::config::{self, VoltageLevel};
    use cmb_body_expander::drivers::{PollCounter, SerialConsole, VoltageSensor};
    use cmb_body_expander::hal::{Adc, StatusLed, TwiEvent, TwiSlave, Uart, VoltagePin};
    use cmb_body_expander::{debug_print, debug_println, debug_println_dec, CommandBuffer};

    /// Main loop passes between two voltage samples.
    const VCC_POLL_TICKS: u16 = 50_000;

    pub fn run() -> ! {
        let Some(dp) = Peripherals::take() else {
            loop {
                avr_device::asm::sleep();
            }
        };

        let cfg = config::config();
        let mut console = SerialConsole::new(Uart::new(dp.USART0, cfg.baud));
        let mut twi = TwiSlave::new(dp.TWI, cfg.address);
        let mut status = StatusLed::new(dp.PORTB);
        let mut sensor = VoltageSensor::<Adc, _, _>::new(
            Adc::new(dp.ADC),
            VoltagePin::new(),
            cfg.divider,
            cfg.thresholds,
        );

        debug_println!(console, "CMB Body Servo Expander v1.7");
        debug_println!(
            console,
            "I2C address {}, {} battery",
            cfg.address.get(),
            cfg.battery.name()
        );

        if cfg!(feature = "self-test") {
            let mut runner = cmb_body_expander::testing::TestRunner::new(&mut console);
            let _ = runner.run_suite("Configuration", &cmb_body_expander::testing::config_suite());
        }

        let mut command = CommandBuffer::new();
        // set once a command overruns the buffer; the rest of that transfer is dropped
        let mut discarding = false;
        let mut last_level: Option<VoltageLevel> = None;
        let mut vcc_poll = PollCounter::new(VCC_POLL_TICKS);

        loop {
            match twi.poll() {
                Some(TwiEvent::Addressed) => {
                    command.clear();
                    discarding = false;
                    let _ = status.set_high();
                }
                Some(TwiEvent::Byte(byte)) if !discarding => {
                    if let Err(err) = command.push(byte) {
                        debug_println!(console, "Command rejected: {:?}", err);
                        command.clear();
                        discarding = true;
                    }
                }
                Some(TwiEvent::Byte(_)) => {}
                Some(TwiEvent::Stop) => {
                    if !discarding && !command.is_empty() {
                        match command.as_str() {
                            Ok(text) => debug_println!(console, "Command: {}", text),
                            Err(err) => debug_println!(console, "Command rejected: {:?}", err),
                        }
                    }
                    command.clear();
                    discarding = false;
                    let _ = status.set_low();
                }
                Some(TwiEvent::BusError) => {
                    debug_println!(console, "I2C bus error");
                    command.clear();
                    discarding = false;
                    let _ = status.set_low();
                }
                None => {}
            }

            if !cfg.led_options.monitor_vcc {
                continue;
            }

            if !vcc_poll.tick() {
                continue;
            }

            if let Ok(reading) = sensor.read() {
                vcc_poll.restart();
                if config::serial::DEBUG_VOLT_METER {
                    debug_print!(console, "Battery: ");
                    debug_println_dec!(console, reading.volts, 2);
                }
                if last_level != Some(reading.level) {
                    if reading.level == VoltageLevel::Critical {
                        debug_println!(console, "Battery below red threshold");
                    }
                    last_level = Some(reading.level);
                }
            }
        }
    }
}
