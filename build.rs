use std::env;

const MCU: &str = "atmega328p";
const MCU_FREQ_HZ: u32 = 16_000_000;

const BATTERY_FEATURES: [(&str, &str); 3] = [
    ("CARGO_FEATURE_BATTERY_12V", "12V"),
    ("CARGO_FEATURE_BATTERY_18V", "18V"),
    ("CARGO_FEATURE_BATTERY_24V", "24V"),
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let target = env::var("TARGET").unwrap_or_default();

    // Firmware link arguments only apply to the AVR target; host builds run the test suite.
    if target.contains("avr") {
        println!("cargo:rustc-link-arg=-mmcu={MCU}");
        println!("cargo:warning=Building body expander firmware for {MCU} at {MCU_FREQ_HZ} Hz");
    }

    println!("cargo:rustc-env=MCU_FREQ_HZ={MCU_FREQ_HZ}");

    let selected: Vec<&str> = BATTERY_FEATURES
        .iter()
        .filter(|(var, _)| env::var_os(var).is_some())
        .map(|(_, name)| *name)
        .collect();

    // The crate itself rejects a bad selection with compile_error!; report it early here.
    match selected.as_slice() {
        [profile] => {
            if target.contains("avr") {
                println!("cargo:warning=Battery profile: {profile}");
            }
        }
        [] => println!("cargo:warning=No battery profile selected"),
        many => println!("cargo:warning=Conflicting battery profiles selected: {many:?}"),
    }
}
