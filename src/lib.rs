//! Configuration surface and firmware plumbing for the CMB body servo expander.
//!
//! Every value in [`config`] is fixed at build time and checked by `const` assertions,
//! so a conflicting pin map or battery profile fails the build instead of the prop.
#![cfg_attr(not(test), no_std)]

pub mod command;
pub mod config;
pub mod debug;
pub mod drivers;
pub mod error;
pub mod testing;

#[cfg(target_arch = "avr")]
pub mod hal;

pub use command::{CommandBuffer, CMD_MAX_LENGTH, CMD_MAX_PAYLOAD};
pub use config::{config, Config, CONFIG};
pub use error::{Error, Result};

// Re-exported so the debug macros resolve from downstream crates.
pub use ufmt;
