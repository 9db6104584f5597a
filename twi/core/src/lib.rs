#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # TWI Core
//!
//! Shared vocabulary for the TWI slave crates: the events a bus controller
//! raises, the replies a slave hands back, the [`BusSlave`] seam that ties
//! engines, drivers and simulators together, and the slave configuration.

use core::fmt;

pub mod config;
pub mod events;

pub use config::*;
pub use events::*;

/// Result type used throughout the TWI crates
pub type TwiResult<T> = Result<T, TwiError>;

/// Configuration and driver errors.
///
/// Protocol anomalies on the bus are never reported through this type; the
/// engine resolves them locally by returning to a re-addressable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwiError {
    /// Slave address outside the usable 7-bit range
    InvalidAddress(u8),
    /// Address mask wider than 7 bits
    InvalidMask(u8),
    /// Peripheral serviced before it was enabled
    NotEnabled,
}

impl fmt::Display for TwiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwiError::InvalidAddress(addr) => write!(f, "Invalid slave address 0x{:02x}", addr),
            TwiError::InvalidMask(mask) => write!(f, "Invalid address mask 0x{:02x}", mask),
            TwiError::NotEnabled => write!(f, "TWI peripheral is not enabled"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TwiError {}

#[cfg(feature = "defmt")]
impl defmt::Format for TwiError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TwiError::InvalidAddress(addr) => defmt::write!(fmt, "InvalidAddress({=u8:#x})", addr),
            TwiError::InvalidMask(mask) => defmt::write!(fmt, "InvalidMask({=u8:#x})", mask),
            TwiError::NotEnabled => defmt::write!(fmt, "NotEnabled"),
        }
    }
}
