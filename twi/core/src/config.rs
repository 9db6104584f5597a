//! Slave address and configuration

use core::fmt;
use crate::{TwiError, TwiResult};

/// Validated 7-bit slave address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlaveAddress(u8);

impl SlaveAddress {
    /// Lowest usable address (0x00 is the general call)
    pub const MIN: SlaveAddress = SlaveAddress(0x01);

    /// Highest usable address (0x78..=0x7F are reserved)
    pub const MAX: SlaveAddress = SlaveAddress(0x77);

    /// Create a new slave address
    pub fn new(address: u8) -> TwiResult<Self> {
        if address < Self::MIN.0 || address > Self::MAX.0 {
            Err(TwiError::InvalidAddress(address))
        } else {
            Ok(SlaveAddress(address))
        }
    }

    /// Get the raw 7-bit address
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check if a 7-bit address on the wire selects this slave
    pub const fn matches(self, address: u8, mask: u8) -> bool {
        (self.0 & !mask) == (address & !mask)
    }
}

impl Default for SlaveAddress {
    fn default() -> Self {
        SlaveAddress::MIN
    }
}

impl fmt::Display for SlaveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SlaveAddress {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u8:#x}", self.0);
    }
}

/// Slave-side bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaveConfig {
    /// Own address
    pub address: SlaveAddress,
    /// Respond to the general call address (0x00)
    pub general_call: bool,
    /// Interrupt-driven operation; polled when false
    pub interrupts: bool,
    /// Address bits to ignore when matching (7-bit mask)
    pub address_mask: u8,
}

impl Default for SlaveConfig {
    fn default() -> Self {
        Self {
            address: SlaveAddress::default(),
            general_call: false,
            interrupts: true,
            address_mask: 0,
        }
    }
}

impl SlaveConfig {
    /// Returns a builder seeded with the default configuration.
    pub fn builder() -> SlaveConfigBuilder {
        SlaveConfigBuilder::default()
    }

    /// Check if an address seen on the wire selects this slave
    pub const fn accepts(&self, address: u8) -> bool {
        (address == 0 && self.general_call) || self.address.matches(address, self.address_mask)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SlaveConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "SlaveConfig{{ address: {}, general_call: {}, interrupts: {}, mask: {=u8:#x} }}",
            self.address,
            self.general_call,
            self.interrupts,
            self.address_mask
        );
    }
}

/// Builder for [`SlaveConfig`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone, Copy)]
pub struct SlaveConfigBuilder {
    address: u8,
    general_call: bool,
    interrupts: bool,
    address_mask: u8,
}

impl Default for SlaveConfigBuilder {
    fn default() -> Self {
        let config = SlaveConfig::default();
        Self {
            address: config.address.raw(),
            general_call: config.general_call,
            interrupts: config.interrupts,
            address_mask: config.address_mask,
        }
    }
}

impl SlaveConfigBuilder {
    /// Sets the own 7-bit address.
    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Enables or disables general call recognition.
    pub fn general_call(mut self, enable: bool) -> Self {
        self.general_call = enable;
        self
    }

    /// Selects interrupt-driven (true) or polled (false) operation.
    pub fn interrupts(mut self, enable: bool) -> Self {
        self.interrupts = enable;
        self
    }

    /// Sets the address mask; set bits are ignored when matching.
    pub fn address_mask(mut self, mask: u8) -> Self {
        self.address_mask = mask;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> TwiResult<SlaveConfig> {
        if self.address_mask > 0x7F {
            return Err(TwiError::InvalidMask(self.address_mask));
        }

        Ok(SlaveConfig {
            address: SlaveAddress::new(self.address)?,
            general_call: self.general_call,
            interrupts: self.interrupts,
            address_mask: self.address_mask,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_range() {
        assert!(SlaveAddress::new(0x00).is_err());
        assert!(SlaveAddress::new(0x01).is_ok());
        assert!(SlaveAddress::new(0x77).is_ok());
        assert_eq!(SlaveAddress::new(0x78), Err(TwiError::InvalidAddress(0x78)));
    }

    #[test]
    fn test_address_mask_matching() {
        let addr = SlaveAddress::new(0x20).unwrap();
        assert!(addr.matches(0x20, 0));
        assert!(!addr.matches(0x21, 0));
        assert!(addr.matches(0x21, 0x01));
        assert!(addr.matches(0x23, 0x03));
    }

    #[test]
    fn test_general_call_acceptance() {
        let mut config = SlaveConfig::default();
        assert!(!config.accepts(0x00));
        config.general_call = true;
        assert!(config.accepts(0x00));
        assert!(config.accepts(0x01));
    }
}
