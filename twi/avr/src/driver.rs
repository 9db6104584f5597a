//! TWI slave driver

use twi_core::{BusSlave, Control, Reply, SlaveConfig, TwiError, TwiResult};
use crate::codec::{decode, encode, own_address};
use crate::regs::{bits::*, TwiRegisters, STATUS_MASK};

/// Outcome of servicing one TWI interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Serviced {
    /// Status code that was handled (prescaler bits masked off)
    pub status: u8,
    /// Reply written back to the peripheral
    pub reply: Reply,
    /// TWCR value written back
    pub control: u8,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Serviced {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Serviced{{ status: {=u8:#x}, reply: {}, twcr: {=u8:#x} }}",
            self.status,
            self.reply,
            self.control
        );
    }
}

/// Slave-mode driver for the AVR TWI peripheral.
///
/// Owns the register block and forwards every interrupt to a [`BusSlave`].
pub struct TwiSlave<R> {
    regs: R,
    config: SlaveConfig,
    enabled: bool,
}

impl<R: TwiRegisters> TwiSlave<R> {
    /// Create a driver; the peripheral is left untouched until [`init`](Self::init)
    pub fn new(regs: R, config: SlaveConfig) -> Self {
        Self {
            regs,
            config,
            enabled: false,
        }
    }

    /// Program the own address and enable address recognition
    pub fn init(&mut self) {
        self.regs.set_address(own_address(&self.config));
        self.regs.set_address_mask(self.config.address_mask << 1);

        let mut twcr = TWINT | TWEA | TWEN;
        if self.config.interrupts {
            twcr |= TWIE;
        }
        self.regs.set_control(twcr);
        self.enabled = true;

        debug!("twi: slave enabled at {}", self.config.address);
    }

    /// Stop acknowledging and disable the peripheral
    pub fn stop(&mut self) {
        let twcr = self.regs.control();
        self.regs.set_control(twcr & !(TWEA | TWEN));
        self.enabled = false;

        debug!("twi: slave disabled");
    }

    /// Check if the peripheral is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Handle one pending TWI state; call from the TWI interrupt.
    pub fn service<S: BusSlave>(&mut self, slave: &mut S) -> TwiResult<Serviced> {
        if !self.enabled {
            return Err(TwiError::NotEnabled);
        }

        let status = self.regs.status() & STATUS_MASK;
        let data = self.regs.data();

        let mut reply = Reply::ACK;
        for event in decode(status, data, &self.config) {
            trace!("twi: status {=u8:#x} -> {}", status, event);
            reply = slave.on_event(event);
        }

        if let Some(byte) = reply.data {
            self.regs.set_data(byte);
        }

        let control = encode(status, &reply, &self.config);
        self.regs.set_control(control);

        if reply.control == Control::Nack {
            debug!("twi: refused at status {=u8:#x}", status);
        }

        Ok(Serviced { status, reply, control })
    }

    /// Service the peripheral if TWINT is set.
    ///
    /// For polled operation; returns `WouldBlock` while nothing is pending.
    pub fn poll<S: BusSlave>(&mut self, slave: &mut S) -> nb::Result<Serviced, TwiError> {
        if !self.enabled {
            return Err(nb::Error::Other(TwiError::NotEnabled));
        }

        if self.regs.control() & TWINT == 0 {
            return Err(nb::Error::WouldBlock);
        }

        self.service(slave).map_err(nb::Error::Other)
    }

    /// Borrow the register block
    pub fn regs(&self) -> &R {
        &self.regs
    }

    /// Mutably borrow the register block
    pub fn regs_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Give the register block back
    pub fn release(self) -> R {
        self.regs
    }
}
