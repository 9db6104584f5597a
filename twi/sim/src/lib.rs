#![forbid(unsafe_code)]

//! # TWI Bus Simulator
//!
//! A host-side bus master that drives any [`BusSlave`] through the same
//! event sequences a TWI controller raises on target. [`SimBus`] implements
//! [`embedded_hal::i2c::I2c`], so master-side drivers and tests can talk to
//! a slave without hardware.
//!
//! ```
//! use embedded_hal::i2c::I2c;
//! use twi_core::{BusEvent, BusSlave, Reply, SlaveConfig};
//! use twi_sim::SimBus;
//!
//! struct Echo(u8);
//!
//! impl BusSlave for Echo {
//!     fn on_event(&mut self, event: BusEvent) -> Reply {
//!         match event {
//!             BusEvent::ByteReceived(b) => {
//!                 self.0 = b;
//!                 Reply::ACK
//!             }
//!             BusEvent::ByteRequested => Reply::transmit(self.0, twi_core::Control::Ack),
//!             _ => Reply::ACK,
//!         }
//!     }
//! }
//!
//! let mut bus = SimBus::new(Echo(0), SlaveConfig::default());
//! let mut buf = [0u8; 1];
//! bus.write_read(0x01, &[0x42], &mut buf).unwrap();
//! assert_eq!(buf, [0x42]);
//! ```

use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation, SevenBitAddress};
use log::{debug, trace};
use thiserror::Error;
use twi_core::{BusEvent, BusSlave, Control, Reply, SlaveConfig};

/// Byte seen by the master when the slave drives nothing
pub const IDLE_LINE: u8 = 0xFF;

/// Errors reported to the simulated master
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// The slave did not acknowledge the address or a data byte
    #[error("no acknowledge: {0}")]
    NoAcknowledge(NoAcknowledgeSource),
}

impl i2c::Error for SimError {
    fn kind(&self) -> ErrorKind {
        match *self {
            SimError::NoAcknowledge(source) => ErrorKind::NoAcknowledge(source),
        }
    }
}

/// Direction of the transfer the slave is currently addressed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Writing,
    Reading,
}

/// Simulated bus with one slave attached
pub struct SimBus<S> {
    slave: S,
    config: SlaveConfig,
    phase: Phase,
    transcript: Vec<(BusEvent, Reply)>,
}

impl<S: BusSlave> SimBus<S> {
    /// Attach `slave`, answering at the address in `config`
    pub fn new(slave: S, config: SlaveConfig) -> Self {
        Self {
            slave,
            config,
            phase: Phase::Idle,
            transcript: Vec::new(),
        }
    }

    /// Address the slave for writing, with a repeated START if already addressed
    pub fn start_write(&mut self) -> Reply {
        self.restart();
        self.phase = Phase::Writing;
        self.dispatch(BusEvent::AddressedAsReceiver)
    }

    /// Clock one byte into the slave.
    ///
    /// Returns the slave's decision; a refused byte is an error.
    pub fn send(&mut self, byte: u8) -> Result<Control, SimError> {
        let reply = self.dispatch(BusEvent::ByteReceived(byte));
        match reply.control {
            Control::Nack => Err(SimError::NoAcknowledge(NoAcknowledgeSource::Data)),
            control => Ok(control),
        }
    }

    /// Address the slave for reading, with a repeated START if already addressed
    pub fn start_read(&mut self) -> Reply {
        self.restart();
        self.phase = Phase::Reading;
        self.dispatch(BusEvent::AddressedAsTransmitter)
    }

    /// Clock one byte out of the slave
    pub fn receive(&mut self) -> u8 {
        self.dispatch(BusEvent::ByteRequested).data.unwrap_or(IDLE_LINE)
    }

    /// Release the bus with a STOP condition
    pub fn stop(&mut self) {
        if self.phase != Phase::Idle {
            self.dispatch(BusEvent::TransactionEnd);
            self.phase = Phase::Idle;
        }
    }

    /// Raise an arbitrary event, as a bus error or stray condition would
    pub fn inject(&mut self, event: BusEvent) -> Reply {
        if event == BusEvent::Other {
            self.phase = Phase::Idle;
        }
        self.dispatch(event)
    }

    /// Events raised so far, with the slave's replies
    pub fn transcript(&self) -> &[(BusEvent, Reply)] {
        &self.transcript
    }

    /// Forget the recorded events
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    /// Attached slave
    pub fn slave(&self) -> &S {
        &self.slave
    }

    /// Attached slave, mutably
    pub fn slave_mut(&mut self) -> &mut S {
        &mut self.slave
    }

    fn restart(&mut self) {
        if self.phase != Phase::Idle {
            trace!("sim: repeated start");
            self.dispatch(BusEvent::TransactionEnd);
        }
    }

    fn dispatch(&mut self, event: BusEvent) -> Reply {
        let reply = self.slave.on_event(event);
        trace!("sim: {} -> {:?}", event, reply);
        self.transcript.push((event, reply));
        reply
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SimError> {
        if self.phase != Phase::Writing {
            self.start_write();
        }
        for &byte in bytes {
            self.send(byte)?;
        }
        Ok(())
    }

    fn read_bytes(&mut self, buf: &mut [u8]) {
        if self.phase != Phase::Reading {
            self.start_read();
        }
        for slot in buf.iter_mut() {
            *slot = self.receive();
        }
    }
}

impl<S: BusSlave> i2c::ErrorType for SimBus<S> {
    type Error = SimError;
}

impl<S: BusSlave> i2c::I2c<SevenBitAddress> for SimBus<S> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if !self.config.accepts(address) {
            debug!("sim: no device at 0x{:02x}", address);
            return Err(SimError::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        debug!("sim: transaction at 0x{:02x}, {} operation(s)", address, operations.len());

        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    if let Err(err) = self.write_bytes(bytes) {
                        debug!("sim: write refused");
                        self.stop();
                        return Err(err);
                    }
                }
                Operation::Read(buf) => self.read_bytes(buf),
            }
        }

        self.stop();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Acknowledges everything and serves a running count
    #[derive(Default)]
    struct Counter {
        requested: u8,
    }

    impl BusSlave for Counter {
        fn on_event(&mut self, event: BusEvent) -> Reply {
            if event == BusEvent::ByteRequested {
                self.requested += 1;
                return Reply::transmit(self.requested, Control::Ack);
            }
            Reply::ACK
        }
    }

    #[test]
    fn test_stop_when_idle_is_silent() {
        let mut bus = SimBus::new(Counter::default(), SlaveConfig::default());
        bus.stop();
        assert!(bus.transcript().is_empty());
    }

    #[test]
    fn test_restart_inserts_transaction_end() {
        let mut bus = SimBus::new(Counter::default(), SlaveConfig::default());
        bus.start_write();
        bus.send(1).unwrap();
        bus.start_read();
        assert_eq!(bus.receive(), 1);
        bus.stop();

        let events: Vec<BusEvent> = bus.transcript().iter().map(|(e, _)| *e).collect();
        assert_eq!(
            events,
            [
                BusEvent::AddressedAsReceiver,
                BusEvent::ByteReceived(1),
                BusEvent::TransactionEnd,
                BusEvent::AddressedAsTransmitter,
                BusEvent::ByteRequested,
                BusEvent::TransactionEnd,
            ]
        );
    }

    #[test]
    fn test_error_kind() {
        use embedded_hal::i2c::Error;

        let err = SimError::NoAcknowledge(NoAcknowledgeSource::Address);
        assert_eq!(err.kind(), ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        assert!(err.to_string().starts_with("no acknowledge: "));

        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.to_string().contains("address"));
    }

    #[test]
    fn test_inject_other_returns_to_idle() {
        let mut bus = SimBus::new(Counter::default(), SlaveConfig::default());
        bus.start_write();
        bus.inject(BusEvent::Other);
        bus.stop();
        assert_eq!(bus.transcript().len(), 2);
    }
}
