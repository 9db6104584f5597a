//! Bus events, control decisions and the slave seam

use core::fmt;

/// Event raised by the bus controller.
///
/// Events are delivered in bus order and each one is handled to completion
/// before the next is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    /// Own address matched with the write bit; the master will send data
    AddressedAsReceiver,
    /// One data byte arrived from the master
    ByteReceived(u8),
    /// Own address matched with the read bit; the master will clock data out
    AddressedAsTransmitter,
    /// The controller needs the next byte to drive onto the bus
    ByteRequested,
    /// STOP or repeated START while addressed, or the master finished a read
    TransactionEnd,
    /// Any other bus condition
    Other,
}

impl BusEvent {
    /// Check if this event starts an addressing phase
    pub const fn is_addressing(&self) -> bool {
        matches!(self, BusEvent::AddressedAsReceiver | BusEvent::AddressedAsTransmitter)
    }
}

impl fmt::Display for BusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusEvent::AddressedAsReceiver => write!(f, "AddressedAsReceiver"),
            BusEvent::ByteReceived(byte) => write!(f, "ByteReceived(0x{:02x})", byte),
            BusEvent::AddressedAsTransmitter => write!(f, "AddressedAsTransmitter"),
            BusEvent::ByteRequested => write!(f, "ByteRequested"),
            BusEvent::TransactionEnd => write!(f, "TransactionEnd"),
            BusEvent::Other => write!(f, "Other"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BusEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            BusEvent::AddressedAsReceiver => defmt::write!(fmt, "AddressedAsReceiver"),
            BusEvent::ByteReceived(byte) => defmt::write!(fmt, "ByteReceived({=u8:#x})", byte),
            BusEvent::AddressedAsTransmitter => defmt::write!(fmt, "AddressedAsTransmitter"),
            BusEvent::ByteRequested => defmt::write!(fmt, "ByteRequested"),
            BusEvent::TransactionEnd => defmt::write!(fmt, "TransactionEnd"),
            BusEvent::Other => defmt::write!(fmt, "Other"),
        }
    }
}

/// Acknowledge decision handed back to the bus controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Acknowledge and keep the transfer going
    Ack,
    /// Accept the current byte but refuse the next one
    AckLast,
    /// Refuse the current byte
    Nack,
}

impl Control {
    /// Check if the transfer may continue after this decision
    pub const fn is_continue(&self) -> bool {
        matches!(self, Control::Ack)
    }

    /// Check if the current byte was accepted
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Control::Ack | Control::AckLast)
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Ack => write!(f, "ACK"),
            Control::AckLast => write!(f, "ACK(last)"),
            Control::Nack => write!(f, "NACK"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Control {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Control::Ack => defmt::write!(fmt, "ACK"),
            Control::AckLast => defmt::write!(fmt, "ACK(last)"),
            Control::Nack => defmt::write!(fmt, "NACK"),
        }
    }
}

/// Everything a slave decides in response to one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    /// Byte to drive onto the bus (transmit path only)
    pub data: Option<u8>,
    /// Acknowledge decision
    pub control: Control,
}

impl Reply {
    /// Plain acknowledge without data
    pub const ACK: Reply = Reply { data: None, control: Control::Ack };

    /// Plain not-acknowledge without data
    pub const NACK: Reply = Reply { data: None, control: Control::Nack };

    /// Create a reply carrying only a control decision
    pub const fn control(control: Control) -> Self {
        Self { data: None, control }
    }

    /// Create a reply that drives a byte onto the bus
    pub const fn transmit(data: u8, control: Control) -> Self {
        Self { data: Some(data), control }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Reply {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Reply{{ data: {}, control: {} }}", self.data, self.control);
    }
}

/// Anything that can sit on the slave side of the bus.
///
/// Implemented by the protocol engine, by shared handles around it, and by
/// test doubles; consumed by peripheral drivers and bus simulators.
pub trait BusSlave {
    /// Handle one bus event to completion
    fn on_event(&mut self, event: BusEvent) -> Reply;
}

impl<T: BusSlave + ?Sized> BusSlave for &mut T {
    fn on_event(&mut self, event: BusEvent) -> Reply {
        (**self).on_event(event)
    }
}
