//! Protocol states and the pure transition function

use core::fmt;
use twi_core::{BusEvent, Control, Reply};
use crate::{RegisterFile, FILLER_BYTE, TERMINAL_INDEX};

/// Protocol engine state.
///
/// The cursor lives inside the state so that "no offset yet" and
/// "offset 0xFF" can never be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Not addressed; keeps the cursor the previous transaction ended on
    Idle(Option<u8>),
    /// Addressed as receiver, the next byte is the target offset
    AwaitingOffset,
    /// Receiving data; the cursor is the next index to store into
    Writing(u8),
    /// Transmitting data; the cursor is the next index to serve
    Reading(u8),
}

impl State {
    /// Power-on state
    pub const INITIAL: State = State::Idle(None);

    /// Current address cursor, `None` while unset
    pub const fn cursor(&self) -> Option<u8> {
        match *self {
            State::Idle(cursor) => cursor,
            State::AwaitingOffset => None,
            State::Writing(cursor) | State::Reading(cursor) => Some(cursor),
        }
    }

    /// Check if a transaction is in progress
    pub const fn is_active(&self) -> bool {
        !matches!(self, State::Idle(_))
    }

    /// Compute the reaction to `event`.
    ///
    /// Pure: memory writes are returned as [`Effect::Store`] for the caller
    /// to apply, reads come from `read`.
    pub fn step(self, event: BusEvent, read: &RegisterFile) -> Step {
        match (self, event) {
            (_, BusEvent::AddressedAsReceiver) => {
                Step::new(State::AwaitingOffset, Reply::ACK, Effect::None)
            }

            (State::AwaitingOffset, BusEvent::ByteReceived(offset)) => {
                Step::new(State::Writing(offset), Reply::control(advance(offset)), Effect::None)
            }
            (State::Writing(TERMINAL_INDEX), BusEvent::ByteReceived(_)) => {
                Step::new(self, Reply::NACK, Effect::Refuse)
            }
            (State::Writing(index), BusEvent::ByteReceived(value)) => {
                let next = index.wrapping_add(1);
                Step::new(
                    State::Writing(next),
                    Reply::control(advance(next)),
                    Effect::Store { index, value },
                )
            }

            (State::Idle(cursor), BusEvent::AddressedAsTransmitter) => {
                Step::new(State::Reading(cursor.unwrap_or(0)), Reply::ACK, Effect::None)
            }
            (State::AwaitingOffset, BusEvent::AddressedAsTransmitter) => {
                Step::new(State::Reading(0), Reply::ACK, Effect::None)
            }
            (State::Writing(cursor) | State::Reading(cursor), BusEvent::AddressedAsTransmitter) => {
                Step::new(State::Reading(cursor), Reply::ACK, Effect::None)
            }

            (State::Reading(TERMINAL_INDEX), BusEvent::ByteRequested) => {
                Step::new(self, Reply::transmit(FILLER_BYTE, Control::Nack), Effect::Refuse)
            }
            (State::Reading(index), BusEvent::ByteRequested) => {
                let next = index.wrapping_add(1);
                Step::new(
                    State::Reading(next),
                    Reply::transmit(read.get(index), advance(next)),
                    Effect::Serve { index },
                )
            }

            (State::Writing(cursor) | State::Reading(cursor), BusEvent::TransactionEnd) => {
                Step::new(State::Idle(Some(cursor)), Reply::ACK, Effect::End)
            }
            (State::AwaitingOffset, BusEvent::TransactionEnd) => {
                Step::new(State::Idle(None), Reply::ACK, Effect::End)
            }
            (State::Idle(_), BusEvent::TransactionEnd) => {
                Step::new(self, Reply::ACK, Effect::None)
            }

            // Out-of-sequence requests still need a byte on the wire.
            (_, BusEvent::ByteRequested) => Step::new(
                State::INITIAL,
                Reply::transmit(FILLER_BYTE, Control::Ack),
                Effect::Reset,
            ),
            (_, BusEvent::ByteReceived(_)) | (_, BusEvent::Other) => {
                Step::new(State::INITIAL, Reply::ACK, Effect::Reset)
            }
        }
    }
}

impl Default for State {
    fn default() -> Self {
        State::INITIAL
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Idle(None) => write!(f, "Idle"),
            State::Idle(Some(cursor)) => write!(f, "Idle(0x{:02x})", cursor),
            State::AwaitingOffset => write!(f, "AwaitingOffset"),
            State::Writing(cursor) => write!(f, "Writing(0x{:02x})", cursor),
            State::Reading(cursor) => write!(f, "Reading(0x{:02x})", cursor),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for State {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            State::Idle(cursor) => defmt::write!(fmt, "Idle({})", cursor),
            State::AwaitingOffset => defmt::write!(fmt, "AwaitingOffset"),
            State::Writing(cursor) => defmt::write!(fmt, "Writing({=u8:#x})", cursor),
            State::Reading(cursor) => defmt::write!(fmt, "Reading({=u8:#x})", cursor),
        }
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to apply
    None,
    /// Store `value` at `index` of the write memory
    Store { index: u8, value: u8 },
    /// Byte at `index` of the read memory was served
    Serve { index: u8 },
    /// Byte refused at the end of the range
    Refuse,
    /// Cursor discarded, back to a re-addressable state
    Reset,
    /// Transaction finished normally
    End,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Effect {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Effect::None => defmt::write!(fmt, "None"),
            Effect::Store { index, value } => {
                defmt::write!(fmt, "Store({=u8:#x} <- {=u8:#x})", index, value)
            }
            Effect::Serve { index } => defmt::write!(fmt, "Serve({=u8:#x})", index),
            Effect::Refuse => defmt::write!(fmt, "Refuse"),
            Effect::Reset => defmt::write!(fmt, "Reset"),
            Effect::End => defmt::write!(fmt, "End"),
        }
    }
}

/// Result of one transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub state: State,
    pub reply: Reply,
    pub effect: Effect,
}

impl Step {
    const fn new(state: State, reply: Reply, effect: Effect) -> Self {
        Self { state, reply, effect }
    }
}

/// Decision after moving the cursor onto `next`
const fn advance(next: u8) -> Control {
    if next == TERMINAL_INDEX {
        Control::AckLast
    } else {
        Control::Ack
    }
}
