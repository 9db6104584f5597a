#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # TWI Slave Buffer
//!
//! Turns an addressed, byte-oriented bus channel into a flat register file.
//! The engine owns two 256-byte memories:
//! - the write memory, filled by master writes
//! - the read memory, served to master reads
//!
//! and one address cursor. The first byte of a master write sets the cursor;
//! every further data byte is stored at the cursor, which then advances by
//! one. Reads serve bytes from the cursor onward. Reaching index `0xFF` ends
//! the transfer: the byte that moves the cursor there is acknowledged as the
//! last one, and anything after it is refused.
//!
//! The state machine is explicit ([`State`]) and its transition function is
//! pure ([`State::step`]), so it can be exercised without any hardware.
//! [`SharedSlave`] wraps the engine in a critical section for use from an
//! interrupt handler.

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod engine;
pub mod memory;
pub mod shared;
pub mod state;

pub use engine::*;
pub use memory::*;
pub use shared::*;
pub use state::*;

pub use twi_core::{BusEvent, BusSlave, Control, Reply};


/// Size of each memory
pub const MEMORY_SIZE: usize = 256;

/// Reserved end-of-range index
pub const TERMINAL_INDEX: u8 = 0xFF;

/// Byte driven onto the bus when there is nothing to serve (idle bus level)
pub const FILLER_BYTE: u8 = 0xFF;
