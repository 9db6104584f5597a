#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

//! # TWI AVR Adapter
//!
//! Connects the AVR two-wire interface to any [`BusSlave`]. Each TWI
//! interrupt is decoded from TWSR into bus events, dispatched to the slave,
//! and the reply is written back through TWDR and TWCR.
//!
//! Register access goes through [`TwiRegisters`], so the driver runs
//! unchanged against the real peripheral or a test double.
//!
//! [`BusSlave`]: twi_core::BusSlave

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod codec;
pub mod driver;
pub mod regs;

pub use codec::{decode, encode, own_address, Events};
pub use driver::{Serviced, TwiSlave};
pub use regs::{bits, status, TwiRegisters, STATUS_MASK};
