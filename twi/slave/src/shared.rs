//! Engine handle shared between interrupt and thread context

use core::cell::RefCell;
use critical_section::Mutex;
use twi_core::{BusEvent, BusSlave, Reply};
use crate::{BufferSlave, SlaveStats, State};

/// [`BufferSlave`] behind a critical section.
///
/// The bus interrupt calls [`handle`](Self::handle); application code
/// publishes into the read memory and collects from the write memory through
/// the other methods. Every call runs inside its own critical section, so a
/// bus event is never observed half-applied.
///
/// ```
/// use twi_core::BusEvent;
/// use twi_slave::SharedSlave;
///
/// static SLAVE: SharedSlave = SharedSlave::new();
///
/// SLAVE.publish(0x10, &[0xAA, 0xBB]);
/// SLAVE.handle(BusEvent::AddressedAsTransmitter);
/// ```
pub struct SharedSlave {
    inner: Mutex<RefCell<BufferSlave>>,
}

impl SharedSlave {
    /// Create a new shared engine
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(BufferSlave::new())),
        }
    }

    /// Handle one bus event (interrupt side)
    pub fn handle(&self, event: BusEvent) -> Reply {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).handle(event))
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut BufferSlave) -> R) -> R {
        critical_section::with(|cs| {
            let mut slave = self.inner.borrow_ref_mut(cs);
            f(&mut slave)
        })
    }

    /// Copy `data` into the read memory starting at `offset`
    pub fn publish(&self, offset: u8, data: &[u8]) {
        self.with(|slave| slave.read_memory_mut().load(offset, data));
    }

    /// Copy bytes out of the write memory starting at `offset`
    pub fn fetch(&self, offset: u8, buf: &mut [u8]) {
        self.with(|slave| slave.write_memory().copy_out(offset, buf));
    }

    /// Read one byte of the write memory
    pub fn read_byte(&self, index: u8) -> u8 {
        self.with(|slave| slave.write_memory().get(index))
    }

    /// Set one byte of the read memory
    pub fn write_byte(&self, index: u8, value: u8) {
        self.with(|slave| slave.read_memory_mut().set(index, value));
    }

    /// Current protocol state
    pub fn state(&self) -> State {
        self.with(|slave| slave.state())
    }

    /// Current address cursor
    pub fn cursor(&self) -> Option<u8> {
        self.with(|slave| slave.cursor())
    }

    /// Transfer statistics
    pub fn stats(&self) -> SlaveStats {
        self.with(|slave| slave.stats())
    }

    /// Discard the cursor and return to a re-addressable state
    pub fn reset(&self) {
        self.with(|slave| slave.reset());
    }
}

impl Default for SharedSlave {
    fn default() -> Self {
        Self::new()
    }
}

impl BusSlave for &SharedSlave {
    fn on_event(&mut self, event: BusEvent) -> Reply {
        self.handle(event)
    }
}

impl BusSlave for SharedSlave {
    fn on_event(&mut self, event: BusEvent) -> Reply {
        self.handle(event)
    }
}
