//! Buffer slave protocol engine

use twi_core::{BusEvent, BusSlave, Reply};
use crate::{Effect, RegisterFile, State};

/// Transfer statistics for debugging and monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlaveStats {
    /// Data bytes stored into the write memory
    pub bytes_written: u32,
    /// Data bytes served from the read memory
    pub bytes_read: u32,
    /// Bytes refused at the end of the range
    pub refused: u32,
    /// Resets caused by `Other` or out-of-sequence events
    pub resets: u32,
    /// Transactions that ended normally
    pub transactions: u32,
}

impl SlaveStats {
    /// Create zeroed statistics
    pub const fn new() -> Self {
        Self {
            bytes_written: 0,
            bytes_read: 0,
            refused: 0,
            resets: 0,
            transactions: 0,
        }
    }

    /// Account for one transition effect
    fn record(&mut self, effect: &Effect) {
        match effect {
            Effect::None => {}
            Effect::Store { .. } => self.bytes_written = self.bytes_written.wrapping_add(1),
            Effect::Serve { .. } => self.bytes_read = self.bytes_read.wrapping_add(1),
            Effect::Refuse => self.refused = self.refused.wrapping_add(1),
            Effect::Reset => self.resets = self.resets.wrapping_add(1),
            Effect::End => self.transactions = self.transactions.wrapping_add(1),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SlaveStats {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "SlaveStats{{ written: {}, read: {}, refused: {}, resets: {}, transactions: {} }}",
            self.bytes_written,
            self.bytes_read,
            self.refused,
            self.resets,
            self.transactions
        );
    }
}

/// Bus slave exposing a write memory and a read memory.
///
/// A master write sends the target offset first, then data bytes that land
/// at consecutive offsets. A master read serves bytes from the read memory
/// starting at the last established offset (0 if none). Index `0xFF` is the
/// end of the range in both directions.
pub struct BufferSlave {
    state: State,
    write_mem: RegisterFile,
    read_mem: RegisterFile,
    stats: SlaveStats,
}

impl BufferSlave {
    /// Create an idle engine with zeroed memories
    pub const fn new() -> Self {
        Self {
            state: State::INITIAL,
            write_mem: RegisterFile::new(),
            read_mem: RegisterFile::new(),
            stats: SlaveStats::new(),
        }
    }

    /// Handle one bus event to completion
    pub fn handle(&mut self, event: BusEvent) -> Reply {
        let step = self.state.step(event, &self.read_mem);

        match step.effect {
            Effect::Store { index, value } => {
                self.write_mem.set(index, value);
                trace!("twi: stored {=u8:#x} at {=u8:#x}", value, index);
            }
            Effect::Refuse => {
                debug!("twi: end of range, refused {}", event);
            }
            Effect::Reset => {
                if !matches!(event, BusEvent::Other) {
                    warn!("twi: {} out of sequence in {}", event, self.state);
                }
            }
            _ => {}
        }

        self.stats.record(&step.effect);
        self.state = step.state;
        step.reply
    }

    /// Current protocol state
    pub fn state(&self) -> State {
        self.state
    }

    /// Current address cursor
    pub fn cursor(&self) -> Option<u8> {
        self.state.cursor()
    }

    /// Discard the cursor and return to a re-addressable state.
    ///
    /// Memories are left untouched.
    pub fn reset(&mut self) {
        self.handle(BusEvent::Other);
    }

    /// Memory filled by master writes
    pub fn write_memory(&self) -> &RegisterFile {
        &self.write_mem
    }

    /// Memory filled by master writes, mutably (e.g. to clear consumed data)
    pub fn write_memory_mut(&mut self) -> &mut RegisterFile {
        &mut self.write_mem
    }

    /// Memory served to master reads
    pub fn read_memory(&self) -> &RegisterFile {
        &self.read_mem
    }

    /// Memory served to master reads, mutably (to publish data)
    pub fn read_memory_mut(&mut self) -> &mut RegisterFile {
        &mut self.read_mem
    }

    /// Transfer statistics
    pub fn stats(&self) -> SlaveStats {
        self.stats
    }
}

impl Default for BufferSlave {
    fn default() -> Self {
        Self::new()
    }
}

impl BusSlave for BufferSlave {
    fn on_event(&mut self, event: BusEvent) -> Reply {
        self.handle(event)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BufferSlave {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "BufferSlave{{ state: {}, stats: {} }}", self.state, self.stats);
    }
}
