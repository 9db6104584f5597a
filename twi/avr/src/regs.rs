//! TWI register layout: status codes, control bits and the access seam

/// Bits of TWSR that carry the status code (the rest is the prescaler)
pub const STATUS_MASK: u8 = 0xF8;

/// TWSR status codes for slave operation
pub mod status {
    /// Own SLA+W received, ACK returned
    pub const SR_SLA_ACK: u8 = 0x60;
    /// Arbitration lost as master, own SLA+W received, ACK returned
    pub const SR_ARB_LOST_SLA_ACK: u8 = 0x68;
    /// General call received, ACK returned
    pub const SR_GCALL_ACK: u8 = 0x70;
    /// Arbitration lost as master, general call received, ACK returned
    pub const SR_ARB_LOST_GCALL_ACK: u8 = 0x78;
    /// Data received after own SLA+W, ACK returned
    pub const SR_DATA_ACK: u8 = 0x80;
    /// Data received after own SLA+W, NACK returned
    pub const SR_DATA_NACK: u8 = 0x88;
    /// Data received after general call, ACK returned
    pub const SR_GCALL_DATA_ACK: u8 = 0x90;
    /// Data received after general call, NACK returned
    pub const SR_GCALL_DATA_NACK: u8 = 0x98;
    /// STOP or repeated START received while addressed
    pub const SR_STOP: u8 = 0xA0;
    /// Own SLA+R received, ACK returned
    pub const ST_SLA_ACK: u8 = 0xA8;
    /// Arbitration lost as master, own SLA+R received, ACK returned
    pub const ST_ARB_LOST_SLA_ACK: u8 = 0xB0;
    /// Data transmitted, ACK received
    pub const ST_DATA_ACK: u8 = 0xB8;
    /// Data transmitted, NACK received
    pub const ST_DATA_NACK: u8 = 0xC0;
    /// Last data byte transmitted (TWEA cleared), ACK received
    pub const ST_LAST_DATA: u8 = 0xC8;
    /// No relevant state information, TWINT not set
    pub const NO_INFO: u8 = 0xF8;
    /// Illegal START or STOP condition
    pub const BUS_ERROR: u8 = 0x00;
}

/// TWCR and TWAR bits
pub mod bits {
    /// Interrupt flag, write one to clear
    pub const TWINT: u8 = 1 << 7;
    /// Enable acknowledge
    pub const TWEA: u8 = 1 << 6;
    /// START condition
    pub const TWSTA: u8 = 1 << 5;
    /// STOP condition
    pub const TWSTO: u8 = 1 << 4;
    /// Write collision flag
    pub const TWWC: u8 = 1 << 3;
    /// TWI enable
    pub const TWEN: u8 = 1 << 2;
    /// Interrupt enable
    pub const TWIE: u8 = 1 << 0;
    /// General call recognition (TWAR)
    pub const TWGCE: u8 = 1 << 0;
}

/// Access to the TWI peripheral registers.
///
/// Implemented over the device's memory-mapped registers on target, and by
/// plain structs in tests.
pub trait TwiRegisters {
    /// Read TWSR
    fn status(&self) -> u8;

    /// Read TWDR
    fn data(&self) -> u8;

    /// Write TWDR
    fn set_data(&mut self, value: u8);

    /// Read TWCR
    fn control(&self) -> u8;

    /// Write TWCR
    fn set_control(&mut self, value: u8);

    /// Write TWAR
    fn set_address(&mut self, value: u8);

    /// Write TWAMR
    fn set_address_mask(&mut self, value: u8);
}
