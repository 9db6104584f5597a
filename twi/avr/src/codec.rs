//! Translation between TWI registers and bus events

use heapless::Vec;
use twi_core::{BusEvent, Control, Reply, SlaveConfig};
use crate::regs::{bits::*, status::*, STATUS_MASK};

/// Events raised by a single TWI interrupt
pub type Events = Vec<BusEvent, 2>;

/// Decode a TWSR value (and TWDR, for data states) into bus events.
///
/// Own SLA+R yields two events because the peripheral needs the first byte
/// in TWDR before the interrupt returns.
pub fn decode(twsr: u8, twdr: u8, config: &SlaveConfig) -> Events {
    let single = |event: BusEvent| -> Events { [event].into_iter().collect() };

    match twsr & STATUS_MASK {
        SR_SLA_ACK | SR_ARB_LOST_SLA_ACK => single(BusEvent::AddressedAsReceiver),
        SR_GCALL_ACK | SR_ARB_LOST_GCALL_ACK if config.general_call => {
            single(BusEvent::AddressedAsReceiver)
        }
        SR_DATA_ACK | SR_DATA_NACK => single(BusEvent::ByteReceived(twdr)),
        SR_GCALL_DATA_ACK | SR_GCALL_DATA_NACK if config.general_call => {
            single(BusEvent::ByteReceived(twdr))
        }
        ST_SLA_ACK | ST_ARB_LOST_SLA_ACK => [BusEvent::AddressedAsTransmitter, BusEvent::ByteRequested]
            .into_iter()
            .collect(),
        ST_DATA_ACK => single(BusEvent::ByteRequested),
        SR_STOP | ST_DATA_NACK | ST_LAST_DATA => single(BusEvent::TransactionEnd),
        _ => single(BusEvent::Other),
    }
}

/// Compute the TWCR value that hands the bus back after `reply`.
///
/// On the receive path TWEA stays set for `Nack` so the peripheral drops to
/// the not-addressed state but still recognises its own address. A `Nack`
/// carrying a filler byte clears TWEA so the filler goes out as the last byte.
pub fn encode(twsr: u8, reply: &Reply, config: &SlaveConfig) -> u8 {
    let mut twcr = TWINT | TWEN;

    if config.interrupts {
        twcr |= TWIE;
    }

    match (reply.control, reply.data) {
        (Control::Ack, _) | (Control::Nack, None) => twcr |= TWEA,
        (Control::AckLast, _) | (Control::Nack, Some(_)) => {}
    }

    if twsr & STATUS_MASK == BUS_ERROR {
        twcr |= TWSTO;
    }

    twcr
}

/// TWAR value for `config`
pub fn own_address(config: &SlaveConfig) -> u8 {
    let gce = if config.general_call { TWGCE } else { 0 };
    (config.address.raw() << 1) | gce
}
