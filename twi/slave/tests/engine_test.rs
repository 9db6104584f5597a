//! Protocol engine tests for twi-slave

use twi_slave::{BufferSlave, BusEvent, Control, State, FILLER_BYTE, TERMINAL_INDEX};

fn write_transaction(slave: &mut BufferSlave, offset: u8, data: &[u8]) -> Vec<Control> {
    slave.handle(BusEvent::AddressedAsReceiver);
    slave.handle(BusEvent::ByteReceived(offset));
    data.iter()
        .map(|&b| slave.handle(BusEvent::ByteReceived(b)).control)
        .collect()
}

fn read_bytes(slave: &mut BufferSlave, count: usize) -> Vec<u8> {
    slave.handle(BusEvent::AddressedAsTransmitter);
    (0..count)
        .map(|_| slave.handle(BusEvent::ByteRequested).data.unwrap())
        .collect()
}

#[test]
fn test_sequential_write() {
    let mut slave = BufferSlave::new();
    let controls = write_transaction(&mut slave, 0x10, &[0xAB, 0xCD]);

    assert_eq!(controls, vec![Control::Ack, Control::Ack]);
    assert_eq!(slave.write_memory().get(0x10), 0xAB);
    assert_eq!(slave.write_memory().get(0x11), 0xCD);
    assert_eq!(slave.cursor(), Some(0x12));
}

#[test]
fn test_read_from_offset() {
    let mut slave = BufferSlave::new();
    slave.read_memory_mut().load(5, &[0xAA, 0xBB, 0xCC]);

    slave.handle(BusEvent::AddressedAsReceiver);
    slave.handle(BusEvent::ByteReceived(5));

    assert_eq!(read_bytes(&mut slave, 3), vec![0xAA, 0xBB, 0xCC]);
    assert_eq!(slave.cursor(), Some(8));
}

#[test]
fn test_write_boundary() {
    let mut slave = BufferSlave::new();
    slave.handle(BusEvent::AddressedAsReceiver);
    slave.handle(BusEvent::ByteReceived(0xFE));
    assert_eq!(slave.cursor(), Some(0xFE));

    let reply = slave.handle(BusEvent::ByteReceived(0x11));
    assert_eq!(reply.control, Control::AckLast);
    assert_eq!(slave.write_memory().get(0xFE), 0x11);
    assert_eq!(slave.cursor(), Some(TERMINAL_INDEX));

    let before = slave.write_memory().clone();
    let reply = slave.handle(BusEvent::ByteReceived(0x22));
    assert_eq!(reply.control, Control::Nack);
    assert_eq!(slave.write_memory(), &before);
    assert_eq!(slave.cursor(), Some(TERMINAL_INDEX));
}

#[test]
fn test_read_boundary() {
    let mut slave = BufferSlave::new();
    slave.read_memory_mut().set(0xFE, 0x77);
    slave.handle(BusEvent::AddressedAsReceiver);
    slave.handle(BusEvent::ByteReceived(0xFE));
    slave.handle(BusEvent::AddressedAsTransmitter);

    let reply = slave.handle(BusEvent::ByteRequested);
    assert_eq!(reply.data, Some(0x77));
    assert_eq!(reply.control, Control::AckLast);

    let reply = slave.handle(BusEvent::ByteRequested);
    assert_eq!(reply.data, Some(FILLER_BYTE));
    assert_eq!(reply.control, Control::Nack);
    assert_eq!(slave.cursor(), Some(TERMINAL_INDEX));
}

#[test]
fn test_other_discards_interrupted_transaction() {
    let mut slave = BufferSlave::new();
    slave.handle(BusEvent::AddressedAsReceiver);
    slave.handle(BusEvent::ByteReceived(100));
    assert_eq!(slave.cursor(), Some(100));

    slave.handle(BusEvent::Other);
    assert_eq!(slave.cursor(), None);
    assert_eq!(slave.state(), State::INITIAL);

    write_transaction(&mut slave, 3, &[0x42]);
    assert_eq!(slave.write_memory().get(3), 0x42);
    assert_eq!(slave.write_memory().get(100), 0);
}

#[test]
fn test_full_range_write_from_every_offset() {
    for base in [0u8, 1, 0x80, 0xF0, 0xFD] {
        let mut slave = BufferSlave::new();
        let count = usize::from(TERMINAL_INDEX - base);
        let data: Vec<u8> = (0..count).map(|i| (i as u8).wrapping_mul(3)).collect();
        let controls = write_transaction(&mut slave, base, &data);

        assert!(controls[..count - 1].iter().all(|c| *c == Control::Ack));
        assert_eq!(controls[count - 1], Control::AckLast);
        for (k, &byte) in data.iter().enumerate() {
            assert_eq!(slave.write_memory().get(base.wrapping_add(k as u8)), byte);
        }
        assert_eq!(slave.write_memory().get(TERMINAL_INDEX), 0);
    }
}

#[test]
fn test_read_cursor_advances_once_per_request() {
    let mut slave = BufferSlave::new();
    for i in 0..=255u8 {
        slave.read_memory_mut().set(i, !i);
    }
    write_transaction(&mut slave, 0x40, &[]);
    slave.handle(BusEvent::AddressedAsTransmitter);

    for n in 0..16u8 {
        assert_eq!(slave.cursor(), Some(0x40 + n));
        let reply = slave.handle(BusEvent::ByteRequested);
        assert_eq!(reply.data, Some(!(0x40 + n)));
    }
}

#[test]
fn test_read_without_offset_starts_at_zero() {
    let mut slave = BufferSlave::new();
    slave.read_memory_mut().load(0, &[9, 8, 7]);
    assert_eq!(read_bytes(&mut slave, 3), vec![9, 8, 7]);
}

#[test]
fn test_other_is_idempotent() {
    let mut slave = BufferSlave::new();
    write_transaction(&mut slave, 0x20, &[1, 2, 3]);
    slave.handle(BusEvent::Other);
    slave.handle(BusEvent::Other);
    assert_eq!(slave.cursor(), None);

    write_transaction(&mut slave, 0x50, &[4]);
    assert_eq!(slave.write_memory().get(0x50), 4);
}

#[test]
fn test_write_then_restart_read() {
    let mut slave = BufferSlave::new();
    slave.read_memory_mut().load(0x30, &[0xDE, 0xAD]);

    write_transaction(&mut slave, 0x30, &[]);
    assert!(slave.state().is_active());
    slave.handle(BusEvent::TransactionEnd);
    assert_eq!(slave.state(), State::Idle(Some(0x30)));
    assert!(!slave.state().is_active());

    assert_eq!(read_bytes(&mut slave, 2), vec![0xDE, 0xAD]);
    slave.handle(BusEvent::TransactionEnd);
    assert_eq!(slave.cursor(), Some(0x32));
}

#[test]
fn test_memories_persist_across_transactions() {
    let mut slave = BufferSlave::new();
    write_transaction(&mut slave, 0, &[1, 2, 3, 4]);
    slave.handle(BusEvent::TransactionEnd);
    write_transaction(&mut slave, 2, &[0xFF]);
    slave.handle(BusEvent::TransactionEnd);

    assert_eq!(&slave.write_memory().as_bytes()[..4], &[1, 2, 0xFF, 4]);
}

#[test]
fn test_stats() {
    let mut slave = BufferSlave::new();
    write_transaction(&mut slave, 0xFD, &[1, 2, 3]);
    slave.handle(BusEvent::TransactionEnd);
    read_bytes(&mut slave, 1);
    slave.handle(BusEvent::Other);
    slave.handle(BusEvent::ByteRequested);

    let stats = slave.stats();
    assert_eq!(stats.bytes_written, 2);
    // One refused write, then the read started on the terminal index
    assert_eq!(stats.refused, 2);
    assert_eq!(stats.bytes_read, 0);
    assert_eq!(stats.transactions, 1);
    assert_eq!(stats.resets, 2);
}

#[test]
fn test_reset_keeps_memories() {
    let mut slave = BufferSlave::new();
    write_transaction(&mut slave, 7, &[0x99]);
    slave.reset();
    assert_eq!(slave.cursor(), None);
    assert_eq!(slave.write_memory().get(7), 0x99);
}
