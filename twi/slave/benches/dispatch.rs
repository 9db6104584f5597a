use criterion::{black_box, criterion_group, criterion_main, Criterion};
use twi_slave::{BufferSlave, BusEvent, SharedSlave};

fn bench_write_burst(c: &mut Criterion) {
    let mut slave = BufferSlave::new();

    c.bench_function("write burst 64 bytes", |b| {
        b.iter(|| {
            slave.handle(BusEvent::AddressedAsReceiver);
            slave.handle(BusEvent::ByteReceived(0x20));
            for i in 0..64u8 {
                black_box(slave.handle(BusEvent::ByteReceived(i)));
            }
            slave.handle(BusEvent::TransactionEnd);
        })
    });
}

fn bench_shared_read_burst(c: &mut Criterion) {
    let slave = SharedSlave::new();
    slave.publish(0, &[0xA5; 64]);

    c.bench_function("shared read burst 64 bytes", |b| {
        b.iter(|| {
            slave.handle(BusEvent::AddressedAsReceiver);
            slave.handle(BusEvent::ByteReceived(0));
            slave.handle(BusEvent::AddressedAsTransmitter);
            for _ in 0..64 {
                black_box(slave.handle(BusEvent::ByteRequested));
            }
            slave.handle(BusEvent::TransactionEnd);
        })
    });
}

criterion_group!(benches, bench_write_burst, bench_shared_read_burst);
criterion_main!(benches);
