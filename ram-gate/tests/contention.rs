//! Cross-thread behavior of the two gate disciplines.
use std::sync::Arc;

use ram_gate::{ExclusiveGate, ReclaimingGate};
use ram_store::BoundedStore;

const CAPACITY: u32 = 256;

#[test]
fn exclusive_gate_admits_one_holder() {
    use std::sync::atomic::{AtomicBool, Ordering};

    let gate = Arc::new(ExclusiveGate::new(BoundedStore::with_capacity(CAPACITY).unwrap()));
    let occupied = Arc::new(AtomicBool::new(false));

    let handles: Vec<_> = (0..4u8)
        .map(|worker| {
            let gate = Arc::clone(&gate);
            let occupied = Arc::clone(&occupied);
            std::thread::spawn(move || {
                let mut admissions = 0;
                while admissions < 50 {
                    let Ok(mut store) = gate.try_acquire() else {
                        std::thread::yield_now();
                        continue;
                    };

                    assert!(!occupied.swap(true, Ordering::SeqCst));
                    store.write_at(0, &[worker; 16]);
                    occupied.store(false, Ordering::SeqCst);

                    admissions += 1;
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn reclaiming_readers_never_observe_torn_contents() {
    let store = BoundedStore::with_capacity(CAPACITY).unwrap();
    let gate = Arc::new(ReclaimingGate::new(store));
    gate.publish_with(|store| store.write_at(0, &[1u8; CAPACITY as usize]))
        .unwrap();

    let writers: Vec<_> = (2u8..=4)
        .map(|fill| {
            let gate = Arc::clone(&gate);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    gate.publish_with(|store| store.write_at(0, &[fill; CAPACITY as usize]))
                        .unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let gate = Arc::clone(&gate);
            std::thread::spawn(move || {
                let mut buf = [0u8; CAPACITY as usize];
                for _ in 0..200 {
                    let pin = gate.pin();
                    assert_eq!(pin.store().read_at(0, &mut buf), CAPACITY as usize);

                    // Every publication fills the whole region with one
                    // value, so any mix of values is a torn read.
                    let first = buf[0];
                    assert!(buf.iter().all(|&byte| byte == first));
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }
}

#[test]
fn racing_writers_lose_no_updates() {
    let store = BoundedStore::with_capacity(CAPACITY).unwrap();
    let gate = Arc::new(ReclaimingGate::new(store));

    // Each writer repeatedly increments its own byte; the copy-and-swap
    // retry keeps every increment even when publications race.
    let handles: Vec<_> = (0..4usize)
        .map(|slot| {
            let gate = Arc::clone(&gate);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    gate.publish_with(|store| {
                        let mut byte = [0u8];
                        store.read_at(slot as i64, &mut byte);
                        store.write_at(slot as i64, &[byte[0] + 1]);
                    })
                    .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let pin = gate.pin();
    let mut buf = [0u8; 4];
    assert_eq!(pin.store().read_at(0, &mut buf), 4);
    assert_eq!(buf, [100u8; 4]);
    assert_eq!(pin.generation(), 400);
}
