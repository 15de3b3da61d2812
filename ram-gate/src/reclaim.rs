use std::sync::Arc;

use arc_swap::ArcSwap;
use ram_store::BoundedStore;

/// One published version of the region contents.
///
/// The id is a monotone stamp: every publication supersedes a lower id.
pub struct Generation {
    id: u64,
    store: BoundedStore,
}

impl Generation {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn store(&self) -> &BoundedStore {
        &self.store
    }
}

/// Reader-protected publication with deferred reclamation.
///
/// Any number of readers and writers are admitted concurrently. A writer
/// never mutates the published allocation: it duplicates the current
/// contents, applies its change to the private copy, and swaps the copy in
/// under a bumped generation id. Readers pin the generation current at
/// entry and keep reading it even if a replacement lands meanwhile; the
/// superseded allocation is released once the last pin referencing it
/// drops. Teardown follows the same path: dropping the gate releases the
/// final allocation only after outstanding pins are gone.
pub struct ReclaimingGate {
    current: ArcSwap<Generation>,
}

/// A pinned read view of one generation.
///
/// Keeps that generation's allocation alive for as long as it is held.
pub struct ReadGuard {
    generation: Arc<Generation>,
}

impl ReadGuard {
    pub fn generation(&self) -> u64 {
        self.generation.id
    }

    pub fn store(&self) -> &BoundedStore {
        &self.generation.store
    }
}

impl ReclaimingGate {
    pub fn new(store: BoundedStore) -> Self {
        ReclaimingGate {
            current: ArcSwap::from_pointee(Generation { id: 0, store }),
        }
    }

    /// Enter a read section against the currently published contents.
    pub fn pin(&self) -> ReadGuard {
        ReadGuard {
            generation: self.current.load_full(),
        }
    }

    /// Id of the currently published generation.
    pub fn current_generation(&self) -> u64 {
        self.current.load().id
    }

    /// Capacity of the region; identical across generations.
    pub fn capacity(&self) -> u32 {
        self.current.load().store.capacity()
    }

    /// Publish a mutated copy of the current contents.
    ///
    /// `mutate` runs against a private duplicate of the newest generation.
    /// When another publication wins the race, the duplicate is discarded
    /// and `mutate` re-runs against the fresh contents, so no writer's
    /// effect is lost. Returns the id of the generation that ended up
    /// carrying the mutation, along with `mutate`'s result.
    pub fn publish_with<R>(
        &self,
        mutate: impl Fn(&mut BoundedStore) -> R,
    ) -> Result<(u64, R), std::io::Error> {
        let mut cur = self.current.load_full();

        loop {
            let mut store = cur.store.duplicate()?;
            let value = mutate(&mut store);
            let id = cur.id + 1;

            let next = Arc::new(Generation { id, store });
            let prev = self.current.compare_and_swap(&cur, next);

            if Arc::ptr_eq(&*prev, &cur) {
                // `cur` is retired; its allocation lives on until the last
                // reader pinning it lets go.
                return Ok((id, value));
            }

            cur = self.current.load_full();
        }
    }
}

#[test]
fn publication_bumps_the_generation() {
    let store = BoundedStore::with_capacity(16).unwrap();
    let gate = ReclaimingGate::new(store);
    assert_eq!(gate.current_generation(), 0);

    let (id, n) = gate.publish_with(|store| store.write_at(0, b"data")).unwrap();
    assert_eq!((id, n), (1, 4));
    assert_eq!(gate.current_generation(), 1);

    let mut buf = [0u8; 4];
    assert_eq!(gate.pin().store().read_at(0, &mut buf), 4);
    assert_eq!(&buf, b"data");
}

#[test]
fn pinned_reader_outlives_retirement() {
    let store = BoundedStore::with_capacity(16).unwrap();
    let gate = ReclaimingGate::new(store);
    gate.publish_with(|store| store.write_at(0, b"old contents")).unwrap();

    let pin = gate.pin();
    gate.publish_with(|store| store.clear()).unwrap();

    // The pin still addresses the retired generation, in full.
    let mut buf = [0u8; 12];
    assert_eq!(pin.store().read_at(0, &mut buf), 12);
    assert_eq!(&buf, b"old contents");
    assert!(pin.generation() < gate.current_generation());

    // A fresh pin observes the replacement.
    assert_eq!(gate.pin().store().count_matching(|byte| byte != 0), 0);
}

#[test]
fn teardown_waits_on_pins() {
    let store = BoundedStore::with_capacity(8).unwrap();
    let gate = ReclaimingGate::new(store);
    gate.publish_with(|store| store.write_at(0, b"keep")).unwrap();

    let pin = gate.pin();
    drop(gate);

    let mut buf = [0u8; 4];
    assert_eq!(pin.store().read_at(0, &mut buf), 4);
    assert_eq!(&buf, b"keep");
}
