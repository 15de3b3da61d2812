use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, Ordering};

/// The gate is already held by another session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Busy;

impl core::fmt::Display for Busy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "gate already held")
    }
}

/// Single-owner admission over an owned value.
///
/// The state machine is `Free → Held → Free`. [`try_acquire`] attempts the
/// `Free → Held` transition and refuses with [`Busy`] instead of waiting;
/// there is no queueing and no backoff in the gate itself. Release happens
/// when the returned guard drops, which makes an unbalanced release
/// unrepresentable.
///
/// [`try_acquire`]: Self::try_acquire
pub struct ExclusiveGate<T> {
    held: AtomicBool,
    value: UnsafeCell<T>,
}

// Safety: `held` admits at most one `ExclusiveGuard` at a time, and the
// guard is the only path to the inner value from a shared reference.
unsafe impl<T: Send> Sync for ExclusiveGate<T> {}
unsafe impl<T: Send> Send for ExclusiveGate<T> {}

/// Sole access to the gated value, held until drop.
pub struct ExclusiveGuard<'lt, T> {
    gate: &'lt ExclusiveGate<T>,
}

impl<T> ExclusiveGate<T> {
    pub fn new(value: T) -> Self {
        ExclusiveGate {
            held: AtomicBool::new(false),
            value: UnsafeCell::new(value),
        }
    }

    /// Attempt the `Free → Held` transition.
    pub fn try_acquire(&self) -> Result<ExclusiveGuard<'_, T>, Busy> {
        if self
            .held
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(Busy);
        }

        Ok(ExclusiveGuard { gate: self })
    }

    /// Whether some session currently holds the gate.
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Relaxed)
    }

    /// Access the value without admission control.
    ///
    /// Takes `&mut self`, so no guard can be live at the same time.
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }
}

impl<T> core::ops::Deref for ExclusiveGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Safety: the held flag grants this guard unique access.
        unsafe { &*self.gate.value.get() }
    }
}

impl<T> core::ops::DerefMut for ExclusiveGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // Safety: as above, and `&mut self` forbids aliased reads.
        unsafe { &mut *self.gate.value.get() }
    }
}

impl<T> Drop for ExclusiveGuard<'_, T> {
    fn drop(&mut self) {
        self.gate.held.store(false, Ordering::Release);
    }
}

#[test]
fn second_acquire_is_refused() {
    let gate = ExclusiveGate::new(5u32);

    let mut guard = gate.try_acquire().unwrap();
    *guard += 1;
    assert_eq!(gate.try_acquire().err(), Some(Busy));

    drop(guard);
    assert!(!gate.is_held());
    assert_eq!(*gate.try_acquire().unwrap(), 6);
}

#[test]
fn contended_from_threads() {
    use std::sync::atomic::AtomicU32;
    use std::sync::Arc;

    let gate = Arc::new(ExclusiveGate::new(0u64));
    let refusals = Arc::new(AtomicU32::new(0));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let gate = Arc::clone(&gate);
            let refusals = Arc::clone(&refusals);
            std::thread::spawn(move || {
                for _ in 0..1000 {
                    match gate.try_acquire() {
                        Ok(mut guard) => *guard += 1,
                        Err(Busy) => {
                            refusals.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mut gate = Arc::try_unwrap(gate).ok().unwrap();
    let successes = *gate.get_mut();
    assert_eq!(successes + u64::from(refusals.load(Ordering::Relaxed)), 4000);
}
